//! Cross-service plumbing shared by Hamilton services.
//!
//! Health handlers, the request-id layer, and tracing initialization.

pub mod health;
pub mod middleware;
pub mod tracing;
