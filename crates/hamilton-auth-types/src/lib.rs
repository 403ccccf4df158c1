//! Auth types shared across Hamilton services.
//!
//! Provides the access-token claims layout and JWT validation. Any service
//! sitting behind the auth service validates tokens with this crate; only
//! the auth service issues them.

pub mod token;
