//! sea-orm entities for the auth service's identity store.

pub mod auth_identities;
pub mod permissions;
pub mod role_permissions;
pub mod roles;
pub mod user_roles;
pub mod users;
