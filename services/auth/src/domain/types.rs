use uuid::Uuid;

use hamilton_domain::provider::Provider;

/// Account data the login flow needs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub full_name: Option<String>,
    /// Contact email; not a login key and not necessarily unique.
    pub email: Option<String>,
    pub is_active: bool,
}

/// One authentication method bound to a user.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: Provider,
    /// Identifier as originally entered.
    pub identifier: String,
    /// Derived lookup key (see [`hamilton_domain::identifier`]).
    pub identifier_normalized: String,
    /// Absent for passwordless or federated identities.
    pub password_hash: Option<String>,
    pub is_active: bool,
    /// Preferred row should several identities share a
    /// `(provider, identifier_normalized)` pair.
    pub is_primary: bool,
}

/// A role granted to a user, together with the permission codes it carries.
#[derive(Debug, Clone)]
pub struct RoleGrant {
    pub name: String,
    pub permissions: Vec<String>,
}
