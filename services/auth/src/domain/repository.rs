#![allow(async_fn_in_trait)]

use uuid::Uuid;

use hamilton_domain::provider::Provider;

use crate::domain::types::{AuthIdentity, AuthUser, RoleGrant};
use crate::error::AuthServiceError;

/// Port to the identity store. The login flow only reads this graph.
pub trait IdentityRepository: Send + Sync {
    /// Find the active identity registered under `(provider, normalized)`.
    ///
    /// At most one row comes back. Should duplicates exist despite the
    /// uniqueness invariant, the store must prefer `is_primary = true`,
    /// then the lowest id, so the result never depends on storage order.
    async fn find_active_identity(
        &self,
        provider: Provider,
        normalized: &str,
    ) -> Result<Option<AuthIdentity>, AuthServiceError>;

    /// Load the owning user of an identity.
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError>;

    /// Roles attached to a user, each with its permission codes, as a
    /// materialized graph. Dangling role or permission references are
    /// omitted, not errors.
    async fn role_grants(&self, user_id: Uuid) -> Result<Vec<RoleGrant>, AuthServiceError>;
}
