use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use hamilton_auth::domain::repository::IdentityRepository;
use hamilton_auth::domain::types::{AuthIdentity, AuthUser, RoleGrant};
use hamilton_auth::error::AuthServiceError;
use hamilton_auth::usecase::login::LoginUseCase;
use hamilton_domain::identifier::normalize_identifier;
use hamilton_domain::provider::Provider;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-integration-tests";
pub const TEST_EXPIRY_MINUTES: u64 = 60;

// ── MockIdentityRepo ─────────────────────────────────────────────────────────

/// In-memory identity store with a query counter. Mirrors the ordering rule
/// of the real repository: primary first, then lowest id.
pub struct MockIdentityRepo {
    users: Vec<AuthUser>,
    identities: Vec<AuthIdentity>,
    grants: Vec<(Uuid, RoleGrant)>,
    queries: Arc<AtomicUsize>,
}

impl MockIdentityRepo {
    pub fn new(users: Vec<AuthUser>, identities: Vec<AuthIdentity>) -> Self {
        Self {
            users,
            identities,
            grants: Vec::new(),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn with_grants(mut self, user_id: Uuid, grants: Vec<RoleGrant>) -> Self {
        self.grants.extend(grants.into_iter().map(|g| (user_id, g)));
        self
    }

    /// Shared handle to the query counter, usable after the repo has moved
    /// into a use case.
    pub fn query_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.queries)
    }
}

impl IdentityRepository for MockIdentityRepo {
    async fn find_active_identity(
        &self,
        provider: Provider,
        normalized: &str,
    ) -> Result<Option<AuthIdentity>, AuthServiceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let mut matches: Vec<&AuthIdentity> = self
            .identities
            .iter()
            .filter(|i| {
                i.provider == provider && i.identifier_normalized == normalized && i.is_active
            })
            .collect();
        matches.sort_by_key(|i| (Reverse(i.is_primary), i.id));
        Ok(matches.first().map(|i| (*i).clone()))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn role_grants(&self, user_id: Uuid) -> Result<Vec<RoleGrant>, AuthServiceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .grants
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, g)| g.clone())
            .collect())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: Option<&str>, is_active: bool) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        full_name: Some("Test User".to_owned()),
        email: email.map(str::to_owned),
        is_active,
    }
}

pub fn test_identity(
    user_id: Uuid,
    provider: Provider,
    raw: &str,
    password_hash: Option<String>,
) -> AuthIdentity {
    AuthIdentity {
        id: Uuid::new_v4(),
        user_id,
        provider,
        identifier: raw.to_owned(),
        identifier_normalized: normalize_identifier(provider, raw),
        password_hash,
        is_active: true,
        is_primary: true,
    }
}

pub fn login_usecase(repo: MockIdentityRepo) -> LoginUseCase<MockIdentityRepo> {
    LoginUseCase {
        identities: repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_expiry_minutes: TEST_EXPIRY_MINUTES,
    }
}
