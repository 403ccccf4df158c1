use tracing::debug;

use hamilton_domain::identifier::normalize_identifier;
use hamilton_domain::provider::{DEFAULT_PROVIDER_ORDER, Provider};

use crate::domain::password::verify_password;
use crate::domain::repository::IdentityRepository;
use crate::domain::types::AuthIdentity;
use crate::error::AuthServiceError;
use crate::usecase::token::issue_access_token;

/// Why a login attempt was denied. Logged, never surfaced: the caller sees
/// the same `InvalidCredentials` whatever the reason.
#[derive(Debug, Clone, Copy)]
enum DenyReason {
    EmptyInput,
    IdentityNotFound,
    MissingCredential,
    CredentialMismatch,
    InactiveAccount,
}

fn denied(reason: DenyReason) -> AuthServiceError {
    debug!(?reason, "login denied");
    AuthServiceError::InvalidCredentials
}

const EMAIL_ONLY: [Provider; 1] = [Provider::Email];

/// Provider candidates for an identifier the caller did not qualify.
/// An "@" pins the attempt to email; anything else walks the default
/// order (email, username, room).
fn candidate_providers(identifier: &str) -> &'static [Provider] {
    if identifier.trim().contains('@') {
        &EMAIL_ONLY
    } else {
        &DEFAULT_PROVIDER_ORDER
    }
}

pub struct LoginInput {
    pub identifier: String,
    pub password: String,
    /// Restricts the lookup to one provider; `None` enables the heuristic.
    pub provider: Option<Provider>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<R: IdentityRepository> {
    pub identities: R,
    pub jwt_secret: String,
    pub token_expiry_minutes: u64,
}

impl<R: IdentityRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AuthServiceError> {
        // Cheap rejection first: no store round-trip and no hashing work for
        // requests that cannot possibly succeed.
        if input.identifier.is_empty() || input.password.is_empty() {
            return Err(denied(DenyReason::EmptyInput));
        }

        let identity = match input.provider {
            Some(provider) => self.find_identity(provider, &input.identifier).await?,
            None => {
                // Ordered scan with early exit. Once a provider matches, later
                // providers are never consulted — even if the credential check
                // below fails — so one typed string cannot be stuffed against
                // several providers' identities.
                let mut found = None;
                for &provider in candidate_providers(&input.identifier) {
                    if let Some(identity) =
                        self.find_identity(provider, &input.identifier).await?
                    {
                        found = Some(identity);
                        break;
                    }
                }
                found
            }
        };

        let Some(identity) = identity else {
            return Err(denied(DenyReason::IdentityNotFound));
        };
        let Some(password_hash) = identity.password_hash.as_deref() else {
            // Passwordless or federated identity attempted with a password.
            return Err(denied(DenyReason::MissingCredential));
        };
        if !verify_password(&input.password, password_hash) {
            return Err(denied(DenyReason::CredentialMismatch));
        }

        // Account state is checked after the password on purpose: whether an
        // account is disabled stays invisible without the correct credential.
        let user = match self.identities.find_user(identity.user_id).await? {
            Some(user) if user.is_active => user,
            _ => return Err(denied(DenyReason::InactiveAccount)),
        };

        let grants = self.identities.role_grants(user.id).await?;
        let mut roles: Vec<String> = grants.iter().map(|g| g.name.clone()).collect();
        roles.sort();
        roles.dedup();
        let mut perms: Vec<String> = grants.into_iter().flat_map(|g| g.permissions).collect();
        perms.sort();
        perms.dedup();

        let (access_token, access_token_exp) = issue_access_token(
            &user,
            roles,
            perms,
            &self.jwt_secret,
            self.token_expiry_minutes,
        )?;

        Ok(LoginOutput {
            access_token,
            access_token_exp,
        })
    }

    async fn find_identity(
        &self,
        provider: Provider,
        identifier: &str,
    ) -> Result<Option<AuthIdentity>, AuthServiceError> {
        let normalized = normalize_identifier(provider, identifier);
        self.identities
            .find_active_identity(provider, &normalized)
            .await
    }
}
