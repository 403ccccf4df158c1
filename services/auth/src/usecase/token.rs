use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use hamilton_auth_types::token::AccessClaims;

use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed access token for `user` carrying the aggregated role
/// names and permission codes.
///
/// Both lists must arrive sorted and deduplicated so equal logins produce
/// byte-equal claims. Returns the token and its expiry timestamp.
pub fn issue_access_token(
    user: &AuthUser,
    roles: Vec<String>,
    perms: Vec<String>,
    secret: &str,
    expiry_minutes: u64,
) -> Result<(String, u64), AuthServiceError> {
    issue_access_token_at(user, roles, perms, secret, expiry_minutes, now_secs())
}

/// Clock-parameterized issuance: `now` becomes `iat`, and
/// `exp = now + expiry_minutes * 60`. Tests pin the clock through this.
pub fn issue_access_token_at(
    user: &AuthUser,
    roles: Vec<String>,
    perms: Vec<String>,
    secret: &str,
    expiry_minutes: u64,
    now: u64,
) -> Result<(String, u64), AuthServiceError> {
    let exp = now + expiry_minutes * 60;
    let claims = AccessClaims {
        sub: user.id.to_string(),
        email: user.email.clone().unwrap_or_default(),
        roles,
        perms,
        iat: now,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}
