use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use serde::{Deserialize, Serialize};

use hamilton_auth_types::token::validate_access_token;
use hamilton_domain::provider::Provider;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};

// ── POST /auth/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
    /// Optional provider name. Unknown values are ignored and the
    /// heuristic applies, as if no provider had been sent.
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let provider = body
        .provider
        .as_deref()
        .and_then(|s| s.parse::<Provider>().ok());

    let usecase = LoginUseCase {
        identities: state.identity_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_expiry_minutes: state.token_expiry_minutes,
    };

    let out = usecase
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
            provider,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token: out.access_token,
            token_type: "bearer",
        }),
    ))
}

// ── GET /auth/token ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub perms: Vec<String>,
    pub access_token_exp: u64,
}

pub async fn check_token(
    State(state): State<AppState>,
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let info = validate_access_token(bearer.token(), &state.jwt_secret)
        .map_err(|_| AuthServiceError::InvalidToken)?;

    Ok(Json(CheckTokenResponse {
        user_id: info.user_id,
        email: info.email,
        roles: info.roles,
        perms: info.perms,
        access_token_exp: info.access_token_exp,
    }))
}
