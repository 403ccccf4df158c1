use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use hamilton_core::health::{healthz, readyz};
use hamilton_core::middleware::request_id_layer;

use crate::handlers::token::{check_token, login};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Login + token
        .route("/auth/login", post(login))
        .route("/auth/token", get(check_token))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
