use sea_orm::Database;
use tracing::info;

use hamilton_auth::config::AuthConfig;
use hamilton_auth::router::build_router;
use hamilton_auth::state::AppState;
use hamilton_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    let config = AuthConfig::from_env();
    init_tracing(config.debug);

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.secret_key,
        token_expiry_minutes: config.access_token_expires_min,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(app = %config.app_name, "auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
