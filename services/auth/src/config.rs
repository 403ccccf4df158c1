/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// Service name used in startup logs. Env var: `APP_NAME`.
    pub app_name: String,
    /// Human-readable log output instead of JSON when true. Set via
    /// `APP_ENV=development`.
    pub debug: bool,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub secret_key: String,
    /// Access-token lifetime in minutes (default 60). Env var:
    /// `ACCESS_TOKEN_EXPIRES_MIN`.
    pub access_token_expires_min: u64,
    /// TCP port to listen on (default 3100). Env var: `AUTH_PORT`.
    pub auth_port: u16,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "hamilton-auth".to_owned()),
            debug: std::env::var("APP_ENV")
                .map(|v| v == "development")
                .unwrap_or(false),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            secret_key: std::env::var("SECRET_KEY").expect("SECRET_KEY"),
            access_token_expires_min: std::env::var("ACCESS_TOKEN_EXPIRES_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
        }
    }
}
