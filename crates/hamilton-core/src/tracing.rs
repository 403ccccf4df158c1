use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once at service startup.
///
/// JSON output with env-filter (`RUST_LOG`) by default; `debug = true`
/// switches to the human-readable format for local development.
///
/// Safe to call multiple times — subsequent calls are silently ignored.
pub fn init_tracing(debug: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    if debug {
        let _ = registry.with(fmt::layer()).try_init();
    } else {
        let _ = registry.with(fmt::layer().json()).try_init();
    }
}
