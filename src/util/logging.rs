// Vitrine - util/logging.rs
//
// tracing / tracing-subscriber setup. Verbosity can come from three
// places; the first match wins:
//   1. RUST_LOG in the environment (full EnvFilter syntax)
//   2. the --debug CLI flag
//   3. [logging] level in config.toml
// With none of those set, DEFAULT_LOG_LEVEL applies. Output goes to
// stderr. Nothing secret or personal is ever logged, at any level.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `debug_flag` mirrors --debug; `config_level` is the validated
/// [logging] level from config.toml, if the user set one.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let filter = match std::env::var("RUST_LOG") {
        // An explicit RUST_LOG wins outright.
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if debug_flag => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new(config_level.unwrap_or(super::constants::DEFAULT_LOG_LEVEL)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .compact()
        .init();

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging ready"
    );
}
