pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use spendwise_config::Config;

static TRACING_INIT: Once = Once::new();

/// Overrides the directory holding config and wallet files.
pub const HOME_ENV: &str = "SPENDWISE_HOME";

/// Initializes the global tracing subscriber, writing to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env();
        let filter = match "spendwise=info".parse::<tracing_subscriber::filter::Directive>() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        };

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Base directory: `SPENDWISE_HOME` when set, else the platform data dir.
pub fn resolve_home() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => Config::default().resolve_data_root(),
    }
}
