//! Process startup: environment, logging, configuration.

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the fmt subscriber. `RUST_LOG` wins; `info` otherwise.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Read .env, then build the runtime config.
pub fn init_config() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load()?;
    if config.copy_enabled() {
        tracing::info!(model = %config.copy_model, "Copy service enabled");
    } else {
        tracing::warn!("OPENROUTER_API_KEY not set, using built-in copy");
    }
    Ok(config)
}
