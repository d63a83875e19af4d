//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use copy_client::CopyServiceConfig;
use copy_client::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use design_block::{DesignError, Fonts};

use super::validation::validate_setting;

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub copy_api_key: String,
    pub copy_endpoint: String,
    pub copy_model: String,
    pub copy_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub font_regular: Option<PathBuf>,
    pub font_bold: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            copy_api_key: String::new(),
            copy_endpoint: DEFAULT_ENDPOINT.into(),
            copy_model: DEFAULT_MODEL.into(),
            copy_timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: default_output_dir(),
            font_regular: None,
            font_bold: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build configuration from a key lookup. Invalid values are logged and
    /// replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?.trim().to_string();
            if value.is_empty() {
                return None;
            }
            match validate_setting(key, &value) {
                Ok(()) => Some(value),
                Err(e) => {
                    tracing::warn!(key, "Ignoring invalid setting: {e}");
                    None
                }
            }
        };

        let defaults = Self::default();
        Self {
            copy_api_key: g("OPENROUTER_API_KEY").unwrap_or_default(),
            copy_endpoint: g("COPY_ENDPOINT").unwrap_or(defaults.copy_endpoint),
            copy_model: g("COPY_MODEL").unwrap_or(defaults.copy_model),
            copy_timeout_secs: g("COPY_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.copy_timeout_secs),
            output_dir: g("QR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            font_regular: g("QR_FONT_REGULAR").map(PathBuf::from),
            font_bold: g("QR_FONT_BOLD").map(PathBuf::from),
        }
    }

    /// Whether the network copy service is enabled.
    pub fn copy_enabled(&self) -> bool {
        !self.copy_api_key.is_empty()
    }

    pub fn copy_service_config(&self) -> CopyServiceConfig {
        CopyServiceConfig {
            api_key: self.copy_api_key.clone(),
            endpoint: self.copy_endpoint.clone(),
            model: self.copy_model.clone(),
            timeout: Duration::from_secs(self.copy_timeout_secs),
        }
    }

    /// Embedded fonts, with configured overrides applied.
    pub fn load_fonts(&self) -> Result<Fonts, DesignError> {
        Fonts::load(self.font_regular.as_deref(), self.font_bold.as_deref())
    }
}

/// The user's download directory, or the working directory.
fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
