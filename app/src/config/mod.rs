//! Configuration management: defaults, validation, loading from environment.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;
pub use validation::validate_setting;
