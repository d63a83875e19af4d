//! QR design block studio: configuration, generation session and exports.

pub mod bootstrap;
pub mod config;
pub mod export;
pub mod session;

pub use config::AppConfig;
pub use export::{ExportFormat, write_exports};
pub use session::{GenerateError, GenerateRequest, QrPreview, Session};
