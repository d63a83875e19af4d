//! QR symbol generation and raster treatment for printable design blocks.
//!
//! Provides brand color parsing, WCAG contrast evaluation, error-correction
//! policy, destination URL validation, a QR encoder adapter that yields a
//! raster surface and matching vector markup, gradient recoloring, and
//! logo overlay.

pub mod color;
pub mod contrast;
pub mod destination;
pub mod gradient;
pub mod logo;
pub mod policy;
pub mod qr;
pub mod shape;

// Re-exports for convenience
pub use color::{BrandColorPair, ColorInput, Rgb};
pub use contrast::{MAX_CONTRAST, contrast_ratio, contrast_ratio_hex};
pub use destination::Destination;
pub use gradient::{LIGHT_THRESHOLD, apply_vertical_gradient};
pub use logo::{decode_logo, overlay_logo};
pub use policy::{ErrorCorrection, select_error_correction};
pub use qr::{QrRequest, QrStyle, QrSymbol, QrVector, encode, render_request};
pub use shape::RoundedRect;

/// Side length of the raster QR surface before compositing.
pub const QR_SURFACE_SIZE: u32 = 1000;

/// Quiet zone around the symbol, in modules.
pub const QR_MARGIN: u32 = 2;

/// Unified error type for the qr-engine crate.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("Please enter a destination URL")]
    EmptyDestination,

    #[error("Please enter a valid URL (e.g. https://example.com): {0}")]
    InvalidDestination(#[from] url::ParseError),

    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Unsupported logo format (only PNG and JPEG are accepted)")]
    UnsupportedLogoFormat,
}
