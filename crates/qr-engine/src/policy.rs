//! Error-correction selection.
//!
//! The level is derived, never user-set: a logo destroys the modules under
//! it, and a low-contrast foreground degrades scanning, so both force `H`.

use tracing::debug;

use crate::color::Rgb;
use crate::contrast::contrast_ratio;

/// Minimum primary-vs-white contrast before escalating to `H`.
pub const MIN_COMFORTABLE_CONTRAST: f64 = 4.5;

/// QR redundancy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// Pick the error-correction level for a composition.
///
/// `H` whenever a logo is present; `H` when the primary color's contrast
/// against white is below [`MIN_COMFORTABLE_CONTRAST`]; `M` otherwise.
pub fn select_error_correction(primary: Rgb, has_logo: bool) -> ErrorCorrection {
    let ratio = contrast_ratio(primary, Rgb::WHITE);
    let level = if has_logo || ratio < MIN_COMFORTABLE_CONTRAST {
        ErrorCorrection::H
    } else {
        ErrorCorrection::M
    };
    debug!(primary = %primary, has_logo, ratio, level = level.as_str(), "Selected error correction");
    level
}
