//! WCAG contrast ratio between two sRGB colors.

use crate::color::Rgb;

/// Ratio reported for unparseable input; also the black-on-white maximum.
pub const MAX_CONTRAST: f64 = 21.0;

/// Relative luminance with the sRGB piecewise gamma curve.
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = |c: u8| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(color.r) + 0.7152 * linear(color.g) + 0.0722 * linear(color.b)
}

/// Contrast ratio `(lighter + 0.05) / (darker + 0.05)`, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of two hex strings. Malformed input yields [`MAX_CONTRAST`].
pub fn contrast_ratio_hex(a: &str, b: &str) -> f64 {
    match (Rgb::from_hex(a), Rgb::from_hex(b)) {
        (Some(a), Some(b)) => contrast_ratio(a, b),
        _ => MAX_CONTRAST,
    }
}
