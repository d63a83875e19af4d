//! Vertical gradient recoloring of QR foreground pixels.

use image::RgbaImage;
use tracing::debug;

use crate::color::Rgb;

/// Channel value at or above which a channel counts as "light".
///
/// A pixel is background only when all three channels are light; anything
/// else is treated as a foreground module pixel. This is a heuristic and
/// can misclassify anti-aliased module edges.
pub const LIGHT_THRESHOLD: u8 = 200;

/// Whether a pixel belongs to a dark module rather than the background.
pub fn is_foreground(pixel: &image::Rgba<u8>) -> bool {
    pixel[0] < LIGHT_THRESHOLD || pixel[1] < LIGHT_THRESHOLD || pixel[2] < LIGHT_THRESHOLD
}

/// Recolor foreground pixels with a top-to-bottom gradient, in place.
///
/// Row `y` gets `from.lerp(to, y / (height - 1))`, so the first row is
/// exactly `from` and the last row exactly `to`. Background pixels and the
/// alpha channel are left untouched.
pub fn apply_vertical_gradient(img: &mut RgbaImage, from: Rgb, to: Rgb) {
    let (width, height) = img.dimensions();
    debug!(width, height, from = %from, to = %to, "Applying vertical gradient");

    let span = f64::from(height.saturating_sub(1).max(1));
    for (y, row) in img.enumerate_rows_mut() {
        let color = from.lerp(to, f64::from(y) / span);
        for (_, _, pixel) in row {
            if is_foreground(pixel) {
                pixel[0] = color.r;
                pixel[1] = color.g;
                pixel[2] = color.b;
            }
        }
    }
}
