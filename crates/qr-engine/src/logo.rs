//! Logo decoding and center overlay.
//!
//! The overlay hides the modules under it; callers must encode with
//! error-correction level `H` whenever a logo is present.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::QrError;
use crate::shape::RoundedRect;

/// Logo side as a fraction of the surface side.
pub const LOGO_FRACTION: f64 = 0.2;

/// White margin drawn around the logo.
pub const PLATE_PADDING: u32 = 8;

/// Corner radius of the backing plate.
pub const PLATE_RADIUS: u32 = 12;

const PLATE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Decode an uploaded logo into an owned buffer.
///
/// Only PNG and JPEG are accepted.
pub fn decode_logo(bytes: &[u8]) -> Result<DynamicImage, QrError> {
    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(QrError::UnsupportedLogoFormat);
    }
    let img = image::load_from_memory_with_format(bytes, format)?;
    debug!(
        width = img.width(),
        height = img.height(),
        ?format,
        "Decoded logo"
    );
    Ok(img)
}

/// Square region the logo occupies on a surface of the given size.
pub fn logo_region(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    let size = (f64::from(side) * LOGO_FRACTION).round() as u32;
    ((width - size) / 2, (height - size) / 2, size)
}

/// Draw a rounded white plate and the center-cropped logo onto `surface`.
pub fn overlay_logo(surface: &mut RgbaImage, logo: &DynamicImage) {
    let (x, y, size) = logo_region(surface.width(), surface.height());
    if size == 0 || logo.width() == 0 || logo.height() == 0 {
        return;
    }

    RoundedRect::new(
        x as i32 - PLATE_PADDING as i32,
        y as i32 - PLATE_PADDING as i32,
        size + PLATE_PADDING * 2,
        size + PLATE_PADDING * 2,
        PLATE_RADIUS,
    )
    .fill(surface, PLATE_COLOR);

    let scaled = center_crop_square(logo).resize_exact(size, size, FilterType::Lanczos3);
    overlay(surface, &scaled.to_rgba8(), x, y);
    debug!(x, y, size, "Overlaid logo");
}

fn center_crop_square(img: &DynamicImage) -> DynamicImage {
    let side = img.width().min(img.height());
    let x = (img.width() - side) / 2;
    let y = (img.height() - side) / 2;
    img.crop_imm(x, y, side, side)
}

/// Alpha-composite `top` onto `base` at the given position.
fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x >= base.width() || target_y >= base.height() {
            continue;
        }
        let alpha = f32::from(pixel[3]) / 255.0;
        if alpha > 0.99 {
            base.put_pixel(target_x, target_y, *pixel);
        } else if alpha > 0.01 {
            let bg = *base.get_pixel(target_x, target_y);
            base.put_pixel(target_x, target_y, blend_pixel(&bg, pixel, alpha));
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (f32::from(fg[0]) * alpha + f32::from(bg[0]) * inv) as u8,
        (f32::from(fg[1]) * alpha + f32::from(bg[1]) * inv) as u8,
        (f32::from(fg[2]) * alpha + f32::from(bg[2]) * inv) as u8,
        bg[3],
    ])
}
