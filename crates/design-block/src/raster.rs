//! Raster renderer for a planned design block.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use qr_engine::{BrandColorPair, QrStyle, Rgb, RoundedRect};
use tracing::debug;

use crate::fonts::Fonts;
use crate::plan::{
    BULLET_COLOR, BULLET_FONT_SIZE, DesignBlockPlan, FOOTER_COLOR, FOOTER_FONT_SIZE, LABEL_FONT_SIZE,
    LABEL_LETTER_SPACING, LABEL_TEXT, QR_CORNER_RADIUS, TITLE_COLOR, TITLE_FONT_SIZE,
};
use crate::text::draw_centered_text;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render the plan onto a fresh canvas of `plan.width` x `plan.height`.
///
/// `qr` is scaled to the planned QR size when it differs. Output depends
/// only on the arguments.
pub fn render_raster(
    plan: &DesignBlockPlan,
    qr: &RgbaImage,
    colors: &BrandColorPair,
    style: QrStyle,
    fonts: &Fonts,
) -> RgbaImage {
    debug!(
        width = plan.width,
        height = plan.height,
        title_lines = plan.title_lines.len(),
        bullet_lines = plan.bullet_lines.len(),
        "Rendering design block raster"
    );

    let mut img = RgbaImage::from_pixel(plan.width, plan.height, BACKGROUND);
    let bar = plan.accent_bar_height;

    fill_accent_bar(&mut img, 0, bar, colors);

    draw_centered_text(
        &mut img,
        &fonts.bold,
        LABEL_FONT_SIZE,
        plan.label_baseline as i32,
        LABEL_TEXT,
        colors.primary.to_rgba(),
        LABEL_LETTER_SPACING,
    );

    let title_color = hex_rgba(TITLE_COLOR);
    for line in &plan.title_lines {
        draw_centered_text(
            &mut img,
            &fonts.bold,
            TITLE_FONT_SIZE,
            line.baseline as i32,
            &line.text,
            title_color,
            0.0,
        );
    }

    draw_qr(&mut img, plan, qr, style);

    let bullet_color = hex_rgba(BULLET_COLOR);
    for line in &plan.bullet_lines {
        draw_centered_text(
            &mut img,
            &fonts.regular,
            BULLET_FONT_SIZE,
            line.baseline as i32,
            &line.text,
            bullet_color,
            0.0,
        );
    }

    draw_centered_text(
        &mut img,
        &fonts.regular,
        FOOTER_FONT_SIZE,
        plan.footer_baseline as i32,
        crate::plan::FOOTER_TEXT,
        hex_rgba(FOOTER_COLOR),
        0.0,
    );

    fill_accent_bar(&mut img, plan.height.saturating_sub(bar), bar, colors);

    img
}

/// Solid bar, or a left-to-right two-stop gradient in gradient mode.
fn fill_accent_bar(img: &mut RgbaImage, y: u32, height: u32, colors: &BrandColorPair) {
    let width = img.width();
    let span = f64::from(width.saturating_sub(1).max(1));
    let column_colors: Vec<Rgba<u8>> = (0..width)
        .map(|x| match colors.gradient_stops() {
            Some((from, to)) => from.lerp(to, f64::from(x) / span).to_rgba(),
            None => colors.primary.to_rgba(),
        })
        .collect();

    for py in y..(y + height).min(img.height()) {
        for (px, color) in column_colors.iter().enumerate() {
            img.put_pixel(px as u32, py, *color);
        }
    }
}

fn draw_qr(img: &mut RgbaImage, plan: &DesignBlockPlan, qr: &RgbaImage, style: QrStyle) {
    let placement = plan.qr;
    let scaled;
    let source = if qr.dimensions() == (placement.size, placement.size) {
        qr
    } else {
        scaled = imageops::resize(qr, placement.size, placement.size, FilterType::Lanczos3);
        &scaled
    };

    match style {
        QrStyle::Square => {
            imageops::replace(img, source, i64::from(placement.x), i64::from(placement.y));
        }
        QrStyle::Rounded => {
            let clip = RoundedRect::new(0, 0, placement.size, placement.size, QR_CORNER_RADIUS);
            for (x, y, pixel) in source.enumerate_pixels() {
                if clip.contains(x as i32, y as i32) {
                    img.put_pixel(placement.x + x, placement.y + y, *pixel);
                }
            }
        }
    }
}

fn hex_rgba(hex: &str) -> Rgba<u8> {
    Rgb::from_hex(hex).unwrap_or(Rgb::BLACK).to_rgba()
}
