//! QR encoder adapter.
//!
//! Wraps the `qrcode` crate and renders one module matrix twice: as an RGBA
//! raster surface and as vector path markup. Both come from the same
//! `to_colors()` output, so raster and vector exports agree module for
//! module.

use std::fmt::Write as _;

use image::{DynamicImage, RgbaImage};
use qrcode::QrCode;
use tracing::debug;

use crate::color::{BrandColorPair, Rgb};
use crate::destination::Destination;
use crate::policy::{ErrorCorrection, select_error_correction};
use crate::{QR_MARGIN, QR_SURFACE_SIZE, QrError, gradient, logo};

/// Corner treatment of the QR block inside a design block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QrStyle {
    #[default]
    Square,
    Rounded,
}

impl QrStyle {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "rounded" => QrStyle::Rounded,
            _ => QrStyle::Square,
        }
    }
}

/// Vector form of a QR symbol in module units.
///
/// The view box is `modules + 2 * margin` on each side; `path` holds one
/// closed subpath per horizontal run of dark modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrVector {
    view_box: u32,
    path: String,
    dark: Rgb,
    light: Rgb,
}

impl QrVector {
    pub fn view_box(&self) -> u32 {
        self.view_box
    }

    pub fn path_data(&self) -> &str {
        &self.path
    }

    pub fn dark(&self) -> Rgb {
        self.dark
    }

    /// Inner markup (background rect + module path) with a custom module fill.
    ///
    /// `dark_fill` is any SVG paint, e.g. `#000000` or `url(#qrGrad)`.
    pub fn body_markup(&self, dark_fill: &str) -> String {
        format!(
            r#"<rect width="{vb}" height="{vb}" fill="{light}"/><path d="{d}" fill="{fill}" shape-rendering="crispEdges"/>"#,
            vb = self.view_box,
            light = self.light.to_hex(),
            d = self.path,
            fill = dark_fill,
        )
    }
}

/// One encoded symbol in both raster and vector form.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    pub raster: RgbaImage,
    pub vector: QrVector,
    pub error_correction: ErrorCorrection,
    /// Modules per side, excluding the margin.
    pub module_count: u32,
}

/// Everything needed to render the QR surface of one generation.
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub payload: Destination,
    pub error_correction: ErrorCorrection,
    pub pixel_size: u32,
    pub colors: BrandColorPair,
    pub style: QrStyle,
}

impl QrRequest {
    /// Build a request; the error-correction level is derived from the
    /// primary color and logo presence.
    pub fn new(
        payload: Destination,
        colors: BrandColorPair,
        style: QrStyle,
        has_logo: bool,
    ) -> Self {
        Self {
            error_correction: select_error_correction(colors.primary, has_logo),
            payload,
            pixel_size: QR_SURFACE_SIZE,
            colors,
            style,
        }
    }
}

/// Encode a payload into a raster surface and vector markup.
///
/// The payload must already be an absolute `http`/`https` URL; anything
/// else is rejected before the encoder runs.
pub fn encode(
    payload: &str,
    error_correction: ErrorCorrection,
    dark: Rgb,
    light: Rgb,
    margin: u32,
    size_px: u32,
) -> Result<QrSymbol, QrError> {
    let destination = Destination::parse_strict(payload)?;
    encode_destination(&destination, error_correction, dark, light, margin, size_px)
}

fn encode_destination(
    destination: &Destination,
    error_correction: ErrorCorrection,
    dark: Rgb,
    light: Rgb,
    margin: u32,
    size_px: u32,
) -> Result<QrSymbol, QrError> {
    let code =
        QrCode::with_error_correction_level(destination.as_str().as_bytes(), error_correction.into())?;
    let module_count = code.width() as u32;
    let modules: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    debug!(
        module_count,
        margin,
        size_px,
        level = error_correction.as_str(),
        "Encoded QR symbol"
    );

    let raster = rasterize(&modules, module_count, margin, size_px, dark, light);
    let vector = vectorize(&modules, module_count, margin, dark, light);

    Ok(QrSymbol {
        raster,
        vector,
        error_correction,
        module_count,
    })
}

/// Render the QR surface for a request: encode, recolor, overlay the logo.
pub fn render_request(
    request: &QrRequest,
    logo_image: Option<&DynamicImage>,
) -> Result<QrSymbol, QrError> {
    let mut symbol = encode_destination(
        &request.payload,
        request.error_correction,
        request.colors.primary,
        Rgb::WHITE,
        QR_MARGIN,
        request.pixel_size,
    )?;

    if let Some((from, to)) = request.colors.gradient_stops() {
        gradient::apply_vertical_gradient(&mut symbol.raster, from, to);
    }
    if let Some(logo_image) = logo_image {
        logo::overlay_logo(&mut symbol.raster, logo_image);
    }

    Ok(symbol)
}

/// Map each pixel row/column onto a module index across the full
/// `size_px` surface, so the symbol always fills it exactly.
fn rasterize(
    modules: &[bool],
    module_count: u32,
    margin: u32,
    size_px: u32,
    dark: Rgb,
    light: Rgb,
) -> RgbaImage {
    let total = u64::from(module_count + margin * 2);
    let size = size_px.max(1);
    let module_at = |px: u32| -> Option<usize> {
        let m = (u64::from(px) * total / u64::from(size)) as u32;
        (m >= margin && m < margin + module_count).then(|| (m - margin) as usize)
    };
    let axis: Vec<Option<usize>> = (0..size).map(module_at).collect();

    let dark_px = dark.to_rgba();
    let mut img = RgbaImage::from_pixel(size, size, light.to_rgba());
    let count = module_count as usize;

    for (y, row_module) in axis.iter().enumerate() {
        let Some(my) = row_module else { continue };
        for (x, col_module) in axis.iter().enumerate() {
            let Some(mx) = col_module else { continue };
            if modules[my * count + mx] {
                img.put_pixel(x as u32, y as u32, dark_px);
            }
        }
    }

    img
}

fn vectorize(modules: &[bool], module_count: u32, margin: u32, dark: Rgb, light: Rgb) -> QrVector {
    let count = module_count as usize;
    let mut path = String::new();

    for (y, row) in modules.chunks(count).enumerate() {
        let mut x = 0usize;
        while x < count {
            if !row[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < count && row[x] {
                x += 1;
            }
            let run = x - start;
            let _ = write!(
                path,
                "M{} {}h{}v1h-{}z",
                start as u32 + margin,
                y as u32 + margin,
                run,
                run
            );
        }
    }

    QrVector {
        view_box: module_count + margin * 2,
        path,
        dark,
        light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_symbol(size: u32) -> QrSymbol {
        encode(
            "https://example.com/",
            ErrorCorrection::M,
            Rgb::BLACK,
            Rgb::WHITE,
            QR_MARGIN,
            size,
        )
        .unwrap()
    }

    #[test]
    fn raster_fills_requested_size() {
        let symbol = black_symbol(QR_SURFACE_SIZE);
        assert_eq!(symbol.raster.dimensions(), (QR_SURFACE_SIZE, QR_SURFACE_SIZE));
        assert!(symbol.module_count >= 21);
    }

    #[test]
    fn margin_is_light_and_finder_is_dark() {
        let symbol = black_symbol(500);
        let total = symbol.module_count + QR_MARGIN * 2;
        // Corner pixel lies in the quiet zone.
        assert_eq!(symbol.raster.get_pixel(0, 0), &Rgb::WHITE.to_rgba());
        // First module of the top-left finder pattern is always dark.
        let finder_px = (QR_MARGIN * 500).div_ceil(total);
        assert_eq!(
            symbol.raster.get_pixel(finder_px, finder_px),
            &Rgb::BLACK.to_rgba()
        );
    }

    #[test]
    fn vector_matches_module_grid() {
        let symbol = black_symbol(QR_SURFACE_SIZE);
        let vector = &symbol.vector;
        assert_eq!(vector.view_box(), symbol.module_count + QR_MARGIN * 2);
        // Finder pattern starts with a 7-module run at the margin corner.
        assert!(vector.path_data().starts_with("M2 2h7v1h-7z"));
        let body = vector.body_markup(&vector.dark().to_hex());
        let vb = vector.view_box();
        assert!(body.starts_with(&format!(r##"<rect width="{vb}" height="{vb}" fill="#ffffff"/>"##)));
        assert!(body.contains(r##"fill="#000000" shape-rendering"##));
    }

    #[test]
    fn vector_and_raster_agree() {
        let small = black_symbol(100);
        let margin = QR_MARGIN as usize;
        let total = small.module_count as usize + margin * 2;
        let scale = 10usize;
        let symbol = black_symbol((total * scale) as u32);

        // Rebuild dark cells from the path runs and compare with the raster.
        let mut dark = vec![false; total * total];
        for cmd in symbol.vector.path_data().split('z').filter(|s| !s.is_empty()) {
            let cmd = cmd.trim_start_matches('M');
            let (pos, rest) = cmd.split_once('h').unwrap();
            let (x, y) = pos.split_once(' ').unwrap();
            let run: usize = rest.split_once('v').unwrap().0.parse().unwrap();
            let (x, y): (usize, usize) = (x.parse().unwrap(), y.parse().unwrap());
            for dx in 0..run {
                dark[y * total + x + dx] = true;
            }
        }
        for my in 0..total {
            for mx in 0..total {
                let px = symbol
                    .raster
                    .get_pixel((mx * scale + scale / 2) as u32, (my * scale + scale / 2) as u32);
                assert_eq!(px[0] == 0, dark[my * total + mx], "module ({mx}, {my})");
            }
        }
    }

    #[test]
    fn encode_rejects_relative_payload() {
        let err = encode(
            "example.com",
            ErrorCorrection::M,
            Rgb::BLACK,
            Rgb::WHITE,
            QR_MARGIN,
            100,
        );
        assert!(matches!(err, Err(QrError::InvalidDestination(_))));
    }

    #[test]
    fn encode_rejects_non_http_scheme() {
        let err = encode(
            "javascript:alert(1)",
            ErrorCorrection::M,
            Rgb::BLACK,
            Rgb::WHITE,
            QR_MARGIN,
            100,
        );
        assert!(matches!(err, Err(QrError::UnsupportedScheme(_))));
    }

    #[test]
    fn request_derives_level_from_logo_and_contrast() {
        let dest = Destination::normalize("example.com").unwrap();
        let solid_black = BrandColorPair::solid(Rgb::BLACK);
        let yellow = BrandColorPair::solid(Rgb::new(255, 255, 0));

        let plain = QrRequest::new(dest.clone(), solid_black, QrStyle::Square, false);
        assert_eq!(plain.error_correction, ErrorCorrection::M);
        assert_eq!(plain.pixel_size, QR_SURFACE_SIZE);

        let with_logo = QrRequest::new(dest.clone(), solid_black, QrStyle::Square, true);
        assert_eq!(with_logo.error_correction, ErrorCorrection::H);

        let low_contrast = QrRequest::new(dest, yellow, QrStyle::Square, false);
        assert_eq!(low_contrast.error_correction, ErrorCorrection::H);
    }

    #[test]
    fn render_request_applies_gradient() {
        let end = Rgb::new(0x4f, 0x46, 0xe5);
        let dest = Destination::normalize("example.com").unwrap();
        let colors = BrandColorPair::gradient(Rgb::BLACK, end);
        let mut request = QrRequest::new(dest, colors, QrStyle::Square, false);
        request.pixel_size = 290;
        let symbol = render_request(&request, None).unwrap();

        let img = &symbol.raster;
        let white = Rgb::WHITE.to_rgba();
        assert_eq!(img.get_pixel(0, 0), &white);

        let first_dark_row = (0..img.height())
            .find(|&y| (0..img.width()).any(|x| img.get_pixel(x, y) != &white))
            .unwrap();
        let t = f64::from(first_dark_row) / f64::from(img.height() - 1);
        let expected = Rgb::BLACK.lerp(end, t).to_rgba();
        let row_colors: Vec<_> = (0..img.width())
            .map(|x| *img.get_pixel(x, first_dark_row))
            .filter(|p| p != &white)
            .collect();
        assert!(!row_colors.is_empty());
        assert!(row_colors.iter().all(|p| p == &expected));
    }

    #[test]
    fn style_parse_defaults_to_square() {
        assert_eq!(QrStyle::parse("Rounded"), QrStyle::Rounded);
        assert_eq!(QrStyle::parse("dots"), QrStyle::Square);
    }
}
