//! The finished design block and its downloads.

use image::RgbaImage;
use qr_engine::{BrandColorPair, QrStyle, QrSymbol};
use tracing::info;

use crate::DesignError;
use crate::copy::CopyBlock;
use crate::export::encode_png;
use crate::fonts::Fonts;
use crate::pdf::{PdfDocument, build_pdf};
use crate::plan::{DesignBlockPlan, LayoutMeasures};
use crate::raster::render_raster;
use crate::svg::render_svg;

/// A composed design block in both raster and vector form.
///
/// The raster is laid out with glyph-accurate measurement and the SVG with the
/// character-count strategy, since the viewer's fonts are unknown. Region
/// heights still follow the same plan rules, so both exports share structure.
#[derive(Debug, Clone)]
pub struct ComposedDesign {
    copy: CopyBlock,
    plan: DesignBlockPlan,
    raster: RgbaImage,
    svg: String,
}

impl ComposedDesign {
    pub fn copy(&self) -> &CopyBlock {
        &self.copy
    }

    /// Layout the raster was drawn from.
    pub fn plan(&self) -> &DesignBlockPlan {
        &self.plan
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn to_png(&self) -> Result<Vec<u8>, DesignError> {
        encode_png(&self.raster)
    }

    pub fn to_svg(&self) -> Vec<u8> {
        self.svg.as_bytes().to_vec()
    }

    pub fn to_pdf(&self) -> Result<PdfDocument, DesignError> {
        build_pdf(&self.raster)
    }
}

/// Plan and render a design block around an encoded QR symbol.
pub fn compose_design_block(
    copy: &CopyBlock,
    symbol: &QrSymbol,
    colors: &BrandColorPair,
    style: QrStyle,
    fonts: &Fonts,
) -> ComposedDesign {
    let raster_plan = DesignBlockPlan::compute(copy, &LayoutMeasures::glyphs(fonts));
    let raster = render_raster(&raster_plan, &symbol.raster, colors, style, fonts);

    let vector_plan = DesignBlockPlan::compute(copy, &LayoutMeasures::character_count());
    let svg = render_svg(&vector_plan, &symbol.vector, colors);

    info!(
        width = raster.width(),
        height = raster.height(),
        svg_bytes = svg.len(),
        "Composed design block"
    );

    ComposedDesign {
        copy: copy.clone(),
        plan: raster_plan,
        raster,
        svg,
    }
}
