//! Design block composition and export.
//!
//! Lays out label, title, QR and bullet copy on a fixed-width canvas, renders
//! the same plan as a raster and as SVG, and serializes the raster into a
//! single-page PDF.

pub mod compose;
pub mod copy;
pub mod export;
pub mod fonts;
pub mod pdf;
pub mod plan;
pub mod raster;
pub mod svg;
pub mod text;

// Re-exports for convenience
pub use compose::{ComposedDesign, compose_design_block};
pub use copy::{CopyBlock, MAX_BULLETS, Purpose};
pub use export::{JPEG_QUALITY, encode_jpeg, encode_png};
pub use fonts::Fonts;
pub use pdf::{PdfDocument, build_pdf, build_pdf_from_jpeg};
pub use plan::{DesignBlockPlan, LayoutMeasures};
pub use raster::render_raster;
pub use svg::{escape_xml, render_svg};
pub use text::{CharCountMeasure, GlyphMeasure, LineLayout, TextMeasure, wrap_text};

/// Unified error type for the design-block crate.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
