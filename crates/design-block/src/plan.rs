//! Vertical layout of a design block.
//!
//! ```text
//! ┌──────────── accent bar ────────────┐
//! │ padding                            │
//! │ ✦ SCAN TO DISCOVER ✦   (label row) │
//! │ Title line 1                       │
//! │ Title line 2                       │
//! │ gap                                │
//! │            ┌────────┐              │
//! │            │   QR   │              │
//! │            └────────┘              │
//! │ gap                                │
//! │ •  Bullet one                      │
//! │ •  Bullet two (wrapped             │
//! │    continuation)                   │
//! │ footer instruction                 │
//! │ padding                            │
//! └──────────── accent bar ────────────┘
//! ```
//!
//! The plan is computed once and consumed by both the raster and the vector
//! renderer; canvas height is derived from the wrapped text.

use crate::copy::CopyBlock;
use crate::fonts::Fonts;
use crate::text::{CharCountMeasure, GlyphMeasure, LineLayout, TextMeasure, wrap_text};

pub const CANVAS_WIDTH: u32 = 1200;
pub const PADDING: u32 = 80;
pub const QR_SIZE: u32 = 600;
pub const TEXT_AREA_WIDTH: u32 = CANVAS_WIDTH - PADDING * 2;
/// Extra inset for bullets so the bullet glyph fits inside the text area.
pub const BULLET_INSET: u32 = 40;

pub const LABEL_TEXT: &str = "✦ SCAN TO DISCOVER ✦";
pub const LABEL_HEIGHT: u32 = 30;
pub const LABEL_GAP: u32 = 20;
pub const LABEL_FONT_SIZE: f32 = 20.0;
pub const LABEL_LETTER_SPACING: f32 = 3.0;

pub const TITLE_FONT_SIZE: f32 = 38.0;
pub const TITLE_LINE_HEIGHT: u32 = 52;
pub const TITLE_COLOR: &str = "#1a1a2e";

/// Gap above and below the QR block.
pub const QR_GAP: u32 = 40;
/// Corner radius of the QR clip in rounded style.
pub const QR_CORNER_RADIUS: u32 = 24;

pub const BULLET_FONT_SIZE: f32 = 24.0;
pub const BULLET_LINE_HEIGHT: u32 = 36;
pub const BULLET_GAP: u32 = 14;
pub const BULLET_COLOR: &str = "#475569";
pub const BULLET_PREFIX: &str = "•  ";
pub const BULLET_CONTINUATION: &str = "    ";

pub const FOOTER_TEXT: &str = "Point your camera at the QR code above";
pub const FOOTER_HEIGHT: u32 = 30;
pub const FOOTER_FONT_SIZE: f32 = 16.0;
pub const FOOTER_COLOR: &str = "#94a3b8";

pub const ACCENT_BAR_HEIGHT: u32 = 8;

/// Character budget per line for vector output.
pub const VECTOR_CHARS_PER_LINE: f32 = 40.0;

/// Measurement strategy and width budgets for the two wrapped blocks.
pub struct LayoutMeasures {
    pub title: Box<dyn TextMeasure>,
    pub title_budget: f32,
    pub bullet: Box<dyn TextMeasure>,
    pub bullet_budget: f32,
}

impl LayoutMeasures {
    /// Glyph-metric measurement for raster output.
    pub fn glyphs(fonts: &Fonts) -> Self {
        Self {
            title: Box::new(GlyphMeasure::new(fonts.bold.clone(), TITLE_FONT_SIZE)),
            title_budget: TEXT_AREA_WIDTH as f32,
            bullet: Box::new(GlyphMeasure::new(fonts.regular.clone(), BULLET_FONT_SIZE)),
            bullet_budget: (TEXT_AREA_WIDTH - BULLET_INSET) as f32,
        }
    }

    /// Character-count measurement for vector output.
    pub fn character_count() -> Self {
        Self {
            title: Box::new(CharCountMeasure),
            title_budget: VECTOR_CHARS_PER_LINE,
            bullet: Box::new(CharCountMeasure),
            bullet_budget: VECTOR_CHARS_PER_LINE,
        }
    }
}

/// A line of text positioned by its baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    pub text: String,
    pub baseline: u32,
}

/// Square QR block placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrPlacement {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Region heights and positions for one design block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignBlockPlan {
    pub width: u32,
    pub height: u32,
    pub label_baseline: u32,
    pub title: LineLayout,
    pub title_lines: Vec<PlannedLine>,
    pub qr: QrPlacement,
    pub bullets: Vec<LineLayout>,
    pub bullet_lines: Vec<PlannedLine>,
    pub footer_baseline: u32,
    pub accent_bar_height: u32,
}

impl DesignBlockPlan {
    /// Lay out the block top-down.
    pub fn compute(copy: &CopyBlock, measures: &LayoutMeasures) -> Self {
        let title = LineLayout::new(
            wrap_text(measures.title.as_ref(), &copy.title, measures.title_budget),
            TITLE_LINE_HEIGHT,
        );
        let bullets: Vec<LineLayout> = copy
            .bullets
            .iter()
            .map(|b| {
                LineLayout::new(
                    wrap_text(measures.bullet.as_ref(), b, measures.bullet_budget),
                    BULLET_LINE_HEIGHT,
                )
            })
            .collect();

        let mut y = PADDING;
        let label_baseline = y + LABEL_FONT_SIZE as u32;
        y += LABEL_HEIGHT + LABEL_GAP;

        let mut title_lines = Vec::with_capacity(title.lines.len());
        for line in &title.lines {
            title_lines.push(PlannedLine {
                text: line.clone(),
                baseline: y + TITLE_FONT_SIZE as u32,
            });
            y += TITLE_LINE_HEIGHT;
        }
        y += QR_GAP;

        let qr = QrPlacement {
            x: (CANVAS_WIDTH - QR_SIZE) / 2,
            y,
            size: QR_SIZE,
        };
        y += QR_SIZE + QR_GAP;

        let mut bullet_lines = Vec::new();
        for layout in &bullets {
            for (i, line) in layout.lines.iter().enumerate() {
                let prefix = if i == 0 { BULLET_PREFIX } else { BULLET_CONTINUATION };
                bullet_lines.push(PlannedLine {
                    text: format!("{prefix}{line}"),
                    baseline: y + BULLET_FONT_SIZE as u32,
                });
                y += BULLET_LINE_HEIGHT;
            }
            y += BULLET_GAP;
        }

        let footer_baseline = y;
        let height = y + FOOTER_HEIGHT + PADDING;

        Self {
            width: CANVAS_WIDTH,
            height,
            label_baseline,
            title,
            title_lines,
            qr,
            bullets,
            bullet_lines,
            footer_baseline,
            accent_bar_height: ACCENT_BAR_HEIGHT,
        }
    }

    pub fn title_block_height(&self) -> u32 {
        self.title.height()
    }

    /// Sum of wrapped bullet heights plus one gap per bullet.
    pub fn bullets_block_height(&self) -> u32 {
        self.bullets.iter().map(|b| b.height() + BULLET_GAP).sum()
    }

    /// Sum of every planned region; always equals `height`.
    pub fn region_sum(&self) -> u32 {
        PADDING
            + LABEL_HEIGHT
            + LABEL_GAP
            + self.title_block_height()
            + QR_GAP
            + self.qr.size
            + QR_GAP
            + self.bullets_block_height()
            + FOOTER_HEIGHT
            + PADDING
    }
}
