//! Text measurement, greedy word-wrap, and centered text drawing.
//!
//! Two measurement strategies feed the same wrapper: glyph metrics for
//! raster output and a character count for vector output, which has no
//! font metrics at compose time.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Width of a piece of text in some unit shared with the wrap budget.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f32;
}

/// Pixel width from font advances and kerning.
#[derive(Clone)]
pub struct GlyphMeasure {
    font: FontArc,
    scale: PxScale,
}

impl GlyphMeasure {
    pub fn new(font: FontArc, size_px: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(size_px),
        }
    }
}

impl TextMeasure for GlyphMeasure {
    fn measure(&self, text: &str) -> f32 {
        measure_text_width(&self.font, self.scale, text, 0.0)
    }
}

/// One unit per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCountMeasure;

impl TextMeasure for CharCountMeasure {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32
    }
}

/// Wrapped lines of one text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    pub lines: Vec<String>,
    pub line_height: u32,
}

impl LineLayout {
    pub fn new(lines: Vec<String>, line_height: u32) -> Self {
        Self { lines, line_height }
    }

    pub fn height(&self) -> u32 {
        self.lines.len() as u32 * self.line_height
    }
}

/// Greedy word-wrap.
///
/// A word is appended when the candidate line fits `max_width`; otherwise
/// the current line is committed and the word starts a new one. A word
/// wider than the budget still gets its own line, so no word is dropped.
pub fn wrap_text(measure: &dyn TextMeasure, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let candidate = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{current_line} {word}")
        };

        if measure.measure(&candidate) > max_width && !current_line.is_empty() {
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
        } else {
            current_line = candidate;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Measure the pixel width of a string, adding `letter_spacing` after
/// every character.
pub fn measure_text_width(font: &FontArc, scale: PxScale, text: &str, letter_spacing: f32) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id) + letter_spacing;
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Draw `text` horizontally centered on the image with its baseline at
/// `baseline`.
pub fn draw_centered_text(
    img: &mut RgbaImage,
    font: &FontArc,
    size_px: f32,
    baseline: i32,
    text: &str,
    color: Rgba<u8>,
    letter_spacing: f32,
) {
    let scale = PxScale::from(size_px);
    let top = baseline - font.as_scaled(scale).ascent().round() as i32;
    let text_width = measure_text_width(font, scale, text, letter_spacing);
    let mut x = (img.width() as f32 - text_width).max(0.0) / 2.0;

    if letter_spacing == 0.0 {
        draw_text_mut(img, color, x.round() as i32, top, scale, font, text);
        return;
    }

    let scaled = font.as_scaled(scale);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        draw_text_mut(img, color, x.round() as i32, top, scale, font, ch.encode_utf8(&mut buf));
        x += scaled.h_advance(scaled.glyph_id(ch)) + letter_spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fonts;

    /// Every character is 10 units wide.
    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn measure(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    #[test]
    fn three_equal_words_with_two_word_budget() {
        // "aaaa bbbb" = 90, "aaaa bbbb cccc" = 140
        let lines = wrap_text(&FixedWidth, "aaaa bbbb cccc", 100.0);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn oversized_word_keeps_its_own_line() {
        let lines = wrap_text(&FixedWidth, "hi supercalifragilistic yo", 50.0);
        assert_eq!(lines, vec!["hi", "supercalifragilistic", "yo"]);
    }

    #[test]
    fn no_word_is_dropped() {
        let text = "one two three four five six seven eight nine ten";
        for budget in [1.0, 30.0, 75.0, 200.0, 10_000.0] {
            let lines = wrap_text(&FixedWidth, text, budget);
            assert_eq!(lines.join(" "), text, "budget {budget}");
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text(&FixedWidth, "   ", 100.0).is_empty());
    }

    #[test]
    fn char_count_wraps_at_forty() {
        let text = "Quick and easy — just point your camera at this";
        let lines = wrap_text(&CharCountMeasure, text, 40.0);
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn glyph_measure_is_deterministic_and_monotonic() {
        let fonts = Fonts::embedded().unwrap();
        let measure = GlyphMeasure::new(fonts.regular, 24.0);
        let short = measure.measure("Scan");
        let long = measure.measure("Scan to discover");
        assert!(short > 0.0);
        assert!(long > short);
        assert_eq!(measure.measure("Scan"), short);
    }

    #[test]
    fn letter_spacing_widens_text() {
        let fonts = Fonts::embedded().unwrap();
        let scale = PxScale::from(20.0);
        let plain = measure_text_width(&fonts.bold, scale, "SCAN", 0.0);
        let spaced = measure_text_width(&fonts.bold, scale, "SCAN", 3.0);
        assert!((spaced - plain - 12.0).abs() < 1e-3);
    }

    #[test]
    fn centered_text_draws_inside_image() {
        let fonts = Fonts::embedded().unwrap();
        let mut img = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
        draw_centered_text(&mut img, &fonts.regular, 24.0, 40, "Hello", Rgba([0, 0, 0, 255]), 0.0);
        let inked: Vec<u32> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] < 128)
            .map(|(x, _, _)| x)
            .collect();
        assert!(!inked.is_empty());
        let (min, max) = (inked.iter().min().unwrap(), inked.iter().max().unwrap());
        // Roughly symmetric around the center column.
        assert!((*min as i32 - (199 - *max as i32)).abs() <= 4);
    }
}
