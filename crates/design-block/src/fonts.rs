//! Fonts used to render design blocks.
//!
//! DejaVu Sans (regular + bold) is embedded so raster output is identical
//! on every machine; TTF/OTF overrides can be loaded from disk.

use std::path::Path;

use ab_glyph::FontArc;
use tracing::info;

use crate::DesignError;

static EMBEDDED_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static EMBEDDED_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Regular and bold faces.
#[derive(Clone)]
pub struct Fonts {
    pub regular: FontArc,
    pub bold: FontArc,
}

impl Fonts {
    /// The bundled DejaVu Sans faces.
    pub fn embedded() -> Result<Self, DesignError> {
        Ok(Self {
            regular: FontArc::try_from_slice(EMBEDDED_REGULAR)?,
            bold: FontArc::try_from_slice(EMBEDDED_BOLD)?,
        })
    }

    /// Load optional overrides; missing paths fall back to the embedded faces.
    pub fn load(regular: Option<&Path>, bold: Option<&Path>) -> Result<Self, DesignError> {
        let embedded = Self::embedded()?;
        Ok(Self {
            regular: match regular {
                Some(path) => load_font_file(path)?,
                None => embedded.regular,
            },
            bold: match bold {
                Some(path) => load_font_file(path)?,
                None => embedded.bold,
            },
        })
    }
}

fn load_font_file(path: &Path) -> Result<FontArc, DesignError> {
    let data = std::fs::read(path)?;
    let font = FontArc::try_from_vec(data)?;
    info!(path = %path.display(), "Loaded custom font");
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn embedded_fonts_parse() {
        let fonts = Fonts::embedded().unwrap();
        assert_ne!(fonts.regular.glyph_id('A').0, 0);
        assert_ne!(fonts.bold.glyph_id('A').0, 0);
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let err = Fonts::load(Some(Path::new("/nonexistent/font.ttf")), None);
        assert!(matches!(err, Err(DesignError::Io(_))));
    }
}
