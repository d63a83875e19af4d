//! Writing downloads to disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use design_block::ComposedDesign;
use tracing::info;

use crate::session::QrPreview;

pub const DESIGN_PNG_FILE: &str = "qr-design-block.png";
pub const DESIGN_SVG_FILE: &str = "qr-design-block.svg";
pub const DESIGN_PDF_FILE: &str = "qr-design-block.pdf";
pub const QR_PNG_FILE: &str = "qr-code.png";

/// One downloadable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
    /// The bare QR preview raster.
    Qr,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Svg,
        ExportFormat::Pdf,
        ExportFormat::Qr,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Png => DESIGN_PNG_FILE,
            ExportFormat::Svg => DESIGN_SVG_FILE,
            ExportFormat::Pdf => DESIGN_PDF_FILE,
            ExportFormat::Qr => QR_PNG_FILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Qr => "qr",
        }
    }

    /// Serialize the artifact. Pure: depends only on the arguments.
    pub fn render(self, design: &ComposedDesign, preview: &QrPreview) -> anyhow::Result<Vec<u8>> {
        Ok(match self {
            ExportFormat::Png => design.to_png()?,
            ExportFormat::Svg => design.to_svg(),
            ExportFormat::Pdf => design.to_pdf()?.into_bytes(),
            ExportFormat::Qr => preview.to_png()?,
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            "qr" => Ok(ExportFormat::Qr),
            other => Err(format!("unknown format '{other}' (expected png, svg, pdf or qr)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write the requested artifacts into `dir`, creating it if needed.
/// Returns the written paths in request order; duplicates are written once.
pub fn write_exports(
    dir: &Path,
    design: &ComposedDesign,
    preview: &QrPreview,
    formats: &[ExportFormat],
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    for (i, format) in formats.iter().enumerate() {
        if formats[..i].contains(format) {
            continue;
        }
        let path = dir.join(format.file_name());
        let bytes = format.render(design, preview)?;
        std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), bytes = bytes.len(), "Wrote {format}");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use copy_client::FallbackCopy;
    use design_block::Fonts;
    use qr_engine::{BrandColorPair, Rgb};

    use crate::session::{GenerateRequest, Session};

    #[test]
    fn parses_formats() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!(" qr ".parse::<ExportFormat>(), Ok(ExportFormat::Qr));
        assert!("gif".parse::<ExportFormat>().is_err());
        for format in ExportFormat::ALL {
            assert_eq!(format.as_str().parse::<ExportFormat>(), Ok(format));
        }
    }

    #[tokio::test]
    async fn writes_all_downloads() {
        let session = Session::new(FallbackCopy, Fonts::embedded().unwrap());
        let design = session
            .generate(GenerateRequest::new("example.com", BrandColorPair::solid(Rgb::BLACK)))
            .await
            .unwrap();
        let preview = session.preview().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let formats = [
            ExportFormat::Png,
            ExportFormat::Svg,
            ExportFormat::Pdf,
            ExportFormat::Qr,
            ExportFormat::Png,
        ];
        let written = write_exports(&out, &design, &preview, &formats).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, [DESIGN_PNG_FILE, DESIGN_SVG_FILE, DESIGN_PDF_FILE, QR_PNG_FILE]);

        let png = std::fs::read(out.join(DESIGN_PNG_FILE)).unwrap();
        assert_eq!(png, design.to_png().unwrap());
        let svg = std::fs::read_to_string(out.join(DESIGN_SVG_FILE)).unwrap();
        assert!(svg.starts_with("<?xml"));
        let pdf = std::fs::read(out.join(DESIGN_PDF_FILE)).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4") && pdf.ends_with(b"%%EOF\n"));
        let qr = image::open(out.join(QR_PNG_FILE)).unwrap();
        assert_eq!((qr.width(), qr.height()), (1000, 1000));
    }
}
