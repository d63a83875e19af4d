//! Minimal single-page PDF holding one JPEG image.
//!
//! Objects are serialized in id order into one growing buffer; each
//! cross-reference offset is the buffer length at the moment its object is
//! started, so recorded offsets always match the assembled bytes.
//!
//! Object graph: `1 Catalog -> 2 Pages -> 3 Page -> 4 Contents`, with the
//! page resources pointing at `5 Image XObject`.

use std::fmt::Write as _;

use image::RgbaImage;
use tracing::debug;

use crate::DesignError;
use crate::export::{JPEG_QUALITY, encode_jpeg};

/// A4 in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;
pub const PAGE_MARGIN: f64 = 40.0;

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
const IMAGE_NAME: &str = "Img0";

/// An assembled PDF and the offsets it was indexed with.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    bytes: Vec<u8>,
    object_offsets: Vec<usize>,
    xref_offset: usize,
    image_len: usize,
}

impl PdfDocument {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Byte offset of object `n` (1-based), as written to the xref table.
    pub fn object_offset(&self, id: usize) -> Option<usize> {
        id.checked_sub(1).and_then(|i| self.object_offsets.get(i).copied())
    }

    pub fn xref_offset(&self) -> usize {
        self.xref_offset
    }

    /// Length of the embedded JPEG stream.
    pub fn image_len(&self) -> usize {
        self.image_len
    }
}

/// Where the image lands on the page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl ImagePlacement {
    /// Scale to fit inside the page margins, preserving aspect ratio, and
    /// center.
    pub fn fit(image_width: u32, image_height: u32) -> Self {
        let avail_w = PAGE_WIDTH - PAGE_MARGIN * 2.0;
        let avail_h = PAGE_HEIGHT - PAGE_MARGIN * 2.0;
        let (iw, ih) = (f64::from(image_width.max(1)), f64::from(image_height.max(1)));
        let scale = (avail_w / iw).min(avail_h / ih);
        let (width, height) = (iw * scale, ih * scale);
        Self {
            width,
            height,
            x: (PAGE_WIDTH - width) / 2.0,
            y: (PAGE_HEIGHT - height) / 2.0,
        }
    }
}

/// Build a one-page PDF from a finished raster.
pub fn build_pdf(img: &RgbaImage) -> Result<PdfDocument, DesignError> {
    let jpeg = encode_jpeg(img, JPEG_QUALITY)?;
    Ok(build_pdf_from_jpeg(&jpeg, img.width(), img.height()))
}

/// Build a one-page PDF around an already-encoded JPEG stream.
pub fn build_pdf_from_jpeg(jpeg: &[u8], width: u32, height: u32) -> PdfDocument {
    let placement = ImagePlacement::fit(width, height);
    let mut writer = PdfWriter::new();

    writer.object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    writer.object(2, "<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    writer.object(
        3,
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] /Contents 4 0 R /Resources << /XObject << /{IMAGE_NAME} 5 0 R >> >> >>"
        ),
    );

    let content = format!(
        "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/{IMAGE_NAME} Do\nQ\n",
        placement.width, placement.height, placement.x, placement.y
    );
    writer.stream_object(4, "", content.as_bytes());
    writer.stream_object(
        5,
        &format!(
            "/Type /XObject /Subtype /Image /Width {width} /Height {height} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode"
        ),
        jpeg,
    );

    let doc = writer.finish(1, jpeg.len());
    debug!(
        bytes = doc.bytes.len(),
        image_len = doc.image_len,
        xref = doc.xref_offset,
        "Assembled PDF"
    );
    doc
}

/// Append-only object writer; the buffer length is the single cursor.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: HEADER.to_vec(),
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects must be written in id order");
        self.offsets.push(self.buf.len());
    }

    fn object(&mut self, id: usize, dict: &str) {
        self.begin(id);
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n{dict}\nendobj\n").as_bytes());
    }

    fn stream_object(&mut self, id: usize, dict_entries: &str, data: &[u8]) {
        self.begin(id);
        let sep = if dict_entries.is_empty() { "" } else { " " };
        self.buf.extend_from_slice(
            format!(
                "{id} 0 obj\n<< {dict_entries}{sep}/Length {} >>\nstream\n",
                data.len()
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root: usize, image_len: usize) -> PdfDocument {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;

        let mut tail = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = writeln!(tail, "{offset:010} 00000 n ");
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {size} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        self.buf.extend_from_slice(tail.as_bytes());

        PdfDocument {
            bytes: self.buf,
            object_offsets: self.offsets,
            xref_offset,
            image_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Fake JPEG payload containing bytes that are not valid UTF-8.
    fn fake_jpeg() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.extend((0..=255u8).cycle().take(1000));
        data.extend([0xFF, 0xD9]);
        data
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).rposition(|w| w == needle)
    }

    /// Parse the xref table at the end of the file.
    fn parse_xref(bytes: &[u8]) -> (usize, Vec<usize>) {
        let start = rfind(bytes, b"startxref\n").unwrap() + b"startxref\n".len();
        let end = start + bytes[start..].iter().position(|&b| b == b'\n').unwrap();
        let xref_pos: usize = std::str::from_utf8(&bytes[start..end]).unwrap().parse().unwrap();

        let table = std::str::from_utf8(&bytes[xref_pos..]).unwrap();
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("xref"));
        let count: usize = lines.next().unwrap().split(' ').nth(1).unwrap().parse().unwrap();
        let offsets = lines
            .take(count)
            .skip(1)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        (xref_pos, offsets)
    }

    #[test]
    fn xref_offsets_point_at_object_headers() {
        let jpeg = fake_jpeg();
        let doc = build_pdf_from_jpeg(&jpeg, 1200, 1500);
        let bytes = doc.bytes();
        let (xref_pos, offsets) = parse_xref(bytes);

        assert_eq!(xref_pos, doc.xref_offset());
        assert_eq!(&bytes[xref_pos..xref_pos + 4], b"xref");
        assert_eq!(offsets.len(), 5);
        for (i, offset) in offsets.iter().enumerate() {
            let header = format!("{} 0 obj\n", i + 1);
            assert_eq!(
                &bytes[*offset..*offset + header.len()],
                header.as_bytes(),
                "object {}",
                i + 1
            );
            assert_eq!(doc.object_offset(i + 1), Some(*offset));
        }
    }

    #[test]
    fn header_and_trailer_markers() {
        let doc = build_pdf_from_jpeg(&fake_jpeg(), 100, 100);
        assert!(doc.bytes().starts_with(b"%PDF-1.4\n"));
        assert!(doc.bytes().ends_with(b"%%EOF\n"));
        assert!(find(doc.bytes(), b"/Root 1 0 R").is_some());
        assert!(find(doc.bytes(), b"/Size 6").is_some());
    }

    #[test]
    fn image_length_matches_embedded_bytes() {
        let jpeg = fake_jpeg();
        let doc = build_pdf_from_jpeg(&jpeg, 300, 400);
        let bytes = doc.bytes();
        let declared = format!("/Length {} >>\nstream\n", jpeg.len());
        let start = find(bytes, declared.as_bytes()).unwrap() + declared.len();
        assert_eq!(&bytes[start..start + jpeg.len()], jpeg.as_slice());
        assert_eq!(&bytes[start + jpeg.len()..start + jpeg.len() + 11], b"\nendstream\n");
        assert_eq!(doc.image_len(), jpeg.len());
    }

    #[test]
    fn content_stream_length_is_exact() {
        let doc = build_pdf_from_jpeg(&fake_jpeg(), 1200, 1500);
        let bytes = doc.bytes();
        let obj4 = doc.object_offset(4).unwrap();
        let text = std::str::from_utf8(&bytes[obj4..doc.object_offset(5).unwrap()]).unwrap();
        let len: usize = text
            .split("/Length ")
            .nth(1)
            .unwrap()
            .split(' ')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        let body = text.splitn(2, "stream\n").nth(1).unwrap();
        assert_eq!(&body[..len], body.trim_end_matches("\nendstream\nendobj\n"));
        assert!(body.contains("/Img0 Do"));
    }

    #[test]
    fn placement_fits_and_centers() {
        let p = ImagePlacement::fit(1200, 1500);
        assert!(p.width <= PAGE_WIDTH - 2.0 * PAGE_MARGIN + 1e-9);
        assert!(p.height <= PAGE_HEIGHT - 2.0 * PAGE_MARGIN + 1e-9);
        assert!((p.width / p.height - 1200.0 / 1500.0).abs() < 1e-9);
        assert!((p.x * 2.0 + p.width - PAGE_WIDTH).abs() < 1e-9);
        assert!((p.y * 2.0 + p.height - PAGE_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn media_box_is_a4() {
        let doc = build_pdf_from_jpeg(&fake_jpeg(), 10, 10);
        assert!(find(doc.bytes(), b"/MediaBox [0 0 595.28 841.89]").is_some());
    }

    #[test]
    fn build_from_raster_embeds_real_jpeg() {
        let img = RgbaImage::from_pixel(40, 60, Rgba([30, 60, 90, 255]));
        let doc = build_pdf(&img).unwrap();
        let bytes = doc.bytes();
        assert!(find(bytes, b"/Width 40 /Height 60").is_some());
        let (_, offsets) = parse_xref(bytes);
        assert_eq!(offsets.len(), 5);
        let image_obj = &bytes[offsets[4]..];
        let stream_start = find(image_obj, b"stream\n").unwrap() + 7;
        assert_eq!(&image_obj[stream_start..stream_start + 2], &[0xFF, 0xD8]);
    }
}
