//! Byte encoders for finished surfaces.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::DesignError;

/// JPEG quality used for the PDF image stream.
pub const JPEG_QUALITY: u8 = 95;

/// Encode as a lossless PNG byte stream.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, DesignError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Encode as a baseline JPEG. Alpha is dropped.
pub fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Vec<u8>, DesignError> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality).encode_image(&rgb)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trips_dimensions() {
        let img = RgbaImage::from_pixel(12, 7, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&img).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn jpeg_has_soi_and_eoi_markers() {
        let img = RgbaImage::from_pixel(16, 16, Rgba([200, 100, 50, 255]));
        let bytes = encode_jpeg(&img, JPEG_QUALITY).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
        assert!(bytes.ends_with(&[0xFF, 0xD9]));
    }
}
