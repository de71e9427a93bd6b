//! Image normalization applied before durable storage.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageOutputFormat};

/// Longest edge after normalization.
pub(crate) const MAX_DIMENSION: u32 = 800;
/// JPEG quality for stored images.
pub(crate) const JPEG_QUALITY: u8 = 80;

/// Normalizes an uploaded image: fits it inside a bounded square without
/// ever enlarging, then re-encodes as JPEG at a fixed quality.
pub(crate) fn normalize(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageOutputFormat::Jpeg(JPEG_QUALITY))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn oversized_images_are_fit_inside_the_bound_preserving_aspect() {
        let normalized = normalize(&png_bytes(1000, 500)).unwrap();
        let result = image::load_from_memory(&normalized).unwrap();
        assert_eq!((result.width(), result.height()), (800, 400));
    }

    #[test]
    fn small_images_are_not_enlarged() {
        let normalized = normalize(&png_bytes(100, 50)).unwrap();
        let result = image::load_from_memory(&normalized).unwrap();
        assert_eq!((result.width(), result.height()), (100, 50));
    }

    #[test]
    fn output_is_jpeg() {
        let normalized = normalize(&png_bytes(10, 10)).unwrap();
        assert_eq!(
            image::guess_format(&normalized).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(normalize(b"definitely not an image").is_err());
    }
}
