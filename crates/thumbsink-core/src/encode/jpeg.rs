//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! Quality is expressed in `[0, 1]` like the rest of the sink and mapped onto
//! the encoder's 1-100 scale.

use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder as _};

use super::registry::{EncoderProvider, ImageEncoder};
use super::types::{EncoderInfo, EncoderOptions, SinkError, BUILTIN_VENDOR};

/// Default JPEG compression type (colour, YCbCr).
pub const JPEG_COLOR: &str = "JPEG";

/// Luma-only JPEG.
pub const JPEG_GRAYSCALE: &str = "JPEG-GRAYSCALE";

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.75;

pub(crate) const JPEG_INFO: EncoderInfo = EncoderInfo {
    name: "jpeg",
    vendor: BUILTIN_VENDOR,
    format_names: &["jpg", "jpeg"],
    compression_types: &[JPEG_COLOR, JPEG_GRAYSCALE],
};

/// Map a `[0, 1]` quality onto the encoder's 1-100 scale.
///
/// # Quality Guidelines
///
/// * 0.90-1.00: High quality, suitable for archival or further editing
/// * 0.75-0.90: Good quality, recommended for thumbnails
/// * Below 0.60: Low quality, visible artifacts
pub fn quality_to_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Provider for [`JpegImageEncoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegProvider;

impl EncoderProvider for JpegProvider {
    fn info(&self) -> &EncoderInfo {
        &JPEG_INFO
    }

    fn create_encoder(&self) -> Box<dyn ImageEncoder> {
        Box::new(JpegImageEncoder)
    }
}

/// Built-in JPEG encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegImageEncoder;

impl ImageEncoder for JpegImageEncoder {
    fn info(&self) -> &EncoderInfo {
        &JPEG_INFO
    }

    fn encode(
        &mut self,
        image: &DynamicImage,
        options: &EncoderOptions,
        out: &mut dyn Write,
    ) -> Result<(), SinkError> {
        let quality = quality_to_percent(options.quality().unwrap_or(DEFAULT_JPEG_QUALITY));
        let grayscale = options.compression_type() == Some(JPEG_GRAYSCALE)
            || matches!(image, DynamicImage::ImageLuma8(_));

        let encoder = JpegEncoder::new_with_quality(out, quality);
        if grayscale {
            let luma = image.to_luma8();
            encoder.write_image(luma.as_raw(), luma.width(), luma.height(), ExtendedColorType::L8)?;
        } else {
            let rgb = image.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
        }
        Ok(())
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
