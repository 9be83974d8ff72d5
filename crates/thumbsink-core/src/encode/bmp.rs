//! BMP encoding.

use std::io::Write;

use image::codecs::bmp::BmpEncoder;
use image::DynamicImage;

use super::registry::{EncoderProvider, ImageEncoder};
use super::types::{EncoderInfo, EncoderOptions, SinkError, BUILTIN_VENDOR};

/// Uncompressed 24-bit (or 8-bit grayscale) bitmap.
pub const BMP_RGB: &str = "BI_RGB";

/// 32-bit bitmap with explicit channel masks.
pub const BMP_BITFIELDS: &str = "BI_BITFIELDS";

pub(crate) const BMP_INFO: EncoderInfo = EncoderInfo {
    name: "bmp",
    vendor: BUILTIN_VENDOR,
    format_names: &["bmp"],
    compression_types: &[BMP_RGB, BMP_BITFIELDS],
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BmpProvider;

impl EncoderProvider for BmpProvider {
    fn info(&self) -> &EncoderInfo {
        &BMP_INFO
    }

    fn create_encoder(&self) -> Box<dyn ImageEncoder> {
        Box::new(BmpImageEncoder)
    }
}

/// Built-in BMP encoder. Quality is accepted and has no effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpImageEncoder;

impl ImageEncoder for BmpImageEncoder {
    fn info(&self) -> &EncoderInfo {
        &BMP_INFO
    }

    fn encode(
        &mut self,
        image: &DynamicImage,
        options: &EncoderOptions,
        mut out: &mut dyn Write,
    ) -> Result<(), SinkError> {
        let converted = if options.compression_type() == Some(BMP_BITFIELDS) {
            DynamicImage::ImageRgba8(image.to_rgba8())
        } else if matches!(image, DynamicImage::ImageLuma8(_)) {
            image.clone()
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };

        let encoder = BmpEncoder::new(&mut out);
        converted.write_with_encoder(encoder)?;
        Ok(())
    }
}
