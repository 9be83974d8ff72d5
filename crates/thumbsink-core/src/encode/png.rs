//! PNG encoding.

use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use super::registry::{EncoderProvider, ImageEncoder};
use super::types::{EncoderInfo, EncoderOptions, SinkError, BUILTIN_VENDOR};

pub const PNG_DEFLATE: &str = "Deflate";

pub(crate) const PNG_INFO: EncoderInfo = EncoderInfo {
    name: "png",
    vendor: BUILTIN_VENDOR,
    format_names: &["png"],
    compression_types: &[PNG_DEFLATE],
};

/// Map a `[0, 1]` quality onto deflate effort.
///
/// Lower quality means smaller output: `0.0` asks for the best compression,
/// values of `0.75` and above favour speed.
pub fn compression_for_quality(quality: Option<f32>) -> CompressionType {
    match quality {
        None => CompressionType::Default,
        Some(q) if q <= 0.0 => CompressionType::Best,
        Some(q) if q >= 0.75 => CompressionType::Fast,
        Some(_) => CompressionType::Default,
    }
}

/// Provider for [`PngImageEncoder`], the default png encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngProvider;

impl EncoderProvider for PngProvider {
    fn info(&self) -> &EncoderInfo {
        &PNG_INFO
    }

    fn create_encoder(&self) -> Box<dyn ImageEncoder> {
        Box::new(PngImageEncoder)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageEncoder;

impl ImageEncoder for PngImageEncoder {
    fn info(&self) -> &EncoderInfo {
        &PNG_INFO
    }

    fn encode(
        &mut self,
        image: &DynamicImage,
        options: &EncoderOptions,
        out: &mut dyn Write,
    ) -> Result<(), SinkError> {
        let compression = compression_for_quality(options.quality());
        let encoder = PngEncoder::new_with_quality(out, compression, FilterType::Adaptive);
        image.write_with_encoder(encoder)?;
        Ok(())
    }
}
