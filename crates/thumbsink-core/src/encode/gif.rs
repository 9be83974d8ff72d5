//! GIF encoding. No tunables; the sink always uses encoder defaults here.

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat};

use super::registry::{EncoderProvider, ImageEncoder};
use super::types::{EncoderInfo, EncoderOptions, SinkError, BUILTIN_VENDOR};

pub(crate) const GIF_INFO: EncoderInfo = EncoderInfo {
    name: "gif",
    vendor: BUILTIN_VENDOR,
    format_names: &["gif"],
    compression_types: &[],
};

#[derive(Debug, Clone, Copy, Default)]
pub struct GifProvider;

impl EncoderProvider for GifProvider {
    fn info(&self) -> &EncoderInfo {
        &GIF_INFO
    }

    fn create_encoder(&self) -> Box<dyn ImageEncoder> {
        Box::new(GifImageEncoder)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GifImageEncoder;

impl ImageEncoder for GifImageEncoder {
    fn info(&self) -> &EncoderInfo {
        &GIF_INFO
    }

    fn encode(
        &mut self,
        image: &DynamicImage,
        _options: &EncoderOptions,
        out: &mut dyn Write,
    ) -> Result<(), SinkError> {
        // Palette quantisation works on RGBA input
        let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
        let mut buffer = Cursor::new(Vec::new());
        rgba.write_to(&mut buffer, ImageFormat::Gif)?;
        out.write_all(buffer.get_ref())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_gif() {
        let image = DynamicImage::new_rgb8(12, 7);
        let mut out = Vec::new();
        GifImageEncoder
            .encode(&image, &EncoderOptions::none(), &mut out)
            .unwrap();

        assert_eq!(&out[0..6], b"GIF89a");
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }
}
