//! The image sink: picks an encoder by format name and writes to a byte sink.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use image::{DynamicImage, RgbImage, RgbaImage};

use super::compat::{png_quality_override, select_encoder, CompatibilityConfig};
use super::format::{classify_format, FormatFamily};
use super::registry::{BuiltinRegistry, EncoderRegistry, ImageEncoder};
use super::types::{EncoderInfo, EncoderOptions, SinkError};
use crate::raster::RasterImage;
use crate::EncodingParameters;

/// Writes raster images to a caller-owned [`Write`] in a configurable format.
///
/// The sink is never closed by this type; every [`write`] that gets past
/// argument checks ends with a flush, whether or not encoding succeeded. The format must be set before writing and may be changed
/// between writes.
///
/// [`write`]: ImageSink::write
pub struct ImageSink<W: Write> {
    sink: W,
    registry: Arc<dyn EncoderRegistry>,
    output_format: Option<String>,
    params: Option<EncodingParameters>,
    compatibility: CompatibilityConfig,
}

impl<W: Write> ImageSink<W> {
    /// Create a sink backed by the built-in encoders.
    pub fn new(sink: W) -> Self {
        Self::with_registry(sink, Arc::new(BuiltinRegistry::new()))
    }

    /// Create a sink that looks encoders up in `registry`.
    pub fn with_registry(sink: W, registry: Arc<dyn EncoderRegistry>) -> Self {
        Self {
            sink,
            registry,
            output_format: None,
            params: None,
            compatibility: CompatibilityConfig::default(),
        }
    }

    /// Set the output format name. Stored verbatim; checked at write time.
    pub fn set_output_format(&mut self, format_name: impl Into<String>) {
        self.output_format = Some(format_name.into());
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output_format.as_deref()
    }

    pub fn set_encoding_parameters(&mut self, params: EncodingParameters) {
        self.params = Some(params);
    }

    /// Go back to encoder defaults.
    pub fn clear_encoding_parameters(&mut self) {
        self.params = None;
    }

    pub fn encoding_parameters(&self) -> Option<&EncodingParameters> {
        self.params.as_ref()
    }

    pub fn set_compatibility(&mut self, config: CompatibilityConfig) {
        self.compatibility = config;
    }

    pub fn compatibility(&self) -> CompatibilityConfig {
        self.compatibility
    }

    /// The underlying byte sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Give the byte sink back to the caller.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Encode `image` in the configured format and write it to the sink.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty image, a pixel buffer that does not
    ///   match the dimensions, or unusable encoding parameters.
    /// - `InvalidState` if no output format has been set.
    /// - `UnsupportedFormat` if no encoder handles the format.
    /// - `Io` for failures of the sink or the encoded-output stream, unchanged.
    /// - `EncodingFailed` if the encoder rejects the image.
    ///
    /// On failure the sink may hold a partial image.
    pub fn write(&mut self, image: &RasterImage) -> Result<(), SinkError> {
        if image.is_empty() {
            return Err(SinkError::InvalidArgument(
                "Cannot write a null image.".to_string(),
            ));
        }
        if !image.is_consistent() {
            return Err(SinkError::InvalidArgument(format!(
                "Pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                image.pixels.len(),
                image.expected_len(),
                image.width,
                image.height,
                image.layout
            )));
        }

        let format_name = self.output_format.clone().ok_or_else(|| {
            SinkError::InvalidState("Output format has not been set.".to_string())
        })?;

        let result = self.encode_to_sink(&format_name, image);
        // Flushed on failure too; a secondary flush error is dropped.
        let flushed = self.sink.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn encode_to_sink(&mut self, format_name: &str, image: &RasterImage) -> Result<(), SinkError> {
        let family = classify_format(format_name);
        log::debug!("Writing {}x{} image as {format_name} ({family:?})", image.width, image.height);

        let quality = self.params.as_ref().and_then(EncodingParameters::quality);
        let format_type = self
            .params
            .as_ref()
            .and_then(EncodingParameters::explicit_format_type);

        let mut output = self.registry.open_output(&mut self.sink)?;

        let candidates = self.registry.encoders_by_format_name(format_name);
        let infos: Vec<EncoderInfo> = candidates.iter().map(|p| *p.info()).collect();
        let index = select_encoder(family, &self.compatibility, &infos)
            .ok_or_else(|| SinkError::UnsupportedFormat(format_name.to_string()))?;

        let mut encoder = candidates[index].create_encoder();
        log::debug!(
            "Selected encoder {} ({}) out of {} candidate(s)",
            infos[index].name,
            infos[index].vendor,
            infos.len()
        );

        let options = build_options(
            family,
            &self.compatibility,
            &*encoder,
            quality,
            format_type,
        )?;
        let prepared = prepare_image(family, image)?;

        encoder.encode(&prepared, &options, &mut output)?;
        output.flush()?;

        drop(output);
        drop(encoder);
        Ok(())
    }
}

impl<W: Write> fmt::Debug for ImageSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSink")
            .field("output_format", &self.output_format)
            .field("params", &self.params)
            .field("compatibility", &self.compatibility)
            .finish_non_exhaustive()
    }
}

/// Build the options the selected encoder will run with.
///
/// Jpeg-like formats take the caller's compression type, then quality; the
/// reverse order is rejected by [`EncoderOptions`]. Png ignores caller
/// parameters and only picks up the compatibility quality. Other formats
/// always get encoder defaults.
pub fn build_options(
    family: FormatFamily,
    config: &CompatibilityConfig,
    encoder: &dyn ImageEncoder,
    quality: Option<f32>,
    format_type: Option<&str>,
) -> Result<EncoderOptions, SinkError> {
    let mut options = encoder.default_options();
    if !options.can_write_compressed() {
        return Ok(options);
    }

    match family {
        FormatFamily::JpegLike => {
            if let Some(format_type) = format_type {
                log::trace!("Selecting compression type {format_type}");
                options.set_compression_type(format_type)?;
            }
            if let Some(quality) = quality {
                log::trace!("Setting compression quality {quality}");
                options.set_compression_quality(quality)?;
            }
        }
        FormatFamily::Png => {
            if let Some(forced) = png_quality_override(family, config, encoder.info()) {
                log::warn!(
                    "Forcing compression quality {forced} on default png encoder {}",
                    encoder.info().name
                );
                options.set_compression_quality(forced)?;
            }
        }
        FormatFamily::Other => {}
    }

    Ok(options)
}

/// Convert to an encodable image, flattening alpha for jpeg-like formats.
fn prepare_image(family: FormatFamily, image: &RasterImage) -> Result<DynamicImage, SinkError> {
    let dynamic = image.to_dynamic().ok_or_else(|| {
        SinkError::InvalidArgument("Pixel buffer does not match image dimensions".to_string())
    })?;

    if family == FormatFamily::JpegLike && image.layout.has_alpha() {
        return Ok(DynamicImage::ImageRgb8(flatten_over_black(
            &dynamic.into_rgba8(),
        )));
    }
    Ok(dynamic)
}

/// Composite straight-alpha RGBA over an opaque black background.
fn flatten_over_black(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        image::Rgb([scale(r), scale(g), scale(b)])
    })
}
