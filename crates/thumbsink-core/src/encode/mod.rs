//! Image output pipeline for thumbsink.
//!
//! This module provides functionality for:
//! - Classifying output format names ("jpg", "png", ...)
//! - Looking up encoders by format name in an [`EncoderRegistry`]
//! - Tuning encoder options (quality, compression type, png workaround)
//! - Writing encoded bytes to a caller-owned byte sink via [`ImageSink`]
//!
//! # Architecture
//!
//! [`ImageSink::write`] runs a fixed sequence of decisions: validate the image,
//! classify the format, open the encoded-output stream, pick an encoder,
//! build its options, encode, flush. Encoder handles and output streams are
//! scoped to a single write and released on every exit path.
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use thumbsink_core::{EncodingParameters, ImageSink, RasterImage};
//!
//! let image = RasterImage::filled(100, 100, [128, 128, 128]);
//! let mut sink = ImageSink::new(Vec::new());
//! sink.set_output_format("jpg");
//! sink.set_encoding_parameters(EncodingParameters::new().with_quality(0.8)?);
//! sink.write(&image)?;
//! println!("Encoded {} bytes", sink.get_ref().len());
//! ```

mod bmp;
mod compat;
mod format;
mod gif;
mod jpeg;
mod png;
mod registry;
mod sink;
mod types;

pub use bmp::{BmpImageEncoder, BmpProvider, BMP_BITFIELDS, BMP_RGB};
pub use compat::{
    is_default_png_encoder, png_quality_override, select_encoder, CompatibilityConfig,
    CompatibilityMode,
};
pub use format::{classify_format, is_jpeg_or_bmp, is_png, FormatFamily};
pub use gif::{GifImageEncoder, GifProvider};
pub use jpeg::{
    quality_to_percent, JpegImageEncoder, JpegProvider, DEFAULT_JPEG_QUALITY, JPEG_COLOR,
    JPEG_GRAYSCALE,
};
pub use png::{compression_for_quality, PngImageEncoder, PngProvider, PNG_DEFLATE};
pub use registry::{BuiltinRegistry, EncodedOutput, EncoderProvider, EncoderRegistry, ImageEncoder};
pub use sink::{build_options, ImageSink};
pub use types::{EncoderInfo, EncoderOptions, SinkError, BUILTIN_VENDOR};
