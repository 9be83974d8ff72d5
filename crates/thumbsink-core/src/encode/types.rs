//! Core types for the image output sink.

use thiserror::Error;

/// Vendor string carried by every encoder registered by [`BuiltinRegistry`].
///
/// [`BuiltinRegistry`]: super::BuiltinRegistry
pub const BUILTIN_VENDOR: &str = "thumbsink";

/// Error types for image sink operations.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Caller passed an unusable value (absent image, out-of-range quality, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation attempted in the wrong order.
    #[error("{0}")]
    InvalidState(String),

    /// No encoder is registered for the requested format name.
    #[error("No suitable ImageWriter found for {0}.")]
    UnsupportedFormat(String),

    /// I/O failure from the sink or while opening the encoded-output stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The encoder rejected the image for a reason other than I/O.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

impl SinkError {
    /// Returns the underlying I/O error, if this is one.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            SinkError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for SinkError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => SinkError::Io(io),
            other => SinkError::EncodingFailed(other.to_string()),
        }
    }
}

/// Static description of an encoder implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderInfo {
    /// Human-readable encoder name.
    pub name: &'static str,
    /// Who provides the encoder. Built-in encoders use [`BUILTIN_VENDOR`].
    pub vendor: &'static str,
    /// Lower-case format names this encoder answers to.
    pub format_names: &'static [&'static str],
    /// Supported compression types. The first one is the encoder default;
    /// an empty list means the encoder exposes no compression options.
    pub compression_types: &'static [&'static str],
}

impl EncoderInfo {
    /// Returns true if this encoder answers to `format_name` (case-insensitive).
    pub fn handles(&self, format_name: &str) -> bool {
        self.format_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(format_name))
    }

    /// Returns true if the encoder exposes compression options.
    pub fn can_write_compressed(&self) -> bool {
        !self.compression_types.is_empty()
    }
}

/// Per-write encoder options.
///
/// Mirrors the parameter objects of real encoders: the compression type must
/// be chosen before the quality, and quality is only accepted by encoders
/// that expose compression options.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOptions {
    compression_types: &'static [&'static str],
    compression_type: Option<&'static str>,
    quality: Option<f32>,
}

impl EncoderOptions {
    /// Default options for the given encoder.
    pub fn for_encoder(info: &EncoderInfo) -> Self {
        Self {
            compression_types: info.compression_types,
            compression_type: info.compression_types.first().copied(),
            quality: None,
        }
    }

    /// Options for an encoder without any tunables.
    pub fn none() -> Self {
        Self {
            compression_types: &[],
            compression_type: None,
            quality: None,
        }
    }

    pub fn can_write_compressed(&self) -> bool {
        !self.compression_types.is_empty()
    }

    pub fn compression_types(&self) -> &'static [&'static str] {
        self.compression_types
    }

    /// Currently selected compression type.
    pub fn compression_type(&self) -> Option<&'static str> {
        self.compression_type
    }

    /// Explicitly set quality in `[0, 1]`, or `None` for the encoder default.
    pub fn quality(&self) -> Option<f32> {
        self.quality
    }

    /// Select a compression type by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the encoder has no compression options, or if a
    ///   quality was already set.
    /// - `InvalidArgument` if the name is not one of [`compression_types`].
    ///
    /// [`compression_types`]: Self::compression_types
    pub fn set_compression_type(&mut self, name: &str) -> Result<(), SinkError> {
        if !self.can_write_compressed() {
            return Err(SinkError::InvalidState(
                "Compression is not supported by this encoder.".to_string(),
            ));
        }
        if self.quality.is_some() {
            return Err(SinkError::InvalidState(
                "Compression type must be selected before compression quality.".to_string(),
            ));
        }

        let selected = self
            .compression_types
            .iter()
            .find(|t| t.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| {
                SinkError::InvalidArgument(format!("Unsupported compression type: {name}"))
            })?;
        self.compression_type = Some(selected);
        Ok(())
    }

    /// Set compression quality.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the encoder has no compression options.
    /// - `InvalidArgument` if `quality` is NaN or outside `[0, 1]`.
    pub fn set_compression_quality(&mut self, quality: f32) -> Result<(), SinkError> {
        if !self.can_write_compressed() {
            return Err(SinkError::InvalidState(
                "Compression is not supported by this encoder.".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&quality) {
            return Err(SinkError::InvalidArgument(format!(
                "Compression quality must be between 0.0 and 1.0, got {quality}"
            )));
        }
        self.quality = Some(quality);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: EncoderInfo = EncoderInfo {
        name: "test",
        vendor: "tests",
        format_names: &["foo", "fo"],
        compression_types: &["A", "B"],
    };

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::UnsupportedFormat("inv".to_string());
        assert_eq!(err.to_string(), "No suitable ImageWriter found for inv.");

        let err = SinkError::InvalidState("Output format has not been set.".to_string());
        assert_eq!(err.to_string(), "Output format has not been set.");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = SinkError::from(io);
        assert_eq!(err.to_string(), "pipe closed");
        assert_eq!(
            err.io_error().map(|e| e.kind()),
            Some(std::io::ErrorKind::BrokenPipe)
        );
    }

    #[test]
    fn test_image_io_error_unwrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "full");
        let err = SinkError::from(image::ImageError::IoError(io));
        assert!(matches!(err, SinkError::Io(_)));
    }

    #[test]
    fn test_encoder_info_handles() {
        assert!(INFO.handles("foo"));
        assert!(INFO.handles("FOO"));
        assert!(INFO.handles("Fo"));
        assert!(!INFO.handles("bar"));
        assert!(INFO.can_write_compressed());
    }

    #[test]
    fn test_options_default_to_first_type() {
        let opts = EncoderOptions::for_encoder(&INFO);
        assert_eq!(opts.compression_type(), Some("A"));
        assert_eq!(opts.quality(), None);
    }

    #[test]
    fn test_type_then_quality() {
        let mut opts = EncoderOptions::for_encoder(&INFO);
        opts.set_compression_type("b").unwrap();
        opts.set_compression_quality(0.5).unwrap();
        assert_eq!(opts.compression_type(), Some("B"));
        assert_eq!(opts.quality(), Some(0.5));
    }

    #[test]
    fn test_quality_then_type_is_rejected() {
        let mut opts = EncoderOptions::for_encoder(&INFO);
        opts.set_compression_quality(0.5).unwrap();
        let result = opts.set_compression_type("B");
        assert!(matches!(result, Err(SinkError::InvalidState(_))));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut opts = EncoderOptions::for_encoder(&INFO);
        let result = opts.set_compression_type("Z");
        assert!(matches!(result, Err(SinkError::InvalidArgument(_))));
        assert_eq!(opts.compression_type(), Some("A"));
    }

    #[test]
    fn test_quality_range() {
        let mut opts = EncoderOptions::for_encoder(&INFO);
        assert!(opts.set_compression_quality(0.0).is_ok());
        assert!(opts.set_compression_quality(1.0).is_ok());
        assert!(opts.set_compression_quality(1.5).is_err());
        assert!(opts.set_compression_quality(-0.1).is_err());
        assert!(opts.set_compression_quality(f32::NAN).is_err());
    }

    #[test]
    fn test_no_compression_options() {
        let mut opts = EncoderOptions::none();
        assert!(!opts.can_write_compressed());
        assert!(matches!(
            opts.set_compression_quality(0.5),
            Err(SinkError::InvalidState(_))
        ));
        assert!(matches!(
            opts.set_compression_type("A"),
            Err(SinkError::InvalidState(_))
        ));
    }
}
