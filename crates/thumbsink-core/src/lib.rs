//! thumbsink core - image output sink for thumbnail pipelines
//!
//! This crate takes an in-memory raster image produced by a resizing
//! pipeline and writes it to a byte sink in a format chosen by name,
//! dispatching to the encoders registered for that format.

pub mod encode;
pub mod raster;

pub use encode::{
    classify_format, BuiltinRegistry, CompatibilityConfig, CompatibilityMode, EncoderRegistry,
    FormatFamily, ImageSink, SinkError,
};
pub use raster::{PixelLayout, RasterImage};

/// Format type value meaning "use the encoder's default compression type".
pub const DEFAULT_FORMAT_TYPE: &str = "default";

/// Encoding parameters supplied by the thumbnail parameter builder.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodingParameters {
    /// Compression quality (0.0 to 1.0). `None` or NaN leaves the encoder default.
    pub quality: Option<f32>,
    /// Encoder compression type. `None` or `"default"` leaves the encoder default.
    pub format_type: Option<String>,
}

impl EncodingParameters {
    /// Create parameters that leave every encoder setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression quality.
    ///
    /// NaN clears the quality. Returns `InvalidArgument` outside `[0, 1]`.
    pub fn with_quality(mut self, quality: f32) -> Result<Self, SinkError> {
        if quality.is_nan() {
            self.quality = None;
            return Ok(self);
        }
        if !(0.0..=1.0).contains(&quality) {
            return Err(SinkError::InvalidArgument(format!(
                "Quality must be between 0.0 and 1.0, got {quality}"
            )));
        }
        self.quality = Some(quality);
        Ok(self)
    }

    /// Set the compression type by name.
    pub fn with_format_type(mut self, format_type: impl Into<String>) -> Self {
        self.format_type = Some(format_type.into());
        self
    }

    /// The quality to apply, if any.
    pub fn quality(&self) -> Option<f32> {
        self.quality.filter(|q| !q.is_nan())
    }

    /// The compression type to select, if it differs from the default.
    pub fn explicit_format_type(&self) -> Option<&str> {
        self.format_type
            .as_deref()
            .filter(|t| !t.eq_ignore_ascii_case(DEFAULT_FORMAT_TYPE))
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        self.quality().is_none() && self.explicit_format_type().is_none()
    }
}
