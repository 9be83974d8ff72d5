//! Image sink WASM bindings.
//!
//! # Functions
//!
//! - [`write_image`] - Encode a JsRasterImage in a named format
//! - [`supported_formats`] - Format names the built-in registry answers to
//!
//! # Example
//!
//! ```typescript
//! import { write_image, JsRasterImage } from '@thumbsink/wasm';
//!
//! const image = new JsRasterImage(width, height, 3, pixels);
//! const jpeg = write_image(image, 'jpg', { quality: 0.8 });
//! const png = write_image(image, 'png', undefined, { mode: 'legacy' });
//! ```

use crate::types::JsRasterImage;
use thumbsink_core::{
    BuiltinRegistry, CompatibilityConfig, EncodingParameters, ImageSink, SinkError,
};
use wasm_bindgen::prelude::*;

/// Encode an image to bytes in the given format.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `format` - Format name, case-insensitive ("jpg", "png", "bmp", "gif")
/// * `params` - Optional `{ quality?: number, formatType?: string }`
/// * `compatibility` - Optional `{ mode?: "legacy" | "modern", pngWorkaround?: boolean }`
#[wasm_bindgen]
pub fn write_image(
    image: &JsRasterImage,
    format: &str,
    params: JsValue,
    compatibility: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let params: Option<EncodingParameters> = from_optional(params)?;
    let compatibility: Option<CompatibilityConfig> = from_optional(compatibility)?;

    encode_to_vec(image, format, params, compatibility.unwrap_or_default()).map_err(|e| {
        let message = e.to_string();
        web_sys::console::warn_1(&JsValue::from_str(&format!("write_image({format}): {message}")));
        JsValue::from_str(&message)
    })
}

/// Format names the built-in encoders answer to.
#[wasm_bindgen]
pub fn supported_formats() -> Vec<String> {
    BuiltinRegistry::new()
        .format_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn from_optional<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run the sink into an in-memory buffer.
pub(crate) fn encode_to_vec(
    image: &JsRasterImage,
    format: &str,
    params: Option<EncodingParameters>,
    compatibility: CompatibilityConfig,
) -> Result<Vec<u8>, SinkError> {
    let mut sink = ImageSink::new(Vec::new());
    sink.set_output_format(format);
    sink.set_compatibility(compatibility);
    if let Some(params) = params {
        sink.set_encoding_parameters(params);
    }
    sink.write(&image.to_raster())?;
    Ok(sink.into_inner())
}

/// Tests for encode bindings.
///
/// Note: `write_image` takes and returns `JsValue`, which only works on wasm32
/// targets. These tests exercise the shared path through `encode_to_vec`.
#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image() -> JsRasterImage {
        JsRasterImage::new(20, 20, 3, vec![128u8; 20 * 20 * 3])
    }

    #[test]
    fn test_encode_to_vec_jpeg() {
        let params = EncodingParameters::new().with_quality(0.9).unwrap();
        let jpeg = encode_to_vec(&gray_image(), "jpg", Some(params), Default::default()).unwrap();
        // Verify JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_to_vec_png() {
        let png = encode_to_vec(&gray_image(), "PNG", None, Default::default()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_encode_to_vec_unsupported() {
        let err = encode_to_vec(&gray_image(), "inv", None, Default::default()).unwrap_err();
        assert_eq!(err.to_string(), "No suitable ImageWriter found for inv.");
    }

    #[test]
    fn test_supported_formats() {
        let formats = supported_formats();
        for name in ["jpg", "jpeg", "png", "bmp", "gif"] {
            assert!(formats.iter().any(|f| f == name), "missing {name}");
        }
    }
}
