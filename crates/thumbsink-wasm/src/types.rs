//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core thumbsink types,
//! handling the conversion between Rust and JavaScript data representations.

use thumbsink_core::{PixelLayout, RasterImage};
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Bytes per pixel: 1 (gray), 3 (RGB) or 4 (RGBA)
    /// * `pixels` - Pixel data, row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            layout: layout_from_channels(channels),
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.layout.channels() as u8
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsRasterImage {
    /// Convert to a core RasterImage. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> RasterImage {
        RasterImage::with_layout(self.width, self.height, self.layout, self.pixels.clone())
    }
}

/// Map a channel count to a pixel layout.
///
/// Values:
/// - 1 = Luma8
/// - 4 = Rgba8
///
/// Any other value is treated as RGB.
pub(crate) fn layout_from_channels(channels: u8) -> PixelLayout {
    match channels {
        1 => PixelLayout::Luma8,
        4 => PixelLayout::Rgba8,
        _ => PixelLayout::Rgb8,
    }
}
