//! thumbsink WASM - WebAssembly bindings for thumbsink
//!
//! This crate exposes the thumbsink-core image sink to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `encode` - Format-dispatching image encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { write_image, JsRasterImage } from '@thumbsink/wasm';
//!
//! await init();
//!
//! const image = new JsRasterImage(width, height, 4, rgbaPixels);
//! const bytes = write_image(image, 'png');
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

// Re-export public types
pub use encode::{supported_formats, write_image};
pub use types::JsRasterImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
