//! In-memory raster images handed over by the resizing pipeline.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Channel layout of a [`RasterImage`] pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelLayout {
    /// 8-bit grayscale, 1 byte per pixel.
    Luma8,
    /// 8-bit RGB, 3 bytes per pixel.
    #[default]
    Rgb8,
    /// 8-bit RGB with straight alpha, 4 bytes per pixel.
    Rgba8,
}

impl PixelLayout {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Luma8 => 1,
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }

    /// Returns true if this layout carries an alpha channel.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::Rgba8)
    }
}

/// A raster image with row-major 8-bit pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RGB image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, PixelLayout::Rgb8, pixels)
    }

    /// Create a new image with an explicit pixel layout.
    pub fn with_layout(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a solid-colour RGB image.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&rgb);
        }
        Self::new(width, height, pixels)
    }

    /// The "absent" image: no dimensions and no pixels.
    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }

    /// Create a RasterImage from any `image::DynamicImage`.
    ///
    /// Luma, RGB and RGBA 8-bit buffers are kept as-is; every other
    /// variant is converted to RGBA8 when it has alpha and RGB8 otherwise.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        match img {
            DynamicImage::ImageLuma8(buf) => {
                Self::with_layout(width, height, PixelLayout::Luma8, buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => Self::new(width, height, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => {
                Self::with_layout(width, height, PixelLayout::Rgba8, buf.into_raw())
            }
            other if other.color().has_alpha() => Self::with_layout(
                width,
                height,
                PixelLayout::Rgba8,
                other.into_rgba8().into_raw(),
            ),
            other => Self::new(width, height, other.into_rgb8().into_raw()),
        }
    }

    /// Convert to an `image::DynamicImage` for encoding.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<DynamicImage> {
        if !self.is_consistent() {
            return None;
        }
        let pixels = self.pixels.clone();
        match self.layout {
            PixelLayout::Luma8 => {
                GrayImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageLuma8)
            }
            PixelLayout::Rgb8 => {
                RgbImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageRgb8)
            }
            PixelLayout::Rgba8 => {
                RgbaImage::from_raw(self.width, self.height, pixels).map(DynamicImage::ImageRgba8)
            }
        }
    }

    /// Number of bytes the pixel buffer should hold for these dimensions.
    pub fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.layout.channels()
    }

    /// Check if this is an empty/absent image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the buffer length matches the dimensions and layout.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }
}
