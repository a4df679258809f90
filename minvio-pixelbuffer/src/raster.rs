//! Owned ARGB raster.
//!
//! [`Raster`] is the concrete buffer behind each frame: a `Vec<u32>` of packed
//! `0xAARRGGBB` pixels with a stride equal to its width.
//!
//! ```
//! use embedded_graphics_core::{prelude::*, primitives::Rectangle};
//! use minvio_common::Color;
//! use minvio_pixelbuffer::{PixelBuffer, Raster};
//!
//! let mut raster = Raster::new(100, 100);
//! raster
//!     .fill_solid(&Rectangle::new(Point::new(10, 10), Size::new(50, 50)), Color::RED)
//!     .unwrap();
//!
//! assert_eq!(raster.color_at(20, 20), Color::RED);
//! assert_eq!(raster.dimensions(), (100, 100));
//! ```

use crate::{MutablePixelBuffer, PixelBuffer};
use image::RgbaImage;

/// A pixel buffer that owns its memory.
///
/// Freshly created rasters are transparent black (every word is zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    /// Row-major, no padding.
    data: Vec<u32>,
}

impl Raster {
    /// Creates a raster of the given size filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Copy the raster into an 8-bit RGBA image, alpha included.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for &argb in &self.data {
            let [a, r, g, b] = argb.to_be_bytes();
            bytes.extend_from_slice(&[r, g, b, a]);
        }
        // Length always matches width * height * 4.
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Write every pixel as opaque RGBA8 into `frame`, which must hold
    /// `width * height * 4` bytes. Used when uploading to a window surface.
    pub fn write_opaque_rgba8(&self, frame: &mut [u8]) {
        for (dst, &argb) in frame.chunks_exact_mut(4).zip(&self.data) {
            let [_, r, g, b] = argb.to_be_bytes();
            dst.copy_from_slice(&[r, g, b, 0xFF]);
        }
    }
}

impl PixelBuffer for Raster {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixels(&self) -> &[u32] {
        &self.data
    }
}

impl MutablePixelBuffer for Raster {
    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }
}
