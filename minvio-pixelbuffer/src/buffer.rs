//! Pixel buffer traits.
//!
//! - [`PixelBuffer`]: read-only access to pixel data
//! - [`MutablePixelBuffer`]: read-write access with rendering operations
//!
//! Pixels are packed `0xAARRGGBB` words stored row-major with no padding, so
//! the pixel at `(x, y)` lives at index `y * width + x`.
//!
//! # Bounds
//!
//! Reads are strict: asking for a pixel outside the buffer is a programming
//! error and panics. Writes are clipped silently, because shapes routinely
//! hang off the edge of the screen.

use minvio_common::{Color, Rect};

/// Composite `src` over the packed pixel `dst` (straight alpha, source-over).
pub fn blend(dst: u32, src: Color) -> u32 {
    match src.a {
        255 => src.to_argb(),
        0 => dst,
        alpha => {
            let d = Color::from_argb(dst);
            let sa = u32::from(alpha);
            let ia = 255 - sa;
            let mix = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * ia + 127) / 255) as u8;
            let out_a = sa + (u32::from(d.a) * ia + 127) / 255;
            Color::rgba(mix(src.r, d.r), mix(src.g, d.g), mix(src.b, d.b), out_a as u8)
                .to_argb()
        }
    }
}

/// Read-only pixel buffer access.
pub trait PixelBuffer {
    /// Returns the dimensions of the pixel buffer as (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// All pixels, row-major.
    fn pixels(&self) -> &[u32];

    /// The rectangle covering the whole buffer.
    fn bounds(&self) -> Rect {
        let (width, height) = self.dimensions();
        Rect::new(0, 0, width, height)
    }

    /// Packed ARGB value of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    fn pixel(&self, x: i32, y: i32) -> u32 {
        let (width, height) = self.dimensions();
        assert!(
            self.bounds().contains_point(x, y),
            "pixel ({}, {}) out of bounds for {}x{} buffer",
            x,
            y,
            width,
            height
        );
        self.pixels()[y as usize * width as usize + x as usize]
    }

    /// The pixel at `(x, y)` as a [`Color`].
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    fn color_at(&self, x: i32, y: i32) -> Color {
        Color::from_argb(self.pixel(x, y))
    }
}

/// Read-write pixel buffer access.
pub trait MutablePixelBuffer: PixelBuffer {
    /// All pixels, row-major, mutably.
    fn pixels_mut(&mut self) -> &mut [u32];

    /// Replace the pixel at `(x, y)`. Writes outside the buffer are dropped.
    fn set_pixel(&mut self, x: i32, y: i32, argb: u32) {
        if !self.bounds().contains_point(x, y) {
            return;
        }
        let width = self.dimensions().0 as usize;
        self.pixels_mut()[y as usize * width + x as usize] = argb;
    }

    /// Composite `color` over the pixel at `(x, y)`. Writes outside the buffer
    /// are dropped.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.bounds().contains_point(x, y) {
            return;
        }
        let width = self.dimensions().0 as usize;
        let slot = &mut self.pixels_mut()[y as usize * width + x as usize];
        *slot = blend(*slot, color);
    }

    /// Composite `color` over a horizontal run of pixels, clipped to the buffer.
    fn blend_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        let (width, height) = self.dimensions();
        if y < 0 || y >= height as i32 {
            return;
        }
        let start = x0.max(0);
        let end = x1.min(width as i32);
        if start >= end {
            return;
        }
        let row = y as usize * width as usize;
        let argb = color.to_argb();
        for slot in &mut self.pixels_mut()[row + start as usize..row + end as usize] {
            *slot = if color.is_opaque() { argb } else { blend(*slot, color) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(0xFF00_00FF, Color::RED), 0xFFFF_0000);
        assert_eq!(blend(0xFF00_00FF, Color::TRANSPARENT), 0xFF00_00FF);
    }

    #[test]
    fn test_blend_half() {
        let out = Color::from_argb(blend(Color::BLACK.to_argb(), Color::WHITE.with_alpha(128)));
        assert_eq!(out.a, 255);
        assert!((127..=129).contains(&out.r));
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
    }
}
