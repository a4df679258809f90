//! 32-bit ARGB colors.
//!
//! Rasters store pixels as packed `0xAARRGGBB` words; [`Color`] is the
//! unpacked form used by the drawing API. It implements
//! [`PixelColor`](embedded_graphics_core::pixelcolor::PixelColor) so it can be
//! handed straight to embedded-graphics primitives and text styles.

use embedded_graphics_core::pixelcolor::{raw::RawU32, PixelColor};

/// Fractional part of the golden ratio. Stepping hue by this amount gives
/// well-spread hues without knowing how many will be requested.
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_75;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const PINK: Color = Color::rgb(255, 175, 175);

    /// Opaque color from red, green and blue.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xAARRGGBB` word.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` word.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Convert hue/saturation/brightness (each in `0.0..=1.0`) to an opaque
    /// color. Only the fractional part of `hue` is used, so any real value
    /// maps onto the color wheel.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let channel = |v: f32| (v * 255.0 + 0.5) as u8;

        if saturation == 0.0 {
            let v = channel(brightness);
            return Self::rgb(v, v, v);
        }

        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::rgb(channel(r), channel(g), channel(b))
    }
}

impl PixelColor for Color {
    type Raw = RawU32;
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

/// A new, visually distinct color for each `index`.
///
/// Hue advances by [`GOLDEN_RATIO_CONJUGATE`] per index (mod 1.0), brightness is
/// full and `saturation` is taken as given. The same index always yields the
/// same color.
pub fn distinct_color(index: u32, saturation: f64) -> Color {
    let hue = (f64::from(index) * GOLDEN_RATIO_CONJUGATE).fract();
    Color::from_hsb(hue as f32, saturation as f32, 1.0)
}
