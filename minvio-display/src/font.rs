//! Text faces and metrics.
//!
//! Text is rendered with the fixed-width bitmap faces that ship with
//! embedded-graphics. A requested pixel size is matched to the face whose
//! glyph height is closest.

use std::fmt;

use embedded_graphics::mono_font::{ascii::*, MonoFont};

const REGULAR_FACES: [&MonoFont<'static>; 13] = [
    &FONT_4X6, &FONT_5X7, &FONT_5X8, &FONT_6X9, &FONT_6X10, &FONT_6X12, &FONT_6X13, &FONT_7X13,
    &FONT_8X13, &FONT_7X14, &FONT_9X15, &FONT_9X18, &FONT_10X20,
];

const BOLD_FACES: [&MonoFont<'static>; 6] = [
    &FONT_6X13_BOLD,
    &FONT_7X13_BOLD,
    &FONT_8X13_BOLD,
    &FONT_7X14_BOLD,
    &FONT_9X15_BOLD,
    &FONT_9X18_BOLD,
];

/// Pick the face whose glyph height is closest to `px`. Faces are ordered
/// by height, so ties go to the smaller one.
fn closest(faces: &[&'static MonoFont<'static>], px: u32) -> &'static MonoFont<'static> {
    let mut best = faces[0];
    for &face in &faces[1..] {
        if face.character_size.height.abs_diff(px) < best.character_size.height.abs_diff(px) {
            best = face;
        }
    }
    best
}

/// A text face.
#[derive(Clone, Copy)]
pub struct Font {
    face: &'static MonoFont<'static>,
    bold: bool,
}

impl Font {
    /// Regular face closest to `px` pixels tall.
    pub fn sized(px: u32) -> Self {
        Self {
            face: closest(&REGULAR_FACES, px),
            bold: false,
        }
    }

    /// Bold face closest to `px` pixels tall.
    pub fn bold(px: u32) -> Self {
        Self {
            face: closest(&BOLD_FACES, px),
            bold: true,
        }
    }

    pub fn face(&self) -> &'static MonoFont<'static> {
        self.face
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Glyph cell height in pixels.
    pub fn size(&self) -> u32 {
        self.face.character_size.height
    }

    /// Width, ascent and descent of `text` drawn in this face.
    pub fn metrics(&self, text: &str) -> TextMetrics {
        let chars = text.chars().count() as u32;
        let advance = self.face.character_size.width + self.face.character_spacing;
        let height = self.face.character_size.height;
        let ascent = self.face.baseline.min(height);
        TextMetrics {
            width: chars * advance,
            ascent,
            descent: height - ascent,
        }
    }
}

impl Default for Font {
    /// The 10×20 face, the largest available.
    fn default() -> Self {
        Self {
            face: &FONT_10X20,
            bold: false,
        }
    }
}

/// Faces within one style never share a cell size, so style and geometry
/// identify a face.
impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.bold == other.bold
            && self.face.character_size == other.face.character_size
            && self.face.character_spacing == other.face.character_spacing
            && self.face.baseline == other.face.baseline
    }
}

impl Eq for Font {}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.face.character_size;
        f.debug_struct("Font")
            .field("glyph", &format_args!("{}x{}", size.width, size.height))
            .field("bold", &self.bold)
            .finish()
    }
}

/// Measurements of a string in a given face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    /// Horizontal advance of the whole string.
    pub width: u32,
    /// Pixels above the baseline.
    pub ascent: u32,
    /// Pixels below the baseline.
    pub descent: u32,
}

impl TextMetrics {
    pub fn height(&self) -> u32 {
        self.ascent + self.descent
    }
}
