//! Immediate-mode drawing into the active buffer.
//!
//! Points, one-pixel lines, rectangles and text go through embedded-graphics
//! and have hard edges. Circles, polygons and float lines are rasterized by
//! tiny-skia with anti-aliasing: the path is rendered into a coverage mask
//! the size of its visible part, and each covered pixel is composited with
//! the draw color weighted by its coverage.
//!
//! Shape coordinates name pixel corners, so pixel `(x, y)` spans
//! `x..x + 1` horizontally. Float lines are shifted half a pixel so that
//! integer end points land on pixel centres, as they do for [`Canvas::line`].

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use image::{imageops, RgbaImage};
use minvio_common::{Color, Rect};
use minvio_pixelbuffer::{MutablePixelBuffer, PixelBuffer, Raster};
use tiny_skia::{FillRule, LineCap, Mask, PathBuilder, Stroke};

use crate::font::{Font, TextMetrics};

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// `color` with its alpha scaled by an 8-bit coverage value.
fn with_coverage(color: Color, coverage: u8) -> Color {
    let alpha = (u32::from(color.a) * u32::from(coverage) + 127) / 255;
    color.with_alpha(alpha as u8)
}

fn circle_path(cx: f64, cy: f64, radius: f64) -> Option<tiny_skia::Path> {
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }
    PathBuilder::from_circle(cx as f32, cy as f32, radius as f32)
}

/// Color and font shared by every drawing call, whichever buffer is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    pub color: Color,
    pub font: Font,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font: Font::default(),
        }
    }
}

/// Drawing handle over one buffer.
///
/// Shapes that fall partly or wholly outside the buffer are clipped.
/// Translucent colors are composited over what is already there.
pub struct Canvas<'a> {
    target: &'a mut Raster,
    state: &'a mut DrawState,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut Raster, state: &'a mut DrawState) -> Self {
        Self { target, state }
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Set the draw color, returning the previous one.
    pub fn set_color(&mut self, color: Color) -> Color {
        std::mem::replace(&mut self.state.color, color)
    }

    pub fn color(&self) -> Color {
        self.state.color
    }

    /// Set the text face, returning the previous one.
    pub fn set_font(&mut self, font: Font) -> Font {
        std::mem::replace(&mut self.state.font, font)
    }

    pub fn font(&self) -> Font {
        self.state.font
    }

    /// Fill the whole buffer with `color`. The draw color is left unchanged.
    pub fn clear(&mut self, color: Color) {
        let previous = self.set_color(color);
        self.fill_rect(0, 0, self.width() as i32, self.height() as i32);
        self.set_color(previous);
    }

    pub fn point(&mut self, x: i32, y: i32) {
        self.target.blend_pixel(x, y, self.state.color);
    }

    /// One-pixel line including both end points.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if (x1, y1) == (x2, y2) {
            self.point(x1, y1);
            return;
        }
        let style = PrimitiveStyle::with_stroke(self.state.color, 1);
        infallible(
            Line::new(Point::new(x1, y1), Point::new(x2, y2))
                .into_styled(style)
                .draw(self.target),
        );
    }

    /// Anti-aliased line with fractional end points and a stroke
    /// `thickness` in pixels, which applies to this call only. Ends are
    /// squared off half a thickness past each end point. A non-positive
    /// thickness draws nothing.
    pub fn line_f(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) {
        if thickness.is_nan() || thickness <= 0.0 {
            return;
        }
        let width = thickness as f32;
        let (x1, y1) = (x1 as f32 + 0.5, y1 as f32 + 0.5);
        let (x2, y2) = (x2 as f32 + 0.5, y2 as f32 + 0.5);

        if (x1, y1) == (x2, y2) {
            let half = width / 2.0;
            if let Some(dot) = tiny_skia::Rect::from_xywh(x1 - half, y1 - half, width, width) {
                self.fill_path(&PathBuilder::from_rect(dot), FillRule::Winding);
            }
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        let stroke = Stroke {
            width,
            line_cap: LineCap::Square,
            ..Stroke::default()
        };
        if let Some(outline) = pb.finish().and_then(|path| path.stroke(&stroke, 1.0)) {
            self.fill_path(&outline, FillRule::Winding);
        }
    }

    /// Fill the `width`×`height` rectangle whose top-left corner is `(x, y)`.
    /// Non-positive sizes draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let area = Rectangle::new(Point::new(x, y), Size::new(width as u32, height as u32));
        infallible(self.target.fill_solid(&area, self.state.color));
    }

    /// Outline of the rectangle with corners `(x1, y1)` and `(x2, y2)`,
    /// both inclusive.
    pub fn rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.line(x1, y1, x2, y1);
        self.line(x2, y1, x2, y2);
        self.line(x2, y2, x1, y2);
        self.line(x1, y2, x1, y1);
    }

    /// Anti-aliased disc centered on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        if let Some(path) = circle_path(cx, cy, radius) {
            self.fill_path(&path, FillRule::Winding);
        }
    }

    /// Anti-aliased one-pixel ring centered on the circle of `radius` around
    /// `(cx, cy)`.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        let ring = circle_path(cx, cy, radius).and_then(|path| path.stroke(&stroke, 1.0));
        if let Some(ring) = ring {
            self.fill_path(&ring, FillRule::Winding);
        }
    }

    /// Fill the polygon with vertices `(xs[i], ys[i])` using the even-odd
    /// rule, anti-aliased. Fewer than three vertices draw nothing.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `ys` differ in length.
    pub fn fill_polygon(&mut self, xs: &[i32], ys: &[i32]) {
        assert_eq!(
            xs.len(),
            ys.len(),
            "polygon has {} x coordinates but {} y coordinates",
            xs.len(),
            ys.len()
        );
        if xs.len() < 3 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(xs[0] as f32, ys[0] as f32);
        for (&x, &y) in xs.iter().zip(ys).skip(1) {
            pb.line_to(x as f32, y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill_path(&path, FillRule::EvenOdd);
        }
    }

    /// Composite the draw color over everything `path` covers. Only the part
    /// of the path inside the buffer is rasterized.
    fn fill_path(&mut self, path: &tiny_skia::Path, rule: FillRule) {
        let bounds = path.bounds();
        let x0 = bounds.left().floor().max(0.0) as i32;
        let y0 = bounds.top().floor().max(0.0) as i32;
        let x1 = bounds.right().ceil().min(self.width() as f32) as i32;
        let y1 = bounds.bottom().ceil().min(self.height() as f32) as i32;
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (span_w, span_h) = ((x1 - x0) as u32, (y1 - y0) as u32);
        let Some(mut mask) = Mask::new(span_w, span_h) else {
            return;
        };
        let to_mask = tiny_skia::Transform::from_translate(-(x0 as f32), -(y0 as f32));
        mask.fill_path(path, rule, true, to_mask);

        let color = self.state.color;
        for (row, coverage) in mask.data().chunks_exact(span_w as usize).enumerate() {
            let y = y0 + row as i32;
            for (col, &c) in coverage.iter().enumerate() {
                if c != 0 {
                    self.target.blend_pixel(x0 + col as i32, y, with_coverage(color, c));
                }
            }
        }
    }

    /// Draw `text` with its baseline at `y` and its left edge at `x`.
    pub fn text(&mut self, text: &str, x: i32, y: i32) {
        let style = MonoTextStyle::new(self.state.font.face(), self.state.color);
        infallible(
            Text::with_baseline(text, Point::new(x, y), style, Baseline::Alphabetic)
                .draw(self.target),
        );
    }

    /// Size of `text` in the current font.
    pub fn text_metrics(&self, text: &str) -> TextMetrics {
        self.state.font.metrics(text)
    }

    /// Composite `image` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let dest = Rect::new(x, y, image.width(), image.height());
        let Some(visible) = self.target.bounds().intersect(&dest) else {
            return;
        };
        for dy in visible.y..visible.bottom() {
            for dx in visible.x..visible.right() {
                let [r, g, b, a] = image.get_pixel((dx - x) as u32, (dy - y) as u32).0;
                self.target.blend_pixel(dx, dy, Color::rgba(r, g, b, a));
            }
        }
    }

    /// Composite `image` stretched to `width`×`height` (nearest neighbour)
    /// with its top-left corner at `(x, y)`.
    pub fn blit_scaled(&mut self, image: &RgbaImage, x: i32, y: i32, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if image.dimensions() == (width, height) {
            self.blit(image, x, y);
            return;
        }
        let scaled = imageops::resize(image, width, height, imageops::FilterType::Nearest);
        self.blit(&scaled, x, y);
    }

    /// Color of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        self.target.color_at(x, y)
    }

    /// Packed `0xAARRGGBB` value of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the buffer.
    pub fn rgb_at(&self, x: i32, y: i32) -> u32 {
        self.target.pixel(x, y)
    }
}
