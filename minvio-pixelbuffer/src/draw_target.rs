//! embedded-graphics integration.
//!
//! Implementing `DrawTarget` lets lines, rectangles and mono-font text from
//! embedded-graphics rasterize straight into a [`Raster`]. Pixels outside the
//! raster are clipped and translucent colors are composited.

use core::convert::Infallible;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    primitives::Rectangle,
    Pixel,
};
use minvio_common::{Color, Rect};

use crate::{MutablePixelBuffer, PixelBuffer, Raster};

impl DrawTarget for Raster {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.blend_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = Rect::new(
            area.top_left.x,
            area.top_left.y,
            area.size.width,
            area.size.height,
        );
        if let Some(visible) = self.bounds().intersect(&area) {
            for y in visible.y..visible.bottom() {
                self.blend_span(y, visible.x, visible.right(), color);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{Line, PrimitiveStyle},
    };

    #[test]
    fn test_line_is_clipped() {
        let mut raster = Raster::new(10, 10);
        Line::new(Point::new(-5, 5), Point::new(20, 5))
            .into_styled(PrimitiveStyle::with_stroke(Color::WHITE, 1))
            .draw(&mut raster)
            .unwrap();

        for x in 0..10 {
            assert_eq!(raster.color_at(x, 5), Color::WHITE);
        }
        assert_eq!(raster.pixel(5, 4), 0);
    }

    #[test]
    fn test_fill_solid_partially_offscreen() {
        let mut raster = Raster::new(10, 10);
        raster
            .fill_solid(
                &Rectangle::new(Point::new(-3, 8), Size::new(5, 5)),
                Color::GREEN,
            )
            .unwrap();

        assert_eq!(raster.color_at(0, 9), Color::GREEN);
        assert_eq!(raster.color_at(1, 8), Color::GREEN);
        assert_eq!(raster.pixel(2, 8), 0);
    }

    #[test]
    fn test_fill_solid_far_right_is_dropped() {
        let mut raster = Raster::new(10, 10);
        raster
            .fill_solid(
                &Rectangle::new(Point::new(i32::MAX - 5, 0), Size::new(10, 10)),
                Color::GREEN,
            )
            .unwrap();
        assert!(raster.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_clear_fills_everything() {
        let mut raster = Raster::new(3, 3);
        raster.clear(Color::CYAN).unwrap();
        assert!(raster.pixels().iter().all(|&p| p == Color::CYAN.to_argb()));
    }
}
