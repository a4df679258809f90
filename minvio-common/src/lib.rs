//! Common types shared across the minvio crates.
//!
//! - [`Rect`] - Rectangle with position and dimensions, used for clipping
//! - [`Color`] - 32-bit ARGB color, plus [`distinct_color`] for palette generation

mod color;

pub use color::{distinct_color, Color, GOLDEN_RATIO_CONJUGATE};

/// A rectangle defined by top-left position and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge (x + width), saturating at `i32::MAX`.
    pub const fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Get the bottom edge (y + height), saturating at `i32::MAX`.
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Check if a point is contained within this rectangle.
    pub const fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1.abs_diff(x0), y1.abs_diff(y0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10, 20, 100, 50);
        assert!(r.contains_point(10, 20)); // top-left corner
        assert!(r.contains_point(109, 69)); // bottom-right minus 1
        assert!(!r.contains_point(9, 20));
        assert!(!r.contains_point(110, 69)); // right edge (exclusive)
        assert!(!r.contains_point(109, 70)); // bottom edge (exclusive)
    }

    #[test]
    fn test_intersect() {
        let screen = Rect::new(0, 0, 100, 100);
        assert_eq!(
            screen.intersect(&Rect::new(-10, 90, 30, 30)),
            Some(Rect::new(0, 90, 20, 10))
        );
        assert_eq!(screen.intersect(&Rect::new(100, 0, 5, 5)), None);
    }

    #[test]
    fn test_edges_near_i32_max() {
        let far = Rect::new(i32::MAX - 5, i32::MAX - 1, 10, u32::MAX);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MAX);
        assert!(far.contains_point(i32::MAX - 1, i32::MAX - 1));

        let screen = Rect::new(0, 0, 10, 10);
        assert_eq!(screen.intersect(&far), None);
        assert_eq!(far.intersect(&screen), None);
    }

    #[test]
    fn test_intersect_spanning_whole_range() {
        let huge = Rect::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX);
        assert_eq!(huge.intersect(&huge), Some(Rect::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX)));
        assert_eq!(
            huge.intersect(&Rect::new(-3, 4, 10, 10)),
            Some(Rect::new(-3, 4, 10, 10))
        );
    }
}
