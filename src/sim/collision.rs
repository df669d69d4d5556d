//! Axis-aligned rectangle overlap
//!
//! Every collision in the game is a box-vs-box test. Callers test the moving
//! entity's prospective rectangle (position + pending velocity) against the
//! target's current rectangle, so a response can act before motion commits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Same rectangle moved by `offset`
    pub fn translated(self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Closed-interval overlap on both axes: touching edges count as a hit.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.right() >= b.x && a.x <= b.right() && a.bottom() >= b.y && a.y <= b.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_count() {
        let block = Rect::new(60.0, 20.0, 60.0, 20.0);

        // Ball's right edge exactly on the block's left edge
        assert!(intersects(&Rect::new(40.0, 25.0, 20.0, 20.0), &block));
        // Ball's top edge exactly on the block's bottom edge
        assert!(intersects(&Rect::new(70.0, 40.0, 20.0, 20.0), &block));
        // Corner to corner
        assert!(intersects(&Rect::new(120.0, 40.0, 20.0, 20.0), &block));
    }

    #[test]
    fn test_separated_rects_miss() {
        let block = Rect::new(60.0, 20.0, 60.0, 20.0);

        assert!(!intersects(&Rect::new(39.0, 25.0, 20.0, 20.0), &block));
        assert!(!intersects(&Rect::new(121.0, 25.0, 20.0, 20.0), &block));
        assert!(!intersects(&Rect::new(70.0, 41.0, 20.0, 20.0), &block));
        // Overlaps on x only
        assert!(!intersects(&Rect::new(70.0, 100.0, 20.0, 20.0), &block));
    }

    #[test]
    fn test_translated() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0).translated(Vec2::new(3.0, -3.0));
        assert_eq!(r, Rect::new(13.0, 7.0, 5.0, 5.0));
        assert_eq!(r.right(), 18.0);
        assert_eq!(r.bottom(), 12.0);
        assert_eq!(r.center_x(), 15.5);
    }
}
