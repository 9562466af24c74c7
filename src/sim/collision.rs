//! Axis-aligned rectangle collision
//!
//! Everything that can collide exposes its bounds through [`Bounds`]; overlap
//! is a strict half-open interval test, so rectangles that only touch along
//! an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}

/// Anything with an axis-aligned bounding box
pub trait Bounds {
    fn bounds(&self) -> Rect;

    /// Strict overlap with another collidable
    fn overlaps(&self, other: &impl Bounds) -> bool
    where
        Self: Sized,
    {
        rectangles_overlap(&self.bounds(), &other.bounds())
    }
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// True iff `[x, x + width)` and `[y, y + height)` intersect on both axes
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), w, h)
    }

    #[test]
    fn test_overlap_inside() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(10.0, 10.0, 5.0, 5.0);
        assert!(rectangles_overlap(&outer, &inner));
        assert!(rectangles_overlap(&inner, &outer));
    }

    #[test]
    fn test_overlap_partial() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(9.5, 9.5, 10.0, 10.0);
        assert!(rectangles_overlap(&a, &b));
    }

    #[test]
    fn test_edge_adjacent_does_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // Touching on the right edge
        assert!(!rectangles_overlap(&a, &rect(10.0, 0.0, 10.0, 10.0)));
        // Touching on the bottom edge
        assert!(!rectangles_overlap(&a, &rect(0.0, 10.0, 10.0, 10.0)));
        // Touching only at a corner
        assert!(!rectangles_overlap(&a, &rect(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        // x overlaps, y does not
        assert!(!rectangles_overlap(&a, &rect(5.0, 20.0, 10.0, 10.0)));
        // y overlaps, x does not
        assert!(!rectangles_overlap(&a, &rect(-30.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_bounds_overlaps_uses_strict_test() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 1.0, 1.0)));
        assert!(!a.overlaps(&rect(0.0, -10.0, 10.0, 10.0)));
    }

    fn any_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in any_rect(), b in any_rect()) {
            prop_assert_eq!(rectangles_overlap(&a, &b), rectangles_overlap(&b, &a));
        }

        #[test]
        fn prop_right_neighbour_never_overlaps(a in any_rect(), w in 0.0f32..200.0, dy in -50.0f32..50.0) {
            let b = Rect::new(Vec2::new(a.right(), a.pos.y + dy), w, a.height);
            prop_assert!(!rectangles_overlap(&a, &b));
        }
    }
}
