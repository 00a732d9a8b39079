//! Axis-aligned rectangle geometry
//!
//! Everything that occupies space in the world (terrain, actors, hit windows,
//! projectiles, pickups) is a `Rect` in world coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box with its origin at the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "rect extent must be positive: {w}x{h}");
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Open-interval overlap test.
    ///
    /// Rects that only share an edge do not intersect, so an actor resting
    /// exactly on a platform's top is not considered embedded in it.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }

    /// Finite origin and strictly positive, finite extent
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
            && self.w > 0.0
            && self.h > 0.0
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// True if `rect` overlaps any rect in `set`
pub fn overlaps_any(set: &[Rect], rect: &Rect) -> bool {
    set.iter().any(|r| r.intersects(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!right.intersects(&a));
        assert!(!a.intersects(&below));
        assert!(!below.intersects(&a));
    }

    #[test]
    fn test_overlap_and_containment() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(9.5, 9.5, 5.0, 5.0)));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        let flat = Rect { x: 0.0, y: 0.0, w: 5.0, h: 0.0 };
        assert!(!flat.is_well_formed());
        let nan = Rect { x: f32::NAN, y: 0.0, w: 5.0, h: 5.0 };
        assert!(!nan.is_well_formed());
    }

    #[test]
    fn test_overlaps_any() {
        let set = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 0.0, 10.0, 10.0)];
        assert!(overlaps_any(&set, &Rect::new(55.0, 5.0, 2.0, 2.0)));
        assert!(!overlaps_any(&set, &Rect::new(10.0, 0.0, 40.0, 10.0)));
        assert!(!overlaps_any(&[], &Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_flush_neighbour_never_intersects(
            x in -500.0f32..500.0, y in -500.0f32..500.0, w in 1.0f32..200.0, h in 1.0f32..200.0,
            dy in -100.0f32..100.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(a.right(), y + dy, 10.0, h);
            prop_assert!(!a.intersects(&b));
        }
    }
}
