//! Pixel-space geometry for posture checks.
//!
//! The angle kernel reproduces the measurement the posture heuristics were
//! calibrated against: a signed sweep between two rays normalized into
//! `[0, 360)`, computed on truncated integer pixel coordinates. Keeping the
//! exact formula (and the truncating projection feeding it) is what keeps
//! the 150-degree back threshold meaningful.

use serde::Serialize;

use crate::landmark::Landmark;

/// A point in integer pixel coordinates of the source frame.
///
/// Serializes as the two-element array `[x, y]` consumed by report readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "[i32; 2]")]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<PixelPoint> for [i32; 2] {
    fn from(point: PixelPoint) -> Self {
        [point.x, point.y]
    }
}

/// Angle in degrees swept at vertex `b` from ray `b -> a` to ray `b -> c`.
///
/// Returns a value in `[0, 360)`. This is the directed sweep, not the
/// shortest interior angle, so the function is asymmetric in `a` and `c`:
/// swapping them yields the complementary reflex angle.
#[must_use]
pub fn angle_at_vertex(a: PixelPoint, b: PixelPoint, c: PixelPoint) -> f64 {
    let to_c = f64::from(c.y - b.y).atan2(f64::from(c.x - b.x));
    let to_a = f64::from(a.y - b.y).atan2(f64::from(a.x - b.x));
    let degrees = (to_c - to_a).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Maps a normalized landmark onto a `width` x `height` frame.
///
/// Coordinates are truncated toward zero, never rounded, so a landmark at
/// the right edge (`x` slightly below 1.0) lands on the last pixel column.
#[must_use]
pub fn project(landmark: &Landmark, width: i32, height: i32) -> PixelPoint {
    PixelPoint {
        x: (f64::from(landmark.x) * f64::from(width)) as i32,
        y: (f64::from(landmark.y) * f64::from(height)) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn perpendicular_rays_sweep_ninety_degrees() {
        let angle = angle_at_vertex(
            PixelPoint::new(10, 0),
            PixelPoint::new(0, 0),
            PixelPoint::new(0, 10),
        );
        assert!((angle - 90.0).abs() < EPSILON);
    }

    #[test]
    fn swapping_endpoints_gives_reflex_angle() {
        let a = PixelPoint::new(10, 0);
        let b = PixelPoint::new(0, 0);
        let c = PixelPoint::new(0, 10);
        let angle = angle_at_vertex(c, b, a);
        assert!((angle - 270.0).abs() < EPSILON);
    }

    #[test]
    fn collinear_opposite_rays_sweep_half_turn() {
        let angle = angle_at_vertex(
            PixelPoint::new(-5, 0),
            PixelPoint::new(0, 0),
            PixelPoint::new(5, 0),
        );
        assert!((angle - 180.0).abs() < EPSILON);
    }

    #[test]
    fn negative_sweep_wraps_positive() {
        // to_c = 0, to_a = 45: raw sweep is -45, normalized to 315.
        let angle = angle_at_vertex(
            PixelPoint::new(1, 1),
            PixelPoint::new(0, 0),
            PixelPoint::new(1, 0),
        );
        assert!((angle - 315.0).abs() < EPSILON);
    }

    #[test]
    fn coincident_rays_sweep_zero() {
        let a = PixelPoint::new(7, 3);
        let b = PixelPoint::new(1, 1);
        let angle = angle_at_vertex(a, b, a);
        assert!(angle.abs() < EPSILON);
    }

    #[test]
    fn projection_truncates_toward_zero() {
        let landmark = Landmark::new(0.999, 0.5, 1.0);
        let point = project(&landmark, 100, 100);
        assert_eq!(point, PixelPoint::new(99, 50));

        let landmark = Landmark::new(0.5, 0.5, 1.0);
        assert_eq!(project(&landmark, 99, 99), PixelPoint::new(49, 49));
    }

    #[test]
    fn projection_of_edges() {
        let origin = Landmark::new(0.0, 0.0, 1.0);
        assert_eq!(project(&origin, 640, 480), PixelPoint::new(0, 0));

        let corner = Landmark::new(1.0, 1.0, 1.0);
        assert_eq!(project(&corner, 640, 480), PixelPoint::new(640, 480));
    }

    #[test]
    fn pixel_point_serializes_as_array() {
        let json = serde_json::to_string(&PixelPoint::new(320, 240)).unwrap();
        assert_eq!(json, "[320,240]");
    }

    proptest! {
        #[test]
        fn angle_always_in_range(
            ax in -10_000i32..10_000, ay in -10_000i32..10_000,
            bx in -10_000i32..10_000, by in -10_000i32..10_000,
            cx in -10_000i32..10_000, cy in -10_000i32..10_000,
        ) {
            let angle = angle_at_vertex(
                PixelPoint::new(ax, ay),
                PixelPoint::new(bx, by),
                PixelPoint::new(cx, cy),
            );
            prop_assert!((0.0..360.0).contains(&angle));
        }

        #[test]
        fn sweeps_of_swapped_endpoints_complete_the_circle(
            ax in -1_000i32..1_000, ay in -1_000i32..1_000,
            cx in -1_000i32..1_000, cy in -1_000i32..1_000,
        ) {
            let a = PixelPoint::new(ax, ay);
            let b = PixelPoint::new(0, 0);
            let c = PixelPoint::new(cx, cy);
            let sum = angle_at_vertex(a, b, c) + angle_at_vertex(c, b, a);
            prop_assert!(sum.abs() < 1e-6 || (sum - 360.0).abs() < 1e-6);
        }
    }
}
