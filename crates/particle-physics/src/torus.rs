//! Toroidal domain geometry
//!
//! The world is a 2D torus: each axis spans `[-1, 1)` and wraps, so the
//! shortest path between two points may cross an edge.

use glam::Vec2;

/// Wrap a coordinate into `[-1, 1)`.
///
/// Idempotent; `wrap(1.0) == -1.0`. NaN and infinity pass through.
#[inline]
pub fn wrap(x: f32) -> f32 {
    x - ((x + 1.0) / 2.0).floor() * 2.0
}

/// Wrap both axes of a position into `[-1, 1)`.
#[inline]
pub fn wrap_vec(v: Vec2) -> Vec2 {
    Vec2::new(wrap(v.x), wrap(v.y))
}

/// Minimal-image displacement from `from` to `to`.
///
/// Each axis is wrapped independently to the representative in `[-1, 1)`,
/// which on a width-2 torus is the one with the smallest magnitude.
#[inline]
pub fn wrapped_displacement(from: Vec2, to: Vec2) -> Vec2 {
    wrap_vec(to - from)
}

/// Euclidean length of the minimal-image displacement between two points.
#[inline]
pub fn wrapped_distance(a: Vec2, b: Vec2) -> f32 {
    wrapped_displacement(a, b).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_reference_values() {
        let pairs: [(f32, f32); 9] = [
            (-5.0, -1.0),
            (-4.7, -0.7),
            (-3.5, 0.5),
            (-3.0, -1.0),
            (0.0, 0.0),
            (0.3, 0.3),
            (1.0, -1.0),
            (1.1, -0.9),
            (1.8, -0.2),
        ];
        for (input, expected) in pairs {
            assert!(
                (wrap(input) - expected).abs() < 1e-4,
                "wrap({input}) = {}, expected {expected}",
                wrap(input)
            );
        }
    }

    #[test]
    fn test_wrap_idempotent_and_in_range() {
        for i in -1000..1000 {
            let x = i as f32 * 0.0173;
            let w = wrap(x);
            assert!((-1.0..1.0).contains(&w), "wrap({x}) = {w} out of range");
            assert_eq!(wrap(w), w, "wrap not idempotent at {x}");
        }
    }

    #[test]
    fn test_displacement_antisymmetry() {
        let points = [
            Vec2::new(-0.9, 0.8),
            Vec2::new(0.3, -0.2),
            Vec2::new(0.99, 0.99),
            Vec2::new(-1.0, 0.0),
        ];
        for a in points {
            for b in points {
                let ab = wrapped_displacement(a, b);
                let ba = wrapped_displacement(b, a);
                // Antisymmetric modulo the torus period: at exactly half a
                // torus both directions pick the -1 representative, so the
                // sum is 0 or ±2.
                assert!(wrap(ab.x + ba.x).abs() < 1e-6, "x: {ab:?} vs {ba:?}");
                assert!(wrap(ab.y + ba.y).abs() < 1e-6, "y: {ab:?} vs {ba:?}");
            }
        }
    }

    #[test]
    fn test_displacement_takes_short_path() {
        // Crossing the seam: from 0.9 to -0.9 is 0.2 forward, not 1.8 back.
        let d = wrapped_displacement(Vec2::new(0.9, 0.0), Vec2::new(-0.9, 0.0));
        assert!((d.x - 0.2).abs() < 1e-6);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn test_wrapped_distance() {
        let a = Vec2::new(-0.95, 0.0);
        let b = Vec2::new(0.95, 0.0);
        assert!((wrapped_distance(a, b) - 0.1).abs() < 1e-6);
    }
}
