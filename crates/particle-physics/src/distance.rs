//! Distance shaping functions
//!
//! A distance function turns a torus-adjusted displacement into an effective
//! separation. The unit ball does not have to be a circle: the p-norm
//! variants with p < 1 give star-shaped neighborhoods, the polygonal
//! variants polygonal ones. Each metric publishes the area enclosed by its
//! `evaluate == 1` contour, used only for expected-neighbor diagnostics.

use glam::Vec2;
use std::f32::consts::PI;
use std::fmt;

/// Separation metric applied to minimal-image displacements.
///
/// Pure and stateless; `evaluate` is continuous, even, zero at the zero
/// vector and positive elsewhere, and 1-homogeneous (scaling the
/// displacement scales the distance), so the cutoff test
/// `evaluate(d) <= rmax` carves out a scaled copy of the unit contour and
/// two particles always agree on whether they are in range of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceFunction {
    /// Manhattan distance; diamond contour.
    L1,
    /// Euclidean distance; circular contour.
    #[default]
    L2,
    /// Chebyshev distance; square contour.
    Linf,
    /// p-norm with p = 1/2; four-pointed star contour.
    L05,
    /// p-norm with p = 1/5; sharper four-pointed star.
    L02,
    /// Even gauge derived from a regular triangle; hexagonal contour.
    Triangular,
    /// Even gauge derived from a regular pentagon; decagonal contour.
    Pentagonal,
}

impl DistanceFunction {
    /// Every shipped metric.
    pub const ALL: [DistanceFunction; 7] = [
        DistanceFunction::L1,
        DistanceFunction::L2,
        DistanceFunction::Linf,
        DistanceFunction::L05,
        DistanceFunction::L02,
        DistanceFunction::Triangular,
        DistanceFunction::Pentagonal,
    ];

    /// Effective distance of a displacement.
    #[inline]
    pub fn evaluate(self, d: Vec2) -> f32 {
        let (x, y) = (d.x.abs(), d.y.abs());
        match self {
            DistanceFunction::L1 => x + y,
            DistanceFunction::L2 => d.length(),
            DistanceFunction::Linf => x.max(y),
            DistanceFunction::L05 => {
                let s = x.sqrt() + y.sqrt();
                s * s
            }
            DistanceFunction::L02 => {
                let s = x.powf(0.2) + y.powf(0.2);
                s * s * s * s * s
            }
            DistanceFunction::Triangular => polygon_gauge(d, 3),
            DistanceFunction::Pentagonal => polygon_gauge(d, 5),
        }
    }

    /// Area enclosed by the `evaluate == 1` contour.
    ///
    /// Analytic constants: 4·Γ(1+1/p)²/Γ(1+2/p) for the p-norms; the
    /// polygonal contours are regular 2n-gons with apothem cos(π/n).
    /// Diagnostics only.
    pub fn area_of_unit_contour(self) -> f32 {
        match self {
            DistanceFunction::L1 => 2.0,
            DistanceFunction::L2 => PI,
            DistanceFunction::Linf => 4.0,
            DistanceFunction::L05 => 2.0 / 3.0,
            DistanceFunction::L02 => 1.0 / 63.0,
            DistanceFunction::Triangular => symmetric_polygon_area(3),
            DistanceFunction::Pentagonal => symmetric_polygon_area(5),
        }
    }
}

impl fmt::Display for DistanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceFunction::L1 => "l1",
            DistanceFunction::L2 => "l2",
            DistanceFunction::Linf => "linf",
            DistanceFunction::L05 => "l05",
            DistanceFunction::L02 => "l02",
            DistanceFunction::Triangular => "triangular",
            DistanceFunction::Pentagonal => "pentagonal",
        };
        f.write_str(name)
    }
}

/// Even gauge derived from a regular `n`-gon with circumradius 1 and a
/// vertex pointing up: the larger of the directed gauges of `d` and `-d`.
/// The unit contour is the intersection of the polygon with its point
/// reflection, a regular `2n`-gon, so `polygon_gauge(d) == polygon_gauge(-d)`
/// and the cutoff test agrees for both members of a pair.
fn polygon_gauge(d: Vec2, n: u32) -> f32 {
    directed_gauge(d, n).max(directed_gauge(-d, n))
}

/// Factor by which the (asymmetric) polygon must be scaled to reach `d`.
fn directed_gauge(d: Vec2, n: u32) -> f32 {
    let r = d.length();
    if r == 0.0 {
        return 0.0;
    }
    let sector = 2.0 * PI / n as f32;
    let theta = d.y.atan2(d.x);
    // Boundary radius of the polygon in this direction.
    let boundary = (PI / n as f32).cos() / ((theta - PI / 2.0).rem_euclid(sector) - sector / 2.0).cos();
    r / boundary
}

/// Area of a regular `2n`-gon with apothem cos(π/n).
fn symmetric_polygon_area(n: u32) -> f32 {
    let apothem = (PI / n as f32).cos();
    2.0 * n as f32 * apothem * apothem * (PI / (2.0 * n as f32)).tan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_origin() {
        for metric in DistanceFunction::ALL {
            assert_eq!(metric.evaluate(Vec2::ZERO), 0.0, "{metric}");
        }
    }

    #[test]
    fn test_unit_contour_points() {
        // (1, 0) is on the unit contour of every p-norm variant.
        for metric in [
            DistanceFunction::L1,
            DistanceFunction::L2,
            DistanceFunction::Linf,
            DistanceFunction::L05,
            DistanceFunction::L02,
        ] {
            assert!((metric.evaluate(Vec2::X) - 1.0).abs() < 1e-5, "{metric}");
        }
        // p = 1/2 at the diagonal: (0.25, 0.25) has (0.5 + 0.5)^2 = 1.
        let d = DistanceFunction::L05.evaluate(Vec2::splat(0.25));
        assert!((d - 1.0).abs() < 1e-5);
        // Symmetrized polygon contours: the triangle's hexagonal contour has
        // a vertex on the x axis at apothem / cos(30 deg), the pentagon's
        // decagonal contour an edge midpoint on the y axis at the apothem.
        let hex_vertex = (PI / 3.0).cos() / (PI / 6.0).cos();
        assert!((DistanceFunction::Triangular.evaluate(Vec2::X * hex_vertex) - 1.0).abs() < 1e-5);
        assert!((DistanceFunction::Pentagonal.evaluate(Vec2::Y * (PI / 5.0).cos()) - 1.0).abs() < 1e-5);
        // Triangle mid-edge lies at the apothem, cos(60 deg) below the top.
        let apothem = (PI / 3.0).cos();
        let mid_edge = Vec2::new((150f32).to_radians().cos(), (150f32).to_radians().sin()) * apothem;
        assert!((DistanceFunction::Triangular.evaluate(mid_edge) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_even_in_the_displacement() {
        // An asymmetric metric would let one particle of a pair feel the
        // other while the reverse pair reads as out of range.
        let points = [
            Vec2::new(0.0, 1.0),
            Vec2::new(0.3, -0.7),
            Vec2::new(-0.8, 0.1),
            Vec2::new(0.5, 0.5),
        ];
        for metric in DistanceFunction::ALL {
            for v in points {
                let d = metric.evaluate(v);
                let e = metric.evaluate(-v);
                assert!((d - e).abs() < 1e-6, "{metric} not even at {v:?}: {d} vs {e}");
            }
        }
    }

    #[test]
    fn test_homogeneity() {
        let d = Vec2::new(0.3, -0.7);
        for metric in DistanceFunction::ALL {
            let base = metric.evaluate(d);
            for scale in [0.25f32, 0.5, 2.0] {
                let scaled = metric.evaluate(d * scale);
                assert!(
                    (scaled - base * scale).abs() < 1e-4 * scale.max(1.0),
                    "{metric} not homogeneous at scale {scale}"
                );
            }
        }
    }

    #[test]
    fn test_unit_contour_areas_match_numeric_integration() {
        // Integrate the indicator of evaluate < 1 over [-1.5, 1.5]^2.
        let steps = 600;
        let cell = 3.0 / steps as f32;
        for metric in DistanceFunction::ALL {
            let mut inside = 0u32;
            for i in 0..steps {
                for j in 0..steps {
                    let x = -1.5 + (i as f32 + 0.5) * cell;
                    let y = -1.5 + (j as f32 + 0.5) * cell;
                    if metric.evaluate(Vec2::new(x, y)) < 1.0 {
                        inside += 1;
                    }
                }
            }
            let measured = inside as f32 * cell * cell;
            let expected = metric.area_of_unit_contour();
            assert!(
                (measured - expected).abs() < 0.05,
                "{metric}: measured {measured}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_nan_propagates() {
        // A degenerate particle must never read as in-range. Linf's max()
        // drops a single NaN component, so test the fully degenerate vector;
        // the kernel's range checks exclude the single-NaN case separately.
        for metric in DistanceFunction::ALL {
            let d = metric.evaluate(Vec2::splat(f32::NAN));
            assert!(d.is_nan(), "{metric} should propagate NaN");
        }
    }
}
