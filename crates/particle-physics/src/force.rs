//! Force shaping functions
//!
//! A force function maps a normalized separation (`distance / rmax`, in
//! [0, 1]) and a signed attraction coefficient to a force magnitude. All
//! variants share the same shape requirements: strongly repulsive near zero
//! regardless of coefficient, a middle band whose sign and magnitude follow
//! the coefficient, and exactly zero at the cutoff and beyond. The curves
//! differ only in the profile of the attraction band.

use std::f32::consts::PI;
use std::fmt;

/// Fraction of the cutoff radius occupied by the unconditional repulsive
/// core. Below this separation the force is `d/BETA - 1`, independent of the
/// attraction coefficient.
pub const BETA: f32 = 0.3;

/// Ramp width of the [`ForceFunction::Force3`] trapezoid profile.
const PLATEAU_RAMP: f32 = 0.15;

/// Force shaping curve applied to every interacting particle pair.
///
/// Pure and stateless. `magnitude` is continuous in the distance, `-1` at
/// zero separation, linear in the coefficient over the attraction band, and
/// zero from the cutoff outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceFunction {
    /// Piecewise-linear tent peaking midway through the attraction band.
    Force1,
    /// Half-sine attraction profile; smooth at both band edges.
    #[default]
    Force2,
    /// Trapezoid: short ramps at both band edges, flat plateau between.
    Force3,
}

impl ForceFunction {
    /// Every shipped curve.
    pub const ALL: [ForceFunction; 3] = [
        ForceFunction::Force1,
        ForceFunction::Force2,
        ForceFunction::Force3,
    ];

    /// Force magnitude for a normalized distance and attraction coefficient.
    ///
    /// Negative values push the pair apart, positive pull together.
    #[inline]
    pub fn magnitude(self, normalized_distance: f32, coefficient: f32) -> f32 {
        let d = normalized_distance;
        if d < BETA {
            // Repulsive core, coefficient-independent: -1 at contact,
            // rising linearly to 0 at the band edge.
            return d / BETA - 1.0;
        }
        if d >= 1.0 {
            return 0.0;
        }
        let band = (d - BETA) / (1.0 - BETA);
        match self {
            ForceFunction::Force1 => coefficient * (1.0 - (2.0 * band - 1.0).abs()),
            ForceFunction::Force2 => coefficient * (PI * band).sin(),
            ForceFunction::Force3 => {
                coefficient * ((d - BETA) / PLATEAU_RAMP).min((1.0 - d) / PLATEAU_RAMP).min(1.0)
            }
        }
    }
}

impl fmt::Display for ForceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForceFunction::Force1 => "force1",
            ForceFunction::Force2 => "force2",
            ForceFunction::Force3 => "force3",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_cutoff_and_beyond() {
        for ff in ForceFunction::ALL {
            for coeff in [-1.0, -0.5, 0.0, 0.5, 1.0] {
                assert_eq!(ff.magnitude(1.0, coeff), 0.0, "{ff} at cutoff");
                assert_eq!(ff.magnitude(1.5, coeff), 0.0, "{ff} beyond cutoff");
            }
        }
    }

    #[test]
    fn test_repulsive_core_ignores_coefficient() {
        for ff in ForceFunction::ALL {
            assert_eq!(ff.magnitude(0.0, 1.0), -1.0, "{ff}");
            assert_eq!(ff.magnitude(0.0, -1.0), -1.0, "{ff}");
            for coeff in [-1.0, 0.0, 1.0] {
                assert!(ff.magnitude(BETA * 0.5, coeff) < 0.0, "{ff}");
            }
        }
    }

    #[test]
    fn test_sign_matches_coefficient_in_band() {
        let mid = (BETA + 1.0) / 2.0;
        for ff in ForceFunction::ALL {
            assert!(ff.magnitude(mid, 0.8) > 0.0, "{ff} attraction");
            assert!(ff.magnitude(mid, -0.8) < 0.0, "{ff} repulsion");
            assert_eq!(ff.magnitude(mid, 0.0), 0.0, "{ff} neutral");
        }
    }

    #[test]
    fn test_linear_in_coefficient() {
        let mid = (BETA + 1.0) / 2.0;
        for ff in ForceFunction::ALL {
            let unit = ff.magnitude(mid, 1.0);
            for coeff in [-1.0f32, -0.3, 0.4, 0.9] {
                let f = ff.magnitude(mid, coeff);
                assert!((f - unit * coeff).abs() < 1e-6, "{ff} at {coeff}");
            }
        }
    }

    #[test]
    fn test_continuous_in_distance() {
        let eps = 1e-4;
        for ff in ForceFunction::ALL {
            for coeff in [-1.0, 0.7] {
                let mut d = 0.0;
                while d < 1.2 {
                    let a = ff.magnitude(d, coeff);
                    let b = ff.magnitude(d + eps, coeff);
                    assert!(
                        (a - b).abs() < 0.05,
                        "{ff} jumps at d={d}: {a} vs {b}"
                    );
                    d += eps * 7.0;
                }
            }
        }
    }
}
