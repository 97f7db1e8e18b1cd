//! Correctness diagnostics over the stable buffer slot

use crate::params::VelocityUpdateSetting;
use particle_physics::{Color, Particle};
use std::fmt;

/// Read-only scan results over the current slot.
///
/// Purely diagnostic: NaN/infinite populations are an expected steady-state
/// possibility under extreme attraction, tracked here and never acted on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Active particle count.
    pub count: usize,
    /// Population per palette color.
    pub color_counts: [usize; Color::COUNT],
    /// Particles with at least one NaN component.
    pub nan_count: usize,
    /// Particles with at least one infinite component.
    pub infinite_count: usize,
    /// Mean of the per-particle attractor counts from the last step.
    pub mean_attractor_count: f32,
}

impl Statistics {
    /// Scan a particle slice. Never panics, including on non-finite data.
    pub fn measure(particles: &[Particle]) -> Self {
        let mut stats = Statistics {
            count: particles.len(),
            ..Default::default()
        };
        let mut attractor_total: u64 = 0;
        for particle in particles {
            if particle.has_nan() {
                stats.nan_count += 1;
            }
            if particle.has_infinite() {
                stats.infinite_count += 1;
            }
            if let Some(color) = particle.palette_color() {
                stats.color_counts[color.index()] += 1;
            }
            attractor_total += u64::from(particle.attractor_count);
        }
        if stats.count > 0 {
            stats.mean_attractor_count = attractor_total as f32 / stats.count as f32;
        }
        stats
    }
}

/// Analytic expectation of the mean attractor count for uniformly spread
/// particles: neighbors inside the cutoff contour, whose area is the unit
/// contour area scaled by rmax², over the domain area of 4.
pub fn expected_attractor_count(count: usize, settings: &VelocityUpdateSetting) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let contour_area = settings.distance_function.area_of_unit_contour() * settings.rmax * settings.rmax;
    (count - 1) as f32 * contour_area / 4.0
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "particleCount: {}", self.count)?;
        for color in Color::ALL {
            writeln!(f, "- {:?}: {}", color, self.color_counts[color.index()])?;
        }
        writeln!(f)?;
        writeln!(f, "NaN: {}", self.nan_count)?;
        writeln!(f, "Infinite: {}", self.infinite_count)?;
        write!(f, "meanAttractorCount: {:.2}", self.mean_attractor_count)
    }
}
