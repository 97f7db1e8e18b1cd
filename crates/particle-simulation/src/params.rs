//! Simulation parameters for runtime tuning

use particle_physics::{DistanceFunction, ForceFunction};
use std::fmt;

/// Upper clamp applied to the elapsed time of a single step. A stall (debug
/// pause, machine sleep) would otherwise integrate one huge unstable step.
pub const MAX_DT: f32 = 0.1;

/// Parameters of the velocity update, immutable for the duration of a step.
///
/// The scheduler snapshots this struct once at step entry, so a UI thread
/// replacing it mid-step can never tear a running scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityUpdateSetting {
    /// Force shaping curve.
    pub force_function: ForceFunction,
    /// Separation metric.
    pub distance_function: DistanceFunction,
    /// Cutoff radius; neighbors beyond it exert no force. Must be > 0.
    pub rmax: f32,
    /// Seconds for velocity magnitude to halve under damping alone. Must be > 0.
    pub velocity_half_life: f32,
    /// Global force multiplier. Must be >= 0.
    pub force_factor: f32,
}

impl Default for VelocityUpdateSetting {
    fn default() -> Self {
        Self {
            force_function: ForceFunction::default(),      // force2
            distance_function: DistanceFunction::default(), // l2
            rmax: 0.1,
            velocity_half_life: 0.1,
            force_factor: 1.0,
        }
    }
}

impl fmt::Display for VelocityUpdateSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "forceFunction: {}, distanceFunction: {}, rmax: {}, velocityHalfLife: {}, forceFactor: {}",
            self.force_function,
            self.distance_function,
            self.rmax,
            self.velocity_half_life,
            self.force_factor
        )
    }
}
