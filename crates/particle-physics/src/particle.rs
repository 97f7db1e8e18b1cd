//! The simulated particle

use crate::color::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One simulated particle.
///
/// Plain-old-data so whole buffer slots can be zero-initialized and copied
/// wholesale. Positions live on the torus `[-1, 1)` per axis; velocities are
/// unbounded; extreme attraction can legitimately drive them toward NaN or
/// infinity, which statistics track and nothing prevents.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Particle {
    /// Palette index (valid for every live particle).
    pub color: u32,
    /// Position, each axis in [-1, 1).
    pub position: [f32; 2],
    /// Velocity, unbounded.
    pub velocity: [f32; 2],
    /// Number of neighbors that contributed force on the last step.
    /// Diagnostic only; never feeds back into the physics.
    pub attractor_count: u32,
}

impl Particle {
    /// Create a particle at rest.
    pub fn new(color: Color, position: Vec2) -> Self {
        Self::with_velocity(color, position, Vec2::ZERO)
    }

    /// Create a particle with an initial velocity.
    pub fn with_velocity(color: Color, position: Vec2, velocity: Vec2) -> Self {
        Self {
            color: color.index() as u32,
            position: position.to_array(),
            velocity: velocity.to_array(),
            attractor_count: 0,
        }
    }

    /// Palette color of this particle.
    pub fn palette_color(&self) -> Option<Color> {
        Color::from_index(self.color as usize)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    /// True if any position or velocity component is NaN.
    pub fn has_nan(&self) -> bool {
        self.position().is_nan() || self.velocity().is_nan()
    }

    /// True if any position or velocity component is infinite.
    pub fn has_infinite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).any(|c| c.is_infinite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_is_at_rest() {
        let p = Particle::new(Color::Blue, Vec2::new(0.25, -0.5));
        assert_eq!(p.palette_color(), Some(Color::Blue));
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.attractor_count, 0);
        assert!(!p.has_nan());
        assert!(!p.has_infinite());
    }

    #[test]
    fn test_non_finite_detection() {
        let mut p = Particle::new(Color::Red, Vec2::ZERO);
        p.position[0] = f32::NAN;
        assert!(p.has_nan());
        assert!(!p.has_infinite());

        let mut q = Particle::new(Color::Red, Vec2::ZERO);
        q.velocity[1] = f32::INFINITY;
        assert!(q.has_infinite());
        assert!(!q.has_nan());
    }
}
