//! The per-tick update kernel
//!
//! Brute-force all-pairs force accumulation. Each particle's scan is
//! independent of every other's, so the velocity pass parallelizes across
//! particles; the position pass runs strictly after every velocity has been
//! committed so position integration never observes a half-updated step.

use crate::params::VelocityUpdateSetting;
use glam::Vec2;
use particle_physics::{torus, AttractionMatrix, Particle};
use rayon::prelude::*;

/// Advance every particle of `current` by one step of `dt` seconds, fully
/// overwriting `next`.
///
/// Total for all inputs: NaN/infinite particles produce defined output and
/// simply drop out of range for everyone else. `current` is a committed
/// snapshot; `next` must be a different slot.
pub fn step(
    current: &[Particle],
    next: &mut Vec<Particle>,
    matrix: &AttractionMatrix,
    settings: &VelocityUpdateSetting,
    dt: f32,
) {
    // Pass 1: velocities, one independent O(n) scan per particle.
    current
        .par_iter()
        .enumerate()
        .map(|(i, p)| integrate_velocity(i, *p, current, matrix, settings, dt))
        .collect_into_vec(next);

    // Pass 2: positions, only after all velocities are final.
    next.par_iter_mut().for_each(|p| {
        let position = torus::wrap_vec(p.position() + p.velocity() * dt);
        p.position = position.to_array();
    });
}

/// Accumulate the net force on one particle and integrate its velocity.
fn integrate_velocity(
    index: usize,
    mut particle: Particle,
    current: &[Particle],
    matrix: &AttractionMatrix,
    settings: &VelocityUpdateSetting,
    dt: f32,
) -> Particle {
    let position = particle.position();
    let target = particle.color as usize;
    let mut force = Vec2::ZERO;
    let mut attractors = 0u32;

    for (j, other) in current.iter().enumerate() {
        if j == index {
            continue;
        }
        let d = torus::wrapped_displacement(position, other.position());
        let dist = settings.distance_function.evaluate(d);
        // Inclusion form: a NaN distance fails the test and the neighbor is
        // treated as out of range, so degenerate particles stop influencing
        // others without any special casing.
        if !(dist > 0.0 && dist <= settings.rmax) {
            continue;
        }
        let len = d.length();
        if !(len > 0.0 && len.is_finite()) {
            continue;
        }
        let coeff = matrix.get_raw(target, other.color as usize);
        let magnitude =
            settings.force_function.magnitude(dist / settings.rmax, coeff) * settings.force_factor;
        force += d / len * magnitude;
        attractors += 1;
    }

    // Damping first, then the accumulated force as an instantaneous
    // acceleration over dt.
    let damping = 0.5f32.powf(dt / settings.velocity_half_life);
    let velocity = particle.velocity() * damping + force * dt;
    particle.velocity = velocity.to_array();
    particle.attractor_count = attractors;
    particle
}
