//! Rotating multi-slot particle buffer
//!
//! The only mutable particle state in the engine. `SLOT_COUNT` fixed-capacity
//! slots rotate through the roles "current" (stable, safe to read) and "next"
//! (being overwritten by the in-flight step). Each slot carries its own
//! read/write token, so the stepping thread and any number of readers
//! interleave freely: a reader holds the current slot's token for the
//! duration of its read, the writer holds the next slot's token for the
//! duration of the step, and the rotation only advances after the step's
//! output is fully committed. The writer can therefore stall only on a
//! reader still holding a slot from a full rotation ago.

use crate::error::SimulationError;
use crate::params::VelocityUpdateSetting;
use crate::statistics::Statistics;
use crate::step;
use bytemuck::Zeroable;
use glam::Vec2;
use parking_lot::RwLock;
use particle_physics::{torus, AttractionMatrix, Color, Particle};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hard particle-count ceiling per slot.
pub const MAX_PARTICLES: usize = 65536;

/// Slots in the rotation. Three lets the writer and one reader proceed
/// fully concurrently in the common case.
pub const SLOT_COUNT: usize = 3;

/// Component selector for the diagnostic injection hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectTarget {
    PositionX,
    PositionY,
    VelocityX,
    VelocityY,
}

/// Ring of particle slots plus the active color count.
///
/// Ingestion operations (`set_particles`, `add_particle`, `remove_nearest`,
/// `inject`) mutate the current slot in place and must not race an in-flight
/// step; callers pause the scheduler first. The slot tokens keep a violation
/// of that contract memory-safe, but the interleaving is unspecified.
pub struct ParticleBuffer {
    slots: [RwLock<Vec<Particle>>; SLOT_COUNT],
    current: AtomicUsize,
    color_count: AtomicUsize,
}

impl ParticleBuffer {
    /// Create the buffer with all slots zeroed and empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| RwLock::new(zeroed_slot())),
            current: AtomicUsize::new(0),
            color_count: AtomicUsize::new(Color::COUNT),
        }
    }

    /// Number of active particles.
    pub fn count(&self) -> usize {
        self.slots[self.current_index()].read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of colors in active use (`1..=Color::COUNT`).
    pub fn color_count(&self) -> usize {
        self.color_count.load(Ordering::Relaxed)
    }

    /// Replace the entire particle population.
    ///
    /// Rejects capacity and color-count violations up front; on error
    /// nothing is mutated. Must not be called while a step is in flight.
    pub fn set_particles(
        &self,
        particles: &[Particle],
        color_count: usize,
    ) -> Result<(), SimulationError> {
        if particles.len() > MAX_PARTICLES {
            return Err(SimulationError::TooManyParticles {
                requested: particles.len(),
            });
        }
        if !(1..=Color::COUNT).contains(&color_count) {
            return Err(SimulationError::InvalidColorCount {
                requested: color_count,
            });
        }
        let mut slot = self.slots[self.current_index()].write();
        slot.clear();
        slot.extend_from_slice(particles);
        self.color_count.store(color_count, Ordering::Relaxed);
        log::info!(
            "particle buffer reset: {} particles, {} colors",
            particles.len(),
            color_count
        );
        Ok(())
    }

    /// Append one particle, silently dropping it at capacity. Pause-only,
    /// like `set_particles`.
    pub fn add_particle(&self, particle: Particle) {
        let mut slot = self.slots[self.current_index()].write();
        if slot.len() < MAX_PARTICLES {
            slot.push(particle);
        } else {
            log::debug!("particle buffer full, dropping particle");
        }
    }

    /// Remove the particle nearest to `center` within `radius` (torus
    /// metric), if any. Swap-removes, so ordering is not preserved.
    pub fn remove_nearest(&self, center: Vec2, radius: f32) -> bool {
        let mut slot = self.slots[self.current_index()].write();
        let mut nearest: Option<usize> = None;
        let mut nearest_distance = radius;
        for (i, particle) in slot.iter().enumerate() {
            let distance = torus::wrapped_distance(particle.position(), center);
            if distance < nearest_distance {
                nearest = Some(i);
                nearest_distance = distance;
            }
        }
        match nearest {
            Some(i) => {
                slot.swap_remove(i);
                true
            }
            None => false,
        }
    }

    /// Run one simulation step: read the current slot, overwrite the next
    /// slot, then advance the rotation so the new state becomes visible.
    pub fn step_once(
        &self,
        matrix: &AttractionMatrix,
        settings: &VelocityUpdateSetting,
        dt: f32,
    ) {
        let current = self.current_index();
        let next = (current + 1) % SLOT_COUNT;
        // Next slot's token first: blocks while a reader from a full
        // rotation ago still holds it.
        let mut next_slot = self.slots[next].write();
        let current_slot = self.slots[current].read();
        step::step(&current_slot, &mut next_slot, matrix, settings, dt);
        drop(current_slot);
        drop(next_slot);
        self.advance();
    }

    /// Rotate the current-slot index. Only meaningful after the next slot
    /// has been fully written; `step_once` does this automatically.
    pub fn advance(&self) {
        let next = (self.current_index() + 1) % SLOT_COUNT;
        self.current.store(next, Ordering::Release);
    }

    /// Read the stable slot, holding its token exactly for the duration of
    /// `f`. Readers never observe a partially written slot.
    pub fn with_current<R>(&self, f: impl FnOnce(&[Particle]) -> R) -> R {
        let slot = self.slots[self.current_index()].read();
        f(&slot)
    }

    /// Diagnostic scan of the current slot.
    pub fn statistics(&self) -> Statistics {
        self.with_current(Statistics::measure)
    }

    /// Test/QA hook: overwrite one component of one particle, typically with
    /// NaN or infinity to exercise the statistics path. Returns false if the
    /// index is out of range.
    pub fn inject(&self, index: usize, target: InjectTarget, value: f32) -> bool {
        let mut slot = self.slots[self.current_index()].write();
        let Some(particle) = slot.get_mut(index) else {
            return false;
        };
        match target {
            InjectTarget::PositionX => particle.position[0] = value,
            InjectTarget::PositionY => particle.position[1] = value,
            InjectTarget::VelocityX => particle.velocity[0] = value,
            InjectTarget::VelocityY => particle.velocity[1] = value,
        }
        true
    }

    fn current_index(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }
}

impl Default for ParticleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Full-capacity zeroed slot, truncated to empty. The backing storage never
/// reallocates afterwards.
fn zeroed_slot() -> Vec<Particle> {
    let mut slot = vec![Particle::zeroed(); MAX_PARTICLES];
    slot.clear();
    slot
}
