//! Error types for the simulation engine.
//!
//! Only ingestion and configuration can fail; the per-step kernel is total
//! and never reports an error.

use particle_physics::Color;
use std::fmt;

use crate::buffer::MAX_PARTICLES;

/// Errors surfaced synchronously to ingestion/configuration callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// More particles than the buffer capacity.
    TooManyParticles { requested: usize },
    /// Color count outside `[1, Color::COUNT]`.
    InvalidColorCount { requested: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::TooManyParticles { requested } => write!(
                f,
                "particle count must be less than or equal to {MAX_PARTICLES}, got {requested}"
            ),
            SimulationError::InvalidColorCount { requested } => write!(
                f,
                "color count must be in range [1, {}], got {requested}",
                Color::COUNT
            ),
        }
    }
}

impl std::error::Error for SimulationError {}
