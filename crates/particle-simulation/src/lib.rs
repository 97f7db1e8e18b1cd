//! # Particle Simulation Engine
//!
//! Brute-force O(n²) particle-life update kernel, a rotating multi-slot
//! particle buffer, and a scheduler thread that steps the simulation
//! continuously and asynchronously from its readers.

pub mod buffer;
pub mod error;
pub mod params;
pub mod scheduler;
pub mod statistics;
pub mod step;

pub use buffer::*;
pub use error::*;
pub use params::*;
pub use scheduler::*;
pub use statistics::*;
pub use step::*;
