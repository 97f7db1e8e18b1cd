//! # Particle Physics
//!
//! Pure math and data types for the particle-life simulation: the particle
//! itself, the color palette, toroidal geometry, the attraction matrix, and
//! the pluggable distance/force shaping functions.

pub mod attraction;
pub mod color;
pub mod distance;
pub mod force;
pub mod particle;
pub mod torus;

pub use attraction::*;
pub use color::*;
pub use distance::*;
pub use force::*;
pub use particle::*;
pub use torus::*;
