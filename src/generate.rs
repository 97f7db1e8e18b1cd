//! Particle placement generators
//!
//! Initial layouts for (re)populating the simulation. These are simple
//! randomized collaborators of the engine's ingestion API; none of them
//! carry algorithmic weight.

use glam::Vec2;
use particle_physics::{Color, Particle};
use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::PI;

/// Initial particle arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Uniform over the whole torus.
    #[default]
    Uniform,
    /// Uniform over a random disc.
    Circle,
    /// Uniform over the unit disc.
    UnitCircle,
    /// Vertical stripe per color.
    Partition,
    /// Ring with one angular sector per color.
    RainbowRing,
    /// Row-major square grid from the top-left.
    Grid,
    /// Uniform positions, deliberately skewed color histogram.
    Imbalance,
}

/// Generate `count` particles over the first `color_count` colors.
///
/// Colors beyond `color_count` are never emitted. Pass a seeded rng for
/// reproducible layouts.
pub fn generate(layout: Layout, count: usize, color_count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    let color_count = color_count.clamp(1, Color::COUNT);
    let palette = shuffled_palette(color_count, rng);
    let color_of = |i: usize| palette[i % color_count];

    match layout {
        Layout::Uniform => (0..count)
            .map(|i| Particle::new(color_of(i), random_position(rng)))
            .collect(),
        Layout::Circle => {
            let radius = rng.random_range(0.1..0.8);
            (0..count)
                .map(|i| Particle::new(color_of(i), disc_position(radius, rng)))
                .collect()
        }
        Layout::UnitCircle => (0..count)
            .map(|i| Particle::new(color_of(i), disc_position(1.0, rng)))
            .collect(),
        Layout::Partition => {
            let stripe = 2.0 / color_count as f32;
            (0..count)
                .map(|i| {
                    let c = i % color_count;
                    let x = -1.0 + stripe * c as f32 + rng.random_range(0.0..stripe);
                    let y = rng.random_range(-1.0..1.0);
                    Particle::new(color_of(i), Vec2::new(x, y))
                })
                .collect()
        }
        Layout::RainbowRing => {
            let sector = 2.0 * PI / color_count as f32;
            let r0 = rng.random_range(0.2..0.6);
            let width = rng.random_range(0.05..0.3);
            (0..count)
                .map(|i| {
                    let c = i % color_count;
                    let r = rng.random_range(r0..r0 + width);
                    let theta = rng.random_range(sector * c as f32..sector * (c + 1) as f32);
                    Particle::new(color_of(i), Vec2::new(r * theta.cos(), r * theta.sin()))
                })
                .collect()
        }
        Layout::Grid => {
            let rows = (count as f32).sqrt().ceil() as usize;
            let gap = 2.0 / rows.max(1) as f32;
            (0..count)
                .map(|i| {
                    let (row, col) = (i / rows, i % rows);
                    let x = col as f32 * gap + gap / 2.0 - 1.0;
                    let y = (rows - row - 1) as f32 * gap + gap / 2.0 - 1.0;
                    Particle::new(color_of(i), Vec2::new(x, y))
                })
                .collect()
        }
        Layout::Imbalance => {
            // Draw a random bit pattern and keep the index of its highest
            // set bit: color k appears about 2^k times as often as color 0.
            let patterns = (1usize << color_count) - 1;
            (0..count)
                .map(|_| {
                    let bits = rng.random_range(1..=patterns);
                    let color = palette[bits.ilog2() as usize];
                    Particle::new(color, random_position(rng))
                })
                .collect()
        }
    }
}

fn random_position(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
}

/// Rejection-sample a point uniformly inside a disc of `radius` around the
/// origin. Half-open ranges keep `radius = 1.0` inside the domain.
fn disc_position(radius: f32, rng: &mut impl Rng) -> Vec2 {
    loop {
        let p = Vec2::new(
            rng.random_range(-radius..radius),
            rng.random_range(-radius..radius),
        );
        if p.length_squared() <= radius * radius {
            return p;
        }
    }
}

/// Random assignment of palette entries to the active color slots.
fn shuffled_palette(color_count: usize, rng: &mut impl Rng) -> Vec<Color> {
    let mut palette: Vec<Color> = Color::ALL[..color_count].to_vec();
    palette.shuffle(rng);
    palette
}
