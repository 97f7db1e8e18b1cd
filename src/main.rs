//! Particle Life
//!
//! Headless demo: emergent clustering from per-color-pair attraction.
//! Runs the simulation for a few seconds and reports throughput and
//! diagnostics; rendering is left to downstream consumers of the engine.

mod generate;

use generate::Layout;
use particle_physics::AttractionMatrix;
use particle_simulation::{Simulation, VelocityUpdateSetting};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const PARTICLE_COUNT: usize = 10_000;
const COLOR_COUNT: usize = 5;
const RUN_SECONDS: u64 = 5;

fn main() {
    env_logger::init();

    let sim = Simulation::new();
    sim.set_attraction_matrix(AttractionMatrix::chain(COLOR_COUNT));
    sim.set_velocity_update_setting(VelocityUpdateSetting::default());

    let mut rng = StdRng::seed_from_u64(20240816);
    let particles = generate::generate(Layout::Uniform, PARTICLE_COUNT, COLOR_COUNT, &mut rng);
    if let Err(err) = sim.set_particles(&particles, COLOR_COUNT) {
        log::error!("failed to seed particles: {err}");
        return;
    }

    log::info!("simulating {PARTICLE_COUNT} particles, {COLOR_COUNT} colors");
    sim.start();

    for second in 1..=RUN_SECONDS {
        std::thread::sleep(Duration::from_secs(1));
        let stats = sim.statistics();
        log::info!(
            "t={second}s: {:.0} updates/s, mean attractors {:.2} (expected {:.2}), NaN {} / Inf {}",
            sim.updates_per_second(),
            stats.mean_attractor_count,
            sim.expected_attractor_count(),
            stats.nan_count,
            stats.infinite_count,
        );
    }

    sim.pause();
    println!("{}", sim.dump_parameters());
    println!();
    println!("{}", sim.statistics());
}
