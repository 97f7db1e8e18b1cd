//! Simulation scheduler
//!
//! Drives the step kernel continuously on a dedicated worker thread,
//! decoupled from any render or display clock. Consumers read the stable
//! buffer slot at their own cadence; the only coupling between the two sides
//! is the slot rotation inside [`ParticleBuffer`].

use crate::buffer::{InjectTarget, ParticleBuffer};
use crate::error::SimulationError;
use crate::params::{VelocityUpdateSetting, MAX_DT};
use crate::statistics::{expected_attractor_count, Statistics};
use glam::Vec2;
use parking_lot::Mutex;
use particle_physics::{AttractionMatrix, Particle};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sleep while paused or empty, instead of busy-spinning.
const IDLE_DELAY: Duration = Duration::from_millis(1);

/// How often the measured update rate is refreshed.
const REPORT_INTERVAL: Duration = Duration::from_millis(500);

/// State shared between the worker thread and the public handle.
struct Shared {
    buffer: ParticleBuffer,
    matrix: Mutex<AttractionMatrix>,
    settings: Mutex<VelocityUpdateSetting>,
    paused: AtomicBool,
    shutdown: AtomicBool,
    /// Minimum nanoseconds per step; 0 means uncapped.
    step_interval_ns: AtomicU64,
    /// Measured updates per second, stored as f32 bits.
    updates_per_second: AtomicU32,
}

/// Owning handle to the simulation: buffer, configuration, and the worker
/// thread. Starts paused; dropping the handle stops and joins the worker.
pub struct Simulation {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl Simulation {
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            buffer: ParticleBuffer::new(),
            matrix: Mutex::new(AttractionMatrix::zero()),
            settings: Mutex::new(VelocityUpdateSetting::default()),
            paused: AtomicBool::new(true),
            shutdown: AtomicBool::new(false),
            step_interval_ns: AtomicU64::new(0),
            updates_per_second: AtomicU32::new(0),
        });
        let worker = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("simulation-step".into())
                .spawn(move || run_loop(&shared))
                .ok()
        };
        if worker.is_none() {
            log::warn!("failed to spawn simulation thread; stepping disabled");
        }
        Self { shared, worker }
    }

    /// Resume stepping. Takes effect at the next step boundary.
    pub fn start(&self) {
        log::info!("simulation started");
        self.shared.paused.store(false, Ordering::Relaxed);
    }

    /// Pause stepping. An in-flight step always completes; the flag is
    /// checked only at step boundaries, never mid-kernel.
    pub fn pause(&self) {
        log::info!("simulation paused");
        self.shared.paused.store(true, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Relaxed)
    }

    /// Replace the attraction matrix. Applied atomically at the start of the
    /// next step.
    pub fn set_attraction_matrix(&self, matrix: AttractionMatrix) {
        *self.shared.matrix.lock() = matrix;
    }

    pub fn attraction_matrix(&self) -> AttractionMatrix {
        *self.shared.matrix.lock()
    }

    /// Replace the velocity update parameters. Applied atomically at the
    /// start of the next step.
    pub fn set_velocity_update_setting(&self, settings: VelocityUpdateSetting) {
        *self.shared.settings.lock() = settings;
    }

    pub fn velocity_update_setting(&self) -> VelocityUpdateSetting {
        *self.shared.settings.lock()
    }

    /// Cap the step cadence to at most `rate` steps per second, or remove
    /// the cap with `None`.
    pub fn set_step_rate_cap(&self, rate: Option<f32>) {
        let interval_ns = match rate {
            Some(rate) if rate > 0.0 => (1e9 / rate) as u64,
            _ => 0,
        };
        self.shared.step_interval_ns.store(interval_ns, Ordering::Relaxed);
    }

    /// Measured simulation throughput, refreshed about twice a second while
    /// running.
    pub fn updates_per_second(&self) -> f32 {
        f32::from_bits(self.shared.updates_per_second.load(Ordering::Relaxed))
    }

    /// Replace the particle population. Pause the simulation first.
    pub fn set_particles(
        &self,
        particles: &[Particle],
        color_count: usize,
    ) -> Result<(), SimulationError> {
        self.shared.buffer.set_particles(particles, color_count)
    }

    /// Append one particle (silent no-op at capacity). Pause-only.
    pub fn add_particle(&self, particle: Particle) {
        self.shared.buffer.add_particle(particle);
    }

    /// Remove the particle nearest to `center` within `radius`. Pause-only.
    pub fn remove_nearest(&self, center: Vec2, radius: f32) -> bool {
        self.shared.buffer.remove_nearest(center, radius)
    }

    pub fn count(&self) -> usize {
        self.shared.buffer.count()
    }

    pub fn color_count(&self) -> usize {
        self.shared.buffer.color_count()
    }

    /// Read the stable slot (for rendering or inspection), holding its token
    /// only for the duration of `f`.
    pub fn with_current<R>(&self, f: impl FnOnce(&[Particle]) -> R) -> R {
        self.shared.buffer.with_current(f)
    }

    /// Diagnostic scan of the stable slot.
    pub fn statistics(&self) -> Statistics {
        self.shared.buffer.statistics()
    }

    /// Analytic expectation of the mean attractor count under the current
    /// settings, for comparison against `statistics()`.
    pub fn expected_attractor_count(&self) -> f32 {
        expected_attractor_count(self.count(), &self.velocity_update_setting())
    }

    /// QA hook: force one particle component to an arbitrary value
    /// (typically NaN or infinity) to exercise the statistics path.
    pub fn inject(&self, index: usize, target: InjectTarget, value: f32) -> bool {
        self.shared.buffer.inject(index, target, value)
    }

    /// Human-readable dump of the current configuration.
    pub fn dump_parameters(&self) -> String {
        format!(
            "attraction:\n{}\nvelocityUpdateSetting: {}",
            self.attraction_matrix(),
            self.velocity_update_setting()
        )
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Worker loop: step as fast as permitted while running, idle briefly while
/// paused or empty. Configuration is snapshotted once per step, never read
/// mid-scan.
fn run_loop(shared: &Shared) {
    log::info!("simulation loop started");
    let mut last_step = Instant::now();
    let mut last_report = Instant::now();
    let mut steps_since_report = 0u32;

    while !shared.shutdown.load(Ordering::Relaxed) {
        if shared.paused.load(Ordering::Relaxed) || shared.buffer.is_empty() {
            thread::sleep(IDLE_DELAY);
            // A pause must not be integrated as elapsed time on resume.
            last_step = Instant::now();
            continue;
        }

        let step_started = Instant::now();
        let dt = (step_started - last_step).as_secs_f32().clamp(1e-6, MAX_DT);
        last_step = step_started;

        let matrix = *shared.matrix.lock();
        let settings = *shared.settings.lock();
        shared.buffer.step_once(&matrix, &settings, dt);

        steps_since_report += 1;
        let report_elapsed = last_report.elapsed();
        if report_elapsed >= REPORT_INTERVAL {
            let ups = steps_since_report as f32 / report_elapsed.as_secs_f32();
            shared
                .updates_per_second
                .store(ups.to_bits(), Ordering::Relaxed);
            log::debug!("simulation running at {ups:.0} updates/s");
            steps_since_report = 0;
            last_report = Instant::now();
        }

        let interval_ns = shared.step_interval_ns.load(Ordering::Relaxed);
        if interval_ns > 0 {
            let target = Duration::from_nanos(interval_ns);
            let elapsed = step_started.elapsed();
            if elapsed < target {
                thread::sleep(target - elapsed);
            }
        }
    }
    log::info!("simulation loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_physics::Color;

    #[test]
    fn test_starts_paused_and_toggles() {
        let sim = Simulation::new();
        assert!(sim.is_paused());
        sim.start();
        assert!(!sim.is_paused());
        sim.pause();
        assert!(sim.is_paused());
    }

    #[test]
    fn test_configuration_round_trip() {
        let sim = Simulation::new();
        let matrix = AttractionMatrix::chain(4);
        sim.set_attraction_matrix(matrix);
        assert_eq!(sim.attraction_matrix(), matrix);

        let settings = VelocityUpdateSetting {
            rmax: 0.25,
            ..Default::default()
        };
        sim.set_velocity_update_setting(settings);
        assert_eq!(sim.velocity_update_setting(), settings);

        let dump = sim.dump_parameters();
        assert!(dump.starts_with("attraction:"));
        assert!(dump.contains("rmax: 0.25"));
    }

    #[test]
    fn test_ingestion_while_paused() {
        let sim = Simulation::new();
        sim.set_particles(&[Particle::new(Color::Red, Vec2::ZERO)], 1)
            .unwrap();
        assert_eq!(sim.count(), 1);
        sim.add_particle(Particle::new(Color::Red, Vec2::new(0.5, 0.5)));
        assert_eq!(sim.count(), 2);
        assert!(sim.remove_nearest(Vec2::new(0.5, 0.5), 0.01));
        assert_eq!(sim.count(), 1);
    }
}
