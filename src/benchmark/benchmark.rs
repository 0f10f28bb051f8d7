use std::time::Instant;

use crate::configuration::config::{ParticleConfig, SystemConfig};
use crate::simulation::states::NVec2;
use crate::simulation::surface::{Bounds, DrawingSurface};
use crate::simulation::system::ParticleSystem;

/// Headless surface for timing runs: fixed bounds, draws go nowhere.
struct NullSurface {
    bounds: Bounds,
}

impl DrawingSurface for NullSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn pointer(&self) -> NVec2 {
        NVec2::zeros()
    }

    fn draw_shape(&mut self, _position: NVec2, _radius: f64, _mass: f64) {}
}

/// Helper to build a system of size `n` with deterministic positions
fn make_system(n: usize) -> ParticleSystem {
    let surface = NullSurface {
        bounds: Bounds {
            width: 1000.0,
            height: 1000.0,
        },
    };

    let config = SystemConfig {
        gravitational_constant: 0.1,
        max_accel: 1.0,
        max_velocity: 10.0,
        edge_wrap_mode: true,
        ..SystemConfig::default()
    };

    let mut system = ParticleSystem::new(config, Some(Box::new(surface)))
        .expect("benchmark surface is always present");

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        system.add(ParticleConfig {
            position: [
                500.0 + (i_f * 0.37).sin() * 400.0,
                500.0 + (i_f * 0.13).cos() * 400.0,
            ],
            mass: 1.0,
            ..ParticleConfig::default()
        });
    }

    system
}

/// Time the O(n^2) force pass for a range of system sizes.
pub fn bench_force_pass() {
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let mut system = make_system(n);

        // Warm up
        system.update();

        let t0 = Instant::now();
        system.update();
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, force pass = {dt:8.6} s");
    }
}

/// Time a full tick (force pass + integrate + draw) against the headless
/// surface. Paste output directly into a spreadsheet to graph.
pub fn bench_tick() {
    let steps = 10;

    println!("N,tick_ms");

    for n in (200..=3200).step_by(200) {
        let mut system = make_system(n);

        // Warm up one tick
        system.update().render();

        let t0 = Instant::now();
        for _ in 0..steps {
            system.update().render();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{n},{ms:.6}");
    }
}
