pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{NVec2, Particle, ParticleId};
pub use simulation::surface::{Bounds, DrawingSurface};
pub use simulation::system::ParticleSystem;
pub use simulation::forces::{net_gravity, MIN_DIST_SQ};
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ConfigError, GridConfig, ParticleConfig, PointerConfig, ScenarioConfig, SystemConfig,
};

pub use visualization::gravsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_force_pass, bench_tick};
