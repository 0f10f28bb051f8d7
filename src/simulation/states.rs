//! Core state types for the gravitational particle system.
//!
//! Defines the particle struct and its kinematic state:
//! - `NVec2` – 2D vector alias used throughout the crate
//! - `Particle` – position/velocity/acceleration plus per-particle
//!   physical parameters (caps, friction, boundary policy, pin flag)
//!
//! Particles are created only through `ParticleSystem::add`, which merges
//! system defaults with per-particle overrides before calling `from_config`.

use nalgebra::Vector2;

use crate::configuration::config::ParticleConfig;

pub type NVec2 = Vector2<f64>;

/// Stable handle to a particle inside a [`ParticleSystem`].
///
/// Returned by `add`; used with the narrow mutation API (`set_mass`,
/// `set_position`) instead of handing out mutable access to the internal
/// collection. Index 0 is conventionally the interactive pointer particle.
///
/// [`ParticleSystem`]: crate::simulation::system::ParticleSystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: NVec2, // position in surface coordinates
    pub velocity: NVec2, // velocity per frame
    pub acceleration: NVec2, // acceleration, rewritten by each force pass
    pub mass: f64, // gravitational weight contributed to others, >= 0
    pub radius: f64, // draw size, no effect on the physics
    pub max_accel: f64, // cap on |acceleration| after a force pass
    pub max_velocity: f64, // cap on |velocity| after integration
    pub friction_factor: f64, // velocity multiplier per tick, (0, 1]
    pub edge_bounce_factor: f64, // velocity retained after a bounce
    pub edge_bounce_mode: bool, // bounce off the surface bounds
    pub edge_wrap_mode: bool, // wrap around the surface bounds, wins over bounce
    pub is_pinned: bool, // pinned particles skip the position advance
}

impl Particle {
    /// Build a particle from an already-merged configuration.
    ///
    /// The `Option` overrides must have been resolved against the system
    /// defaults by the caller; unresolved options fall back to the
    /// documented global defaults.
    pub(crate) fn from_config(cfg: ParticleConfig) -> Self {
        Self {
            position: NVec2::new(cfg.position[0], cfg.position[1]),
            velocity: NVec2::new(cfg.velocity[0], cfg.velocity[1]),
            acceleration: NVec2::new(cfg.acceleration[0], cfg.acceleration[1]),
            mass: cfg.mass.max(0.0),
            radius: cfg.radius,
            max_accel: cfg.max_accel.unwrap_or(1.0),
            max_velocity: cfg.max_velocity.unwrap_or(100.0),
            friction_factor: cfg.friction_factor.unwrap_or(1.0),
            edge_bounce_factor: cfg.edge_bounce_factor.unwrap_or(1.0),
            edge_bounce_mode: cfg.edge_bounce_mode.unwrap_or(false),
            edge_wrap_mode: cfg.edge_wrap_mode.unwrap_or(false),
            is_pinned: cfg.is_pinned,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mutate mass, clamped to stay non-negative. Used externally to turn
    /// an attractor on and off (press-and-hold at the pointer position).
    pub fn set_mass(&mut self, m: f64) {
        self.mass = m.max(0.0);
    }

    /// Squared distance to `other`.
    pub fn dist_sq_to(&self, other: &Particle) -> f64 {
        (other.position - self.position).norm_squared()
    }

    /// Displacement vector from `self` toward `other`.
    pub fn vector_to(&self, other: &Particle) -> NVec2 {
        other.position - self.position
    }
}
