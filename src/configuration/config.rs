//! Configuration types for loading particle scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SystemConfig`]   – system-wide defaults (gravity, caps, friction, boundary policy)
//! - [`PointerConfig`]  – optional interactive pointer particle (seeded at index 0)
//! - [`GridConfig`]     – optional lattice of particles across the surface
//! - [`ParticleConfig`] – initial state for each explicitly listed particle
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! system:
//!   gravitational_constant: 1.0
//!   max_accel: 1.0
//!   max_velocity: 10.0
//!   friction_factor: 0.98
//!   edge_wrap_mode: true
//!
//! pointer:
//!   mass: 0.0
//!   press_mass: 10000.0
//!
//! grid:
//!   spacing: 80.0
//!   mass: 0.0
//!
//! particles:
//!   - position: [200.0, 150.0]
//!     velocity: [0.0, 1.0]
//!     mass: 50.0
//! ```
//!
//! Every field is optional and falls back to the documented default.
//! Unknown keys are ignored by serde's default behavior; there is no
//! warning for typos.
//!
//! Per-particle fields left as `null`/absent inherit the system-wide value
//! at `add` time, so the same `ParticleConfig` can be reused under systems
//! with different defaults.

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced while constructing a system or scenario.
///
/// Construction either fails fast here or produces a fully usable system;
/// no partial system is ever returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The system cannot render without a drawing surface.
    #[error("particle system has no drawing surface set")]
    MissingDrawingSurface,

    /// Masses are gravitational weights and must be non-negative.
    #[error("particle {index} has negative mass {mass}")]
    NegativeMass { index: usize, mass: f64 },
}

/// System-wide defaults, merged into every particle added without an
/// explicit override.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SystemConfig {
    pub gravitational_constant: f64, // force scale G
    pub max_accel: f64, // default cap on |acceleration|
    pub max_velocity: f64, // default cap on |velocity|
    pub friction_factor: f64, // default per-tick velocity multiplier
    pub edge_bounce_factor: f64, // default restitution on bounce
    pub edge_bounce_mode: bool, // default boundary policy
    pub edge_wrap_mode: bool, // default boundary policy, wins over bounce
    pub is_paused: bool, // start with integration suspended
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 5e4,
            max_accel: 1.0,
            max_velocity: 100.0,
            friction_factor: 1.0,
            edge_bounce_factor: 1.0,
            edge_bounce_mode: false,
            edge_wrap_mode: false,
            is_paused: false,
        }
    }
}

/// Configuration for a single particle's initial state.
///
/// `None` overrides inherit the system-wide default at `add` time.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParticleConfig {
    pub position: [f64; 2], // initial position in surface coordinates
    pub velocity: [f64; 2], // initial velocity
    pub acceleration: [f64; 2], // initial acceleration, rewritten by the first force pass
    pub mass: f64, // gravitational weight, >= 0
    pub radius: f64, // draw size
    pub is_pinned: bool, // pinned particles skip the position advance
    pub max_accel: Option<f64>,
    pub max_velocity: Option<f64>,
    pub friction_factor: Option<f64>,
    pub edge_bounce_factor: Option<f64>,
    pub edge_bounce_mode: Option<bool>,
    pub edge_wrap_mode: Option<bool>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            acceleration: [0.0, 0.0],
            mass: 0.0,
            radius: 4.0,
            is_pinned: false,
            max_accel: None,
            max_velocity: None,
            friction_factor: None,
            edge_bounce_factor: None,
            edge_bounce_mode: None,
            edge_wrap_mode: None,
        }
    }
}

/// Interactive pointer particle. Seeded first so it lands at index 0;
/// the host loop moves it to the cursor each frame and switches its mass
/// to `press_mass` while the pointer button is held.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PointerConfig {
    pub mass: f64, // rest mass while the button is up
    pub press_mass: f64, // attractor mass while the button is held
    pub radius: f64, // draw size
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            mass: 0.0,
            press_mass: 1e4,
            radius: 6.0,
        }
    }
}

/// Lattice seeding: one particle every `spacing` units across the surface
/// bounds, each with `mass`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GridConfig {
    pub spacing: f64,
    pub mass: f64,
    pub radius: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 80.0,
            mass: 0.0,
            radius: 4.0,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub system: SystemConfig, // system-wide defaults
    pub pointer: Option<PointerConfig>, // interactive pointer particle
    pub grid: Option<GridConfig>, // lattice seeding across the surface
    pub particles: Vec<ParticleConfig>, // explicitly listed particles
}
