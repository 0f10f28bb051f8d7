//! The gravitational particle system container.
//!
//! Owns the ordered particle collection, the system-wide defaults, and the
//! boxed drawing surface. Each host-driven tick is two phases:
//!
//! 1. `update()` – force pass: every particle's acceleration is computed
//!    from the positions as they stand at the start of the frame, so the
//!    result is independent of iteration order.
//! 2. `render()` – integrate + draw pass: each particle advances one step
//!    (unless the system is paused) and is handed to the drawing surface.
//!
//! `add` and `remove_all` must only be called between ticks; no iterator
//! stability is guaranteed during an in-flight pass.

use crate::configuration::config::{ConfigError, ParticleConfig, SystemConfig};
use crate::simulation::forces;
use crate::simulation::integrator;
use crate::simulation::states::{NVec2, Particle, ParticleId};
use crate::simulation::surface::{Bounds, DrawingSurface};

pub struct ParticleSystem {
    gravitational_constant: f64,
    max_accel: f64,
    max_velocity: f64,
    friction_factor: f64,
    edge_bounce_factor: f64,
    edge_bounce_mode: bool,
    edge_wrap_mode: bool,
    is_paused: bool,
    particles: Vec<Particle>,
    surface: Box<dyn DrawingSurface>,
}

impl ParticleSystem {
    /// Build a system from `config` and a drawing surface.
    ///
    /// Fails with [`ConfigError::MissingDrawingSurface`] when no surface is
    /// supplied; the system cannot render without one and no partial system
    /// is created.
    pub fn new(
        config: SystemConfig,
        surface: Option<Box<dyn DrawingSurface>>,
    ) -> Result<Self, ConfigError> {
        let surface = surface.ok_or(ConfigError::MissingDrawingSurface)?;

        Ok(Self {
            gravitational_constant: config.gravitational_constant,
            max_accel: config.max_accel,
            max_velocity: config.max_velocity,
            friction_factor: config.friction_factor,
            edge_bounce_factor: config.edge_bounce_factor,
            edge_bounce_mode: config.edge_bounce_mode,
            edge_wrap_mode: config.edge_wrap_mode,
            is_paused: config.is_paused,
            particles: Vec::new(),
            surface,
        })
    }

    /// Add a particle, merging the system-wide defaults into every override
    /// the config leaves unset, and return its handle.
    ///
    /// Handles are insertion indices; they stay valid until `remove_all`.
    pub fn add(&mut self, config: ParticleConfig) -> ParticleId {
        let merged = ParticleConfig {
            max_accel: config.max_accel.or(Some(self.max_accel)),
            max_velocity: config.max_velocity.or(Some(self.max_velocity)),
            friction_factor: config.friction_factor.or(Some(self.friction_factor)),
            edge_bounce_factor: config.edge_bounce_factor.or(Some(self.edge_bounce_factor)),
            edge_bounce_mode: config.edge_bounce_mode.or(Some(self.edge_bounce_mode)),
            edge_wrap_mode: config.edge_wrap_mode.or(Some(self.edge_wrap_mode)),
            ..config
        };

        self.particles.push(Particle::from_config(merged));
        ParticleId(self.particles.len() - 1)
    }

    /// Discard all particles at once. Subsequent `update`/`render` calls
    /// become no-ops. There is no selective removal.
    pub fn remove_all(&mut self) {
        self.particles.clear();
    }

    /// Read-only access to one particle. `None` after `remove_all`.
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.0)
    }

    /// Read-only view of the collection, in insertion order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn gravity(&self) -> f64 {
        self.gravitational_constant
    }

    /// Current surface extent, as reported by the drawing surface.
    pub fn bounds(&self) -> Bounds {
        self.surface.bounds()
    }

    /// Set a particle's mass, clamped to stay non-negative. Stale handles
    /// (after `remove_all`) are ignored.
    pub fn set_mass(&mut self, id: ParticleId, mass: f64) {
        if let Some(p) = self.particles.get_mut(id.0) {
            p.set_mass(mass);
        }
    }

    /// Move a particle directly, bypassing integration. Used by host loops
    /// to drive the pointer particle. Stale handles are ignored.
    pub fn set_position(&mut self, id: ParticleId, position: NVec2) {
        if let Some(p) = self.particles.get_mut(id.0) {
            p.position = position;
        }
    }

    /// Toggle the pause flag. Pausing suppresses position integration but
    /// not force computation or drawing.
    pub fn toggle_pause(&mut self) -> &mut Self {
        self.is_paused = !self.is_paused;
        self
    }

    /// Set the gravitational constant.
    pub fn set_gravity(&mut self, g: f64) -> &mut Self {
        self.gravitational_constant = g;
        self
    }

    /// Force pass: recompute every particle's acceleration.
    ///
    /// Positions do not change during this pass, so all accelerations are
    /// derived from the same pre-frame snapshot regardless of iteration
    /// order. Runs even while paused so gravity state is warm on unpause.
    pub fn update(&mut self) -> &mut Self {
        for i in 0..self.particles.len() {
            let accel = forces::net_gravity(i, &self.particles, self.gravitational_constant);
            self.particles[i].acceleration = accel;
        }
        self
    }

    /// Integrate + draw pass, in insertion order.
    ///
    /// While paused, integration is skipped but every particle is still
    /// drawn, so the scene stays visible and stationary.
    pub fn render(&mut self) {
        // Split &mut self into disjoint field borrows in one step
        let ParticleSystem {
            particles,
            surface,
            is_paused,
            ..
        } = self;

        let bounds = surface.bounds();

        for p in particles.iter_mut() {
            if !*is_paused {
                integrator::step(p, &bounds);
            }
            surface.draw_shape(p.position, p.radius, p.mass);
        }
    }
}
