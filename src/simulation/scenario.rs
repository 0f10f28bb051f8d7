//! Build fully-seeded particle systems from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the viewer:
//! - the [`ParticleSystem`] with its drawing surface attached
//! - the handle of the interactive pointer particle, if one was configured
//!
//! Seeding order matters: the pointer particle goes in first so it lands at
//! index 0, then the lattice across the surface bounds, then the explicitly
//! listed particles. The scenario is inserted into Bevy as a `Resource` and
//! consumed by the tick and input systems.

use bevy::prelude::Resource;

use crate::configuration::config::{ConfigError, ParticleConfig, ScenarioConfig};
use crate::simulation::states::ParticleId;
use crate::simulation::surface::DrawingSurface;
use crate::simulation::system::ParticleSystem;

/// Bevy resource holding a fully-seeded runtime scenario.
#[derive(Resource)]
pub struct Scenario {
    pub system: ParticleSystem,
    pub pointer: Option<ParticleId>, // handle of the pointer particle, if any
    pub pointer_press_mass: f64, // mass applied while the pointer button is held
    pub pointer_rest_mass: f64, // mass restored when the button is released
}

impl Scenario {
    /// Build a system from `cfg` and seed it.
    ///
    /// Fails fast when the surface is missing or a listed particle carries
    /// a negative mass; no partial scenario is returned.
    pub fn build(
        cfg: ScenarioConfig,
        surface: Option<Box<dyn DrawingSurface>>,
    ) -> Result<Self, ConfigError> {
        let mut system = ParticleSystem::new(cfg.system.clone(), surface)?;
        let pointer = seed(&mut system, &cfg)?;

        log::info!(
            "scenario seeded with {} particles (pointer: {})",
            system.len(),
            pointer.is_some(),
        );

        Ok(Self {
            system,
            pointer,
            pointer_press_mass: cfg.pointer.as_ref().map(|pc| pc.press_mass).unwrap_or(0.0),
            pointer_rest_mass: cfg.pointer.as_ref().map(|pc| pc.mass).unwrap_or(0.0),
        })
    }

    /// Reset to the initial state of `cfg`: drop every particle and reseed.
    ///
    /// The drawing surface and the system-level settings (gravity, pause
    /// flag) are kept as they currently stand.
    pub fn reset(&mut self, cfg: &ScenarioConfig) -> Result<(), ConfigError> {
        self.system.remove_all();
        self.pointer = seed(&mut self.system, cfg)?;
        Ok(())
    }
}

/// Seed `system` from `cfg`: pointer particle first (index 0), then the
/// lattice, then the explicit particle list. Returns the pointer handle.
fn seed(
    system: &mut ParticleSystem,
    cfg: &ScenarioConfig,
) -> Result<Option<ParticleId>, ConfigError> {
    let bounds = system.bounds();

    let pointer = cfg.pointer.as_ref().map(|pc| {
        system.add(ParticleConfig {
            position: [bounds.width / 2.0, bounds.height / 2.0],
            mass: pc.mass,
            radius: pc.radius,
            is_pinned: true,
            ..ParticleConfig::default()
        })
    });

    if let Some(grid) = &cfg.grid {
        if grid.spacing > 0.0 {
            let mut x = 0.0;
            while x < bounds.width {
                let mut y = 0.0;
                while y < bounds.height {
                    system.add(ParticleConfig {
                        position: [x, y],
                        mass: grid.mass,
                        radius: grid.radius,
                        ..ParticleConfig::default()
                    });
                    y += grid.spacing;
                }
                x += grid.spacing;
            }
        }
    }

    for (index, pc) in cfg.particles.iter().enumerate() {
        if pc.mass < 0.0 {
            return Err(ConfigError::NegativeMass {
                index,
                mass: pc.mass,
            });
        }
        system.add(pc.clone());
    }

    Ok(pointer)
}
