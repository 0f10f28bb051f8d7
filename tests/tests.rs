use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gravsim::{
    Bounds, ConfigError, DrawingSurface, NVec2, ParticleConfig, ParticleSystem, Scenario,
    ScenarioConfig, SystemConfig,
};

/// Fixed-size surface for tests; draw calls are counted and discarded.
struct StubSurface {
    bounds: Bounds,
    draws: Arc<AtomicUsize>,
}

impl DrawingSurface for StubSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn pointer(&self) -> NVec2 {
        NVec2::zeros()
    }

    fn draw_shape(&mut self, _position: NVec2, _radius: f64, _mass: f64) {
        self.draws.fetch_add(1, Ordering::Relaxed);
    }
}

/// Build a stub surface plus a handle on its draw-call counter
pub fn stub_surface(width: f64, height: f64) -> (Box<dyn DrawingSurface>, Arc<AtomicUsize>) {
    let draws = Arc::new(AtomicUsize::new(0));
    let surface = StubSurface {
        bounds: Bounds { width, height },
        draws: draws.clone(),
    };
    (Box::new(surface), draws)
}

/// Build an empty system over a 1000x1000 stub surface
pub fn test_system(config: SystemConfig) -> ParticleSystem {
    let (surface, _) = stub_surface(1000.0, 1000.0);
    ParticleSystem::new(config, Some(surface)).expect("stub surface is always present")
}

/// Build a system holding two particles separated by `dist` along x
pub fn two_particle_system(dist: f64, m1: f64, m2: f64, config: SystemConfig) -> ParticleSystem {
    let mut system = test_system(config);
    system.add(ParticleConfig {
        position: [400.0, 500.0],
        mass: m1,
        max_accel: Some(1e6),
        ..ParticleConfig::default()
    });
    system.add(ParticleConfig {
        position: [400.0 + dist, 500.0],
        mass: m2,
        max_accel: Some(1e6),
        ..ParticleConfig::default()
    });
    system
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ==================================================================================
// Force-pass tests
// ==================================================================================

#[test]
fn gravity_magnitude_follows_inverse_square_law() {
    let config = SystemConfig {
        gravitational_constant: 1.0,
        ..SystemConfig::default()
    };

    // Masses 0 and 100 at distance 10: the massless particle accelerates at
    // G * 100 / 100 = 1 toward the other; the heavy one feels nothing back.
    let mut system = two_particle_system(10.0, 0.0, 100.0, config);
    system.update();

    let a0 = system.particles()[0].acceleration;
    let a1 = system.particles()[1].acceleration;

    assert!(approx(a0.x, 1.0), "Expected accel 1 toward +x, got {:?}", a0);
    assert!(approx(a0.y, 0.0), "Expected no y component, got {:?}", a0);
    assert!(approx(a1.norm(), 0.0), "Massless partner must exert no pull: {:?}", a1);
}

#[test]
fn own_mass_does_not_affect_own_acceleration() {
    let config = SystemConfig {
        gravitational_constant: 1.0,
        ..SystemConfig::default()
    };

    let mut light = two_particle_system(10.0, 0.0, 100.0, config.clone());
    let mut heavy = two_particle_system(10.0, 50.0, 100.0, config);

    light.update();
    heavy.update();

    let a_light = light.particles()[0].acceleration;
    let a_heavy = heavy.particles()[0].acceleration;

    assert!(
        approx((a_light - a_heavy).norm(), 0.0),
        "Target mass changed its own acceleration: {:?} vs {:?}",
        a_light,
        a_heavy
    );
}

#[test]
fn symmetric_pair_accelerates_with_opposite_vectors() {
    let config = SystemConfig {
        gravitational_constant: 1.0,
        ..SystemConfig::default()
    };

    let mut system = two_particle_system(20.0, 5.0, 5.0, config);
    system.update();

    let a0 = system.particles()[0].acceleration;
    let a1 = system.particles()[1].acceleration;

    assert!(a0.norm() > 0.0, "Equal masses must attract");
    assert!(
        approx((a0 + a1).norm(), 0.0),
        "Accelerations are not equal and opposite: {:?} vs {:?}",
        a0,
        a1
    );
}

#[test]
fn gravity_ratio_across_distances() {
    let config = SystemConfig {
        gravitational_constant: 1.0,
        ..SystemConfig::default()
    };

    let mut sys_r = two_particle_system(10.0, 1.0, 1.0, config.clone());
    let mut sys_2r = two_particle_system(20.0, 1.0, 1.0, config);

    sys_r.update();
    sys_2r.update();

    let ratio = sys_r.particles()[0].acceleration.norm()
        / sys_2r.particles()[0].acceleration.norm();

    assert!((ratio - 4.0).abs() < 1e-6, "Expected ~4x, got {}", ratio);
}

#[test]
fn acceleration_is_capped_after_force_pass() {
    let config = SystemConfig {
        gravitational_constant: 1e12,
        max_accel: 1.0,
        ..SystemConfig::default()
    };

    let mut system = test_system(config);
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        mass: 1000.0,
        ..ParticleConfig::default()
    });
    system.add(ParticleConfig {
        position: [500.1, 500.0],
        mass: 1000.0,
        ..ParticleConfig::default()
    });

    system.update();

    for p in system.particles() {
        assert!(
            p.acceleration.norm() <= 1.0 + 1e-12,
            "Acceleration cap violated: {}",
            p.acceleration.norm()
        );
    }
}

#[test]
fn coincident_particles_stay_finite() {
    let config = SystemConfig {
        gravitational_constant: 1e9,
        max_accel: 1.0,
        ..SystemConfig::default()
    };

    let mut system = test_system(config);
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        mass: 10.0,
        ..ParticleConfig::default()
    });
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        mass: 10.0,
        ..ParticleConfig::default()
    });

    system.update();

    for p in system.particles() {
        assert!(
            p.acceleration.x.is_finite() && p.acceleration.y.is_finite(),
            "Coincident pair produced a non-finite acceleration: {:?}",
            p.acceleration
        );
        assert!(p.acceleration.norm() <= 1.0 + 1e-12);
    }
}

#[test]
fn single_particle_feels_no_force() {
    let mut system = test_system(SystemConfig::default());
    let id = system.add(ParticleConfig {
        position: [500.0, 500.0],
        mass: 100.0,
        ..ParticleConfig::default()
    });

    system.update();

    let p = system.particle(id).expect("particle was just added");
    assert!(
        approx(p.acceleration.norm(), 0.0),
        "Lone particle accelerated: {:?}",
        p.acceleration
    );
}

#[test]
fn attractor_switches_on_and_off_with_mass() {
    let config = SystemConfig {
        gravitational_constant: 1.0,
        ..SystemConfig::default()
    };

    let mut system = test_system(config);
    let pointer = system.add(ParticleConfig {
        position: [500.0, 500.0],
        mass: 0.0,
        is_pinned: true,
        ..ParticleConfig::default()
    });
    let tracer = system.add(ParticleConfig {
        position: [600.0, 500.0],
        ..ParticleConfig::default()
    });

    system.update();
    let idle = system.particle(tracer).unwrap().acceleration.norm();
    assert!(approx(idle, 0.0), "Massless pointer must not attract");

    // press-and-hold
    system.set_mass(pointer, 1e4);
    system.update();
    let held = system.particle(tracer).unwrap().acceleration;
    assert!(held.norm() > 0.0, "Attractor with mass must pull the tracer");
    assert!(held.x < 0.0, "Pull must point toward the pointer");

    // release
    system.set_mass(pointer, 0.0);
    system.update();
    let released = system.particle(tracer).unwrap().acceleration.norm();
    assert!(approx(released, 0.0), "Releasing must switch the attractor off");
}

// ==================================================================================
// Integration and boundary tests
// ==================================================================================

#[test]
fn velocity_is_capped_after_integration() {
    let mut system = test_system(SystemConfig {
        max_velocity: 5.0,
        ..SystemConfig::default()
    });
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        acceleration: [1e6, 0.0],
        ..ParticleConfig::default()
    });

    system.render();

    let v = system.particles()[0].velocity.norm();
    assert!(v <= 5.0 + 1e-12, "Velocity cap violated: {}", v);
}

#[test]
fn friction_damps_velocity_each_tick() {
    let mut system = test_system(SystemConfig {
        friction_factor: 0.5,
        ..SystemConfig::default()
    });
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        velocity: [10.0, 0.0],
        ..ParticleConfig::default()
    });

    system.render();

    let p = &system.particles()[0];
    assert!(approx(p.velocity.x, 5.0), "Expected vx 5, got {}", p.velocity.x);
    assert!(approx(p.position.x, 505.0), "Expected x 505, got {}", p.position.x);
}

#[test]
fn wrap_teleports_to_the_opposite_edge() {
    let (surface, _) = stub_surface(100.0, 100.0);
    let mut system = ParticleSystem::new(
        SystemConfig {
            edge_wrap_mode: true,
            ..SystemConfig::default()
        },
        Some(surface),
    )
    .unwrap();

    system.add(ParticleConfig {
        position: [95.0, 50.0],
        velocity: [10.0, 0.0],
        ..ParticleConfig::default()
    });

    system.render();

    let p = &system.particles()[0];
    assert!(approx(p.position.x, 5.0), "Expected wrap to x=5, got {}", p.position.x);
    assert!(approx(p.position.y, 50.0));
}

#[test]
fn bounce_clamps_position_and_reflects_velocity() {
    let (surface, _) = stub_surface(100.0, 100.0);
    let mut system = ParticleSystem::new(
        SystemConfig {
            edge_bounce_mode: true,
            edge_bounce_factor: 0.5,
            ..SystemConfig::default()
        },
        Some(surface),
    )
    .unwrap();

    system.add(ParticleConfig {
        position: [95.0, 50.0],
        velocity: [10.0, 0.0],
        ..ParticleConfig::default()
    });

    system.render();

    let p = &system.particles()[0];
    assert!(approx(p.position.x, 100.0), "Expected clamp to x=100, got {}", p.position.x);
    assert!(approx(p.velocity.x, -5.0), "Expected vx=-5, got {}", p.velocity.x);
}

#[test]
fn wrap_wins_when_both_boundary_modes_are_set() {
    let (surface, _) = stub_surface(100.0, 100.0);
    let mut system = ParticleSystem::new(
        SystemConfig {
            edge_wrap_mode: true,
            edge_bounce_mode: true,
            ..SystemConfig::default()
        },
        Some(surface),
    )
    .unwrap();

    system.add(ParticleConfig {
        position: [95.0, 50.0],
        velocity: [10.0, 0.0],
        ..ParticleConfig::default()
    });

    system.render();

    let p = &system.particles()[0];
    assert!(approx(p.position.x, 5.0), "Wrap must take precedence, got x={}", p.position.x);
    assert!(approx(p.velocity.x, 10.0), "Wrap must not touch velocity");
}

#[test]
fn pinned_particle_never_moves() {
    let config = SystemConfig {
        gravitational_constant: 100.0,
        ..SystemConfig::default()
    };

    let mut system = test_system(config);
    let pinned = system.add(ParticleConfig {
        position: [500.0, 500.0],
        is_pinned: true,
        ..ParticleConfig::default()
    });
    system.add(ParticleConfig {
        position: [510.0, 500.0],
        mass: 1000.0,
        ..ParticleConfig::default()
    });

    for _ in 0..10 {
        system.update().render();
    }

    let p = system.particle(pinned).unwrap();
    assert!(
        approx(p.position.x, 500.0) && approx(p.position.y, 500.0),
        "Pinned particle moved to {:?}",
        p.position
    );
    assert!(p.acceleration.norm() > 0.0, "Forces still apply to a pinned particle");
}

// ==================================================================================
// System lifecycle tests
// ==================================================================================

#[test]
fn construction_fails_without_a_surface() {
    let result = ParticleSystem::new(SystemConfig::default(), None);
    assert!(matches!(result, Err(ConfigError::MissingDrawingSurface)));
}

#[test]
fn add_merges_system_defaults_and_keeps_overrides() {
    let mut system = test_system(SystemConfig {
        friction_factor: 0.5,
        max_velocity: 42.0,
        edge_wrap_mode: true,
        ..SystemConfig::default()
    });

    let inherited = system.add(ParticleConfig::default());
    let overridden = system.add(ParticleConfig {
        friction_factor: Some(0.9),
        ..ParticleConfig::default()
    });

    let p = system.particle(inherited).unwrap();
    assert!(approx(p.friction_factor, 0.5));
    assert!(approx(p.max_velocity, 42.0));
    assert!(p.edge_wrap_mode);

    let p = system.particle(overridden).unwrap();
    assert!(approx(p.friction_factor, 0.9), "Override must win over the default");
}

#[test]
fn set_mass_clamps_negative_values() {
    let mut system = test_system(SystemConfig::default());
    let id = system.add(ParticleConfig {
        mass: 10.0,
        ..ParticleConfig::default()
    });

    system.set_mass(id, -5.0);

    assert!(approx(system.particle(id).unwrap().mass(), 0.0));
}

#[test]
fn pause_freezes_positions_exactly() {
    let config = SystemConfig {
        gravitational_constant: 10.0,
        ..SystemConfig::default()
    };

    let mut system = two_particle_system(50.0, 10.0, 10.0, config);
    system.toggle_pause();

    let before: Vec<NVec2> = system.particles().iter().map(|p| p.position).collect();

    for _ in 0..5 {
        system.update().render();
    }

    for (p, prev) in system.particles().iter().zip(before.iter()) {
        assert_eq!(p.position, *prev, "Paused particle drifted");
    }
}

#[test]
fn paused_system_still_draws() {
    let (surface, draws) = stub_surface(1000.0, 1000.0);
    let mut system = ParticleSystem::new(SystemConfig::default(), Some(surface)).unwrap();
    system.add(ParticleConfig::default());
    system.add(ParticleConfig::default());

    system.toggle_pause();
    system.update().render();

    assert_eq!(draws.load(Ordering::Relaxed), 2, "Pausing must not suppress drawing");
}

#[test]
fn toggle_pause_twice_resumes_motion() {
    let mut system = test_system(SystemConfig::default());
    system.add(ParticleConfig {
        position: [500.0, 500.0],
        velocity: [1.0, 0.0],
        ..ParticleConfig::default()
    });

    system.toggle_pause().toggle_pause();
    system.update().render();

    assert!(approx(system.particles()[0].position.x, 501.0), "Motion did not resume");
}

#[test]
fn remove_all_makes_ticks_no_ops() {
    let (surface, draws) = stub_surface(1000.0, 1000.0);
    let mut system = ParticleSystem::new(SystemConfig::default(), Some(surface)).unwrap();
    system.add(ParticleConfig::default());
    system.add(ParticleConfig::default());

    system.remove_all();
    let drawn_before = draws.load(Ordering::Relaxed);

    system.update().render();

    assert!(system.is_empty());
    assert_eq!(
        draws.load(Ordering::Relaxed),
        drawn_before,
        "Empty system must not draw"
    );
}

#[test]
fn set_gravity_chains_and_takes_effect() {
    let config = SystemConfig {
        gravitational_constant: 0.0,
        ..SystemConfig::default()
    };

    let mut system = two_particle_system(10.0, 100.0, 100.0, config);

    system.update();
    assert!(approx(system.particles()[0].acceleration.norm(), 0.0));

    system.set_gravity(1.0).update().render();
    assert!(
        system.particles()[0].acceleration.norm() > 0.0,
        "New gravitational constant must feed the next force pass"
    );
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_seeds_pointer_first_then_grid() {
    let cfg: ScenarioConfig = serde_yaml::from_str(
        r#"
        system:
          gravitational_constant: 1.0
        pointer:
          press_mass: 5000.0
        grid:
          spacing: 80.0
        "#,
    )
    .expect("scenario yaml parses");

    let (surface, _) = stub_surface(200.0, 200.0);
    let scenario = Scenario::build(cfg, Some(surface)).expect("scenario builds");

    // 3x3 lattice (0, 80, 160 per axis) plus the pointer at index 0.
    assert_eq!(scenario.system.len(), 10);
    let pointer = scenario.pointer.expect("pointer particle seeded");
    let p = scenario.system.particle(pointer).unwrap();
    assert!(p.is_pinned, "Pointer particle must be pinned to the cursor");
    assert!(approx(scenario.pointer_press_mass, 5000.0));
}

#[test]
fn scenario_rejects_negative_mass() {
    let cfg: ScenarioConfig = serde_yaml::from_str(
        r#"
        particles:
          - position: [10.0, 10.0]
            mass: -1.0
        "#,
    )
    .expect("scenario yaml parses");

    let (surface, _) = stub_surface(100.0, 100.0);
    let result = Scenario::build(cfg, Some(surface));

    assert!(matches!(result, Err(ConfigError::NegativeMass { index: 0, .. })));
}
