//! Bevy 2D viewer for the particle system.
//!
//! Hosts the frame loop the core expects: one `update()` then one
//! `render()` per display refresh, with all input wiring going through the
//! public API (`set_position`/`set_mass` on the pointer handle,
//! `toggle_pause`, `set_gravity`, `remove_all` + reseed).
//!
//! Controls:
//! - mouse move: pointer particle follows the cursor
//! - mouse press/hold: pointer becomes an attractor (press mass)
//! - Space: toggle pause
//! - Up / Down: scale the gravitational constant
//! - R: reset the scenario

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use crate::simulation::surface::{Bounds, DrawingSurface};

/// The scenario configuration the viewer was launched with; kept around so
/// R can reseed from the initial state.
#[derive(Resource)]
struct ScenarioSource(ScenarioConfig);

/// One buffered draw call from `ParticleSystem::render`.
struct Shape {
    position: NVec2,
    radius: f64,
    mass: f64,
}

struct CanvasState {
    bounds: Bounds,
    pointer: NVec2,
    shapes: Vec<Shape>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            bounds: Bounds {
                width: 0.0,
                height: 0.0,
            },
            pointer: NVec2::zeros(),
            shapes: Vec::new(),
        }
    }
}

/// Drawing surface backed by the bevy window.
///
/// The simulation holds one clone as its boxed surface and buffers draw
/// calls into it; the viewer holds another clone as a resource, feeds in
/// the window size and cursor each frame, and flushes the buffered shapes
/// through `Gizmos`.
#[derive(Resource, Clone, Default)]
pub struct SharedCanvas {
    inner: Arc<Mutex<CanvasState>>,
}

impl SharedCanvas {
    fn set_bounds(&self, width: f64, height: f64) {
        let mut state = self.inner.lock().expect("canvas mutex poisoned");
        state.bounds = Bounds { width, height };
    }

    fn set_pointer(&self, pointer: NVec2) {
        self.inner.lock().expect("canvas mutex poisoned").pointer = pointer;
    }

    fn drain_shapes(&self) -> Vec<Shape> {
        std::mem::take(&mut self.inner.lock().expect("canvas mutex poisoned").shapes)
    }
}

impl DrawingSurface for SharedCanvas {
    fn bounds(&self) -> Bounds {
        self.inner.lock().expect("canvas mutex poisoned").bounds
    }

    fn pointer(&self) -> NVec2 {
        self.inner.lock().expect("canvas mutex poisoned").pointer
    }

    fn draw_shape(&mut self, position: NVec2, radius: f64, mass: f64) {
        self.inner
            .lock()
            .expect("canvas mutex poisoned")
            .shapes
            .push(Shape {
                position,
                radius,
                mass,
            });
    }
}

pub fn run_2d(cfg: ScenarioConfig) {
    log::info!("run_2d: starting Bevy 2D viewer");

    App::new()
        .insert_resource(ScenarioSource(cfg))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                sync_canvas_system,
                pointer_system,
                control_system,
                tick_system,
                draw_system,
            )
                .chain(),
        )
        .run();
}

fn setup_system(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    source: Res<ScenarioSource>,
) {
    commands.spawn(Camera2dBundle::default());

    // Seed the canvas bounds before building so grid seeding sees the
    // real window size.
    let canvas = SharedCanvas::default();
    if let Ok(window) = windows.get_single() {
        canvas.set_bounds(window.width() as f64, window.height() as f64);
    }

    let scenario = Scenario::build(source.0.clone(), Some(Box::new(canvas.clone())))
        .expect("failed to build scenario");

    commands.insert_resource(scenario);
    commands.insert_resource(canvas);
}

/// Mirror the window size and cursor into the shared canvas.
fn sync_canvas_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    canvas: Res<SharedCanvas>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    canvas.set_bounds(window.width() as f64, window.height() as f64);

    // Window cursor coordinates are already top-left origin, same as the
    // simulation's surface coordinates.
    if let Some(cursor) = window.cursor_position() {
        canvas.set_pointer(NVec2::new(cursor.x as f64, cursor.y as f64));
    }
}

/// Drive the pointer particle: follow the cursor, become an attractor
/// while the left button is held.
fn pointer_system(
    canvas: Res<SharedCanvas>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut scenario: ResMut<Scenario>,
) {
    let Some(id) = scenario.pointer else {
        return;
    };

    let pointer = canvas.pointer();
    scenario.system.set_position(id, pointer);

    if buttons.just_pressed(MouseButton::Left) {
        let press_mass = scenario.pointer_press_mass;
        scenario.system.set_mass(id, press_mass);
    }
    if buttons.just_released(MouseButton::Left) {
        let rest_mass = scenario.pointer_rest_mass;
        scenario.system.set_mass(id, rest_mass);
    }
}

fn control_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    source: Res<ScenarioSource>,
) {
    if keys.just_pressed(KeyCode::Space) {
        scenario.system.toggle_pause();
        log::info!("paused: {}", scenario.system.is_paused());
    }

    if keys.just_pressed(KeyCode::ArrowUp) {
        let g = scenario.system.gravity();
        let g = if g > 0.0 { g * 1.25 } else { 1.0 };
        scenario.system.set_gravity(g);
        log::info!("gravitational constant: {g}");
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        let g = scenario.system.gravity() / 1.25;
        scenario.system.set_gravity(g);
        log::info!("gravitational constant: {g}");
    }

    if keys.just_pressed(KeyCode::KeyR) {
        if let Err(err) = scenario.reset(&source.0) {
            log::warn!("scenario reset failed: {err}");
        }
    }
}

/// One simulation tick per display refresh: force pass, then integrate
/// and buffer the draw calls.
fn tick_system(mut scenario: ResMut<Scenario>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario { system, .. } = &mut *scenario;

    system.update().render();
}

/// Flush the buffered draw calls as gizmo circles, hue derived from mass.
fn draw_system(canvas: Res<SharedCanvas>, mut gizmos: Gizmos) {
    let Bounds { width, height } = canvas.bounds();

    for shape in canvas.drain_shapes() {
        // Surface coordinates are top-left origin, y down; gizmos draw in
        // world coordinates centered on the camera, y up.
        let x = (shape.position.x - width / 2.0) as f32;
        let y = (height / 2.0 - shape.position.y) as f32;

        let hue = ((shape.mass.ln_1p() * 36.0) % 360.0) as f32;
        gizmos.circle_2d(Vec2::new(x, y), shape.radius as f32, Color::hsl(hue, 0.8, 0.6));
    }
}
