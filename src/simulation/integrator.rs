//! Fixed-step integration and boundary resolution for a single particle.
//!
//! One call advances one particle by one frame: velocity from the current
//! acceleration, friction damping, speed cap, position advance (skipped for
//! pinned particles), then the boundary policy against the surface bounds.
//! The step size is implicitly one frame; there is no dt parameter.

use crate::simulation::states::Particle;
use crate::simulation::surface::Bounds;

/// Advance `p` by one frame and resolve it against `bounds`.
pub fn step(p: &mut Particle, bounds: &Bounds) {
    // v_n+1 = (v_n + a_n) * friction, capped at max_velocity
    p.velocity += p.acceleration;
    p.velocity *= p.friction_factor;
    p.velocity = p.velocity.cap_magnitude(p.max_velocity);

    // Pinned particles keep their position; their velocity state still
    // evolves so they resume naturally when unpinned.
    if !p.is_pinned {
        p.position += p.velocity;
    }

    apply_boundary(p, bounds);
}

/// Resolve `p` against the rectangular bounds after a position update.
///
/// Wrap takes precedence over bounce when both are set. With neither set
/// the particle leaves the visible area unconstrained.
fn apply_boundary(p: &mut Particle, bounds: &Bounds) {
    if p.edge_wrap_mode {
        p.position.x = wrap_coord(p.position.x, bounds.width);
        p.position.y = wrap_coord(p.position.y, bounds.height);
    } else if p.edge_bounce_mode {
        let (x, vx) = bounce_axis(p.position.x, p.velocity.x, bounds.width, p.edge_bounce_factor);
        let (y, vy) = bounce_axis(p.position.y, p.velocity.y, bounds.height, p.edge_bounce_factor);
        p.position.x = x;
        p.velocity.x = vx;
        p.position.y = y;
        p.velocity.y = vy;
    }
}

/// Wrap a coordinate that left `[0, bound]` back in modulo the bound
/// (toroidal topology). In-range coordinates pass through untouched.
fn wrap_coord(coord: f64, bound: f64) -> f64 {
    if bound > 0.0 && !(0.0..=bound).contains(&coord) {
        coord.rem_euclid(bound)
    } else {
        coord
    }
}

/// Bounce one axis: clamp the coordinate to the crossed bound and invert
/// the velocity component, scaled by the restitution factor.
fn bounce_axis(coord: f64, vel: f64, bound: f64, factor: f64) -> (f64, f64) {
    if coord < 0.0 {
        (0.0, -vel * factor)
    } else if coord > bound {
        (bound, -vel * factor)
    } else {
        (coord, vel)
    }
}
