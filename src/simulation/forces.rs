//! Gravitational force pass for the particle system.
//!
//! Computes, for one target particle, the net acceleration contributed by
//! every other particle via the inverse-square law, then caps the result at
//! the target's `max_accel`. The system runs this for all particles from a
//! consistent position snapshot before any particle moves.

use crate::simulation::states::{NVec2, Particle};

/// Floor for the squared separation distance.
///
/// Near-coincident particles would otherwise divide by an arbitrarily small
/// d^2 and produce unbounded accelerations; flooring d^2 turns that into a
/// large-but-finite magnitude that the per-particle cap then bounds.
pub const MIN_DIST_SQ: f64 = 1e-9;

/// Net gravitational acceleration on `particles[target]` from all others.
///
/// Direction per pair is the unit vector from the target toward the other
/// particle; magnitude is `g * m_other / d^2` with `d^2` floored at
/// [`MIN_DIST_SQ`]. Only the masses of the *other* particles matter: the
/// target's own mass never changes its own acceleration. The summed vector
/// is capped at the target's `max_accel` before being returned.
pub fn net_gravity(target: usize, particles: &[Particle], g: f64) -> NVec2 {
    let tp = &particles[target];

    // Running sum of all pairwise contributions.
    let mut accel = NVec2::zeros();

    for (j, p) in particles.iter().enumerate() {
        // No force from self to self.
        if j == target {
            continue;
        }

        // r is the displacement from the target toward p; the target is
        // pulled along +r.
        let r = tp.vector_to(p);

        // Squared separation, floored so coincident pairs stay finite.
        let d2 = tp.dist_sq_to(p).max(MIN_DIST_SQ);

        // Exactly-coincident pair: no defined direction, no contribution.
        let Some(dir) = r.try_normalize(0.0) else {
            continue;
        };

        // Acceleration magnitude due to gravity: g * m / d^2.
        // The target's own mass cancels out of F = m*a, so only p's mass
        // appears here.
        let g_accel = g * p.mass() / d2;

        accel += dir * g_accel;
    }

    // Cap the total, not the per-pair terms, so many weak pulls and one
    // strong pull are limited the same way.
    accel.cap_magnitude(tp.max_accel)
}
