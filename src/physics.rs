use itertools::Itertools;
use ultraviolet::Vec2;

pub const GRAVITY: f32 = 6.6743e-2;

/// Softening length; bounds the force as two bodies approach coincidence.
pub const SOFTENING: f32 = 10.0;

/// Simulated time advanced per tick, independent of wall-clock frame time.
pub const TIME_STEP: f32 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Net force accumulated this tick; cleared before every accumulation pass.
    pub force: Vec2,
    pub mass: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, mass: f32) -> Self {
        Self {
            pos,
            vel,
            force: Vec2::zero(),
            mass,
        }
    }

    /// Softened gravitational pull exerted on `self` by `other`.
    pub fn pull_from(&self, other: &Body) -> Vec2 {
        let displacement = other.pos - self.pos;
        let dist_sq = displacement.mag_sq() + SOFTENING * SOFTENING;

        displacement * GRAVITY * self.mass * other.mass / (dist_sq * dist_sq.sqrt())
    }
}

/// Recompute the net force on every body from scratch.
///
/// Each unordered pair is evaluated once; the partner receives the exact
/// negation, so the result matches evaluating both directions independently.
pub fn accumulate_forces(bodies: &mut [Body]) {
    for body in bodies.iter_mut() {
        body.force = Vec2::zero();
    }

    for (i, j) in (0..bodies.len()).tuple_combinations() {
        let pull = bodies[i].pull_from(&bodies[j]);
        bodies[i].force += pull;
        bodies[j].force -= pull;
    }
}

/// Advance every body by `dt` with a semi-implicit Euler step: the velocity
/// kick lands first, so the position drift uses the updated velocity.
///
/// First order, so energy drifts over long runs.
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies.iter_mut() {
        body.vel += body.force / body.mass * dt;
        body.pos += body.vel * dt;
    }
}
