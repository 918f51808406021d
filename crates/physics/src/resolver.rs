use glam::Vec2;
use tileworld_input::InputState;

use crate::actor::Actor;
use crate::collision::{BlockQuery, EPS, rect_collides, support_beneath};
use crate::config::PhysicsConfig;

/// Errors raised while advancing the actor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotionError {
    #[error("non-finite motion: position {position:?}, velocity {velocity:?}")]
    NonFinite { position: Vec2, velocity: Vec2 },
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f32),
    #[error("invalid physics config: {0}")]
    InvalidConfig(String),
}

/// Outcome of a swept move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub position: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Move a unit box from `start` by `delta` in equal sub-steps, stopping each
/// axis at the first solid cell in its way.
///
/// Each sub-step tries the diagonal, then horizontal only, then vertical only.
/// An axis that gets rejected stops contributing for the rest of the sweep.
/// A blocked axis is snapped to the cell boundary it is touching when that
/// position is free. The result never overlaps a solid cell as long as
/// `start` didn't.
pub fn sweep(
    world: &mut impl BlockQuery,
    start: Vec2,
    delta: Vec2,
    substeps_per_cell: f32,
) -> Sweep {
    let longest = delta.x.abs().max(delta.y.abs());
    let steps = (longest * substeps_per_cell).ceil().max(1.0) as u32;
    let mut step = delta / steps as f32;
    let mut position = start;
    let mut blocked_x = false;
    let mut blocked_y = false;

    for _ in 0..steps {
        if step == Vec2::ZERO {
            break;
        }
        let diagonal = position + step;
        if !rect_collides(world, diagonal) {
            position = diagonal;
            continue;
        }
        let horizontal = position + Vec2::new(step.x, 0.0);
        if step.x != 0.0 && !rect_collides(world, horizontal) {
            position = horizontal;
            blocked_y = true;
            step.y = 0.0;
            continue;
        }
        let vertical = position + Vec2::new(0.0, step.y);
        if step.y != 0.0 && !rect_collides(world, vertical) {
            position = vertical;
            blocked_x = true;
            step.x = 0.0;
            continue;
        }
        blocked_x |= step.x != 0.0;
        blocked_y |= step.y != 0.0;
        break;
    }

    if blocked_x {
        let snapped = Vec2::new(snap(position.x, delta.x), position.y);
        if !rect_collides(world, snapped) {
            position = snapped;
        }
    }
    if blocked_y {
        let snapped = Vec2::new(position.x, snap(position.y, delta.y));
        if !rect_collides(world, snapped) {
            position = snapped;
        }
    }

    Sweep {
        position,
        blocked_x,
        blocked_y,
    }
}

/// Nearest cell boundary in the direction of travel.
fn snap(coord: f32, direction: f32) -> f32 {
    if direction > 0.0 {
        (coord - EPS).ceil()
    } else {
        (coord + EPS).floor()
    }
}

/// Integrates actor motion one tick at a time.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: PhysicsConfig,
}

impl Resolver {
    pub fn new(config: PhysicsConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance `actor` by `dt` seconds under `input` and return its new state.
    ///
    /// Reads the world through `BlockQuery` only.
    pub fn step(
        &self,
        actor: &Actor,
        world: &mut impl BlockQuery,
        dt: f32,
        input: InputState,
    ) -> Result<Actor, MotionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(MotionError::InvalidTimeStep(dt));
        }
        check_finite(actor)?;

        let c = &self.config;
        let mut next = *actor;

        if next.grounded && input.jump {
            next.velocity.y = c.jump_impulse;
            next.grounded = false;
        }
        next.velocity.x = f32::from(input.horizontal()) * c.walk_speed;
        next.velocity.y = (next.velocity.y - c.gravity * dt).max(-c.max_fall_speed);

        let delta = next.velocity * dt;
        let moved = sweep(world, next.position, delta, c.substeps_per_cell);
        next.position = moved.position;

        let landed = moved.blocked_y && next.velocity.y < 0.0;
        next.grounded = landed || support_beneath(world, next.position);

        if moved.blocked_y || (next.grounded && next.velocity.y < 0.0) {
            next.velocity.y = 0.0;
        }
        if moved.blocked_x {
            next.velocity.x = 0.0;
        }

        check_finite(&next)?;
        Ok(next)
    }
}

fn check_finite(actor: &Actor) -> Result<(), MotionError> {
    if actor.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonFinite {
            position: actor.position,
            velocity: actor.velocity,
        })
    }
}
