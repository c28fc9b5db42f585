//! Per-tick velocity and rotation updates.
//!
//! A [`Movement`] component steers an entity's *local* pose: a heading or a
//! seek target for position, and an optional spin rate for rotation. The
//! updater runs once per fixed tick, before transform resolution, so freshly
//! moved locals propagate down parent chains in the same tick.

use crate::ecs::world::World;
use crate::math::Vec2;

/// How an entity's position changes each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// Constant-velocity heading, in units per second.
    Relative(Vec2),
    /// Seek toward a target at the given speed, recomputed every tick from
    /// the current position. There are no arrival semantics: the entity
    /// overshoots and oscillates around the target rather than stopping.
    Absolute { target: Vec2, speed: f32 },
}

/// Steers the local pose of an entity that also has a Transform. Entities
/// without a Transform are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Movement {
    pub direction: Option<Direction>,
    /// Degrees per second added to local rotation.
    pub rotation_rate: Option<f32>,
}

impl Movement {
    /// Constant-velocity motion.
    pub fn heading(velocity: Vec2) -> Self {
        Self {
            direction: Some(Direction::Relative(velocity)),
            rotation_rate: None,
        }
    }

    /// Seek toward `target` at `speed` units per second.
    pub fn seek(target: Vec2, speed: f32) -> Self {
        Self {
            direction: Some(Direction::Absolute { target, speed }),
            rotation_rate: None,
        }
    }

    /// Rotation only, no translation.
    pub fn spin(rate: f32) -> Self {
        Self {
            direction: None,
            rotation_rate: Some(rate),
        }
    }

    /// Return a copy that also spins at `rate` degrees per second.
    pub fn with_spin(mut self, rate: f32) -> Self {
        self.rotation_rate = Some(rate);
        self
    }
}

/// Apply every Movement component to its entity's local pose.
///
/// The rotation rate turns the local frame whether the transform is `Local`
/// or `ParentRelative`; for children the global effect lands after the next
/// resolver pass.
pub fn update_movement(world: &mut World, dt: f32) {
    let World {
        movements,
        transforms,
        ..
    } = world;

    for (entity, movement) in movements.iter() {
        let Some(transform) = transforms.get_mut(entity) else {
            continue;
        };
        let pose = transform.pose_mut();

        match movement.direction {
            Some(Direction::Relative(velocity)) => {
                pose.position += velocity * dt;
            }
            Some(Direction::Absolute { target, speed }) => {
                // normalize_or_zero keeps the exactly-on-target case finite.
                let toward = (target - pose.position).normalize_or_zero();
                pose.position += toward * speed * dt;
            }
            None => {}
        }

        if let Some(rate) = movement.rotation_rate {
            pose.rotation += rate * dt;
        }
    }
}
