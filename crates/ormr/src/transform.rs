//! # Transform — Local and Parent-Relative Placement
//!
//! A [`Transform`] places an entity in the world. It is a sum type with two
//! shapes:
//!
//! - [`Transform::Local`]: the entity's [`Pose`] *is* its world placement.
//!   The movement updater mutates it directly. No global cache exists for
//!   these, by construction.
//! - [`Transform::ParentRelative`]: the pose is expressed in the parent's
//!   local space, with a non-owning back-reference to the parent entity and
//!   a cached global pose recomputed every fixed tick by
//!   [`resolve_transforms`].
//!
//! Parent links form a forest. There is no cycle detection: a cyclic parent
//! graph makes the resolver recurse forever, and keeping the graph acyclic
//! is the caller's responsibility.
//!
//! ## Cache validity
//!
//! The cached global pose is valid only after a resolver pass has run since
//! the last mutation of any ancestor's local fields. Reads in between see
//! the previous tick's value. That staleness is bounded by one fixed step
//! and is tolerated; consumers that need exact values read after the
//! resolver phase.

use crate::dispatch::WorkerPool;
use crate::ecs::entity::Entity;
use crate::ecs::store::SparseStore;
use crate::ecs::world::World;
use crate::math::{Vec2, rotate_degrees};

/// Position, rotation (degrees), and scale in 2D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Pose {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// A pose at the given position.
    pub fn from_xy(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::IDENTITY
        }
    }

    /// Return a copy with the given rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Return a copy with uniform scale applied.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }

    /// Compose a child pose expressed in this pose's local space.
    ///
    /// The child position is scaled, then rotated, then translated; rotations
    /// add; scales multiply component-wise.
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position + rotate_degrees(self.scale * child.position, self.rotation),
            rotation: self.rotation + child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An entity's placement: either free-standing or relative to a parent.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    /// World-space pose, mutated directly.
    Local(Pose),
    /// Pose in the parent's local space plus the cached world-space result.
    ParentRelative {
        parent: Entity,
        local: Pose,
        /// `None` until the first successful resolver pass; afterwards the
        /// latest resolved pose, retained (stale) when the chain breaks.
        global: Option<Pose>,
    },
}

impl Transform {
    /// A free-standing transform.
    pub fn local(pose: Pose) -> Self {
        Transform::Local(pose)
    }

    /// A transform expressed relative to `parent`.
    pub fn child_of(parent: Entity, pose: Pose) -> Self {
        Transform::ParentRelative {
            parent,
            local: pose,
            global: None,
        }
    }

    /// The local pose, whichever shape the transform has.
    pub fn pose(&self) -> &Pose {
        match self {
            Transform::Local(pose) => pose,
            Transform::ParentRelative { local, .. } => local,
        }
    }

    /// Mutable access to the local pose.
    pub fn pose_mut(&mut self) -> &mut Pose {
        match self {
            Transform::Local(pose) => pose,
            Transform::ParentRelative { local, .. } => local,
        }
    }

    /// The pose to place the entity at: the local pose for `Local`
    /// transforms, the cached global pose for `ParentRelative` ones.
    pub fn resolved(&self) -> Option<Pose> {
        match self {
            Transform::Local(pose) => Some(*pose),
            Transform::ParentRelative { global, .. } => *global,
        }
    }

    /// The parent entity, if this transform has one.
    pub fn parent(&self) -> Option<Entity> {
        match self {
            Transform::Local(_) => None,
            Transform::ParentRelative { parent, .. } => Some(*parent),
        }
    }
}

/// Recursively resolve the world-space pose of `entity`.
///
/// Walks the parent chain, terminating at a `Local` transform. Returns
/// `None` if any link in the chain lacks a Transform component. Chains are
/// recomputed from local fields each pass, never from cached globals, so
/// resolution order within a pass doesn't matter.
fn resolve_pose(transforms: &SparseStore<Transform>, entity: Entity) -> Option<Pose> {
    match transforms.get(entity)? {
        Transform::Local(pose) => Some(*pose),
        Transform::ParentRelative { parent, local, .. } => {
            resolve_pose(transforms, *parent).map(|p| p.compose(local))
        }
    }
}

/// Recompute the cached global pose of every `ParentRelative` transform.
///
/// Entities with `Local` transforms are skipped outright. The per-entity
/// resolves fan out across the worker pool into a disjoint output slot per
/// entity, then a sequential pass writes the results back. A chain that
/// fails to resolve leaves the entity's cached global pose unchanged and
/// emits a debug log.
pub fn resolve_transforms(world: &mut World, pool: &WorkerPool) {
    let targets: Vec<Entity> = world
        .transforms
        .iter()
        .filter(|(_, t)| matches!(t, Transform::ParentRelative { .. }))
        .map(|(e, _)| e)
        .collect();

    let mut resolved: Vec<Option<Pose>> = vec![None; targets.len()];
    {
        let transforms = &world.transforms;
        pool.for_each_indexed(&mut resolved, |i, slot| {
            *slot = resolve_pose(transforms, targets[i]);
        });
    }

    for (entity, pose) in targets.into_iter().zip(resolved) {
        match pose {
            Some(pose) => {
                if let Some(Transform::ParentRelative { global, .. }) =
                    world.transforms.get_mut(entity)
                {
                    *global = Some(pose);
                }
            }
            None => {
                log::debug!("transform chain of {entity:?} did not resolve; keeping stale pose");
            }
        }
    }
}
