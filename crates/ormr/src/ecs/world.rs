//! # World — The Explicit Context Object
//!
//! The [`World`] owns the entity allocator and one store per component kind.
//! Every updater takes `&mut World` (or `&World` for the draw pass); there
//! are no ambient singletons, so tests build as many isolated worlds as they
//! like.
//!
//! The component set is fixed: Transform, Movement, Animation, and View.
//! Stores are public fields; attaching a component is a direct
//! `world.transforms.set(entity, ...)`. Convenience methods cover the
//! cross-store operations (despawn, visibility and layer changes).
//!
//! Timers live here too: any setup code can append to `world.timers`, and
//! the frame driver ticks the whole collection once per fixed step.

use crate::animation::Animation;
use crate::ecs::entity::{Entity, EntityAllocator};
use crate::ecs::layered::LayeredStore;
use crate::ecs::store::SparseStore;
use crate::movement::Movement;
use crate::timer::TimerScheduler;
use crate::transform::Transform;
use crate::view::{Layer, View, ViewKey};

/// All entity and component state for one running game.
pub struct World {
    allocator: EntityAllocator,
    pub transforms: SparseStore<Transform>,
    pub movements: SparseStore<Movement>,
    pub animations: SparseStore<Animation>,
    pub views: LayeredStore<ViewKey, View>,
    pub timers: TimerScheduler,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            transforms: SparseStore::new(),
            movements: SparseStore::new(),
            animations: SparseStore::new(),
            views: LayeredStore::new(),
            timers: TimerScheduler::new(),
        }
    }

    /// Allocate a fresh entity with no components.
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Remove an entity and every component attached to it, recycling its
    /// slot. Returns `false` if the handle was already stale.
    ///
    /// Timers are not entity-keyed and are unaffected; a timer that
    /// references a despawned entity sees its lookups miss.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.allocator.deallocate(entity) {
            return false;
        }
        self.transforms.remove(entity);
        self.movements.remove(entity);
        self.animations.remove(entity);
        self.views.remove(entity);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Toggle whether an entity's view is drawn, moving it between the
    /// hidden and visible partitions of its current layer. Returns `false`
    /// if the entity has no view.
    pub fn set_visible(&mut self, entity: Entity, visible: bool) -> bool {
        let Some(key) = self.views.key_of(entity) else {
            return false;
        };
        self.views.reclassify(entity, ViewKey { visible, ..key })
    }

    /// Move an entity's view to a different layer, preserving visibility.
    /// Returns `false` if the entity has no view.
    pub fn set_layer(&mut self, entity: Entity, layer: Layer) -> bool {
        let Some(key) = self.views.key_of(entity) else {
            return false;
        };
        self.views.reclassify(entity, ViewKey { layer, ..key })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Rect, Vec2};
    use crate::render::{Sprite, TextureHandle};
    use crate::transform::Pose;

    fn test_view() -> View {
        View::new(Sprite::new(
            TextureHandle(0),
            Rect::new(0.0, 0.0, 8.0, 8.0),
        ))
    }

    #[test]
    fn despawn_removes_all_components() {
        let mut world = World::new();
        let e = world.spawn();
        world.transforms.set(e, Transform::local(Pose::IDENTITY));
        world.movements.set(e, Movement::heading(Vec2::ONE));
        world
            .views
            .set(e, ViewKey::visible(Layer::Playfield), test_view());

        assert!(world.despawn(e));

        assert!(!world.is_alive(e));
        assert!(world.transforms.get(e).is_none());
        assert!(world.movements.get(e).is_none());
        assert!(world.views.get(e).is_none());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn despawn_stale_handle_is_rejected() {
        let mut world = World::new();
        let e = world.spawn();
        assert!(world.despawn(e));
        assert!(!world.despawn(e));
    }

    #[test]
    fn recycled_slot_does_not_alias_old_components() {
        let mut world = World::new();
        let old = world.spawn();
        world.transforms.set(old, Transform::local(Pose::from_xy(1.0, 1.0)));
        world.despawn(old);

        let fresh = world.spawn();
        assert_eq!(fresh.index(), old.index());
        assert!(world.transforms.get(fresh).is_none());
        assert!(world.transforms.get(old).is_none());
    }

    #[test]
    fn set_visible_moves_partition() {
        let mut world = World::new();
        let e = world.spawn();
        world
            .views
            .set(e, ViewKey::visible(Layer::Playfield), test_view());

        assert!(world.set_visible(e, false));

        assert_eq!(world.views.len_in(ViewKey::visible(Layer::Playfield)), 0);
        assert_eq!(world.views.len_in(ViewKey::hidden(Layer::Playfield)), 1);
        // The entry itself survives the move.
        assert!(world.views.get(e).is_some());
    }

    #[test]
    fn set_layer_preserves_visibility() {
        let mut world = World::new();
        let e = world.spawn();
        world
            .views
            .set(e, ViewKey::hidden(Layer::BackgroundFar), test_view());

        assert!(world.set_layer(e, Layer::ForegroundNear));

        let key = world.views.key_of(e).unwrap();
        assert_eq!(key.layer, Layer::ForegroundNear);
        assert!(!key.visible);
    }

    #[test]
    fn view_helpers_without_view_return_false() {
        let mut world = World::new();
        let e = world.spawn();
        assert!(!world.set_visible(e, true));
        assert!(!world.set_layer(e, Layer::Playfield));
    }
}
