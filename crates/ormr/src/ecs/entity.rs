//! # Entity — Lightweight Identifiers for Game Objects
//!
//! An [`Entity`] is just a number. It doesn't "contain" anything; the stores
//! in [`World`](super::world::World) map entities to their component data.
//! Keeping identity separate from data is what lets an entity carry any
//! subset of the component kinds.
//!
//! ## Generational Indices
//!
//! A bare incrementing counter breaks once entities are destroyed and slots
//! are recycled: a stale handle saved before the despawn would silently refer
//! to the new occupant. Pairing each slot index with a generation counter
//! fixes that. Recycling a slot bumps its generation, so any old handle
//! (carrying the old generation) fails lookups safely instead of aliasing a
//! stranger.
//!
//! ```text
//! Entity { index: 5, generation: 0 }   original
//! Entity { index: 5, generation: 1 }   after recycle
//! ```

use std::fmt;

/// A handle identifying a game object. Cheap to copy, safe to hold across
/// despawns (lookups with a stale handle return `None`).
///
/// Create via [`World::spawn`](super::world::World::spawn); an `Entity` is
/// only meaningful for the `World` that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Slot index in the allocator, recycled on despawn.
    pub(crate) index: u32,
    /// Bumped each time the slot is reused, so stale handles are detectable.
    pub(crate) generation: u32,
}

impl Entity {
    /// Raw slot index. Useful for diagnostics, not for general use.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation counter of this handle.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Issues entity handles and recycles despawned slots.
///
/// Spawning pops a free slot if one exists (its generation was already bumped
/// on despawn), otherwise grows a fresh slot at the end.
pub(crate) struct EntityAllocator {
    /// Generation per slot ever allocated, indexed by `Entity::index`.
    generations: Vec<u32>,
    /// Despawned slot indices available for reuse.
    free_list: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free_list.pop() {
            let generation = self.generations[index as usize];
            Entity { index, generation }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Release an entity's slot for reuse. Returns `false` if the handle was
    /// already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        if idx < self.generations.len() && self.generations[idx] == entity.generation {
            self.generations[idx] += 1;
            self.free_list.push(entity.index);
            true
        } else {
            false
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len() && self.generations[idx] == entity.generation
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_eq!(e0.index(), 0);
        assert_eq!(e1.index(), 1);
        assert_eq!(e0.generation(), 0);
    }

    #[test]
    fn recycle_bumps_generation() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));
        let reused = alloc.allocate();
        assert_eq!(reused.index(), 0);
        assert_eq!(reused.generation(), 1);
    }

    #[test]
    fn stale_handle_detected() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.is_alive(e0));
        alloc.deallocate(e0);
        assert!(!alloc.is_alive(e0));
    }

    #[test]
    fn double_free_returns_false() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));
        assert!(!alloc.deallocate(e0));
    }

    #[test]
    fn alive_count_tracks_spawn_and_despawn() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let _e1 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        alloc.deallocate(e0);
        assert_eq!(alloc.alive_count(), 1);
    }
}
