//! # LayeredStore — Partitioned Component Storage
//!
//! A dual-key variant of [`SparseStore`](super::store::SparseStore): each
//! entry is filed under a secondary [`PartitionKey`] in addition to its
//! entity. Entries sharing a key live in one contiguous partition, so
//! iterating "all visible views on layer N" walks exactly that partition
//! instead of filtering the whole store.
//!
//! ```text
//! partitions[0]: [ (E1, a), (E4, d) ]      key 0
//! partitions[1]: [ ]                        key 1
//! partitions[2]: [ (E2, b) ]                key 2
//! sparse: { 1 → (0,0), 4 → (0,1), 2 → (2,0) }
//! ```
//!
//! [`reclassify`](LayeredStore::reclassify) moves an entry between partitions
//! in O(1) amortized: swap-remove from the source, push onto the destination.
//! That makes visibility toggles and layer changes cheap no matter how large
//! the store grows. An entity appears in at most one partition at a time.
//!
//! Iteration is index-based over one partition. Structural mutation of other
//! partitions while a partition is being iterated is safe under the phase
//! model; mutating the partition being iterated is out of contract.

use std::collections::HashMap;

use super::entity::Entity;

/// A secondary key with a small fixed number of values, each mapped to a
/// dense partition index.
pub trait PartitionKey: Copy + Eq {
    /// Total number of partitions.
    const COUNT: usize;

    /// Dense index of this key, in `0..Self::COUNT`.
    fn partition(self) -> usize;
}

/// Component storage partitioned by a secondary key.
pub struct LayeredStore<K: PartitionKey, T> {
    partitions: Vec<Vec<(Entity, T)>>,
    /// Entity slot index → (key, position within its partition).
    sparse: HashMap<u32, (K, usize)>,
}

impl<K: PartitionKey, T> LayeredStore<K, T> {
    pub fn new() -> Self {
        Self {
            partitions: (0..K::COUNT).map(|_| Vec::new()).collect(),
            sparse: HashMap::new(),
        }
    }

    /// Insert a component for `entity` under `key`, replacing any existing
    /// entry (whatever partition it was in).
    pub fn set(&mut self, entity: Entity, key: K, value: T) {
        match self.sparse.get(&entity.index()).copied() {
            Some((old_key, slot)) if self.partitions[old_key.partition()][slot].0 == entity => {
                if old_key == key {
                    self.partitions[key.partition()][slot].1 = value;
                } else {
                    self.remove_at(old_key, slot);
                    self.push(entity, key, value);
                }
            }
            Some((old_key, slot)) => {
                // Stale generation still occupying the slot: evict it.
                self.remove_at(old_key, slot);
                self.push(entity, key, value);
            }
            None => self.push(entity, key, value),
        }
    }

    fn push(&mut self, entity: Entity, key: K, value: T) {
        let partition = &mut self.partitions[key.partition()];
        self.sparse.insert(entity.index(), (key, partition.len()));
        partition.push((entity, value));
    }

    /// Swap-remove from a partition and patch the moved entry's sparse slot.
    fn remove_at(&mut self, key: K, slot: usize) -> T {
        let partition = &mut self.partitions[key.partition()];
        let (entity, value) = partition.swap_remove(slot);
        self.sparse.remove(&entity.index());
        if let Some((moved, _)) = partition.get(slot) {
            self.sparse.insert(moved.index(), (key, slot));
        }
        value
    }

    fn locate(&self, entity: Entity) -> Option<(K, usize)> {
        let &(key, slot) = self.sparse.get(&entity.index())?;
        (self.partitions[key.partition()][slot].0 == entity).then_some((key, slot))
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        let (key, slot) = self.locate(entity)?;
        Some(&self.partitions[key.partition()][slot].1)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let (key, slot) = self.locate(entity)?;
        Some(&mut self.partitions[key.partition()][slot].1)
    }

    /// The key an entity is currently filed under.
    pub fn key_of(&self, entity: Entity) -> Option<K> {
        self.locate(entity).map(|(key, _)| key)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.locate(entity).is_some()
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let (key, slot) = self.locate(entity)?;
        Some(self.remove_at(key, slot))
    }

    /// Move an entity's entry to a new partition, preserving the value.
    ///
    /// Returns `false` (and does nothing) if the entity has no entry. A
    /// reclassify onto the current key is a no-op.
    pub fn reclassify(&mut self, entity: Entity, new_key: K) -> bool {
        let Some((old_key, slot)) = self.locate(entity) else {
            return false;
        };
        if old_key == new_key {
            return true;
        }
        let value = self.remove_at(old_key, slot);
        self.push(entity, new_key, value);
        true
    }

    /// Iterate `(Entity, &T)` over one partition.
    pub fn iter(&self, key: K) -> impl Iterator<Item = (Entity, &T)> {
        self.partitions[key.partition()].iter().map(|(e, v)| (*e, v))
    }

    /// Iterate `(Entity, &T)` over every partition, in partition order.
    pub fn iter_all(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.partitions
            .iter()
            .flat_map(|p| p.iter().map(|(e, v)| (*e, v)))
    }

    /// Number of entries filed under `key`.
    pub fn len_in(&self, key: K) -> usize {
        self.partitions[key.partition()].len()
    }

    /// Total number of entries across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.iter().all(Vec::is_empty)
    }
}

impl<K: PartitionKey, T> Default for LayeredStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityAllocator;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Bin {
        A,
        B,
        C,
    }

    impl PartitionKey for Bin {
        const COUNT: usize = 3;

        fn partition(self) -> usize {
            match self {
                Bin::A => 0,
                Bin::B => 1,
                Bin::C => 2,
            }
        }
    }

    fn entities(n: usize) -> Vec<Entity> {
        let mut alloc = EntityAllocator::new();
        (0..n).map(|_| alloc.allocate()).collect()
    }

    #[test]
    fn set_files_under_key() {
        let e = entities(3);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 1);
        store.set(e[1], Bin::B, 2);
        store.set(e[2], Bin::A, 3);

        assert_eq!(store.len_in(Bin::A), 2);
        assert_eq!(store.len_in(Bin::B), 1);
        assert_eq!(store.len_in(Bin::C), 0);
        assert_eq!(store.get(e[1]), Some(&2));
        assert_eq!(store.key_of(e[2]), Some(Bin::A));
    }

    #[test]
    fn set_with_new_key_moves_partitions() {
        let e = entities(1);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 1);
        store.set(e[0], Bin::C, 2);

        assert_eq!(store.len_in(Bin::A), 0);
        assert_eq!(store.len_in(Bin::C), 1);
        assert_eq!(store.get(e[0]), Some(&2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reclassify_moves_between_partitions() {
        let e = entities(4);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 'w');
        store.set(e[1], Bin::A, 'x');
        store.set(e[2], Bin::A, 'y');
        store.set(e[3], Bin::B, 'z');

        assert!(store.reclassify(e[1], Bin::B));

        // Source partition no longer yields the moved entity.
        let in_a: Vec<Entity> = store.iter(Bin::A).map(|(e, _)| e).collect();
        assert_eq!(in_a.len(), 2);
        assert!(!in_a.contains(&e[1]));

        // Destination yields it exactly once, value intact.
        let in_b: Vec<(Entity, char)> = store.iter(Bin::B).map(|(e, v)| (e, *v)).collect();
        assert_eq!(in_b.iter().filter(|(ent, _)| *ent == e[1]).count(), 1);
        assert_eq!(store.get(e[1]), Some(&'x'));

        // Swapped survivors in the source still resolve.
        assert_eq!(store.get(e[0]), Some(&'w'));
        assert_eq!(store.get(e[2]), Some(&'y'));
    }

    #[test]
    fn reclassify_same_key_is_noop() {
        let e = entities(1);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 1);
        assert!(store.reclassify(e[0], Bin::A));
        assert_eq!(store.len_in(Bin::A), 1);
        assert_eq!(store.get(e[0]), Some(&1));
    }

    #[test]
    fn reclassify_missing_returns_false() {
        let e = entities(1);
        let mut store: LayeredStore<Bin, i32> = LayeredStore::new();
        assert!(!store.reclassify(e[0], Bin::B));
    }

    #[test]
    fn remove_patches_partition() {
        let e = entities(3);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 1);
        store.set(e[1], Bin::A, 2);
        store.set(e[2], Bin::A, 3);

        assert_eq!(store.remove(e[0]), Some(1));
        assert_eq!(store.get(e[2]), Some(&3));
        assert_eq!(store.len_in(Bin::A), 2);
    }

    #[test]
    fn iter_all_covers_every_partition() {
        let e = entities(3);
        let mut store = LayeredStore::new();
        store.set(e[0], Bin::A, 1);
        store.set(e[1], Bin::B, 2);
        store.set(e[2], Bin::C, 3);
        let mut values: Vec<i32> = store.iter_all().map(|(_, v)| *v).collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
