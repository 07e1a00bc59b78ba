//! Replication dirty-mark registry.
//!
//! Fields flagged here are shipped to observers by
//! [`flush_dirty_fields`](crate::systems::replication::flush_dirty_fields)
//! at the end of the tick. Marking the same field twice before a flush
//! still produces a single delta.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Resource, Debug, Default)]
pub struct DirtyFields {
    pending: FxHashMap<Entity, FxHashSet<&'static str>>,
    marks: u64,
}

impl DirtyFields {
    /// Flag `field` of `entity` for replication.
    pub fn mark(&mut self, entity: Entity, field: &'static str) {
        self.marks += 1;
        self.pending.entry(entity).or_default().insert(field);
    }

    pub fn is_dirty(&self, entity: Entity, field: &'static str) -> bool {
        self.pending
            .get(&entity)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Total number of [`mark`](Self::mark) calls since creation.
    pub fn total_marks(&self) -> u64 {
        self.marks
    }

    /// Number of distinct (entity, field) pairs waiting for a flush.
    pub fn pending_len(&self) -> usize {
        self.pending.values().map(|fields| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending (entity, field) pair, leaving the registry empty.
    /// Pairs come out in entity spawn order, then by field name.
    pub fn drain(&mut self) -> Vec<(Entity, &'static str)> {
        let mut drained: Vec<(Entity, &'static str)> = self
            .pending
            .drain()
            .flat_map(|(entity, fields)| fields.into_iter().map(move |field| (entity, field)))
            .collect();
        // Spawn order, so the wire is deterministic across runs.
        drained.sort_by_key(|&(entity, field)| (entity.index(), entity.to_bits(), field));
        drained
    }
}
