// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dense slot table owning entity records.
//!
//! Slots are addressed by [`UniversalId::index`]; a handle resolves only
//! while its generation matches the slot. Released slots wait in a
//! `released` list until [`EntityTable::recycle`] runs at the start of the
//! next tick, so a handle that still appears in this tick's results is never
//! handed to a new entity.

use crate::beacon::BeaconCodes;
use crate::ident::UniversalId;
use crate::record::EntityRecord;
use crate::spatial::{Axis, AxisCoordinates};

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    record: Option<EntityRecord>,
}

/// Slot table plus free-list bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct EntityTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    released: Vec<u32>,
    limit: u32,
    live: usize,
}

impl EntityTable {
    pub(crate) fn new(limit: u32) -> Self {
        Self { slots: Vec::new(), free: Vec::new(), released: Vec::new(), limit, live: 0 }
    }

    /// Next handle that [`Self::insert`] would issue, or `None` when full.
    pub(crate) fn next_id(&self) -> Option<UniversalId> {
        if let Some(&index) = self.free.last() {
            let generation = self.slots[index as usize].generation;
            return Some(UniversalId::new(index, generation));
        }
        let index = u32::try_from(self.slots.len()).ok()?;
        (index < self.limit).then(|| UniversalId::new(index, 0))
    }

    /// Stores `record` under the handle from [`Self::next_id`].
    pub(crate) fn insert(&mut self, record: EntityRecord) {
        let id = record.id;
        if self.free.last() == Some(&id.index()) {
            self.free.pop();
        } else {
            self.slots.push(Slot::default());
        }
        self.slots[id.node()].record = Some(record);
        self.live += 1;
    }

    /// Removes the record and bumps the slot generation. The slot becomes
    /// reusable after the next [`Self::recycle`].
    pub(crate) fn release(&mut self, id: UniversalId) -> Option<EntityRecord> {
        let slot = self.slots.get_mut(id.node())?;
        if slot.generation != id.generation() {
            return None;
        }
        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.released.push(id.index());
        self.live -= 1;
        Some(record)
    }

    /// Makes slots released before this call available again.
    pub(crate) fn recycle(&mut self) {
        // Lowest indices are reused first.
        self.free.append(&mut self.released);
        self.free.sort_unstable_by(|a, b| b.cmp(a));
    }

    pub(crate) fn get(&self, id: UniversalId) -> Option<&EntityRecord> {
        let slot = self.slots.get(id.node())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.record.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: UniversalId) -> Option<&mut EntityRecord> {
        let slot = self.slots.get_mut(id.node())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.record.as_mut()
    }

    pub(crate) fn at(&self, node: usize) -> Option<&EntityRecord> {
        self.slots.get(node).and_then(|s| s.record.as_ref())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.slots.iter().filter_map(|s| s.record.as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityRecord> + '_ {
        self.slots.iter_mut().filter_map(|s| s.record.as_mut())
    }

    pub(crate) const fn live(&self) -> usize {
        self.live
    }

    /// Slots ever allocated; every node index is below this.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl AxisCoordinates for EntityTable {
    fn coordinate(&self, node: usize, axis: Axis) -> f64 {
        self.at(node).map_or(0.0, |r| r.position().component(axis.index()))
    }
}

impl BeaconCodes for EntityTable {
    fn beacon_code(&self, node: usize) -> &str {
        self.at(node).and_then(EntityRecord::beacon_code).unwrap_or("")
    }
}
