// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::{debug, warn};

use super::World;
use crate::error::EntityError;
use crate::ident::UniversalId;
use crate::record::{effective_radius, EntityDesc, EntityRecord};
use crate::status::{EntityStatus, ScanClass};
use crate::telemetry::Diagnostic;

/// Entry or exit deferred to the start of the next tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LifecycleEvent {
    /// Move an inactive entity into the world.
    Enter(UniversalId),
    /// Take an entity out of the world.
    Exit(UniversalId),
}

/// Result of walking an owner chain.
enum RootWalk {
    NoOwner,
    Root(UniversalId),
    TooDeep,
}

impl World {
    /// Creates an inactive entity from `desc`. It joins the spatial lists on
    /// [`World::enter_world`].
    pub fn spawn(&mut self, desc: EntityDesc) -> Result<UniversalId, EntityError> {
        let Some(id) = self.table.next_id() else {
            warn!(limit = self.config.max_entities, "entity handle space exhausted");
            return Err(EntityError::HandleSpaceExhausted { limit: self.config.max_entities });
        };
        let radius = desc.geometry.collision_radius;
        self.table.insert(EntityRecord::from_desc(id, desc, self.universal_time));
        if effective_radius(radius) <= 0.0 {
            self.instrumentation.record(Diagnostic::DegenerateRadius { id, radius });
        }
        self.instrumentation.record_spawn(self.table.live());
        debug!(%id, "spawned");
        Ok(id)
    }

    /// Links an inactive entity into all three axis lists, its region, and
    /// (if it carries a beacon code) the beacon list.
    ///
    /// Each axis insertion walks from the owner's node when the owner is in
    /// the world, since sub-entities and launched objects appear next to it.
    pub fn enter_world(&mut self, id: UniversalId) -> Result<(), EntityError> {
        let Some(record) = self.table.get(id) else {
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return Err(EntityError::StaleHandle(id));
        };
        if record.status != EntityStatus::Inactive {
            return Err(EntityError::InvalidTransition {
                id,
                from: record.status,
                to: EntityStatus::Active,
            });
        }
        let hint = self.owner(id).map(|owner| owner.node());
        let node = id.node();

        let mut steps = 0;
        for list in &mut self.axes {
            let hint = hint.filter(|&h| list.contains(h));
            match list.insert(&self.table, node, hint) {
                Some(walked) => steps += walked as u64,
                None => debug!(%id, axis = ?list.axis(), "already linked on enter"),
            }
        }

        let previous = self.table.get(id).and_then(|r| r.region);
        let position = self.table.get(id).map(EntityRecord::position).unwrap_or_default();
        let (tag, _) = self.regions.assign(id, previous, &position);
        let mut beacon = false;
        if let Some(record) = self.table.get_mut(id) {
            record.status = EntityStatus::Active;
            record.region = Some(tag);
            beacon = record.is_beacon();
        }
        if beacon {
            self.beacons.insert(&self.table, node);
        }

        let stats = self.instrumentation.stats_mut();
        stats.entered += 1;
        stats.insert_steps += steps;
        debug!(%id, steps, "entered world");
        Ok(())
    }

    /// Unlinks `id` from every list and marks it dead. The slot is recycled
    /// when the next tick begins, so the handle stays unambiguous for the
    /// rest of this tick.
    ///
    /// Returns `false` (changing nothing) when the entity is already dead or
    /// the handle is stale; a second exit is therefore harmless.
    pub fn exit_world(&mut self, id: UniversalId) -> bool {
        let Some(status) = self.table.get(id).map(|r| r.status) else {
            debug!(%id, "exit ignored: stale handle");
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return false;
        };
        if status == EntityStatus::Dead {
            debug!(%id, "exit ignored: already dead");
            return false;
        }

        let node = id.node();
        if status.is_in_world() {
            for list in &mut self.axes {
                if !list.remove(node) {
                    let axis = list.axis();
                    self.instrumentation.record(Diagnostic::UnlinkedAxisOperation { id, axis });
                }
            }
        }
        self.beacons.remove(node);
        if let Some(record) = self.table.get_mut(id) {
            if let Some(tag) = record.region.take() {
                self.regions.remove(id, tag);
            }
            record.status = EntityStatus::Dead;
        }
        self.dead.push(id);
        self.instrumentation.stats_mut().exited += 1;
        debug!(%id, "exited world");
        true
    }

    /// Defers an entry or exit to the start of the next tick.
    pub fn queue(&mut self, event: LifecycleEvent) {
        self.pending.push_back(event);
    }

    /// Events waiting for the next tick.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    pub(super) fn apply_pending(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            match event {
                LifecycleEvent::Enter(id) => {
                    if let Err(err) = self.enter_world(id) {
                        warn!(%id, %err, "queued world entry dropped");
                    }
                }
                LifecycleEvent::Exit(id) => {
                    self.exit_world(id);
                }
            }
        }
    }

    /// Stores a weak owner handle (or clears it with `None`). The owner must
    /// be alive now; nothing keeps it alive later.
    pub fn set_owner(
        &mut self,
        id: UniversalId,
        owner: Option<UniversalId>,
    ) -> Result<(), EntityError> {
        if !self.is_alive(id) {
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return Err(EntityError::StaleHandle(id));
        }
        if let Some(owner) = owner {
            if !self.is_alive(owner) {
                return Err(EntityError::UnknownOwner(owner));
            }
        }
        if let Some(record) = self.table.get_mut(id) {
            record.owner = owner;
        }
        Ok(())
    }

    /// Owner of `id`, or `None` when it has none or the owner is gone.
    pub fn owner(&self, id: UniversalId) -> Option<UniversalId> {
        let owner = self.table.get(id)?.owner?;
        self.is_alive(owner).then_some(owner)
    }

    /// Owner of `id` when `id` is a sub-entity of it.
    pub fn parent_entity(&self, id: UniversalId) -> Option<UniversalId> {
        let record = self.table.get(id)?;
        if record.flags.is_sub_entity {
            self.owner(id)
        } else {
            None
        }
    }

    /// Top of the ownership chain: starts at `id`'s owner and keeps climbing
    /// while the current entity is a sub-entity with a live owner.
    ///
    /// Returns `None` when `id` has no live owner, or when the walk exceeds
    /// `max_owner_depth` (a cycle, usually); the latter is recorded as a
    /// diagnostic.
    pub fn root_owner(&mut self, id: UniversalId) -> Option<UniversalId> {
        match self.walk_owner_chain(id) {
            RootWalk::NoOwner => None,
            RootWalk::Root(root) => Some(root),
            RootWalk::TooDeep => {
                self.report_deep_chain(id);
                None
            }
        }
    }

    /// Entity that `id` collides on behalf of: its root owner for
    /// sub-entities, itself otherwise.
    pub(super) fn collision_root(&mut self, id: UniversalId) -> UniversalId {
        let is_sub = self.table.get(id).is_some_and(|r| r.flags.is_sub_entity);
        if !is_sub {
            return id;
        }
        self.root_owner(id).unwrap_or(id)
    }

    /// Sets the scan class.
    pub fn set_scan_class(&mut self, id: UniversalId, class: ScanClass) -> bool {
        match self.table.get_mut(id) {
            Some(record) => {
                record.scan_class = class;
                true
            }
            None => {
                self.instrumentation.record(Diagnostic::StaleHandle(id));
                false
            }
        }
    }

    /// Sets the scan class from its `CLASS_*` name. Unknown names coerce to
    /// [`ScanClass::DEFAULT`] and are recorded.
    pub fn set_scan_class_name(&mut self, id: UniversalId, name: &str) -> bool {
        let class = ScanClass::from_name(name).unwrap_or_else(|| {
            self.instrumentation
                .record(Diagnostic::UnknownScanClass { id, name: name.to_owned() });
            ScanClass::from_name_lossy(name)
        });
        self.set_scan_class(id, class)
    }

    /// Parses a status read from outside the world. Unknown names coerce to
    /// [`EntityStatus::DEFAULT`] and are recorded.
    pub fn parse_status(&mut self, name: &str) -> EntityStatus {
        EntityStatus::from_name(name).unwrap_or_else(|| {
            self.instrumentation.record(Diagnostic::UnknownStatus { name: name.to_owned() });
            EntityStatus::from_name_lossy(name)
        })
    }

    fn walk_owner_chain(&self, id: UniversalId) -> RootWalk {
        let Some(mut current) = self.owner(id) else {
            return RootWalk::NoOwner;
        };
        let mut depth = 1;
        loop {
            let is_sub = self.table.get(current).is_some_and(|r| r.flags.is_sub_entity);
            let next = if is_sub { self.owner(current) } else { None };
            let Some(next) = next else {
                return RootWalk::Root(current);
            };
            if depth >= self.config.max_owner_depth {
                return RootWalk::TooDeep;
            }
            depth += 1;
            current = next;
        }
    }

    fn report_deep_chain(&mut self, id: UniversalId) {
        let depth = self.config.max_owner_depth;
        warn!(%id, depth, "owner chain too deep; treating as ownerless");
        self.instrumentation.record(Diagnostic::OwnerChainTooDeep { id, depth });
    }
}
