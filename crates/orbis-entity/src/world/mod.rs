// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The world: entity table, spatial lists, and the tick.
//!
//! One tick runs, in order:
//! 1. slots released by earlier exits are recycled and the per-tick colliding
//!    sets and motion flags are cleared;
//! 2. queued lifecycle events (world entry/exit) are applied;
//! 3. the [`MotionDriver`] updates every active entity, and each moved entity
//!    is re-sorted on all three axes and refiled in its region;
//! 4. the broad phase scans the sweep list and every surviving pair gets the
//!    exact close test. Colliding pairs are recorded on both records and
//!    returned in the [`TickReport`].
//!
//! Nothing in a tick blocks and nothing is shared across threads; the world
//! is driven by a single owner.

mod invariants;
mod lifecycle;
mod motion;

use std::collections::VecDeque;

use orbis_math::HpVec3;
use tracing::debug;

pub use lifecycle::LifecycleEvent;
pub use motion::{LinearMotion, MotionDriver};

use crate::beacon::{BeaconCodes, BeaconList};
use crate::broad::{close_collision, BroadPhaseScanner, CandidatePair, ScanLimits, ScanView};
use crate::config::CollisionConfig;
use crate::damage::{DamagePort, EnergyDamage};
use crate::error::EntityError;
use crate::ident::UniversalId;
use crate::record::EntityRecord;
use crate::spatial::{Axis, AxisCoordinates, RegionGrid, RegionTag, SpatialAxisList};
use crate::status::EntityStatus;
use crate::table::EntityTable;
use crate::telemetry::{Diagnostic, Instrumentation, TickStats};
use crate::tick::Tick;

/// Outcome of one [`World::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Tick that produced this report.
    pub tick: Tick,
    /// Pairs that passed the close test, sorted ascending.
    pub collisions: Vec<CandidatePair>,
    /// Work done during the tick.
    pub stats: TickStats,
}

/// Entity store with three axis-sorted lists and a sweep-and-prune broad
/// phase.
#[derive(Clone, Debug)]
pub struct World {
    config: CollisionConfig,
    table: EntityTable,
    axes: [SpatialAxisList; 3],
    beacons: BeaconList,
    regions: RegionGrid,
    scanner: BroadPhaseScanner,
    pending: VecDeque<LifecycleEvent>,
    dead: Vec<UniversalId>,
    instrumentation: Instrumentation,
    tick: Tick,
    universal_time: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

impl World {
    /// Creates an empty world. The configuration is sanitized first.
    pub fn new(config: CollisionConfig) -> Self {
        let config = config.sanitized();
        Self {
            table: EntityTable::new(config.max_entities),
            axes: Axis::ALL.map(SpatialAxisList::new),
            beacons: BeaconList::new(),
            regions: RegionGrid::new(config.region_cell_size),
            scanner: BroadPhaseScanner::default(),
            pending: VecDeque::new(),
            dead: Vec::new(),
            instrumentation: Instrumentation::default(),
            tick: Tick::default(),
            universal_time: 0.0,
            config,
        }
    }

    /// Effective configuration.
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Last completed tick (`Tick::new(0)` before the first).
    pub const fn current_tick(&self) -> Tick {
        self.tick
    }

    /// World clock in seconds.
    pub const fn universal_time(&self) -> f64 {
        self.universal_time
    }

    /// Counters and recent diagnostics.
    pub const fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    /// Record for `id`, including dead records not yet recycled.
    pub fn get(&self, id: UniversalId) -> Option<&EntityRecord> {
        self.table.get(id)
    }

    /// Whether `id` names an entity that has not left the world.
    pub fn is_alive(&self, id: UniversalId) -> bool {
        self.table.get(id).is_some_and(|r| r.status != EntityStatus::Dead)
    }

    /// Entities that are inactive or active.
    pub fn live_count(&self) -> usize {
        self.table.iter().filter(|r| r.status != EntityStatus::Dead).count()
    }

    /// Entities currently in the world.
    pub fn active_count(&self) -> usize {
        self.axes[0].len()
    }

    /// Live records in handle order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.table.iter().filter(|r| r.status != EntityStatus::Dead)
    }

    /// The sorted list for `axis`.
    pub fn axis_list(&self, axis: Axis) -> &SpatialAxisList {
        &self.axes[axis.index()]
    }

    /// Handles on `axis` in ascending order.
    pub fn axis_order(&self, axis: Axis) -> Vec<UniversalId> {
        self.axis_list(axis)
            .iter()
            .filter_map(|node| self.table.at(node))
            .map(EntityRecord::id)
            .collect()
    }

    /// Region membership index.
    pub const fn regions(&self) -> &RegionGrid {
        &self.regions
    }

    /// Seconds since `id` was spawned.
    pub fn time_elapsed_since_spawn(&self, id: UniversalId) -> Option<f64> {
        self.table.get(id).map(|r| self.universal_time - r.spawn_time)
    }

    /// Runs one tick. See the module docs for the phase order.
    pub fn tick(&mut self, dt: f64, driver: &mut impl MotionDriver) -> TickReport {
        self.begin_tick();
        self.apply_pending();
        self.advance(dt, driver);
        self.universal_time += dt;

        let candidates = self.broad_phase();
        let mut collisions = Vec::new();
        for pair in candidates {
            self.instrumentation.stats_mut().close_tests += 1;
            let (Some(a), Some(b)) = (self.table.get(pair.first()), self.table.get(pair.second()))
            else {
                continue;
            };
            if close_collision(a, b, self.config.max_range2) {
                collisions.push(pair);
            }
        }
        for pair in &collisions {
            self.mark_colliding(pair.first(), pair.second());
        }
        self.instrumentation.stats_mut().collisions += collisions.len() as u64;

        let stats = self.instrumentation.finish_tick();
        debug!(
            tick = self.tick.index(),
            active = self.active_count(),
            collisions = collisions.len(),
            "tick complete"
        );
        TickReport { tick: self.tick, collisions, stats }
    }

    /// Exact close test outside the scheduled sweep (projectiles, scripted
    /// checks). On success both records gain the other in their colliding
    /// set for the rest of the tick. Stale handles and self-pairs report
    /// `false`.
    pub fn check_close_collision(&mut self, a: UniversalId, b: UniversalId) -> bool {
        if a == b {
            return false;
        }
        if !(self.require_alive(a) && self.require_alive(b)) {
            return false;
        }
        let (Some(ra), Some(rb)) = (self.table.get(a), self.table.get(b)) else {
            return false;
        };
        let hit = close_collision(ra, rb, self.config.max_range2);
        self.instrumentation.stats_mut().close_tests += 1;
        if hit {
            self.instrumentation.stats_mut().collisions += 1;
            self.mark_colliding(a, b);
        }
        hit
    }

    /// Validates both handles and forwards an energy damage request to
    /// `port`. A dead or stale source is forwarded as "no source".
    pub fn forward_energy_damage(
        &mut self,
        port: &mut dyn DamagePort,
        target: UniversalId,
        amount: f64,
        source: Option<UniversalId>,
    ) -> Result<(), EntityError> {
        if !self.require_alive(target) {
            return Err(EntityError::StaleHandle(target));
        }
        let position = self.table.get(target).map(EntityRecord::position).unwrap_or_default();
        let source = source.filter(|&s| self.is_alive(s));
        port.take_energy_damage(EnergyDamage { target, source, amount, position });
        Ok(())
    }

    /// Active entities filed in regions overlapping the cube of half-size
    /// `radius` around `center`. Coarse: callers filter by exact distance.
    pub fn entities_near(&self, center: &HpVec3, radius: f64) -> Vec<UniversalId> {
        self.regions
            .members_near(center, radius)
            .into_iter()
            .filter(|&id| self.is_active(id))
            .collect()
    }

    /// Active entities filed under `tag`, in handle order.
    pub fn entities_in_region(&self, tag: RegionTag) -> Vec<UniversalId> {
        self.regions.members(tag).filter(|&id| self.is_active(id)).collect()
    }

    /// Beacons in code order.
    pub fn beacons(&self) -> impl Iterator<Item = UniversalId> + '_ {
        self.beacons.iter().filter_map(|node| self.table.at(node)).map(EntityRecord::id)
    }

    /// Beacon after `id` in code order.
    pub fn next_beacon(&self, id: UniversalId) -> Option<UniversalId> {
        self.table.get(id)?;
        self.beacons.next(id.node()).and_then(|n| self.table.at(n)).map(EntityRecord::id)
    }

    /// Beacon before `id` in code order.
    pub fn prev_beacon(&self, id: UniversalId) -> Option<UniversalId> {
        self.table.get(id)?;
        self.beacons.prev(id.node()).and_then(|n| self.table.at(n)).map(EntityRecord::id)
    }

    /// Whether `id` is alive, recording a diagnostic when it is not.
    fn require_alive(&mut self, id: UniversalId) -> bool {
        let alive = self.is_alive(id);
        if !alive {
            debug!(%id, "stale handle");
            self.instrumentation.record(Diagnostic::StaleHandle(id));
        }
        alive
    }

    fn is_active(&self, id: UniversalId) -> bool {
        self.table.get(id).is_some_and(|r| r.status.is_in_world())
    }

    fn begin_tick(&mut self) {
        self.tick = self.tick.next();
        for id in self.dead.drain(..) {
            self.table.release(id);
        }
        self.table.recycle();
        for record in self.table.iter_mut() {
            record.colliding.clear();
            record.flags.has_moved = false;
            record.flags.has_rotated = false;
            record.flags.has_collided = false;
        }
    }

    fn broad_phase(&mut self) -> Vec<CandidatePair> {
        let mut roots = vec![None; self.table.capacity()];
        if self.config.ignore_shared_owner {
            let active: Vec<UniversalId> =
                self.table.iter().filter(|r| r.can_collide()).map(EntityRecord::id).collect();
            for id in active {
                roots[id.node()] = Some(self.collision_root(id));
            }
        }
        let view = ScanFrame { table: &self.table, roots: &roots };
        let limits = ScanLimits {
            rules: &self.config.rules,
            max_range2: self.config.max_range2,
            ignore_shared_owner: self.config.ignore_shared_owner,
        };
        let sweep = &self.axes[self.scanner.sweep_axis().index()];
        self.scanner.scan(sweep, &view, &limits, self.instrumentation.stats_mut())
    }

    fn mark_colliding(&mut self, a: UniversalId, b: UniversalId) {
        if let Some(record) = self.table.get_mut(a) {
            record.colliding.insert(b);
            record.flags.has_collided = true;
        }
        if let Some(record) = self.table.get_mut(b) {
            record.colliding.insert(a);
            record.flags.has_collided = true;
        }
    }
}

impl AxisCoordinates for World {
    fn coordinate(&self, node: usize, axis: Axis) -> f64 {
        self.table.coordinate(node, axis)
    }
}

impl BeaconCodes for World {
    fn beacon_code(&self, node: usize) -> &str {
        self.table.beacon_code(node)
    }
}

/// Table plus precomputed collision roots, as seen by the scanner.
struct ScanFrame<'a> {
    table: &'a EntityTable,
    roots: &'a [Option<UniversalId>],
}

impl ScanView for ScanFrame<'_> {
    fn record_at(&self, node: usize) -> Option<&EntityRecord> {
        self.table.at(node)
    }

    fn collision_root(&self, node: usize) -> Option<UniversalId> {
        self.roots.get(node).copied().flatten()
    }
}
