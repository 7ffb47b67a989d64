// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use orbis_math::{HpVec3, Quat, Vec3};
use tracing::{debug, trace};

use super::World;
use crate::ident::UniversalId;
use crate::kind::CollisionFilter;
use crate::record::{effective_radius, EntityRecord, Kinematics};
use crate::status::EntityStatus;
use crate::telemetry::Diagnostic;

/// Per-tick update hook for active entities.
///
/// Called once per active entity per tick, in handle order, after queued
/// lifecycle events and before the broad phase. Only the kinematic state is
/// writable; the world re-sorts whatever moved.
pub trait MotionDriver {
    /// Advances `kinematics` of `id` by `dt` seconds.
    fn drive(&mut self, id: UniversalId, kinematics: &mut Kinematics, dt: f64);
}

/// Integrates velocity and nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearMotion;

impl MotionDriver for LinearMotion {
    fn drive(&mut self, _id: UniversalId, kinematics: &mut Kinematics, dt: f64) {
        kinematics.apply_velocity(dt);
    }
}

impl<F> MotionDriver for F
where
    F: FnMut(UniversalId, &mut Kinematics, f64),
{
    fn drive(&mut self, id: UniversalId, kinematics: &mut Kinematics, dt: f64) {
        self(id, kinematics, dt);
    }
}

impl World {
    /// Teleports `id`. Active entities are re-sorted immediately.
    pub fn set_position(&mut self, id: UniversalId, position: HpVec3) -> bool {
        self.update_kinematics(id, |k| k.position = position)
    }

    /// Moves `id` along its forward axis.
    pub fn move_forward(&mut self, id: UniversalId, amount: f64) -> bool {
        self.update_kinematics(id, |k| k.move_forward(amount))
    }

    /// Sets the velocity used by [`LinearMotion`].
    pub fn set_velocity(&mut self, id: UniversalId, velocity: Vec3) -> bool {
        self.update_kinematics(id, |k| k.velocity = velocity)
    }

    /// Sets the orientation.
    pub fn set_orientation(&mut self, id: UniversalId, orientation: Quat) -> bool {
        self.update_kinematics(id, |k| k.orientation = orientation)
    }

    /// Replaces the collision radius. Degenerate values are accepted and
    /// collide as zero.
    pub fn set_collision_radius(&mut self, id: UniversalId, radius: f64) -> bool {
        let Some(record) = self.table.get_mut(id) else {
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return false;
        };
        record.geometry.collision_radius = radius;
        if effective_radius(radius) <= 0.0 {
            self.instrumentation.record(Diagnostic::DegenerateRadius { id, radius });
        }
        true
    }

    /// Replaces the 2-bit collision filter.
    pub fn set_collision_filter(&mut self, id: UniversalId, filter: CollisionFilter) -> bool {
        let Some(record) = self.table.get_mut(id) else {
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return false;
        };
        record.collision_filter = filter;
        true
    }

    /// Sets or clears the beacon code, relinking the entity in the beacon
    /// list when it is in the world.
    pub fn set_beacon_code(&mut self, id: UniversalId, code: Option<String>) -> bool {
        let node = id.node();
        let Some(record) = self.table.get_mut(id) else {
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return false;
        };
        record.beacon_code = code;
        let relink = record.status.is_in_world() && record.is_beacon();
        self.beacons.remove(node);
        if relink {
            self.beacons.insert(&self.table, node);
        }
        true
    }

    /// Runs the driver over every active entity and repairs ordering.
    pub(super) fn advance(&mut self, dt: f64, driver: &mut impl MotionDriver) {
        let active: Vec<UniversalId> =
            self.table.iter().filter(|r| r.status.is_in_world()).map(EntityRecord::id).collect();
        for id in active {
            let Some(record) = self.table.get_mut(id) else { continue };
            record.last_position = record.kinematics.position;
            record.last_orientation = record.kinematics.orientation;
            let before = (record.last_position, record.last_orientation);
            driver.drive(id, &mut record.kinematics, dt);
            self.settle(id, before);
        }
    }

    fn update_kinematics(&mut self, id: UniversalId, edit: impl FnOnce(&mut Kinematics)) -> bool {
        let Some(record) = self.table.get_mut(id) else {
            debug!(%id, "kinematics update ignored: stale handle");
            self.instrumentation.record(Diagnostic::StaleHandle(id));
            return false;
        };
        if record.status == EntityStatus::Dead {
            debug!(%id, "kinematics update ignored: entity is dead");
            return false;
        }
        let before = (record.kinematics.position, record.kinematics.orientation);
        edit(&mut record.kinematics);
        self.settle(id, before);
        true
    }

    /// Folds a kinematic change away from `before` into flags, travel
    /// distance, list order, and the region index.
    fn settle(&mut self, id: UniversalId, before: (HpVec3, Quat)) {
        let Some(record) = self.table.get_mut(id) else { return };
        let (from, from_orientation) = before;
        let to = record.kinematics.position;
        let moved = from != to;
        if record.kinematics.orientation != from_orientation {
            record.flags.has_rotated = true;
        }
        if !moved {
            return;
        }
        record.flags.has_moved = true;
        let step = from.distance(&to);
        if step.is_finite() {
            record.distance_travelled += step;
        }
        let in_world = record.status.is_in_world();
        let previous = record.region;
        self.instrumentation.stats_mut().moved += 1;
        if !in_world {
            return;
        }

        let node = id.node();
        let mut swaps = 0;
        for list in &mut self.axes {
            match list.resort(&self.table, node) {
                Some(n) => swaps += n as u64,
                None => {
                    let axis = list.axis();
                    self.instrumentation.record(Diagnostic::UnlinkedAxisOperation { id, axis });
                }
            }
        }
        let (tag, changed) = self.regions.assign(id, previous, &to);
        if let Some(record) = self.table.get_mut(id) {
            record.region = Some(tag);
        }
        let stats = self.instrumentation.stats_mut();
        stats.resort_swaps += swaps;
        if changed {
            stats.region_changes += 1;
        }
        trace!(%id, swaps, changed, "settled");
    }
}
