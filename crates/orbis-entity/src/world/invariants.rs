// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeSet;

use tracing::debug;

use super::World;
use crate::error::InvariantViolation;
use crate::ident::UniversalId;
use crate::spatial::AxisCoordinates;

impl World {
    /// Verifies the structural invariants:
    /// - every axis list is in `(coordinate, index)` order;
    /// - every axis list holds exactly the active entities;
    /// - the beacon list holds exactly the active beacons, in code order.
    ///
    /// Cost is O(n); meant for tests, debug builds, and the CLI's check mode.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let active: BTreeSet<usize> = self
            .table
            .iter()
            .filter(|r| r.status.is_in_world())
            .map(|r| r.id.node())
            .collect();

        for list in &self.axes {
            let axis = list.axis();
            let nodes: Vec<usize> = list.iter().collect();
            for pair in nodes.windows(2) {
                let (before, after) = (pair[0], pair[1]);
                let ka = self.coordinate(before, axis);
                let kb = self.coordinate(after, axis);
                if ka.total_cmp(&kb).then(before.cmp(&after)).is_ge() {
                    return Err(InvariantViolation::Unsorted { axis, before, after });
                }
            }
            for &node in &nodes {
                if !active.contains(&node) {
                    if let Some(record) = self.table.at(node) {
                        return Err(InvariantViolation::LinkedWhileInactive {
                            id: record.id,
                            axis,
                            status: record.status,
                        });
                    }
                }
            }
            let linked: BTreeSet<usize> = nodes.iter().copied().collect();
            if linked != active || nodes.len() != list.len() {
                return Err(InvariantViolation::MembershipMismatch {
                    axis,
                    expected: active.len(),
                    found: nodes.len(),
                });
            }
        }

        if !self.beacons.is_sorted(&self.table) {
            return Err(InvariantViolation::BeaconOrder);
        }
        for record in self.table.iter() {
            let expected = record.status.is_in_world() && record.is_beacon();
            if expected != self.beacons.contains(record.id.node()) {
                return Err(InvariantViolation::BeaconMembership(record.id));
            }
        }
        Ok(())
    }

    /// Logs everything known about `id` at debug level. Returns `false` for
    /// stale handles.
    pub fn dump_state(&self, id: UniversalId) -> bool {
        let Some(record) = self.table.get(id) else {
            debug!(%id, "dump_state: stale handle");
            return false;
        };
        let node = id.node();
        let neighbours: Vec<(Option<usize>, Option<usize>)> =
            self.axes.iter().map(|list| (list.prev(node), list.next(node))).collect();
        debug!(
            %id,
            kind = ?record.kind,
            status = %record.status,
            scan_class = %record.scan_class,
            position = ?record.position().to_array(),
            velocity = ?record.velocity().to_array(),
            radius = record.collision_radius(),
            energy = record.energy,
            owner = ?self.owner(id),
            region = ?record.region,
            colliding = ?record.colliding,
            flags = ?record.flags,
            ?neighbours,
            "entity state"
        );
        true
    }
}
