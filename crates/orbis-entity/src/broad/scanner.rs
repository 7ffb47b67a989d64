// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use tracing::trace;

use crate::broad::CollisionRules;
use crate::ident::UniversalId;
use crate::record::EntityRecord;
use crate::spatial::{Axis, SpatialAxisList};
use crate::telemetry::TickStats;

/// Unordered entity pair, stored with the lower handle first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CandidatePair {
    first: UniversalId,
    second: UniversalId,
}

impl CandidatePair {
    /// Canonicalises `(a, b)` as `(min, max)`.
    pub fn new(a: UniversalId, b: UniversalId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lower handle.
    pub const fn first(&self) -> UniversalId {
        self.first
    }

    /// Higher handle.
    pub const fn second(&self) -> UniversalId {
        self.second
    }

    /// Whether `id` is one of the two.
    pub fn involves(&self, id: UniversalId) -> bool {
        self.first == id || self.second == id
    }

    /// The member that is not `id`, if `id` is a member.
    pub fn partner(&self, id: UniversalId) -> Option<UniversalId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Read access the scanner needs while walking the sweep list.
pub trait ScanView {
    /// Record at slot `node`, if any.
    fn record_at(&self, node: usize) -> Option<&EntityRecord>;

    /// Entity that `node` collides on behalf of, if known. Pairs sharing a
    /// root are dropped when the scan is asked to ignore shared owners.
    fn collision_root(&self, node: usize) -> Option<UniversalId>;
}

/// Scan-wide settings.
#[derive(Clone, Copy, Debug)]
pub struct ScanLimits<'a> {
    /// Class immunity rules.
    pub rules: &'a CollisionRules,
    /// Absolute squared cutoff along the sweep axis.
    pub max_range2: f64,
    /// Drop pairs with the same collision root.
    pub ignore_shared_owner: bool,
}

/// Sweep-and-prune over one axis list, pruned by the other two axes.
///
/// For each node `a` in ascending order the scan walks forward while the
/// sweep-axis gap `dx` is within `r_a + max_radius` (the largest radius
/// among collidable entities) and within the absolute cutoff. Every pair
/// whose per-axis gaps are all within `r_a + r_b` overlaps; overlapping
/// pairs then pass through the cheap filters. The result is sorted, so two
/// scans of the same state agree exactly.
#[derive(Clone, Copy, Debug)]
pub struct BroadPhaseScanner {
    sweep_axis: Axis,
}

impl Default for BroadPhaseScanner {
    fn default() -> Self {
        Self::new(Axis::X)
    }
}

impl BroadPhaseScanner {
    /// Scanner sweeping along `sweep_axis`.
    pub const fn new(sweep_axis: Axis) -> Self {
        Self { sweep_axis }
    }

    /// Axis whose list is walked.
    pub const fn sweep_axis(&self) -> Axis {
        self.sweep_axis
    }

    /// Produces the filtered candidate pairs, sorted ascending.
    ///
    /// `list` must be the list for [`Self::sweep_axis`]. Entities that
    /// cannot collide (wrong kind, not in the world, non-finite position)
    /// are skipped as if absent.
    pub fn scan(
        &self,
        list: &SpatialAxisList,
        view: &impl ScanView,
        limits: &ScanLimits<'_>,
        stats: &mut TickStats,
    ) -> Vec<CandidatePair> {
        let sweep = self.sweep_axis.index();
        let max_radius = list
            .iter()
            .filter_map(|node| view.record_at(node))
            .filter(|r| r.can_collide())
            .map(EntityRecord::effective_radius)
            .fold(0.0_f64, f64::max);

        let mut pairs = Vec::new();
        for a_node in list.iter() {
            let Some(a) = view.record_at(a_node) else { continue };
            let pa = a.position();
            if !a.can_collide() || !pa.is_finite() {
                continue;
            }
            let ra = a.effective_radius();
            let reach = ra + max_radius;

            let mut probe = list.next(a_node);
            while let Some(b_node) = probe {
                probe = list.next(b_node);
                let Some(b) = view.record_at(b_node) else { continue };
                let pb = b.position();
                if !pb.is_finite() {
                    continue;
                }
                let dx = pb.component(sweep) - pa.component(sweep);
                if dx > reach || dx * dx > limits.max_range2 {
                    break;
                }
                if !b.can_collide() {
                    continue;
                }
                let pair_reach = ra + b.effective_radius();
                let apart = (0..3).any(|i| (pb.component(i) - pa.component(i)).abs() > pair_reach);
                if apart {
                    continue;
                }
                stats.overlapping_pairs += 1;

                let shared_root = limits.ignore_shared_owner
                    && view.collision_root(a_node).is_some_and(|root| {
                        view.collision_root(b_node) == Some(root)
                    });
                if shared_root || !limits.rules.may_collide(a, b) {
                    stats.filtered_pairs += 1;
                    trace!(a = %a.id(), b = %b.id(), shared_root, "pair filtered");
                    continue;
                }
                pairs.push(CandidatePair::new(a.id(), b.id()));
            }
        }
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_canonical() {
        let lo = UniversalId::new(1, 0);
        let hi = UniversalId::new(4, 2);
        assert_eq!(CandidatePair::new(hi, lo), CandidatePair::new(lo, hi));
        assert_eq!(CandidatePair::new(hi, lo).first(), lo);
        assert_eq!(CandidatePair::new(hi, lo).partner(lo), Some(hi));
        assert_eq!(CandidatePair::new(hi, lo).partner(UniversalId::new(9, 0)), None);
    }

    #[test]
    fn membership_checks_both_ends() {
        let pair = CandidatePair::new(UniversalId::new(7, 0), UniversalId::new(2, 1));
        assert!(pair.involves(UniversalId::new(2, 1)));
        assert!(pair.involves(UniversalId::new(7, 0)));
        assert!(!pair.involves(UniversalId::new(2, 0)));
    }
}
