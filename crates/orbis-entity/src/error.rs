// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types returned by world operations and the invariant checker.

use thiserror::Error;

use crate::ident::UniversalId;
use crate::spatial::Axis;
use crate::status::EntityStatus;

/// Errors returned by lifecycle operations with a meaningful failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The handle does not name a live entity.
    #[error("stale entity handle: {0}")]
    StaleHandle(UniversalId),
    /// The requested status change is not part of the lifecycle.
    #[error("entity {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Entity.
        id: UniversalId,
        /// Current status.
        from: EntityStatus,
        /// Requested status.
        to: EntityStatus,
    },
    /// Every handle slot is occupied.
    #[error("entity handle space exhausted ({limit} slots)")]
    HandleSpaceExhausted {
        /// Configured slot count.
        limit: u32,
    },
    /// The proposed owner is not a live entity.
    #[error("owner {0} does not name a live entity")]
    UnknownOwner(UniversalId),
}

/// Structural inconsistency found by
/// [`World::check_invariants`](crate::World::check_invariants).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two adjacent nodes are out of `(coordinate, index)` order.
    #[error("axis {axis:?} out of order between slots {before} and {after}")]
    Unsorted {
        /// Axis.
        axis: Axis,
        /// Lower node by link order.
        before: usize,
        /// Higher node by link order.
        after: usize,
    },
    /// An axis list and the active roster disagree.
    #[error("axis {axis:?} holds {found} entities, roster has {expected} active")]
    MembershipMismatch {
        /// Axis.
        axis: Axis,
        /// Active entities.
        expected: usize,
        /// Entities linked on the axis.
        found: usize,
    },
    /// Linked on an axis without being active.
    #[error("{id} is linked on axis {axis:?} while {status}")]
    LinkedWhileInactive {
        /// Entity.
        id: UniversalId,
        /// Axis.
        axis: Axis,
        /// Its status.
        status: EntityStatus,
    },
    /// The beacon list is not in code order.
    #[error("beacon list out of code order")]
    BeaconOrder,
    /// A beacon entity is missing from the list or a non-beacon is in it.
    #[error("beacon membership wrong for {0}")]
    BeaconMembership(UniversalId),
}
