// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Counters and recoverable-fault records owned by the world.
//!
//! Nothing here is global: each [`World`](crate::World) carries one
//! [`Instrumentation`] and callers read it through the world.

use core::fmt;
use std::collections::VecDeque;

use tracing::debug;

use crate::ident::UniversalId;
use crate::spatial::Axis;

/// How many diagnostics are retained.
const DIAGNOSTIC_CAPACITY: usize = 64;

/// Work counted during one tick (or since the last tick began, for
/// operations called between ticks).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TickStats {
    /// Entities that entered the world.
    pub entered: u64,
    /// Entities that left the world.
    pub exited: u64,
    /// Nodes walked past while inserting into axis lists.
    pub insert_steps: u64,
    /// Neighbours passed while re-sorting moved entities.
    pub resort_swaps: u64,
    /// Entities whose position changed.
    pub moved: u64,
    /// Pairs whose extents overlapped on all three axes.
    pub overlapping_pairs: u64,
    /// Overlapping pairs dropped by filter, immunity, class, or owner rules.
    pub filtered_pairs: u64,
    /// Exact close-collision tests performed.
    pub close_tests: u64,
    /// Close tests that reported a collision.
    pub collisions: u64,
    /// Region tags that changed.
    pub region_changes: u64,
    /// Recoverable faults recorded.
    pub diagnostics: u64,
}

/// A recoverable fault. The affected entity behaves as if absent from the
/// operation that raised it.
#[derive(Clone, PartialEq, Debug)]
pub enum Diagnostic {
    /// `remove`/`resort` on an axis where the entity was not linked.
    UnlinkedAxisOperation {
        /// Entity.
        id: UniversalId,
        /// Axis.
        axis: Axis,
    },
    /// A handle that no longer resolves.
    StaleHandle(UniversalId),
    /// Owner resolution exceeded the configured depth.
    OwnerChainTooDeep {
        /// Entity whose owner was being resolved.
        id: UniversalId,
        /// Depth bound that was hit.
        depth: u32,
    },
    /// Zero, negative, or non-finite radius; collides as radius zero.
    DegenerateRadius {
        /// Entity.
        id: UniversalId,
        /// Radius as given.
        radius: f64,
    },
    /// A status name read from outside the world was not recognised.
    UnknownStatus {
        /// Name as given.
        name: String,
    },
    /// A scan-class name read from outside the world was not recognised.
    UnknownScanClass {
        /// Entity it was meant for.
        id: UniversalId,
        /// Name as given.
        name: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnlinkedAxisOperation { id, axis } => {
                write!(f, "{id} is not linked on axis {axis:?}")
            }
            Self::StaleHandle(id) => write!(f, "stale handle {id}"),
            Self::OwnerChainTooDeep { id, depth } => {
                write!(f, "owner chain of {id} exceeds depth {depth}")
            }
            Self::DegenerateRadius { id, radius } => {
                write!(f, "{id} has degenerate collision radius {radius}")
            }
            Self::UnknownStatus { name } => write!(f, "unknown status {name:?}"),
            Self::UnknownScanClass { id, name } => {
                write!(f, "unknown scan class {name:?} for {id}")
            }
        }
    }
}

/// Debug counters and the recent-diagnostic ring.
#[derive(Clone, Debug, Default)]
pub struct Instrumentation {
    current: TickStats,
    last_tick: TickStats,
    total_spawned: u64,
    peak_live: usize,
    recent: VecDeque<Diagnostic>,
}

impl Instrumentation {
    /// Counters accumulated since the current tick began.
    pub const fn current(&self) -> &TickStats {
        &self.current
    }

    /// Counters of the last completed tick.
    pub const fn last_tick(&self) -> &TickStats {
        &self.last_tick
    }

    /// Entities ever spawned.
    pub const fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Highest simultaneous live entity count seen.
    pub const fn peak_live(&self) -> usize {
        self.peak_live
    }

    /// Most recent diagnostics, oldest first.
    pub fn recent_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.recent.iter()
    }

    pub(crate) fn stats_mut(&mut self) -> &mut TickStats {
        &mut self.current
    }

    pub(crate) fn record_spawn(&mut self, live: usize) {
        self.total_spawned += 1;
        self.peak_live = self.peak_live.max(live);
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "diagnostic recorded");
        self.current.diagnostics += 1;
        if self.recent.len() == DIAGNOSTIC_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(diagnostic);
    }

    /// Closes the running counters and returns them.
    pub(crate) fn finish_tick(&mut self) -> TickStats {
        self.last_tick = core::mem::take(&mut self.current);
        self.last_tick
    }
}
