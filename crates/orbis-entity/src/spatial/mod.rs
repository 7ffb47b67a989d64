// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Spatial bookkeeping: one sorted list per world axis plus coarse regions.
//!
//! Ordering contract (shared by every list):
//! - Nodes are ordered by `(coordinate, slot index)` where coordinates compare
//!   with `f64::total_cmp`. The slot index breaks ties, so equal coordinates
//!   still produce one deterministic order and stepwise swaps terminate.
//! - Links are slot indices into the entity table, never references; a list
//!   owns its own link table and never owns the entities.

#[doc = "Doubly linked, incrementally re-sorted per-axis ordering."]
pub mod axis_list;
#[doc = "Coarse region tags for non-collision proximity queries."]
pub mod region;

pub use axis_list::{Axis, AxisCoordinates, AxisIter, AxisLink, SpatialAxisList};
pub use region::{RegionGrid, RegionTag};
