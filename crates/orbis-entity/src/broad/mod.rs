// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Broad phase and exact close test.
//!
//! Determinism contract:
//! - Pair identity is canonicalised as `(min_id, max_id)`.
//! - The emitted pair list is strictly sorted by that tuple, so the result
//!   does not depend on which end of the sweep list was walked first.
//! - Extent overlap and the close test are inclusive: touching spheres
//!   collide.

#[doc = "Exact bounding-sphere test on candidate pairs."]
pub mod close;
#[doc = "Scan-class immunity and pair filter rules."]
pub mod rules;
#[doc = "Sweep-and-prune over the sorted axis lists."]
pub mod scanner;

pub use close::close_collision;
pub use rules::CollisionRules;
pub use scanner::{BroadPhaseScanner, CandidatePair, ScanLimits, ScanView};
