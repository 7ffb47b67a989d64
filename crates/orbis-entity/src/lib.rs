// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Orbis world entities and broad-phase collision.

This crate provides:
- Entity records with generation-checked handles (`UniversalId`) and weak
  owner links that resolve to nothing once the owner is gone.
- Three incrementally sorted axis lists (`SpatialAxisList`) kept in order by
  local swaps as entities move.
- A sweep-and-prune broad phase (`BroadPhaseScanner`) with scan-class,
  filter-mask, immunity, and shared-owner pruning, followed by the exact
  bounding-sphere `close_collision` test.
- The `World` that owns all of the above and runs the per-tick order:
  lifecycle events, motion, re-sort, scan, close test.
- Coarse region tags and a beacon list for queries outside the collision path.

Design notes:
- Deterministic: ties on a coordinate are broken by slot index, pair output
  is canonical and sorted, and no ambient state is consulted.
- Recoverable faults are recorded as `Diagnostic`s on the world's
  `Instrumentation`, never raised as panics.
"]

/// Beacon ordering for navigation traversal.
pub mod beacon;
/// Broad phase, pair filters, and the exact close test.
pub mod broad;
mod config;
mod damage;
mod error;
/// Entity shapes and the provider trait.
pub mod geometry;
mod ident;
mod kind;
mod record;
/// Axis lists and region tags.
pub mod spatial;
mod status;
mod table;
mod telemetry;
mod tick;
mod world;

pub use beacon::{compare_beacon_codes, BeaconCodes, BeaconList};
pub use broad::{
    close_collision, BroadPhaseScanner, CandidatePair, CollisionRules, ScanLimits, ScanView,
};
pub use config::{
    CollisionConfig, DEFAULT_MAX_ENTITIES, DEFAULT_MAX_OWNER_DEPTH, DEFAULT_MAX_RANGE2,
    DEFAULT_REGION_CELL_SIZE,
};
pub use damage::{DamagePort, EnergyDamage};
pub use error::{EntityError, InvariantViolation};
pub use geometry::{BoundingBox, BoxGeometry, Geometry, GeometryProvider, SphereGeometry};
pub use ident::UniversalId;
pub use kind::{CollisionFilter, EntityFlags, EntityKind};
pub use record::{EntityDesc, EntityRecord, Kinematics};
pub use spatial::{Axis, AxisCoordinates, AxisLink, RegionGrid, RegionTag, SpatialAxisList};
pub use status::{EntityStatus, ScanClass};
pub use telemetry::{Diagnostic, Instrumentation, TickStats};
pub use tick::Tick;
pub use world::{LifecycleEvent, LinearMotion, MotionDriver, TickReport, World};
