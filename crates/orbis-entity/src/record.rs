// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-entity state threaded through the spatial lists.

use std::collections::BTreeSet;

use orbis_math::{HpVec3, Quat, Vec3};

use crate::geometry::{BoundingBox, Geometry, GeometryProvider};
use crate::ident::UniversalId;
use crate::kind::{CollisionFilter, EntityFlags, EntityKind};
use crate::spatial::RegionTag;
use crate::status::{EntityStatus, ScanClass};

/// Position, orientation, and velocity; the part of a record a
/// [`MotionDriver`](crate::MotionDriver) may rewrite during a tick.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Kinematics {
    /// Absolute world position.
    pub position: HpVec3,
    /// World orientation.
    pub orientation: Quat,
    /// Velocity in metres per second.
    pub velocity: Vec3,
}

impl Kinematics {
    /// Advances `position` by `velocity * dt`.
    pub fn apply_velocity(&mut self, dt: f64) {
        self.position = self.position.add_scaled(&self.velocity, dt);
    }

    /// Moves `amount` metres along the orientation's forward axis.
    pub fn move_forward(&mut self, amount: f64) {
        self.position = self.position.add_scaled(&self.orientation.forward(), amount);
    }
}

/// Everything needed to create an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDesc {
    /// Kind; fixes collidability and beacon capability.
    pub kind: EntityKind,
    /// Scanner classification.
    pub scan_class: ScanClass,
    /// Initial kinematic state.
    pub kinematics: Kinematics,
    /// Cached shape answers.
    pub geometry: Geometry,
    /// Spawner-controlled flags.
    pub flags: EntityFlags,
    /// 2-bit pair mask.
    pub collision_filter: CollisionFilter,
    /// Initial energy.
    pub energy: f64,
    /// Energy ceiling.
    pub max_energy: f64,
    /// Beacon code; entities with one join the beacon list on world entry.
    pub beacon_code: Option<String>,
    /// Beacon display label.
    pub beacon_label: Option<String>,
}

impl EntityDesc {
    /// Describes an entity of `kind` shaped by `provider`, at the origin and at rest.
    pub fn new(kind: EntityKind, provider: &dyn GeometryProvider) -> Self {
        Self {
            kind,
            scan_class: ScanClass::DEFAULT,
            kinematics: Kinematics::default(),
            geometry: Geometry::from_provider(provider),
            flags: EntityFlags::default(),
            collision_filter: CollisionFilter::ALL,
            energy: 0.0,
            max_energy: 0.0,
            beacon_code: None,
            beacon_label: None,
        }
    }

    /// Sets the starting position.
    #[must_use]
    pub fn at(mut self, position: HpVec3) -> Self {
        self.kinematics.position = position;
        self
    }

    /// Sets the starting velocity.
    #[must_use]
    pub fn moving(mut self, velocity: Vec3) -> Self {
        self.kinematics.velocity = velocity;
        self
    }

    /// Sets the starting orientation.
    #[must_use]
    pub fn facing(mut self, orientation: Quat) -> Self {
        self.kinematics.orientation = orientation;
        self
    }

    /// Sets the scan class.
    #[must_use]
    pub fn scan_class(mut self, scan_class: ScanClass) -> Self {
        self.scan_class = scan_class;
        self
    }

    /// Replaces the flags.
    #[must_use]
    pub fn flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the collision filter.
    #[must_use]
    pub fn filter(mut self, filter: CollisionFilter) -> Self {
        self.collision_filter = filter;
        self
    }

    /// Sets energy and its ceiling.
    #[must_use]
    pub fn energy(mut self, energy: f64, max_energy: f64) -> Self {
        self.max_energy = max_energy.max(0.0);
        self.energy = energy.clamp(0.0, self.max_energy);
        self
    }

    /// Gives the entity a beacon code.
    #[must_use]
    pub fn beacon(mut self, code: impl Into<String>) -> Self {
        self.beacon_code = Some(code.into());
        self
    }
}

/// One world entity.
///
/// Spatial links live in the axis lists (indexed by the handle's slot), not
/// here; the record only carries the values the lists sort by. `owner` is a
/// weak handle and says nothing about whether the owner is still alive; ask
/// the world to resolve it.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub(crate) id: UniversalId,
    pub(crate) kind: EntityKind,
    pub(crate) scan_class: ScanClass,
    pub(crate) status: EntityStatus,
    pub(crate) flags: EntityFlags,
    pub(crate) collision_filter: CollisionFilter,
    pub(crate) kinematics: Kinematics,
    pub(crate) last_position: HpVec3,
    pub(crate) last_orientation: Quat,
    pub(crate) distance_travelled: f64,
    pub(crate) geometry: Geometry,
    pub(crate) energy: f64,
    pub(crate) max_energy: f64,
    pub(crate) owner: Option<UniversalId>,
    pub(crate) colliding: BTreeSet<UniversalId>,
    pub(crate) region: Option<RegionTag>,
    pub(crate) beacon_code: Option<String>,
    pub(crate) beacon_label: Option<String>,
    pub(crate) spawn_time: f64,
}

impl EntityRecord {
    pub(crate) fn from_desc(id: UniversalId, desc: EntityDesc, spawn_time: f64) -> Self {
        Self {
            id,
            kind: desc.kind,
            scan_class: desc.scan_class,
            status: EntityStatus::Inactive,
            flags: desc.flags,
            collision_filter: desc.collision_filter,
            last_position: desc.kinematics.position,
            last_orientation: desc.kinematics.orientation,
            kinematics: desc.kinematics,
            distance_travelled: 0.0,
            geometry: desc.geometry,
            energy: desc.energy,
            max_energy: desc.max_energy,
            owner: None,
            colliding: BTreeSet::new(),
            region: None,
            beacon_code: desc.beacon_code,
            beacon_label: desc.beacon_label,
            spawn_time,
        }
    }

    /// Handle.
    pub fn id(&self) -> UniversalId {
        self.id
    }

    /// Kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Scan class.
    pub fn scan_class(&self) -> ScanClass {
        self.scan_class
    }

    /// Lifecycle status.
    pub fn status(&self) -> EntityStatus {
        self.status
    }

    /// Flags.
    pub fn flags(&self) -> EntityFlags {
        self.flags
    }

    /// 2-bit pair mask.
    pub fn collision_filter(&self) -> CollisionFilter {
        self.collision_filter
    }

    /// Kinematic state.
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Absolute position.
    pub fn position(&self) -> HpVec3 {
        self.kinematics.position
    }

    /// Position at the end of the previous tick.
    pub fn last_position(&self) -> HpVec3 {
        self.last_position
    }

    /// Orientation.
    pub fn orientation(&self) -> Quat {
        self.kinematics.orientation
    }

    /// Velocity.
    pub fn velocity(&self) -> Vec3 {
        self.kinematics.velocity
    }

    /// Speed in metres per second.
    pub fn speed(&self) -> f64 {
        f64::from(self.kinematics.velocity.length())
    }

    /// Total path length since spawn.
    pub fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }

    /// Low-precision offset from this entity to `other`.
    pub fn vector_to(&self, other: &Self) -> Vec3 {
        other.position().sub(&self.position()).to_low_precision()
    }

    /// Radius as configured, possibly degenerate.
    pub fn collision_radius(&self) -> f64 {
        self.geometry.collision_radius
    }

    /// Radius used for collision: zero for negative, zero, or non-finite radii.
    pub fn effective_radius(&self) -> f64 {
        effective_radius(self.geometry.collision_radius)
    }

    /// Local-space bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        self.geometry.bounding_box
    }

    /// Mass.
    pub fn mass(&self) -> f64 {
        self.geometry.mass
    }

    /// Current energy.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Energy ceiling.
    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    /// Raw weak owner handle. It may name a released entity; use
    /// [`World::owner`](crate::World::owner) to resolve it.
    pub fn owner_handle(&self) -> Option<UniversalId> {
        self.owner
    }

    /// Entities this one collided with during the current tick, in handle order.
    pub fn colliding(&self) -> impl Iterator<Item = UniversalId> + '_ {
        self.colliding.iter().copied()
    }

    /// Coarse region tag, if the entity is in the world.
    pub fn region(&self) -> Option<RegionTag> {
        self.region
    }

    /// Beacon code.
    pub fn beacon_code(&self) -> Option<&str> {
        self.beacon_code.as_deref()
    }

    /// Beacon label, falling back to the code.
    pub fn beacon_label(&self) -> Option<&str> {
        self.beacon_label.as_deref().or(self.beacon_code.as_deref())
    }

    /// Whether this entity belongs in the beacon list while in the world.
    pub fn is_beacon(&self) -> bool {
        self.kind.is_beacon_capable() && self.beacon_code.is_some()
    }

    /// World time at spawn.
    pub fn spawn_time(&self) -> f64 {
        self.spawn_time
    }

    /// Whether the entity takes part in the broad phase this tick.
    pub fn can_collide(&self) -> bool {
        self.status.is_in_world() && self.kind.is_collidable()
    }
}

pub(crate) fn effective_radius(radius: f64) -> f64 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        0.0
    }
}
