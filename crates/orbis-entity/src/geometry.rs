// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Local-space geometry: bounding boxes and the provider trait that turns a
//! shape description into the radius, box, and mass cached on a record.

use orbis_math::Vec3;

/// Axis-aligned bounding box in the entity's local space.
///
/// Invariant: `min` components are less than or equal to `max` components.
/// [`BoundingBox::new`] sorts corners instead of rejecting them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    /// Builds a box from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        let a = a.to_array();
        let b = b.to_array();
        Self {
            min: Vec3::new(a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])),
            max: Vec3::new(a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])),
        }
    }

    /// Box centred on the local origin with the given half-extents.
    #[must_use]
    pub fn from_half_extents(half: Vec3) -> Self {
        Self::new(half.scale(-1.0), half)
    }

    /// Cube centred on the local origin enclosing a sphere of `radius`.
    #[must_use]
    pub fn around_sphere(radius: f32) -> Self {
        Self::from_half_extents(Vec3::new(radius, radius, radius))
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Returns `true` if this box overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let a = self.min.to_array();
        let b = self.max.to_array();
        let c = other.min.to_array();
        let d = other.max.to_array();
        Self {
            min: Vec3::new(a[0].min(c[0]), a[1].min(c[1]), a[2].min(c[2])),
            max: Vec3::new(b[0].max(d[0]), b[1].max(d[1]), b[2].max(d[2])),
        }
    }

    /// Radius of the smallest origin-centred sphere enclosing the box.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        let a = self.min.to_array();
        let b = self.max.to_array();
        let far = Vec3::new(
            a[0].abs().max(b[0].abs()),
            a[1].abs().max(b[1].abs()),
            a[2].abs().max(b[2].abs()),
        );
        far.length()
    }
}

/// Shape-specific answers needed when an entity is created.
///
/// Kinds compose a provider rather than overriding radius lookup in a
/// subclass; the world calls it once at spawn and caches the results.
pub trait GeometryProvider {
    /// Bounding-sphere radius used by the broad phase and the close test.
    fn collision_radius(&self) -> f64;
    /// Local-space bounding box.
    fn bounding_box(&self) -> BoundingBox;
    /// Mass in kilograms.
    fn mass(&self) -> f64;
}

/// A sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereGeometry {
    /// Radius in metres.
    pub radius: f64,
    /// Mass in kilograms.
    pub mass: f64,
}

impl SphereGeometry {
    /// Sphere of `radius` metres with zero mass.
    pub const fn new(radius: f64) -> Self {
        Self { radius, mass: 0.0 }
    }
}

impl GeometryProvider for SphereGeometry {
    fn collision_radius(&self) -> f64 {
        self.radius
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around_sphere(self.radius as f32)
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

/// A box given by half-extents; its collision sphere encloses every corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxGeometry {
    /// Half-extents along local x, y, z.
    pub half_extents: Vec3,
    /// Mass in kilograms.
    pub mass: f64,
}

impl GeometryProvider for BoxGeometry {
    fn collision_radius(&self) -> f64 {
        f64::from(self.bounding_box().bounding_radius())
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_half_extents(self.half_extents)
    }

    fn mass(&self) -> f64 {
        self.mass
    }
}

/// Values cached from a [`GeometryProvider`] at spawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geometry {
    /// Bounding-sphere radius.
    pub collision_radius: f64,
    /// Local-space box.
    pub bounding_box: BoundingBox,
    /// Mass.
    pub mass: f64,
}

impl Geometry {
    /// Queries `provider` once.
    pub fn from_provider(provider: &dyn GeometryProvider) -> Self {
        Self {
            collision_radius: provider.collision_radius(),
            bounding_box: provider.bounding_box(),
            mass: provider.mass(),
        }
    }
}
