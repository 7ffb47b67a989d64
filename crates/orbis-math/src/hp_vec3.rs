// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::Vec3;

/// High-precision (`f64`) world position.
///
/// Axis lists order entities by these components, so arithmetic stays in
/// `f64` until a caller explicitly asks for a low-precision relative vector.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct HpVec3 {
    data: [f64; 3],
}

impl HpVec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a position from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// X component.
    pub const fn x(&self) -> f64 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f64 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f64 {
        self.data[2]
    }

    /// Component by index (`0 = x`, `1 = y`, `2 = z`).
    pub fn component(&self, idx: usize) -> f64 {
        self.data[idx]
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 3] {
        self.data
    }

    /// Returns `self + v * factor`, promoting `v` to `f64` first.
    pub fn add_scaled(&self, v: &Vec3, factor: f64) -> Self {
        let [vx, vy, vz] = v.to_array();
        Self::new(
            self.data[0] + f64::from(vx) * factor,
            self.data[1] + f64::from(vy) * factor,
            self.data[2] + f64::from(vz) * factor,
        )
    }

    /// Component-wise difference `self - other`, kept in `f64`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.data[0] - other.data[0],
            self.data[1] - other.data[1],
            self.data[2] - other.data[2],
        )
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Symmetric bit-for-bit: `a.distance_squared(&b) == b.distance_squared(&a)`
    /// because each difference only changes sign when the operands swap.
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let d = self.sub(other);
        d.data[0] * d.data[0] + d.data[1] * d.data[1] + d.data[2] * d.data[2]
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Narrows to a low-precision vector (used for offsets between nearby entities).
    pub fn to_low_precision(&self) -> Vec3 {
        Vec3::new(self.data[0] as f32, self.data[1] as f32, self.data[2] as f32)
    }

    /// Returns `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }
}

impl From<[f64; 3]> for HpVec3 {
    fn from(value: [f64; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for HpVec3 {
    fn from(value: Vec3) -> Self {
        let [x, y, z] = value.to_array();
        Self::new(f64::from(x), f64::from(y), f64::from(z))
    }
}
