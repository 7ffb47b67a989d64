// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic math helpers for the Orbis world model.
//!
//! Two vector precisions are used side by side:
//! - [`HpVec3`] (`f64`) carries absolute world positions, which span hundreds
//!   of kilometres and must stay exact enough to keep axis ordering stable.
//! - [`Vec3`] (`f32`) carries velocities, local bounds, and relative offsets.
//!
//! [`Quat`] stores orientation and [`Prng`] produces reproducible scenario
//! data without touching platform RNGs.

mod hp_vec3;
mod prng;
mod quat;
mod vec3;

pub use hp_vec3::HpVec3;
pub use prng::Prng;
pub use quat::Quat;
pub use vec3::Vec3;

/// Degeneracy threshold used when normalising vectors and quaternions.
pub const EPSILON: f32 = 1e-6;
