#![allow(missing_docs)]
use core::f32::consts::FRAC_PI_2;

use orbis_math::{HpVec3, Quat, Vec3};
use proptest::prelude::*;

fn approx_eq3(a: [f32; 3], b: [f32; 3]) {
    for i in 0..3 {
        let diff = (a[i] - b[i]).abs();
        assert!(diff <= 1e-5, "expected {b:?}, got {a:?}");
    }
}

#[test]
fn vec3_normalize_degenerate_returns_zero() {
    let v = Vec3::new(1e-12, -1e-12, 0.0);
    assert_eq!(v.normalize().to_array(), [0.0, 0.0, 0.0]);
}

#[test]
fn quat_identity_rotation_is_noop() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    approx_eq3(Quat::identity().rotate(&v).to_array(), v.to_array());
}

#[test]
fn quat_quarter_turn_about_y_maps_forward_to_x() {
    let q = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);
    approx_eq3(q.forward().to_array(), [1.0, 0.0, 0.0]);
}

#[test]
fn hp_add_scaled_keeps_double_precision() {
    let p = HpVec3::new(1.0e9, 0.0, 0.0);
    let moved = p.add_scaled(&Vec3::new(0.5, 0.0, 0.0), 1.0);
    assert_eq!(moved.x(), 1.0e9 + 0.5);
}

#[test]
fn hp_distance_matches_pythagoras() {
    let a = HpVec3::new(0.0, 0.0, 0.0);
    let b = HpVec3::new(3.0, 4.0, 0.0);
    assert_eq!(a.distance_squared(&b), 25.0);
    assert_eq!(a.distance(&b), 5.0);
}

proptest! {
    #[test]
    fn distance_squared_is_symmetric(
        a in prop::array::uniform3(-1.0e7f64..1.0e7),
        b in prop::array::uniform3(-1.0e7f64..1.0e7),
    ) {
        let pa = HpVec3::from(a);
        let pb = HpVec3::from(b);
        prop_assert_eq!(pa.distance_squared(&pb), pb.distance_squared(&pa));
    }
}
