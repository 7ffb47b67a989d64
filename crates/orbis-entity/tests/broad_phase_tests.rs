#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Broad phase and close test: the reference scenarios plus filter coverage.

use orbis_entity::{
    close_collision, CandidatePair, CollisionConfig, CollisionFilter, CollisionRules, EntityDesc,
    EntityFlags, EntityKind, LinearMotion, ScanClass, SphereGeometry, UniversalId, World,
};
use orbis_math::HpVec3;
use proptest::prelude::*;

fn ship_at(world: &mut World, x: f64, radius: f64) -> UniversalId {
    let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(radius))
        .at(HpVec3::new(x, 0.0, 0.0));
    let id = world.spawn(desc).expect("spawn");
    world.enter_world(id).expect("enter");
    id
}

#[test]
fn overlapping_spheres_collide() {
    let mut world = World::default();
    let a = ship_at(&mut world, 0.0, 10.0);
    let b = ship_at(&mut world, 15.0, 10.0);
    assert!(world.check_close_collision(a, b));
    assert!(world.check_close_collision(b, a));

    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(report.collisions, vec![CandidatePair::new(a, b)]);
    assert_eq!(world.get(a).expect("a").colliding().collect::<Vec<_>>(), vec![b]);
    assert_eq!(world.get(b).expect("b").colliding().collect::<Vec<_>>(), vec![a]);
    assert!(world.get(a).expect("a").flags().has_collided);
}

#[test]
fn separated_spheres_do_not_collide() {
    let mut world = World::default();
    let a = ship_at(&mut world, 0.0, 10.0);
    let b = ship_at(&mut world, 25.0, 10.0);
    assert!(!world.check_close_collision(a, b));
    let report = world.tick(0.0, &mut LinearMotion);
    assert!(report.collisions.is_empty());
    assert_eq!(world.get(a).expect("a").colliding().count(), 0);
}

#[test]
fn touching_spheres_collide() {
    let mut world = World::default();
    let a = ship_at(&mut world, 0.0, 10.0);
    let b = ship_at(&mut world, 20.0, 10.0);
    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(report.collisions, vec![CandidatePair::new(a, b)]);
}

#[test]
fn immune_classes_never_reach_close_test() {
    let config = CollisionConfig {
        rules: CollisionRules::permissive().with_immune_pair(ScanClass::Police, ScanClass::Station),
        ..CollisionConfig::default()
    };
    let mut world = World::new(config);
    let police = ship_at(&mut world, 0.0, 10.0);
    let station = ship_at(&mut world, 5.0, 10.0);
    assert!(world.set_scan_class(police, ScanClass::Police));
    assert!(world.set_scan_class(station, ScanClass::Station));

    let report = world.tick(0.0, &mut LinearMotion);
    assert!(report.collisions.is_empty());
    assert_eq!(report.stats.overlapping_pairs, 1);
    assert_eq!(report.stats.filtered_pairs, 1);
    assert_eq!(report.stats.close_tests, 0);
}

#[test]
fn collision_filter_masks_pairs() {
    let mut world = World::default();
    let a = ship_at(&mut world, 0.0, 10.0);
    let b = ship_at(&mut world, 5.0, 10.0);
    let c = ship_at(&mut world, 200.0, 10.0);
    let d = ship_at(&mut world, 205.0, 10.0);
    world.set_collision_filter(a, CollisionFilter::new(0b01));
    world.set_collision_filter(b, CollisionFilter::new(0b10));
    world.set_collision_filter(c, CollisionFilter::new(0b01));
    world.set_collision_filter(d, CollisionFilter::ALL);

    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(report.collisions, vec![CandidatePair::new(c, d)]);
    assert_eq!(report.stats.filtered_pairs, 1);
}

#[test]
fn immune_flag_and_default_classes_are_skipped() {
    let mut world = World::default();
    let immune = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(10.0))
        .flags(EntityFlags { immune_to_collision: true, ..EntityFlags::default() });
    let immune = world.spawn(immune).expect("spawn");
    world.enter_world(immune).expect("enter");
    let other = ship_at(&mut world, 1.0, 10.0);
    let ghost = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(10.0))
        .scan_class(ScanClass::NoDraw)
        .at(HpVec3::new(2.0, 0.0, 0.0));
    let ghost = world.spawn(ghost).expect("spawn");
    world.enter_world(ghost).expect("enter");

    let report = world.tick(0.0, &mut LinearMotion);
    assert!(report.collisions.is_empty());
    assert_eq!(report.stats.filtered_pairs, 3);
    assert!(world.get(other).expect("other").colliding().next().is_none());
}

#[test]
fn non_collidable_kinds_are_ignored() {
    let mut world = World::default();
    let ship = ship_at(&mut world, 0.0, 10.0);
    let effect = world
        .spawn(EntityDesc::new(EntityKind::VisualEffect, &SphereGeometry::new(50.0)))
        .expect("spawn");
    world.enter_world(effect).expect("enter");
    let report = world.tick(0.0, &mut LinearMotion);
    assert!(report.collisions.is_empty());
    assert_eq!(report.stats.overlapping_pairs, 0);
    assert_eq!(world.axis_order(orbis_entity::Axis::X).len(), 2);
    assert!(world.get(ship).is_some());
}

#[test]
fn sub_entities_do_not_hit_their_parent() {
    let mut world = World::default();
    let parent = ship_at(&mut world, 0.0, 100.0);
    let turret = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(5.0))
        .flags(EntityFlags { is_sub_entity: true, ..EntityFlags::default() })
        .at(HpVec3::new(10.0, 0.0, 0.0));
    let turret = world.spawn(turret).expect("spawn");
    world.set_owner(turret, Some(parent)).expect("owner");
    world.enter_world(turret).expect("enter");
    let intruder = ship_at(&mut world, 20.0, 5.0);

    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(
        report.collisions,
        vec![CandidatePair::new(parent, intruder), CandidatePair::new(turret, intruder)]
    );
    assert_eq!(report.stats.filtered_pairs, 1);
}

#[test]
fn shared_owner_rule_can_be_disabled() {
    let config = CollisionConfig { ignore_shared_owner: false, ..CollisionConfig::default() };
    let mut world = World::new(config);
    let parent = ship_at(&mut world, 0.0, 100.0);
    let turret = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(5.0))
        .flags(EntityFlags { is_sub_entity: true, ..EntityFlags::default() });
    let turret = world.spawn(turret).expect("spawn");
    world.set_owner(turret, Some(parent)).expect("owner");
    world.enter_world(turret).expect("enter");
    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(report.collisions, vec![CandidatePair::new(parent, turret)]);
}

#[test]
fn max_range_cuts_off_huge_bodies() {
    let config = CollisionConfig { max_range2: 100.0, ..CollisionConfig::default() };
    let mut world = World::new(config);
    let a = ship_at(&mut world, 0.0, 1000.0);
    let b = ship_at(&mut world, 50.0, 1000.0);
    let c = ship_at(&mut world, 5.0, 1.0);
    let report = world.tick(0.0, &mut LinearMotion);
    assert_eq!(report.collisions, vec![CandidatePair::new(a, c)]);
    assert!(!world.check_close_collision(a, b));
}

#[test]
fn degenerate_radius_collides_as_point() {
    let mut world = World::default();
    let a = ship_at(&mut world, 0.0, f64::NAN);
    let b = ship_at(&mut world, 0.0, -3.0);
    let c = ship_at(&mut world, 1.0, 0.0);
    assert!(world.check_close_collision(a, b));
    assert!(!world.check_close_collision(a, c));
    let diagnostics = world.instrumentation().recent_diagnostics().count();
    assert!(diagnostics >= 3);
}

#[test]
fn identical_worlds_report_identically() {
    let build = || {
        let mut world = World::default();
        for i in 0..40 {
            let x = f64::from(i % 7) * 3.0;
            let y = f64::from(i % 5) * 2.0;
            let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(2.5))
                .at(HpVec3::new(x, y, 0.0));
            let id = world.spawn(desc).expect("spawn");
            world.enter_world(id).expect("enter");
        }
        world
    };
    let mut first = build();
    let mut second = build();
    let a = first.tick(0.1, &mut LinearMotion);
    let b = second.tick(0.1, &mut LinearMotion);
    assert_eq!(a, b);
    assert!(!a.collisions.is_empty());
    assert!(a.collisions.windows(2).all(|w| w[0] < w[1]));
}

fn brute_force(world: &World, ids: &[UniversalId]) -> Vec<CandidatePair> {
    let max_range2 = world.config().max_range2;
    let mut out = Vec::new();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let (ra, rb) = (world.get(a).expect("a"), world.get(b).expect("b"));
            if close_collision(ra, rb, max_range2) {
                out.push(CandidatePair::new(a, b));
            }
        }
    }
    out.sort_unstable();
    out
}

proptest! {
    #[test]
    fn sweep_matches_brute_force(
        bodies in prop::collection::vec((-200i32..200, -200i32..200, -200i32..200, 0i32..40), 1..48)
    ) {
        let mut world = World::default();
        let mut ids = Vec::new();
        for (x, y, z, r) in bodies {
            let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(f64::from(r)))
                .at(HpVec3::new(f64::from(x), f64::from(y), f64::from(z)));
            let id = world.spawn(desc).expect("spawn");
            world.enter_world(id).expect("enter");
            ids.push(id);
        }
        let expected = brute_force(&world, &ids);
        let report = world.tick(0.0, &mut LinearMotion);
        prop_assert_eq!(report.collisions, expected);
    }

    #[test]
    fn close_test_is_symmetric(
        a in (-1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -5.0f64..500.0),
        b in (-1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -5.0f64..500.0),
    ) {
        let mut world = World::default();
        let mut spawn = |(x, y, z, r): (f64, f64, f64, f64)| {
            let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(r))
                .at(HpVec3::new(x, y, z));
            world.spawn(desc).expect("spawn")
        };
        let ia = spawn(a);
        let ib = spawn(b);
        let ra = world.get(ia).expect("a");
        let rb = world.get(ib).expect("b");
        let max = world.config().max_range2;
        prop_assert_eq!(close_collision(ra, rb, max), close_collision(rb, ra, max));
    }
}
