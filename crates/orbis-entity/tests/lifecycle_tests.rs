#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Entity lifecycle: world entry/exit, weak owners, handle reuse.

use orbis_entity::{
    Axis, CollisionConfig, Diagnostic, EntityDesc, EntityError, EntityFlags, EntityKind,
    EntityStatus, Kinematics, LifecycleEvent, LinearMotion, SphereGeometry, UniversalId, World,
};
use orbis_math::HpVec3;

fn spawn_ship(world: &mut World, x: f64) -> UniversalId {
    let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(5.0))
        .at(HpVec3::new(x, -x, 2.0 * x));
    world.spawn(desc).expect("spawn")
}

fn sub_entity(world: &mut World, owner: UniversalId) -> UniversalId {
    let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(1.0))
        .flags(EntityFlags { is_sub_entity: true, ..EntityFlags::default() });
    let id = world.spawn(desc).expect("spawn");
    world.set_owner(id, Some(owner)).expect("owner");
    id
}

fn on_every_axis(world: &World, id: UniversalId) -> [bool; 3] {
    Axis::ALL.map(|axis| world.axis_order(axis).contains(&id))
}

#[test]
fn spawned_entities_start_inactive_and_unlinked() {
    let mut world = World::default();
    let id = spawn_ship(&mut world, 1.0);
    assert_eq!(world.get(id).expect("record").status(), EntityStatus::Inactive);
    assert_eq!(on_every_axis(&world, id), [false; 3]);
    assert_eq!(world.active_count(), 0);
    assert_eq!(world.live_count(), 1);
}

#[test]
fn exit_unlinks_everywhere_and_second_exit_is_noop() {
    let mut world = World::default();
    let keep = spawn_ship(&mut world, 0.0);
    let c = spawn_ship(&mut world, 10.0);
    world.enter_world(keep).expect("enter");
    world.enter_world(c).expect("enter");
    assert_eq!(on_every_axis(&world, c), [true; 3]);

    assert!(world.exit_world(c));
    assert_eq!(on_every_axis(&world, c), [false; 3]);
    assert_eq!(world.get(c).expect("dead record").status(), EntityStatus::Dead);
    assert!(world.get(c).expect("dead record").region().is_none());
    world.check_invariants().expect("invariants after exit");

    assert!(!world.exit_world(c));
    assert_eq!(world.instrumentation().current().exited, 1);
    world.check_invariants().expect("invariants after second exit");
    assert_eq!(world.axis_order(Axis::X), vec![keep]);
}

#[test]
fn dead_entities_cannot_reenter() {
    let mut world = World::default();
    let id = spawn_ship(&mut world, 0.0);
    world.enter_world(id).expect("enter");
    assert_eq!(
        world.enter_world(id),
        Err(EntityError::InvalidTransition {
            id,
            from: EntityStatus::Active,
            to: EntityStatus::Active
        })
    );
    world.exit_world(id);
    assert!(matches!(
        world.enter_world(id),
        Err(EntityError::InvalidTransition { from: EntityStatus::Dead, .. })
    ));
}

#[test]
fn inactive_entities_can_be_destroyed() {
    let mut world = World::default();
    let id = spawn_ship(&mut world, 0.0);
    assert!(world.exit_world(id));
    assert_eq!(world.live_count(), 0);
    world.check_invariants().expect("invariants");
}

#[test]
fn destroyed_owner_resolves_to_none() {
    let mut world = World::default();
    let e = spawn_ship(&mut world, 0.0);
    let d = spawn_ship(&mut world, 1.0);
    world.set_owner(d, Some(e)).expect("owner");
    assert_eq!(world.owner(d), Some(e));
    assert_eq!(world.root_owner(d), Some(e));

    world.exit_world(e);
    assert_eq!(world.owner(d), None);
    assert_eq!(world.root_owner(d), None);

    // After recycling, E's slot may be reused; D must still not see an owner.
    world.tick(0.0, &mut LinearMotion);
    let newcomer = spawn_ship(&mut world, 2.0);
    assert_eq!(newcomer.index(), e.index());
    assert_ne!(newcomer, e);
    assert_eq!(world.owner(d), None);
    assert_eq!(world.get(d).expect("d").owner_handle(), Some(e));
}

#[test]
fn root_owner_climbs_sub_entity_chain() {
    let mut world = World::default();
    let mothership = spawn_ship(&mut world, 0.0);
    let bay = sub_entity(&mut world, mothership);
    let turret = sub_entity(&mut world, bay);
    assert_eq!(world.root_owner(turret), Some(mothership));
    assert_eq!(world.parent_entity(turret), Some(bay));
    assert_eq!(world.parent_entity(mothership), None);

    // A launched fighter is not a sub-entity, but the walk still climbs
    // through the bay that owns it.
    let fighter = spawn_ship(&mut world, 3.0);
    world.set_owner(fighter, Some(bay)).expect("owner");
    assert_eq!(world.root_owner(fighter), Some(mothership));
    assert_eq!(world.parent_entity(fighter), None);
}

#[test]
fn owner_cycle_is_bounded() {
    let config = CollisionConfig { max_owner_depth: 4, ..CollisionConfig::default() };
    let mut world = World::new(config);
    let a = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(1.0))
        .flags(EntityFlags { is_sub_entity: true, ..EntityFlags::default() });
    let a = world.spawn(a).expect("spawn");
    let b = sub_entity(&mut world, a);
    let c = sub_entity(&mut world, b);
    world.set_owner(a, Some(c)).expect("owner");

    assert_eq!(world.root_owner(c), None);
    assert!(world
        .instrumentation()
        .recent_diagnostics()
        .any(|d| matches!(d, Diagnostic::OwnerChainTooDeep { id, depth: 4 } if *id == c)));
}

#[test]
fn set_owner_rejects_dead_owner() {
    let mut world = World::default();
    let a = spawn_ship(&mut world, 0.0);
    let b = spawn_ship(&mut world, 1.0);
    world.exit_world(b);
    assert_eq!(world.set_owner(a, Some(b)), Err(EntityError::UnknownOwner(b)));
    assert_eq!(world.set_owner(b, None), Err(EntityError::StaleHandle(b)));
    world.set_owner(a, None).expect("clearing is always allowed");
}

#[test]
fn released_handles_wait_for_the_next_tick() {
    let mut world = World::default();
    let first = spawn_ship(&mut world, 0.0);
    world.enter_world(first).expect("enter");
    world.tick(0.0, &mut LinearMotion);

    world.exit_world(first);
    let second = spawn_ship(&mut world, 0.0);
    assert_ne!(second.index(), first.index());

    world.tick(0.0, &mut LinearMotion);
    assert!(world.get(first).is_none());
    let third = spawn_ship(&mut world, 0.0);
    assert_eq!(third.index(), first.index());
    assert_eq!(third.generation(), first.generation() + 1);
}

#[test]
fn handle_space_is_bounded() {
    let config = CollisionConfig { max_entities: 2, ..CollisionConfig::default() };
    let mut world = World::new(config);
    spawn_ship(&mut world, 0.0);
    spawn_ship(&mut world, 1.0);
    let desc = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(1.0));
    assert_eq!(world.spawn(desc), Err(EntityError::HandleSpaceExhausted { limit: 2 }));
}

#[test]
fn queued_events_apply_before_motion() {
    let mut world = World::default();
    let a = spawn_ship(&mut world, 0.0);
    let b = spawn_ship(&mut world, 0.0);
    world.set_position(b, HpVec3::new(100.0, 0.0, 0.0));
    world.queue(LifecycleEvent::Enter(a));
    world.queue(LifecycleEvent::Enter(b));
    assert_eq!(world.pending_events(), 2);
    assert_eq!(world.active_count(), 0);

    let mut seen = Vec::new();
    let mut driver = |id: UniversalId, k: &mut Kinematics, _dt: f64| {
        seen.push(id);
        if k.position.x() > 50.0 {
            k.position = HpVec3::new(k.position.x() - 95.0, 0.0, 0.0);
        }
    };
    let report = world.tick(1.0, &mut driver);
    assert_eq!(seen, vec![a, b]);
    assert_eq!(report.stats.entered, 2);
    assert_eq!(report.collisions.len(), 1);
    assert_eq!(world.pending_events(), 0);

    world.queue(LifecycleEvent::Exit(a));
    world.queue(LifecycleEvent::Exit(a));
    let report = world.tick(1.0, &mut LinearMotion);
    assert_eq!(report.stats.exited, 1);
    assert_eq!(world.active_count(), 1);
    world.check_invariants().expect("invariants");
}

#[test]
fn stale_handles_are_reported_not_fatal() {
    let mut world = World::default();
    let a = spawn_ship(&mut world, 0.0);
    world.exit_world(a);
    world.tick(0.0, &mut LinearMotion);
    assert!(!world.set_position(a, HpVec3::ZERO));
    assert!(!world.exit_world(a));
    assert_eq!(world.enter_world(a), Err(EntityError::StaleHandle(a)));
    assert!(world
        .instrumentation()
        .recent_diagnostics()
        .any(|d| *d == Diagnostic::StaleHandle(a)));
}

#[test]
fn spawn_time_tracks_universal_time() {
    let mut world = World::default();
    world.tick(2.5, &mut LinearMotion);
    let id = spawn_ship(&mut world, 0.0);
    world.tick(1.0, &mut LinearMotion);
    assert!((world.get(id).expect("record").spawn_time() - 2.5).abs() < f64::EPSILON);
    assert!((world.time_elapsed_since_spawn(id).expect("alive") - 1.0).abs() < f64::EPSILON);
}

#[test]
fn unknown_names_coerce_with_diagnostics() {
    let mut world = World::default();
    let id = spawn_ship(&mut world, 0.0);
    assert_eq!(world.parse_status("STATUS_IN_FLIGHT"), EntityStatus::Active);
    assert_eq!(world.parse_status("STATUS_WOBBLING"), EntityStatus::Inactive);
    assert!(world.set_scan_class_name(id, "CLASS_UNICORN"));
    assert_eq!(world.get(id).expect("record").scan_class(), orbis_entity::ScanClass::NotSet);
    assert_eq!(world.instrumentation().current().diagnostics, 2);
}
