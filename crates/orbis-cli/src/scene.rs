// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reproducible scene generation.

use anyhow::{Context, Result};
use orbis_entity::{
    EntityDesc, EntityFlags, EntityKind, ScanClass, SphereGeometry, UniversalId, World,
};
use orbis_math::{HpVec3, Prng, Quat, Vec3};

/// Classes handed out to ordinary ships.
const SHIP_CLASSES: [ScanClass; 5] = [
    ScanClass::Neutral,
    ScanClass::Police,
    ScanClass::Military,
    ScanClass::Thargoid,
    ScanClass::Cargo,
];

/// Scene layout knobs.
#[derive(Debug, Clone, Copy)]
pub struct SceneSpec {
    pub entities: u32,
    pub seed: u64,
    pub spread: f64,
}

/// Spawns and enters `spec.entities` entities into `world`.
///
/// Roughly one in forty is a station carrying a beacon and two docking-bay
/// sub-entities, one in ten a visual effect, and the rest ships.
pub fn populate(world: &mut World, spec: SceneSpec) -> Result<Vec<UniversalId>> {
    let mut rng = Prng::from_seed(spec.seed);
    let mut ids = Vec::with_capacity(spec.entities as usize);
    let mut stations = 0_u32;
    while ids.len() < spec.entities as usize {
        let position = random_point(&mut rng, spec.spread);
        let roll = rng.next_below(40);
        if roll == 0 {
            stations += 1;
            let station = EntityDesc::new(EntityKind::Station, &SphereGeometry::new(600.0))
                .scan_class(ScanClass::Station)
                .at(position)
                .beacon(format!("Station-{stations:03}"));
            let station = enter(world, station)?;
            ids.push(station);
            for side in [-1.0, 1.0] {
                let bay = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(40.0))
                    .scan_class(ScanClass::Station)
                    .flags(EntityFlags { is_sub_entity: true, ..EntityFlags::default() })
                    .at(position.add_scaled(&Vec3::new(0.0, 0.0, 1.0), side * 500.0));
                let bay = world.spawn(bay).context("spawning docking bay")?;
                world.set_owner(bay, Some(station)).context("attaching docking bay")?;
                world.enter_world(bay).context("entering docking bay")?;
                ids.push(bay);
            }
        } else if roll < 5 {
            let effect = EntityDesc::new(EntityKind::VisualEffect, &SphereGeometry::new(20.0))
                .scan_class(ScanClass::VisualEffect)
                .at(position)
                .moving(random_velocity(&mut rng, 5.0));
            ids.push(enter(world, effect)?);
        } else {
            let class = SHIP_CLASSES[rng.next_below(SHIP_CLASSES.len() as u32) as usize];
            let radius = rng.next_range(10.0, 80.0);
            let heading = Quat::from_axis_angle(
                Vec3::new(0.0, 1.0, 0.0),
                rng.next_range(0.0, core::f64::consts::TAU) as f32,
            );
            let ship = EntityDesc::new(EntityKind::Ship, &SphereGeometry::new(radius))
                .scan_class(class)
                .at(position)
                .facing(heading)
                .moving(random_velocity(&mut rng, 300.0))
                .energy(rng.next_range(50.0, 250.0), 250.0);
            ids.push(enter(world, ship)?);
        }
    }
    Ok(ids)
}

fn enter(world: &mut World, desc: EntityDesc) -> Result<UniversalId> {
    let id = world.spawn(desc).context("spawning entity")?;
    world.enter_world(id).context("entering world")?;
    Ok(id)
}

fn random_point(rng: &mut Prng, spread: f64) -> HpVec3 {
    HpVec3::new(
        rng.next_range(-spread, spread),
        rng.next_range(-spread, spread),
        rng.next_range(-spread, spread),
    )
}

fn random_velocity(rng: &mut Prng, max: f64) -> Vec3 {
    Vec3::new(
        rng.next_range(-max, max) as f32,
        rng.next_range(-max, max) as f32,
        rng.next_range(-max, max) as f32,
    )
}
