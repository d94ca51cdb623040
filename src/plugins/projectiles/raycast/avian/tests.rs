//! Avian backend against a real spatial pipeline.
//!
//! Each test builds a tiny physics app, lets a few fixed steps run so colliders
//! get their physics transforms, then casts from inside a one-shot system.

use std::time::Duration;

use avian3d::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::ecs::entity::EntityHashSet;
use bevy::mesh::MeshPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::time::TimeUpdateStrategy;

use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::plugins::projectiles::raycast::{
    RaycastBackend, RaycastCommand, RaycastHit, RaycastQuery, PROBE_DISTANCE,
};

use super::AvianRaycaster;

/// Rays step 0.1 along +Y, so ray `i` starts at `y = i / 10`.
const RAY_COUNT: usize = 600;
const RAY_START_X: f32 = 4.0;
const WALL_X: f32 = 5.0;
const TIMESTEP: Duration = Duration::from_millis(16);

struct Scene {
    app: App,
    wall: Entity,
    sensor: Entity,
}

fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        PhysicsPlugins::default(),
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        MeshPlugin,
    ));
    app.insert_resource(Gravity(Vec3::ZERO));
    app.insert_resource(Time::<Fixed>::from_duration(TIMESTEP));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TIMESTEP));
    app.finish();
    app
}

/// Four 1 x 9 x 2 slabs facing -X at `x = 4.5`, one per 10-unit band of `y`:
/// - `y` 0..10: World wall,
/// - `y` 20..30: Enemy-only slab,
/// - `y` 30..40: slab with default layers,
/// - `y` 40..50: World sensor.
fn scene() -> Scene {
    let mut app = physics_app();
    let world = app.world_mut();

    let mut slab = |band: f32, layers: Option<Layer>, sensor: bool| {
        let mut e = world.spawn((
            Transform::from_xyz(WALL_X, band + 5.0, 0.0),
            RigidBody::Static,
            Collider::cuboid(1.0, 9.0, 2.0),
        ));
        if let Some(layer) = layers {
            e.insert(CollisionLayers::new(layer, LayerMask::ALL));
        }
        if sensor {
            e.insert(Sensor);
        }
        e.id()
    };

    let wall = slab(0.0, Some(Layer::World), false);
    slab(20.0, Some(Layer::Enemy), false);
    slab(30.0, None, false);
    let sensor = slab(40.0, Some(Layer::World), true);

    for _ in 0..5 {
        app.update();
    }

    Scene { app, wall, sensor }
}

fn ray_batch() -> Vec<RaycastCommand> {
    (0..RAY_COUNT)
        .map(|i| RaycastCommand {
            origin: Vec3::new(RAY_START_X, i as f32 * 0.1, 0.0),
            direction: Vec3::X,
            max_distance: PROBE_DISTANCE,
        })
        .collect()
}

fn cast(app: &mut App, commands: Vec<RaycastCommand>, query: RaycastQuery) -> Vec<RaycastHit> {
    run_system_once(
        app.world_mut(),
        move |mut spatial: SpatialQuery, q_sensors: Query<Entity, With<Sensor>>| {
            spatial.update_pipeline();
            let sensors: EntityHashSet = q_sensors.iter().collect();
            let mut hits = vec![RaycastHit::MISS; commands.len()];
            AvianRaycaster::new(&spatial, &sensors).raycast_batch(&commands, &query, &mut hits);
            hits
        },
    )
}

fn world_only() -> RaycastQuery {
    RaycastQuery {
        layer_mask: Layer::World.into(),
        ..Default::default()
    }
}

/// `y` well inside `lo..hi`, away from slab edges.
fn inside(i: usize, lo: f32, hi: f32) -> bool {
    let y = i as f32 * 0.1;
    y > lo + 1.0 && y < hi - 1.0
}

#[test]
fn chunked_batch_stays_index_aligned() {
    let mut scene = scene();
    let hits = cast(&mut scene.app, ray_batch(), world_only());

    assert_eq!(hits.len(), RAY_COUNT);
    for (i, hit) in hits.iter().enumerate() {
        if inside(i, 0.0, 10.0) {
            assert_eq!(hit.collider, Some(scene.wall), "ray {i} should hit the wall");
            assert!((hit.distance - 0.5).abs() < 1e-3, "ray {i} distance {}", hit.distance);
            assert!((hit.point.y - i as f32 * 0.1).abs() < 1e-3);
            assert!(hit.normal.distance(Vec3::NEG_X) < 1e-3);
        } else if !(0.0..=10.0).contains(&(i as f32 * 0.1)) {
            assert!(!hit.is_hit(), "ray {i} should miss, got {hit:?}");
        }
    }
}

#[test]
fn layer_mask_selects_surfaces() {
    let mut scene = scene();

    let enemy_only = RaycastQuery {
        layer_mask: Layer::Enemy.into(),
        ..Default::default()
    };
    let hits = cast(&mut scene.app, ray_batch(), enemy_only);

    for (i, hit) in hits.iter().enumerate() {
        if inside(i, 20.0, 30.0) {
            assert!(hit.is_hit(), "ray {i} should hit the enemy slab");
        }
        if inside(i, 0.0, 10.0) || inside(i, 30.0, 40.0) || inside(i, 40.0, 50.0) {
            assert!(!hit.is_hit(), "ray {i} is outside the mask");
        }
    }
}

#[test]
fn unlayered_colliders_sit_on_the_default_layer() {
    assert_eq!(LayerMask::from(Layer::Default), LayerMask::DEFAULT);

    let mut scene = scene();
    let bullet_mask = RaycastQuery {
        layer_mask: [Layer::World, Layer::Enemy].into(),
        ..Default::default()
    };
    let hits = cast(&mut scene.app, ray_batch(), bullet_mask);

    for (i, hit) in hits.iter().enumerate() {
        if inside(i, 30.0, 40.0) {
            assert!(!hit.is_hit(), "ray {i} hit a collider without layers");
        }
    }
}

#[test]
fn sensors_only_hit_with_triggers_enabled() {
    let mut scene = scene();
    let through_sensor: Vec<_> = ray_batch()
        .into_iter()
        .filter(|c| c.origin.y > 42.0 && c.origin.y < 48.0)
        .collect();
    let n = through_sensor.len();
    assert!(n > 0);

    let skipped = cast(&mut scene.app, through_sensor.clone(), world_only());
    assert!(skipped.iter().all(|h| !h.is_hit()));

    let with_triggers = RaycastQuery {
        hit_triggers: true,
        ..world_only()
    };
    let hit = cast(&mut scene.app, through_sensor, with_triggers);
    assert_eq!(hit.len(), n);
    assert!(hit.iter().all(|h| h.collider == Some(scene.sensor)));
}

#[test]
fn backfaces_decide_rays_starting_inside() {
    let mut scene = scene();
    let inside_wall = vec![RaycastCommand {
        origin: Vec3::new(WALL_X, 5.0, 0.0),
        direction: Vec3::X,
        max_distance: PROBE_DISTANCE,
    }];

    let solid = cast(&mut scene.app, inside_wall.clone(), world_only());
    assert_eq!(solid[0].collider, Some(scene.wall));
    assert_eq!(solid[0].distance, 0.0);

    let hollow = RaycastQuery {
        hit_backfaces: true,
        ..world_only()
    };
    let exit = cast(&mut scene.app, inside_wall, hollow);
    assert_eq!(exit[0].collider, Some(scene.wall));
    assert!((exit[0].distance - 0.5).abs() < 1e-3);
}
