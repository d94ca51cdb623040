use bevy::prelude::*;
use avian3d::prelude::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::projectiles::components::BulletOrigin;

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world.query::<(&Name, &RigidBody)>().iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn spawns_a_single_origin_inside_the_arena() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_origin);

    let mut q = world.query_filtered::<&Transform, With<BulletOrigin>>();
    let tf = q.single(&world).expect("one BulletOrigin");
    assert!(tf.translation.x.abs() < super::HALF_EXTENT);
    assert!(tf.translation.z.abs() < super::HALF_EXTENT);
}
