//! World plugin: spawns the arena walls and the volley anchor.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::plugins::projectiles::components::BulletOrigin;

/// Inner half extent of the square arena. Inside `bullet_max_distance`, so volleys reach the walls.
const HALF_EXTENT: f32 = 20.0;
const WALL_THICKNESS: f32 = 1.0;
const WALL_HEIGHT: f32 = 4.0;
/// Volleys leave at chest height.
const ORIGIN_HEIGHT: f32 = 1.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_origin));
}

fn spawn_arena(mut commands: Commands) {
    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Bullet, Layer::Enemy]);

    let mut spawn_wall = |name: &'static str, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name),
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let span = HALF_EXTENT * 2.0 + WALL_THICKNESS * 2.0;
    let offset = HALF_EXTENT + WALL_THICKNESS * 0.5;
    let y = WALL_HEIGHT * 0.5;

    spawn_wall(
        "WallNorth",
        Vec3::new(0.0, y, offset),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_wall(
        "WallSouth",
        Vec3::new(0.0, y, -offset),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_wall(
        "WallEast",
        Vec3::new(offset, y, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
    );
    spawn_wall(
        "WallWest",
        Vec3::new(-offset, y, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, span),
    );
}

fn spawn_origin(mut commands: Commands) {
    commands.spawn((
        Name::new("BulletOrigin"),
        BulletOrigin,
        Transform::from_xyz(0.0, ORIGIN_HEIGHT, 0.0),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
