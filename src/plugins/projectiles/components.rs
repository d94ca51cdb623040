use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::manager::BulletHellManager;

/// Marker for entities backing pooled bullets.
#[derive(Component)]
pub struct PooledBullet;

/// Spawn anchor: volleys start at its global position and face its local +Z.
#[derive(Component)]
pub struct BulletOrigin;

/// Placeholder entity spawned for a confirmed hit.
#[derive(Component)]
pub struct ImpactFx;

#[derive(Component, Deref, DerefMut)]
pub struct Lifetime(pub Timer);

/// The simulation core, with pooled bullet entities as handles.
#[derive(Resource, Deref, DerefMut)]
pub struct BulletHell(pub BulletHellManager<Entity>);

impl BulletHell {
    pub fn new(tunables: &Tunables) -> Self {
        Self(BulletHellManager::new(tunables))
    }
}
