//! Frame tick: drive the manager with frame time and Avian's scene queries,
//! then mirror the active set onto the pooled entities.

use avian3d::prelude::*;
use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use super::components::{BulletHell, PooledBullet};
use super::messages::ImpactEffect;
use super::raycast::avian::AvianRaycaster;

pub fn simulate_bullets(
    time: Res<Time>,
    mut hell: ResMut<BulletHell>,
    spatial: SpatialQuery,
    q_sensors: Query<Entity, With<Sensor>>,
    mut sensors: Local<EntityHashSet>,
    mut impacts: MessageWriter<ImpactEffect>,
) {
    sensors.clear();
    sensors.extend(q_sensors.iter());

    let backend = AvianRaycaster::new(&spatial, &sensors);
    hell.tick(time.delta_secs(), &backend);

    impacts.write_batch(hell.drain_impacts());
}

pub fn sync_bullet_transforms(hell: Res<BulletHell>, mut q: Query<&mut Transform, With<PooledBullet>>) {
    for p in hell.active() {
        let mut tf = q
            .get_mut(p.handle)
            .expect("BulletHell active set contained an entity missing pooled bullet components");
        tf.translation = p.position;
        tf.rotation = p.rotation;
    }
}
