//! [`RaycastBackend`] over Avian's spatial query pipeline.
//!
//! Rays are resolved in parallel chunks on the compute task pool. The caller
//! still sees a synchronous batch: `raycast_batch` returns once every chunk is done.
//! Chunk `k` of `hits` pairs with chunk `k` of `commands`, so results stay index-aligned.

use avian3d::prelude::*;
use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, TaskPool};

use super::{RaycastBackend, RaycastCommand, RaycastHit, RaycastQuery};

/// Rays per task.
const RAYS_PER_CHUNK: usize = 256;

pub struct AvianRaycaster<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    /// Sensor colliders, skipped unless `hit_triggers` is set.
    sensors: &'a EntityHashSet,
}

impl<'a, 'w, 's> AvianRaycaster<'a, 'w, 's> {
    pub fn new(spatial: &'a SpatialQuery<'w, 's>, sensors: &'a EntityHashSet) -> Self {
        Self { spatial, sensors }
    }

    fn cast(&self, cmd: &RaycastCommand, filter: &SpatialQueryFilter, query: &RaycastQuery) -> RaycastHit {
        let Ok(direction) = Dir3::new(cmd.direction) else {
            return RaycastHit::MISS;
        };

        let hit_triggers = query.hit_triggers;
        let predicate = |entity: Entity| hit_triggers || !self.sensors.contains(&entity);

        match self.spatial.cast_ray_predicate(
            cmd.origin,
            direction,
            cmd.max_distance,
            !query.hit_backfaces,
            filter,
            &predicate,
        ) {
            Some(data) => RaycastHit {
                collider: Some(data.entity),
                point: cmd.origin + *direction * data.distance,
                normal: data.normal,
                distance: data.distance,
            },
            None => RaycastHit::MISS,
        }
    }
}

impl RaycastBackend for AvianRaycaster<'_, '_, '_> {
    fn raycast_batch(&self, commands: &[RaycastCommand], query: &RaycastQuery, hits: &mut [RaycastHit]) {
        let filter = SpatialQueryFilter::from_mask(query.layer_mask);

        if commands.len() <= RAYS_PER_CHUNK {
            for (hit, cmd) in hits.iter_mut().zip(commands) {
                *hit = self.cast(cmd, &filter, query);
            }
            return;
        }

        let pool = ComputeTaskPool::get_or_init(TaskPool::default);
        let filter = &filter;
        pool.scope(|scope| {
            for (hits, commands) in hits
                .chunks_mut(RAYS_PER_CHUNK)
                .zip(commands.chunks(RAYS_PER_CHUNK))
            {
                scope.spawn(async move {
                    for (hit, cmd) in hits.iter_mut().zip(commands) {
                        *hit = self.cast(cmd, filter, query);
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod tests;
