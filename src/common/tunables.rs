//! Tunable gameplay constants.

use avian3d::prelude::LayerMask;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::projectiles::pool::ExhaustionPolicy;
use crate::plugins::projectiles::raycast::RaycastQuery;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Bullets produced by one `SpawnPattern`.
    pub bullet_count: usize,
    pub bullet_speed: f32,
    pub bullet_max_distance: f32,
    /// Movement + collision passes per frame.
    pub sub_steps: u32,
    pub pool_default_capacity: usize,
    /// Hard cap on pooled instances (idle + in flight).
    pub pool_max_size: usize,
    pub pool_exhaustion: ExhaustionPolicy,
    pub max_raycasts_per_batch: usize,
    pub collision_mask: LayerMask,
    pub hit_backfaces: bool,
    pub hit_triggers: bool,
    pub hit_multiple_faces: bool,
    /// Seconds an impact placeholder stays alive.
    pub impact_effect_lifetime: f32,
}

impl Tunables {
    #[inline]
    pub fn raycast_query(&self) -> RaycastQuery {
        RaycastQuery {
            layer_mask: self.collision_mask,
            hit_backfaces: self.hit_backfaces,
            hit_triggers: self.hit_triggers,
            hit_multiple_faces: self.hit_multiple_faces,
        }
    }
}

impl Default for Tunables {
    fn default() -> Self {
        let bullet_count = 100;
        Self {
            bullet_count,
            bullet_speed: 10.0,
            bullet_max_distance: 30.0,
            sub_steps: 5,
            pool_default_capacity: bullet_count,
            pool_max_size: bullet_count * 10,
            pool_exhaustion: ExhaustionPolicy::Reject,
            max_raycasts_per_batch: 10_000,
            collision_mask: [Layer::World, Layer::Enemy].into(),
            hit_backfaces: false,
            hit_triggers: false,
            hit_multiple_faces: false,
            impact_effect_lifetime: 2.0,
        }
    }
}
