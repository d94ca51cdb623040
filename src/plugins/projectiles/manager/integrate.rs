//! Position integration for one sub-step.
//!
//! Each bullet is independent, so the slice is split into chunks and advanced on
//! the compute task pool. `scope` blocks until every spawned chunk finishes,
//! which is the barrier the collision pass relies on.

use bevy::tasks::{ComputeTaskPool, TaskPool};

use crate::plugins::projectiles::projectile::Projectile;

/// Below this many bullets a plain loop beats task dispatch.
pub const PARALLEL_THRESHOLD: usize = 1024;

const BULLETS_PER_TASK: usize = 512;

pub fn integrate<H: Send>(bullets: &mut [Projectile<H>], dt: f32) {
    if bullets.len() < PARALLEL_THRESHOLD {
        bullets.iter_mut().for_each(|b| b.advance(dt));
        return;
    }

    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    pool.scope(|scope| {
        for chunk in bullets.chunks_mut(BULLETS_PER_TASK) {
            scope.spawn(async move {
                chunk.iter_mut().for_each(|b| b.advance(dt));
            });
        }
    });
}
