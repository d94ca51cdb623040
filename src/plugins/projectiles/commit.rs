//! Return commit: recycle bullets back into the pool.
//!
//! Runs in `Last`, after every reader of this frame's active set. This is the
//! only place `to_return` is emptied, so hit and expiry decisions made anywhere
//! in the frame become pool-visible together.

use bevy::prelude::*;

use super::components::BulletHell;
use super::factory::CommandsFactory;

pub fn return_to_pool_commit(mut commands: Commands, mut hell: ResMut<BulletHell>) {
    let returned = hell.flush(&mut CommandsFactory::new(&mut commands));
    if returned > 0 {
        trace!("returned {returned} bullets to pool");
    }
}

/// Leaving the simulation: drain the active set, then destroy every pooled entity.
pub fn dispose_bullet_pool(mut commands: Commands, mut hell: ResMut<BulletHell>) {
    let stats = hell.stats();
    hell.dispose(&mut CommandsFactory::new(&mut commands));
    info!(
        "bullet pool disposed after {} frames ({} spawned, {} hits, {} expired, {} rejected volleys)",
        stats.frames, stats.spawned, stats.hits, stats.expired, stats.rejected_spawns
    );
}
