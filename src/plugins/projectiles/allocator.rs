//! Control consumers: pool prewarm, pattern selection, volley spawning.
//!
//! These are the only systems that grow the active set. A missing spawn anchor
//! is a world precondition (log + skip); pool exhaustion is a capacity decision
//! already counted by the manager.

use bevy::prelude::*;

use super::components::{BulletHell, BulletOrigin};
use super::factory::CommandsFactory;
use super::messages::{SelectPattern, SpawnPattern};
use super::pattern::LOCAL_FORWARD;

pub fn init_bullet_pool(mut commands: Commands, mut hell: ResMut<BulletHell>) {
    let created = hell.prewarm(&mut CommandsFactory::new(&mut commands));
    info!("bullet pool prewarmed: {created} new, {} idle", hell.pool().idle_len());
}

pub fn apply_pattern_selection(mut reader: MessageReader<SelectPattern>, mut hell: ResMut<BulletHell>) {
    for SelectPattern(pattern) in reader.read() {
        hell.set_pattern(*pattern);
        info!("switched to {} pattern", pattern.name());
    }
}

pub fn allocate_patterns(
    mut commands: Commands,
    mut hell: ResMut<BulletHell>,
    mut reader: MessageReader<SpawnPattern>,
    q_origin: Query<&GlobalTransform, With<BulletOrigin>>,
) {
    if reader.is_empty() {
        return;
    }

    let anchor = match q_origin.single() {
        Ok(tf) => tf,
        Err(e) => {
            debug!("No single BulletOrigin: {e:?}");
            reader.clear();
            return;
        }
    };
    let origin = anchor.translation();
    let forward = anchor.rotation() * LOCAL_FORWARD;

    let mut factory = CommandsFactory::new(&mut commands);
    for _ in reader.read() {
        // Capacity decision: already counted + warned by the manager.
        if let Err(e) = hell.spawn_pattern(&mut factory, origin, forward) {
            debug!("volley skipped: {e}");
        }
    }
}
