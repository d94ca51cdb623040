mod common;

use bevy::prelude::*;
use bullet_hell::common::state::GameState;
use bullet_hell::plugins::projectiles::components::{BulletHell, PooledBullet};
use bullet_hell::plugins::projectiles::messages::SpawnPattern;

fn pooled_visibility(app: &mut App) -> Vec<Visibility> {
    app.world_mut()
        .query_filtered::<&Visibility, With<PooledBullet>>()
        .iter(app.world())
        .copied()
        .collect()
}

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn entering_in_game_prewarms_the_pool() {
    let mut app = common::app_headless();
    app.update();

    let capacity = app.world().resource::<BulletHell>().pool().idle_len();
    assert_eq!(capacity, 100);

    let vis = pooled_visibility(&mut app);
    assert_eq!(vis.len(), 100);
    assert!(vis.iter().all(|v| *v == Visibility::Hidden));
}

#[test]
fn spawn_message_fires_a_full_volley() {
    let mut app = common::app_headless();
    app.update();

    app.world_mut().write_message(SpawnPattern);
    app.update();

    let hell = app.world().resource::<BulletHell>();
    assert_eq!(hell.active().len() + hell.pool().idle_len(), 100);
    assert_eq!(hell.stats().spawned, 100);
    assert_eq!(hell.stats().rejected_spawns, 0);

    // A second volley needs another 100 instances; the pool grows up to its cap.
    app.world_mut().write_message(SpawnPattern);
    app.update();
    assert_eq!(app.world().resource::<BulletHell>().stats().spawned, 200);
}

#[test]
fn leaving_in_game_disposes_every_bullet() {
    let mut app = common::app_headless();
    app.update();

    app.world_mut().write_message(SpawnPattern);
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Stopped);
    app.update();

    let hell = app.world().resource::<BulletHell>();
    assert!(hell.active().is_empty());
    assert_eq!(hell.pool().total(), 0);
    assert!(pooled_visibility(&mut app).is_empty());
}
