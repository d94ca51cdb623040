//! Projectiles plugin: pooled bullet volleys, sub-stepped movement, batched ray collision.
//!
//! # Philosophy: a plain core behind a thin ECS shell
//! The simulation (`manager`, `pool`, `pattern`, `raycast`) is ordinary Rust that
//! knows nothing about schedules. Its two outside capabilities are traits:
//! - [`pool::BulletFactory`]: create / activate / deactivate / destroy a bullet instance,
//! - [`raycast::RaycastBackend`]: resolve N rays into N hit records in one call.
//!
//! The systems in this module only adapt those traits to `Commands` and Avian's
//! `SpatialQuery`, and pump control messages in and impact messages out.
//!
//! # Data flow (big picture)
//! ```text
//!   OnEnter(InGame)
//!     init_bullet_pool            prewarm default_capacity hidden bullet entities
//!
//!   Update (InGame), chained
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) apply_pattern_selection                                               │
//!│      - reads: SelectPattern messages                                       │
//!│      - writes: current BulletPattern                                       │
//!│                                                                            │
//!│  (B) allocate_patterns                                                     │
//!│      - reads: SpawnPattern messages, BulletOrigin GlobalTransform          │
//!│      - mutates: pool idle -> active set (all-or-nothing per volley)        │
//!│                                                                            │
//!│  (C) simulate_bullets                                                      │
//!│      - prune expired -> to_return                                          │
//!│      - K x [ integrate (parallel) | one ray batch | hits -> to_return ]    │
//!│      - writes: ImpactEffect messages                                       │
//!│                                                                            │
//!│  (D) sync_bullet_transforms                                                │
//!│      - mirrors active positions/rotations onto pooled entities             │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate:  spawn_impact_effects, impact_lifetime
//!   Last:        return_to_pool_commit   to_return -> pool idle (hidden)
//!   OnExit(InGame): dispose_bullet_pool
//! ```
//!
//! # Where do we still branch?
//! - No single `BulletOrigin` in the world → the volley request is dropped.
//! - Pool cannot supply a full volley → the volley is skipped (counted).
//! - Active set larger than the ray batch cap → overflow rays skip collision this sub-step (counted).
//!
//! Everything else is treated as an invariant violation.

pub mod components;
pub mod messages;
pub mod pattern;
pub mod pool;
pub mod projectile;
pub mod raycast;
pub mod manager;

// ECS adapters + systems
pub mod factory;
pub mod allocator;
pub mod simulate;
pub mod commit;
pub mod effects;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Tunables>();
        let hell = components::BulletHell::new(app.world().resource::<Tunables>());

        app.insert_resource(hell)
            .add_message::<messages::SelectPattern>()
            .add_message::<messages::SpawnPattern>()
            .add_message::<messages::ImpactEffect>();

        app.add_systems(OnEnter(GameState::InGame), allocator::init_bullet_pool)
            .add_systems(OnExit(GameState::InGame), commit::dispose_bullet_pool);

        app.add_systems(
            Update,
            (
                allocator::apply_pattern_selection,
                allocator::allocate_patterns,
                simulate::simulate_bullets,
                simulate::sync_bullet_transforms,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            (effects::spawn_impact_effects, effects::impact_lifetime).chain(),
        );

        app.add_systems(
            Last,
            commit::return_to_pool_commit.run_if(in_state(GameState::InGame)),
        );
    }
}
