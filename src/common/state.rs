//! Simulation state machine.
//!
//! Bullets only tick while `InGame`. Leaving it drains the active set and
//! disposes the pool, so re-entering starts from a fresh prewarm.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Stopped,
}
