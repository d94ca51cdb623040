//! Buffered control + output messages.
//!
//! Producers (input, AI, tests) never touch the `BulletHell` resource directly.
//! They write intent; the projectile systems are the single writer that applies it.
//!
//! - `SelectPattern` / `SpawnPattern`: control in.
//! - `ImpactEffect`: confirmed hits out. Receivers own whatever they spawn for it.

use bevy::prelude::*;

use super::pattern::BulletPattern;

/// Swap the pattern used by the next volley.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SelectPattern(pub BulletPattern);

/// Fire one volley from the `BulletOrigin` anchor.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct SpawnPattern;

/// A bullet hit `surface` at `position`.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ImpactEffect {
    pub position: Vec3,
    pub normal: Vec3,
    pub surface: Entity,
}
