//! In-flight bullet state.

use bevy::prelude::*;

use super::pattern::{look_rotation, PatternShot, LOCAL_FORWARD, PATTERN_UP};

/// A pooled bullet while it is owned by the active set.
///
/// `handle` ties it back to the pool's backend instance. Everything else is
/// reinitialized on every launch, so nothing leaks between lives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile<H> {
    pub handle: H,
    pub position: Vec3,
    /// Local +Z points along `direction`.
    pub rotation: Quat,
    pub direction: Vec3,
    pub spawn_position: Vec3,
    pub max_distance: f32,
    pub speed: f32,
}

impl<H> Projectile<H> {
    pub fn launch(handle: H, shot: &PatternShot, max_distance: f32) -> Self {
        Self {
            handle,
            position: shot.position,
            rotation: look_rotation(shot.direction, PATTERN_UP),
            direction: shot.direction,
            spawn_position: shot.position,
            max_distance,
            speed: shot.speed,
        }
    }

    #[inline]
    pub fn traveled_distance_sq(&self) -> f32 {
        self.position.distance_squared(self.spawn_position)
    }

    #[inline]
    pub fn has_traveled_max_distance(&self) -> bool {
        self.traveled_distance_sq() >= self.max_distance * self.max_distance
    }

    /// Constant-speed step along the bullet's own forward axis.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += (self.rotation * LOCAL_FORWARD) * self.speed * dt;
    }
}
