//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; applying them is normally handled by
//! `ApplyDeferred` / schedule boundaries. We call `world.flush()` after running so queued commands
//! are applied before assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Deterministic xorshift32 stream for randomized invariant checks.
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(if seed == 0 { 1 } else { seed })
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    /// Uniform integer in `0..max`.
    pub fn below(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// In-memory [`BulletFactory`](crate::plugins::projectiles::pool::BulletFactory) that records
/// every lifecycle call, so pool tests can check ownership without an ECS world.
#[derive(Default, Debug)]
pub struct RecordingFactory {
    next: u32,
    pub live: std::collections::BTreeSet<u32>,
    pub active: std::collections::BTreeSet<u32>,
    pub created: usize,
    pub destroyed: usize,
}

impl crate::plugins::projectiles::pool::BulletFactory for RecordingFactory {
    type Handle = u32;

    fn create(&mut self) -> u32 {
        let h = self.next;
        self.next += 1;
        self.created += 1;
        self.live.insert(h);
        h
    }

    fn activate(&mut self, handle: u32) {
        assert!(self.live.contains(&handle), "activate on destroyed handle {handle}");
        assert!(self.active.insert(handle), "handle {handle} activated twice");
    }

    fn deactivate(&mut self, handle: u32) {
        assert!(self.active.remove(&handle), "handle {handle} deactivated while inactive");
    }

    fn destroy(&mut self, handle: u32) {
        assert!(!self.active.contains(&handle), "destroyed active handle {handle}");
        assert!(self.live.remove(&handle), "handle {handle} destroyed twice");
        self.destroyed += 1;
    }
}
