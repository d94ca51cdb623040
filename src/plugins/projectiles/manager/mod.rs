//! The per-frame bullet pipeline.
//!
//! ```text
//!  tick(frame_delta, backend)
//!  ├─ prune      active ──(traveled² >= max²)──> to_return
//!  ├─ K sub-steps, dt = frame_delta / K
//!  │  ├─ integrate   active positions        (parallel, barrier on return)
//!  │  └─ collide     active -> origins/dirs -> one ray batch
//!  │                 hit[i] => active[i] ──> to_return, ImpactEffect queued
//!  └─ prune      again, so bullets expiring this frame are flushed this frame
//!  flush(factory)    to_return ──release──> pool idle
//! ```
//!
//! # Invariants
//! - A projectile lives in exactly one of: pool idle, `active`, `to_return`.
//! - `active` is only mutated between parallel phases (prunes, hit application, spawn).
//! - Hit indices refer to the `active` snapshot the batch was built from; hits are
//!   applied before anything else touches `active`.
//! - Removal is two-phase: flag during a read pass, then compact + move in one sweep.
//!
//! An empty active set still runs every sub-step (each one is a no-op), so frame
//! timing does not depend on bullet count reaching zero.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::messages::ImpactEffect;
use super::pattern::{BulletPattern, BulletPatternGenerator, PatternShot};
use super::pool::{BulletFactory, BulletPool, PoolExhausted};
use super::projectile::Projectile;
use super::raycast::{RaycastBackend, RaycastBatchProcessor, RaycastHit, RaycastQuery};

pub mod integrate;

/// Cumulative counters. Rejections and drops surface here instead of failing a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BulletHellStats {
    pub frames: u64,
    pub spawned: u64,
    pub rejected_spawns: u64,
    pub expired: u64,
    pub hits: u64,
    pub dropped_rays: u64,
    pub returned: u64,
}

pub struct BulletHellManager<H> {
    bullet_count: usize,
    bullet_speed: f32,
    max_distance: f32,
    sub_steps: u32,
    query: RaycastQuery,

    pool: BulletPool<H>,
    patterns: BulletPatternGenerator,
    raycasts: RaycastBatchProcessor,

    active: Vec<Projectile<H>>,
    to_return: Vec<Projectile<H>>,
    impacts: Vec<ImpactEffect>,

    // Scratch, reused every frame.
    shots: Vec<PatternShot>,
    origins: Vec<Vec3>,
    directions: Vec<Vec3>,

    stats: BulletHellStats,
}

impl<H: Copy + Send> BulletHellManager<H> {
    pub fn new(tunables: &Tunables) -> Self {
        Self::with_parts(
            tunables,
            BulletPool::new(
                tunables.pool_default_capacity,
                tunables.pool_max_size,
                tunables.pool_exhaustion,
            ),
            BulletPatternGenerator::default(),
            RaycastBatchProcessor::new(tunables.max_raycasts_per_batch),
        )
    }

    /// Build around explicitly constructed collaborators.
    pub fn with_parts(
        tunables: &Tunables,
        pool: BulletPool<H>,
        patterns: BulletPatternGenerator,
        raycasts: RaycastBatchProcessor,
    ) -> Self {
        let capacity = tunables.pool_default_capacity;
        Self {
            bullet_count: tunables.bullet_count,
            bullet_speed: tunables.bullet_speed,
            max_distance: tunables.bullet_max_distance,
            sub_steps: tunables.sub_steps,
            query: tunables.raycast_query(),
            pool,
            patterns,
            raycasts,
            active: Vec::with_capacity(capacity),
            to_return: Vec::with_capacity(capacity),
            impacts: Vec::new(),
            shots: Vec::with_capacity(tunables.bullet_count),
            origins: Vec::with_capacity(capacity),
            directions: Vec::with_capacity(capacity),
            stats: BulletHellStats::default(),
        }
    }

    #[inline]
    pub fn active(&self) -> &[Projectile<H>] {
        &self.active
    }

    /// Bullets removed this frame and waiting for [`flush`](Self::flush).
    #[inline]
    pub fn pending_return(&self) -> &[Projectile<H>] {
        &self.to_return
    }

    #[inline]
    pub fn pool(&self) -> &BulletPool<H> {
        &self.pool
    }

    #[inline]
    pub fn stats(&self) -> BulletHellStats {
        self.stats
    }

    #[inline]
    pub fn sub_steps(&self) -> u32 {
        self.sub_steps
    }

    #[inline]
    pub fn pattern(&self) -> BulletPattern {
        self.patterns.pattern()
    }

    pub fn set_pattern(&mut self, pattern: BulletPattern) {
        self.patterns.set_pattern(pattern);
    }

    /// Impacts recorded since the last drain.
    pub fn drain_impacts(&mut self) -> std::vec::Drain<'_, ImpactEffect> {
        self.impacts.drain(..)
    }

    pub fn prewarm<F>(&mut self, factory: &mut F) -> usize
    where
        F: BulletFactory<Handle = H>,
    {
        self.pool.prewarm(factory)
    }

    /// Launch one volley of the current pattern from `origin` facing `forward`.
    ///
    /// All-or-nothing: if the pool cannot supply the whole volley nothing is spawned.
    pub fn spawn_pattern<F>(&mut self, factory: &mut F, origin: Vec3, forward: Vec3) -> Result<usize, PoolExhausted>
    where
        F: BulletFactory<Handle = H>,
    {
        let count = self.bullet_count;
        if let Err(err) = self.pool.ensure_available(count) {
            self.stats.rejected_spawns += 1;
            warn!("skipping {} volley: {err}", self.patterns.pattern().name());
            return Err(err);
        }

        self.patterns
            .generate_into(&mut self.shots, origin, forward, count, self.bullet_speed);

        self.active.reserve(self.shots.len());
        for shot in &self.shots {
            let handle = self.pool.acquire(factory)?;
            self.active.push(Projectile::launch(handle, shot, self.max_distance));
        }

        self.stats.spawned += count as u64;
        Ok(count)
    }

    /// Prune, then run every sub-step. Does not release anything; see [`flush`](Self::flush).
    pub fn tick<B>(&mut self, frame_delta: f32, backend: &B)
    where
        B: RaycastBackend + ?Sized,
    {
        self.stats.frames += 1;

        let mut expired = self.prune_expired();

        if self.sub_steps == 0 {
            return;
        }

        let dt = frame_delta.max(0.0) / self.sub_steps as f32;
        for _ in 0..self.sub_steps {
            integrate::integrate(&mut self.active, dt);
            self.resolve_collisions(backend);
        }

        // Bullets that crossed max distance this frame go back with this frame's flush.
        expired += self.prune_expired();

        trace!(
            "bullet frame {}: active={} pending_return={} expired={expired}",
            self.stats.frames,
            self.active.len(),
            self.to_return.len(),
        );
    }

    fn prune_expired(&mut self) -> usize {
        let expired = drain_where(&mut self.active, &mut self.to_return, |_, p| {
            p.has_traveled_max_distance()
        });
        self.stats.expired += expired as u64;
        expired
    }

    fn resolve_collisions<B>(&mut self, backend: &B)
    where
        B: RaycastBackend + ?Sized,
    {
        self.origins.clear();
        self.directions.clear();
        for p in &self.active {
            self.origins.push(p.position);
            self.directions.push(p.direction);
        }

        let active = &mut self.active;
        let to_return = &mut self.to_return;
        let impacts = &mut self.impacts;
        let mut hits = 0;

        let issued = self.raycasts.perform_raycasts(
            backend,
            &self.origins,
            &self.directions,
            &self.query,
            |results| {
                hits = drain_where(active, to_return, |i, _| {
                    results.get(i).is_some_and(RaycastHit::is_hit)
                });
                impacts.extend(results.iter().filter_map(|hit| {
                    hit.collider.map(|surface| ImpactEffect {
                        position: hit.point,
                        normal: hit.normal,
                        surface,
                    })
                }));
            },
        );

        self.stats.hits += hits as u64;
        self.stats.dropped_rays += (self.origins.len() - issued) as u64;
    }

    /// End of frame: hand every pending bullet back to the pool.
    pub fn flush<F>(&mut self, factory: &mut F) -> usize
    where
        F: BulletFactory<Handle = H>,
    {
        let n = self.to_return.len();
        for p in self.to_return.drain(..) {
            self.pool.release(factory, p.handle);
        }
        self.stats.returned += n as u64;
        n
    }

    /// Return every bullet, in flight or pending, to the pool.
    pub fn clear<F>(&mut self, factory: &mut F) -> usize
    where
        F: BulletFactory<Handle = H>,
    {
        self.to_return.append(&mut self.active);
        self.flush(factory)
    }

    /// Drain everything and destroy all pooled instances.
    pub fn dispose<F>(&mut self, factory: &mut F)
    where
        F: BulletFactory<Handle = H>,
    {
        self.clear(factory);
        self.impacts.clear();
        self.pool.dispose(factory);
    }
}

/// Move every flagged element of `active` to `to_return`, keeping survivors in order.
///
/// `flagged` sees each element exactly once, with its index in the unmodified slice.
fn drain_where<T>(
    active: &mut Vec<T>,
    to_return: &mut Vec<T>,
    mut flagged: impl FnMut(usize, &T) -> bool,
) -> usize {
    let len = active.len();
    let mut kept = 0;
    for read in 0..len {
        if flagged(read, &active[read]) {
            continue;
        }
        active.swap(kept, read);
        kept += 1;
    }
    to_return.extend(active.drain(kept..));
    len - kept
}
