//! Free-list bullet pool.
//!
//! The pool never knows what a bullet "is". It holds opaque handles and drives
//! them through a [`BulletFactory`], which is passed in per call so the same pool
//! works against `Commands` at runtime and a plain counter in tests.
//!
//! # Ownership
//! A handle is either idle (owned by `idle`) or in flight (owned by the caller).
//! `in_use` counts the second group. The pool does not track *which* handles are
//! in flight: releasing the same handle twice is a caller bug, caught only when
//! the counter would underflow.
//!
//! # Capacity
//! - `default_capacity` instances are created up front by [`BulletPool::prewarm`].
//! - `max_size` bounds idle + in flight under [`ExhaustionPolicy::Reject`].
//! - Under [`ExhaustionPolicy::Grow`] acquisition always succeeds; releases that
//!   would push the idle list past `max_size` destroy the instance instead.

use bevy::prelude::*;
use thiserror::Error;

/// Entity backend for the pool: create / activate / deactivate / destroy.
///
/// `create` returns an instance in the inactive state.
pub trait BulletFactory {
    type Handle: Copy;

    fn create(&mut self) -> Self::Handle;
    fn activate(&mut self, handle: Self::Handle);
    fn deactivate(&mut self, handle: Self::Handle);
    fn destroy(&mut self, handle: Self::Handle);
}

/// What `acquire` does when no idle instance exists and the pool is at `max_size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Fail with [`PoolExhausted`].
    #[default]
    Reject,
    /// Create anyway; the excess is destroyed again on release.
    Grow,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bullet pool exhausted: requested {requested}, available {available}")]
pub struct PoolExhausted {
    pub requested: usize,
    pub available: usize,
}

#[derive(Debug)]
pub struct BulletPool<H> {
    idle: Vec<H>,
    in_use: usize,
    default_capacity: usize,
    max_size: usize,
    policy: ExhaustionPolicy,
    created: u64,
    destroyed: u64,
}

impl<H: Copy> BulletPool<H> {
    pub fn new(default_capacity: usize, max_size: usize, policy: ExhaustionPolicy) -> Self {
        let max_size = max_size.max(default_capacity);
        Self {
            idle: Vec::with_capacity(default_capacity),
            in_use: 0,
            default_capacity,
            max_size,
            policy,
            created: 0,
            destroyed: 0,
        }
    }

    #[inline]
    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Live instances: idle + in flight.
    #[inline]
    pub fn total(&self) -> usize {
        self.idle.len() + self.in_use
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub fn created(&self) -> u64 {
        self.created
    }

    #[inline]
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    #[inline]
    pub fn idle(&self) -> &[H] {
        &self.idle
    }

    /// How many handles `acquire` can hand out right now without failing.
    pub fn available(&self) -> usize {
        match self.policy {
            ExhaustionPolicy::Grow => usize::MAX,
            ExhaustionPolicy::Reject => {
                self.idle.len() + self.max_size.saturating_sub(self.total())
            }
        }
    }

    /// Succeeds only if `requested` acquisitions would all succeed.
    pub fn ensure_available(&self, requested: usize) -> Result<(), PoolExhausted> {
        let available = self.available();
        if requested > available {
            return Err(PoolExhausted { requested, available });
        }
        Ok(())
    }

    /// Create inactive instances until the pool holds `default_capacity`.
    pub fn prewarm<F>(&mut self, factory: &mut F) -> usize
    where
        F: BulletFactory<Handle = H>,
    {
        let missing = self.default_capacity.saturating_sub(self.total());
        self.idle.reserve(missing);
        for _ in 0..missing {
            let handle = factory.create();
            self.created += 1;
            self.idle.push(handle);
        }
        missing
    }

    pub fn acquire<F>(&mut self, factory: &mut F) -> Result<H, PoolExhausted>
    where
        F: BulletFactory<Handle = H>,
    {
        let handle = match self.idle.pop() {
            Some(h) => h,
            None => {
                if self.policy == ExhaustionPolicy::Reject && self.total() >= self.max_size {
                    return Err(PoolExhausted { requested: 1, available: 0 });
                }
                self.created += 1;
                factory.create()
            }
        };

        factory.activate(handle);
        self.in_use += 1;
        Ok(handle)
    }

    /// Return an in-flight handle. Past `max_size` idle instances it is destroyed instead.
    pub fn release<F>(&mut self, factory: &mut F, handle: H)
    where
        F: BulletFactory<Handle = H>,
    {
        self.in_use = self
            .in_use
            .checked_sub(1)
            .expect("BulletPool released more handles than it handed out");

        factory.deactivate(handle);

        if self.idle.len() >= self.max_size {
            factory.destroy(handle);
            self.destroyed += 1;
        } else {
            self.idle.push(handle);
        }
    }

    /// Destroy every idle instance.
    ///
    /// Panics if any handle is still in flight: the active set must be drained first.
    pub fn dispose<F>(&mut self, factory: &mut F)
    where
        F: BulletFactory<Handle = H>,
    {
        assert_eq!(
            self.in_use, 0,
            "BulletPool disposed with {} bullets still in flight",
            self.in_use
        );

        let n = self.idle.len();
        for handle in self.idle.drain(..) {
            factory.destroy(handle);
        }
        self.destroyed += n as u64;
        debug!("bullet pool disposed {n} idle instances");
    }
}
