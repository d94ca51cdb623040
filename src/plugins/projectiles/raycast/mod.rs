//! Batched ray queries: one dispatch per sub-step for the whole active set.
//!
//! ```text
//!  origins[]  directions[]
//!      │           │
//!      └────┬──────┘
//!           v
//!  commands[0..min(n, max_batch_size)]   (fixed PROBE_DISTANCE each)
//!           │
//!           v   RaycastBackend::raycast_batch  (single call)
//!  hits[0..commands.len()]               (index-aligned, miss = collider None)
//!           │
//!           v
//!  on_result(&hits)                      (only if at least one command was issued)
//! ```
//!
//! Inputs past `max_batch_size` are dropped. Truncation is counted in
//! [`RaycastBatchProcessor::dropped_rays`] and is never an error; callers that can
//! exceed the cap must chunk themselves.
//!
//! Command and hit buffers are owned by the processor and reused between calls.

use avian3d::prelude::LayerMask;
use bevy::prelude::*;

pub mod avian;

/// Length of every probe, independent of bullet speed.
pub const PROBE_DISTANCE: f32 = 1.0;

pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Recognized query toggles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastQuery {
    /// Which surfaces are testable.
    pub layer_mask: LayerMask,
    /// Rays starting inside a collider report its boundary instead of the start point.
    pub hit_backfaces: bool,
    /// Sensors count as hits.
    pub hit_triggers: bool,
    /// Backends with per-face geometry may report more than the first face.
    /// Only the first hit per ray is ever returned.
    pub hit_multiple_faces: bool,
}

impl Default for RaycastQuery {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::ALL,
            hit_backfaces: false,
            hit_triggers: false,
            hit_multiple_faces: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastCommand {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
}

/// One record per command. A miss has no collider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub collider: Option<Entity>,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

impl RaycastHit {
    pub const MISS: Self = Self {
        collider: None,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
        distance: 0.0,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.collider.is_some()
    }
}

impl Default for RaycastHit {
    fn default() -> Self {
        Self::MISS
    }
}

/// Scene capability: resolve N commands into N hit records in one call.
///
/// `hits` arrives pre-filled with [`RaycastHit::MISS`] and has the same length as
/// `commands`. Implementations only write the slots that hit.
pub trait RaycastBackend {
    fn raycast_batch(&self, commands: &[RaycastCommand], query: &RaycastQuery, hits: &mut [RaycastHit]);
}

#[derive(Debug)]
pub struct RaycastBatchProcessor {
    max_batch_size: usize,
    commands: Vec<RaycastCommand>,
    hits: Vec<RaycastHit>,
    batches: u64,
    dropped_rays: u64,
}

impl Default for RaycastBatchProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BATCH_SIZE)
    }
}

impl RaycastBatchProcessor {
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            max_batch_size,
            commands: Vec::new(),
            hits: Vec::new(),
            batches: 0,
            dropped_rays: 0,
        }
    }

    #[inline]
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Dispatches issued so far.
    #[inline]
    pub fn batches(&self) -> u64 {
        self.batches
    }

    /// Rays dropped by the batch cap so far.
    #[inline]
    pub fn dropped_rays(&self) -> u64 {
        self.dropped_rays
    }

    /// Commands built by the most recent call.
    #[inline]
    pub fn last_commands(&self) -> &[RaycastCommand] {
        &self.commands
    }

    /// Build, dispatch and collect one batch. Returns the number of commands issued.
    ///
    /// `on_result` runs synchronously after the backend returns, and only when at
    /// least one command was issued.
    pub fn perform_raycasts<B>(
        &mut self,
        backend: &B,
        origins: &[Vec3],
        directions: &[Vec3],
        query: &RaycastQuery,
        on_result: impl FnOnce(&[RaycastHit]),
    ) -> usize
    where
        B: RaycastBackend + ?Sized,
    {
        debug_assert_eq!(origins.len(), directions.len(), "ray batch arrays out of step");

        let requested = origins.len().min(directions.len());
        let ray_count = requested.min(self.max_batch_size);

        if ray_count < requested {
            let dropped = requested - ray_count;
            self.dropped_rays += dropped as u64;
            warn_once!(
                "raycast batch capped at {}; dropping {dropped} rays (further drops are only counted)",
                self.max_batch_size
            );
        }

        self.commands.clear();
        self.commands.extend(
            origins[..ray_count]
                .iter()
                .zip(&directions[..ray_count])
                .map(|(&origin, &direction)| RaycastCommand {
                    origin,
                    direction,
                    max_distance: PROBE_DISTANCE,
                }),
        );

        if self.commands.is_empty() {
            return 0;
        }

        self.hits.clear();
        self.hits.resize(ray_count, RaycastHit::MISS);

        backend.raycast_batch(&self.commands, query, &mut self.hits);
        self.batches += 1;

        on_result(&self.hits);
        ray_count
    }
}
