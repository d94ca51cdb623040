//! Pattern generation: initial position + direction for a volley of N bullets.
//!
//! Every pattern works in a local frame where +Z is forward and +Y is up.
//! Local directions are built in the XZ plane, then rotated by
//! `look_rotation(forward, PATTERN_UP)` so the volley faces the spawn anchor.
//!
//! Generation is pure. The generator only carries the currently selected
//! [`BulletPattern`], which is swapped between frames.

use bevy::prelude::*;

/// Local forward axis for patterns and for bullet orientation.
pub const LOCAL_FORWARD: Vec3 = Vec3::Z;

/// Up hint used when aligning a pattern to a forward axis.
pub const PATTERN_UP: Vec3 = Vec3::Y;

/// One entry of a generated volley.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternShot {
    pub position: Vec3,
    /// Unit length.
    pub direction: Vec3,
    pub speed: f32,
}

impl PatternShot {
    #[inline]
    pub fn new(position: Vec3, direction: Vec3, speed: f32) -> Self {
        Self {
            position,
            direction: direction.normalize_or(LOCAL_FORWARD),
            speed,
        }
    }
}

/// The fixed set of volley shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletPattern {
    /// Evenly spaced full circle around the up axis.
    Radial,
    /// Forward fan whose lateral component follows `sin(i * frequency) * amplitude`.
    Wave { frequency: f32, amplitude: f32 },
    /// Angle grows by `angle_step_deg` per bullet, spawn offset grows by `radius_step`.
    Spiral { angle_step_deg: f32, radius_step: f32 },
}

impl Default for BulletPattern {
    fn default() -> Self {
        Self::Radial
    }
}

impl BulletPattern {
    pub const WAVE: Self = Self::Wave { frequency: 0.1, amplitude: 1.0 };
    pub const SPIRAL: Self = Self::Spiral { angle_step_deg: 10.0, radius_step: 0.1 };

    pub fn name(&self) -> &'static str {
        match self {
            Self::Radial => "Radial",
            Self::Wave { .. } => "Wave",
            Self::Spiral { .. } => "Spiral",
        }
    }

    /// Shot `i` of `count`, with `frame` mapping local axes onto the world.
    pub fn shot(&self, i: usize, count: usize, origin: Vec3, frame: Quat, speed: f32) -> PatternShot {
        let fi = i as f32;
        match *self {
            Self::Radial => {
                let angle_step = 360.0 / count as f32;
                let direction = frame * planar_direction(fi * angle_step);
                PatternShot::new(origin, direction, speed)
            }
            Self::Wave { frequency, amplitude } => {
                let lateral = (fi * frequency).sin() * amplitude;
                let local = Vec3::new(lateral, 0.0, 1.0).normalize();
                PatternShot::new(origin, frame * local, speed)
            }
            Self::Spiral { angle_step_deg, radius_step } => {
                let direction = frame * planar_direction(fi * angle_step_deg);
                let radius = fi * radius_step;
                PatternShot::new(origin + direction * radius, direction, speed)
            }
        }
    }
}

/// Unit vector in the local XZ plane, `degrees` measured from +X towards +Z.
#[inline]
fn planar_direction(degrees: f32) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec3::new(cos, 0.0, sin)
}

/// Rotation whose local +Z points along `forward`, keeping local +Y as close to `up` as possible.
///
/// Falls back to the shortest arc when `forward` is parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or(LOCAL_FORWARD);
    let x = up.cross(z);
    if x.length_squared() < 1e-8 {
        return Quat::from_rotation_arc(LOCAL_FORWARD, z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Holds the selected pattern and produces volleys from it.
#[derive(Debug, Clone, Default)]
pub struct BulletPatternGenerator {
    pattern: BulletPattern,
}

impl BulletPatternGenerator {
    pub fn new(pattern: BulletPattern) -> Self {
        Self { pattern }
    }

    #[inline]
    pub fn pattern(&self) -> BulletPattern {
        self.pattern
    }

    #[inline]
    pub fn set_pattern(&mut self, pattern: BulletPattern) {
        self.pattern = pattern;
    }

    /// Exactly `count` shots; `count == 0` is an empty volley.
    pub fn generate(&self, origin: Vec3, forward: Vec3, count: usize, speed: f32) -> Vec<PatternShot> {
        let mut out = Vec::with_capacity(count);
        self.generate_into(&mut out, origin, forward, count, speed);
        out
    }

    /// Same as [`generate`](Self::generate) but reuses `out`'s allocation.
    pub fn generate_into(
        &self,
        out: &mut Vec<PatternShot>,
        origin: Vec3,
        forward: Vec3,
        count: usize,
        speed: f32,
    ) {
        out.clear();
        if count == 0 {
            return;
        }
        let frame = look_rotation(forward, PATTERN_UP);
        out.extend((0..count).map(|i| self.pattern.shot(i, count, origin, frame, speed)));
    }
}
