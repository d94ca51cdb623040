//! Collision layers.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Bit 0, i.e. `LayerMask::DEFAULT`: where colliders without `CollisionLayers` live.
    /// Kept out of the bullet mask so unlayered colliders are never hit.
    #[default]
    Default,
    World,
    Enemy,
    Bullet,
}
