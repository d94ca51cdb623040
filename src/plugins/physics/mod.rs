use avian3d::prelude::*;
use bevy::prelude::*;

/// Bullets never become rigid bodies; Avian is only here for colliders and spatial queries.
pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::ZERO));
}
