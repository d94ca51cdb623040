//! Impact placeholders.
//!
//! Fire-and-forget: the simulation never tracks these. Each one is oriented so
//! its local up matches the surface normal, parented to the surface it hit
//! (keeping its world pose), and despawned when its `Lifetime` runs out.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{ImpactFx, Lifetime};
use super::messages::ImpactEffect;

pub fn spawn_impact_effects(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut reader: MessageReader<ImpactEffect>,
    q_surfaces: Query<&GlobalTransform>,
) {
    for ev in reader.read() {
        let up = ev.normal.normalize_or(Vec3::Y);
        let world = Transform::from_translation(ev.position).with_rotation(Quat::from_rotation_arc(Vec3::Y, up));

        let mut fx = commands.spawn((
            Name::new("ImpactFx"),
            ImpactFx,
            Lifetime(Timer::from_seconds(tunables.impact_effect_lifetime, TimerMode::Once)),
        ));

        match q_surfaces.get(ev.surface) {
            Ok(parent) => {
                let local = GlobalTransform::from(world).reparented_to(parent);
                fx.insert((local, ChildOf(ev.surface)));
            }
            Err(_) => {
                fx.insert(world);
            }
        }
    }
}

pub fn impact_lifetime(mut commands: Commands, time: Res<Time>, mut q: Query<(Entity, &mut Lifetime)>) {
    for (e, mut lt) in &mut q {
        lt.tick(time.delta());
        if lt.is_finished() {
            commands.entity(e).try_despawn();
        }
    }
}
