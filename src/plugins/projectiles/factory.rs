//! `Commands`-backed entity backend for the bullet pool.
//!
//! Bullets are never structurally toggled after creation: activation only flips
//! `Visibility`, so acquire/release avoid archetype moves.

use bevy::prelude::*;

use super::components::PooledBullet;
use super::pool::BulletFactory;

pub struct CommandsFactory<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl<'a, 'w, 's> CommandsFactory<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>) -> Self {
        Self { commands }
    }
}

impl BulletFactory for CommandsFactory<'_, '_, '_> {
    type Handle = Entity;

    fn create(&mut self) -> Entity {
        self.commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                Transform::default(),
                Visibility::Hidden,
            ))
            .id()
    }

    fn activate(&mut self, handle: Entity) {
        self.commands.entity(handle).insert(Visibility::Visible);
    }

    fn deactivate(&mut self, handle: Entity) {
        self.commands.entity(handle).insert(Visibility::Hidden);
    }

    fn destroy(&mut self, handle: Entity) {
        self.commands.entity(handle).despawn();
    }
}
