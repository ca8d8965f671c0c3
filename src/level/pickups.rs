//! Level domain: consumable pickups that refresh jumps or boost velocity.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{MovementController, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    /// Restores multi-jump charges
    JumpRefresher { charges: u32, ignore_limit: bool },
    /// Pushes the body along its current horizontal direction
    VelocityBooster { boost: Vec2, override_vertical: bool },
}

#[derive(Component, Debug)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Counts down while consumed
    pub respawn: Timer,
    pub consumed: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, respawn_secs: f32) -> Self {
        Self {
            kind,
            respawn: Timer::from_seconds(respawn_secs, TimerMode::Once),
            consumed: false,
        }
    }
}

pub(crate) fn collect_pickups(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    mut pickups: Query<(&mut Pickup, &mut Visibility)>,
    mut players: Query<(&mut MovementController, &mut LinearVelocity), With<Player>>,
) {
    for event in collisions.read() {
        for (pickup_entity, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok((mut pickup, mut visibility)) = pickups.get_mut(pickup_entity) else {
                continue;
            };
            let Ok((mut controller, mut velocity)) = players.get_mut(other) else {
                continue;
            };
            if pickup.consumed || controller.is_disabled() {
                continue;
            }

            match pickup.kind {
                PickupKind::JumpRefresher {
                    charges,
                    ignore_limit,
                } => {
                    controller.grant_jump_charges(charges, ignore_limit);
                }
                PickupKind::VelocityBooster {
                    boost,
                    override_vertical,
                } => {
                    velocity.0 = controller.grant_velocity_boost(velocity.0, boost, override_vertical);
                }
            }

            pickup.consumed = true;
            pickup.respawn.reset();
            *visibility = Visibility::Hidden;
            commands.entity(pickup_entity).insert(ColliderDisabled);
            debug!("Pickup {:?} consumed: {:?}", pickup_entity, pickup.kind);
        }
    }
}

pub(crate) fn respawn_pickups(
    mut commands: Commands,
    time: Res<Time>,
    mut pickups: Query<(Entity, &mut Pickup, &mut Visibility)>,
) {
    for (entity, mut pickup, mut visibility) in &mut pickups {
        if !pickup.consumed {
            continue;
        }

        if pickup.respawn.tick(time.delta()).just_finished() {
            pickup.consumed = false;
            *visibility = Visibility::Inherited;
            commands.entity(entity).remove::<ColliderDisabled>();
            debug!("Pickup {:?} respawned", entity);
        }
    }
}
