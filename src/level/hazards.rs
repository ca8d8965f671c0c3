//! Level domain: lethal hazards and the delayed respawn that follows a death.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::level::{LevelSettings, SpawnPoint};
use crate::movement::{InputSampler, MovementController, MovementEvent, Player, PlayerMovementEvent};

/// Kills the player on touch.
#[derive(Component, Debug)]
pub struct Hazard;

/// Countdown to the next respawn, if the player is dead.
#[derive(Resource, Debug, Default)]
pub struct PendingRespawn {
    pub timer: Option<Timer>,
}

pub(crate) fn kill_on_hazard_contact(
    mut collisions: MessageReader<CollisionStart>,
    hazards: Query<(), With<Hazard>>,
    mut players: Query<&mut MovementController, With<Player>>,
) {
    for event in collisions.read() {
        let player = if hazards.contains(event.collider1) {
            event.collider2
        } else if hazards.contains(event.collider2) {
            event.collider1
        } else {
            continue;
        };

        if let Ok(mut controller) = players.get_mut(player) {
            if !controller.is_disabled() {
                info!("Player touched a hazard");
                controller.kill();
            }
        }
    }
}

pub(crate) fn schedule_respawn(
    mut movement_events: MessageReader<PlayerMovementEvent>,
    settings: Res<LevelSettings>,
    mut pending: ResMut<PendingRespawn>,
) {
    for event in movement_events.read() {
        if event.event == MovementEvent::Died {
            info!("Respawning in {}s", settings.respawn_delay);
            pending.timer = Some(Timer::from_seconds(settings.respawn_delay, TimerMode::Once));
        }
    }
}

pub(crate) fn tick_respawn(
    time: Res<Time>,
    mut pending: ResMut<PendingRespawn>,
    spawn_points: Query<&Transform, (With<SpawnPoint>, Without<Player>)>,
    mut players: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut InputSampler,
            &mut MovementController,
        ),
        With<Player>,
    >,
) {
    let Some(timer) = pending.timer.as_mut() else {
        return;
    };

    if !timer.tick(time.delta()).just_finished() {
        return;
    }
    pending.timer = None;

    let spawn = spawn_points
        .iter()
        .next()
        .map(|transform| transform.translation.truncate())
        .unwrap_or(Vec2::ZERO);

    for (mut transform, mut velocity, mut input, mut controller) in &mut players {
        transform.translation = spawn.extend(transform.translation.z);
        velocity.0 = Vec2::ZERO;
        input.clear_buffers();
        controller.enable();
        info!("Player respawned at ({:.2}, {:.2})", spawn.x, spawn.y);
    }
}
