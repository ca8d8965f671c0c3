//! Movement domain: player bootstrap from the loaded movement tuning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::SpawnPoint;
use crate::movement::{GameLayer, InputSampler, MovementController, MovementTuning, Player};

/// Player body size in world units
pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(0.5, 1.0);

/// Spawn the player at the room's spawn point with a controller built from the current tuning.
/// This system runs on entering GameState::Run, after the tuning has been loaded.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    spawn_points: Query<&Transform, With<SpawnPoint>>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let position = match spawn_points.iter().next() {
        Some(transform) => transform.translation.truncate(),
        None => {
            warn!("No spawn point in the room, spawning player at origin");
            Vec2::ZERO
        }
    };

    let mut controller = MovementController::new(tuning.clone());
    controller.enable();

    info!(
        "Spawning player at ({:.2}, {:.2}): jump_speed={}, additional_jumps={}, wall_jump={:?}",
        position.x,
        position.y,
        tuning.jump.jump_speed,
        tuning.jump.additional_jumps,
        tuning.wall_jump.rule
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            controller,
            InputSampler::new(tuning.input_buffer_window),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(position.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(tuning.gravity.base),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    ));
}
