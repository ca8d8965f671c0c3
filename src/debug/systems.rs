//! Debug domain: hotkeys and state reporting for the player's movement.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::level::{PendingRespawn, SpawnPoint};
use crate::movement::{InputSampler, MovementController, Player};

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut pending_respawn: ResMut<PendingRespawn>,
    spawn_points: Query<&Transform, (With<SpawnPoint>, Without<Player>)>,
    mut player_query: Query<
        (
            &mut MovementController,
            &mut InputSampler,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    // Hotkeys need Ctrl held
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    let Ok((mut controller, mut input, mut transform, mut velocity)) = player_query.single_mut()
    else {
        return;
    };

    // Ctrl+K: Kill the player
    if keyboard.just_pressed(KeyCode::KeyK) {
        controller.kill();
        debug_state.set_message("Killed player", 2.0);
        info!("[DEBUG] Killed player");
    }

    // Ctrl+R: Respawn immediately at the spawn point
    if keyboard.just_pressed(KeyCode::KeyR) {
        if let Some(spawn) = spawn_points.iter().next() {
            transform.translation = spawn.translation.truncate().extend(transform.translation.z);
        }
        velocity.0 = Vec2::ZERO;
        input.clear_buffers();
        pending_respawn.timer = None;
        controller.disable();
        controller.enable();
        debug_state.set_message("Respawned", 2.0);
        info!("[DEBUG] Respawned player");
    }

    // Ctrl+J: Grant a jump charge past the tuned limit
    if keyboard.just_pressed(KeyCode::KeyJ) {
        controller.grant_jump_charges(1, true);
        let charges = controller.state().jump_charges;
        debug_state.set_message(format!("Jump charges: {}", charges), 2.0);
        info!("[DEBUG] Granted jump charge, now {}", charges);
    }

    // Ctrl+D: Toggle the info overlay
    if keyboard.just_pressed(KeyCode::KeyD) {
        debug_state.show_info = !debug_state.show_info;
        let msg = if debug_state.show_info {
            "Debug Info ON"
        } else {
            "Debug Info OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    // Ctrl+L: Toggle periodic presentation logging
    if keyboard.just_pressed(KeyCode::KeyL) {
        debug_state.log_presentation = !debug_state.log_presentation;
        info!(
            "[DEBUG] Presentation logging {}",
            if debug_state.log_presentation { "ON" } else { "OFF" }
        );
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

pub(crate) fn log_presentation(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    player_query: Query<&MovementController, With<Player>>,
) {
    if !debug_state.log_timer.tick(time.delta()).just_finished() {
        return;
    }

    for controller in &player_query {
        let p = controller.presentation();
        debug!(
            "speed={:.2} grounded={} jumping={} falling={} wall_sliding={} dashing={} facing={:?} charges={}",
            p.horizontal_speed,
            p.is_grounded,
            p.is_jumping,
            p.is_falling,
            p.is_wall_sliding,
            p.is_dashing,
            p.facing,
            controller.state().jump_charges
        );
    }
}

/// Update the debug info overlay with current movement state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&Transform, &MovementController), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, controller)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        let state = controller.state();
        let status = debug_state
            .status_message
            .as_ref()
            .map(|(msg, _)| msg.as_str())
            .unwrap_or("");
        **text = format!(
            "Pos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nGrounded: {}  Sliding: {}\nCharges: {}\nOverride: {:?}\nDisabled: {}\n{}",
            pos.x,
            pos.y,
            state.velocity.x,
            state.velocity.y,
            state.is_grounded,
            state.is_wall_sliding,
            state.jump_charges,
            state.active_override.map(|o| o.kind),
            state.disabled,
            status
        );
    }
}
