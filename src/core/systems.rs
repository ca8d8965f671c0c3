//! Core domain: camera setup and the pause toggle.

use bevy::prelude::*;

use crate::core::resources::GameplayPaused;

/// Pixels per world unit at the default window size
const PIXELS_PER_UNIT: f32 = 48.0;

const PAUSE_MENU_SOURCE: &str = "pause_menu";

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Toggle pause with Escape. Virtual time stops too, so fixed-step movement freezes.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
    mut time: ResMut<Time<Virtual>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    if paused.is_paused_by(PAUSE_MENU_SOURCE) {
        paused.unpause(PAUSE_MENU_SOURCE);
        info!("Gameplay resumed");
    } else {
        paused.pause(PAUSE_MENU_SOURCE);
        info!("Gameplay paused");
    }

    if paused.is_paused() {
        time.pause();
    } else {
        time.unpause();
    }
}
