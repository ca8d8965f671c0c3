//! Movement domain: keyboard sampling into the buffered input.

use bevy::prelude::*;

use crate::movement::{InputSampler, Player, RawInput};

pub(crate) fn read_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut InputSampler, With<Player>>,
) {
    let mut horizontal = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        horizontal -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        horizontal += 1.0;
    }

    let raw = RawInput {
        horizontal,
        jump_held: keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK),
        jump_pressed: keyboard.just_pressed(KeyCode::Space)
            || keyboard.just_pressed(KeyCode::KeyK),
        wall_grab_held: keyboard.pressed(KeyCode::KeyL) || keyboard.pressed(KeyCode::ShiftRight),
        dash_held: keyboard.pressed(KeyCode::KeyJ) || keyboard.pressed(KeyCode::ShiftLeft),
        dash_pressed: keyboard.just_pressed(KeyCode::KeyJ)
            || keyboard.just_pressed(KeyCode::ShiftLeft),
        slide_held: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
    };

    let now = time.elapsed_secs();
    for mut sampler in &mut query {
        sampler.sample(raw, now);
    }
}
