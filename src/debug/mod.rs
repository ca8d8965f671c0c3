//! Debug tooling for tuning movement by feel.
//!
//! Hotkeys (Ctrl held):
//! - K: kill the player
//! - R: respawn at the spawn point
//! - J: grant a jump charge past the limit
//! - D: toggle the info overlay
//! - L: toggle periodic presentation logging

mod state;
mod systems;
mod ui;

use bevy::prelude::*;

use crate::core::GameState;

pub use state::DebugState;

use systems::{
    handle_debug_hotkeys, log_presentation, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    handle_debug_hotkeys,
                    update_status_message,
                    update_debug_info_overlay,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                log_presentation
                    .run_if(in_state(GameState::Run))
                    .run_if(|state: Res<DebugState>| state.log_presentation),
            );
    }
}
