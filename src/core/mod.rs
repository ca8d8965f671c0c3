//! Core domain: game state, pausing and the camera.

mod resources;
mod state;
mod systems;

use bevy::prelude::*;

pub use resources::{GameplayPaused, gameplay_active};
pub use state::GameState;

use systems::{setup_camera, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, toggle_pause.run_if(in_state(GameState::Run)));
    }
}
