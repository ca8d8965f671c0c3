//! Content domain: movement tuning loaded from `assets/data` at startup.

mod loader;
mod validation;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::GameState;
use crate::movement::MovementTuning;

pub use loader::{ContentLoadError, TuningFormat, load_movement_tuning, parse_movement_tuning};
pub use validation::{ValidationError, validate_tuning};

/// Default tuning file, relative to the working directory
pub const DEFAULT_TUNING_PATH: &str = "assets/data/movement.ron";

/// Where the movement tuning is read from.
#[derive(Resource, Debug, Clone)]
pub struct TuningSource {
    pub path: PathBuf,
}

impl Default for TuningSource {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TUNING_PATH),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TuningSource>()
            .add_systems(Startup, load_tuning);
    }
}

/// Load and validate the tuning, falling back to defaults, then start the run.
fn load_tuning(
    mut commands: Commands,
    source: Res<TuningSource>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let tuning = match load_movement_tuning(&source.path) {
        Ok(tuning) => {
            let errors = validate_tuning(&tuning);
            if errors.is_empty() {
                info!("Loaded movement tuning from {}", source.path.display());
                tuning
            } else {
                for error in &errors {
                    error!("Invalid movement tuning: {}", error);
                }
                warn!(
                    "{} invalid tuning values, using default movement tuning",
                    errors.len()
                );
                MovementTuning::default()
            }
        }
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            MovementTuning::default()
        }
    };

    commands.insert_resource(tuning);
    game_state.set(GameState::Run);
}
