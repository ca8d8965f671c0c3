//! Level domain: the playground room, hazards, pickups and respawning.

mod hazards;
mod pickups;
mod room;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};

pub use hazards::{Hazard, PendingRespawn};
pub use pickups::{Pickup, PickupKind};

use hazards::{kill_on_hazard_contact, schedule_respawn, tick_respawn};
use pickups::{collect_pickups, respawn_pickups};
use room::spawn_room;

/// Where the player appears on spawn and respawn.
#[derive(Component, Debug)]
pub struct SpawnPoint;

#[derive(Resource, Debug, Clone)]
pub struct LevelSettings {
    /// Seconds between death and respawn
    pub respawn_delay: f32,
    /// Seconds before a collected pickup reappears
    pub pickup_respawn: f32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            respawn_delay: 1.0,
            pickup_respawn: 5.0,
        }
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelSettings>()
            .init_resource::<PendingRespawn>()
            .add_systems(Startup, spawn_room)
            .add_systems(
                Update,
                (kill_on_hazard_contact, collect_pickups)
                    .run_if(in_state(GameState::Run))
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (schedule_respawn, tick_respawn, respawn_pickups)
                    .chain()
                    .run_if(in_state(GameState::Run))
                    .run_if(gameplay_active),
            );
    }
}
