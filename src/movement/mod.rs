//! Movement domain: player locomotion.
//!
//! The controller in `controller.rs` is engine-agnostic: it reads an
//! `InputSampler`, a `ContactProbe` and a `DashTargetProvider` once per
//! fixed tick and returns the velocity and gravity scale to apply. The
//! systems in `systems/` feed it from avian2d and bevy input.

mod bootstrap;
mod components;
mod controller;
mod curve;
mod environment;
mod events;
mod input;
mod resources;
mod state;
mod systems;
mod targets;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};

pub use components::{Facing, GameLayer, Ground, Player, WallContact, Wall};
pub use controller::{MovementController, TickContext, TickOutput};
pub use curve::{Interpolation, Keyframe, SampledCurve};
pub use environment::{ContactProbe, NoContacts, ProbeMask};
pub use events::{MovementEvent, PlayerMovementEvent};
pub use input::{FAR_PAST, InputSampler, InputSnapshot, RawInput};
pub use resources::{
    DashTuning, GravityTuning, HorizontalTuning, JumpTuning, MovementTuning, ProbeOffset,
    ProbeTuning, RespawnPolicy, VelocityClamp, WallJumpRule, WallJumpTuning,
};
pub use state::{ActiveOverride, MovementState, OverrideKind, Presentation};
pub use systems::{DashPoint, DashPointsInRange};
pub use targets::{Candidate, DashTarget, DashTargetProvider, closest_target};

use bootstrap::spawn_player;
use systems::{
    apply_presentation, read_input, run_movement_tick, start_dash_point_cooldowns,
    tick_dash_point_cooldowns, track_dash_point_contacts, update_closest_dash_point,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<DashPointsInRange>()
            .add_message::<PlayerMovementEvent>()
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(
                Update,
                read_input
                    .run_if(in_state(GameState::Run))
                    .run_if(gameplay_active),
            )
            .add_systems(
                FixedUpdate,
                (update_closest_dash_point, run_movement_tick)
                    .chain()
                    .run_if(in_state(GameState::Run))
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (
                    track_dash_point_contacts,
                    start_dash_point_cooldowns,
                    tick_dash_point_cooldowns,
                    apply_presentation,
                )
                    .run_if(in_state(GameState::Run)),
            );
    }
}
