//! Movement domain: notifications emitted by the movement controller.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::components::Facing;
use crate::movement::targets::DashTarget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementEvent {
    GroundJumped,
    WallJumped {
        /// Side the wall was on
        direction: Facing,
        contact_point: Vec2,
    },
    MultiJumped,
    Dashed {
        target: DashTarget,
    },
    Enabled,
    Disabled,
    Died,
}

/// Movement notification forwarded into the ECS for presentation systems
#[derive(Debug, Clone, Copy)]
pub struct PlayerMovementEvent {
    pub entity: Entity,
    pub event: MovementEvent,
}

impl Message for PlayerMovementEvent {}
