//! Movement domain: per-character movement state.

use bevy::prelude::*;

use crate::movement::components::{Facing, WallContact};
use crate::movement::input::FAR_PAST;

/// Which tuned curve an override plays back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    Dash,
    WallJump,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveOverride {
    pub kind: OverrideKind,
    pub elapsed_ticks: f32,
    /// Per-axis scale applied to the curve value
    pub multiplier: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub velocity: Vec2,
    pub facing: Facing,
    pub jump_charges: u32,
    pub last_grounded_at: f32,
    pub last_wall_hanging_at: f32,
    pub wall_contact: Option<WallContact>,
    /// Most recent wall contact, kept after the body leaves the wall
    pub last_wall_contact: Option<WallContact>,
    pub last_wall_jump_x: Option<f32>,
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub is_falling: bool,
    pub is_wall_sliding: bool,
    /// Set once the slide has zeroed the fall speed
    pub wall_slide_braked: bool,
    pub active_override: Option<ActiveOverride>,
    pub wall_jump_ticks: u32,
    pub gravity_scale: f32,
    pub disabled: bool,
}

impl MovementState {
    pub(crate) fn new(wall_jump_accel_ticks: u32, base_gravity: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            jump_charges: 0,
            last_grounded_at: FAR_PAST,
            last_wall_hanging_at: FAR_PAST,
            wall_contact: None,
            last_wall_contact: None,
            last_wall_jump_x: None,
            is_grounded: false,
            is_jumping: false,
            is_falling: false,
            is_wall_sliding: false,
            wall_slide_braked: false,
            active_override: None,
            // Start outside the post-wall-jump window
            wall_jump_ticks: wall_jump_accel_ticks,
            gravity_scale: base_gravity,
            disabled: true,
        }
    }
}

/// Read-only view for animation and effects layers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Presentation {
    pub horizontal_speed: f32,
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub is_falling: bool,
    pub is_wall_sliding: bool,
    pub is_dashing: bool,
    pub facing: Facing,
}
