//! Movement domain: tuning resources.
//!
//! Rates are expressed per fixed tick, times in seconds, unless noted otherwise.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::curve::SampledCurve;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub horizontal: HorizontalTuning,
    pub jump: JumpTuning,
    pub wall_jump: WallJumpTuning,
    pub gravity: GravityTuning,
    pub clamp: VelocityClamp,
    pub probes: ProbeTuning,
    pub dash: DashTuning,
    /// How long a jump or dash press stays pending
    pub input_buffer_window: f32,
    pub respawn: RespawnPolicy,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            horizontal: HorizontalTuning::default(),
            jump: JumpTuning::default(),
            wall_jump: WallJumpTuning::default(),
            gravity: GravityTuning::default(),
            clamp: VelocityClamp::default(),
            probes: ProbeTuning::default(),
            dash: DashTuning::default(),
            input_buffer_window: 0.1,
            respawn: RespawnPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HorizontalTuning {
    pub acceleration: f32,
    pub deceleration: f32,
    /// Speed above which the soft cap starts bleeding velocity
    pub threshold_velocity: f32,
    pub threshold_deceleration: f32,
}

impl Default for HorizontalTuning {
    fn default() -> Self {
        Self {
            acceleration: 1.5,
            deceleration: 1.0,
            threshold_velocity: 3.25,
            threshold_deceleration: 0.505,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Jumps available in the air (0 = no double jump)
    pub additional_jumps: u32,
    pub jump_speed: f32,
    pub coyote_time: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            additional_jumps: 1,
            jump_speed: 4.0,
            coyote_time: 0.1,
        }
    }
}

/// Which condition makes a wall jump available.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub enum WallJumpRule {
    /// Only while actively wall sliding
    #[default]
    WhileSliding,
    /// Within `window` seconds of the last wall slide. With `new_wall_only`, a wall jump
    /// needs a contact point away from the previous wall jump's.
    Window { window: f32, new_wall_only: bool },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WallJumpTuning {
    pub rule: WallJumpRule,
    /// Acceleration applied away from the wall after a wall jump
    pub acceleration: f32,
    /// Ticks during which the forced acceleration replaces input
    pub accel_ticks: u32,
    pub curve: SampledCurve,
    pub horizontal_multiplier: f32,
    pub vertical_multiplier: f32,
}

impl Default for WallJumpTuning {
    fn default() -> Self {
        Self {
            rule: WallJumpRule::WhileSliding,
            acceleration: 2.0,
            accel_ticks: 7,
            curve: SampledCurve::linear(&[(0.0, 1.0), (3.0, 0.0)]),
            horizontal_multiplier: 1.0,
            vertical_multiplier: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GravityTuning {
    pub base: f32,
    pub ascending: f32,
    pub falling: f32,
    pub wall_slide: f32,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            base: 2.75,
            ascending: 0.66,
            falling: 2.75,
            wall_slide: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VelocityClamp {
    pub max_horizontal: f32,
    pub max_vertical: f32,
    pub min_vertical: f32,
}

impl Default for VelocityClamp {
    fn default() -> Self {
        Self {
            max_horizontal: 10.0,
            max_vertical: 6.0,
            min_vertical: -7.0,
        }
    }
}

impl VelocityClamp {
    pub fn apply(&self, velocity: Vec2) -> Vec2 {
        Vec2::new(
            velocity.x.clamp(-self.max_horizontal, self.max_horizontal),
            velocity.y.clamp(self.min_vertical, self.max_vertical),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ProbeOffset {
    pub x: f32,
    pub y: f32,
}

impl ProbeOffset {
    /// Offset in world space for a body facing `sign` (+1 right, -1 left).
    pub fn facing(&self, sign: f32) -> Vec2 {
        Vec2::new(self.x * sign, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeTuning {
    /// Ground check point relative to the body origin
    pub ground_check: ProbeOffset,
    /// Wall check point relative to the body origin, for a body facing right
    pub wall_check: ProbeOffset,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            ground_check: ProbeOffset { x: 0.0, y: -0.55 },
            wall_check: ProbeOffset { x: 0.35, y: 0.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashTuning {
    pub curve: SampledCurve,
    pub horizontal_multiplier: f32,
    pub vertical_multiplier: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            curve: SampledCurve::linear(&[(0.0, 2.5), (6.0, 1.5), (10.0, 0.0)]),
            horizontal_multiplier: 0.25,
            vertical_multiplier: 0.9,
        }
    }
}

/// What `enable` restores besides velocity and override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RespawnPolicy {
    /// Refill jump charges to the maximum
    pub reset_jump_charges: bool,
    /// Face right again
    pub reset_facing: bool,
}
