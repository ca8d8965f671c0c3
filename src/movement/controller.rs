//! Movement domain: the per-tick movement state machine.
//!
//! The controller is passive. A driver calls [`MovementController::tick`] once per fixed step
//! with the body's current position and velocity plus the collaborators it needs, applies the
//! returned velocity and gravity scale to the body, then drains the emitted events.

use bevy::prelude::*;

use crate::movement::components::{Facing, WallContact};
use crate::movement::curve::SampledCurve;
use crate::movement::environment::{ContactProbe, ProbeMask};
use crate::movement::events::MovementEvent;
use crate::movement::input::{FAR_PAST, InputSampler};
use crate::movement::resources::{MovementTuning, WallJumpRule};
use crate::movement::state::{ActiveOverride, MovementState, OverrideKind, Presentation};
use crate::movement::targets::DashTargetProvider;

/// Vertical speed inside which the body is neither rising nor falling
const VERTICAL_DEAD_ZONE: f32 = 0.005;
/// Contact points closer than this belong to the same wall
const SAME_WALL_TOLERANCE: f32 = 0.05;
/// Dash offsets smaller than this on an axis do not steer along that axis
const DASH_AXIS_EPSILON: f32 = 1e-4;

/// Everything one tick needs from the outside world.
pub struct TickContext<'a> {
    /// Simulation time in seconds
    pub now: f32,
    pub position: Vec2,
    /// Velocity of the physics body at the start of the tick
    pub velocity: Vec2,
    pub input: &'a mut InputSampler,
    pub probe: &'a dyn ContactProbe,
    pub targets: &'a dyn DashTargetProvider,
}

/// What the physics body must adopt after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

enum JumpKind {
    Ground,
    Wall(WallContact),
    Multi,
}

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    tuning: MovementTuning,
    state: MovementState,
    events: Vec<MovementEvent>,
}

impl MovementController {
    /// Create a controller for a freshly spawned, still disabled character.
    pub fn new(tuning: MovementTuning) -> Self {
        let state = MovementState::new(tuning.wall_jump.accel_ticks, tuning.gravity.base);
        Self {
            tuning,
            state,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.state.disabled
    }

    /// Whether a dash or wall-jump curve currently drives the velocity.
    pub fn is_overridden(&self) -> bool {
        self.state
            .active_override
            .is_some_and(|o| o.elapsed_ticks < curve_for(&self.tuning, o.kind).end_time())
    }

    /// Whether acceleration is still forced away from the last wall jumped off.
    pub fn is_wall_jump_accelerating(&self) -> bool {
        self.state.wall_jump_ticks < self.tuning.wall_jump.accel_ticks
    }

    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn presentation(&self) -> Presentation {
        let is_dashing = self.is_overridden()
            && self
                .state
                .active_override
                .is_some_and(|o| o.kind == OverrideKind::Dash);

        Presentation {
            horizontal_speed: self.state.velocity.x.abs(),
            is_grounded: self.state.is_grounded,
            is_jumping: self.state.is_jumping,
            is_falling: self.state.is_falling,
            is_wall_sliding: self.state.is_wall_sliding,
            is_dashing,
            facing: self.state.facing,
        }
    }

    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> TickOutput {
        if self.state.disabled {
            return TickOutput {
                velocity: Vec2::ZERO,
                gravity_scale: self.tuning.gravity.base,
            };
        }

        self.state.velocity = ctx.velocity;
        self.state.gravity_scale = self.tuning.gravity.base;

        // State changes, without directly affecting velocity
        self.update_facing(ctx.input);
        self.check_ground(ctx);
        self.check_wall(ctx);
        self.check_wall_slide(ctx);
        self.update_vertical_flags();

        let mut change = Vec2::ZERO;
        if self.is_overridden() {
            change += self.advance_override();
        } else {
            self.state.active_override = None;
            change.x += self.horizontal_change(ctx.input);
            self.resolve_vertical(ctx);
            self.try_dash(ctx);
            self.select_gravity_scale(ctx.input);
        }

        self.state.velocity = self.tuning.clamp.apply(self.state.velocity + change);

        TickOutput {
            velocity: self.state.velocity,
            gravity_scale: self.state.gravity_scale,
        }
    }

    pub fn enable(&mut self) {
        if !self.state.disabled {
            return;
        }

        self.state.disabled = false;
        self.state.velocity = Vec2::ZERO;
        self.state.active_override = None;

        let policy = self.tuning.respawn;
        if policy.reset_jump_charges {
            self.state.jump_charges = self.tuning.jump.additional_jumps;
        }
        if policy.reset_facing {
            self.state.facing = Facing::Right;
        }

        info!(
            "Movement enabled: jump_charges={}, facing={:?}",
            self.state.jump_charges, self.state.facing
        );
        self.events.push(MovementEvent::Enabled);
    }

    pub fn disable(&mut self) {
        if self.state.disabled {
            return;
        }

        self.state.disabled = true;
        self.state.velocity = Vec2::ZERO;
        self.state.active_override = None;
        self.state.wall_jump_ticks = self.tuning.wall_jump.accel_ticks;
        self.state.is_wall_sliding = false;
        self.state.wall_slide_braked = false;

        info!("Movement disabled");
        self.events.push(MovementEvent::Disabled);
    }

    pub fn kill(&mut self) {
        if self.state.disabled {
            return;
        }

        self.disable();
        info!("Player died");
        self.events.push(MovementEvent::Died);
    }

    /// Add multi-jump charges. Without `ignore_limit` the total never exceeds the tuned
    /// maximum.
    pub fn grant_jump_charges(&mut self, charges: u32, ignore_limit: bool) {
        let granted = self.state.jump_charges.saturating_add(charges);
        self.state.jump_charges = if ignore_limit {
            granted
        } else {
            granted.min(self.tuning.jump.additional_jumps)
        };
        debug!(
            "Granted {} jump charges (ignore_limit={}), now {}",
            charges, ignore_limit, self.state.jump_charges
        );
    }

    /// Boost the body along its current horizontal direction. Returns the new body velocity;
    /// the next tick clamps it.
    pub fn grant_velocity_boost(
        &mut self,
        body_velocity: Vec2,
        boost: Vec2,
        override_vertical: bool,
    ) -> Vec2 {
        let x = body_velocity.x + body_velocity.x.signum() * boost.x.abs();
        let y = if override_vertical {
            boost.y
        } else {
            body_velocity.y + boost.y
        };

        self.state.velocity = Vec2::new(x, y);
        self.state.velocity
    }

    fn update_facing(&mut self, input: &InputSampler) {
        if self.state.is_wall_sliding {
            return;
        }

        let horizontal = input.snapshot().horizontal;
        if horizontal < 0.0 {
            self.state.facing = Facing::Left;
        } else if horizontal > 0.0 {
            self.state.facing = Facing::Right;
        }
    }

    fn check_ground(&mut self, ctx: &TickContext<'_>) {
        let offset = self
            .tuning
            .probes
            .ground_check
            .facing(self.state.facing.sign());
        let grounded = ctx
            .probe
            .probe(ctx.position, ctx.position + offset, ProbeMask::Ground)
            .is_some();

        if grounded {
            // Refresh jump values
            self.state.jump_charges = self.tuning.jump.additional_jumps;
            self.state.last_grounded_at = ctx.now;
            self.state.last_wall_jump_x = None;
        }

        if grounded != self.state.is_grounded {
            debug!(
                "Grounded changed: grounded={}, jump_charges={}",
                grounded, self.state.jump_charges
            );
        }
        self.state.is_grounded = grounded;
    }

    fn check_wall(&mut self, ctx: &TickContext<'_>) {
        let facing = self.state.facing;
        let offset = self.tuning.probes.wall_check.facing(facing.sign());

        self.state.wall_contact = ctx
            .probe
            .probe(ctx.position, ctx.position + offset, ProbeMask::Wall)
            .map(|point| WallContact {
                direction: facing,
                point,
            });

        if let Some(contact) = self.state.wall_contact {
            self.state.last_wall_contact = Some(contact);
        }
    }

    fn check_wall_slide(&mut self, ctx: &TickContext<'_>) {
        let sliding = self.state.wall_contact.is_some()
            && !self.state.is_grounded
            && ctx.input.snapshot().wall_grab_held;

        if sliding {
            self.state.last_wall_hanging_at = ctx.now;
        } else {
            self.state.wall_slide_braked = false;
        }
        self.state.is_wall_sliding = sliding;
    }

    fn update_vertical_flags(&mut self) {
        let vy = self.state.velocity.y;
        self.state.is_jumping = vy > VERTICAL_DEAD_ZONE;
        self.state.is_falling = vy < -VERTICAL_DEAD_ZONE;
    }

    fn advance_override(&mut self) -> Vec2 {
        let Some(active) = self.state.active_override.as_mut() else {
            return Vec2::ZERO;
        };

        let curve = curve_for(&self.tuning, active.kind);
        let change = active.multiplier * curve.sample(active.elapsed_ticks);
        active.elapsed_ticks += 1.0;
        change
    }

    fn install_override(&mut self, kind: OverrideKind, multiplier: Vec2) {
        self.state.active_override = Some(ActiveOverride {
            kind,
            elapsed_ticks: 0.0,
            multiplier,
        });
    }

    fn horizontal_change(&mut self, input: &InputSampler) -> f32 {
        let tuning = &self.tuning.horizontal;
        let vx = self.state.velocity.x;

        // Deceleration never exceeds the current speed, so it cannot flip the direction
        let mut change = -vx.signum() * tuning.deceleration.min(vx.abs());

        let (acceleration, direction) = if self.is_wall_jump_accelerating() {
            self.state.wall_jump_ticks += 1;
            let away = self
                .state
                .last_wall_contact
                .map_or(-self.state.facing.sign(), |c| -c.direction.sign());
            (self.tuning.wall_jump.acceleration, away)
        } else if self.state.is_wall_sliding {
            (tuning.acceleration, 0.0)
        } else {
            (tuning.acceleration, input.snapshot().horizontal)
        };
        change += acceleration * direction;

        // Soft cap: bleed only the speed above the threshold
        let combined = vx + change;
        let excess = combined.abs() - tuning.threshold_velocity;
        if excess > 0.0 {
            change -= combined.signum() * tuning.threshold_deceleration.min(excess);
        }

        change
    }

    fn resolve_vertical(&mut self, ctx: &mut TickContext<'_>) {
        let now = ctx.now;
        let mut vy = self.state.velocity.y;

        // Brake the fall once when a wall slide starts
        if self.state.is_wall_sliding && self.state.is_falling && !self.state.wall_slide_braked {
            vy = 0.0;
            self.state.wall_slide_braked = true;
        }

        let ground_ok = self.state.last_grounded_at + self.tuning.jump.coyote_time > now;
        let wall_ok = self.wall_jump_eligible(now);
        let multi_ok = self.state.jump_charges > 0;

        if (ground_ok || wall_ok || multi_ok) && ctx.input.is_jump_pending(now) {
            let wall = if wall_ok && ctx.input.snapshot().wall_grab_held {
                self.state.last_wall_contact
            } else {
                None
            };

            let kind = if ground_ok {
                Some(JumpKind::Ground)
            } else if let Some(contact) = wall {
                Some(JumpKind::Wall(contact))
            } else if multi_ok {
                Some(JumpKind::Multi)
            } else {
                None
            };

            if let Some(kind) = kind {
                ctx.input.consume_jump(now);
                self.perform_jump(kind);
                vy = self.tuning.jump.jump_speed;
                // Coyote time is spent by any jump
                self.state.last_grounded_at = FAR_PAST;
            }
        }

        self.state.velocity.y = vy;
    }

    fn wall_jump_eligible(&self, now: f32) -> bool {
        match self.tuning.wall_jump.rule {
            WallJumpRule::WhileSliding => self.state.is_wall_sliding,
            WallJumpRule::Window {
                window,
                new_wall_only,
            } => {
                let in_window = self.state.last_wall_hanging_at + window > now;
                let new_wall = !new_wall_only
                    || match (self.state.last_wall_jump_x, self.state.last_wall_contact) {
                        (Some(x), Some(contact)) => (x - contact.point.x).abs() > SAME_WALL_TOLERANCE,
                        _ => true,
                    };
                in_window && new_wall
            }
        }
    }

    fn perform_jump(&mut self, kind: JumpKind) {
        match kind {
            JumpKind::Ground => {
                debug!(
                    "Ground jump: jump_charges={}",
                    self.state.jump_charges
                );
                self.events.push(MovementEvent::GroundJumped);
            }
            JumpKind::Wall(contact) => {
                self.state.wall_jump_ticks = 0;
                self.state.last_wall_jump_x = Some(contact.point.x);

                let wall_jump = &self.tuning.wall_jump;
                let away = -contact.direction.sign();
                let multiplier = Vec2::new(
                    away * wall_jump.horizontal_multiplier,
                    wall_jump.vertical_multiplier,
                );
                self.install_override(OverrideKind::WallJump, multiplier);

                debug!(
                    "Wall jump: wall={:?}, contact={:?}",
                    contact.direction, contact.point
                );
                self.events.push(MovementEvent::WallJumped {
                    direction: contact.direction,
                    contact_point: contact.point,
                });
            }
            JumpKind::Multi => {
                self.state.jump_charges -= 1;
                debug!(
                    "Multi jump: jump_charges now {}",
                    self.state.jump_charges
                );
                self.events.push(MovementEvent::MultiJumped);
            }
        }
    }

    fn try_dash(&mut self, ctx: &mut TickContext<'_>) {
        if !ctx.input.is_dash_pending(ctx.now) {
            return;
        }
        let Some(target) = ctx.targets.closest_in_range() else {
            return;
        };

        ctx.input.consume_dash(ctx.now);

        // Only eight dash directions, so dashes stay predictable
        let offset = target.position - ctx.position;
        let direction = Vec2::new(axis_sign(offset.x), axis_sign(offset.y))
            .try_normalize()
            .unwrap_or(Vec2::new(self.state.facing.sign(), 0.0));

        let dash = &self.tuning.dash;
        let multiplier = Vec2::new(
            direction.x * dash.horizontal_multiplier,
            direction.y * dash.vertical_multiplier,
        );
        self.install_override(OverrideKind::Dash, multiplier);

        // Dash starts from a vertical standstill
        self.state.velocity.y = 0.0;

        debug!("Dash: target={}, direction={:?}", target.id, direction);
        self.events.push(MovementEvent::Dashed { target });
    }

    fn select_gravity_scale(&mut self, input: &InputSampler) {
        let gravity = &self.tuning.gravity;
        let held = input.snapshot();

        self.state.gravity_scale = if self.state.is_jumping {
            // Holding the button while rising extends the jump
            if held.jump_held || held.dash_held {
                gravity.ascending
            } else {
                gravity.base
            }
        } else if self.state.is_wall_sliding {
            gravity.wall_slide
        } else if self.state.is_falling {
            gravity.falling
        } else {
            gravity.base
        };
    }
}

fn curve_for(tuning: &MovementTuning, kind: OverrideKind) -> &SampledCurve {
    match kind {
        OverrideKind::Dash => &tuning.dash.curve,
        OverrideKind::WallJump => &tuning.wall_jump.curve,
    }
}

fn axis_sign(value: f32) -> f32 {
    if value.abs() < DASH_AXIS_EPSILON {
        0.0
    } else {
        value.signum()
    }
}
