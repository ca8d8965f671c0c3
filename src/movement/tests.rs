//! Movement domain: unit tests for input buffering and the movement controller.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    ContactProbe, DashTarget, Facing, InputSampler, MovementController, MovementEvent,
    MovementTuning, NoContacts, OverrideKind, ProbeMask, RawInput, TickContext, TickOutput,
    WallJumpRule,
};

/// Exactly representable tick length so timing windows compare cleanly
const DT: f32 = 1.0 / 64.0;

#[derive(Default)]
struct TestWorld {
    ground: bool,
    wall: Option<Vec2>,
}

impl ContactProbe for TestWorld {
    fn probe(&self, _from: Vec2, to: Vec2, mask: ProbeMask) -> Option<Vec2> {
        match mask {
            ProbeMask::Ground => self.ground.then_some(to),
            ProbeMask::Wall => self.wall,
        }
    }
}

struct Harness {
    controller: MovementController,
    input: InputSampler,
    world: TestWorld,
    target: Option<DashTarget>,
    now: f32,
    position: Vec2,
    velocity: Vec2,
}

impl Harness {
    fn new(tuning: MovementTuning) -> Self {
        let input = InputSampler::new(tuning.input_buffer_window);
        let mut controller = MovementController::new(tuning);
        controller.enable();
        controller.drain_events();

        Self {
            controller,
            input,
            world: TestWorld::default(),
            target: None,
            now: 0.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    fn sample(&mut self, raw: RawInput) {
        self.input.sample(raw, self.now);
    }

    fn tick(&mut self) -> TickOutput {
        let mut ctx = TickContext {
            now: self.now,
            position: self.position,
            velocity: self.velocity,
            input: &mut self.input,
            probe: &self.world,
            targets: &self.target,
        };
        let output = self.controller.tick(&mut ctx);
        self.velocity = output.velocity;
        self.now += DT;
        output
    }

    fn ticks(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    fn events(&mut self) -> Vec<MovementEvent> {
        self.controller.drain_events()
    }
}

fn press_jump() -> RawInput {
    RawInput {
        jump_pressed: true,
        jump_held: true,
        ..default()
    }
}

fn hold_right() -> RawInput {
    RawInput {
        horizontal: 1.0,
        ..default()
    }
}

// ============================================================================
// Input sampling
// ============================================================================

#[test]
fn test_consume_returns_pending_once() {
    let mut input = InputSampler::new(0.1);
    input.sample(press_jump(), 0.0);

    assert!(input.is_jump_pending(0.05));
    assert!(input.consume_jump(0.05));
    assert!(!input.consume_jump(0.05));
    assert!(!input.is_jump_pending(0.05));
}

#[test]
fn test_buffered_press_expires() {
    let mut input = InputSampler::new(0.125);
    input.sample(
        RawInput {
            dash_pressed: true,
            ..default()
        },
        1.0,
    );

    assert!(input.is_dash_pending(1.0));
    assert!(input.is_dash_pending(1.0 + 7.0 * DT));
    assert!(!input.is_dash_pending(1.0 + 8.0 * DT));
    assert!(!input.consume_dash(1.0 + 8.0 * DT));
}

#[test]
fn test_new_press_overwrites_old_one() {
    let mut input = InputSampler::new(0.125);
    input.sample(press_jump(), 0.0);
    input.sample(press_jump(), 0.1);

    // The first press alone would have expired at 0.125
    assert!(input.is_jump_pending(0.2));
    assert!(input.consume_jump(0.2));
    // Presses do not stack
    assert!(!input.is_jump_pending(0.2));
}

#[test]
fn test_holding_without_press_edge_does_not_buffer() {
    let mut input = InputSampler::new(0.1);
    input.sample(
        RawInput {
            jump_held: true,
            ..default()
        },
        0.0,
    );

    assert!(input.snapshot().jump_held);
    assert!(!input.is_jump_pending(0.0));
}

#[test]
fn test_horizontal_axis_is_clamped() {
    let mut input = InputSampler::new(0.1);
    input.sample(
        RawInput {
            horizontal: 3.0,
            ..default()
        },
        0.0,
    );
    assert_eq!(input.snapshot().horizontal, 1.0);
}

// ============================================================================
// Jumps
// ============================================================================

#[test]
fn test_ground_jump_from_rest() {
    let mut h = Harness::new(MovementTuning::default());
    h.world.ground = true;
    h.tick();
    let charges = h.controller.state().jump_charges;

    h.sample(press_jump());
    let output = h.tick();

    assert_eq!(output.velocity.y, h.controller.tuning().jump.jump_speed);
    assert_eq!(h.events(), vec![MovementEvent::GroundJumped]);
    assert_eq!(h.controller.state().jump_charges, charges);
}

#[test]
fn test_multi_jump_in_air_spends_charge() {
    let mut h = Harness::new(MovementTuning::default());
    h.world.ground = true;
    h.tick();
    h.world.ground = false;
    // Outlast coyote time
    h.ticks(8);
    assert_eq!(h.controller.state().jump_charges, 1);

    h.velocity = Vec2::new(0.0, -1.0);
    h.sample(press_jump());
    let output = h.tick();

    assert_eq!(h.events(), vec![MovementEvent::MultiJumped]);
    assert_eq!(h.controller.state().jump_charges, 0);
    assert_eq!(output.velocity.y, h.controller.tuning().jump.jump_speed);
}

#[test]
fn test_jump_without_eligibility_stays_buffered() {
    let mut h = Harness::new(MovementTuning::default());
    h.velocity = Vec2::new(0.0, -1.0);

    h.sample(press_jump());
    let output = h.tick();

    assert!(h.events().is_empty());
    assert_eq!(output.velocity.y, -1.0);
    assert!(h.input.is_jump_pending(h.now - DT));
}

#[test]
fn test_buffered_jump_executes_when_landing_inside_window() {
    let mut tuning = MovementTuning::default();
    tuning.input_buffer_window = 8.0 * DT;

    let mut h = Harness::new(tuning);
    h.sample(press_jump());
    h.ticks(7);
    assert!(h.events().is_empty());

    h.world.ground = true;
    h.tick();
    assert_eq!(h.events(), vec![MovementEvent::GroundJumped]);
}

#[test]
fn test_buffered_jump_is_lost_when_landing_after_window() {
    let mut tuning = MovementTuning::default();
    tuning.input_buffer_window = 8.0 * DT;

    let mut h = Harness::new(tuning);
    h.sample(press_jump());
    h.ticks(8);

    h.world.ground = true;
    let output = h.tick();
    assert!(h.events().is_empty());
    assert_eq!(output.velocity.y, 0.0);
}

fn coyote_harness() -> Harness {
    let mut tuning = MovementTuning::default();
    tuning.jump.coyote_time = 8.0 * DT;
    tuning.jump.additional_jumps = 0;

    let mut h = Harness::new(tuning);
    h.world.ground = true;
    h.tick();
    h.world.ground = false;
    h
}

#[test]
fn test_coyote_jump_allowed_inside_window() {
    let mut h = coyote_harness();
    // Last grounded at t=0, the next tick runs at t=7*DT
    h.ticks(6);

    h.sample(press_jump());
    h.tick();
    assert_eq!(h.events(), vec![MovementEvent::GroundJumped]);
}

#[test]
fn test_coyote_jump_rejected_after_window() {
    let mut h = coyote_harness();
    h.ticks(7);

    h.sample(press_jump());
    h.tick();
    assert!(h.events().is_empty());
}

#[test]
fn test_coyote_time_is_spent_by_jump() {
    let mut h = coyote_harness();
    h.sample(press_jump());
    h.tick();
    assert_eq!(h.events(), vec![MovementEvent::GroundJumped]);

    h.sample(press_jump());
    h.tick();
    assert!(h.events().is_empty());
}

#[test]
fn test_ground_jump_takes_priority_over_multi_jump() {
    let mut tuning = MovementTuning::default();
    tuning.jump.additional_jumps = 3;
    let mut h = Harness::new(tuning);
    h.world.ground = true;

    h.sample(press_jump());
    h.tick();

    assert_eq!(h.events(), vec![MovementEvent::GroundJumped]);
    assert_eq!(h.controller.state().jump_charges, 3);
}

#[test]
fn test_jump_charge_grants_respect_limit() {
    let mut h = Harness::new(MovementTuning::default());
    let max = h.controller.tuning().jump.additional_jumps;

    h.controller.grant_jump_charges(5, false);
    assert_eq!(h.controller.state().jump_charges, max);

    h.controller.grant_jump_charges(3, true);
    assert_eq!(h.controller.state().jump_charges, max + 3);

    h.controller.grant_jump_charges(1, false);
    assert_eq!(h.controller.state().jump_charges, max);
}

// ============================================================================
// Horizontal movement
// ============================================================================

#[test]
fn test_soft_cap_converges_to_threshold() {
    let mut h = Harness::new(MovementTuning::default());
    h.world.ground = true;
    let threshold = h.controller.tuning().horizontal.threshold_velocity;

    let mut reached = false;
    for _ in 0..40 {
        h.sample(hold_right());
        let vx = h.tick().velocity.x;
        if reached {
            assert!(vx >= threshold - 1e-4, "fell below threshold: {vx}");
        }
        reached |= vx >= threshold - 1e-4;
    }

    assert!(reached);
    assert!((h.velocity.x - threshold).abs() < 1e-4);
}

#[test]
fn test_soft_cap_bleeds_excess_gradually() {
    let mut h = Harness::new(MovementTuning::default());
    h.velocity = Vec2::new(8.0, 0.0);
    h.sample(hold_right());

    let vx = h.tick().velocity.x;
    // decel -1.0, accel +1.5, soft cap -0.505
    assert!((vx - 7.995).abs() < 1e-4);
}

#[test]
fn test_deceleration_does_not_overshoot_zero() {
    let mut h = Harness::new(MovementTuning::default());
    h.velocity = Vec2::new(0.4, 0.0);

    assert_eq!(h.tick().velocity.x, 0.0);
    assert_eq!(h.tick().velocity.x, 0.0);

    h.velocity = Vec2::new(-0.4, 0.0);
    assert_eq!(h.tick().velocity.x, 0.0);
}

#[test]
fn test_facing_follows_input() {
    let mut h = Harness::new(MovementTuning::default());
    h.sample(RawInput {
        horizontal: -1.0,
        ..default()
    });
    h.tick();
    assert_eq!(h.controller.presentation().facing, Facing::Left);

    h.sample(RawInput::default());
    h.tick();
    assert_eq!(h.controller.presentation().facing, Facing::Left);
}

// ============================================================================
// Wall slide and wall jump
// ============================================================================

/// Airborne, falling next to a wall on the right with wall grab held.
fn sliding_harness(tuning: MovementTuning) -> Harness {
    let mut h = Harness::new(tuning);
    h.world.wall = Some(Vec2::new(0.35, 0.2));
    h.velocity = Vec2::new(0.0, -2.0);
    h.sample(RawInput {
        horizontal: 1.0,
        wall_grab_held: true,
        ..default()
    });
    h
}

#[test]
fn test_wall_slide_brakes_fall_once() {
    let mut h = sliding_harness(MovementTuning::default());

    let output = h.tick();
    assert!(h.controller.state().is_wall_sliding);
    assert_eq!(output.velocity.y, 0.0);
    assert_eq!(output.gravity_scale, h.controller.tuning().gravity.wall_slide);

    // The brake is latched for the rest of the slide
    h.velocity = Vec2::new(0.0, -1.0);
    assert_eq!(h.tick().velocity.y, -1.0);
}

#[test]
fn test_wall_slide_ignores_horizontal_input() {
    let mut h = sliding_harness(MovementTuning::default());
    h.tick();
    h.sample(RawInput {
        horizontal: -1.0,
        wall_grab_held: true,
        ..default()
    });

    let output = h.tick();
    assert_eq!(output.velocity.x, 0.0);
    // Facing is frozen while sliding
    assert_eq!(h.controller.presentation().facing, Facing::Right);
}

#[test]
fn test_wall_jump_forces_acceleration_away_from_wall() {
    let mut h = sliding_harness(MovementTuning::default());
    h.tick();

    h.sample(RawInput {
        horizontal: 1.0,
        jump_pressed: true,
        jump_held: true,
        wall_grab_held: true,
        ..default()
    });
    let output = h.tick();

    assert_eq!(
        h.events(),
        vec![MovementEvent::WallJumped {
            direction: Facing::Right,
            contact_point: Vec2::new(0.35, 0.2),
        }]
    );
    assert_eq!(output.velocity.y, h.controller.tuning().jump.jump_speed);
    assert!(h.controller.is_overridden());
    assert_eq!(
        h.controller.state().active_override.map(|o| o.kind),
        Some(OverrideKind::WallJump)
    );

    // Keep pushing toward the wall; the arc and forced acceleration win anyway
    h.world.wall = None;
    h.sample(hold_right());

    let mut previous = h.velocity.x;
    while h.controller.is_overridden() {
        let vx = h.tick().velocity.x;
        assert!(vx < previous);
        previous = vx;
    }

    let mut forced_ticks = 0;
    while h.controller.is_wall_jump_accelerating() {
        let vx = h.tick().velocity.x;
        assert!(vx < 0.0);
        assert!(vx <= previous);
        previous = vx;
        forced_ticks += 1;
    }
    assert_eq!(forced_ticks, h.controller.tuning().wall_jump.accel_ticks);

    // Input takes over again
    let vx = h.tick().velocity.x;
    assert!(vx > previous);
}

#[test]
fn test_wall_jump_needs_grab_held() {
    let mut tuning = MovementTuning::default();
    tuning.wall_jump.rule = WallJumpRule::Window {
        window: 0.2,
        new_wall_only: false,
    };
    let mut h = sliding_harness(tuning);
    h.tick();

    // Released grab: still inside the window, but no charges and no grab
    h.sample(press_jump());
    h.tick();
    assert!(h.events().is_empty());
    assert!(h.input.is_jump_pending(h.now - DT));
}

#[test]
fn test_new_wall_rule_rejects_same_wall() {
    let mut tuning = MovementTuning::default();
    tuning.wall_jump.rule = WallJumpRule::Window {
        window: 0.2,
        new_wall_only: true,
    };
    let grab_jump = RawInput {
        jump_pressed: true,
        jump_held: true,
        wall_grab_held: true,
        ..default()
    };
    let grab = RawInput {
        wall_grab_held: true,
        ..default()
    };

    let mut h = sliding_harness(tuning);
    h.tick();
    h.sample(grab_jump);
    h.tick();
    assert!(matches!(
        h.events().as_slice(),
        [MovementEvent::WallJumped { .. }]
    ));

    h.sample(grab);
    while h.controller.is_overridden() {
        h.tick();
    }

    h.sample(grab_jump);
    h.tick();
    assert!(h.events().is_empty());
    h.input.clear_buffers();

    // A different wall is fine
    h.world.wall = Some(Vec2::new(1.35, 0.2));
    h.sample(grab);
    h.tick();
    h.sample(grab_jump);
    h.tick();
    assert!(matches!(
        h.events().as_slice(),
        [MovementEvent::WallJumped { .. }]
    ));
}

// ============================================================================
// Dash
// ============================================================================

#[test]
fn test_dash_direction_snaps_to_diagonal() {
    let mut h = Harness::new(MovementTuning::default());
    let target = DashTarget {
        id: 9,
        position: Vec2::new(3.0, 0.4),
    };
    h.target = Some(target);
    h.velocity = Vec2::new(1.0, -2.0);

    h.sample(RawInput {
        dash_pressed: true,
        dash_held: true,
        ..default()
    });
    let output = h.tick();

    assert_eq!(h.events(), vec![MovementEvent::Dashed { target }]);
    assert_eq!(output.velocity.y, 0.0);
    assert!(h.controller.is_overridden());
    assert!(h.controller.presentation().is_dashing);

    let active = h.controller.state().active_override;
    let Some(active) = active else {
        panic!("dash override not installed");
    };
    let dash = &h.controller.tuning().dash;
    let diagonal = std::f32::consts::FRAC_1_SQRT_2;
    assert_eq!(active.kind, OverrideKind::Dash);
    assert!((active.multiplier.x - diagonal * dash.horizontal_multiplier).abs() < 1e-5);
    assert!((active.multiplier.y - diagonal * dash.vertical_multiplier).abs() < 1e-5);
}

#[test]
fn test_dash_straight_up() {
    let mut h = Harness::new(MovementTuning::default());
    h.target = Some(DashTarget {
        id: 1,
        position: Vec2::new(0.0, 2.0),
    });
    h.sample(RawInput {
        dash_pressed: true,
        ..default()
    });
    h.tick();

    let multiplier = h.controller.state().active_override.map(|o| o.multiplier);
    let vertical = h.controller.tuning().dash.vertical_multiplier;
    assert_eq!(multiplier, Some(Vec2::new(0.0, vertical)));
}

#[test]
fn test_dash_without_target_keeps_press_buffered() {
    let mut h = Harness::new(MovementTuning::default());
    h.sample(RawInput {
        dash_pressed: true,
        ..default()
    });
    h.tick();
    assert!(h.events().is_empty());
    assert!(!h.controller.is_overridden());

    // Target comes into range while the press is still pending
    h.target = Some(DashTarget {
        id: 2,
        position: Vec2::new(-1.0, 0.0),
    });
    h.tick();
    assert_eq!(h.events().len(), 1);
}

#[test]
fn test_dash_curve_drives_velocity_until_exhausted() {
    let mut h = Harness::new(MovementTuning::default());
    h.target = Some(DashTarget {
        id: 3,
        position: Vec2::new(0.0, 5.0),
    });
    h.sample(RawInput {
        dash_pressed: true,
        ..default()
    });
    h.tick();

    let end = h.controller.tuning().dash.curve.end_time() as usize;
    let vertical = h.controller.tuning().dash.vertical_multiplier;
    let first = h.controller.tuning().dash.curve.sample(0.0);

    let output = h.tick();
    assert!((output.velocity.y - first * vertical).abs() < 1e-5);

    h.ticks(end - 1);
    assert!(!h.controller.is_overridden());
    // Clamp still holds during the arc
    assert!(h.velocity.y <= h.controller.tuning().clamp.max_vertical);
}

// ============================================================================
// Gravity scale
// ============================================================================

#[test]
fn test_gravity_scale_selection() {
    let tuning = MovementTuning::default();
    let gravity = tuning.gravity.clone();
    let mut h = Harness::new(tuning);

    h.velocity = Vec2::new(0.0, 2.0);
    h.sample(RawInput {
        jump_held: true,
        ..default()
    });
    assert_eq!(h.tick().gravity_scale, gravity.ascending);

    h.velocity = Vec2::new(0.0, 2.0);
    h.sample(RawInput::default());
    assert_eq!(h.tick().gravity_scale, gravity.base);

    h.velocity = Vec2::new(0.0, -2.0);
    assert_eq!(h.tick().gravity_scale, gravity.falling);

    h.velocity = Vec2::new(0.0, 0.001);
    assert_eq!(h.tick().gravity_scale, gravity.base);
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_velocity_always_clamped() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut h = Harness::new(MovementTuning::default());
    let clamp = h.controller.tuning().clamp.clone();

    for _ in 0..2_000 {
        h.world.ground = rng.random_bool(0.3);
        h.world.wall = rng
            .random_bool(0.3)
            .then(|| Vec2::new(rng.random_range(-1.0..1.0), 0.0));
        h.target = rng.random_bool(0.2).then(|| DashTarget {
            id: 1,
            position: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)),
        });
        if rng.random_bool(0.1) {
            h.velocity = Vec2::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
        }
        h.sample(RawInput {
            horizontal: rng.random_range(-1.0..=1.0),
            jump_held: rng.random_bool(0.5),
            jump_pressed: rng.random_bool(0.1),
            wall_grab_held: rng.random_bool(0.5),
            dash_held: rng.random_bool(0.2),
            dash_pressed: rng.random_bool(0.05),
            slide_held: false,
        });
        if rng.random_bool(0.05) {
            h.controller.grant_jump_charges(rng.random_range(0..3), rng.random_bool(0.5));
        }

        let v = h.tick().velocity;
        assert!(v.x.abs() <= clamp.max_horizontal);
        assert!(v.y >= clamp.min_vertical && v.y <= clamp.max_vertical);
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_empty_world_is_never_grounded() {
    let mut controller = MovementController::new(MovementTuning::default());
    controller.enable();
    let mut input = InputSampler::default();
    input.sample(press_jump(), 0.0);

    let mut ctx = TickContext {
        now: 0.0,
        position: Vec2::ZERO,
        velocity: Vec2::new(0.0, -1.0),
        input: &mut input,
        probe: &NoContacts,
        targets: &None::<DashTarget>,
    };
    let output = controller.tick(&mut ctx);

    assert!(!controller.presentation().is_grounded);
    assert_eq!(output.velocity.y, -1.0);
    assert_eq!(controller.drain_events(), vec![MovementEvent::Enabled]);
}

#[test]
fn test_kill_disables_and_reports_death() {
    let mut h = Harness::new(MovementTuning::default());
    h.velocity = Vec2::new(3.0, 3.0);
    h.tick();

    h.controller.kill();
    assert_eq!(
        h.events(),
        vec![MovementEvent::Disabled, MovementEvent::Died]
    );
    assert!(h.controller.is_disabled());

    // Killing a disabled character is a no-op
    h.controller.kill();
    assert!(h.events().is_empty());

    h.sample(press_jump());
    h.world.ground = true;
    let output = h.tick();
    assert_eq!(output.velocity, Vec2::ZERO);
    assert!(h.events().is_empty());
}

#[test]
fn test_enable_keeps_charges_and_facing_by_default() {
    let mut tuning = MovementTuning::default();
    tuning.jump.additional_jumps = 2;
    let mut h = Harness::new(tuning);
    h.world.ground = true;
    h.sample(RawInput {
        horizontal: -1.0,
        ..default()
    });
    h.tick();
    h.controller.grant_jump_charges(1, true);

    h.controller.disable();
    h.controller.enable();
    assert_eq!(
        h.events(),
        vec![MovementEvent::Disabled, MovementEvent::Enabled]
    );
    assert_eq!(h.controller.state().jump_charges, 3);
    assert_eq!(h.controller.state().facing, Facing::Left);
    assert!(h.controller.state().active_override.is_none());
}

#[test]
fn test_enable_with_reset_policy() {
    let mut tuning = MovementTuning::default();
    tuning.respawn.reset_jump_charges = true;
    tuning.respawn.reset_facing = true;
    let mut h = Harness::new(tuning);
    h.sample(RawInput {
        horizontal: -1.0,
        ..default()
    });
    h.tick();

    h.controller.kill();
    h.controller.enable();
    assert_eq!(h.controller.state().jump_charges, 1);
    assert_eq!(h.controller.state().facing, Facing::Right);
}

#[test]
fn test_disable_cancels_override() {
    let mut h = Harness::new(MovementTuning::default());
    h.target = Some(DashTarget {
        id: 4,
        position: Vec2::new(2.0, 0.0),
    });
    h.sample(RawInput {
        dash_pressed: true,
        ..default()
    });
    h.tick();
    assert!(h.controller.is_overridden());

    h.controller.disable();
    assert!(!h.controller.is_overridden());
}

#[test]
fn test_velocity_boost() {
    let mut h = Harness::new(MovementTuning::default());

    let boosted = h
        .controller
        .grant_velocity_boost(Vec2::new(-2.0, 1.0), Vec2::new(3.0, 5.0), false);
    assert_eq!(boosted, Vec2::new(-5.0, 6.0));

    let boosted = h
        .controller
        .grant_velocity_boost(Vec2::new(2.0, -4.0), Vec2::new(-3.0, 5.0), true);
    assert_eq!(boosted, Vec2::new(5.0, 5.0));
}
