//! Movement domain: fixed-step driver for the movement controller.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::systems::collisions::SpatialProbe;
use crate::movement::{
    DashPointsInRange, Facing, InputSampler, MovementController, MovementEvent, Player,
    PlayerMovementEvent, TickContext,
};

pub(crate) fn run_movement_tick(
    mut commands: Commands,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    dash_points: Res<DashPointsInRange>,
    mut movement_events: MessageWriter<PlayerMovementEvent>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &mut MovementController,
            &mut InputSampler,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let probe = SpatialProbe::new(&spatial_query);

    for (entity, transform, mut controller, mut input, mut velocity, mut gravity_scale) in
        &mut query
    {
        if !controller.is_disabled() {
            let mut ctx = TickContext {
                now,
                position: transform.translation.truncate(),
                velocity: velocity.0,
                input: &mut *input,
                probe: &probe,
                targets: &*dash_points,
            };
            let output = controller.tick(&mut ctx);
            velocity.0 = output.velocity;
            gravity_scale.0 = output.gravity_scale;
        }

        for event in controller.drain_events() {
            match event {
                MovementEvent::Enabled => {
                    commands
                        .entity(entity)
                        .insert(RigidBody::Dynamic)
                        .remove::<ColliderDisabled>();
                }
                MovementEvent::Disabled => {
                    // Non-interactive: no physics response, no contacts
                    velocity.0 = Vec2::ZERO;
                    input.clear_buffers();
                    commands
                        .entity(entity)
                        .insert((RigidBody::Kinematic, ColliderDisabled));
                }
                _ => {}
            }

            movement_events.write(PlayerMovementEvent { entity, event });
        }
    }
}

pub(crate) fn apply_presentation(
    mut query: Query<(&MovementController, &mut Sprite), With<Player>>,
) {
    for (controller, mut sprite) in &mut query {
        let presentation = controller.presentation();

        sprite.flip_x = presentation.facing == Facing::Left;
        sprite.color = if controller.is_disabled() {
            Color::srgba(0.9, 0.9, 0.9, 0.25)
        } else if presentation.is_dashing {
            Color::srgb(1.0, 0.9, 0.5)
        } else if presentation.is_wall_sliding {
            Color::srgb(0.7, 0.8, 1.0)
        } else {
            Color::srgb(0.9, 0.9, 0.9)
        };
    }
}
