//! Movement domain: dash point tracking and cooldowns.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{
    Candidate, DashTarget, DashTargetProvider, MovementEvent, Player, PlayerMovementEvent,
    closest_target,
};

/// A point the player can dash toward while inside its sensor.
#[derive(Component, Debug)]
pub struct DashPoint {
    pub cooldown: f32,
    pub cooldown_remaining: f32,
}

impl DashPoint {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            cooldown_remaining: 0.0,
        }
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0.0
    }
}

/// Dash points whose sensor currently overlaps the player.
#[derive(Resource, Debug, Default)]
pub struct DashPointsInRange {
    in_range: HashSet<Entity>,
    closest: Option<DashTarget>,
}

impl DashTargetProvider for DashPointsInRange {
    fn closest_in_range(&self) -> Option<DashTarget> {
        self.closest
    }
}

pub(crate) fn track_dash_point_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    players: Query<(), With<Player>>,
    dash_points: Query<(), With<DashPoint>>,
    mut in_range: ResMut<DashPointsInRange>,
) {
    let is_pair = |a: Entity, b: Entity| dash_points.contains(a) && players.contains(b);

    for event in started.read() {
        for (point, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if is_pair(point, other) {
                in_range.in_range.insert(point);
            }
        }
    }

    for event in ended.read() {
        for (point, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if is_pair(point, other) {
                in_range.in_range.remove(&point);
            }
        }
    }
}

pub(crate) fn update_closest_dash_point(
    player: Query<&Transform, With<Player>>,
    dash_points: Query<(Entity, &Transform, &DashPoint)>,
    mut in_range: ResMut<DashPointsInRange>,
) {
    let Ok(player_transform) = player.single() else {
        in_range.closest = None;
        return;
    };
    let origin = player_transform.translation.truncate();

    // Despawned points drop out of range
    in_range
        .in_range
        .retain(|entity| dash_points.contains(*entity));

    let candidates = in_range.in_range.iter().filter_map(|entity| {
        dash_points
            .get(*entity)
            .ok()
            .map(|(entity, transform, point)| Candidate {
                target: DashTarget {
                    id: entity.to_bits(),
                    position: transform.translation.truncate(),
                },
                on_cooldown: point.is_on_cooldown(),
            })
    });

    let closest = closest_target(origin, candidates);
    in_range.closest = closest;
}

pub(crate) fn start_dash_point_cooldowns(
    mut movement_events: MessageReader<PlayerMovementEvent>,
    mut dash_points: Query<(Entity, &mut DashPoint)>,
) {
    for event in movement_events.read() {
        let MovementEvent::Dashed { target } = event.event else {
            continue;
        };

        for (entity, mut point) in &mut dash_points {
            if entity.to_bits() == target.id {
                point.cooldown_remaining = point.cooldown;
                debug!("Dash point {:?} on cooldown for {}s", entity, point.cooldown);
            }
        }
    }
}

pub(crate) fn tick_dash_point_cooldowns(
    time: Res<Time>,
    mut dash_points: Query<(&mut DashPoint, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (mut point, mut sprite) in &mut dash_points {
        if point.cooldown_remaining > 0.0 {
            point.cooldown_remaining = (point.cooldown_remaining - dt).max(0.0);
        }

        sprite.color = if point.is_on_cooldown() {
            Color::srgb(0.35, 0.35, 0.45)
        } else {
            Color::srgb(0.55, 0.85, 1.0)
        };
    }
}
