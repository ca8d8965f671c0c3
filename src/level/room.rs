//! Level domain: the playground room used to exercise every movement feature.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::level::{Hazard, LevelSettings, Pickup, PickupKind, SpawnPoint};
use crate::movement::{DashPoint, GameLayer, Ground, Wall};

/// Radius inside which a dash point can be targeted
const DASH_POINT_RANGE: f32 = 3.0;
const DASH_POINT_COOLDOWN: f32 = 1.5;

pub(crate) fn spawn_room(mut commands: Commands, settings: Res<LevelSettings>) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    let mut solid = |marker: SolidKind, size: Vec2, position: Vec2| {
        let (color, layers) = match marker {
            SolidKind::Floor => (ground_color, ground_layers),
            SolidKind::Platform => (platform_color, ground_layers),
            SolidKind::Wall => (wall_color, wall_layers),
        };

        let mut entity = commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
        ));
        match marker {
            SolidKind::Wall => entity.insert(Wall),
            SolidKind::Floor | SolidKind::Platform => entity.insert(Ground),
        };
    };

    // Floor, split by the spike pit
    solid(SolidKind::Floor, Vec2::new(14.0, 1.0), Vec2::new(-5.0, -5.5));
    solid(SolidKind::Floor, Vec2::new(6.0, 1.0), Vec2::new(9.0, -5.5));

    // Outer walls
    solid(SolidKind::Wall, Vec2::new(1.0, 14.0), Vec2::new(-12.5, 1.0));
    solid(SolidKind::Wall, Vec2::new(1.0, 14.0), Vec2::new(12.5, 1.0));

    // Platforms
    solid(SolidKind::Platform, Vec2::new(4.0, 0.5), Vec2::new(-7.0, -1.5));
    solid(SolidKind::Platform, Vec2::new(4.0, 0.5), Vec2::new(7.0, 0.5));
    solid(SolidKind::Platform, Vec2::new(3.0, 0.5), Vec2::new(0.0, 3.5));

    // Pillar for wall jumping practice
    solid(SolidKind::Wall, Vec2::new(0.75, 5.0), Vec2::new(-2.5, -2.5));

    let sensor_layers = CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]);

    // Spike pit
    commands.spawn((
        Hazard,
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(Vec2::new(4.0, 0.5)),
            ..default()
        },
        Transform::from_xyz(4.0, -5.75, 0.0),
        RigidBody::Static,
        Collider::rectangle(4.0, 0.5),
        Sensor,
        sensor_layers,
    ));

    // Dash points over the pit and near the ceiling
    for position in [Vec2::new(4.0, -1.0), Vec2::new(-4.0, 5.0)] {
        commands.spawn((
            DashPoint::new(DASH_POINT_COOLDOWN),
            Sprite {
                color: Color::srgb(0.55, 0.85, 1.0),
                custom_size: Some(Vec2::splat(0.4)),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::circle(DASH_POINT_RANGE),
            Sensor,
            sensor_layers,
        ));
    }

    let pickups = [
        (
            PickupKind::JumpRefresher {
                charges: 1,
                ignore_limit: false,
            },
            Vec2::new(0.0, 5.0),
            Color::srgb(0.4, 1.0, 0.5),
        ),
        (
            PickupKind::JumpRefresher {
                charges: 1,
                ignore_limit: true,
            },
            Vec2::new(-10.0, 3.0),
            Color::srgb(0.2, 0.7, 0.3),
        ),
        (
            PickupKind::VelocityBooster {
                boost: Vec2::new(6.0, 5.0),
                override_vertical: true,
            },
            Vec2::new(9.0, -4.5),
            Color::srgb(1.0, 0.6, 0.2),
        ),
    ];

    for (kind, position, color) in pickups {
        commands.spawn((
            Pickup::new(kind, settings.pickup_respawn),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(0.5)),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            Visibility::default(),
            RigidBody::Static,
            Collider::rectangle(0.5, 0.5),
            Sensor,
            sensor_layers,
        ));
    }

    commands.spawn((SpawnPoint, Transform::from_xyz(-9.0, -4.0, 0.0)));

    info!("Spawned playground room");
}

#[derive(Clone, Copy)]
enum SolidKind {
    Floor,
    Platform,
    Wall,
}
