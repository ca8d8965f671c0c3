//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod dash_points;
pub(crate) mod input;
pub(crate) mod movement;

pub use dash_points::{DashPoint, DashPointsInRange};
pub(crate) use dash_points::{
    start_dash_point_cooldowns, tick_dash_point_cooldowns, track_dash_point_contacts,
    update_closest_dash_point,
};
pub(crate) use input::read_input;
pub(crate) use movement::{apply_presentation, run_movement_tick};
