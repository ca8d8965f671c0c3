//! Debug domain: state for the movement debug tooling.

use bevy::prelude::*;

/// Seconds between presentation log lines
const LOG_INTERVAL: f32 = 0.5;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether to show the movement info overlay
    pub show_info: bool,
    /// Whether to log the presentation state periodically
    pub log_presentation: bool,
    pub log_timer: Timer,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_info: false,
            log_presentation: false,
            log_timer: Timer::from_seconds(LOG_INTERVAL, TimerMode::Repeating),
            status_message: None,
        }
    }
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}
