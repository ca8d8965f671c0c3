//! Movement domain: buffered input sampling.

use bevy::prelude::*;

/// Sentinel timestamp for "never happened". Anything compared against it is in the past.
pub const FAR_PAST: f32 = f32::NEG_INFINITY;

/// Raw per-frame input as reported by the platform layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawInput {
    pub horizontal: f32,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub wall_grab_held: bool,
    pub dash_held: bool,
    pub dash_pressed: bool,
    pub slide_held: bool,
}

/// Level-triggered state from the most recent sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub horizontal: f32,
    pub jump_held: bool,
    pub wall_grab_held: bool,
    pub dash_held: bool,
    pub slide_held: bool,
}

#[derive(Component, Debug, Clone)]
pub struct InputSampler {
    buffer_window: f32,
    snapshot: InputSnapshot,
    jump_buffered_at: f32,
    dash_buffered_at: f32,
}

impl InputSampler {
    pub fn new(buffer_window: f32) -> Self {
        Self {
            buffer_window,
            snapshot: InputSnapshot::default(),
            jump_buffered_at: FAR_PAST,
            dash_buffered_at: FAR_PAST,
        }
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn sample(&mut self, raw: RawInput, now: f32) {
        self.snapshot = InputSnapshot {
            horizontal: raw.horizontal.clamp(-1.0, 1.0),
            jump_held: raw.jump_held,
            wall_grab_held: raw.wall_grab_held,
            dash_held: raw.dash_held,
            slide_held: raw.slide_held,
        };

        // A new press overwrites the previous one; presses never stack
        if raw.jump_pressed {
            self.jump_buffered_at = now;
        }
        if raw.dash_pressed {
            self.dash_buffered_at = now;
        }
    }

    pub fn is_jump_pending(&self, now: f32) -> bool {
        self.jump_buffered_at + self.buffer_window > now
    }

    pub fn is_dash_pending(&self, now: f32) -> bool {
        self.dash_buffered_at + self.buffer_window > now
    }

    pub fn consume_jump(&mut self, now: f32) -> bool {
        let pending = self.is_jump_pending(now);
        self.jump_buffered_at = FAR_PAST;
        pending
    }

    pub fn consume_dash(&mut self, now: f32) -> bool {
        let pending = self.is_dash_pending(now);
        self.dash_buffered_at = FAR_PAST;
        pending
    }

    /// Drop any buffered presses, e.g. when the character is disabled.
    pub fn clear_buffers(&mut self) {
        self.jump_buffered_at = FAR_PAST;
        self.dash_buffered_at = FAR_PAST;
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(0.1)
    }
}
