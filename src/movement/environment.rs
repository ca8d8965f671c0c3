//! Movement domain: environment queries supplied by the host world.

use bevy::prelude::*;

/// Which kind of surface a probe should hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMask {
    Ground,
    Wall,
}

pub trait ContactProbe {
    /// Cast a segment from `from` to `to` against surfaces of `mask`.
    /// Returns the first hit point, or `None` when nothing is in the way.
    fn probe(&self, from: Vec2, to: Vec2, mask: ProbeMask) -> Option<Vec2>;
}

/// A world with nothing in it.
pub struct NoContacts;

impl ContactProbe for NoContacts {
    fn probe(&self, _from: Vec2, _to: Vec2, _mask: ProbeMask) -> Option<Vec2> {
        None
    }
}
