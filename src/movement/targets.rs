//! Movement domain: dash target selection.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashTarget {
    /// Opaque handle the host uses to find the target again
    pub id: u64,
    pub position: Vec2,
}

pub trait DashTargetProvider {
    fn closest_in_range(&self) -> Option<DashTarget>;
}

impl DashTargetProvider for Option<DashTarget> {
    fn closest_in_range(&self) -> Option<DashTarget> {
        *self
    }
}

/// A target the player is in range of.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub target: DashTarget,
    pub on_cooldown: bool,
}

/// Nearest candidate to `origin` that is not on cooldown.
/// Equally distant candidates resolve to the first one seen.
pub fn closest_target(
    origin: Vec2,
    candidates: impl IntoIterator<Item = Candidate>,
) -> Option<DashTarget> {
    let mut closest: Option<(f32, DashTarget)> = None;

    for candidate in candidates {
        if candidate.on_cooldown {
            continue;
        }

        let distance = candidate.target.position.distance(origin);
        match closest {
            Some((best, _)) if best <= distance => {}
            _ => closest = Some((distance, candidate.target)),
        }
    }

    closest.map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, x: f32, y: f32, on_cooldown: bool) -> Candidate {
        Candidate {
            target: DashTarget {
                id,
                position: Vec2::new(x, y),
            },
            on_cooldown,
        }
    }

    #[test]
    fn test_picks_nearest() {
        let found = closest_target(
            Vec2::ZERO,
            [candidate(1, 5.0, 0.0, false), candidate(2, 0.0, 2.0, false)],
        );
        assert_eq!(found.map(|t| t.id), Some(2));
    }

    #[test]
    fn test_skips_targets_on_cooldown() {
        let found = closest_target(
            Vec2::ZERO,
            [candidate(1, 5.0, 0.0, false), candidate(2, 0.0, 2.0, true)],
        );
        assert_eq!(found.map(|t| t.id), Some(1));
    }

    #[test]
    fn test_tie_keeps_first() {
        let found = closest_target(
            Vec2::ZERO,
            [candidate(7, 1.0, 0.0, false), candidate(8, -1.0, 0.0, false)],
        );
        assert_eq!(found.map(|t| t.id), Some(7));
    }

    #[test]
    fn test_no_candidates() {
        assert!(closest_target(Vec2::ZERO, []).is_none());
    }
}
