//! Movement domain: ground and wall probes backed by avian spatial queries.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{ContactProbe, GameLayer, ProbeMask};

/// Answers the controller's contact probes with ray casts against the physics world.
pub(crate) struct SpatialProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> SpatialProbe<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self { spatial_query }
    }
}

impl ContactProbe for SpatialProbe<'_, '_, '_> {
    fn probe(&self, from: Vec2, to: Vec2, mask: ProbeMask) -> Option<Vec2> {
        let offset = to - from;
        let direction = Dir2::new(offset).ok()?;

        // Only hit the requested surface layer (not sensors, not the player)
        let filter = match mask {
            ProbeMask::Ground => SpatialQueryFilter::from_mask(GameLayer::Ground),
            ProbeMask::Wall => SpatialQueryFilter::from_mask(GameLayer::Wall),
        };

        self.spatial_query
            .cast_ray(from, direction, offset.length(), true, &filter)
            .map(|hit| from + *direction * hit.distance)
    }
}
