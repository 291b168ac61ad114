//! Rapier-backed ray queries against simulated planes.
//!
//! Design goals
//! - Deterministic: given the same planes (sorted by `id`), build identical collider sets.
//! - Query-focused: only ray casts are needed, so there is no rigid-body or contact
//!   state, just a `ColliderSet` of half-spaces.
//! - Every hit along the ray is reported, nearest first, the way AR hit tests do.
//!   Polygon bounds are checked separately by the caller.

use rapier3d::prelude::*;

use crate::session::SurfaceId;
use crate::sim::plane::DetectedPlane;
use crate::types::Vec3;

/// One ray/plane intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneRayHit {
    pub surface: SurfaceId,
    /// Distance along the (unit) ray direction.
    pub time_of_impact: f32,
    pub point: Vec3,
}

/// Colliders for the tracked planes of a simulated session.
pub struct SurfaceQueryWorld {
    colliders: ColliderSet,
}

impl SurfaceQueryWorld {
    /// Build from the tracked planes. Planes that are not tracking are not hit-testable.
    pub fn build<'a>(planes: impl IntoIterator<Item = &'a DetectedPlane>) -> Self {
        let mut tracked: Vec<&DetectedPlane> = planes
            .into_iter()
            .filter(|p| p.tracking.is_tracking())
            .collect();
        // Ensure deterministic insertion order.
        tracked.sort_by_key(|p| p.id);

        let mut colliders = ColliderSet::new();
        for plane in tracked {
            // A plane's local +Y is its normal, so an untranslated +Y half-space placed at the
            // plane pose lies exactly on the plane.
            let mut collider = ColliderBuilder::halfspace(Vector::y_axis())
                .user_data(plane.id as u128)
                .build();
            collider.set_position(plane.center.iso());
            colliders.insert(collider);
        }

        Self { colliders }
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Every plane the ray crosses within `max_distance`, nearest first.
    ///
    /// Planes are hit from either side; a ray parallel to a plane never hits it.
    pub fn cast_all(&self, ray: &Ray, max_distance: f32) -> Vec<PlaneRayHit> {
        let mut hits: Vec<PlaneRayHit> = self
            .colliders
            .iter()
            .filter_map(|(_handle, collider)| {
                let hit = collider.shape().cast_ray_and_get_normal(
                    collider.position(),
                    ray,
                    max_distance.max(0.0),
                    false,
                )?;
                Some(PlaneRayHit {
                    surface: collider.user_data as SurfaceId,
                    time_of_impact: hit.time_of_impact,
                    point: ray.point_at(hit.time_of_impact).coords,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.time_of_impact
                .total_cmp(&b.time_of_impact)
                .then(a.surface.cmp(&b.surface))
        });
        hits
    }
}
