use nalgebra as na;

use crate::orientation::rotation_between;
use crate::plane::PlaneType;
use crate::session::{SurfaceId, TrackingState};
use crate::types::{Pose, Vec3, up};

/// How far (meters) a point may sit off the plane and still count as on it.
pub const ON_PLANE_EPS: f32 = 1.0e-3;

/// `|normal.y|` above which a plane is classified as horizontal.
pub const HORIZONTAL_NORMAL_Y: f32 = 0.9;

/// A detected plane with a bounded polygon, the way AR runtimes report them.
///
/// - `center` is the plane's world pose; its +Y axis is the plane normal.
/// - `polygon` vertices are in the plane's local XZ coordinates, in order (either winding).
#[derive(Clone, Debug)]
pub struct DetectedPlane {
    pub id: SurfaceId,
    pub center: Pose,
    pub plane_type: PlaneType,
    pub polygon: Vec<na::Vector2<f32>>,
    pub tracking: TrackingState,
}

impl DetectedPlane {
    /// Rectangle of half extents `half_x` by `half_z` around `center`; type follows the normal.
    pub fn rectangle(id: SurfaceId, center: Pose, half_x: f32, half_z: f32) -> Self {
        let plane_type = classify_normal(&center.up());
        Self {
            id,
            center,
            plane_type,
            polygon: vec![
                na::Vector2::new(-half_x, -half_z),
                na::Vector2::new(half_x, -half_z),
                na::Vector2::new(half_x, half_z),
                na::Vector2::new(-half_x, half_z),
            ],
            tracking: TrackingState::Tracking,
        }
    }

    /// Upward-facing floor or table rectangle.
    pub fn floor(id: SurfaceId, position: Vec3, half_x: f32, half_z: f32) -> Self {
        Self::rectangle(id, Pose::from_position(position), half_x, half_z)
    }

    /// Wall rectangle whose normal is `facing`, `half_width` along the wall and
    /// `half_height` up it.
    pub fn wall(
        id: SurfaceId,
        position: Vec3,
        facing: Vec3,
        half_width: f32,
        half_height: f32,
    ) -> Self {
        let rotation = rotation_between(&up(), &facing);
        Self::rectangle(id, Pose::new(position, rotation), half_width, half_height)
    }

    pub fn with_polygon(mut self, polygon: Vec<na::Vector2<f32>>) -> Self {
        self.polygon = polygon;
        self
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.center.up()
    }

    /// Whether a world point lies on this plane and inside its polygon.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let local = self.center.inverse_transform_point(point);
        if local.y.abs() > ON_PLANE_EPS {
            return false;
        }
        point_in_polygon(&na::Vector2::new(local.x, local.z), &self.polygon)
    }
}

/// Classify a plane normal into an orientation category.
pub fn classify_normal(normal: &Vec3) -> PlaneType {
    let n = normal.try_normalize(1.0e-6).unwrap_or_else(up);
    if n.y >= HORIZONTAL_NORMAL_Y {
        PlaneType::HorizontalUpwardFacing
    } else if n.y <= -HORIZONTAL_NORMAL_Y {
        PlaneType::HorizontalDownwardFacing
    } else {
        PlaneType::Vertical
    }
}

/// Even-odd crossing test. Fewer than three vertices never contain anything.
pub fn point_in_polygon(p: &na::Vector2<f32>, polygon: &[na::Vector2<f32>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        // Edge straddles the horizontal line through `p`, and the crossing is to its right.
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
