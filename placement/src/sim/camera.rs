use nalgebra as na;
use rapier3d::prelude::Ray;

use crate::types::{Pose, Vec3};

/// A pinhole camera looking down its local -Z axis, +Y up.
///
/// Screen coordinates are pixels with the origin at the top-left corner, matching
/// touch and cursor events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinholeCamera {
    /// World pose of the camera.
    pub pose: Pose,
    /// Viewport size in pixels (width, height).
    pub viewport: na::Vector2<f32>,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl PinholeCamera {
    pub fn new(pose: Pose, width: f32, height: f32, fov_y: f32) -> Self {
        Self {
            pose,
            viewport: na::Vector2::new(width, height),
            fov_y,
        }
    }

    /// Camera at `eye` looking at `target` with world +Y as up.
    pub fn looking_at(eye: Vec3, target: Vec3, width: f32, height: f32, fov_y: f32) -> Self {
        let dir = target - eye;
        // `face_towards` aligns local +Z with `dir`; the camera looks down -Z, so aim +Z away.
        let rotation = na::UnitQuaternion::face_towards(&-dir, &Vec3::y());
        Self::new(Pose::new(eye, rotation), width, height, fov_y)
    }

    #[inline]
    fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    #[inline]
    fn is_degenerate(&self) -> bool {
        self.viewport.x <= 0.0 || self.viewport.y <= 0.0 || self.fov_y <= 0.0
    }

    /// World-space ray through a screen pixel. `None` for a degenerate viewport.
    pub fn screen_ray(&self, x: f32, y: f32) -> Option<Ray> {
        if self.is_degenerate() {
            return None;
        }

        let tan = (self.fov_y * 0.5).tan();
        let ndc_x = 2.0 * x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.viewport.y;
        let local_dir = Vec3::new(ndc_x * tan * self.aspect(), ndc_y * tan, -1.0);
        let dir = (self.pose.rotation * local_dir).normalize();

        Some(Ray::new(na::Point3::from(self.pose.position), dir))
    }

    /// Screen pixel where a world point appears. `None` if it is behind the camera.
    pub fn project(&self, world: &Vec3) -> Option<na::Vector2<f32>> {
        if self.is_degenerate() {
            return None;
        }

        let local = self.pose.inverse_transform_point(world);
        if local.z >= -1.0e-6 {
            return None;
        }

        let tan = (self.fov_y * 0.5).tan();
        let ndc_x = (local.x / -local.z) / (tan * self.aspect());
        let ndc_y = (local.y / -local.z) / tan;
        Some(na::Vector2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }
}
