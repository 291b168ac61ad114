/*!
Core pose types and math aliases shared by the placement modules.

This module intentionally contains no placement logic. It defines the data types
exchanged between:
- the host session (hit tests, anchors)
- interpolation (per-frame lerp/slerp toward a target)
- orientation (up-vector correction)
- the placement controller

Conventions
- Units are meters.
- Right-handed, +Y up, and the "forward" of a model is -Z (the convention used by
  the AR frameworks this module plugs into).
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Model forward axis.
#[inline]
pub fn forward() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// A rigid pose (position + orientation).
///
/// Poses are relative to some parent frame: world space for hit results and anchors,
/// or an anchor's space for the displayed object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }

    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
        }
    }

    /// Convert to nalgebra `Isometry3` for use with rapier/parry queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.position.x, self.position.y, self.position.z),
            self.rotation,
        )
    }

    #[inline]
    pub fn from_iso(iso: &Iso) -> Self {
        Self {
            position: iso.translation.vector,
            rotation: iso.rotation,
        }
    }

    /// `self ∘ child`: express a pose given in this frame in this frame's parent.
    #[inline]
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * child.position,
            rotation: self.rotation * child.rotation,
        }
    }

    #[inline]
    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: rotation * -self.position,
            rotation,
        }
    }

    /// Map a point from this frame into the parent frame.
    #[inline]
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.position + self.rotation * point
    }

    /// Map a point from the parent frame into this frame.
    #[inline]
    pub fn inverse_transform_point(&self, point: &Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }

    /// Map a direction from the parent frame into this frame (translation ignored).
    #[inline]
    pub fn inverse_transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }

    /// The pose's forward axis in the parent frame.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * forward()
    }

    /// The pose's up axis in the parent frame.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * up()
    }
}
