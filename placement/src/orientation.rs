use nalgebra as na;

use crate::settings::DIST_EPS;
use crate::types::{Quat, Vec3, forward, up};

/// Shortest-arc rotation mapping direction `from` onto direction `to`.
///
/// - Inputs need not be normalized. A (near) zero input yields identity.
/// - Opposite directions resolve to a half turn about an axis perpendicular to `from`.
#[inline]
pub fn rotation_between(from: &Vec3, to: &Vec3) -> Quat {
    let (Some(a), Some(b)) = (from.try_normalize(DIST_EPS), to.try_normalize(DIST_EPS)) else {
        return Quat::identity();
    };

    if let Some(q) = Quat::rotation_between(&a, &b) {
        return q;
    }

    // Anti-parallel: any perpendicular axis works. Prefer one built from +X unless `a` is
    // (nearly) along X.
    let helper = if a.x.abs() < 0.9 {
        Vec3::x()
    } else {
        Vec3::y()
    };
    let axis = na::Unit::new_normalize(a.cross(&helper));
    Quat::from_axis_angle(&axis, std::f32::consts::PI)
}

/// Desired rotation for an object dropped on a surface whose pose rotation is `surface_rotation`.
///
/// The object's up axis follows the surface normal (`surface_rotation * UP`) while its
/// forward axis keeps pointing along `initial_forward`, so sampling a slightly different
/// surface rotation each frame never spins or rolls the object:
///
/// `normalize(rotation_between(UP, surface_up) * rotation_between(FORWARD, initial_forward))`
#[inline]
pub fn surface_aligned_rotation(surface_rotation: &Quat, initial_forward: &Vec3) -> Quat {
    let rotated_up = surface_rotation * up();
    let up_only = rotation_between(&up(), &rotated_up);
    let keep_forward = rotation_between(&forward(), initial_forward);

    Quat::new_normalize((up_only * keep_forward).into_inner())
}
