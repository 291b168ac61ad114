//! glam (bevy) <-> nalgebra (placement) conversions.

use bevy::prelude::*;
use placement::types as pt;

pub fn vec3_to_bevy(v: &pt::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn vec3_from_bevy(v: Vec3) -> pt::Vec3 {
    pt::Vec3::new(v.x, v.y, v.z)
}

pub fn quat_to_bevy(q: &pt::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

pub fn quat_from_bevy(q: Quat) -> pt::Quat {
    pt::Quat::from_quaternion(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn pose_to_transform(pose: &pt::Pose, scale: f32) -> Transform {
    Transform {
        translation: vec3_to_bevy(&pose.position),
        rotation: quat_to_bevy(&pose.rotation),
        scale: Vec3::splat(scale),
    }
}

pub fn pose_from_transform(transform: &Transform) -> pt::Pose {
    pt::Pose::new(
        vec3_from_bevy(transform.translation),
        quat_from_bevy(transform.rotation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_and_pose_agree_on_forward() {
        let transform = Transform::from_xyz(1.0, 2.0, 3.0)
            .looking_at(Vec3::new(4.0, 2.0, -1.0), Vec3::Y);
        let pose = pose_from_transform(&transform);

        let bevy_forward = transform.forward().as_vec3();
        let pose_forward = vec3_to_bevy(&pose.forward());
        assert!((bevy_forward - pose_forward).length() < 1.0e-5);

        let back = pose_to_transform(&pose, 2.0);
        assert!((back.translation - transform.translation).length() < 1.0e-6);
        assert!(back.rotation.angle_between(transform.rotation) < 1.0e-4);
        assert_eq!(back.scale, Vec3::splat(2.0));
    }
}
