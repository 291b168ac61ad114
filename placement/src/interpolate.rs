//! Per-frame smoothing of the displayed pose toward a desired pose.
//!
//! Position and rotation are stepped independently; each reports whether it has
//! converged so the caller can clear its own pending target.

use crate::types::{Quat, Vec3};

/// Result of a single interpolation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<T> {
    /// Value to display this frame. Equals the target exactly when `converged`.
    pub value: T,
    pub converged: bool,
}

/// `clamp(dt * lerp_speed, 0, 1)`. Non-finite products (NaN inputs) yield 0.
#[inline]
pub fn lerp_factor(dt_seconds: f32, lerp_speed: f32) -> f32 {
    let f = dt_seconds * lerp_speed;
    if f.is_nan() {
        return 0.0;
    }
    f.clamp(0.0, 1.0)
}

/// Lerp `current` toward `desired`; snap once within `threshold` meters.
#[inline]
pub fn step_position(current: Vec3, desired: Vec3, factor: f32, threshold: f32) -> Step<Vec3> {
    let value = current.lerp(&desired, factor);
    if (desired - value).norm() <= threshold {
        return Step {
            value: desired,
            converged: true,
        };
    }

    Step {
        value,
        converged: false,
    }
}

/// Slerp `current` toward `desired`; snap once `|dot| >= dot_threshold`.
#[inline]
pub fn step_rotation(current: Quat, desired: Quat, factor: f32, dot_threshold: f32) -> Step<Quat> {
    // Fails only for antipodal inputs.
    let value = current
        .try_slerp(&desired, factor, f32::EPSILON)
        .unwrap_or(desired);

    if quat_dot(&value, &desired).abs() >= dot_threshold {
        return Step {
            value: desired,
            converged: true,
        };
    }

    Step {
        value,
        converged: false,
    }
}

/// 4D dot product of two unit quaternions.
#[inline]
pub fn quat_dot(a: &Quat, b: &Quat) -> f32 {
    a.coords.dot(&b.coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LERP_SPEED, POSITION_LENGTH_THRESHOLD, ROTATION_DOT_THRESHOLD};
    use nalgebra as na;

    #[test]
    fn factor_is_clamped_for_any_non_negative_dt() {
        for dt in [0.0, 1.0e-4, 0.016, 0.083, 0.5, 1.0, 10.0, f32::INFINITY] {
            let f = lerp_factor(dt, LERP_SPEED);
            assert!((0.0..=1.0).contains(&f), "dt={dt} factor={f}");
        }
        assert_eq!(lerp_factor(-1.0, LERP_SPEED), 0.0);
        assert_eq!(lerp_factor(f32::NAN, LERP_SPEED), 0.0);
        assert_eq!(lerp_factor(1.0, LERP_SPEED), 1.0);
    }

    #[test]
    fn saturated_factor_snaps_position() {
        let step = step_position(
            Vec3::zeros(),
            Vec3::new(1.0, 2.0, 3.0),
            1.0,
            POSITION_LENGTH_THRESHOLD,
        );
        assert!(step.converged);
        assert_eq!(step.value, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn position_converges_over_frames_and_lands_exactly() {
        let desired = Vec3::new(0.5, 0.0, -2.0);
        let mut current = Vec3::zeros();
        let factor = lerp_factor(1.0 / 60.0, LERP_SPEED);

        let mut frames = 0;
        loop {
            let step = step_position(current, desired, factor, POSITION_LENGTH_THRESHOLD);
            current = step.value;
            frames += 1;
            if step.converged {
                break;
            }
            assert!(frames < 200, "position never converged");
        }
        // Exact equality, not just within threshold.
        assert_eq!(current, desired);
        // 0.2 factor per frame: ~2.06m shrinks below 1cm in roughly 24 frames.
        assert!(frames > 10 && frames < 40, "frames={frames}");
    }

    #[test]
    fn rotation_converges_and_snaps_to_target() {
        let desired = Quat::from_axis_angle(&na::Vector3::y_axis(), 2.0);
        let mut current = Quat::identity();
        let factor = lerp_factor(1.0 / 60.0, LERP_SPEED);

        let mut frames = 0;
        loop {
            let step = step_rotation(current, desired, factor, ROTATION_DOT_THRESHOLD);
            current = step.value;
            frames += 1;
            if step.converged {
                break;
            }
            assert!(frames < 200, "rotation never converged");
        }
        assert_eq!(current, desired);
    }

    #[test]
    fn rotation_within_threshold_snaps_immediately() {
        // 8 degrees apart: 4D dot = cos(4 deg) > 0.99.
        let desired = Quat::from_axis_angle(&na::Vector3::x_axis(), 8.0_f32.to_radians());
        let step = step_rotation(Quat::identity(), desired, 0.0, ROTATION_DOT_THRESHOLD);
        assert!(step.converged);
        assert_eq!(step.value, desired);
    }

    #[test]
    fn zero_factor_leaves_far_targets_pending() {
        let step = step_position(
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, 1.0),
            0.0,
            POSITION_LENGTH_THRESHOLD,
        );
        assert!(!step.converged);
        assert_eq!(step.value, Vec3::zeros());

        let half_turn = Quat::from_axis_angle(&na::Vector3::y_axis(), std::f32::consts::PI);
        let r = step_rotation(Quat::identity(), half_turn, 0.0, ROTATION_DOT_THRESHOLD);
        assert!(!r.converged);
    }

    #[test]
    fn dot_is_sign_agnostic_after_abs() {
        let q = Quat::from_axis_angle(&na::Vector3::z_axis(), 0.3);
        let neg = Quat::new_unchecked(-q.into_inner());
        assert!((quat_dot(&q, &neg) + 1.0).abs() < 1.0e-6);
        let step = step_rotation(neg, q, 0.0, ROTATION_DOT_THRESHOLD);
        assert!(step.converged);
    }
}
