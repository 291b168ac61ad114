/*!
Placement settings and tolerances.

These constants centralize the parameters used by the per-frame interpolation and
the placement controller. They are gathered into [`PlacementSettings`] so a host
can override them per object; the constants are the defaults.

Notes
- Distances are in meters, time in seconds.
- The interpolation constants aim for "fast enough to feel responsive, slow enough
  to avoid visible popping".
*/

/// Interpolation speed (1/s). The per-frame factor is `clamp(dt * LERP_SPEED, 0, 1)`,
/// i.e. a time constant of roughly 83 ms.
pub const LERP_SPEED: f32 = 12.0;

/// Distance (meters) under which the displayed position snaps to the target.
pub const POSITION_LENGTH_THRESHOLD: f32 = 0.01;

/// `|dot(current, desired)|` at or above which the displayed rotation snaps to the target.
/// 0.99 leaves a residual of about 8 degrees.
pub const ROTATION_DOT_THRESHOLD: f32 = 0.99;

/// Practical small length for comparisons (meters, or unit-vector components).
pub const DIST_EPS: f32 = 1.0e-6;

/// Smallest uniform scale accepted by `set_scale`.
pub const MIN_SCALE: f32 = 0.1;

/// Largest uniform scale accepted by `set_scale`.
pub const MAX_SCALE: f32 = 10.0;

/// Per-object placement tuning.
///
/// `model_centering` is the vertical offset (meters) supplied by whoever loaded the
/// model, e.g. to sit a model whose origin is at its center on top of a plane. It is
/// added to every accepted hit and used as the resting offset after a commit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementSettings {
    pub lerp_speed: f32,
    pub position_threshold: f32,
    pub rotation_dot_threshold: f32,
    pub model_centering: f32,
    /// Place the model automatically on the first tracked, allowed surface.
    pub instant_placement: bool,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            lerp_speed: LERP_SPEED,
            position_threshold: POSITION_LENGTH_THRESHOLD,
            rotation_dot_threshold: ROTATION_DOT_THRESHOLD,
            model_centering: 0.0,
            instant_placement: false,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl PlacementSettings {
    /// Clamp a requested scale into the configured range.
    #[inline]
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        let lo = self.min_scale.max(0.0);
        let hi = self.max_scale.max(lo);
        scale.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_documented_constants() {
        let s = PlacementSettings::default();
        assert_eq!(s.lerp_speed, 12.0);
        assert_eq!(s.position_threshold, 0.01);
        assert_eq!(s.rotation_dot_threshold, 0.99);
        assert_eq!(s.model_centering, 0.0);
        assert!(!s.instant_placement);
    }

    #[test]
    fn clamp_scale_respects_bounds() {
        let s = PlacementSettings::default();
        assert_eq!(s.clamp_scale(0.0), MIN_SCALE);
        assert_eq!(s.clamp_scale(2.5), 2.5);
        assert_eq!(s.clamp_scale(1000.0), MAX_SCALE);
    }

    #[test]
    fn clamp_scale_survives_inverted_bounds() {
        let s = PlacementSettings {
            min_scale: 2.0,
            max_scale: 1.0,
            ..PlacementSettings::default()
        };
        assert_eq!(s.clamp_scale(0.5), 2.0);
        assert_eq!(s.clamp_scale(5.0), 2.0);
    }
}
