//! The host AR session as seen by the placement controller.
//!
//! Tracking, plane detection, hit testing and anchors all belong to the host engine.
//! The controller only consumes them through [`ArSession`], which keeps it usable with
//! any AR runtime (and with [`crate::sim::SimulatedSession`] in tests and the viewer).

use crate::plane::PlaneType;
use crate::types::Pose;

/// Opaque id of a tracked surface (plane or feature point).
pub type SurfaceId = u32;

/// Opaque id of a host anchor.
pub type AnchorId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingState {
    Tracking,
    Paused,
    #[default]
    Stopped,
}

impl TrackingState {
    #[inline]
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking)
    }
}

/// What a hit landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Trackable {
    Plane {
        plane_type: PlaneType,
        /// Whether the hit lies inside the plane's bounded polygon, not just on its
        /// infinite extension.
        pose_in_polygon: bool,
    },
    /// A feature point or any other non-planar trackable.
    Point,
}

/// One candidate returned by [`ArSession::hit_test`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    /// World-space hit pose. For planes, the rotation's up axis is the plane normal.
    pub pose: Pose,
    pub trackable: Trackable,
}

/// A tracked surface as listed by [`ArSession::surfaces`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceInfo {
    pub id: SurfaceId,
    pub plane_type: PlaneType,
    /// World-space center pose of the surface.
    pub center: Pose,
    pub tracking: TrackingState,
}

pub trait ArSession {
    /// Tracking state of the camera for the current frame.
    fn camera_tracking(&self) -> TrackingState;

    /// Hit test at a screen coordinate (pixels, top-left origin) against the current
    /// frame. Results are ordered nearest first.
    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<SurfaceHit>;

    fn surface_tracking(&self, surface: SurfaceId) -> TrackingState;

    /// Currently known planar surfaces, in detection order.
    fn surfaces(&self) -> Vec<SurfaceInfo>;

    /// Create an anchor at a world pose attached to `surface`.
    /// Returns `None` if the host refuses (e.g. the surface stopped tracking).
    fn create_anchor(&mut self, surface: SurfaceId, pose: &Pose) -> Option<AnchorId>;

    fn detach_anchor(&mut self, anchor: AnchorId);

    /// Current world pose of an anchor, `None` once detached or unknown.
    fn anchor_pose(&self, anchor: AnchorId) -> Option<Pose>;
}
