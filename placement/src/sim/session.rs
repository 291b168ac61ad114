use std::collections::HashMap;

use crate::session::{
    AnchorId, ArSession, SurfaceHit, SurfaceId, SurfaceInfo, Trackable, TrackingState,
};
use crate::sim::camera::PinholeCamera;
use crate::sim::plane::DetectedPlane;
use crate::sim::query_world::SurfaceQueryWorld;
use crate::types::{Pose, Vec3};

/// Hit tests ignore anything farther than this (meters).
pub const DEFAULT_MAX_HIT_DISTANCE: f32 = 50.0;

#[derive(Clone, Copy, Debug)]
struct SimAnchor {
    surface: SurfaceId,
    pose: Pose,
}

/// An in-memory AR session: a camera, a set of detected planes and the anchors
/// created on them.
///
/// Planes are static once detected; tracking loss is modelled by
/// [`SimulatedSession::set_plane_tracking`] and [`SimulatedSession::remove_plane`].
/// The ray-query world is rebuilt whenever the plane set changes.
pub struct SimulatedSession {
    camera: PinholeCamera,
    camera_tracking: TrackingState,
    /// Detection order.
    planes: Vec<DetectedPlane>,
    query_world: SurfaceQueryWorld,
    anchors: HashMap<AnchorId, SimAnchor>,
    next_anchor: AnchorId,
    anchors_created: usize,
    anchors_detached: usize,
    pub max_hit_distance: f32,
}

impl SimulatedSession {
    pub fn new(camera: PinholeCamera) -> Self {
        Self {
            camera,
            camera_tracking: TrackingState::Tracking,
            planes: Vec::new(),
            query_world: SurfaceQueryWorld::build(std::iter::empty::<&DetectedPlane>()),
            anchors: HashMap::new(),
            next_anchor: 1,
            anchors_created: 0,
            anchors_detached: 0,
            max_hit_distance: DEFAULT_MAX_HIT_DISTANCE,
        }
    }

    pub fn with_planes(
        camera: PinholeCamera,
        planes: impl IntoIterator<Item = DetectedPlane>,
    ) -> Self {
        let mut session = Self::new(camera);
        session.planes = planes.into_iter().collect();
        session.rebuild();
        session
    }

    fn rebuild(&mut self) {
        self.query_world = SurfaceQueryWorld::build(&self.planes);
    }

    /// Add a detected plane, replacing any plane with the same id.
    pub fn add_plane(&mut self, plane: DetectedPlane) {
        match self.planes.iter_mut().find(|p| p.id == plane.id) {
            Some(existing) => *existing = plane,
            None => self.planes.push(plane),
        }
        self.rebuild();
    }

    /// Forget a plane entirely. Anchors on it stay alive until detached.
    pub fn remove_plane(&mut self, id: SurfaceId) -> Option<DetectedPlane> {
        let index = self.planes.iter().position(|p| p.id == id)?;
        let plane = self.planes.remove(index);
        self.rebuild();
        log::debug!("sim: removed plane {id}");
        Some(plane)
    }

    pub fn set_plane_tracking(&mut self, id: SurfaceId, tracking: TrackingState) {
        if let Some(plane) = self.planes.iter_mut().find(|p| p.id == id) {
            plane.tracking = tracking;
            self.rebuild();
        }
    }

    pub fn set_camera_tracking(&mut self, tracking: TrackingState) {
        self.camera_tracking = tracking;
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PinholeCamera {
        &mut self.camera
    }

    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }

    pub fn plane(&self, id: SurfaceId) -> Option<&DetectedPlane> {
        self.planes.iter().find(|p| p.id == id)
    }

    /// Live (not yet detached) anchors.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchors_created(&self) -> usize {
        self.anchors_created
    }

    pub fn anchors_detached(&self) -> usize {
        self.anchors_detached
    }

    pub fn anchor_surface(&self, anchor: AnchorId) -> Option<SurfaceId> {
        self.anchors.get(&anchor).map(|a| a.surface)
    }

    /// Screen pixel of a world point for the current camera.
    pub fn project(&self, world: &Vec3) -> Option<(f32, f32)> {
        self.camera.project(world).map(|p| (p.x, p.y))
    }
}

impl ArSession for SimulatedSession {
    fn camera_tracking(&self) -> TrackingState {
        self.camera_tracking
    }

    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<SurfaceHit> {
        if !self.camera_tracking.is_tracking() {
            return Vec::new();
        }
        let Some(ray) = self.camera.screen_ray(screen_x, screen_y) else {
            return Vec::new();
        };

        self.query_world
            .cast_all(&ray, self.max_hit_distance)
            .into_iter()
            .filter_map(|hit| {
                let plane = self.plane(hit.surface)?;
                Some(SurfaceHit {
                    surface: plane.id,
                    // Hit poses carry the plane's orientation so their +Y is the normal.
                    pose: Pose::new(hit.point, plane.center.rotation),
                    trackable: Trackable::Plane {
                        plane_type: plane.plane_type,
                        pose_in_polygon: plane.contains_point(&hit.point),
                    },
                })
            })
            .collect()
    }

    fn surface_tracking(&self, surface: SurfaceId) -> TrackingState {
        self.plane(surface)
            .map(|p| p.tracking)
            .unwrap_or(TrackingState::Stopped)
    }

    fn surfaces(&self) -> Vec<SurfaceInfo> {
        self.planes
            .iter()
            .map(|p| SurfaceInfo {
                id: p.id,
                plane_type: p.plane_type,
                center: p.center,
                tracking: p.tracking,
            })
            .collect()
    }

    fn create_anchor(&mut self, surface: SurfaceId, pose: &Pose) -> Option<AnchorId> {
        if !self.surface_tracking(surface).is_tracking() {
            return None;
        }

        let id = self.next_anchor;
        self.next_anchor += 1;
        self.anchors.insert(
            id,
            SimAnchor {
                surface,
                pose: *pose,
            },
        );
        self.anchors_created += 1;
        log::debug!("sim: anchor {id} created on plane {surface}");
        Some(id)
    }

    fn detach_anchor(&mut self, anchor: AnchorId) {
        if self.anchors.remove(&anchor).is_some() {
            self.anchors_detached += 1;
            log::debug!("sim: anchor {anchor} detached");
        }
    }

    fn anchor_pose(&self, anchor: AnchorId) -> Option<Pose> {
        self.anchors.get(&anchor).map(|a| a.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::PlaneType;
    use std::f32::consts::FRAC_PI_3;

    fn session() -> SimulatedSession {
        let camera = PinholeCamera::looking_at(
            Vec3::new(0.0, 1.6, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            800.0,
            600.0,
            FRAC_PI_3,
        );
        SimulatedSession::with_planes(
            camera,
            [
                DetectedPlane::floor(1, Vec3::zeros(), 3.0, 3.0),
                DetectedPlane::wall(2, Vec3::new(0.0, 1.0, -3.0), Vec3::z(), 3.0, 1.0),
            ],
        )
    }

    #[test]
    fn hit_test_reports_floor_inside_polygon() {
        let s = session();
        let target = Vec3::new(0.5, 0.0, -1.0);
        let (x, y) = s.project(&target).unwrap();

        let hits = s.hit_test(x, y);
        let first = hits.first().unwrap();
        assert_eq!(first.surface, 1);
        assert!((first.pose.position - target).norm() < 1.0e-3);
        assert_eq!(
            first.trackable,
            Trackable::Plane {
                plane_type: PlaneType::HorizontalUpwardFacing,
                pose_in_polygon: true,
            }
        );
    }

    #[test]
    fn far_floor_hit_is_outside_polygon_behind_wall_hit() {
        let s = session();
        // Beyond the 3m floor half extent and behind the wall at z = -3.
        let (x, y) = s.project(&Vec3::new(0.0, 0.0, -4.5)).unwrap();
        let hits = s.hit_test(x, y);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].surface, 2);
        assert_eq!(hits[1].surface, 1);
        assert!(matches!(
            hits[1].trackable,
            Trackable::Plane {
                pose_in_polygon: false,
                ..
            }
        ));
    }

    #[test]
    fn no_hits_without_camera_tracking() {
        let mut s = session();
        s.set_camera_tracking(TrackingState::Paused);
        assert!(s.hit_test(400.0, 300.0).is_empty());
    }

    #[test]
    fn anchors_are_counted_and_need_a_tracked_surface() {
        let mut s = session();
        let a = s.create_anchor(1, &Pose::identity()).unwrap();
        assert_eq!(s.anchor_count(), 1);
        assert_eq!(s.anchor_surface(a), Some(1));

        s.detach_anchor(a);
        s.detach_anchor(a);
        assert_eq!(s.anchors_detached(), 1);
        assert!(s.anchor_pose(a).is_none());

        s.set_plane_tracking(1, TrackingState::Paused);
        assert!(s.create_anchor(1, &Pose::identity()).is_none());
        assert!(s.create_anchor(99, &Pose::identity()).is_none());
        assert_eq!(s.anchors_created(), 1);
    }

    #[test]
    fn replacing_and_removing_planes_updates_queries() {
        let mut s = session();
        let (x, y) = s.project(&Vec3::new(0.0, 0.0, -1.0)).unwrap();

        s.add_plane(DetectedPlane::floor(1, Vec3::new(0.0, 0.5, 0.0), 3.0, 3.0));
        assert_eq!(s.planes().len(), 2);
        let hit = s.hit_test(x, y)[0];
        assert!((hit.pose.position.y - 0.5).abs() < 1.0e-4);

        assert!(s.remove_plane(1).is_some());
        assert!(s.hit_test(x, y).iter().all(|h| h.surface != 1));
        assert_eq!(s.surface_tracking(1), TrackingState::Stopped);
        assert_eq!(s.surfaces().len(), 1);
    }
}
