/*!
Smoothed anchor placement.

[`PlacementController`] owns the displayed pose of one placeable model and drives it
toward a desired pose set by hit tests, committing a new host anchor only when a drag
ends.

Frames
- `local` is expressed in the parent frame: the bound anchor's frame, or world while
  the model is anchor-free (during a drag).
- Desired position/rotation and the captured forward direction live in the same frame
  as `local` and are re-expressed whenever the parent changes, so the world pose never
  jumps on a reparent.

Lifecycle
- `Idle -> Gesturing` on [`PlacementController::begin_gesture`] (anchor detached).
- `continue_gesture` updates the desired pose 0..n times.
- [`PlacementController::end_gesture`] commits a new anchor and returns to `Idle`.
- [`PlacementController::advance`] runs every frame in either phase.
*/

use crate::editable::{EditableTransform, EditableTransforms};
use crate::error::{Rejection, Result};
use crate::events::PlacementEvent;
use crate::interpolate::{lerp_factor, step_position, step_rotation};
use crate::orientation::surface_aligned_rotation;
use crate::plane::AllowedPlaneSet;
use crate::session::{AnchorId, ArSession, SurfaceHit, SurfaceId, Trackable};
use crate::settings::PlacementSettings;
use crate::types::{Pose, Quat, Vec3, forward, up};

/// The anchor the model is currently pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorBinding {
    pub anchor: AnchorId,
    pub surface: SurfaceId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Gesturing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacementController {
    settings: PlacementSettings,
    allowed_planes: AllowedPlaneSet,
    editable: EditableTransforms,

    phase: GesturePhase,
    selected: bool,
    placed: bool,

    /// Displayed pose in the parent frame.
    local: Pose,
    scale: f32,
    binding: Option<AnchorBinding>,
    /// World pose of the parent frame as of the last reparent. Identity when anchor-free.
    parent: Pose,

    desired_position: Option<Vec3>,
    desired_rotation: Option<Quat>,
    /// Unit forward captured at gesture start, in the parent frame.
    initial_forward: Vec3,
    /// Last accepted hit of the current gesture, in world space.
    candidate: Option<SurfaceHit>,

    events: Vec<PlacementEvent>,
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new(PlacementSettings::default())
    }
}

impl PlacementController {
    pub fn new(settings: PlacementSettings) -> Self {
        Self {
            settings,
            allowed_planes: AllowedPlaneSet::default(),
            editable: EditableTransforms::default(),
            phase: GesturePhase::Idle,
            selected: false,
            placed: false,
            local: Pose::identity(),
            scale: 1.0,
            binding: None,
            parent: Pose::identity(),
            desired_position: None,
            desired_rotation: None,
            initial_forward: forward(),
            candidate: None,
            events: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    pub fn set_allowed_plane_types(&mut self, allowed: AllowedPlaneSet) {
        self.allowed_planes = allowed;
    }

    pub fn allowed_plane_types(&self) -> AllowedPlaneSet {
        self.allowed_planes
    }

    pub fn set_editable(&mut self, editable: EditableTransforms) {
        self.editable = editable;
    }

    pub fn editable(&self) -> EditableTransforms {
        self.editable
    }

    /// Vertical offset supplied by the model loader. Applies from the next accepted hit.
    pub fn set_model_centering(&mut self, offset: f32) {
        self.settings.model_centering = offset;
    }

    pub fn set_instant_placement(&mut self, enabled: bool) {
        self.settings.instant_placement = enabled;
    }

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// True while a drag is active or the displayed pose is still converging.
    pub fn is_transforming(&self) -> bool {
        self.phase == GesturePhase::Gesturing
            || self.desired_position.is_some()
            || self.desired_rotation.is_some()
    }

    /// Plane visualization is only useful until the model has been placed.
    pub fn surfaces_visible(&self) -> bool {
        !self.placed
    }

    pub fn local_pose(&self) -> Pose {
        self.local
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn binding(&self) -> Option<AnchorBinding> {
        self.binding
    }

    pub fn desired_position(&self) -> Option<Vec3> {
        self.desired_position
    }

    pub fn desired_rotation(&self) -> Option<Quat> {
        self.desired_rotation
    }

    pub fn initial_forward(&self) -> Vec3 {
        self.initial_forward
    }

    pub fn candidate(&self) -> Option<SurfaceHit> {
        self.candidate
    }

    /// World pose of the parent frame, following the anchor if the host moved it.
    pub fn parent_pose<S: ArSession + ?Sized>(&self, session: &S) -> Pose {
        self.binding
            .and_then(|b| session.anchor_pose(b.anchor))
            .unwrap_or(self.parent)
    }

    /// World pose of the displayed model, `None` until placed. Scale is separate.
    pub fn world_pose<S: ArSession + ?Sized>(&self, session: &S) -> Option<Pose> {
        if !self.placed {
            return None;
        }
        Some(self.parent_pose(session).compose(&self.local))
    }

    /// Pending world-space target, if any half of the desired pose is still set.
    pub fn desired_world_pose<S: ArSession + ?Sized>(&self, session: &S) -> Option<Pose> {
        if self.desired_position.is_none() && self.desired_rotation.is_none() {
            return None;
        }
        let target = Pose::new(
            self.desired_position.unwrap_or(self.local.position),
            self.desired_rotation.unwrap_or(self.local.rotation),
        );
        Some(self.parent_pose(session).compose(&target))
    }

    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    // ---------------------------------------------------------------------
    // Per-frame interpolation
    // ---------------------------------------------------------------------

    /// Step the displayed pose toward the desired pose. Each half converges and clears
    /// on its own.
    pub fn advance(&mut self, dt_seconds: f32) {
        let factor = lerp_factor(dt_seconds, self.settings.lerp_speed);

        if let Some(desired) = self.desired_position {
            let step = step_position(
                self.local.position,
                desired,
                factor,
                self.settings.position_threshold,
            );
            self.local.position = step.value;
            if step.converged {
                self.desired_position = None;
            }
        }

        if let Some(desired) = self.desired_rotation {
            let step = step_rotation(
                self.local.rotation,
                desired,
                factor,
                self.settings.rotation_dot_threshold,
            );
            self.local.rotation = step.value;
            if step.converged {
                self.desired_rotation = None;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Drag gesture
    // ---------------------------------------------------------------------

    /// Start dragging: detach the anchor and capture the model's world forward.
    ///
    /// Rejected while a drag is active or the pose is still converging.
    pub fn try_begin_gesture<S: ArSession + ?Sized>(&mut self, session: &mut S) -> Result<()> {
        if !self.selected {
            return Err(Rejection::NotSelected);
        }
        if !self.placed {
            return Err(Rejection::NotPlaced);
        }
        if !self.editable.allows(EditableTransform::Translate) {
            return Err(Rejection::NotEditable);
        }
        if self.is_transforming() {
            return Err(Rejection::AlreadyTransforming);
        }

        let parent = self.parent_pose(&*session);
        if let Some(binding) = self.binding.take() {
            session.detach_anchor(binding.anchor);
        }
        self.reparent(parent, Pose::identity());

        self.initial_forward = self.local.forward();
        self.candidate = None;
        self.phase = GesturePhase::Gesturing;
        log::debug!("gesture started, forward {:?}", self.initial_forward);
        Ok(())
    }

    pub fn begin_gesture<S: ArSession + ?Sized>(&mut self, session: &mut S) -> bool {
        self.try_begin_gesture(session)
            .inspect_err(|e| log::debug!("begin_gesture ignored: {e}"))
            .is_ok()
    }

    /// Hit test under the finger and retarget the desired pose at the first acceptable
    /// surface.
    pub fn try_continue_gesture<S: ArSession + ?Sized>(
        &mut self,
        session: &S,
        screen_x: f32,
        screen_y: f32,
    ) -> Result<SurfaceHit> {
        if self.phase != GesturePhase::Gesturing {
            return Err(Rejection::NoActiveGesture);
        }
        if !session.camera_tracking().is_tracking() {
            return Err(Rejection::NotTracking);
        }
        let hit = self
            .first_acceptable_hit(session, screen_x, screen_y)
            .ok_or(Rejection::NoAcceptableSurface)?;

        let parent = self.parent_pose(session);
        let world_position = hit.pose.position + up() * self.settings.model_centering;
        let hit_rotation = parent.rotation.inverse() * hit.pose.rotation;

        self.desired_position = Some(parent.inverse_transform_point(&world_position));
        self.desired_rotation = Some(surface_aligned_rotation(
            &hit_rotation,
            &self.initial_forward,
        ));
        self.candidate = Some(hit);
        log::debug!(
            "accepted hit on surface {} at {:?}",
            hit.surface,
            hit.pose.position
        );
        Ok(hit)
    }

    pub fn continue_gesture<S: ArSession + ?Sized>(
        &mut self,
        session: &S,
        screen_x: f32,
        screen_y: f32,
    ) -> bool {
        self.try_continue_gesture(session, screen_x, screen_y)
            .inspect_err(|e| log::debug!("continue_gesture ignored: {e}"))
            .is_ok()
    }

    /// Commit the last accepted hit as the model's new anchor.
    ///
    /// Without an accepted hit the gesture still ends and the model stays anchor-free at
    /// its current pose. If the hit's surface stopped tracking or the host refuses an
    /// anchor, the gesture stays active so a later call can commit.
    pub fn try_end_gesture<S: ArSession + ?Sized>(&mut self, session: &mut S) -> Result<AnchorId> {
        if self.phase != GesturePhase::Gesturing {
            return Err(Rejection::NoActiveGesture);
        }
        let Some(hit) = self.candidate else {
            self.phase = GesturePhase::Idle;
            return Err(Rejection::NoCandidate);
        };
        if !session.surface_tracking(hit.surface).is_tracking() {
            return Err(Rejection::SurfaceLost(hit.surface));
        }

        let old_parent = self.parent_pose(&*session);
        if let Some(binding) = self.binding.take() {
            session.detach_anchor(binding.anchor);
        }
        let Some(anchor) = session.create_anchor(hit.surface, &hit.pose) else {
            log::warn!("host refused an anchor on surface {}", hit.surface);
            return Err(Rejection::AnchorUnavailable(hit.surface));
        };
        self.phase = GesturePhase::Idle;
        self.candidate = None;

        // Rest facing the way the drag left the model, not the way it started.
        let dragged = self.desired_rotation.unwrap_or(self.local.rotation);
        self.initial_forward = dragged * forward();

        let new_parent = session.anchor_pose(anchor).unwrap_or(hit.pose);
        self.reparent(old_parent, new_parent);
        self.binding = Some(AnchorBinding {
            anchor,
            surface: hit.surface,
        });

        self.desired_position = Some(self.resting_offset());
        self.desired_rotation = Some(surface_aligned_rotation(
            &Quat::identity(),
            &self.initial_forward,
        ));

        self.events.push(PlacementEvent::ModelMoved { anchor });
        log::info!("model committed to anchor {anchor} on surface {}", hit.surface);
        Ok(anchor)
    }

    pub fn end_gesture<S: ArSession + ?Sized>(&mut self, session: &mut S) -> bool {
        self.try_end_gesture(session)
            .inspect_err(|e| log::debug!("end_gesture ignored: {e}"))
            .is_ok()
    }

    // ---------------------------------------------------------------------
    // Placement
    // ---------------------------------------------------------------------

    /// Tap-to-place: anchor the model on the first acceptable surface under the tap.
    pub fn try_place_at<S: ArSession + ?Sized>(
        &mut self,
        session: &mut S,
        screen_x: f32,
        screen_y: f32,
    ) -> Result<AnchorId> {
        if self.placed {
            return Err(Rejection::AlreadyPlaced);
        }
        if !session.camera_tracking().is_tracking() {
            return Err(Rejection::NotTracking);
        }
        let hit = self
            .first_acceptable_hit(&*session, screen_x, screen_y)
            .ok_or(Rejection::NoAcceptableSurface)?;

        self.place_on(session, hit.surface, &hit.pose)
    }

    pub fn place_at<S: ArSession + ?Sized>(
        &mut self,
        session: &mut S,
        screen_x: f32,
        screen_y: f32,
    ) -> bool {
        self.try_place_at(session, screen_x, screen_y)
            .inspect_err(|e| log::debug!("place_at ignored: {e}"))
            .is_ok()
    }

    /// Place the model at the center of the first tracked, allowed surface.
    pub fn try_instant_placement<S: ArSession + ?Sized>(
        &mut self,
        session: &mut S,
    ) -> Result<AnchorId> {
        if !self.settings.instant_placement {
            return Err(Rejection::InstantPlacementDisabled);
        }
        if self.placed {
            return Err(Rejection::AlreadyPlaced);
        }
        if !session.camera_tracking().is_tracking() {
            return Err(Rejection::NotTracking);
        }
        let surface = session
            .surfaces()
            .into_iter()
            .find(|s| s.tracking.is_tracking() && self.allowed_planes.allows(s.plane_type))
            .ok_or(Rejection::NoAcceptableSurface)?;

        self.place_on(session, surface.id, &surface.center)
    }

    pub fn instant_placement<S: ArSession + ?Sized>(&mut self, session: &mut S) -> bool {
        self.try_instant_placement(session)
            .inspect_err(|e| log::debug!("instant placement skipped: {e}"))
            .is_ok()
    }

    fn place_on<S: ArSession + ?Sized>(
        &mut self,
        session: &mut S,
        surface: SurfaceId,
        pose: &Pose,
    ) -> Result<AnchorId> {
        let Some(anchor) = session.create_anchor(surface, pose) else {
            log::warn!("host refused an anchor on surface {surface}");
            return Err(Rejection::AnchorUnavailable(surface));
        };

        self.parent = session.anchor_pose(anchor).unwrap_or(*pose);
        self.binding = Some(AnchorBinding { anchor, surface });
        self.local = Pose::from_position(self.resting_offset());
        self.desired_position = None;
        self.desired_rotation = None;
        self.initial_forward = forward();
        self.placed = true;
        self.selected = true;

        self.events.push(PlacementEvent::ModelPlaced { anchor });
        log::info!("model placed on surface {surface} with anchor {anchor}");
        Ok(anchor)
    }

    // ---------------------------------------------------------------------
    // Direct edits
    // ---------------------------------------------------------------------

    /// Rotate by Euler angles in degrees: pitch about X, yaw about Y, roll about Z.
    /// Applied on top of any pending rotation and smoothed by [`Self::advance`].
    pub fn try_rotate_model(&mut self, pitch: f32, yaw: f32, roll: f32) -> Result<()> {
        if !self.placed {
            return Err(Rejection::NotPlaced);
        }
        if !self.editable.allows(EditableTransform::Rotate) {
            return Err(Rejection::NotEditable);
        }

        let delta = Quat::from_euler_angles(
            pitch.to_radians(),
            yaw.to_radians(),
            roll.to_radians(),
        );
        let base = self.desired_rotation.unwrap_or(self.local.rotation);
        self.desired_rotation = Some(base * delta);
        Ok(())
    }

    pub fn rotate_model(&mut self, pitch: f32, yaw: f32, roll: f32) -> bool {
        self.try_rotate_model(pitch, yaw, roll)
            .inspect_err(|e| log::debug!("rotate_model ignored: {e}"))
            .is_ok()
    }

    /// Set the uniform scale, clamped into the configured range. Returns the applied scale.
    pub fn try_set_scale(&mut self, scale: f32) -> Result<f32> {
        if !self.editable.allows(EditableTransform::Scale) {
            return Err(Rejection::NotEditable);
        }
        if !scale.is_finite() {
            return Err(Rejection::InvalidScale);
        }

        self.scale = self.settings.clamp_scale(scale);
        Ok(self.scale)
    }

    pub fn set_scale(&mut self, scale: f32) -> bool {
        self.try_set_scale(scale)
            .inspect_err(|e| log::debug!("set_scale ignored: {e}"))
            .is_ok()
    }

    // ---------------------------------------------------------------------
    // Teardown
    // ---------------------------------------------------------------------

    /// Remove the model from the scene. Configuration is kept.
    pub fn reset<S: ArSession + ?Sized>(&mut self, session: &mut S) {
        if let Some(binding) = self.binding.take() {
            session.detach_anchor(binding.anchor);
        }
        let was_placed = self.placed;

        self.phase = GesturePhase::Idle;
        self.selected = false;
        self.placed = false;
        self.local = Pose::identity();
        self.scale = 1.0;
        self.parent = Pose::identity();
        self.desired_position = None;
        self.desired_rotation = None;
        self.initial_forward = forward();
        self.candidate = None;

        if was_placed {
            self.events.push(PlacementEvent::ModelRemoved);
            log::info!("model removed");
        }
    }

    /// The host lost a surface. Resets the model if it was anchored there and drops a
    /// pending commit onto it. Returns whether the model was removed.
    pub fn on_surface_removed<S: ArSession + ?Sized>(
        &mut self,
        session: &mut S,
        surface: SurfaceId,
    ) -> bool {
        if self.candidate.is_some_and(|c| c.surface == surface) {
            self.candidate = None;
        }
        if self.binding.is_some_and(|b| b.surface == surface) {
            log::info!("surface {surface} holding the model was removed");
            self.reset(session);
            return true;
        }
        false
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    /// First hit, in return order, on a plane of an allowed type and inside its polygon.
    fn first_acceptable_hit<S: ArSession + ?Sized>(
        &self,
        session: &S,
        screen_x: f32,
        screen_y: f32,
    ) -> Option<SurfaceHit> {
        session
            .hit_test(screen_x, screen_y)
            .into_iter()
            .find(|hit| match hit.trackable {
                Trackable::Plane {
                    plane_type,
                    pose_in_polygon,
                } => pose_in_polygon && self.allowed_planes.allows(plane_type),
                Trackable::Point => false,
            })
    }

    fn resting_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.settings.model_centering, 0.0)
    }

    /// Move every parent-relative quantity from `old_parent` to `new_parent` (both world
    /// poses) without changing anything in world space.
    fn reparent(&mut self, old_parent: Pose, new_parent: Pose) {
        let to_new = new_parent.inverse().compose(&old_parent);

        self.local = to_new.compose(&self.local);
        self.desired_position = self.desired_position.map(|p| to_new.transform_point(&p));
        self.desired_rotation = self.desired_rotation.map(|r| to_new.rotation * r);
        self.initial_forward = to_new.rotation * self.initial_forward;
        self.parent = new_parent;
    }
}
