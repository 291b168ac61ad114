pub mod controller;
pub mod editable;
pub mod error;
pub mod events;
pub mod flags;
pub mod interpolate;
pub mod orientation;
pub mod plane;
pub mod session;
pub mod settings;
pub mod sim;
pub mod types;

pub use controller::{AnchorBinding, GesturePhase, PlacementController};
pub use editable::{EditableTransform, EditableTransforms};
pub use error::Rejection;
pub use events::PlacementEvent;
pub use plane::{AllowedPlaneSet, ParseOrientationError, PlaneOrientation, PlaneType};
pub use session::{
    AnchorId, ArSession, SurfaceHit, SurfaceId, SurfaceInfo, Trackable, TrackingState,
};
pub use settings::{
    LERP_SPEED, MAX_SCALE, MIN_SCALE, POSITION_LENGTH_THRESHOLD, PlacementSettings,
    ROTATION_DOT_THRESHOLD,
};
pub use types::{Pose, Quat, Vec3};
