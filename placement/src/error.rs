//! Reasons a placement operation did nothing.
//!
//! None of these are failures of the system: they are the normal outcomes of an
//! interactive AR session (nothing selected, tracking lost, no suitable plane under
//! the finger). The boolean controller API folds them into `false`.

use thiserror::Error;

use crate::session::SurfaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no object is selected")]
    NotSelected,

    #[error("the model has not been placed yet")]
    NotPlaced,

    #[error("the model is already placed")]
    AlreadyPlaced,

    #[error("instant placement is disabled")]
    InstantPlacementDisabled,

    #[error("this transform is not editable")]
    NotEditable,

    #[error("scale must be a finite number")]
    InvalidScale,

    #[error("a gesture is already in progress")]
    AlreadyTransforming,

    #[error("no gesture is in progress")]
    NoActiveGesture,

    #[error("the camera is not tracking")]
    NotTracking,

    #[error("no hit landed on an allowed plane inside its bounds")]
    NoAcceptableSurface,

    #[error("no accepted hit to commit")]
    NoCandidate,

    #[error("surface {0} is no longer tracking")]
    SurfaceLost(SurfaceId),

    #[error("the session refused to create an anchor on surface {0}")]
    AnchorUnavailable(SurfaceId),
}

pub type Result<T> = std::result::Result<T, Rejection>;
