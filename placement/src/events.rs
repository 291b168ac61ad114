use crate::session::AnchorId;

/// Notifications for the host, queued by the controller and drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementEvent {
    /// The model appeared in the scene, bound to `anchor`.
    ModelPlaced { anchor: AnchorId },
    /// A drag committed the model to a new anchor.
    ModelMoved { anchor: AnchorId },
    /// The model left the scene (reset, or its surface disappeared).
    ModelRemoved,
}
