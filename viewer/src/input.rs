use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Tap to place, press on the model and drag to move it.
    LeftClick,
    CycleOrientation,
    ToggleInstantPlacement,
    RotateLeft,
    RotateRight,
    ScaleUp,
    ScaleDown,
    Reset,
    /// Drop the plane holding the model, as when the AR runtime loses it.
    DropSurface,
    RestoreSurfaces,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let mut input_map = InputMap::<InputAction>::default();
    input_map.insert(InputAction::LeftClick, MouseButton::Left);
    input_map.insert(InputAction::CycleOrientation, KeyCode::KeyO);
    input_map.insert(InputAction::ToggleInstantPlacement, KeyCode::KeyI);
    input_map.insert(InputAction::RotateLeft, KeyCode::KeyQ);
    input_map.insert(InputAction::RotateRight, KeyCode::KeyE);
    input_map.insert(InputAction::ScaleUp, KeyCode::Equal);
    input_map.insert(InputAction::ScaleDown, KeyCode::Minus);
    input_map.insert(InputAction::Reset, KeyCode::KeyR);
    input_map.insert(InputAction::DropSurface, KeyCode::KeyX);
    input_map.insert(InputAction::RestoreSurfaces, KeyCode::KeyP);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}
