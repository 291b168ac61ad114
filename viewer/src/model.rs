//! The placed model and the host side of the placement controller.
//!
//! The controller and the simulated AR session live together in one resource. Every
//! frame the session camera is synced from the bevy camera, pointer and key input is
//! turned into controller calls, the controller is advanced and its world pose is
//! copied onto the model entity.

use std::f32::consts::FRAC_PI_4;

use bevy::{prelude::*, window::PrimaryWindow};
use leafwing_input_manager::prelude::ActionState;
use placement::sim::{PinholeCamera, SimulatedSession};
use placement::types::Pose;
use placement::{
    GesturePhase, PlacementController, PlacementEvent, PlacementSettings, PlaneOrientation,
};

use crate::convert::{pose_from_transform, pose_to_transform};
use crate::input::InputAction;
use crate::world::default_planes;

/// The model's origin is at its center, so it rests half its height above a plane.
const MODEL_HALF_HEIGHT: f32 = 0.1;
/// A press within this many pixels of the model selects it.
const SELECT_RADIUS_PX: f32 = 90.0;
const ROTATE_STEP_DEG: f32 = 15.0;
const SCALE_STEP: f32 = 1.1;

#[derive(Resource)]
pub struct Placement {
    pub controller: PlacementController,
    pub session: SimulatedSession,
    pub orientation: PlaneOrientation,
}

#[derive(Component)]
pub struct PlacedModel;

pub(super) fn plugin(app: &mut App) {
    let settings = PlacementSettings {
        model_centering: MODEL_HALF_HEIGHT,
        ..default()
    };
    // Replaced by the real camera on the first frame.
    let camera = PinholeCamera::new(Pose::identity(), 1280.0, 720.0, FRAC_PI_4);
    app.insert_resource(Placement {
        controller: PlacementController::new(settings),
        session: SimulatedSession::with_planes(camera, default_planes()),
        orientation: PlaneOrientation::default(),
    });

    app.add_systems(Startup, spawn_model);
    app.add_systems(
        Update,
        (
            sync_session_camera,
            handle_pointer,
            handle_commands,
            advance,
            apply_model_transform,
            log_events,
        )
            .chain(),
    );
}

fn spawn_model(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands
        .spawn((
            Name::new("PlacedModel"),
            PlacedModel,
            Transform::default(),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Body"),
                Mesh3d(meshes.add(Cuboid::new(0.3, MODEL_HALF_HEIGHT * 2.0, 0.4))),
                MeshMaterial3d(materials.add(Color::srgb_u8(124, 144, 255))),
                Transform::default(),
            ));
            // Marks the model's forward (-Z).
            parent.spawn((
                Name::new("Nose"),
                Mesh3d(meshes.add(Mesh::from(Sphere { radius: 0.05 }))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.9, 0.2),
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.0, -0.22),
            ));
        });
}

fn sync_session_camera(
    camera: Single<(&Transform, &Projection), With<Camera3d>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut placement: ResMut<Placement>,
) {
    let (transform, projection) = *camera;
    let Projection::Perspective(perspective) = projection else {
        return;
    };

    let sim_camera = placement.session.camera_mut();
    sim_camera.pose = pose_from_transform(transform);
    sim_camera.viewport = nalgebra::Vector2::new(window.width(), window.height());
    sim_camera.fov_y = perspective.fov;
}

fn handle_pointer(
    actions: Res<ActionState<InputAction>>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut placement: ResMut<Placement>,
) {
    let Placement {
        controller,
        session,
        ..
    } = &mut *placement;

    // Release first: the cursor may already have left the window.
    if actions.just_released(&InputAction::LeftClick) {
        if controller.phase() == GesturePhase::Gesturing {
            controller.end_gesture(session);
        }
        return;
    }

    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if actions.just_pressed(&InputAction::LeftClick) {
        if !controller.is_placed() {
            controller.place_at(session, cursor.x, cursor.y);
            return;
        }
        if is_near_model(controller, session, cursor) {
            controller.select();
        } else {
            controller.deselect();
        }
        controller.begin_gesture(session);
    } else if actions.pressed(&InputAction::LeftClick)
        && controller.phase() == GesturePhase::Gesturing
    {
        controller.continue_gesture(&*session, cursor.x, cursor.y);
    }
}

fn is_near_model(
    controller: &PlacementController,
    session: &SimulatedSession,
    cursor: Vec2,
) -> bool {
    controller
        .world_pose(session)
        .and_then(|pose| session.project(&pose.position))
        .is_some_and(|(x, y)| Vec2::new(x, y).distance(cursor) <= SELECT_RADIUS_PX)
}

fn handle_commands(actions: Res<ActionState<InputAction>>, mut placement: ResMut<Placement>) {
    let Placement {
        controller,
        session,
        orientation,
    } = &mut *placement;

    if actions.just_pressed(&InputAction::CycleOrientation) {
        *orientation = orientation.next();
        controller.set_allowed_plane_types((*orientation).into());
        info!("allowed planes: {orientation}");
    }
    if actions.just_pressed(&InputAction::ToggleInstantPlacement) {
        let enabled = !controller.settings().instant_placement;
        controller.set_instant_placement(enabled);
        info!("instant placement: {enabled}");
    }

    if actions.just_pressed(&InputAction::RotateLeft) {
        controller.rotate_model(0.0, ROTATE_STEP_DEG, 0.0);
    }
    if actions.just_pressed(&InputAction::RotateRight) {
        controller.rotate_model(0.0, -ROTATE_STEP_DEG, 0.0);
    }
    if actions.just_pressed(&InputAction::ScaleUp) {
        let scale = controller.scale() * SCALE_STEP;
        controller.set_scale(scale);
    }
    if actions.just_pressed(&InputAction::ScaleDown) {
        let scale = controller.scale() / SCALE_STEP;
        controller.set_scale(scale);
    }

    if actions.just_pressed(&InputAction::Reset) {
        controller.reset(session);
    }
    if actions.just_pressed(&InputAction::DropSurface) {
        if let Some(binding) = controller.binding() {
            session.remove_plane(binding.surface);
            controller.on_surface_removed(session, binding.surface);
        }
    }
    if actions.just_pressed(&InputAction::RestoreSurfaces) {
        for plane in default_planes() {
            if session.plane(plane.id).is_none() {
                session.add_plane(plane);
            }
        }
    }
}

fn advance(time: Res<Time>, mut placement: ResMut<Placement>) {
    let Placement {
        controller,
        session,
        ..
    } = &mut *placement;

    if controller.settings().instant_placement && !controller.is_placed() {
        controller.instant_placement(session);
    }
    controller.advance(time.delta_secs());
}

fn apply_model_transform(
    placement: Res<Placement>,
    model: Single<(&mut Transform, &mut Visibility), With<PlacedModel>>,
) {
    let (mut transform, mut visibility) = model.into_inner();
    match placement.controller.world_pose(&placement.session) {
        Some(pose) => {
            *transform = pose_to_transform(&pose, placement.controller.scale());
            visibility.set_if_neq(Visibility::Visible);
        }
        None => {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

fn log_events(mut placement: ResMut<Placement>) {
    for event in placement.controller.drain_events() {
        match event {
            PlacementEvent::ModelPlaced { anchor } => info!("model placed (anchor {anchor})"),
            PlacementEvent::ModelMoved { anchor } => info!("model moved (anchor {anchor})"),
            PlacementEvent::ModelRemoved => info!("model removed"),
        }
    }
}
