use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
}

/// Roughly a phone held at eye height, looking down at the room.
const CAMERA_EYE: Vec3 = Vec3::new(0.0, 1.6, 2.5);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.4, -1.0);

fn add_camera(mut commands: Commands) {
    commands.spawn((
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_translation(CAMERA_EYE).looking_at(CAMERA_TARGET, Vec3::Y),
    ));
}
