use bevy::prelude::*;
use placement::orientation::rotation_between;
use placement::sim::DetectedPlane;
use placement::types::{self as pt, up};
use placement::{GesturePhase, PlaneType, SurfaceId};

use crate::convert::pose_to_transform;
use crate::model::Placement;

/// Mesh drawn for one detected plane.
#[derive(Component)]
pub struct SurfaceMesh(pub SurfaceId);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
    app.add_systems(PostUpdate, update_surface_visibility);
}

/// The simulated room: floor, a table, the back wall and the underside of a shelf.
pub fn default_planes() -> Vec<DetectedPlane> {
    vec![
        DetectedPlane::floor(1, pt::Vec3::zeros(), 2.5, 2.5),
        // In front of the floor from the camera's point of view, so hits land here first.
        DetectedPlane::floor(2, pt::Vec3::new(1.0, 0.75, -1.0), 0.6, 0.4),
        DetectedPlane::wall(3, pt::Vec3::new(0.0, 1.25, -2.5), pt::Vec3::z(), 2.5, 1.25),
        DetectedPlane::rectangle(
            4,
            pt::Pose::new(
                pt::Vec3::new(-1.2, 1.8, -2.2),
                rotation_between(&up(), &-up()),
            ),
            0.6,
            0.25,
        ),
    ]
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    placement: Res<Placement>,
) {
    // Backdrop under the detected floor, always drawn.
    commands.spawn((
        Name::new("Ground"),
        Transform::from_xyz(0., -0.01, 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20., 20.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    for plane in placement.session.planes() {
        let half = half_extents(plane);
        commands.spawn((
            Name::new(format!("Surface{}", plane.id)),
            SurfaceMesh(plane.id),
            pose_to_transform(&plane.center, 1.0),
            Mesh3d(meshes.add(Plane3d::default().mesh().size(half.x * 2.0, half.y * 2.0).build())),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: surface_color(plane.plane_type),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
        ));
    }

    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 3.5, 2.0),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(1.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Half extents of the polygon's bounding rectangle in plane-local XZ.
fn half_extents(plane: &DetectedPlane) -> Vec2 {
    plane
        .polygon
        .iter()
        .fold(Vec2::ZERO, |acc, v| acc.max(Vec2::new(v.x.abs(), v.y.abs())))
}

fn surface_color(plane_type: PlaneType) -> Color {
    match plane_type {
        PlaneType::HorizontalUpwardFacing => Color::srgba(0.2, 0.8, 0.4, 0.35),
        PlaneType::HorizontalDownwardFacing => Color::srgba(0.9, 0.5, 0.2, 0.35),
        PlaneType::Vertical => Color::srgba(0.3, 0.5, 0.95, 0.35),
    }
}

fn update_surface_visibility(
    placement: Res<Placement>,
    mut surfaces: Query<(&SurfaceMesh, &mut Visibility)>,
) {
    // Planes are shown until the model is placed, and again while it is dragged.
    let show = placement.controller.surfaces_visible()
        || placement.controller.phase() == GesturePhase::Gesturing;

    for (surface, mut visibility) in &mut surfaces {
        let tracked = placement
            .session
            .plane(surface.0)
            .is_some_and(|p| p.tracking.is_tracking());
        let target = if show && tracked {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(target);
    }
}
