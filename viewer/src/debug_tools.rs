//! Debug/performance tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (recommended: `#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use placement::ArSession;

use crate::convert::{pose_to_transform, vec3_to_bevy};
use crate::model::Placement;

/// Add debug/perf tooling (intended for `dev_native` builds only).
pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(PostUpdate, draw_placement_gizmos);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

/// Anchor axes, model facing, the pending target and the last accepted hit.
fn draw_placement_gizmos(mut gizmos: Gizmos, placement: Res<Placement>) {
    let Placement {
        controller,
        session,
        ..
    } = &*placement;

    if let Some(anchor) = controller
        .binding()
        .and_then(|binding| session.anchor_pose(binding.anchor))
    {
        gizmos.axes(pose_to_transform(&anchor, 1.0), 0.25);
    }

    if let Some(pose) = controller.world_pose(session) {
        let start = vec3_to_bevy(&pose.position);
        let end = start + vec3_to_bevy(&pose.forward()) * 0.4;
        gizmos.arrow(start, end, Color::srgb(1.0, 1.0, 0.2));

        if let Some(target) = controller.desired_world_pose(session) {
            gizmos.line(start, vec3_to_bevy(&target.position), Color::srgb(1.0, 0.3, 0.3));
        }
    }

    if let Some(hit) = controller.candidate() {
        gizmos.sphere(
            Isometry3d::from_translation(vec3_to_bevy(&hit.pose.position)),
            0.03,
            Color::srgb(0.3, 1.0, 0.3),
        );
    }
}
