//! Region overlay drawing - finding outlines, hover emphasis, edit handles.

use bevy::camera::visibility::RenderLayers;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::Corner;
use crate::constants::HANDLE_DRAW_SIZE;
use crate::findings::{HoveredFinding, RegionBox, ReviewDocument};
use crate::theme::{severity_color, EDITING_COLOR, HANDLE_COLOR, HOVER_COLOR};
use crate::viewer::{display_to_world, DisplayMetrics};

use super::geometry;
use super::session::EditSession;

/// Custom gizmo group for the region overlay (overlay-only rendering)
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct RegionGizmoGroup;

/// Configure the region gizmo group to only render to the overlay camera
pub fn configure_region_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<RegionGizmoGroup>();
    // Only render to layer 1 (overlay-only)
    config.render_layers = RenderLayers::layer(1);
}

/// World-space center and size for a display-space rect.
fn world_rect(rect: &RegionBox, window_size: Vec2) -> (Vec2, Vec2) {
    let center_display = Vec2::new(
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    );
    (
        display_to_world(center_display, window_size),
        Vec2::new(rect.width, rect.height),
    )
}

pub fn draw_region_overlays(
    mut gizmos: Gizmos<RegionGizmoGroup>,
    windows: Query<&Window, With<PrimaryWindow>>,
    document: Res<ReviewDocument>,
    metrics: Res<DisplayMetrics>,
    session: Res<EditSession>,
    hovered: Res<HoveredFinding>,
    mut warned_unrenderable: Local<bool>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());

    if !metrics.is_renderable() {
        if document.is_loaded() && !*warned_unrenderable {
            warn!("Skipping region overlay: image layout not available yet");
            *warned_unrenderable = true;
        }
        return;
    }
    *warned_unrenderable = false;

    let editing_id = session.editing_id();

    for finding in &document.findings {
        // The edited finding is drawn from the working copy below
        if Some(finding.id) == editing_id {
            continue;
        }
        let Some(area) = finding.area else {
            continue;
        };

        let rect = geometry::natural_to_display(&area, &metrics);
        let (center, size) = world_rect(&rect, window_size);
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            size,
            severity_color(finding.severity),
        );

        if hovered.0 == Some(finding.id) {
            gizmos.rect_2d(
                Isometry2d::from_translation(center),
                size + Vec2::splat(2.0),
                HOVER_COLOR,
            );
        }
    }

    // The working copy tracks the drag live, ahead of any commit
    if editing_id.is_some()
        && let Some(working) = session.working_area()
    {
        let rect = geometry::natural_to_display(&working, &metrics);
        let (center, size) = world_rect(&rect, window_size);
        gizmos.rect_2d(Isometry2d::from_translation(center), size, EDITING_COLOR);

        for corner in Corner::all() {
            let point = geometry::corner_point(&rect, corner);
            gizmos.rect_2d(
                Isometry2d::from_translation(display_to_world(point, window_size)),
                Vec2::splat(HANDLE_DRAW_SIZE * 2.0),
                HANDLE_COLOR,
            );
        }
    }
}
