mod findings_panel;
mod status_bar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Side panel first so the top bar fits next to it
        app.add_systems(
            EguiPrimaryContextPass,
            (findings_panel::findings_panel_ui, status_bar::status_bar_ui).chain(),
        );
    }
}
