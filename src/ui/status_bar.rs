//! Top status bar: open/recent documents and the save status badge.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::editor::{SaveState, SaveStatus};
use crate::findings::{LoadReviewRequest, ReviewDocument, ReviewLoadError};
use crate::theme::{STATUS_DIRTY, STATUS_ERROR, STATUS_SAVED, STATUS_SAVING};

pub fn status_bar_ui(
    mut contexts: EguiContexts,
    document: Res<ReviewDocument>,
    config: Res<AppConfig>,
    status: Res<SaveStatus>,
    load_error: Res<ReviewLoadError>,
    mut load_events: MessageWriter<LoadReviewRequest>,
) -> Result {
    egui::TopBottomPanel::top("status_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Open Review…").clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("Review documents", &["json"])
                    .pick_file()
            {
                load_events.write(LoadReviewRequest { path });
            }

            ui.menu_button("Recent", |ui| {
                if config.data.recent_reviews.is_empty() {
                    ui.label("No recent reviews");
                }
                for path in &config.data.recent_reviews {
                    let label = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    if ui.button(label).on_hover_text(path.display().to_string()).clicked() {
                        load_events.write(LoadReviewRequest { path: path.clone() });
                        ui.close();
                    }
                }
            });

            ui.separator();

            if let Some(path) = &document.path {
                ui.label(path.display().to_string());
            } else {
                ui.weak("No review loaded");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(message) = &load_error.message {
                    ui.colored_label(STATUS_ERROR, message);
                    return;
                }

                match status.state {
                    SaveState::Saving => {
                        ui.colored_label(STATUS_SAVING, "Saving…");
                    }
                    SaveState::Saved => {
                        ui.colored_label(STATUS_SAVED, "Saved");
                    }
                    SaveState::Error => {
                        let message = status
                            .last_error()
                            .map(|e| format!("Save failed: {}", e))
                            .unwrap_or_else(|| "Save failed".to_string());
                        ui.colored_label(STATUS_ERROR, message);
                    }
                    SaveState::Idle => {
                        if status.dirty {
                            ui.colored_label(STATUS_DIRTY, "Unsaved changes");
                        }
                    }
                }
            });
        });
    });
    Ok(())
}
