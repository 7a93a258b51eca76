//! Right-hand panel listing the document's findings.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::{EditSession, SessionState};
use crate::findings::{ActiveFinding, HoveredFinding, ReviewDocument};
use crate::theme::severity_badge;

pub fn findings_panel_ui(
    mut contexts: EguiContexts,
    document: Res<ReviewDocument>,
    mut active: ResMut<ActiveFinding>,
    hovered: Res<HoveredFinding>,
    session: Res<EditSession>,
) -> Result {
    egui::SidePanel::right("findings_panel")
        .default_width(320.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Findings");

            if !document.is_loaded() {
                ui.label("No review loaded");
                return;
            }

            if !document.editable {
                ui.colored_label(egui::Color32::GRAY, "Read-only review");
            }

            match session.state() {
                SessionState::Editing { .. } | SessionState::Dragging { .. } => {
                    ui.colored_label(
                        egui::Color32::LIGHT_BLUE,
                        "Editing region — Enter to apply, Esc to cancel",
                    );
                }
                SessionState::Viewing => {
                    if document.editable {
                        ui.label("Double-click a region to edit it");
                    }
                }
            }

            ui.separator();

            let editing_id = session.editing_id();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for finding in &document.findings {
                    let is_active = active.0 == Some(finding.id);
                    let is_hovered = hovered.0 == Some(finding.id);

                    let frame = egui::Frame::group(ui.style()).fill(if is_active {
                        ui.visuals().selection.bg_fill.gamma_multiply(0.3)
                    } else if is_hovered {
                        ui.visuals().faint_bg_color
                    } else {
                        egui::Color32::TRANSPARENT
                    });

                    let response = frame
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(
                                    severity_badge(finding.severity),
                                    finding.severity.display_name(),
                                );
                                ui.label(finding.id.to_string());
                                if finding.area.is_none() {
                                    ui.weak("(no region)");
                                }
                                if editing_id == Some(finding.id) {
                                    ui.weak("(editing)");
                                }
                            });
                            ui.label(&finding.description);
                            if let Some(suggestion) = &finding.suggestion {
                                ui.weak(format!("Suggestion: {}", suggestion));
                            }
                        })
                        .response;

                    // Selecting from the list mirrors a single click on the
                    // region; it never affects a running edit session.
                    if response.interact(egui::Sense::click()).clicked()
                        && matches!(session.state(), SessionState::Viewing)
                    {
                        active.0 = Some(finding.id);
                    }

                    ui.add_space(4.0);
                }
            });
        });
    Ok(())
}
