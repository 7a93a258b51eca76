//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the review UI and overlay
//! rendering. Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::findings::Severity;

// ============================================================================
// Overlay Colors
// ============================================================================

/// Light blue outline for the region currently being edited
pub const EDITING_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

/// White-ish emphasis for the hovered region
pub const HOVER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);

/// Corner handle fill while editing
pub const HANDLE_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

// ============================================================================
// Severity Colors
// ============================================================================

/// Overlay stroke color for a finding of the given severity
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Low => Color::srgb(0.4, 0.75, 0.4),
        Severity::Medium => Color::srgb(0.95, 0.8, 0.2),
        Severity::High => Color::srgb(0.95, 0.5, 0.15),
        Severity::Critical => Color::srgb(0.9, 0.2, 0.2),
    }
}

/// Severity badge color for the egui findings panel
pub fn severity_badge(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Low => egui::Color32::from_rgb(102, 191, 102),
        Severity::Medium => egui::Color32::from_rgb(242, 204, 51),
        Severity::High => egui::Color32::from_rgb(242, 128, 38),
        Severity::Critical => egui::Color32::from_rgb(230, 51, 51),
    }
}

// ============================================================================
// Save Status Colors
// ============================================================================

pub const STATUS_DIRTY: egui::Color32 = egui::Color32::from_rgb(242, 204, 51);
pub const STATUS_SAVING: egui::Color32 = egui::Color32::from_rgb(128, 160, 230);
pub const STATUS_SAVED: egui::Color32 = egui::Color32::from_rgb(102, 191, 102);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(230, 51, 51);
