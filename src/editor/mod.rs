//! Interactive region editing: selection, double-click edit sessions,
//! move/resize drags, commit/cancel, and the save status readout.

use bevy::prelude::*;

pub mod geometry;
pub mod gizmos;
pub mod input;
pub mod listeners;
pub mod session;
pub mod status;

pub use listeners::ListenerBindings;
pub use session::{EditSession, SessionState};
pub use status::{SaveState, SaveStatus};

use crate::findings::{FindingId, RegionBox};

/// Pointer entered a finding's region.
#[derive(Message)]
pub struct FindingHovered {
    pub id: FindingId,
}

/// Pointer left a finding's region.
#[derive(Message)]
pub struct FindingUnhovered {
    pub id: FindingId,
}

/// Single click selected a finding.
#[derive(Message)]
pub struct FindingClicked {
    pub id: FindingId,
}

/// Double click on a finding, whether or not an edit session started.
#[derive(Message)]
pub struct FindingDoubleClicked {
    pub id: FindingId,
}

/// An edit session started for the finding.
#[derive(Message)]
pub struct EditingStarted {
    pub id: FindingId,
}

/// The working copy changed during a drag. Fired per pointer move, in order.
#[derive(Message)]
pub struct RegionEdited {
    pub id: FindingId,
    pub area: RegionBox,
}

/// The edit session committed with this final region.
#[derive(Message)]
pub struct EditingFinished {
    pub id: FindingId,
    pub area: RegionBox,
}

/// The edit session ended without committing.
#[derive(Message)]
pub struct EditingCancelled {
    pub id: FindingId,
}

pub struct RegionEditorPlugin;

impl Plugin for RegionEditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditSession>()
            .init_resource::<ListenerBindings>()
            .init_resource::<input::ClickTracker>()
            .init_resource::<SaveStatus>()
            .add_message::<FindingHovered>()
            .add_message::<FindingUnhovered>()
            .add_message::<FindingClicked>()
            .add_message::<FindingDoubleClicked>()
            .add_message::<EditingStarted>()
            .add_message::<RegionEdited>()
            .add_message::<EditingFinished>()
            .add_message::<EditingCancelled>()
            .init_gizmo_group::<gizmos::RegionGizmoGroup>()
            .add_systems(Startup, gizmos::configure_region_gizmos)
            .add_systems(
                Update,
                (
                    // Input first, then the listener set catches up with the
                    // state the input produced, within the same frame.
                    input::reset_on_document_load,
                    input::handle_pointer_press,
                    input::handle_pointer_drag,
                    input::handle_pointer_release,
                    input::handle_keyboard,
                    listeners::sync_listener_bindings,
                    input::update_hover,
                    input::update_region_cursor,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    status::track_commits,
                    status::track_save_lifecycle,
                    status::revert_saved_badge,
                )
                    .chain(),
            )
            .add_systems(Update, gizmos::draw_region_overlays);
    }
}
