//! The per-document edit session: one state machine owning the working copy.
//!
//! All region-editing mutations flow through [`EditSession`]'s transition
//! methods; input systems translate raw pointer/keyboard activity into these
//! calls and forward the returned [`SessionEvent`]s as messages. Because the
//! session is a single resource, at most one finding can be in the Editing
//! or Dragging state at a time — the focus token that also scopes the global
//! listener set.

use bevy::prelude::{Resource, Vec2};

use crate::common::DragKind;
use crate::findings::{FindingId, RegionBox};
use crate::viewer::DisplayMetrics;

use super::geometry;

/// The gesture in progress while dragging: what was grabbed, where the
/// pointer went down and the region at that moment.
///
/// The start point is stored in natural space so a window resize mid-drag
/// (which changes the display metrics) cannot skew the delta: each pointer
/// position is converted under its own frame's metrics and the difference
/// is taken between natural-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
    pub kind: DragKind,
    pub start_natural: Vec2,
    pub start_area: RegionBox,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Viewing,
    Editing {
        id: FindingId,
    },
    Dragging {
        id: FindingId,
        gesture: DragGesture,
    },
}

impl SessionState {
    /// The finding holding the session, if any.
    pub fn editing_id(&self) -> Option<FindingId> {
        match self {
            SessionState::Viewing => None,
            SessionState::Editing { id } | SessionState::Dragging { id, .. } => Some(*id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, SessionState::Dragging { .. })
    }
}

/// Outcome of a session transition, forwarded to observers as messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    /// Single click selected a finding; no state change.
    Clicked(FindingId),
    /// Double click entered the Editing state.
    Started(FindingId),
    /// A drag produced a new (clamped) working copy.
    Updated(FindingId, RegionBox),
    /// The session committed; the box is handed to persistence.
    Finished(FindingId, RegionBox),
    /// The session was cancelled; the working copy is discarded.
    Cancelled(FindingId),
}

/// The interaction state machine for region editing.
///
/// Exactly one of `finish`/`cancel` succeeds per editing session: both
/// require the session to be held, and both release it.
#[derive(Resource, Default)]
pub struct EditSession {
    state: SessionState,
    /// Working copy of the edited region; exists exactly while the session
    /// is held, discarded on cancel, handed off on finish.
    working: Option<RegionBox>,
}

impl EditSession {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn editing_id(&self) -> Option<FindingId> {
        self.state.editing_id()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The in-progress region, while a session is held.
    pub fn working_area(&self) -> Option<RegionBox> {
        self.working
    }

    /// Single click on a finding while Viewing. Selection only; the session
    /// does not change state.
    pub fn click(&mut self, id: FindingId) -> Option<SessionEvent> {
        match self.state {
            SessionState::Viewing => Some(SessionEvent::Clicked(id)),
            _ => None,
        }
    }

    /// Double click on an editable finding while Viewing: enter Editing and
    /// take a working copy of its area.
    pub fn start_editing(&mut self, id: FindingId, area: RegionBox) -> Option<SessionEvent> {
        match self.state {
            SessionState::Viewing => {
                self.state = SessionState::Editing { id };
                self.working = Some(area);
                Some(SessionEvent::Started(id))
            }
            // Another finding already holds the session; the caller must
            // cancel that one first (outside-click semantics).
            _ => None,
        }
    }

    /// Pointer-down on the region body or a handle while Editing. The press
    /// position is captured in natural space under the metrics of the press
    /// frame.
    pub fn press(&mut self, kind: DragKind, at_display: Vec2, metrics: &DisplayMetrics) -> bool {
        let SessionState::Editing { id } = self.state else {
            return false;
        };
        let Some(start_area) = self.working else {
            return false;
        };

        self.state = SessionState::Dragging {
            id,
            gesture: DragGesture {
                kind,
                start_natural: geometry::display_point_to_natural(at_display, metrics),
                start_area,
            },
        };
        true
    }

    /// Pointer-move while Dragging: recompute the working copy from the
    /// gesture's start, clamp it, and report it.
    pub fn drag_to(
        &mut self,
        at_display: Vec2,
        metrics: &DisplayMetrics,
        natural: Vec2,
    ) -> Option<SessionEvent> {
        let SessionState::Dragging { id, gesture } = self.state else {
            return None;
        };

        let delta = geometry::display_point_to_natural(at_display, metrics) - gesture.start_natural;
        let area = geometry::clamp_area(
            geometry::compute_new_area(gesture.kind, gesture.start_area, delta.x, delta.y),
            natural,
        );
        self.working = Some(area);
        Some(SessionEvent::Updated(id, area))
    }

    /// Pointer-up: the drag ends, the session stays in Editing. No commit.
    pub fn release(&mut self) -> bool {
        let SessionState::Dragging { id, .. } = self.state else {
            return false;
        };
        self.state = SessionState::Editing { id };
        true
    }

    /// Enter key: commit the last working copy and release the session.
    pub fn finish(&mut self) -> Option<SessionEvent> {
        let id = self.state.editing_id()?;
        let area = self.working.take()?;
        self.state = SessionState::Viewing;
        Some(SessionEvent::Finished(id, area))
    }

    /// Escape or outside-click: discard the working copy and release the
    /// session. No persistence call is ever issued for the discarded box.
    pub fn cancel(&mut self) -> Option<SessionEvent> {
        let id = self.state.editing_id()?;
        self.state = SessionState::Viewing;
        self.working = None;
        Some(SessionEvent::Cancelled(id))
    }

    /// Teardown (document reload): equivalent to cancel if a session is
    /// held, no-op otherwise.
    pub fn reset(&mut self) -> Option<SessionEvent> {
        self.cancel()
    }
}
