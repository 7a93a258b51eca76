//! The active listener set: which global input channels the editor owns.
//!
//! Keyboard and outside-click handling are document-wide concerns; pointer
//! move/up capture is too, while a drag is in flight. Input systems gate on
//! the live entitlement ([`ListenerSet::for_state`]) so a transition changes
//! the gating within the same frame; the [`ListenerBindings`] resource owns
//! the attached set as bookkeeping, synced from the session state once per
//! frame after all transitions and torn down with its owning document.
//!
//! Attachment is idempotent per state: re-syncing in the same state never
//! re-attaches, so re-evaluations cannot stack duplicate handlers.

use bevy::prelude::*;

use super::session::{EditSession, SessionState};

/// Which document-level listener kinds are currently attached.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ListenerSet {
    /// Escape/Enter handling (Editing and Dragging)
    pub keyboard: bool,
    /// Click-outside-the-region cancellation (Editing and Dragging)
    pub outside_click: bool,
    /// Pointer move/up capture (Dragging only)
    pub pointer: bool,
}

impl ListenerSet {
    pub const NONE: ListenerSet = ListenerSet {
        keyboard: false,
        outside_click: false,
        pointer: false,
    };

    /// The listener set a given session state is entitled to.
    pub fn for_state(state: &SessionState) -> ListenerSet {
        match state {
            SessionState::Viewing => ListenerSet::NONE,
            SessionState::Editing { .. } => ListenerSet {
                keyboard: true,
                outside_click: true,
                pointer: false,
            },
            SessionState::Dragging { .. } => ListenerSet {
                keyboard: true,
                outside_click: true,
                pointer: true,
            },
        }
    }
}

/// Owner of the attached listener set. There is exactly one per app, so the
/// single session holder is also the single listener holder.
#[derive(Resource, Default)]
pub struct ListenerBindings {
    active: ListenerSet,
}

impl ListenerBindings {
    /// Bring the attached set in line with the session state. Idempotent:
    /// calling this any number of times in the same state attaches nothing
    /// new and detaches nothing.
    pub fn sync(&mut self, state: &SessionState) {
        let target = ListenerSet::for_state(state);
        if target == self.active {
            return;
        }

        if target.keyboard != self.active.keyboard {
            debug!(
                "{} document keyboard listener",
                if target.keyboard { "attach" } else { "detach" }
            );
        }
        if target.outside_click != self.active.outside_click {
            debug!(
                "{} document outside-click listener",
                if target.outside_click { "attach" } else { "detach" }
            );
        }
        if target.pointer != self.active.pointer {
            debug!(
                "{} document pointer-capture listeners",
                if target.pointer { "attach" } else { "detach" }
            );
        }

        self.active = target;
    }

    /// Unconditional teardown, used when the owning document goes away.
    pub fn detach_all(&mut self) {
        if self.active != ListenerSet::NONE {
            debug!("detach all document listeners");
            self.active = ListenerSet::NONE;
        }
    }
}

/// Runs after the input systems each frame so the attached set reflects the
/// state this frame's transitions produced.
pub fn sync_listener_bindings(session: Res<EditSession>, mut bindings: ResMut<ListenerBindings>) {
    bindings.sync(&session.state());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DragKind;
    use crate::findings::{FindingId, RegionBox};
    use crate::viewer::DisplayMetrics;
    use bevy::prelude::Vec2;

    fn metrics() -> DisplayMetrics {
        DisplayMetrics {
            scale: 1.0,
            padding: Vec2::ZERO,
        }
    }

    fn editing_session() -> EditSession {
        let mut session = EditSession::default();
        session.start_editing(FindingId(1), RegionBox::new(0.0, 0.0, 20.0, 20.0));
        session
    }

    #[test]
    fn viewing_holds_no_listeners() {
        assert_eq!(
            ListenerSet::for_state(&SessionState::Viewing),
            ListenerSet::NONE
        );
    }

    #[test]
    fn editing_attaches_keyboard_and_outside_click_only() {
        let session = editing_session();
        let set = ListenerSet::for_state(&session.state());
        assert!(set.keyboard);
        assert!(set.outside_click);
        assert!(!set.pointer);
    }

    #[test]
    fn dragging_adds_pointer_capture() {
        let mut session = editing_session();
        session.press(DragKind::Move, Vec2::ZERO, &metrics());
        let set = ListenerSet::for_state(&session.state());
        assert!(set.keyboard);
        assert!(set.outside_click);
        assert!(set.pointer);
    }

    #[test]
    fn sync_is_idempotent_within_a_state() {
        let session = editing_session();
        let mut bindings = ListenerBindings::default();

        bindings.sync(&session.state());
        let first = bindings.active;
        bindings.sync(&session.state());
        bindings.sync(&session.state());
        assert_eq!(bindings.active, first);
    }

    #[test]
    fn leaving_dragging_detaches_pointer_immediately() {
        let mut session = editing_session();
        session.press(DragKind::Move, Vec2::ZERO, &metrics());
        let mut bindings = ListenerBindings::default();
        bindings.sync(&session.state());
        assert!(bindings.active.pointer);

        session.release();
        bindings.sync(&session.state());
        assert!(!bindings.active.pointer);
        assert!(bindings.active.keyboard);
    }

    #[test]
    fn ending_the_session_detaches_everything() {
        let mut session = editing_session();
        let mut bindings = ListenerBindings::default();
        bindings.sync(&session.state());

        session.cancel();
        bindings.sync(&session.state());
        assert_eq!(bindings.active, ListenerSet::NONE);
    }

    #[test]
    fn detach_all_is_unconditional() {
        let session = editing_session();
        let mut bindings = ListenerBindings::default();
        bindings.sync(&session.state());
        assert_ne!(bindings.active, ListenerSet::NONE);

        bindings.detach_all();
        assert_eq!(bindings.active, ListenerSet::NONE);
    }
}
