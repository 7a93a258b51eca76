//! Save status tracking for the status bar badge.
//!
//! Mirrors the persistence lifecycle into a small display state plus a dirty
//! flag. `Saved` is transient and reverts to `Idle` after a short delay;
//! `Error` sticks (and keeps the document dirty) until a later save succeeds.

use bevy::prelude::*;

use crate::constants::SAVED_BADGE_SECS;
use crate::findings::{SaveBegan, SaveOutcome};

use super::EditingFinished;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
    Error,
}

/// Current persistence status plus whether unsaved edits exist.
#[derive(Resource, Default)]
pub struct SaveStatus {
    pub state: SaveState,
    /// Set when an edit commits, cleared only by a successful save.
    pub dirty: bool,
    last_error: Option<String>,
    revert: Option<Timer>,
}

impl SaveStatus {
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// A committed edit means unsaved changes until persistence confirms.
pub fn track_commits(
    mut events: MessageReader<EditingFinished>,
    mut status: ResMut<SaveStatus>,
) {
    for _ in events.read() {
        status.dirty = true;
    }
}

pub fn track_save_lifecycle(
    mut began: MessageReader<SaveBegan>,
    mut outcomes: MessageReader<SaveOutcome>,
    mut status: ResMut<SaveStatus>,
) {
    for _ in began.read() {
        status.state = SaveState::Saving;
        status.revert = None;
    }

    for outcome in outcomes.read() {
        match &outcome.error {
            None => {
                status.state = SaveState::Saved;
                status.dirty = false;
                status.last_error = None;
                status.revert = Some(Timer::from_seconds(SAVED_BADGE_SECS, TimerMode::Once));
            }
            Some(error) => {
                // Dirty stays set: the edit is in memory but not on disk
                status.state = SaveState::Error;
                status.last_error = Some(error.clone());
                status.revert = None;
            }
        }
    }
}

/// Let the "Saved" badge fade back to idle.
pub fn revert_saved_badge(time: Res<Time>, mut status: ResMut<SaveStatus>) {
    let Some(timer) = status.revert.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        status.state = SaveState::Idle;
        status.revert = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome_ok() -> SaveOutcome {
        SaveOutcome { error: None }
    }

    fn outcome_err(msg: &str) -> SaveOutcome {
        SaveOutcome {
            error: Some(msg.to_string()),
        }
    }

    fn apply_outcome(status: &mut SaveStatus, outcome: SaveOutcome) {
        // Same transition as track_save_lifecycle, minus the message plumbing
        match &outcome.error {
            None => {
                status.state = SaveState::Saved;
                status.dirty = false;
                status.last_error = None;
                status.revert = Some(Timer::from_seconds(SAVED_BADGE_SECS, TimerMode::Once));
            }
            Some(error) => {
                status.state = SaveState::Error;
                status.last_error = Some(error.clone());
                status.revert = None;
            }
        }
    }

    #[test]
    fn successful_save_clears_dirty_and_arms_the_badge() {
        let mut status = SaveStatus {
            dirty: true,
            state: SaveState::Saving,
            ..Default::default()
        };
        apply_outcome(&mut status, outcome_ok());
        assert_eq!(status.state, SaveState::Saved);
        assert!(!status.dirty);
        assert!(status.revert.is_some());
    }

    #[test]
    fn failed_save_keeps_dirty_and_records_the_error() {
        let mut status = SaveStatus {
            dirty: true,
            state: SaveState::Saving,
            ..Default::default()
        };
        apply_outcome(&mut status, outcome_err("disk full"));
        assert_eq!(status.state, SaveState::Error);
        assert!(status.dirty);
        assert_eq!(status.last_error(), Some("disk full"));
        assert!(status.revert.is_none());
    }

    #[test]
    fn saved_badge_reverts_after_the_delay() {
        let mut status = SaveStatus::default();
        apply_outcome(&mut status, outcome_ok());

        let timer = status.revert.as_mut().unwrap();
        timer.tick(Duration::from_secs_f32(SAVED_BADGE_SECS + 0.1));
        assert!(timer.just_finished());
        status.state = SaveState::Idle;
        status.revert = None;
        assert_eq!(status.state, SaveState::Idle);
    }

    #[test]
    fn later_success_recovers_from_error() {
        let mut status = SaveStatus::default();
        apply_outcome(&mut status, outcome_err("permission denied"));
        assert_eq!(status.state, SaveState::Error);

        apply_outcome(&mut status, outcome_ok());
        assert_eq!(status.state, SaveState::Saved);
        assert!(status.last_error().is_none());
    }
}
