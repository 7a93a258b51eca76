//! Raw input translation: pointer and keyboard events into session
//! transitions.
//!
//! These systems are the only place raw bevy input is interpreted. They
//! disambiguate single click (select), double click (enter edit), drag
//! (move/resize via the grabbed handle), keyboard (commit/cancel) and
//! outside-click (cancel), and forward the resulting [`SessionEvent`]s as
//! messages. Every system consults the live [`ListenerSet`] entitlement for
//! the current session state first, so input channels are dead unless the
//! state entitles the editor to them and a transition takes effect on the
//! gating within the same frame. [`ListenerBindings`] tracks the attached
//! set separately, for teardown and logging.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::common::{Corner, DragKind};
use crate::constants::{DOUBLE_CLICK_SECS, HANDLE_HIT_RADIUS, REGION_HIT_MARGIN};
use crate::findings::{
    ActiveFinding, DocumentLoaded, FindingId, HoveredFinding, RegionBox, ReviewDocument,
};
use crate::viewer::{DisplayMetrics, NaturalDimensions};

use super::geometry;
use super::listeners::{ListenerBindings, ListenerSet};
use super::session::{EditSession, SessionEvent, SessionState};
use super::{
    EditingCancelled, EditingFinished, EditingStarted, FindingClicked, FindingDoubleClicked,
    FindingHovered, FindingUnhovered, RegionEdited,
};

/// Remembers the previous click for double-click detection.
#[derive(Resource, Default)]
pub struct ClickTracker {
    last: Option<(FindingId, f64)>,
}

impl ClickTracker {
    fn is_double(&self, id: FindingId, now: f64) -> bool {
        matches!(self.last, Some((prev, at)) if prev == id && now - at <= DOUBLE_CLICK_SECS as f64)
    }

    fn record(&mut self, id: FindingId, now: f64) {
        self.last = Some((id, now));
    }

    fn clear(&mut self) {
        self.last = None;
    }
}

/// Which corner handle of a display-space rect is under the pointer, if any.
fn handle_at(pos: Vec2, rect: &RegionBox) -> Option<Corner> {
    Corner::all()
        .into_iter()
        .find(|corner| (pos - geometry::corner_point(rect, *corner)).length() < HANDLE_HIT_RADIUS)
}

fn point_in_display_rect(pos: Vec2, rect: &RegionBox, margin: f32) -> bool {
    pos.x >= rect.x - margin
        && pos.x <= rect.right() + margin
        && pos.y >= rect.y - margin
        && pos.y <= rect.bottom() + margin
}

/// Topmost finding whose region contains the display-space point. Later
/// findings render on top, so iterate back to front.
fn finding_at(
    document: &ReviewDocument,
    metrics: &DisplayMetrics,
    pos: Vec2,
) -> Option<FindingId> {
    document
        .findings
        .iter()
        .rev()
        .find(|finding| {
            finding
                .area
                .map(|area| geometry::natural_to_display(&area, metrics).contains(pos.x, pos.y))
                .unwrap_or(false)
        })
        .map(|finding| finding.id)
}

fn cursor_in_display(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.single().ok()?.cursor_position()
}

#[allow(clippy::too_many_arguments)]
pub fn handle_pointer_press(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    document: Res<ReviewDocument>,
    metrics: Res<DisplayMetrics>,
    natural: Res<NaturalDimensions>,
    mut session: ResMut<EditSession>,
    mut tracker: ResMut<ClickTracker>,
    mut active: ResMut<ActiveFinding>,
    mut contexts: EguiContexts,
    mut clicked_events: MessageWriter<FindingClicked>,
    mut double_clicked_events: MessageWriter<FindingDoubleClicked>,
    mut started_events: MessageWriter<EditingStarted>,
    mut cancelled_events: MessageWriter<EditingCancelled>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Clicks on the egui panels never reach the document surface
    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(pos) = cursor_in_display(&windows) else {
        return;
    };

    if natural.get().is_none() || !metrics.is_renderable() {
        return;
    }

    match session.state() {
        // The press that could matter mid-drag is handled by release
        SessionState::Dragging { .. } => {}

        SessionState::Editing { .. } => {
            let Some(working) = session.working_area() else {
                return;
            };
            let rect = geometry::natural_to_display(&working, &metrics);

            if let Some(corner) = handle_at(pos, &rect) {
                session.press(DragKind::Resize(corner), pos, &metrics);
            } else if point_in_display_rect(pos, &rect, 0.0) {
                session.press(DragKind::Move, pos, &metrics);
            } else if point_in_display_rect(pos, &rect, REGION_HIT_MARGIN) {
                // Near-miss around the region still counts as its own
                // hit-region; neither a grab nor an outside click.
            } else if ListenerSet::for_state(&session.state()).outside_click
                && let Some(SessionEvent::Cancelled(id)) = session.cancel()
            {
                debug!("Outside click cancelled edit of finding {}", id);
                cancelled_events.write(EditingCancelled { id });
            }
        }

        SessionState::Viewing => {
            let Some(id) = finding_at(&document, &metrics, pos) else {
                active.0 = None;
                tracker.clear();
                return;
            };

            let now = time.elapsed_secs_f64();
            if tracker.is_double(id, now) {
                tracker.clear();
                double_clicked_events.write(FindingDoubleClicked { id });

                if !document.editable {
                    debug!("Ignoring edit request on read-only document");
                    return;
                }
                let Some(area) = document.get(id).and_then(|f| f.area) else {
                    return;
                };
                if let Some(SessionEvent::Started(id)) = session.start_editing(id, area) {
                    active.0 = Some(id);
                    started_events.write(EditingStarted { id });
                }
            } else {
                tracker.record(id, now);
                if let Some(SessionEvent::Clicked(id)) = session.click(id) {
                    active.0 = Some(id);
                    clicked_events.write(FindingClicked { id });
                }
            }
        }
    }
}

/// Pointer-move capture while dragging, at frame cadence. Updates are
/// emitted in pointer order; the last one before pointer-up is the
/// authoritative commit candidate.
pub fn handle_pointer_drag(
    windows: Query<&Window, With<PrimaryWindow>>,
    metrics: Res<DisplayMetrics>,
    natural: Res<NaturalDimensions>,
    mut session: ResMut<EditSession>,
    mut last_pos: Local<Option<Vec2>>,
    mut edited_events: MessageWriter<RegionEdited>,
) {
    if !ListenerSet::for_state(&session.state()).pointer {
        *last_pos = None;
        return;
    }
    let Some(natural) = natural.get() else {
        return;
    };
    if !metrics.is_renderable() {
        return;
    }
    let Some(pos) = cursor_in_display(&windows) else {
        return;
    };

    // Only emit when the pointer actually moved
    if *last_pos == Some(pos) {
        return;
    }
    *last_pos = Some(pos);

    if let Some(SessionEvent::Updated(id, area)) = session.drag_to(pos, &metrics, natural) {
        edited_events.write(RegionEdited { id, area });
    }
}

/// Pointer-up ends the drag and returns to Editing. No commit happens here.
///
/// Gates on the live entitlement, not the attached set: a press and release
/// landing in the same frame must still complete the drag round-trip.
pub fn handle_pointer_release(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut session: ResMut<EditSession>,
) {
    if !ListenerSet::for_state(&session.state()).pointer {
        return;
    }
    if mouse_button.just_released(MouseButton::Left) && session.release() {
        debug!("Drag ended, back to editing");
    }
}

/// Whether a commit key (either Enter) was pressed this frame.
fn commit_key_pressed(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter])
}

/// Escape cancels, Enter commits. Only live while the session state entitles
/// the editor to the keyboard, and never while egui has keyboard focus.
pub fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<EditSession>,
    mut contexts: EguiContexts,
    mut finished_events: MessageWriter<EditingFinished>,
    mut cancelled_events: MessageWriter<EditingCancelled>,
) {
    if !ListenerSet::for_state(&session.state()).keyboard {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        if let Some(SessionEvent::Cancelled(id)) = session.cancel() {
            cancelled_events.write(EditingCancelled { id });
        }
    } else if commit_key_pressed(&keyboard)
        && let Some(SessionEvent::Finished(id, area)) = session.finish()
    {
        finished_events.write(EditingFinished { id, area });
    }
}

/// Track which finding region is under the pointer and report transitions.
#[allow(clippy::too_many_arguments)]
pub fn update_hover(
    windows: Query<&Window, With<PrimaryWindow>>,
    document: Res<ReviewDocument>,
    metrics: Res<DisplayMetrics>,
    session: Res<EditSession>,
    mut hovered: ResMut<HoveredFinding>,
    mut contexts: EguiContexts,
    mut hovered_events: MessageWriter<FindingHovered>,
    mut unhovered_events: MessageWriter<FindingUnhovered>,
) {
    let next = if session.is_dragging() || is_cursor_over_ui(&mut contexts) {
        None
    } else {
        cursor_in_display(&windows)
            .filter(|_| metrics.is_renderable())
            .and_then(|pos| finding_at(&document, &metrics, pos))
    };

    if next == hovered.0 {
        return;
    }
    if let Some(prev) = hovered.0 {
        unhovered_events.write(FindingUnhovered { id: prev });
    }
    if let Some(id) = next {
        hovered_events.write(FindingHovered { id });
    }
    hovered.0 = next;
}

/// Update the window cursor to reflect what a press would grab.
pub fn update_region_cursor(
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    session: Res<EditSession>,
    metrics: Res<DisplayMetrics>,
    hovered: Res<HoveredFinding>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };

    if is_cursor_over_ui(&mut contexts) {
        commands
            .entity(window_entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let icon = match session.state() {
        SessionState::Dragging { gesture, .. } => gesture.kind.cursor_icon(),
        SessionState::Editing { .. } => {
            match (window.cursor_position(), session.working_area()) {
                (Some(pos), Some(working)) if metrics.is_renderable() => {
                    let rect = geometry::natural_to_display(&working, &metrics);
                    if let Some(corner) = handle_at(pos, &rect) {
                        DragKind::Resize(corner).cursor_icon()
                    } else if point_in_display_rect(pos, &rect, 0.0) {
                        DragKind::Move.cursor_icon()
                    } else {
                        CursorIcon::System(SystemCursorIcon::Default)
                    }
                }
                _ => CursorIcon::System(SystemCursorIcon::Default),
            }
        }
        SessionState::Viewing => {
            if hovered.0.is_some() {
                CursorIcon::System(SystemCursorIcon::Pointer)
            } else {
                CursorIcon::System(SystemCursorIcon::Default)
            }
        }
    };

    commands.entity(window_entity).insert(icon);
}

/// Document reload tears the session down; an interrupted edit counts as
/// cancelled so the one-of-finish-or-cancel contract still holds.
pub fn reset_on_document_load(
    mut events: MessageReader<DocumentLoaded>,
    mut session: ResMut<EditSession>,
    mut bindings: ResMut<ListenerBindings>,
    mut tracker: ResMut<ClickTracker>,
    mut cancelled_events: MessageWriter<EditingCancelled>,
) {
    for _ in events.read() {
        if let Some(SessionEvent::Cancelled(id)) = session.reset() {
            cancelled_events.write(EditingCancelled { id });
        }
        bindings.detach_all();
        tracker.clear();
    }
}

/// Check if the cursor is over egui UI
fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{Finding, Severity};

    fn metrics() -> DisplayMetrics {
        DisplayMetrics {
            scale: 1.0,
            padding: Vec2::ZERO,
        }
    }

    fn document() -> ReviewDocument {
        ReviewDocument {
            path: None,
            image_path: None,
            editable: true,
            findings: vec![
                Finding {
                    id: FindingId(1),
                    description: "lower".into(),
                    severity: Severity::Low,
                    suggestion: None,
                    area: Some(RegionBox::new(0.0, 0.0, 100.0, 100.0)),
                },
                Finding {
                    id: FindingId(2),
                    description: "upper".into(),
                    severity: Severity::High,
                    suggestion: None,
                    area: Some(RegionBox::new(50.0, 50.0, 100.0, 100.0)),
                },
                Finding {
                    id: FindingId(3),
                    description: "no region".into(),
                    severity: Severity::Low,
                    suggestion: None,
                    area: None,
                },
            ],
        }
    }

    #[test]
    fn corner_handles_hit_before_body() {
        let rect = RegionBox::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(handle_at(Vec2::new(100.0, 100.0), &rect), Some(Corner::Nw));
        assert_eq!(handle_at(Vec2::new(151.0, 99.0), &rect), Some(Corner::Ne));
        assert_eq!(handle_at(Vec2::new(99.0, 151.0), &rect), Some(Corner::Sw));
        assert_eq!(handle_at(Vec2::new(150.0, 150.0), &rect), Some(Corner::Se));
        assert_eq!(handle_at(Vec2::new(125.0, 125.0), &rect), None);
    }

    #[test]
    fn overlapping_regions_hit_topmost_last_in_document_order() {
        let doc = document();
        // The overlap belongs to finding 2, which is later in the list
        assert_eq!(
            finding_at(&doc, &metrics(), Vec2::new(75.0, 75.0)),
            Some(FindingId(2))
        );
        // Outside the overlap, finding 1 still wins its own territory
        assert_eq!(
            finding_at(&doc, &metrics(), Vec2::new(10.0, 10.0)),
            Some(FindingId(1))
        );
        assert_eq!(finding_at(&doc, &metrics(), Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn findings_without_regions_are_never_hit() {
        let mut doc = document();
        doc.findings.retain(|f| f.id == FindingId(3));
        assert_eq!(finding_at(&doc, &metrics(), Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn double_click_requires_same_target_within_window() {
        let mut tracker = ClickTracker::default();
        tracker.record(FindingId(1), 10.0);

        assert!(tracker.is_double(FindingId(1), 10.0 + DOUBLE_CLICK_SECS as f64 - 0.01));
        assert!(!tracker.is_double(FindingId(2), 10.1));
        assert!(!tracker.is_double(FindingId(1), 10.0 + DOUBLE_CLICK_SECS as f64 + 0.01));

        tracker.clear();
        assert!(!tracker.is_double(FindingId(1), 10.05));
    }

    #[test]
    fn same_frame_press_and_release_lands_back_in_editing() {
        let mut session = EditSession::default();
        session.start_editing(FindingId(1), RegionBox::new(0.0, 0.0, 50.0, 50.0));
        session.press(DragKind::Move, Vec2::new(10.0, 10.0), &metrics());

        // A fast click can deliver both edges in one frame: the release gate
        // must see the entitlement of the state the press just produced, not
        // a set synced at the end of the previous frame.
        assert!(ListenerSet::for_state(&session.state()).pointer);
        if ListenerSet::for_state(&session.state()).pointer {
            assert!(session.release());
        }

        assert_eq!(session.state(), SessionState::Editing { id: FindingId(1) });
        assert!(!session.is_dragging());
    }

    #[test]
    fn keyboard_entitlement_is_live_the_frame_editing_starts() {
        let mut session = EditSession::default();
        assert!(!ListenerSet::for_state(&session.state()).keyboard);

        session.start_editing(FindingId(1), RegionBox::new(0.0, 0.0, 50.0, 50.0));

        // Escape pressed in the very frame the session started must land
        assert!(ListenerSet::for_state(&session.state()).keyboard);
        if ListenerSet::for_state(&session.state()).keyboard {
            assert_eq!(
                session.cancel(),
                Some(SessionEvent::Cancelled(FindingId(1)))
            );
        }
    }

    #[test]
    fn both_enter_keys_commit() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Enter);
        assert!(commit_key_pressed(&keyboard));

        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::NumpadEnter);
        assert!(commit_key_pressed(&keyboard));

        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::Escape);
        assert!(!commit_key_pressed(&keyboard));
    }

    #[test]
    fn hit_margin_extends_the_own_region() {
        let rect = RegionBox::new(100.0, 100.0, 50.0, 50.0);
        assert!(point_in_display_rect(
            Vec2::new(100.0 - REGION_HIT_MARGIN, 100.0),
            &rect,
            REGION_HIT_MARGIN
        ));
        assert!(!point_in_display_rect(
            Vec2::new(100.0 - REGION_HIT_MARGIN - 1.0, 100.0),
            &rect,
            REGION_HIT_MARGIN
        ));
    }
}
