//! Common types shared across multiple modules.
//!
//! These are used by both the editor input/geometry code and the UI layer,
//! so they live outside either module.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// One of the four corner handles of a region.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub fn all() -> [Corner; 4] {
        [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se]
    }
}

/// What a pointer-down inside an edit session grabs: the region body
/// (move) or one of its corner handles (resize).
///
/// A handle keeps its identity for the whole gesture; dragging past the
/// opposite edge never swaps which corner is anchored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragKind {
    Move,
    Resize(Corner),
}

impl DragKind {
    /// Get the appropriate cursor icon for this drag kind.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            DragKind::Move => CursorIcon::System(SystemCursorIcon::Move),
            DragKind::Resize(Corner::Ne) | DragKind::Resize(Corner::Sw) => {
                CursorIcon::System(SystemCursorIcon::NeswResize)
            }
            DragKind::Resize(Corner::Nw) | DragKind::Resize(Corner::Se) => {
                CursorIcon::System(SystemCursorIcon::NwseResize)
            }
        }
    }

}
