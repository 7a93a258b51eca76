//! In-memory store for the currently open review document.

use bevy::prelude::*;
use std::path::PathBuf;

use super::{Finding, FindingId};

/// The review document currently open in the application.
///
/// The document owns the committed finding areas. The transient working copy
/// of an area being edited lives in the editor's `EditSession`, never here;
/// it only lands in the document through the commit path.
#[derive(Resource, Default)]
pub struct ReviewDocument {
    /// Path the document was loaded from (and is saved back to)
    pub path: Option<PathBuf>,
    /// Path of the reviewed image, as resolved against the document location
    pub image_path: Option<PathBuf>,
    /// Whether the reviewer may edit finding regions
    pub editable: bool,
    pub findings: Vec<Finding>,
}

impl ReviewDocument {
    pub fn is_loaded(&self) -> bool {
        self.path.is_some()
    }

    pub fn get(&self, id: FindingId) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FindingId) -> Option<&mut Finding> {
        self.findings.iter_mut().find(|f| f.id == id)
    }
}

/// The finding currently selected in the panel / overlay, if any.
#[derive(Resource, Default)]
pub struct ActiveFinding(pub Option<FindingId>);

/// The finding currently under the pointer, if any.
#[derive(Resource, Default)]
pub struct HoveredFinding(pub Option<FindingId>);
