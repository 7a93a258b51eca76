//! Review document persistence (JSON load/save) and the commit path.
//!
//! This is the persistence collaborator the region editor delegates to: it
//! applies committed areas to the document, writes the document back to disk
//! and reports outcomes through [`SaveBegan`]/[`SaveOutcome`], which drive
//! the editor's save-status tracker. The editor itself never retries a save.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ActiveFinding, Finding, HoveredFinding, ReviewDocument};
use crate::editor::EditingFinished;

#[derive(Message)]
pub struct LoadReviewRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct SaveReviewRequest;

/// Fired after a document has been (re)loaded, so the viewer and editor can
/// reset their per-document state.
#[derive(Message)]
pub struct DocumentLoaded;

/// A save attempt is starting.
#[derive(Message)]
pub struct SaveBegan;

/// A save attempt completed; `error` is `None` on success.
#[derive(Message)]
pub struct SaveOutcome {
    pub error: Option<String>,
}

/// User-visible load failure, shown in the status bar.
#[derive(Resource, Default)]
pub struct ReviewLoadError {
    pub message: Option<String>,
}

/// On-disk shape of a review document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewFile {
    /// Image path, absolute or relative to the document file
    pub image: PathBuf,
    #[serde(default = "default_editable")]
    pub editable: bool,
    pub findings: Vec<Finding>,
}

fn default_editable() -> bool {
    true
}

/// Resolve the image path against the directory holding the document.
fn resolve_image_path(document: &Path, image: &Path) -> PathBuf {
    if image.is_absolute() {
        image.to_path_buf()
    } else {
        document
            .parent()
            .map(|dir| dir.join(image))
            .unwrap_or_else(|| image.to_path_buf())
    }
}

fn read_review_file(path: &Path) -> Result<ReviewFile, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read review document: {}", e))?;
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse review document: {}", e))
}

pub fn load_review_system(
    mut events: MessageReader<LoadReviewRequest>,
    mut document: ResMut<ReviewDocument>,
    mut active: ResMut<ActiveFinding>,
    mut hovered: ResMut<HoveredFinding>,
    mut load_error: ResMut<ReviewLoadError>,
    mut loaded_events: MessageWriter<DocumentLoaded>,
    mut config_events: MessageWriter<crate::config::UpdateLastReviewRequest>,
) {
    for event in events.read() {
        load_error.message = None;

        let file = match read_review_file(&event.path) {
            Ok(file) => file,
            Err(message) => {
                error!("{}", message);
                load_error.message = Some(message);
                continue;
            }
        };

        let image_path = resolve_image_path(&event.path, &file.image);
        info!(
            "Loaded review {:?} ({} findings, image {:?})",
            event.path,
            file.findings.len(),
            image_path
        );

        document.path = Some(event.path.clone());
        document.image_path = Some(image_path);
        document.editable = file.editable;
        document.findings = file.findings;
        active.0 = None;
        hovered.0 = None;

        loaded_events.write(DocumentLoaded);
        config_events.write(crate::config::UpdateLastReviewRequest {
            path: event.path.clone(),
        });
    }
}

/// Apply committed edits to the document and kick off a save.
///
/// The region editor hands over the final working copy via
/// [`EditingFinished`]; from that point on the area belongs to the document.
pub fn apply_commit_system(
    mut events: MessageReader<EditingFinished>,
    mut document: ResMut<ReviewDocument>,
    mut save_events: MessageWriter<SaveReviewRequest>,
) {
    for event in events.read() {
        let Some(finding) = document.get_mut(event.id) else {
            warn!("Commit for unknown finding {}", event.id);
            continue;
        };

        finding.area = Some(event.area);
        debug!("Committed area {:?} for finding {}", event.area, event.id);
        save_events.write(SaveReviewRequest);
    }
}

pub fn save_review_system(
    mut events: MessageReader<SaveReviewRequest>,
    document: Res<ReviewDocument>,
    mut began_events: MessageWriter<SaveBegan>,
    mut outcome_events: MessageWriter<SaveOutcome>,
) {
    // Collapse multiple requests in one frame into a single save
    if events.read().count() == 0 {
        return;
    }

    let (Some(path), Some(image_path)) = (&document.path, &document.image_path) else {
        warn!("Save requested with no document loaded");
        return;
    };

    began_events.write(SaveBegan);

    let file = ReviewFile {
        image: image_path.clone(),
        editable: document.editable,
        findings: document.findings.clone(),
    };

    let result = serde_json::to_string_pretty(&file)
        .map_err(|e| format!("Failed to serialize review document: {}", e))
        .and_then(|json| {
            std::fs::write(path, json).map_err(|e| format!("Failed to save review document: {}", e))
        });

    match result {
        Ok(()) => {
            info!("Review saved to {:?}", path);
            outcome_events.write(SaveOutcome { error: None });
        }
        Err(message) => {
            error!("{}", message);
            outcome_events.write(SaveOutcome {
                error: Some(message),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{FindingId, RegionBox, Severity};

    fn sample_file() -> ReviewFile {
        ReviewFile {
            image: PathBuf::from("scans/page-4.png"),
            editable: true,
            findings: vec![
                Finding {
                    id: FindingId(1),
                    description: "Possible PII in header".into(),
                    severity: Severity::High,
                    suggestion: Some("Redact the address line".into()),
                    area: Some(RegionBox::new(120.0, 40.0, 300.0, 60.0)),
                },
                Finding {
                    id: FindingId(2),
                    description: "Low-contrast watermark".into(),
                    severity: Severity::Low,
                    suggestion: None,
                    area: None,
                },
            ],
        }
    }

    #[test]
    fn review_file_roundtrip() {
        let json = serde_json::to_string_pretty(&sample_file()).unwrap();
        let back: ReviewFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.findings.len(), 2);
        assert_eq!(back.findings[0].id, FindingId(1));
        assert_eq!(
            back.findings[0].area,
            Some(RegionBox::new(120.0, 40.0, 300.0, 60.0))
        );
        assert!(back.findings[1].area.is_none());
    }

    #[test]
    fn editable_defaults_to_true() {
        let json = r#"{"image": "a.png", "findings": []}"#;
        let file: ReviewFile = serde_json::from_str(json).unwrap();
        assert!(file.editable);
    }

    #[test]
    fn image_path_resolution() {
        let doc = Path::new("/reviews/batch-7/review.json");
        assert_eq!(
            resolve_image_path(doc, Path::new("scans/p1.png")),
            PathBuf::from("/reviews/batch-7/scans/p1.png")
        );
        assert_eq!(
            resolve_image_path(doc, Path::new("/data/p1.png")),
            PathBuf::from("/data/p1.png")
        );
    }

    #[test]
    fn malformed_document_is_an_error_not_a_panic() {
        let err = read_review_file(Path::new("/nonexistent/review.json")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }
}
