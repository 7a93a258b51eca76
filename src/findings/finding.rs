//! The review-findings data model.
//!
//! A [`Finding`] is an AI-produced observation about the reviewed image,
//! optionally anchored to a rectangular region ([`RegionBox`]) in natural
//! (image-pixel) coordinates. Findings are immutable from the editor's
//! perspective except through the commit path in `persistence`.

use serde::{Deserialize, Serialize};

/// Stable identifier of a finding within its review document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FindingId(pub u64);

impl std::fmt::Display for FindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How serious the AI judged the finding to be.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// An axis-aligned rectangle in natural (image-pixel) coordinates.
///
/// After clamping, a region always satisfies `x >= 0`, `y >= 0`,
/// `width >= MIN_REGION_SIZE`, `height >= MIN_REGION_SIZE`,
/// `x + width <= image width` and `y + height <= image height`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct RegionBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RegionBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// One AI-generated observation, optionally anchored to an image region.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Finding {
    pub id: FindingId,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<RegionBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_box_edges() {
        let area = RegionBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(area.right(), 40.0);
        assert_eq!(area.bottom(), 60.0);
        assert!(area.contains(10.0, 20.0));
        assert!(area.contains(40.0, 60.0));
        assert!(!area.contains(9.9, 20.0));
        assert!(!area.contains(40.1, 60.0));
    }

    #[test]
    fn severity_parses_lowercase() {
        let sev: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(sev, Severity::Critical);
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), "\"low\"");
    }

    #[test]
    fn finding_without_area_roundtrips() {
        let json = r#"{"id": 3, "description": "blurred text", "severity": "medium"}"#;
        let finding: Finding = serde_json::from_str(json).unwrap();
        assert_eq!(finding.id, FindingId(3));
        assert!(finding.area.is_none());
        assert!(finding.suggestion.is_none());

        let back = serde_json::to_string(&finding).unwrap();
        assert!(!back.contains("area"));
        assert!(!back.contains("suggestion"));
    }
}
