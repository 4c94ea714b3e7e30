//! Detected quality-control issues.
//!
//! A `QCIssue` is created by exactly one analyzer and is immutable
//! thereafter. Severity is always derived from a measured deviation against
//! the analyzer's tolerance, never assigned directly.

use std::fmt;

use crate::element::TextElement;
use crate::geometry::{self, Rect};

/// The kind of visual defect an analyzer detects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Elements in a shared coordinate band drift apart.
    Alignment,
    /// A vertical gap deviates from the page's dominant line spacing.
    Spacing,
    /// An element's edge offset breaks the page's margin convention.
    Margin,
    /// A font size inconsistent with text of a similar role.
    Typography,
}

impl IssueKind {
    /// All kinds in the fixed reporting order.
    pub const ALL: [IssueKind; 4] = [
        IssueKind::Alignment,
        IssueKind::Spacing,
        IssueKind::Margin,
        IssueKind::Typography,
    ];
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueKind::Alignment => "alignment",
            IssueKind::Spacing => "spacing",
            IssueKind::Margin => "margin",
            IssueKind::Typography => "typography",
        };
        write!(f, "{}", name)
    }
}

/// Issue severity, ordered low < medium < high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic; no built-in analyzer emits this, but custom ones may.
    Low,
    /// Deviation beyond tolerance.
    Medium,
    /// Deviation beyond twice the tolerance.
    High,
}

impl Severity {
    /// Derive severity from a deviation magnitude and the analyzer's
    /// tolerance: high when the deviation exceeds twice the tolerance,
    /// medium otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_qc::issue::Severity;
    ///
    /// assert_eq!(Severity::from_deviation(4.0, 3.0), Severity::Medium);
    /// assert_eq!(Severity::from_deviation(7.0, 3.0), Severity::High);
    /// ```
    pub fn from_deviation(deviation: f32, tolerance: f32) -> Self {
        if deviation > tolerance * 2.0 {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// One detected visual defect.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QCIssue {
    /// Which analyzer produced the issue.
    pub kind: IssueKind,
    /// Severity derived from the deviation magnitude.
    pub severity: Severity,
    /// Human-readable description with the measured and expected values.
    pub description: String,
    /// The offending element(s); never empty.
    pub elements: Vec<TextElement>,
    /// Page the issue occurs on; equals the page of every element.
    pub page: u32,
    /// Union bounding box of the implicated region.
    pub location: Rect,
}

impl QCIssue {
    /// Create an issue covering `elements`, with the location defaulting to
    /// their union bounding box.
    ///
    /// Invariants: `elements` must be non-empty and all on `page`. Callers
    /// are the analyzers themselves, which construct groups page-locally,
    /// so both hold by construction.
    pub fn new(
        kind: IssueKind,
        severity: Severity,
        description: impl Into<String>,
        elements: Vec<TextElement>,
        page: u32,
    ) -> Self {
        debug_assert!(!elements.is_empty());
        debug_assert!(elements.iter().all(|el| el.page == page));
        let location = geometry::union_all(elements.iter().map(|el| &el.bbox))
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        Self {
            kind,
            severity,
            description: description.into(),
            elements,
            page,
            location,
        }
    }

    /// Override the reported location (spacing and margin issues describe a
    /// region rather than the union of element boxes).
    pub fn with_location(mut self, location: Rect) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for QCIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] page {}: {}",
            self.kind, self.severity, self.page, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(x: f32, y: f32) -> TextElement {
        TextElement::new("text", Rect::new(x, y, 40.0, 10.0), 12.0, 1)
    }

    #[test]
    fn test_severity_boundaries() {
        // Exactly 2x tolerance is still medium; strictly greater is high.
        assert_eq!(Severity::from_deviation(6.0, 3.0), Severity::Medium);
        assert_eq!(Severity::from_deviation(6.1, 3.0), Severity::High);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_issue_location_is_union_bbox() {
        let issue = QCIssue::new(
            IssueKind::Alignment,
            Severity::Medium,
            "test",
            vec![element(0.0, 0.0), element(100.0, 20.0)],
            1,
        );
        assert_eq!(issue.location.x, 0.0);
        assert_eq!(issue.location.y, 0.0);
        assert_eq!(issue.location.right(), 140.0);
        assert_eq!(issue.location.bottom(), 30.0);
    }

    #[test]
    fn test_issue_display() {
        let issue = QCIssue::new(
            IssueKind::Margin,
            Severity::High,
            "inconsistent left margin",
            vec![element(2.0, 50.0)],
            1,
        );
        let msg = format!("{}", issue);
        assert!(msg.contains("margin/high"));
        assert!(msg.contains("page 1"));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&IssueKind::Typography).unwrap(),
            "\"typography\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::High).unwrap(),
            "\"high\""
        );
    }
}
