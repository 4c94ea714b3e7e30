//! Analysis reports and summaries.
//!
//! `AnalysisSummary` is always derived from the issue list; it is never a
//! separately maintained counter, so a recount must reproduce it exactly.

use std::collections::BTreeMap;
use std::fmt;

use crate::issue::{IssueKind, QCIssue, Severity};

/// How the document was classified for analysis purposes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum FileType {
    /// At least one page carried extractable text.
    #[serde(rename = "text-based")]
    TextBased,
    /// No page carried extractable text; the analyzers are skipped and the
    /// report carries an explanatory note instead of issues.
    #[serde(rename = "image-based")]
    ImageBased,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::TextBased => write!(f, "text-based"),
            FileType::ImageBased => write!(f, "image-based"),
        }
    }
}

/// Aggregate issue counts, derived from the issue list.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AnalysisSummary {
    /// Total number of issues.
    pub total_issues: usize,
    /// Issue count per kind.
    pub by_kind: BTreeMap<IssueKind, usize>,
    /// Issue count per severity.
    pub by_severity: BTreeMap<Severity, usize>,
    /// Issue count per page.
    pub by_page: BTreeMap<u32, usize>,
}

impl AnalysisSummary {
    /// Count the issues in `issues`. This is the only way a summary is
    /// produced, so `total_issues == sum(by_kind) == sum(by_severity)`
    /// holds by construction.
    pub fn from_issues(issues: &[QCIssue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            summary.total_issues += 1;
            *summary.by_kind.entry(issue.kind).or_insert(0) += 1;
            *summary.by_severity.entry(issue.severity).or_insert(0) += 1;
            *summary.by_page.entry(issue.page).or_insert(0) += 1;
        }
        summary
    }
}

/// The result of analyzing one document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentReport {
    /// All detected issues: pages ascending, and within a page in the
    /// fixed analyzer order (alignment, spacing, margin, typography).
    pub issues: Vec<QCIssue>,
    /// Counts derived from `issues`.
    pub summary: AnalysisSummary,
    /// Number of pages analyzed.
    pub page_count: usize,
    /// Whether any text was available.
    pub file_type: FileType,
    /// Explanatory note for degraded modes (image-based documents).
    pub note: Option<String>,
}

impl DocumentReport {
    /// Build a report from a final, ordered issue list.
    pub fn new(issues: Vec<QCIssue>, page_count: usize, file_type: FileType) -> Self {
        let summary = AnalysisSummary::from_issues(&issues);
        Self {
            issues,
            summary,
            page_count,
            file_type,
            note: None,
        }
    }

    /// Attach an explanatory note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The issues detected on one page, in reporting order.
    pub fn issues_for_page(&self, page: u32) -> impl Iterator<Item = &QCIssue> {
        self.issues.iter().filter(move |issue| issue.page == page)
    }
}
