//! Per-page visual quality-control analyzers.
//!
//! Each analyzer is a pure, bounded computation over one page's text
//! elements: it infers which elements *should* align, be evenly spaced,
//! share a margin, or share a font size, and flags statistically-deviant
//! outliers. Analyzers never see other pages and never mutate their input.

pub mod alignment;
pub mod margin;
pub mod spacing;
pub mod typography;

pub use alignment::AlignmentAnalyzer;
pub use margin::MarginAnalyzer;
pub use spacing::SpacingAnalyzer;
pub use typography::TypographyAnalyzer;

use crate::config::QcConfig;
use crate::element::PageLayout;
use crate::error::Result;
use crate::issue::{IssueKind, QCIssue};

/// One visual quality-control check over a single page.
///
/// Implementations must be pure functions of the page and configuration:
/// the aggregator relies on that for idempotent reports. A returned error
/// costs only this analyzer's contribution for this page; the aggregator
/// logs it and moves on.
pub trait PageAnalyzer: Send + Sync {
    /// The kind of issue this analyzer emits.
    fn kind(&self) -> IssueKind;

    /// Analyze one page and return its issues.
    fn analyze(&self, page: &PageLayout, config: &QcConfig) -> Result<Vec<QCIssue>>;
}

/// The four built-in analyzers in the fixed reporting order:
/// alignment, spacing, margin, typography.
pub fn default_analyzers() -> Vec<Box<dyn PageAnalyzer>> {
    vec![
        Box::new(AlignmentAnalyzer),
        Box::new(SpacingAnalyzer),
        Box::new(MarginAnalyzer),
        Box::new(TypographyAnalyzer),
    ]
}
