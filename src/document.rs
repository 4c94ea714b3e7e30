//! Document-level analysis: runs every analyzer over every page and
//! aggregates the results into one report.
//!
//! Ordering is imposed here, not in the analyzers: pages ascending, and
//! within a page the fixed order alignment, spacing, margin, typography.
//! A failing analyzer costs exactly its own contribution for that page;
//! a malformed element costs exactly itself. The only hard failure lives
//! in [`DocumentAnalyzer::analyze_required`].

use crate::analyzers::{self, PageAnalyzer};
use crate::config::QcConfig;
use crate::element::PageLayout;
use crate::error::{Error, Result};
use crate::issue::QCIssue;
use crate::report::{DocumentReport, FileType};

/// Note attached to reports for documents with no extractable text.
const IMAGE_BASED_NOTE: &str =
    "No text layout could be extracted from any page; the document appears to be \
     image-based (scanned). Visual analysis was skipped.";

/// Runs the visual quality-control analyzers over a document.
pub struct DocumentAnalyzer {
    config: QcConfig,
    analyzers: Vec<Box<dyn PageAnalyzer>>,
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new(QcConfig::default())
    }
}

impl DocumentAnalyzer {
    /// Create an analyzer with the four built-in checks.
    pub fn new(config: QcConfig) -> Self {
        Self {
            config,
            analyzers: analyzers::default_analyzers(),
        }
    }

    /// Create an analyzer with a custom check list. The reporting order
    /// within a page follows the order given here.
    pub fn with_analyzers(config: QcConfig, analyzers: Vec<Box<dyn PageAnalyzer>>) -> Self {
        Self { config, analyzers }
    }

    /// The active configuration.
    pub fn config(&self) -> &QcConfig {
        &self.config
    }

    /// Analyze a document. Never fails: extraction gaps and analyzer
    /// errors degrade to fewer issues or an image-based classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_qc::config::QcConfig;
    /// use pdf_qc::document::DocumentAnalyzer;
    /// use pdf_qc::element::PageLayout;
    /// use pdf_qc::report::FileType;
    ///
    /// let analyzer = DocumentAnalyzer::new(QcConfig::default());
    /// let report = analyzer.analyze(&[PageLayout::empty(1, 612.0, 792.0)]);
    /// assert_eq!(report.file_type, FileType::ImageBased);
    /// assert!(report.issues.is_empty());
    /// ```
    pub fn analyze(&self, pages: &[PageLayout]) -> DocumentReport {
        if pages.iter().all(|page| page.is_empty()) {
            return DocumentReport::new(Vec::new(), pages.len(), FileType::ImageBased)
                .with_note(IMAGE_BASED_NOTE);
        }

        let mut ordered: Vec<&PageLayout> = pages.iter().collect();
        ordered.sort_by_key(|page| page.number);

        let mut issues = Vec::new();
        for page in ordered {
            let page = self.sanitize(page);
            for analyzer in &self.analyzers {
                match analyzer.analyze(&page, &self.config) {
                    Ok(found) => issues.extend(found),
                    Err(err) => {
                        // Partial-result policy: one bad analyzer or page
                        // must not abort the document.
                        log::warn!(
                            "{} analyzer failed on page {}, skipping its results: {}",
                            analyzer.kind(),
                            page.number,
                            err
                        );
                    }
                }
            }
        }

        DocumentReport::new(issues, pages.len(), FileType::TextBased)
    }

    /// Analyze a document the caller requires to be text-based.
    ///
    /// Returns [`Error::ExtractionUnavailable`] when no page carries any
    /// text; otherwise identical to [`Self::analyze`].
    pub fn analyze_required(&self, pages: &[PageLayout]) -> Result<DocumentReport> {
        if pages.iter().all(|page| page.is_empty()) {
            return Err(Error::ExtractionUnavailable);
        }
        Ok(self.analyze(pages))
    }

    /// Drop malformed elements before the analyzers see them.
    fn sanitize(&self, page: &PageLayout) -> PageLayout {
        let elements = page
            .elements
            .iter()
            .filter(|el| match el.validate() {
                Ok(()) => true,
                Err(reason) => {
                    log::debug!(
                        "skipping invalid element on page {}: {}",
                        page.number,
                        reason
                    );
                    false
                }
            })
            .cloned()
            .collect();
        PageLayout::new(page.number, page.width, page.height, elements)
    }
}

/// Collect issues for every element of `issues` that belongs to `kind`.
///
/// Convenience for callers presenting results grouped by check.
pub fn issues_of_kind<'a>(
    issues: &'a [QCIssue],
    kind: crate::issue::IssueKind,
) -> impl Iterator<Item = &'a QCIssue> {
    issues.iter().filter(move |issue| issue.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextElement;
    use crate::error::Error;
    use crate::geometry::Rect;
    use crate::issue::{IssueKind, Severity};

    fn element(text: &str, x: f32, y: f32, font_size: f32, page: u32) -> TextElement {
        TextElement::new(text, Rect::new(x, y, 100.0, font_size), font_size, page)
    }

    fn text_page(number: u32) -> PageLayout {
        PageLayout::new(
            number,
            612.0,
            792.0,
            vec![element("hello world", 40.0, 100.0, 12.0, number)],
        )
    }

    #[test]
    fn test_image_based_document() {
        let analyzer = DocumentAnalyzer::default();
        let pages = vec![
            PageLayout::empty(1, 612.0, 792.0),
            PageLayout::empty(2, 612.0, 792.0),
        ];
        let report = analyzer.analyze(&pages);
        assert_eq!(report.file_type, FileType::ImageBased);
        assert!(report.issues.is_empty());
        assert_eq!(report.page_count, 2);
        assert!(report.note.is_some());
        assert_eq!(report.summary.total_issues, 0);
    }

    #[test]
    fn test_partially_empty_document_is_text_based() {
        let analyzer = DocumentAnalyzer::default();
        let pages = vec![PageLayout::empty(1, 612.0, 792.0), text_page(2)];
        let report = analyzer.analyze(&pages);
        assert_eq!(report.file_type, FileType::TextBased);
        assert!(report.note.is_none());
    }

    #[test]
    fn test_analyze_required_hard_failure() {
        let analyzer = DocumentAnalyzer::default();
        let pages = vec![PageLayout::empty(1, 612.0, 792.0)];
        match analyzer.analyze_required(&pages) {
            Err(Error::ExtractionUnavailable) => {}
            other => panic!("expected ExtractionUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_analyze_required_passes_through() {
        let analyzer = DocumentAnalyzer::default();
        let report = analyzer.analyze_required(&[text_page(1)]).unwrap();
        assert_eq!(report.file_type, FileType::TextBased);
    }

    #[test]
    fn test_invalid_elements_skipped_not_fatal() {
        let analyzer = DocumentAnalyzer::default();
        let mut bad = element("broken", 40.0, 120.0, 0.0, 1);
        bad.bbox.width = -5.0;
        let pages = vec![PageLayout::new(
            1,
            612.0,
            792.0,
            vec![element("hello world", 40.0, 100.0, 12.0, 1), bad],
        )];
        let report = analyzer.analyze(&pages);
        assert_eq!(report.file_type, FileType::TextBased);
        // The invalid element contributes nothing, including to margins.
        assert_eq!(report.summary.total_issues, 0);
    }

    struct FailingAnalyzer;

    impl PageAnalyzer for FailingAnalyzer {
        fn kind(&self) -> IssueKind {
            IssueKind::Spacing
        }

        fn analyze(&self, page: &PageLayout, _config: &QcConfig) -> crate::error::Result<Vec<QCIssue>> {
            Err(Error::Analyzer {
                kind: IssueKind::Spacing,
                page: page.number,
                reason: "synthetic failure".to_string(),
            })
        }
    }

    struct FixedIssueAnalyzer(IssueKind);

    impl PageAnalyzer for FixedIssueAnalyzer {
        fn kind(&self) -> IssueKind {
            self.0
        }

        fn analyze(&self, page: &PageLayout, _config: &QcConfig) -> crate::error::Result<Vec<QCIssue>> {
            Ok(vec![QCIssue::new(
                self.0,
                Severity::Medium,
                "synthetic issue",
                page.elements.clone(),
                page.number,
            )])
        }
    }

    #[test]
    fn test_failing_analyzer_swallowed() {
        let analyzer = DocumentAnalyzer::with_analyzers(
            QcConfig::default(),
            vec![
                Box::new(FixedIssueAnalyzer(IssueKind::Alignment)),
                Box::new(FailingAnalyzer),
                Box::new(FixedIssueAnalyzer(IssueKind::Margin)),
            ],
        );
        let report = analyzer.analyze(&[text_page(1)]);
        // The failure costs only the failing analyzer's contribution.
        assert_eq!(report.summary.total_issues, 2);
        assert_eq!(report.summary.by_kind[&IssueKind::Alignment], 1);
        assert_eq!(report.summary.by_kind[&IssueKind::Margin], 1);
    }

    #[test]
    fn test_pages_reported_ascending() {
        let analyzer = DocumentAnalyzer::with_analyzers(
            QcConfig::default(),
            vec![Box::new(FixedIssueAnalyzer(IssueKind::Alignment))],
        );
        // Pages supplied out of order.
        let report = analyzer.analyze(&[text_page(3), text_page(1), text_page(2)]);
        let pages: Vec<u32> = report.issues.iter().map(|issue| issue.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_idempotent_reports() {
        let analyzer = DocumentAnalyzer::default();
        let pages = vec![PageLayout::new(
            1,
            612.0,
            792.0,
            vec![
                element("first line", 0.0, 0.0, 12.0, 1),
                element("second line", 0.0, 22.0, 12.0, 1),
                element("third line", 0.0, 44.0, 12.0, 1),
                element("fourth line", 0.0, 66.0, 12.0, 1),
                element("fifth line", 0.0, 88.0, 12.0, 1),
                element("stray line", 0.0, 135.0, 20.0, 1),
            ],
        )];
        let first = analyzer.analyze(&pages);
        let second = analyzer.analyze(&pages);
        assert_eq!(first, second);
    }

    #[test]
    fn test_issues_of_kind_filter() {
        let issues = vec![
            QCIssue::new(
                IssueKind::Margin,
                Severity::High,
                "a",
                vec![element("x", 0.0, 0.0, 12.0, 1)],
                1,
            ),
            QCIssue::new(
                IssueKind::Spacing,
                Severity::Medium,
                "b",
                vec![element("y", 0.0, 20.0, 12.0, 1)],
                1,
            ),
        ];
        assert_eq!(issues_of_kind(&issues, IssueKind::Margin).count(), 1);
        assert_eq!(issues_of_kind(&issues, IssueKind::Typography).count(), 0);
    }
}
