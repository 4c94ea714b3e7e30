//! Line spacing analysis.
//!
//! The dominant vertical gap between stacked lines is estimated as the
//! integer-rounded mode over every adjacent pair that plausibly belongs to
//! the same column, then each gap is compared against that mode. Pages
//! with fewer than four usable gaps are skipped outright: a mode over two
//! or three samples says nothing about intent.

use crate::config::QcConfig;
use crate::element::{PageLayout, TextElement};
use crate::error::Result;
use crate::geometry::Rect;
use crate::issue::{IssueKind, QCIssue, Severity};
use crate::stats;

/// Maximum horizontal offset between two elements still treated as the
/// same visual column.
const COLUMN_WINDOW: f32 = 100.0;

/// Gaps at or above this are unrelated blocks, not line spacing.
const MAX_LINE_GAP: f32 = 50.0;

/// Minimum usable gaps before the mode is considered meaningful.
const MIN_SAMPLES: usize = 4;

/// Flags vertical gaps deviating from the page's dominant line spacing.
#[derive(Debug, Default)]
pub struct SpacingAnalyzer;

/// Vertical gap between a pair of vertically adjacent, same-column
/// elements, when the gap is in the usable (0, MAX_LINE_GAP) range.
fn usable_gap(prev: &TextElement, curr: &TextElement) -> Option<f32> {
    if (curr.bbox.x - prev.bbox.x).abs() > COLUMN_WINDOW {
        return None;
    }
    let gap = curr.bbox.y - prev.bbox.bottom();
    if gap > 0.0 && gap < MAX_LINE_GAP {
        Some(gap)
    } else {
        None
    }
}

impl super::PageAnalyzer for SpacingAnalyzer {
    fn kind(&self) -> IssueKind {
        IssueKind::Spacing
    }

    fn analyze(&self, page: &PageLayout, config: &QcConfig) -> Result<Vec<QCIssue>> {
        let mut sorted: Vec<&TextElement> = page.elements.iter().collect();
        sorted.sort_by(|a, b| a.bbox.y.total_cmp(&b.bbox.y));

        let gaps: Vec<f32> = sorted
            .windows(2)
            .filter_map(|pair| usable_gap(pair[0], pair[1]))
            .collect();
        if gaps.len() < MIN_SAMPLES {
            return Ok(Vec::new());
        }
        let common = match stats::rounded_mode(&gaps) {
            Some(mode) => mode as f32,
            None => return Ok(Vec::new()),
        };

        let mut issues = Vec::new();
        for pair in sorted.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            let gap = match usable_gap(prev, curr) {
                Some(gap) => gap,
                None => continue,
            };
            let deviation = (gap - common).abs();
            if deviation <= config.spacing_tolerance {
                continue;
            }

            // The reported region spans from the bottom of the upper
            // element to the top of the lower one.
            let location = Rect::new(
                prev.bbox.x.min(curr.bbox.x),
                prev.bbox.bottom(),
                prev.bbox.width.max(curr.bbox.width),
                gap,
            );
            issues.push(
                QCIssue::new(
                    IssueKind::Spacing,
                    Severity::from_deviation(deviation, config.spacing_tolerance),
                    format!(
                        "Inconsistent spacing between text elements ({} units vs expected {})",
                        gap.round(),
                        common
                    ),
                    vec![prev.clone(), curr.clone()],
                    page.number,
                )
                .with_location(location),
            );
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::PageAnalyzer;

    fn element(x: f32, y: f32) -> TextElement {
        TextElement::new("line of text", Rect::new(x, y, 200.0, 10.0), 12.0, 1)
    }

    /// Elements stacked at x = 0 whose inter-line gaps are `gaps`.
    fn stacked(gaps: &[f32]) -> Vec<TextElement> {
        let mut elements = vec![element(0.0, 0.0)];
        let mut y = 10.0;
        for &gap in gaps {
            y += gap;
            elements.push(element(0.0, y));
            y += 10.0;
        }
        elements
    }

    fn analyze(elements: Vec<TextElement>) -> Vec<QCIssue> {
        SpacingAnalyzer
            .analyze(
                &PageLayout::new(1, 612.0, 792.0, elements),
                &QcConfig::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_outlier_gap_flagged_high() {
        // Mode is 10; the 25 gap deviates by 15 > 2 * 5.
        let issues = analyze(stacked(&[10.0, 10.0, 10.0, 10.0, 25.0]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Spacing);
        assert_eq!(issues[0].severity, Severity::High);
        assert!(issues[0].description.contains("25"));
        assert!(issues[0].description.contains("10"));
    }

    #[test]
    fn test_moderate_deviation_is_medium() {
        // Deviation 8 is above the tolerance 5 but not above 10.
        let issues = analyze(stacked(&[10.0, 10.0, 10.0, 10.0, 18.0]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_uniform_spacing_is_clean() {
        let issues = analyze(stacked(&[12.0, 12.0, 12.0, 12.0, 12.0]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_too_few_samples_never_flagged() {
        // Three gaps with wild variance: below the four-sample minimum.
        let issues = analyze(stacked(&[10.0, 10.0, 40.0]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_distant_columns_do_not_pair() {
        // The outlier line sits 300 units to the right, outside the
        // column window, so its gaps never enter the statistics.
        let mut elements = stacked(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        elements.push(element(300.0, 95.0));
        let issues = analyze(elements);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_huge_gaps_are_not_spacing() {
        // Gaps >= 50 are block separation, not line spacing.
        let issues = analyze(stacked(&[10.0, 10.0, 10.0, 10.0, 80.0]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_location_spans_the_gap() {
        let issues = analyze(stacked(&[10.0, 10.0, 10.0, 10.0, 25.0]));
        let loc = issues[0].location;
        // The flagged pair: prev bottom at 10 + 4*(10+10) = 90, gap 25.
        assert_eq!(loc.y, 90.0);
        assert_eq!(loc.height, 25.0);
        assert_eq!(loc.x, 0.0);
        assert_eq!(loc.width, 200.0);
    }
}
