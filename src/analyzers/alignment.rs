//! Alignment analysis.
//!
//! Elements intended to share a baseline or a column are found by
//! quantizing coordinates into bands: elements whose y (or x) rounds into
//! the same 5-unit band are assumed to belong together, and the band is
//! flagged when its actual coordinate spread exceeds the tolerance. The
//! quantize-then-spread heuristic avoids needing the document's intended
//! grid; 5-unit bands trade false positives against missed misalignments.

use std::collections::BTreeMap;

use crate::config::QcConfig;
use crate::element::{PageLayout, TextElement};
use crate::error::Result;
use crate::issue::{IssueKind, QCIssue, Severity};
use crate::stats;

/// Width of a quantization band, in page units.
const BAND_SIZE: f32 = 5.0;

/// Flags coordinate bands whose members drift beyond the tolerance.
#[derive(Debug, Default)]
pub struct AlignmentAnalyzer;

/// Which coordinate a band groups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Shared baseline: grouped by y, spread measured on y.
    Horizontal,
    /// Shared column: grouped by x, spread measured on x.
    Vertical,
}

impl AlignmentAnalyzer {
    fn band_issues(&self, page: &PageLayout, axis: Axis, config: &QcConfig) -> Vec<QCIssue> {
        // BTreeMap iterates bands in ascending coordinate order, so issue
        // order is stable for identical inputs.
        let mut bands: BTreeMap<i64, Vec<&TextElement>> = BTreeMap::new();
        for el in &page.elements {
            let coord = match axis {
                Axis::Horizontal => el.bbox.y,
                Axis::Vertical => el.bbox.x,
            };
            let key = ((coord / BAND_SIZE).round() * BAND_SIZE) as i64;
            bands.entry(key).or_default().push(el);
        }

        let mut issues = Vec::new();
        for group in bands.values() {
            // Singletons have no alignment peer to compare against.
            if group.len() < 2 {
                continue;
            }

            let coords: Vec<f32> = group
                .iter()
                .map(|el| match axis {
                    Axis::Horizontal => el.bbox.y,
                    Axis::Vertical => el.bbox.x,
                })
                .collect();
            let spread = stats::spread(&coords);
            if spread <= config.alignment_tolerance {
                continue;
            }

            let direction = match axis {
                Axis::Horizontal => "horizontal",
                Axis::Vertical => "vertical",
            };
            issues.push(QCIssue::new(
                IssueKind::Alignment,
                Severity::from_deviation(spread, config.alignment_tolerance),
                format!(
                    "Inconsistent {} alignment of text ({} unit difference)",
                    direction,
                    spread.round()
                ),
                group.iter().map(|el| (*el).clone()).collect(),
                page.number,
            ));
        }
        issues
    }
}

impl super::PageAnalyzer for AlignmentAnalyzer {
    fn kind(&self) -> IssueKind {
        IssueKind::Alignment
    }

    fn analyze(&self, page: &PageLayout, config: &QcConfig) -> Result<Vec<QCIssue>> {
        let mut issues = self.band_issues(page, Axis::Horizontal, config);
        issues.extend(self.band_issues(page, Axis::Vertical, config));
        Ok(issues)
    }
}
