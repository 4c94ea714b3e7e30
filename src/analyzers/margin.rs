//! Margin analysis.
//!
//! A margin is only wrong relative to the convention the rest of the page
//! establishes: a page set entirely at a 5-unit margin is fine, but one
//! element at 5 units among others at 40 is an outlier. Each edge is
//! checked independently; an element close to an edge is flagged only when
//! no other element sits at a comparable offset.

use crate::config::QcConfig;
use crate::element::{PageLayout, TextElement};
use crate::error::Result;
use crate::geometry::Rect;
use crate::issue::{IssueKind, QCIssue, Severity};

/// Flags elements whose edge offset is unique on the page.
#[derive(Debug, Default)]
pub struct MarginAnalyzer;

fn right_offset(el: &TextElement, page_width: f32) -> f32 {
    page_width - el.bbox.right()
}

impl super::PageAnalyzer for MarginAnalyzer {
    fn kind(&self) -> IssueKind {
        IssueKind::Margin
    }

    fn analyze(&self, page: &PageLayout, config: &QcConfig) -> Result<Vec<QCIssue>> {
        let threshold = config.margin_threshold;
        let similarity = threshold / 2.0;
        let mut issues = Vec::new();

        for (i, el) in page.elements.iter().enumerate() {
            // Left edge.
            let left = el.bbox.x;
            if left < threshold {
                let has_peer = page
                    .elements
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != i && (other.bbox.x - left).abs() <= similarity);
                if !has_peer {
                    let severity = if left < similarity {
                        Severity::High
                    } else {
                        Severity::Medium
                    };
                    issues.push(
                        QCIssue::new(
                            IssueKind::Margin,
                            severity,
                            format!(
                                "Inconsistent left margin ({} units from edge)",
                                left.round()
                            ),
                            vec![el.clone()],
                            page.number,
                        )
                        .with_location(Rect::new(
                            0.0,
                            el.bbox.y,
                            el.bbox.right(),
                            el.bbox.height,
                        )),
                    );
                }
            }

            // Right edge, mirrored against the page width.
            let right = right_offset(el, page.width);
            if right < threshold {
                let has_peer = page.elements.iter().enumerate().any(|(j, other)| {
                    j != i && (right_offset(other, page.width) - right).abs() <= similarity
                });
                if !has_peer {
                    let severity = if right < similarity {
                        Severity::High
                    } else {
                        Severity::Medium
                    };
                    issues.push(
                        QCIssue::new(
                            IssueKind::Margin,
                            severity,
                            format!(
                                "Inconsistent right margin ({} units from edge)",
                                right.round()
                            ),
                            vec![el.clone()],
                            page.number,
                        )
                        .with_location(Rect::new(
                            el.bbox.x,
                            el.bbox.y,
                            page.width - el.bbox.x,
                            el.bbox.height,
                        )),
                    );
                }
            }
        }
        Ok(issues)
    }
}
