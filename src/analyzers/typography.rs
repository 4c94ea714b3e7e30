//! Typography analysis.
//!
//! Text of a similar role tends to share a font size. Role is approximated
//! by text length (short runs are headings and labels, long runs are body
//! text); within each length bucket the dominant rounded size is the
//! expectation and outliers are flagged. Both an absolute and a relative
//! deviation are required, so rounding noise on small fonts is ignored.
//! Font family recognition is out of scope; only the size is compared.

use crate::config::QcConfig;
use crate::element::{PageLayout, TextElement};
use crate::error::Result;
use crate::issue::{IssueKind, QCIssue, Severity};
use crate::stats;

/// Text shorter than this many characters is "short" (labels, headings).
const SHORT_TEXT_MAX: usize = 10;

/// Text at least this many characters is "long" (body paragraphs).
const LONG_TEXT_MIN: usize = 50;

/// Minimum relative deviation from the dominant size, as a fraction.
const RELATIVE_DEVIATION_MIN: f32 = 0.1;

/// Flags font sizes inconsistent with text of a similar role.
#[derive(Debug, Default)]
pub struct TypographyAnalyzer;

fn length_class(el: &TextElement) -> usize {
    let len = el.text.chars().count();
    if len < SHORT_TEXT_MAX {
        0
    } else if len < LONG_TEXT_MIN {
        1
    } else {
        2
    }
}

impl super::PageAnalyzer for TypographyAnalyzer {
    fn kind(&self) -> IssueKind {
        IssueKind::Typography
    }

    fn analyze(&self, page: &PageLayout, config: &QcConfig) -> Result<Vec<QCIssue>> {
        let mut buckets: [Vec<&TextElement>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for el in &page.elements {
            buckets[length_class(el)].push(el);
        }

        let mut issues = Vec::new();
        for bucket in &buckets {
            if bucket.len() < 2 {
                continue;
            }
            let sizes: Vec<f32> = bucket.iter().map(|el| el.font_size).collect();
            let common = match stats::rounded_mode(&sizes) {
                Some(mode) => mode as f32,
                None => continue,
            };

            for el in bucket {
                let size = el.font_size.round();
                let deviation = (size - common).abs();
                // Both gates must pass: an absolute deviation beyond the
                // tolerance and a relative one beyond 10% of the mode.
                if deviation <= config.font_size_tolerance
                    || deviation / common <= RELATIVE_DEVIATION_MIN
                {
                    continue;
                }
                issues.push(QCIssue::new(
                    IssueKind::Typography,
                    Severity::from_deviation(deviation, config.font_size_tolerance),
                    format!(
                        "Inconsistent font size ({}pt vs common {}pt)",
                        size, common
                    ),
                    vec![(*el).clone()],
                    page.number,
                ));
            }
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::PageAnalyzer;
    use crate::geometry::Rect;

    fn element(text: &str, font_size: f32, y: f32) -> TextElement {
        TextElement::new(text, Rect::new(0.0, y, 100.0, font_size), font_size, 1)
    }

    fn analyze(elements: Vec<TextElement>) -> Vec<QCIssue> {
        TypographyAnalyzer
            .analyze(
                &PageLayout::new(1, 612.0, 792.0, elements),
                &QcConfig::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_size_outlier_flagged_high() {
        // Short bucket, mode 12; the 20pt element deviates 8 > 2 * 2 and
        // 8 / 12 = 67% > 10%.
        let elements: Vec<TextElement> = [12.0, 12.0, 12.0, 12.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, &size)| element("label", size, i as f32 * 20.0))
            .collect();
        let issues = analyze(elements);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::Typography);
        assert_eq!(issues[0].severity, Severity::High);
        assert!(issues[0].description.contains("20"));
        assert!(issues[0].description.contains("12"));
    }

    #[test]
    fn test_small_deviation_not_flagged() {
        // 13 vs mode 12: deviation 1 <= tolerance 2.
        let elements: Vec<TextElement> = [12.0, 12.0, 12.0, 12.0, 13.0]
            .iter()
            .enumerate()
            .map(|(i, &size)| element("label", size, i as f32 * 20.0))
            .collect();
        assert!(analyze(elements).is_empty());
    }

    #[test]
    fn test_relative_gate_spares_large_fonts() {
        // 33 vs mode 30: deviation 3 > tolerance 2, but 3 / 30 = 10% is
        // not above the relative minimum.
        let elements: Vec<TextElement> = [30.0, 30.0, 30.0, 33.0]
            .iter()
            .enumerate()
            .map(|(i, &size)| element("heading", size, i as f32 * 40.0))
            .collect();
        assert!(analyze(elements).is_empty());
    }

    #[test]
    fn test_buckets_judged_independently() {
        // 24pt headings and 11pt body text coexist: different buckets,
        // no cross-bucket comparison.
        let elements = vec![
            element("Title", 24.0, 0.0),
            element("Intro", 24.0, 40.0),
            element(
                "A long body paragraph that easily clears the fifty character minimum.",
                11.0,
                80.0,
            ),
            element(
                "Another long body paragraph that also clears the fifty character minimum.",
                11.0,
                100.0,
            ),
        ];
        assert!(analyze(elements).is_empty());
    }

    #[test]
    fn test_singleton_bucket_skipped() {
        let elements = vec![element("alone", 30.0, 0.0)];
        assert!(analyze(elements).is_empty());
    }

    #[test]
    fn test_medium_severity_band() {
        // Deviation 3 with tolerance 2: above it, not above 4 -> medium.
        let elements: Vec<TextElement> = [12.0, 12.0, 12.0, 15.0]
            .iter()
            .enumerate()
            .map(|(i, &size)| element("label", size, i as f32 * 20.0))
            .collect();
        let issues = analyze(elements);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
    }
}
