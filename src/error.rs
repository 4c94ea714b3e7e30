//! Error types for quality-control analysis.
//!
//! Almost everything degrades gracefully: a failing analyzer or a malformed
//! element costs at most that analyzer's contribution for that page. The
//! variants here exist so boundaries can report *why* something was dropped,
//! and so `analyze_required` has a hard failure to return.

use crate::issue::IssueKind;

/// Result type alias for quality-control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document analysis.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No page yielded any usable text element. Only surfaced as a hard
    /// failure when the caller explicitly requires text-based analysis;
    /// otherwise the document is classified as image-based.
    #[error("no text layout available for any page")]
    ExtractionUnavailable,

    /// One analyzer failed on one page. Swallowed and logged at the
    /// aggregator boundary; never aborts the document.
    #[error("{kind} analyzer failed on page {page}: {reason}")]
    Analyzer {
        /// Which analyzer failed
        kind: IssueKind,
        /// Page being analyzed
        page: u32,
        /// Reason for the failure
        reason: String,
    },

    /// A malformed text element (empty text, negative extent, or
    /// non-positive font size). Skipped, never fatal for the page.
    #[error("invalid text element on page {page}: {reason}")]
    InvalidElement {
        /// Page the element claims to belong to
        page: u32,
        /// What made the element invalid
        reason: String,
    },

    /// The layout extraction collaborator failed for a page.
    #[error("layout extraction failed for page {page}: {reason}")]
    Extraction {
        /// Page that could not be extracted
        page: u32,
        /// Reason reported by the collaborator
        reason: String,
    },

    /// The external text-issue provider failed.
    #[error("text issue provider failed: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_error_display() {
        let err = Error::Analyzer {
            kind: IssueKind::Spacing,
            page: 3,
            reason: "boom".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("spacing"));
        assert!(msg.contains("page 3"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
