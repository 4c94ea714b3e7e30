//! # PDF QC
//!
//! Layout quality-control for PDF documents: detects visual
//! inconsistencies in positioned text and produces structured,
//! deterministic reports.
//!
//! ## Checks
//!
//! - **Alignment**: elements sharing an edge band that drift apart
//! - **Spacing**: vertical gaps that deviate from the dominant line gap
//! - **Margin**: elements unusually close to the page edges
//! - **Typography**: font sizes inconsistent with text of a similar role
//!
//! Analysis is pure: the same pages under the same configuration always
//! yield the same report, issue for issue. Documents with no extractable
//! text are classified as image-based rather than failing.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_qc::config::QcConfig;
//! use pdf_qc::document::DocumentAnalyzer;
//! use pdf_qc::element::{PageLayout, TextElement};
//! use pdf_qc::geometry::Rect;
//!
//! let page = PageLayout::new(
//!     1,
//!     612.0,
//!     792.0,
//!     vec![
//!         TextElement::new("heading", Rect::new(40.0, 60.0, 200.0, 18.0), 18.0, 1),
//!         TextElement::new("body", Rect::new(40.0, 100.0, 400.0, 12.0), 12.0, 1),
//!     ],
//! );
//!
//! let analyzer = DocumentAnalyzer::new(QcConfig::default());
//! let report = analyzer.analyze(&[page]);
//! println!("{} issues", report.summary.total_issues);
//! ```
//!
//! PDF parsing is out of scope: implement [`extract::LayoutSource`] over
//! whatever reader produces positioned text, or build [`element::PageLayout`]
//! values directly. Textual checks (spelling, grammar, style rules) live in
//! [`text_qc`] behind the same collaborator pattern.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry primitives
pub mod geometry;

// Input model
pub mod config;
pub mod element;
pub mod extract;

// Visual analysis
pub mod analyzers;
pub mod stats;

// Results
pub mod issue;
pub mod report;

// Orchestration
pub mod cache;
pub mod document;

// Textual analysis
pub mod text_qc;

pub use analyzers::{
    AlignmentAnalyzer, MarginAnalyzer, PageAnalyzer, SpacingAnalyzer, TypographyAnalyzer,
};
pub use config::QcConfig;
pub use document::DocumentAnalyzer;
pub use element::{PageLayout, TextElement};
pub use error::{Error, Result};
pub use issue::{IssueKind, QCIssue, Severity};
pub use report::{AnalysisSummary, DocumentReport, FileType};
