//! Positioned text elements and per-page layout input.
//!
//! `TextElement` is the contract with the external layout extraction
//! collaborator: one trimmed, non-empty run of text with its bounding box
//! and the font size derived from the rendering transform. Elements are
//! immutable once received and owned by the analysis pass that consumes
//! them.

use crate::geometry::Rect;

/// One positioned run of text on one page.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextElement {
    /// The text content, already trimmed and non-empty.
    pub text: String,
    /// Bounding box in page-viewport coordinates (y from the top).
    pub bbox: Rect,
    /// Font size in points, derived from the rendering transform.
    pub font_size: f32,
    /// Font name as reported by the reader. Family recognition is out of
    /// scope; this is carried through verbatim when present.
    pub font_name: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(text: impl Into<String>, bbox: Rect, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
            font_name: None,
            page,
        }
    }

    /// Set the reported font name.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Check the input contract: non-empty text, non-negative extent,
    /// positive font size, 1-based page.
    ///
    /// Elements failing this are skipped by the aggregator rather than
    /// aborting the page.
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("empty text".to_string());
        }
        if self.bbox.width < 0.0 || self.bbox.height < 0.0 {
            return Err(format!(
                "negative extent {}x{}",
                self.bbox.width, self.bbox.height
            ));
        }
        if self.font_size <= 0.0 {
            return Err(format!("non-positive font size {}", self.font_size));
        }
        if self.page == 0 {
            return Err("page numbers are 1-based".to_string());
        }
        Ok(())
    }
}

/// All positioned text on one page, plus the page dimensions the margin
/// analyzer needs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: u32,
    /// Page width in viewport units.
    pub width: f32,
    /// Page height in viewport units.
    pub height: f32,
    /// Text elements in extraction order.
    pub elements: Vec<TextElement>,
}

impl PageLayout {
    /// Create a page layout.
    pub fn new(number: u32, width: f32, height: f32, elements: Vec<TextElement>) -> Self {
        Self {
            number,
            width,
            height,
            elements,
        }
    }

    /// A page with no extractable text (scanned/image-only page).
    pub fn empty(number: u32, width: f32, height: f32) -> Self {
        Self::new(number, width, height, Vec::new())
    }

    /// Whether the page carries any text at all.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
