//! The layout extraction boundary.
//!
//! PDF byte-stream parsing and page rendering live outside this crate.
//! A `LayoutSource` is whatever reader the caller has — it only needs to
//! hand over positioned text runs per page. Results are materialized
//! before analysis starts; the core never holds state across this
//! boundary.

use crate::element::PageLayout;
use crate::error::Result;

/// External collaborator that supplies per-page positioned text.
pub trait LayoutSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract the layout of one 1-based page.
    fn extract_layout(&self, page: u32) -> Result<PageLayout>;

    /// Page dimensions to substitute when a page fails to extract, so the
    /// degraded page still participates in pagination. US Letter at 72dpi
    /// by default.
    fn fallback_page_size(&self) -> (f32, f32) {
        (612.0, 792.0)
    }
}

/// Materialize every page of a source, tolerating per-page failures.
///
/// A page the source cannot extract becomes an empty page: the document
/// keeps its page count, the analyzers skip the gap, and the failure is
/// logged rather than propagated. If *every* page fails or is empty, the
/// document analyzer will classify the result as image-based downstream.
pub fn collect_pages<S: LayoutSource>(source: &S) -> Vec<PageLayout> {
    let (width, height) = source.fallback_page_size();
    (1..=source.page_count() as u32)
        .map(|number| match source.extract_layout(number) {
            Ok(page) => page,
            Err(err) => {
                log::warn!("layout extraction failed for page {}: {}", number, err);
                PageLayout::empty(number, width, height)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextElement;
    use crate::error::Error;
    use crate::geometry::Rect;

    struct FlakySource;

    impl LayoutSource for FlakySource {
        fn page_count(&self) -> usize {
            3
        }

        fn extract_layout(&self, page: u32) -> Result<PageLayout> {
            if page == 2 {
                return Err(Error::Extraction {
                    page,
                    reason: "corrupt content stream".to_string(),
                });
            }
            Ok(PageLayout::new(
                page,
                612.0,
                792.0,
                vec![TextElement::new(
                    "ok",
                    Rect::new(10.0, 10.0, 20.0, 12.0),
                    12.0,
                    page,
                )],
            ))
        }
    }

    #[test]
    fn test_failed_page_becomes_empty() {
        let pages = collect_pages(&FlakySource);
        assert_eq!(pages.len(), 3);
        assert!(!pages[0].is_empty());
        assert!(pages[1].is_empty());
        assert_eq!(pages[1].number, 2);
        assert!(!pages[2].is_empty());
    }
}
