//! Analysis configuration.
//!
//! The four tolerances mirror the user-adjustable sliders of the
//! surrounding application; everything else (band size, column window,
//! sample minimums) is an internal constant of its analyzer.

/// Tolerances for the visual quality-control analyzers.
#[derive(Debug, Clone, PartialEq)]
pub struct QcConfig {
    /// Coordinate spread beyond which a band counts as misaligned (units).
    pub alignment_tolerance: f32,
    /// Deviation from the dominant line gap beyond which spacing is
    /// inconsistent (units).
    pub spacing_tolerance: f32,
    /// Distance from a page edge within which an element is a margin
    /// candidate (units).
    pub margin_threshold: f32,
    /// Font size deviation from the bucket's dominant size beyond which
    /// typography is inconsistent (points).
    pub font_size_tolerance: f32,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl QcConfig {
    /// Create a configuration with the default tolerances.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_qc::config::QcConfig;
    ///
    /// let config = QcConfig::new();
    /// assert_eq!(config.alignment_tolerance, 3.0);
    /// assert_eq!(config.margin_threshold, 20.0);
    /// ```
    pub fn new() -> Self {
        Self {
            alignment_tolerance: 3.0,
            spacing_tolerance: 5.0,
            margin_threshold: 20.0,
            font_size_tolerance: 2.0,
        }
    }

    /// Set the alignment tolerance.
    pub fn with_alignment_tolerance(mut self, tolerance: f32) -> Self {
        self.alignment_tolerance = tolerance;
        self
    }

    /// Set the spacing tolerance.
    pub fn with_spacing_tolerance(mut self, tolerance: f32) -> Self {
        self.spacing_tolerance = tolerance;
        self
    }

    /// Set the margin threshold.
    pub fn with_margin_threshold(mut self, threshold: f32) -> Self {
        self.margin_threshold = threshold;
        self
    }

    /// Set the font size tolerance.
    pub fn with_font_size_tolerance(mut self, tolerance: f32) -> Self {
        self.font_size_tolerance = tolerance;
        self
    }
}
