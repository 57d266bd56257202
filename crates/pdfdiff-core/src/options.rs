//! Options controlling normalization, matching and classification.

use crate::unicode_norm::UnicodeNorm;

/// How the extractor's vertical anchor maps onto the canonical bottom-up frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum YAxis {
    /// Use the reported anchor unchanged (default).
    ///
    /// Text-matrix anchors reported by common extractors already sit in the
    /// page's native bottom-up space; flipping them moves highlights by
    /// roughly one page height.
    #[default]
    AsReported,
    /// The extractor reports top-down anchors; use `page_height - y`.
    FlipTopDown,
}

/// Options for comparing two versions of a page.
///
/// All distances are in page units (PDF points for PDF input).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiffOptions {
    /// Matching search radius. Candidates are accepted below twice this
    /// distance (default: 15.0).
    pub tolerance: f64,
    /// Vertical slack within which fragments share a reading-order row
    /// (default: 5.0).
    pub row_slack: f64,
    /// Cost added per position of reading-order displacement between two
    /// candidates (default: 10.0).
    pub order_weight: f64,
    /// Matched fraction of each side at or above which a fully matched page
    /// emits no regions (default: 0.98).
    pub coverage_threshold: f64,
    /// Anchor epsilon used to deduplicate modified pairs (default: 1.0).
    pub dedup_epsilon: f64,
    /// Minimum fragment width (default: 20.0).
    pub min_width: f64,
    /// Minimum fragment height (default: 10.0).
    pub min_height: f64,
    /// Glyph width used to estimate an unreported fragment width from its
    /// character count (default: 6.0).
    pub glyph_width: f64,
    /// Width used when no estimate is possible (default: 20.0).
    pub fallback_width: f64,
    /// Height used when neither height nor vertical scale is reported
    /// (default: 12.0).
    pub fallback_height: f64,
    /// Vertical anchor convention of the input (default: [`YAxis::AsReported`]).
    pub y_axis: YAxis,
    /// Unicode normalization applied to fragment text (default: none).
    pub unicode_norm: UnicodeNorm,
    /// When true, the combined distance-plus-order cost must itself stay
    /// below twice the tolerance for a match to commit (default: false).
    pub gate_on_order_cost: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            tolerance: 15.0,
            row_slack: 5.0,
            order_weight: 10.0,
            coverage_threshold: 0.98,
            dedup_epsilon: 1.0,
            min_width: 20.0,
            min_height: 10.0,
            glyph_width: 6.0,
            fallback_width: 20.0,
            fallback_height: 12.0,
            y_axis: YAxis::AsReported,
            unicode_norm: UnicodeNorm::None,
            gate_on_order_cost: false,
        }
    }
}

impl DiffOptions {
    /// Options with a custom matching tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Straight-line distance below which two fragments may correspond.
    pub fn acceptance_radius(&self) -> f64 {
        self.tolerance * 2.0
    }
}
