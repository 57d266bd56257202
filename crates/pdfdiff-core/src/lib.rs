//! pdfdiff-core: positional text diff between two versions of a document.
//!
//! The engine consumes, per page and per version, the text fragments an
//! extractor reported (a string plus an anchor and extent) and produces a
//! geometrically located description of what was removed, added or
//! changed. It performs no PDF parsing, retrieval or authoring itself.
//!
//! # Pipeline
//!
//! - [`normalize`]: raw fragments to boxes in one bottom-up frame
//! - [`matcher`]: greedy text-equal matching with a reading-order tie-break
//! - [`classify`]: deleted / added / modified regions
//! - [`page`]: per-page decisions over two whole documents
//! - [`plan`]: the output document described as pages and overlays
//!
//! ```
//! use pdfdiff_core::{DiffOptions, PageDecision, PageText, TextFragment, compare_page};
//!
//! let old = PageText::new(612.0, 792.0, vec![TextFragment::new("2014", 100.0, 50.0, 24.0, 12.0)]);
//! let new = PageText::new(612.0, 792.0, vec![TextFragment::new("2015", 100.0, 50.0, 24.0, 12.0)]);
//!
//! match compare_page(Some(&old), Some(&new), &DiffOptions::default()).unwrap() {
//!     PageDecision::Differs(diff) => assert_eq!(diff.modified.len(), 1),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod classify;
pub mod error;
pub mod fragment;
pub mod geometry;
pub mod matcher;
pub mod normalize;
pub mod options;
pub mod page;
pub mod plan;
pub mod unicode_norm;

pub use classify::{DiffResult, classify, diff_page, joined_text};
pub use error::DiffError;
pub use fragment::{
    DocumentText, PageText, TextFragment, collapse_whitespace, is_text_whitespace, trim_text,
};
pub use geometry::{PageSize, Region, RegionPair, anchor_distance};
pub use matcher::{MatchState, match_fragments, reading_order};
pub use normalize::{NormalizedBox, normalize, normalize_page};
pub use options::{DiffOptions, YAxis};
#[cfg(feature = "parallel")]
pub use page::compare_pages_parallel;
pub use page::{
    DocumentDiff, PageDecision, PageDiff, PageSource, Version, compare_documents, compare_page,
};
pub use plan::{HighlightPlan, Overlay, PlanStyle, PlannedPage, Rgb};
pub use unicode_norm::UnicodeNorm;
