//! Error types for page comparison.
//!
//! Uses [`thiserror`] for error derivation. [`DiffError`] covers the three
//! failure classes of a comparison: malformed fragment input, a page that
//! could not be processed, and a comparison that produced no output at all.

use thiserror::Error;

/// Error type for document and page comparison.
///
/// Page numbers are 0-indexed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    /// A fragment or page carries geometry that cannot be defaulted
    /// (non-finite coordinates, negative page height).
    #[error("malformed input on page {page}: {detail}")]
    InputMalformed {
        /// Page the fragment belongs to.
        page: usize,
        /// What was wrong with it.
        detail: String,
    },

    /// The page could not be obtained or compared.
    #[error("failed to process page {page}: {reason}")]
    PageProcessingFailed {
        /// Page that failed.
        page: usize,
        /// Collaborator-reported cause.
        reason: String,
    },

    /// Every page was skipped; the assembled result is empty.
    #[error("no pages were produced for the diff document")]
    NoOutputProduced,
}

impl DiffError {
    /// Create an [`InputMalformed`](DiffError::InputMalformed) error.
    pub fn malformed(page: usize, detail: impl Into<String>) -> Self {
        DiffError::InputMalformed {
            page,
            detail: detail.into(),
        }
    }

    /// Create a [`PageProcessingFailed`](DiffError::PageProcessingFailed) error.
    pub fn page_failed(page: usize, reason: impl Into<String>) -> Self {
        DiffError::PageProcessingFailed {
            page,
            reason: reason.into(),
        }
    }

    /// Re-target a page-scoped error to `page`.
    ///
    /// Used when a helper that only knows the fragments reports an error
    /// that the orchestrator attributes to the page being compared.
    pub fn on_page(self, page: usize) -> Self {
        match self {
            DiffError::InputMalformed { detail, .. } => DiffError::InputMalformed { page, detail },
            DiffError::PageProcessingFailed { reason, .. } => {
                DiffError::PageProcessingFailed { page, reason }
            }
            DiffError::NoOutputProduced => DiffError::NoOutputProduced,
        }
    }
}
