//! Page-by-page orchestration of a document comparison.
//!
//! Decides for every page index whether the page exists in only one
//! version, has identical text in both, or needs a fragment-level diff.
//! A failure on one page is recorded on that page and never aborts the
//! rest of the comparison.

use std::borrow::Cow;

use crate::classify::{DiffResult, diff_page};
use crate::error::DiffError;
use crate::fragment::{DocumentText, PageText};
use crate::geometry::PageSize;
use crate::normalize::normalize_page;
use crate::options::DiffOptions;

/// One of the two documents being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Version {
    /// The old version.
    A,
    /// The new version.
    B,
}

/// Outcome of comparing one page index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PageDecision {
    /// Only the old version has this page.
    OnlyInA,
    /// Only the new version has this page.
    OnlyInB,
    /// Both pages have the same whitespace-normalized text.
    Identical,
    /// The texts differ; carries the located differences.
    Differs(DiffResult),
    /// The page could not be compared. `fallback` names the version whose
    /// page should be copied unmodified.
    Unprocessed {
        fallback: Option<Version>,
        reason: String,
    },
}

impl PageDecision {
    /// Short machine-readable name of the decision.
    pub fn label(&self) -> &'static str {
        match self {
            PageDecision::OnlyInA => "only_in_a",
            PageDecision::OnlyInB => "only_in_b",
            PageDecision::Identical => "identical",
            PageDecision::Differs(_) => "differs",
            PageDecision::Unprocessed { .. } => "unprocessed",
        }
    }
}

/// The decision for one page index together with the page geometry of each side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageDiff {
    /// Page index (0-indexed).
    pub index: usize,
    pub size_a: Option<PageSize>,
    pub size_b: Option<PageSize>,
    pub decision: PageDecision,
}

/// Decisions for every page index, in page order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentDiff {
    pub pages: Vec<PageDiff>,
}

impl DocumentDiff {
    /// Pages that could not be compared.
    pub fn failures(&self) -> impl Iterator<Item = &PageDiff> {
        self.pages
            .iter()
            .filter(|p| matches!(p.decision, PageDecision::Unprocessed { .. }))
    }

    /// Pages whose decision is anything other than [`PageDecision::Identical`].
    pub fn changed_pages(&self) -> impl Iterator<Item = &PageDiff> {
        self.pages
            .iter()
            .filter(|p| p.decision != PageDecision::Identical)
    }
}

/// Supplies the extracted pages of one document version.
///
/// Implemented by extraction collaborators; [`DocumentText`] and
/// `[PageText]` provide in-memory implementations.
pub trait PageSource {
    /// Number of pages in this version.
    fn page_count(&self) -> usize;

    /// Extracted text and geometry of page `index` (0-indexed).
    fn page(&self, index: usize) -> Result<Cow<'_, PageText>, DiffError>;
}

impl PageSource for [PageText] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<Cow<'_, PageText>, DiffError> {
        self.get(index)
            .map(Cow::Borrowed)
            .ok_or_else(|| DiffError::page_failed(index, "page index out of range"))
    }
}

impl PageSource for DocumentText {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Result<Cow<'_, PageText>, DiffError> {
        self.pages.as_slice().page(index)
    }
}

/// Decide one page given the pages each version has at this index.
///
/// Returns an error only for input the diff engine cannot use (malformed
/// geometry, or neither version having the page).
pub fn compare_page(
    a: Option<&PageText>,
    b: Option<&PageText>,
    options: &DiffOptions,
) -> Result<PageDecision, DiffError> {
    let (a, b) = match (a, b) {
        (None, None) => {
            return Err(DiffError::page_failed(0, "neither version has this page"));
        }
        (Some(_), None) => return Ok(PageDecision::OnlyInA),
        (None, Some(_)) => return Ok(PageDecision::OnlyInB),
        (Some(a), Some(b)) => (a, b),
    };

    if a.text_key() == b.text_key() {
        return Ok(PageDecision::Identical);
    }

    let boxes_a = normalize_page(&a.fragments, a.height, options)?;
    let boxes_b = normalize_page(&b.fragments, b.height, options)?;
    let result = diff_page(&boxes_a, &boxes_b, options);

    if result.has_changes {
        Ok(PageDecision::Differs(result))
    } else {
        Ok(PageDecision::Identical)
    }
}

/// Compare two documents page by page, in ascending page order.
///
/// Produces one [`PageDiff`] for every index below the larger page count.
pub fn compare_documents<A, B>(a: &A, b: &B, options: &DiffOptions) -> DocumentDiff
where
    A: PageSource + ?Sized,
    B: PageSource + ?Sized,
{
    let count = a.page_count().max(b.page_count());
    let pages = (0..count)
        .map(|index| compare_index(a, b, index, options))
        .collect();
    DocumentDiff { pages }
}

/// Compare in-memory documents with pages processed in parallel.
///
/// Produces the same result as [`compare_documents`].
#[cfg(feature = "parallel")]
pub fn compare_pages_parallel(a: &[PageText], b: &[PageText], options: &DiffOptions) -> DocumentDiff {
    use rayon::prelude::*;

    let count = a.len().max(b.len());
    let pages = (0..count)
        .into_par_iter()
        .map(|index| compare_index(a, b, index, options))
        .collect();
    DocumentDiff { pages }
}

fn compare_index<A, B>(a: &A, b: &B, index: usize, options: &DiffOptions) -> PageDiff
where
    A: PageSource + ?Sized,
    B: PageSource + ?Sized,
{
    let has_a = index < a.page_count();
    let has_b = index < b.page_count();

    let page_a = load(a, has_a, index);
    let page_b = load(b, has_b, index);
    let size_a = loaded_size(&page_a);
    let size_b = loaded_size(&page_b);

    let outcome = page_a.and_then(|page_a| {
        let page_b = page_b?;
        compare_page(page_a.as_deref(), page_b.as_deref(), options).map_err(|e| e.on_page(index))
    });

    match outcome {
        Ok(decision) => {
            tracing::debug!(page = index, decision = decision.label(), "page compared");
            PageDiff {
                index,
                size_a,
                size_b,
                decision,
            }
        }
        Err(err) => {
            tracing::warn!(page = index, error = %err, "page comparison failed; copying page unmodified");
            let fallback = if has_a {
                Some(Version::A)
            } else if has_b {
                Some(Version::B)
            } else {
                None
            };
            PageDiff {
                index,
                size_a,
                size_b,
                decision: PageDecision::Unprocessed {
                    fallback,
                    reason: err.to_string(),
                },
            }
        }
    }
}

fn loaded_size(page: &Result<Option<Cow<'_, PageText>>, DiffError>) -> Option<PageSize> {
    page.as_ref().ok().and_then(|p| p.as_deref()).map(PageText::size)
}

fn load<S>(source: &S, present: bool, index: usize) -> Result<Option<Cow<'_, PageText>>, DiffError>
where
    S: PageSource + ?Sized,
{
    if !present {
        return Ok(None);
    }
    source.page(index).map(Some).map_err(|e| e.on_page(index))
}
