//! Diff classification: deleted, added and modified regions of a page.

use crate::fragment::trim_text;
use crate::geometry::{Region, RegionPair};
use crate::matcher::{MatchState, match_fragments};
use crate::normalize::NormalizedBox;
use crate::options::DiffOptions;

/// The located differences between two versions of one page.
///
/// When `has_changes` is false all three lists are empty. `has_changes`
/// may be true with empty lists when every fragment found a partner but
/// the page text still differs (for example a reflow).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffResult {
    pub has_changes: bool,
    /// Old-version fragments without a partner.
    pub deleted: Vec<Region>,
    /// New-version fragments without a partner.
    pub added: Vec<Region>,
    /// Nearby unmatched fragments with different text, one entry per qualifying pair.
    pub modified: Vec<RegionPair>,
}

impl DiffResult {
    /// The no-change result.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Whether any region is available to highlight.
    pub fn has_regions(&self) -> bool {
        !(self.deleted.is_empty() && self.added.is_empty() && self.modified.is_empty())
    }
}

/// Trimmed, non-empty fragment texts joined with single spaces.
pub fn joined_text(boxes: &[NormalizedBox]) -> String {
    boxes
        .iter()
        .map(|b| trim_text(&b.text))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare two normalized pages: text fast path, matching, classification.
pub fn diff_page(a: &[NormalizedBox], b: &[NormalizedBox], options: &DiffOptions) -> DiffResult {
    if joined_text(a) == joined_text(b) {
        return DiffResult::unchanged();
    }
    let state = match_fragments(a, b, options);
    classify(a, b, &state, options)
}

/// Classify fragments of two pages given their correspondence.
///
/// `state` must have been computed for `a` and `b`, as [`match_fragments`]
/// does; indices outside either page are ignored.
///
/// 1. Equal joined text returns [`DiffResult::unchanged`].
/// 2. Otherwise `has_changes` is set, and stays set.
/// 3. A page where every fragment on both sides is matched and both match
///    ratios reach `coverage_threshold` emits no regions.
/// 4. Each unmatched fragment becomes a deleted or added region.
/// 5. Every unmatched old/new pair within twice the tolerance whose texts
///    differ becomes a modified pair. A fragment may take part in several
///    pairs. Pairs whose four anchor coordinates all lie within
///    `dedup_epsilon` of an already emitted pair are dropped.
pub fn classify(
    a: &[NormalizedBox],
    b: &[NormalizedBox],
    state: &MatchState,
    options: &DiffOptions,
) -> DiffResult {
    if joined_text(a) == joined_text(b) {
        return DiffResult::unchanged();
    }

    let mut result = DiffResult {
        has_changes: true,
        ..DiffResult::default()
    };

    let uncommitted_a = state.unmatched_a();
    let uncommitted_b = state.unmatched_b();
    let unmatched_a = non_blank(a, &uncommitted_a);
    let unmatched_b = non_blank(b, &uncommitted_b);
    let ratio_a = state.match_ratio_a();
    let ratio_b = state.match_ratio_b();

    if unmatched_a.is_empty()
        && unmatched_b.is_empty()
        && ratio_a >= options.coverage_threshold
        && ratio_b >= options.coverage_threshold
    {
        tracing::debug!(ratio_a, ratio_b, "text differs but every fragment matched");
        return result;
    }

    result.deleted = unmatched_a.iter().map(|&i| a[i].region()).collect();
    result.added = unmatched_b.iter().map(|&i| b[i].region()).collect();

    let mut pairs = ModifiedPairs::new(options);
    for &ia in &unmatched_a {
        for &ib in &unmatched_b {
            pairs.consider(&a[ia], &b[ib]);
        }
    }

    // Second sweep over every uncommitted index pair.
    for word_a in uncommitted_a.iter().filter_map(|&i| a.get(i)) {
        for word_b in uncommitted_b.iter().filter_map(|&i| b.get(i)) {
            pairs.consider(word_a, word_b);
        }
    }

    result.modified = pairs.into_vec();

    tracing::debug!(
        deleted = result.deleted.len(),
        added = result.added.len(),
        modified = result.modified.len(),
        "page classified"
    );

    result
}

/// Indices into `boxes` that exist and carry non-blank text.
fn non_blank(boxes: &[NormalizedBox], indices: &[usize]) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| boxes.get(i).is_some_and(|b| !trim_text(&b.text).is_empty()))
        .collect()
}

/// Modified pairs emitted by one classification, with their dedup state.
struct ModifiedPairs {
    radius: f64,
    epsilon: f64,
    emitted: Vec<RegionPair>,
}

impl ModifiedPairs {
    fn new(options: &DiffOptions) -> Self {
        Self {
            radius: options.acceptance_radius(),
            epsilon: options.dedup_epsilon,
            emitted: Vec::new(),
        }
    }

    fn consider(&mut self, a: &NormalizedBox, b: &NormalizedBox) {
        let (text_a, text_b) = (trim_text(&a.text), trim_text(&b.text));
        if text_a.is_empty() || text_b.is_empty() {
            return;
        }
        if text_a == text_b || a.distance(b) >= self.radius {
            return;
        }
        let pair = RegionPair::new(a.region(), b.region());
        let duplicate = self
            .emitted
            .iter()
            .any(|kept| kept.same_anchors(&pair, self.epsilon));
        if !duplicate {
            self.emitted.push(pair);
        }
    }

    fn into_vec(self) -> Vec<RegionPair> {
        self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x: f64, y: f64) -> NormalizedBox {
        NormalizedBox::new(text, x, y, 20.0, 10.0)
    }

    fn opts() -> DiffOptions {
        DiffOptions::default()
    }

    #[test]
    fn test_joined_text_skips_blank() {
        let boxes = vec![word(" a ", 0.0, 0.0), word("  ", 0.0, 0.0), word("b", 0.0, 0.0)];
        assert_eq!(joined_text(&boxes), "a b");
    }

    #[test]
    fn test_equal_text_is_unchanged_despite_coordinates() {
        let a = vec![word("Alice", 0.0, 100.0), word("Bob", 400.0, 100.0)];
        let b = vec![word("Alice", 300.0, 500.0), word("Bob", 10.0, 10.0)];
        let result = diff_page(&a, &b, &opts());
        assert_eq!(result, DiffResult::unchanged());
        assert!(!result.has_regions());
    }

    #[test]
    fn test_classify_fast_path_ignores_state() {
        let a = vec![word("same", 0.0, 0.0)];
        let state = MatchState::new(1, 1);
        assert_eq!(classify(&a, &a, &state, &opts()), DiffResult::unchanged());
    }

    #[test]
    fn test_reflow_reports_change_without_regions() {
        let a = vec![word("b", 1.0, 100.0), word("a", 41.0, 100.0)];
        let b = vec![word("a", 41.0, 100.0), word("b", 1.0, 100.0)];
        let result = diff_page(&a, &b, &opts());
        assert!(result.has_changes);
        assert!(!result.has_regions());
    }

    #[test]
    fn test_one_fragment_pairs_with_several_neighbours() {
        let a = vec![word("2014", 100.0, 50.0)];
        let b = vec![word("2015", 100.0, 50.0), word("2016", 110.0, 50.0)];
        let result = diff_page(&a, &b, &opts());
        assert_eq!(result.deleted.len(), 1);
        assert_eq!(result.added.len(), 2);
        assert_eq!(result.modified.len(), 2);
        assert_eq!(result.modified[0].b(), b[0].region());
        assert_eq!(result.modified[1].b(), b[1].region());
    }

    #[test]
    fn test_near_identical_anchors_deduplicated() {
        let a = vec![word("x", 0.0, 100.0), word("z", 0.5, 100.0)];
        let b = vec![word("y", 0.0, 100.0)];
        let result = diff_page(&a, &b, &opts());
        assert_eq!(result.deleted.len(), 2);
        assert_eq!(result.modified.len(), 1);
        assert_eq!(result.modified[0].a(), a[0].region());
    }

    #[test]
    fn test_far_apart_unmatched_are_not_paired() {
        let a = vec![word("old", 0.0, 700.0)];
        let b = vec![word("new", 0.0, 100.0)];
        let result = diff_page(&a, &b, &opts());
        assert_eq!(result.deleted, vec![a[0].region()]);
        assert_eq!(result.added, vec![b[0].region()]);
        assert!(result.modified.is_empty());
    }

    #[test]
    fn test_empty_old_page_marks_everything_added() {
        let b = vec![word("new", 0.0, 100.0), word("text", 40.0, 100.0)];
        let result = diff_page(&[], &b, &opts());
        assert!(result.has_changes);
        assert!(result.deleted.is_empty());
        assert_eq!(result.added.len(), 2);
        assert!(result.modified.is_empty());
    }

    #[test]
    fn test_matched_fragments_excluded_from_regions() {
        let a = vec![word("keep", 0.0, 200.0), word("old", 0.0, 100.0)];
        let b = vec![word("keep", 2.0, 200.0), word("new", 0.0, 100.0)];
        let result = diff_page(&a, &b, &opts());
        assert_eq!(result.deleted, vec![a[1].region()]);
        assert_eq!(result.added, vec![b[1].region()]);
        assert_eq!(result.modified, vec![RegionPair::new(a[1].region(), b[1].region())]);
    }

    #[test]
    fn test_uncommitted_state_leaves_everything_unmatched() {
        let a = vec![word("a", 0.0, 0.0), word("b", 100.0, 0.0)];
        let b = vec![word("c", 300.0, 300.0)];
        let result = classify(&a, &b, &MatchState::new(a.len(), b.len()), &opts());
        assert_eq!(result.deleted.len(), 2);
        assert_eq!(result.added.len(), 1);
    }

    #[test]
    fn test_coverage_gate_reads_state_ratios() {
        let a = vec![word("b", 1.0, 100.0), word("a", 41.0, 100.0)];
        let b = vec![word("a", 41.0, 100.0), word("b", 1.0, 100.0)];
        let mut state = MatchState::new(2, 2);
        state.commit(0, 1);
        state.commit(1, 0);
        let gated = classify(&a, &b, &state, &opts());
        assert!(gated.has_changes);
        assert!(!gated.has_regions());

        let partial = {
            let mut s = MatchState::new(2, 2);
            s.commit(0, 1);
            s
        };
        let result = classify(&a, &b, &partial, &opts());
        assert_eq!(result.deleted, vec![a[1].region()]);
        assert_eq!(result.added, vec![b[0].region()]);
    }

    #[test]
    fn test_byte_order_mark_fragment_is_blank() {
        let a = vec![word("keep", 0.0, 100.0), word("\u{FEFF}", 200.0, 100.0)];
        let b = vec![word("keep", 0.0, 100.0)];
        assert_eq!(joined_text(&a), "keep");
        assert_eq!(diff_page(&a, &b, &opts()), DiffResult::unchanged());
    }
}
