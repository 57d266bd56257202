//! Fragment matching between two versions of a page.
//!
//! Pairs each old-version fragment with at most one new-version fragment of
//! identical text near the same position. Ties between repeated tokens
//! (page numbers, symbols, common words) are broken toward preserving the
//! relative reading order of the two pages.

use crate::normalize::NormalizedBox;
use crate::options::DiffOptions;

/// The correspondence computed between the fragments of two pages.
///
/// Each index appears in at most one committed pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchState {
    a_to_b: Vec<Option<usize>>,
    b_to_a: Vec<Option<usize>>,
}

impl MatchState {
    /// An empty state for pages with `len_a` and `len_b` fragments.
    pub fn new(len_a: usize, len_b: usize) -> Self {
        Self {
            a_to_b: vec![None; len_a],
            b_to_a: vec![None; len_b],
        }
    }

    /// Record `a` and `b` as corresponding fragments.
    ///
    /// Returns false and leaves the state unchanged if either index is
    /// already committed or out of range.
    pub fn commit(&mut self, a: usize, b: usize) -> bool {
        match (self.a_to_b.get(a), self.b_to_a.get(b)) {
            (Some(None), Some(None)) => {
                self.a_to_b[a] = Some(b);
                self.b_to_a[b] = Some(a);
                true
            }
            _ => false,
        }
    }

    pub fn is_matched_a(&self, a: usize) -> bool {
        matches!(self.a_to_b.get(a), Some(Some(_)))
    }

    pub fn is_matched_b(&self, b: usize) -> bool {
        matches!(self.b_to_a.get(b), Some(Some(_)))
    }

    /// The new-version partner of old-version fragment `a`.
    pub fn partner_of_a(&self, a: usize) -> Option<usize> {
        self.a_to_b.get(a).copied().flatten()
    }

    /// The old-version partner of new-version fragment `b`.
    pub fn partner_of_b(&self, b: usize) -> Option<usize> {
        self.b_to_a.get(b).copied().flatten()
    }

    /// Number of committed pairs.
    pub fn matched_count(&self) -> usize {
        self.a_to_b.iter().filter(|p| p.is_some()).count()
    }

    /// Committed `(a, b)` pairs in ascending `a` order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.a_to_b
            .iter()
            .enumerate()
            .filter_map(|(a, b)| b.map(|b| (a, b)))
    }

    /// Old-version indices without a partner, ascending.
    pub fn unmatched_a(&self) -> Vec<usize> {
        unmatched(&self.a_to_b)
    }

    /// New-version indices without a partner, ascending.
    pub fn unmatched_b(&self) -> Vec<usize> {
        unmatched(&self.b_to_a)
    }

    /// Fraction of old-version fragments that were matched (0 for an empty page).
    pub fn match_ratio_a(&self) -> f64 {
        ratio(self.matched_count(), self.a_to_b.len())
    }

    /// Fraction of new-version fragments that were matched (0 for an empty page).
    pub fn match_ratio_b(&self) -> f64 {
        ratio(self.matched_count(), self.b_to_a.len())
    }
}

fn unmatched(partners: &[Option<usize>]) -> Vec<usize> {
    partners
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_none())
        .map(|(i, _)| i)
        .collect()
}

fn ratio(matched: usize, total: usize) -> f64 {
    matched as f64 / total.max(1) as f64
}

/// Indices of `boxes` in reading order.
///
/// Rows run top to bottom (descending y in the bottom-up frame). A fragment
/// joins the current row while it lies within `row_slack` of the row's
/// first fragment; within a row fragments run left to right.
pub fn reading_order(boxes: &[NormalizedBox], row_slack: f64) -> Vec<usize> {
    let mut by_y: Vec<usize> = (0..boxes.len()).collect();
    by_y.sort_by(|&i, &j| {
        boxes[j]
            .y
            .total_cmp(&boxes[i].y)
            .then(boxes[i].x.total_cmp(&boxes[j].x))
    });

    let mut order = Vec::with_capacity(boxes.len());
    let mut row: Vec<usize> = Vec::new();
    let mut row_anchor = 0.0;

    for idx in by_y {
        let y = boxes[idx].y;
        if !row.is_empty() && row_anchor - y > row_slack {
            flush_row(&mut row, boxes, &mut order);
        }
        if row.is_empty() {
            row_anchor = y;
        }
        row.push(idx);
    }
    flush_row(&mut row, boxes, &mut order);

    order
}

fn flush_row(row: &mut Vec<usize>, boxes: &[NormalizedBox], order: &mut Vec<usize>) {
    row.sort_by(|&i, &j| boxes[i].x.total_cmp(&boxes[j].x));
    order.append(row);
}

/// Match the fragments of two page versions.
///
/// Walks `a` in reading order. For each fragment, every unmatched `b`
/// fragment with identical text whose anchor lies strictly within twice the
/// tolerance is a candidate; the candidate with the lowest
/// `distance + order_weight * |reading_index_a - reading_index_b|` wins
/// (the first one seen on ties). Commitments are final: a later fragment
/// never takes over an earlier match, even a looser one.
pub fn match_fragments(a: &[NormalizedBox], b: &[NormalizedBox], options: &DiffOptions) -> MatchState {
    let order_a = reading_order(a, options.row_slack);
    let order_b = reading_order(b, options.row_slack);
    let radius = options.acceptance_radius();
    let mut state = MatchState::new(a.len(), b.len());

    for (ra, &ia) in order_a.iter().enumerate() {
        if state.is_matched_a(ia) {
            continue;
        }
        let word = &a[ia];

        let mut best: Option<(usize, f64)> = None;
        for (rb, &ib) in order_b.iter().enumerate() {
            if state.is_matched_b(ib) {
                continue;
            }
            let candidate = &b[ib];
            if candidate.text != word.text {
                continue;
            }
            let distance = word.distance(candidate);
            if distance >= radius {
                continue;
            }
            let cost = distance + options.order_weight * ra.abs_diff(rb) as f64;
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((ib, cost));
            }
        }

        if let Some((ib, cost)) = best {
            if options.gate_on_order_cost && cost >= radius {
                continue;
            }
            state.commit(ia, ib);
        }
    }

    tracing::debug!(
        matched = state.matched_count(),
        fragments_a = a.len(),
        fragments_b = b.len(),
        "fragment matching complete"
    );

    state
}
