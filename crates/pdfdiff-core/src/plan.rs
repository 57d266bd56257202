//! Highlight plan: the output document described as data.
//!
//! Turns a [`DocumentDiff`] into the ordered list of pages an authoring
//! collaborator should copy, each with the rectangles, borders and captions
//! to draw on it. Coordinates are in the same bottom-up frame as the diff
//! regions and need no further transformation.

use crate::classify::DiffResult;
use crate::error::DiffError;
use crate::geometry::{PageSize, Region};
use crate::page::{DocumentDiff, PageDecision, PageDiff, Version};

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Something to draw on a copied page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Overlay {
    /// Translucent filled rectangle.
    Fill {
        region: Region,
        color: Rgb,
        opacity: f64,
    },
    /// Unfilled rectangle outline.
    Border {
        region: Region,
        color: Rgb,
        line_width: f64,
    },
    /// A line of text anchored at `(x, y)`.
    Caption {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        color: Rgb,
    },
}

/// One page of the output document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedPage {
    /// Which version the page is copied from.
    pub source: Version,
    /// Page index within that version (0-indexed).
    pub page_index: usize,
    /// Drawn in order over the copied page.
    pub overlays: Vec<Overlay>,
}

impl PlannedPage {
    fn copy(source: Version, page_index: usize) -> Self {
        Self {
            source,
            page_index,
            overlays: Vec::new(),
        }
    }
}

/// Colours, captions and line widths used when planning highlights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanStyle {
    pub deleted_color: Rgb,
    pub added_color: Rgb,
    pub modified_color: Rgb,
    /// Opacity of region fills (default: 0.15).
    pub fill_opacity: f64,
    /// Border of a page present only in the old version.
    pub removed_page_color: Rgb,
    /// Border of a page present only in the new version.
    pub added_page_color: Rgb,
    pub border_width: f64,
    pub old_caption: String,
    pub new_caption: String,
    pub old_caption_color: Rgb,
    pub new_caption_color: Rgb,
    pub caption_size: f64,
    /// Caption distance from the left edge.
    pub caption_x: f64,
    /// Caption distance below the top of the page.
    pub caption_drop: f64,
}

impl Default for PlanStyle {
    fn default() -> Self {
        Self {
            deleted_color: Rgb::new(1.0, 0.7, 0.7),
            added_color: Rgb::new(0.7, 1.0, 0.7),
            modified_color: Rgb::new(1.0, 1.0, 0.5),
            fill_opacity: 0.15,
            removed_page_color: Rgb::new(1.0, 0.0, 0.0),
            added_page_color: Rgb::new(0.0, 1.0, 0.0),
            border_width: 3.0,
            old_caption: "Old Version (deletions in red, changes in yellow)".to_string(),
            new_caption: "New Version (additions in green, changes in yellow)".to_string(),
            old_caption_color: Rgb::new(0.5, 0.0, 0.0),
            new_caption_color: Rgb::new(0.0, 0.5, 0.0),
            caption_size: 10.0,
            caption_x: 10.0,
            caption_drop: 20.0,
        }
    }
}

/// The output document as an ordered list of planned pages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightPlan {
    pub pages: Vec<PlannedPage>,
}

impl HighlightPlan {
    /// Plan the output document for `diff`.
    ///
    /// Page order follows `diff.pages`; a differing page expands to its old
    /// copy followed by its new copy. Returns
    /// [`DiffError::NoOutputProduced`] if no page could be planned.
    pub fn build(diff: &DocumentDiff, style: &PlanStyle) -> Result<Self, DiffError> {
        let mut pages = Vec::with_capacity(diff.pages.len());
        for page in &diff.pages {
            plan_page(page, style, &mut pages);
        }
        if pages.is_empty() {
            return Err(DiffError::NoOutputProduced);
        }
        Ok(Self { pages })
    }
}

fn plan_page(page: &PageDiff, style: &PlanStyle, out: &mut Vec<PlannedPage>) {
    let index = page.index;
    match &page.decision {
        PageDecision::OnlyInA => {
            out.push(bordered(Version::A, index, page.size_a, style.removed_page_color, style));
        }
        PageDecision::OnlyInB => {
            out.push(bordered(Version::B, index, page.size_b, style.added_page_color, style));
        }
        PageDecision::Identical => out.push(PlannedPage::copy(Version::A, index)),
        PageDecision::Differs(result) if !result.has_regions() => {
            out.push(PlannedPage::copy(Version::A, index));
        }
        PageDecision::Differs(result) => {
            let height = page.size_a.or(page.size_b).map(|s| s.height);
            out.push(old_side(index, result, height, style));
            out.push(new_side(index, result, height, style));
        }
        PageDecision::Unprocessed { fallback, .. } => {
            if let Some(source) = fallback {
                out.push(PlannedPage::copy(*source, index));
            }
        }
    }
}

fn bordered(
    source: Version,
    index: usize,
    size: Option<PageSize>,
    color: Rgb,
    style: &PlanStyle,
) -> PlannedPage {
    let mut planned = PlannedPage::copy(source, index);
    if let Some(size) = size {
        planned.overlays.push(Overlay::Border {
            region: size.full_page(),
            color,
            line_width: style.border_width,
        });
    }
    planned
}

fn old_side(index: usize, result: &DiffResult, height: Option<f64>, style: &PlanStyle) -> PlannedPage {
    let mut planned = PlannedPage::copy(Version::A, index);
    let fill = |region, color| Overlay::Fill {
        region,
        color,
        opacity: style.fill_opacity,
    };
    planned
        .overlays
        .extend(result.deleted.iter().map(|r| fill(*r, style.deleted_color)));
    planned
        .overlays
        .extend(result.modified.iter().map(|m| fill(m.a(), style.modified_color)));
    if let Some(height) = height {
        planned
            .overlays
            .push(caption(&style.old_caption, height, style.old_caption_color, style));
    }
    planned
}

fn new_side(index: usize, result: &DiffResult, height: Option<f64>, style: &PlanStyle) -> PlannedPage {
    let mut planned = PlannedPage::copy(Version::B, index);
    let fill = |region, color| Overlay::Fill {
        region,
        color,
        opacity: style.fill_opacity,
    };
    planned
        .overlays
        .extend(result.added.iter().map(|r| fill(*r, style.added_color)));
    planned
        .overlays
        .extend(result.modified.iter().map(|m| fill(m.b(), style.modified_color)));
    if let Some(height) = height {
        planned
            .overlays
            .push(caption(&style.new_caption, height, style.new_caption_color, style));
    }
    planned
}

fn caption(text: &str, page_height: f64, color: Rgb, style: &PlanStyle) -> Overlay {
    Overlay::Caption {
        text: text.to_string(),
        x: style.caption_x,
        y: page_height - style.caption_drop,
        size: style.caption_size,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RegionPair;

    fn page_diff(index: usize, decision: PageDecision) -> PageDiff {
        PageDiff {
            index,
            size_a: Some(PageSize::new(612.0, 792.0)),
            size_b: Some(PageSize::new(612.0, 792.0)),
            decision,
        }
    }

    fn differs() -> DiffResult {
        let a = Region::new(0.0, 100.0, 30.0, 12.0);
        let b = Region::new(0.0, 100.0, 25.0, 12.0);
        DiffResult {
            has_changes: true,
            deleted: vec![a],
            added: vec![b],
            modified: vec![RegionPair::new(a, b)],
        }
    }

    #[test]
    fn test_empty_diff_produces_no_output() {
        let err = HighlightPlan::build(&DocumentDiff::default(), &PlanStyle::default()).unwrap_err();
        assert_eq!(err, DiffError::NoOutputProduced);
    }

    #[test]
    fn test_unprocessed_without_fallback_produces_no_output() {
        let diff = DocumentDiff {
            pages: vec![page_diff(
                0,
                PageDecision::Unprocessed {
                    fallback: None,
                    reason: "gone".to_string(),
                },
            )],
        };
        assert!(HighlightPlan::build(&diff, &PlanStyle::default()).is_err());
    }

    #[test]
    fn test_identical_page_copied_once() {
        let diff = DocumentDiff {
            pages: vec![page_diff(0, PageDecision::Identical)],
        };
        let plan = HighlightPlan::build(&diff, &PlanStyle::default()).unwrap();
        assert_eq!(plan.pages, vec![PlannedPage::copy(Version::A, 0)]);
    }

    #[test]
    fn test_differs_without_regions_copied_once() {
        let result = DiffResult {
            has_changes: true,
            ..DiffResult::default()
        };
        let diff = DocumentDiff {
            pages: vec![page_diff(0, PageDecision::Differs(result))],
        };
        let plan = HighlightPlan::build(&diff, &PlanStyle::default()).unwrap();
        assert_eq!(plan.pages.len(), 1);
        assert!(plan.pages[0].overlays.is_empty());
    }

    #[test]
    fn test_only_in_pages_get_borders() {
        let diff = DocumentDiff {
            pages: vec![page_diff(0, PageDecision::OnlyInA), page_diff(1, PageDecision::OnlyInB)],
        };
        let style = PlanStyle::default();
        let plan = HighlightPlan::build(&diff, &style).unwrap();
        assert_eq!(plan.pages[0].source, Version::A);
        assert_eq!(
            plan.pages[0].overlays,
            vec![Overlay::Border {
                region: Region::new(0.0, 0.0, 612.0, 792.0),
                color: Rgb::new(1.0, 0.0, 0.0),
                line_width: 3.0,
            }]
        );
        assert_eq!(plan.pages[1].source, Version::B);
        assert!(matches!(
            plan.pages[1].overlays[0],
            Overlay::Border { color, .. } if color == style.added_page_color
        ));
    }

    #[test]
    fn test_differing_page_expands_to_old_then_new() {
        let diff = DocumentDiff {
            pages: vec![page_diff(3, PageDecision::Differs(differs()))],
        };
        let style = PlanStyle::default();
        let plan = HighlightPlan::build(&diff, &style).unwrap();
        assert_eq!(plan.pages.len(), 2);

        let old = &plan.pages[0];
        assert_eq!((old.source, old.page_index), (Version::A, 3));
        assert_eq!(old.overlays.len(), 3);
        assert!(matches!(old.overlays[0], Overlay::Fill { color, .. } if color == style.deleted_color));
        assert!(matches!(old.overlays[1], Overlay::Fill { color, .. } if color == style.modified_color));
        match &old.overlays[2] {
            Overlay::Caption { text, x, y, size, .. } => {
                assert!(text.starts_with("Old Version"));
                assert_eq!((*x, *y, *size), (10.0, 772.0, 10.0));
            }
            other => panic!("expected caption, got {other:?}"),
        }

        let new = &plan.pages[1];
        assert_eq!((new.source, new.page_index), (Version::B, 3));
        assert!(matches!(new.overlays[0], Overlay::Fill { color, .. } if color == style.added_color));
        match &new.overlays[1] {
            Overlay::Fill { region, opacity, .. } => {
                assert_eq!(*region, Region::new(0.0, 100.0, 25.0, 12.0));
                assert_eq!(*opacity, 0.15);
            }
            other => panic!("expected fill, got {other:?}"),
        }
        assert!(matches!(&new.overlays[2], Overlay::Caption { text, .. } if text.starts_with("New Version")));
    }

    #[test]
    fn test_unprocessed_copies_fallback() {
        let diff = DocumentDiff {
            pages: vec![page_diff(
                2,
                PageDecision::Unprocessed {
                    fallback: Some(Version::B),
                    reason: "boom".to_string(),
                },
            )],
        };
        let plan = HighlightPlan::build(&diff, &PlanStyle::default()).unwrap();
        assert_eq!(plan.pages, vec![PlannedPage::copy(Version::B, 2)]);
    }
}
