//! Coordinate normalization: raw fragments to canonical bottom-up boxes.

use crate::error::DiffError;
use crate::fragment::{TextFragment, trim_text};
use crate::geometry::Region;
use crate::options::{DiffOptions, YAxis};

/// A fragment placed in the canonical frame shared by both versions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedBox {
    /// Trimmed (and optionally Unicode-normalized) text.
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedBox {
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Geometry of this box without its text.
    pub fn region(&self) -> Region {
        Region::new(self.x, self.y, self.width, self.height)
    }

    /// Straight-line distance between the anchors of two boxes.
    pub fn distance(&self, other: &NormalizedBox) -> f64 {
        crate::geometry::anchor_distance(self.x, self.y, other.x, other.y)
    }
}

/// Place one fragment in the canonical frame.
///
/// Unreported extents are estimated (width from character count and glyph
/// width, height from the vertical text scale), then floored to the
/// configured minimums. Floors never shrink a reported extent.
pub fn normalize(fragment: &TextFragment, page_height: f64, options: &DiffOptions) -> NormalizedBox {
    let text = options.unicode_norm.apply(trim_text(&fragment.text)).into_owned();

    let width = if fragment.width != 0.0 {
        fragment.width
    } else {
        let glyphs = fragment.text.chars().count().max(1) as f64;
        let estimate = fragment.scale_x.abs() * glyphs * options.glyph_width;
        if estimate != 0.0 {
            estimate
        } else {
            options.fallback_width
        }
    };

    let height = if fragment.height != 0.0 {
        fragment.height
    } else if fragment.scale_y != 0.0 {
        fragment.scale_y.abs()
    } else {
        options.fallback_height
    };

    let y = match options.y_axis {
        YAxis::AsReported => fragment.y,
        YAxis::FlipTopDown => page_height - fragment.y,
    };

    NormalizedBox {
        text,
        x: fragment.x,
        y,
        width: width.max(options.min_width),
        height: height.max(options.min_height),
    }
}

/// Normalize every non-blank fragment of a page.
///
/// Whitespace-only fragments are dropped. Returns
/// [`DiffError::InputMalformed`] if the page height or any fragment field
/// is not a finite number. The reported page index is 0; callers attach
/// the real page with [`DiffError::on_page`].
pub fn normalize_page(
    fragments: &[TextFragment],
    page_height: f64,
    options: &DiffOptions,
) -> Result<Vec<NormalizedBox>, DiffError> {
    if !page_height.is_finite() || page_height < 0.0 {
        return Err(DiffError::malformed(
            0,
            format!("page height {page_height} is not a usable extent"),
        ));
    }

    let mut boxes = Vec::with_capacity(fragments.len());
    for (i, fragment) in fragments.iter().enumerate() {
        if fragment.is_blank() {
            continue;
        }
        check_finite(i, fragment)?;
        boxes.push(normalize(fragment, page_height, options));
    }
    Ok(boxes)
}

fn check_finite(index: usize, fragment: &TextFragment) -> Result<(), DiffError> {
    let fields = [
        ("x", fragment.x),
        ("y", fragment.y),
        ("width", fragment.width),
        ("height", fragment.height),
        ("scale_x", fragment.scale_x),
        ("scale_y", fragment.scale_y),
    ];
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(DiffError::malformed(
            0,
            format!("fragment {index} ({:?}) has non-finite {name}: {value}", fragment.text),
        )),
        None => Ok(()),
    }
}
