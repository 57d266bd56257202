/// Axis-aligned rectangle in the canonical bottom-up page frame.
///
/// Coordinates follow the drawing convention of the surface that receives
/// highlights:
/// - `x`: left edge
/// - `y`: anchor edge (distance from the bottom of the page)
/// - `width`: horizontal extent
/// - `height`: vertical extent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Straight-line distance between the anchor points of two regions.
    pub fn anchor_distance(&self, other: &Region) -> f64 {
        anchor_distance(self.x, self.y, other.x, other.y)
    }
}

/// The old-version and new-version geometry of one edit-in-place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionPair {
    pub x1: f64,
    pub y1: f64,
    pub width1: f64,
    pub height1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width2: f64,
    pub height2: f64,
}

impl RegionPair {
    pub fn new(a: Region, b: Region) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            width1: a.width,
            height1: a.height,
            x2: b.x,
            y2: b.y,
            width2: b.width,
            height2: b.height,
        }
    }

    /// Geometry on the old-version page.
    pub fn a(&self) -> Region {
        Region::new(self.x1, self.y1, self.width1, self.height1)
    }

    /// Geometry on the new-version page.
    pub fn b(&self) -> Region {
        Region::new(self.x2, self.y2, self.width2, self.height2)
    }

    /// Whether both anchors of `self` lie within `epsilon` of the anchors of `other`.
    pub fn same_anchors(&self, other: &RegionPair, epsilon: f64) -> bool {
        (self.x1 - other.x1).abs() < epsilon
            && (self.y1 - other.y1).abs() < epsilon
            && (self.x2 - other.x2).abs() < epsilon
            && (self.y2 - other.y2).abs() < epsilon
    }
}

/// Page dimensions as reported by the surface that will be drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole page.
    pub fn full_page(&self) -> Region {
        Region::new(0.0, 0.0, self.width, self.height)
    }
}

/// Euclidean distance between two anchor points.
pub fn anchor_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}
