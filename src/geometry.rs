/// Axis-aligned bounding boxes — the only geometry the simulation needs.

/// Rectangular bounds anchored at the top-left corner, in arena pixels.
/// Width and height are fixed for an entity's lifetime and always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Bounds { x, y, width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// AABB overlap test.  True iff the rectangles intersect with non-zero
/// area: all four comparisons are strict, so rectangles that merely share
/// an edge do not count as overlapping.
pub fn overlaps(a: &Bounds, b: &Bounds) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
