// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Screen-space placement for floating popups.
//!
//! Coordinates are unitless integers in the host's fixed (viewport) space.
//! The terminal front end feeds cell coordinates, but nothing here assumes
//! a particular unit.

/// Gap between a column filter header and its option list.
pub const FILTER_HEADER_GAP: i32 = 2;

/// Gap between a select field trigger and its option list.
pub const SELECT_FIELD_GAP: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of a trigger, header, or rendered popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl AnchorRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn right(self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(self) -> i32 {
        self.top + self.height
    }

    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// Fixed-position placement of an open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownGeometry {
    pub top: i32,
    pub left: i32,
    pub width: i32,
}

impl DropdownGeometry {
    /// Widens to `min_width`, keeping the right edge aligned with `anchor`.
    pub fn widen_right_aligned(self, anchor: AnchorRect, min_width: i32) -> Self {
        if self.width >= min_width {
            return self;
        }
        Self {
            top: self.top,
            left: anchor.right() - min_width,
            width: min_width,
        }
    }

    /// Area covered by a popup of `rows` rows placed at this geometry.
    pub const fn area(self, rows: i32) -> AnchorRect {
        AnchorRect::new(self.left, self.top, self.width, rows)
    }
}

/// Places a popup directly under `anchor`, `gap` units below its bottom edge.
///
/// Call this on the closed-to-open transition with the anchor's current
/// rectangle; a geometry from an earlier open must not be reused.
pub const fn compute_geometry(anchor: AnchorRect, gap: i32) -> DropdownGeometry {
    DropdownGeometry {
        top: anchor.bottom() + gap,
        left: anchor.left,
        width: anchor.width,
    }
}
