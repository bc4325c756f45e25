//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use super::Vector2;

/// An area enclosed by its top-left point, width and height.
///
/// Width and height are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Where to place a rectangle along one axis of a shared bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Leave this axis untouched.
    #[default]
    None,
    /// Align to the left/top edge.
    Min,
    /// Align to the right/bottom edge.
    Max,
    /// Center within the bounds.
    Center,
}

impl Rectangle {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Move by `delta`, keeping the size.
    #[must_use]
    pub fn translate(&self, delta: Vector2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, p: Vector2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The nine snap anchors: corners, edge midpoints and center, row by row
    /// from the top-left.
    #[must_use]
    pub fn nine_points(&self) -> [Vector2; 9] {
        let (x0, y0) = (self.x, self.y);
        let (xm, ym) = (self.x + self.width / 2.0, self.y + self.height / 2.0);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        [
            Vector2::new(x0, y0),
            Vector2::new(xm, y0),
            Vector2::new(x1, y0),
            Vector2::new(x0, ym),
            Vector2::new(xm, ym),
            Vector2::new(x1, ym),
            Vector2::new(x0, y1),
            Vector2::new(xm, y1),
            Vector2::new(x1, y1),
        ]
    }

    /// Smallest rectangle enclosing all of `rects`. `None` if empty.
    #[must_use]
    pub fn union(rects: &[Self]) -> Option<Self> {
        let first = rects.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x + first.width, first.y + first.height);
        for r in &rects[1..] {
            min_x = min_x.min(r.x);
            min_y = min_y.min(r.y);
            max_x = max_x.max(r.x + r.width);
            max_y = max_y.max(r.y + r.height);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Align rectangles to their shared bounding box.
///
/// Returns the rectangles in input order with updated positions; sizes are
/// unchanged. An empty input yields an empty output.
#[must_use]
pub fn align_rects(rects: &[Rectangle], horizontal: Alignment, vertical: Alignment) -> Vec<Rectangle> {
    let Some(bounds) = Rectangle::union(rects) else {
        return Vec::new();
    };
    rects
        .iter()
        .map(|r| Rectangle {
            x: place(r.x, r.width, bounds.x, bounds.width, horizontal),
            y: place(r.y, r.height, bounds.y, bounds.height, vertical),
            ..*r
        })
        .collect()
}

fn place(pos: f64, size: f64, start: f64, extent: f64, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::None => pos,
        Alignment::Min => start,
        Alignment::Max => start + extent - size,
        Alignment::Center => start + (extent - size) / 2.0,
    }
}
