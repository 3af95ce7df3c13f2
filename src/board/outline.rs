//! Border lines for generated primitives.

use super::geometry::{Placement, Segment, Shape};
use super::params::Color;

/// Every outline is drawn in this color.
pub const OUTLINE_COLOR: Color = Color::BLACK;

/// Line-segment border of a primitive, sharing the source's placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub placement: Placement,
    /// Boundary edges in the source shape's local frame.
    pub segments: Vec<Segment>,
    pub color: Color,
}

/// Derives the outline of `shape` placed at `placement`.
///
/// Pure: the same inputs always give the same segments, one per boundary edge,
/// walking the boundary in order and closing back to the first corner.
pub fn outline(placement: &Placement, shape: &Shape) -> Outline {
    let corners = shape.boundary();
    let segments = corners
        .iter()
        .enumerate()
        .map(|(i, start)| Segment {
            start: *start,
            end: corners[(i + 1) % corners.len()],
        })
        .collect();

    Outline {
        placement: *placement,
        segments,
        color: OUTLINE_COLOR,
    }
}
