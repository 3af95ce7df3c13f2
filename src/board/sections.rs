//! The four colored home sections and their safe squares.

use super::geometry::{Placement, PrimitiveKind, Shape};
use super::outline::{Outline, outline};
use super::params::{Color, LayoutParameters, Quadrant};
use crate::math::Vec2;

/// A home section: a colored square in one corner with a smaller safe square
/// centred on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub quadrant: Quadrant,
    pub placement: Placement,
    /// Outer side length in world units.
    pub size: f32,
    pub color: Color,
    pub shape: Shape,
    pub outline: Option<Outline>,
    /// Safe-square side length in world units.
    pub safe_size: f32,
    pub safe_placement: Placement,
    pub safe_shape: Shape,
    pub safe_color: Color,
    pub safe_outline: Option<Outline>,
}

impl Section {
    /// Board-plane centre shared by the section and its safe square.
    pub fn center(&self) -> Vec2 {
        self.placement.position.ground()
    }
}

/// Distance from the board centre to each section centre along both axes,
/// in world units.
pub fn center_distance(params: &LayoutParameters) -> f32 {
    (params.section_size as f32 / 2.0 + params.style.section_margin) * params.cell_size
}

/// Builds one section per quadrant, in [`Quadrant::ALL`] order.
pub fn build(params: &LayoutParameters) -> Vec<Section> {
    let style = &params.style;
    let distance = center_distance(params);
    let size = params.section_size as f32 * params.cell_size;
    let safe_size = style.safe_square.inner_size(params.section_size as f32) * params.cell_size;

    let sections: Vec<Section> = Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let center = quadrant.signs() * distance;
            let placement = Placement::on_board(center, style.elevations.section);
            let safe_placement = Placement::on_board(center, style.elevations.safe_square);
            let shape = Shape::square(size);
            let safe_shape = Shape::square(safe_size);

            Section {
                quadrant,
                size,
                color: params.color_of(quadrant),
                outline: style
                    .outlines
                    .applies_to(PrimitiveKind::Section)
                    .then(|| outline(&placement, &shape)),
                placement,
                shape,
                safe_size,
                safe_color: style.safe_square_color,
                safe_outline: style
                    .outlines
                    .applies_to(PrimitiveKind::SafeSquare)
                    .then(|| outline(&safe_placement, &safe_shape)),
                safe_placement,
                safe_shape,
            }
        })
        .collect();

    tracing::debug!(sections = sections.len(), size, safe_size, "sections built");
    sections
}

/// True when the interiors of two axis-aligned squares overlap. Shared edges and
/// corners do not count.
pub fn squares_overlap(a_center: Vec2, a_size: f32, b_center: Vec2, b_size: f32) -> bool {
    const EPSILON: f32 = 1e-4;
    let reach = (a_size + b_size) / 2.0 - EPSILON;
    (a_center.x() - b_center.x()).abs() < reach && (a_center.y() - b_center.y()).abs() < reach
}
