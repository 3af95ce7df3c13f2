//! Token-start markers: four per home section in a 2×2 arrangement.

use super::geometry::{Placement, PrimitiveKind, Shape};
use super::outline::{Outline, outline};
use super::params::{Color, LayoutParameters, MarkerShape, Quadrant};
use super::sections::Section;

pub const MARKERS_PER_SECTION: usize = 4;

/// A token-start marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub quadrant: Quadrant,
    /// 0..4, ordered top-left, top-right, bottom-left, bottom-right within the section.
    pub slot: u8,
    pub placement: Placement,
    pub shape: Shape,
    pub color: Color,
    pub outline: Option<Outline>,
}

fn marker_shape(params: &LayoutParameters) -> Shape {
    match params.style.marker_shape {
        MarkerShape::Square { size } => Shape::square(size * params.cell_size),
        MarkerShape::Disc { radius, segments } => Shape::Disc {
            radius: radius * params.cell_size,
            segments,
        },
    }
}

/// Places the markers for every section, section by section.
pub fn build(sections: &[Section], params: &LayoutParameters) -> Vec<Marker> {
    let style = &params.style;
    let offset = style.marker_offset * params.cell_size;
    let shape = marker_shape(params);
    let outlined = style.outlines.applies_to(PrimitiveKind::Marker);

    let markers: Vec<Marker> = sections
        .iter()
        .flat_map(|section| {
            let shape = &shape;
            Quadrant::ALL
                .into_iter()
                .enumerate()
                .map(move |(slot, corner)| {
                    let ground = section.center() + corner.signs() * offset;
                    let placement = Placement::on_board(ground, style.elevations.marker);
                    Marker {
                        quadrant: section.quadrant,
                        slot: slot as u8,
                        outline: outlined.then(|| outline(&placement, shape)),
                        placement,
                        shape: shape.clone(),
                        color: section.color,
                    }
                })
        })
        .collect();

    tracing::debug!(markers = markers.len(), "token slots built");
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::params::BoardVariant;
    use crate::board::sections;
    use crate::math::Vec2;

    #[test]
    fn test_four_markers_per_section() {
        let params = LayoutParameters::default();
        let sections = sections::build(&params);
        let markers = build(&sections, &params);
        assert_eq!(markers.len(), 16);
        for section in &sections {
            let owned: Vec<_> = markers
                .iter()
                .filter(|m| m.quadrant == section.quadrant)
                .collect();
            assert_eq!(owned.len(), MARKERS_PER_SECTION);
            assert!(owned.iter().all(|m| m.color == section.color));
        }
    }

    #[test]
    fn test_markers_offset_diagonally_from_section_centre() {
        let params = LayoutParameters::default();
        let sections = sections::build(&params);
        let markers = build(&sections, &params);

        let top_left: Vec<Vec2> = markers[..4]
            .iter()
            .map(|m| m.placement.position.ground())
            .collect();
        assert_eq!(
            top_left,
            vec![
                Vec2::new(-5.25, -5.25),
                Vec2::new(-3.75, -5.25),
                Vec2::new(-5.25, -3.75),
                Vec2::new(-3.75, -3.75),
            ]
        );
        assert_eq!(markers[0].slot, 0);
        assert_eq!(markers[3].slot, 3);
        assert_eq!(markers[0].placement.position.y(), 0.2);
    }

    #[test]
    fn test_markers_are_deterministic() {
        let params = LayoutParameters::default();
        let sections = sections::build(&params);
        assert_eq!(build(&sections, &params), build(&sections, &params));
    }

    #[test]
    fn test_minimal_markers_are_discs() {
        let params = LayoutParameters::default().with_variant(BoardVariant::Minimal);
        let sections = sections::build(&params);
        let markers = build(&sections, &params);
        assert!(matches!(markers[0].shape, Shape::Disc { segments: 32, .. }));
        assert!(markers.iter().all(|m| m.outline.is_some()));
    }
}
