//! The central finishing square, split into four triangular wedges.

use super::geometry::{Placement, PrimitiveKind, Shape};
use super::outline::{Outline, outline};
use super::params::{Arm, Color, LayoutParameters, Quadrant};
use crate::math::Vec2;

/// One wedge of the finishing area. Local coordinates are board-plane offsets from
/// the board centre, so `vertices[0]` is always the apex at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub quadrant: Quadrant,
    /// The arm whose inner end this wedge closes.
    pub arm: Arm,
    pub placement: Placement,
    pub vertices: [Vec2; 3],
    pub shape: Shape,
    pub color: Color,
    pub outline: Option<Outline>,
}

/// Base of the wedge that caps `arm`, as the two corners of the central square
/// of half-width `h`, walking the square clockwise on screen.
pub fn base_edge(arm: Arm, h: f32) -> [Vec2; 2] {
    match arm {
        Arm::Top => [Vec2::new(-h, -h), Vec2::new(h, -h)],
        Arm::Right => [Vec2::new(h, -h), Vec2::new(h, h)],
        Arm::Bottom => [Vec2::new(h, h), Vec2::new(-h, h)],
        Arm::Left => [Vec2::new(-h, h), Vec2::new(-h, -h)],
    }
}

/// Half-width of the central square in world units.
pub fn half_width(params: &LayoutParameters) -> f32 {
    params.style.center_half_width * params.cell_size
}

/// Builds the four wedges in [`Arm::ALL`] order.
pub fn build(params: &LayoutParameters) -> Vec<Triangle> {
    let h = half_width(params);
    let placement = Placement::on_board(Vec2::ZERO, params.style.elevations.center);
    let outlined = params.style.outlines.applies_to(PrimitiveKind::Triangle);

    let triangles: Vec<Triangle> = Arm::ALL
        .into_iter()
        .map(|arm| {
            let [a, b] = base_edge(arm, h);
            let vertices = [Vec2::ZERO, a, b];
            let shape = Shape::Triangle { vertices };
            Triangle {
                quadrant: arm.quadrant(),
                arm,
                placement,
                vertices,
                color: params.color_of(arm.quadrant()),
                outline: outlined.then(|| outline(&placement, &shape)),
                shape,
            }
        })
        .collect();

    tracing::debug!(triangles = triangles.len(), half_width = h, "centre built");
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_wedges_tile_the_square() {
        let params = LayoutParameters::default();
        let triangles = build(&params);
        assert_eq!(triangles.len(), 4);

        let h = half_width(&params);
        let total: f32 = triangles.iter().map(|t| t.shape.area()).sum();
        assert!((total - (2.0 * h) * (2.0 * h)).abs() < 1e-5);

        for t in &triangles {
            assert_eq!(t.vertices[0], Vec2::ZERO);
            assert!((t.shape.area() - h * h).abs() < 1e-6);
        }
    }

    #[test]
    fn test_tiling_holds_for_other_half_widths() {
        for h in [0.5f32, 1.0, 2.5] {
            let mut params = LayoutParameters::default();
            params.style.center_half_width = h;
            params.style.section_margin = h.max(1.0);
            let total: f32 = build(&params).iter().map(|t| t.shape.area()).sum();
            assert!((total - 4.0 * h * h).abs() < 1e-4);
        }
    }

    #[test]
    fn test_adjacent_wedges_share_edges() {
        let triangles = build(&LayoutParameters::default());
        for (i, t) in triangles.iter().enumerate() {
            let next = &triangles[(i + 1) % 4];
            // Each base ends where the next one begins, and every wedge shares
            // the spoke from the apex to that corner.
            assert_eq!(t.vertices[2], next.vertices[1]);
        }
    }

    #[test]
    fn test_wedge_color_matches_arm_quadrant() {
        let params = LayoutParameters::default();
        for t in build(&params) {
            assert_eq!(t.quadrant, t.arm.quadrant());
            assert_eq!(t.color, params.color_of(t.arm.quadrant()));
        }
    }

    #[test]
    fn test_top_wedge_sits_above_centre() {
        let triangles = build(&LayoutParameters::default());
        let top = triangles.iter().find(|t| t.arm == Arm::Top).unwrap();
        assert!(top.shape.contains(Vec2::new(0.0, -0.75)));
        assert!(!top.shape.contains(Vec2::new(0.0, 0.75)));
    }
}
