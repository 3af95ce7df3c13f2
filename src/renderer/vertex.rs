//! Vertex definitions and tessellation of a [`BoardLayout`] into GPU geometry.
//!
//! Filled primitives become triangle lists (a fan over each convex boundary);
//! outlines become line lists lifted a hair above the primitive they border so
//! they win the depth test against it.

use crate::board::{BoardLayout, Color, Outline, Placement, Shape};

/// Height added to outline vertices over their source primitive.
pub const OUTLINE_LIFT: f32 = 0.01;

/// Vertex data for the board pipelines.
///
/// Each vertex contains:
/// - `position`: 3D position in world space.
/// - `color`: sRGB bytes, converted to linear in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], color: Color) -> Self {
        Self {
            position,
            color: color.rgba(),
        }
    }

    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color (4 u8 bytes, read as normalized floats)
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
            ],
        }
    }
}

/// CPU-side geometry for one layout, ready to upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardMesh {
    /// Triangle list.
    pub fills: Vec<Vertex>,
    /// Line list, two vertices per segment.
    pub lines: Vec<Vertex>,
}

impl BoardMesh {
    pub fn from_layout(layout: &BoardLayout) -> Self {
        let mut mesh = BoardMesh::default();
        for primitive in layout.primitives() {
            mesh.push_fill(primitive.placement, primitive.shape, primitive.color);
            if let Some(outline) = primitive.outline {
                mesh.push_outline(outline);
            }
        }
        tracing::debug!(
            fill_vertices = mesh.fills.len(),
            line_vertices = mesh.lines.len(),
            "board mesh tessellated"
        );
        mesh
    }

    fn push_fill(&mut self, placement: &Placement, shape: &Shape, color: Color) {
        let corners: Vec<[f32; 3]> = shape
            .boundary()
            .into_iter()
            .map(|corner| placement.to_world(corner).into())
            .collect();
        let Some((&first, rest)) = corners.split_first() else {
            return;
        };
        for pair in rest.windows(2) {
            self.fills.push(Vertex::new(first, color));
            self.fills.push(Vertex::new(pair[0], color));
            self.fills.push(Vertex::new(pair[1], color));
        }
    }

    fn push_outline(&mut self, outline: &Outline) {
        let lift = |mut point: [f32; 3]| {
            point[1] += OUTLINE_LIFT;
            point
        };
        for segment in &outline.segments {
            let start = lift(outline.placement.to_world(segment.start).into());
            let end = lift(outline.placement.to_world(segment.end).into());
            self.lines.push(Vertex::new(start, outline.color));
            self.lines.push(Vertex::new(end, outline.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardVariant, LayoutParameters, generate};

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        assert_eq!(Vertex::desc().array_stride, 16);
    }

    #[test]
    fn test_classic_mesh_counts() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let mesh = BoardMesh::from_layout(&layout);

        // 249 rectangles at two triangles each plus 4 wedges
        assert_eq!(mesh.fills.len(), (249 * 2 + 4) * 3);
        // 249 rectangles at four edges each plus 4 wedges at three
        assert_eq!(mesh.lines.len(), (249 * 4 + 4 * 3) * 2);
    }

    #[test]
    fn test_minimal_mesh_counts() {
        let layout =
            generate(&LayoutParameters::default().with_variant(BoardVariant::Minimal)).unwrap();
        let mesh = BoardMesh::from_layout(&layout);

        // 8 squares plus 16 discs of 32 segments
        assert_eq!(mesh.fills.len(), (8 * 2 + 16 * 30) * 3);
        // 4 outlined safe squares plus 16 outlined discs
        assert_eq!(mesh.lines.len(), (4 * 4 + 16 * 32) * 2);
    }

    #[test]
    fn test_outlines_sit_above_their_fill() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let mesh = BoardMesh::from_layout(&layout);
        // The first cell's fill and outline.
        assert_eq!(mesh.fills[0].position[1], 0.0);
        assert_eq!(mesh.lines[0].position[1], OUTLINE_LIFT);
        assert_eq!(mesh.lines[0].color, [0, 0, 0, 255]);
        assert_eq!(mesh.fills[0].color, [255, 255, 255, 255]);
    }
}
