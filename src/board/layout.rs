//! The generated board: every primitive, validated and frozen.

use super::center::{self, Triangle};
use super::error::LayoutError;
use super::geometry::{Placement, PrimitiveKind, Shape};
use super::grid::{self, Cell, CellKind};
use super::outline::Outline;
use super::params::{Arm, Color, LayoutParameters, Quadrant};
use super::sections::{self, Section, squares_overlap};
use super::tokens::{self, Marker};
use crate::math::Vec2;

/// Immutable aggregate of everything [`generate`] produced.
///
/// Plain owned data: safe to share behind an `Arc` with any number of readers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    params: LayoutParameters,
    cells: Vec<Cell>,
    sections: Vec<Section>,
    markers: Vec<Marker>,
    triangles: Vec<Triangle>,
}

/// Borrowed, uniform view of one drawable primitive.
#[derive(Debug, Clone, Copy)]
pub struct Primitive<'a> {
    pub kind: PrimitiveKind,
    pub quadrant: Option<Quadrant>,
    /// Grid position, for cells.
    pub cell: Option<(u32, u32)>,
    /// Slot index, for markers.
    pub slot: Option<u8>,
    pub placement: &'a Placement,
    pub shape: &'a Shape,
    pub color: Color,
    pub outline: Option<&'a Outline>,
}

/// Runs every builder for `params` and checks the result.
///
/// Parameters are validated first; on error nothing is built.
pub fn generate(params: &LayoutParameters) -> Result<BoardLayout, LayoutError> {
    params.validate()?;

    let cells = if params.style.draw_grid {
        grid::build(params)?
    } else {
        Vec::new()
    };
    let sections = sections::build(params);
    let markers = tokens::build(&sections, params);
    let triangles = if params.style.draw_center {
        center::build(params)
    } else {
        Vec::new()
    };

    let layout = BoardLayout {
        params: params.clone(),
        cells,
        sections,
        markers,
        triangles,
    };
    layout.check_invariants()?;

    tracing::info!(
        board_size = params.board_size,
        cells = layout.cells.len(),
        sections = layout.sections.len(),
        markers = layout.markers.len(),
        triangles = layout.triangles.len(),
        outlines = layout.outline_count(),
        "board layout generated"
    );
    Ok(layout)
}

impl BoardLayout {
    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Cell at `(row, col)`, if the grid was generated.
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        let n = self.params.board_size;
        if self.cells.is_empty() || row >= n || col >= n {
            return None;
        }
        self.cells.get(row as usize * n as usize + col as usize)
    }

    /// Every primitive in draw order: cells, then per section the section and its
    /// safe square, then markers, then centre triangles.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> {
        let cells = self.cells.iter().map(|cell| Primitive {
            kind: PrimitiveKind::Cell,
            quadrant: cell.kind.arm().map(Arm::quadrant),
            cell: Some((cell.row, cell.col)),
            slot: None,
            placement: &cell.placement,
            shape: &cell.shape,
            color: cell.color,
            outline: cell.outline.as_ref(),
        });

        let sections = self.sections.iter().flat_map(|section| {
            [
                Primitive {
                    kind: PrimitiveKind::Section,
                    quadrant: Some(section.quadrant),
                    cell: None,
                    slot: None,
                    placement: &section.placement,
                    shape: &section.shape,
                    color: section.color,
                    outline: section.outline.as_ref(),
                },
                Primitive {
                    kind: PrimitiveKind::SafeSquare,
                    quadrant: Some(section.quadrant),
                    cell: None,
                    slot: None,
                    placement: &section.safe_placement,
                    shape: &section.safe_shape,
                    color: section.safe_color,
                    outline: section.safe_outline.as_ref(),
                },
            ]
        });

        let markers = self.markers.iter().map(|marker| Primitive {
            kind: PrimitiveKind::Marker,
            quadrant: Some(marker.quadrant),
            cell: None,
            slot: Some(marker.slot),
            placement: &marker.placement,
            shape: &marker.shape,
            color: marker.color,
            outline: marker.outline.as_ref(),
        });

        let triangles = self.triangles.iter().map(|triangle| Primitive {
            kind: PrimitiveKind::Triangle,
            quadrant: Some(triangle.quadrant),
            cell: None,
            slot: None,
            placement: &triangle.placement,
            shape: &triangle.shape,
            color: triangle.color,
            outline: triangle.outline.as_ref(),
        });

        cells.chain(sections).chain(markers).chain(triangles)
    }

    pub fn primitive_count(&self) -> usize {
        self.cells.len() + 2 * self.sections.len() + self.markers.len() + self.triangles.len()
    }

    pub fn outlines(&self) -> impl Iterator<Item = &Outline> {
        self.primitives().filter_map(|primitive| primitive.outline)
    }

    pub fn outline_count(&self) -> usize {
        self.outlines().count()
    }

    /// Largest distance from the board centre to any primitive corner along
    /// either axis.
    pub fn half_extent(&self) -> f32 {
        self.primitives()
            .flat_map(|primitive| {
                primitive
                    .shape
                    .boundary()
                    .into_iter()
                    .map(move |corner| primitive.placement.to_world(corner))
            })
            .map(|world| world.x().abs().max(world.z().abs()))
            .fold(0.0, f32::max)
    }

    /// Re-checks the geometric guarantees of a generated layout.
    pub fn check_invariants(&self) -> Result<(), LayoutError> {
        let h = center::half_width(&self.params);

        for (i, a) in self.sections.iter().enumerate() {
            for b in &self.sections[i + 1..] {
                if squares_overlap(a.center(), a.size, b.center(), b.size) {
                    return Err(LayoutError::InvariantViolation(format!(
                        "sections {} and {} overlap",
                        a.quadrant.label(),
                        b.quadrant.label()
                    )));
                }
            }
            if squares_overlap(a.center(), a.size, Vec2::ZERO, 2.0 * h) {
                return Err(LayoutError::InvariantViolation(format!(
                    "section {} overlaps the centre square",
                    a.quadrant.label()
                )));
            }
            let covered = self.cells.iter().find(|cell| {
                cell.kind != CellKind::Background
                    && squares_overlap(
                        a.center(),
                        a.size,
                        cell.placement.position.ground(),
                        self.params.cell_size,
                    )
            });
            if let Some(cell) = covered {
                return Err(LayoutError::InvariantViolation(format!(
                    "section {} covers path cell ({}, {})",
                    a.quadrant.label(),
                    cell.row,
                    cell.col
                )));
            }
        }

        if self.triangles.is_empty() {
            return Ok(());
        }

        if self.triangles.len() != 4 {
            return Err(LayoutError::InvariantViolation(format!(
                "expected 4 centre triangles, found {}",
                self.triangles.len()
            )));
        }

        let square_area = 4.0 * h * h;
        let total: f32 = self.triangles.iter().map(|t| t.shape.area()).sum();
        if (total - square_area).abs() > square_area * 1e-4 {
            return Err(LayoutError::InvariantViolation(format!(
                "centre triangles cover {total}, square is {square_area}"
            )));
        }

        for triangle in &self.triangles {
            if !triangle.vertices[0].approx_eq(&Vec2::ZERO, 1e-6) {
                return Err(LayoutError::InvariantViolation(format!(
                    "{:?} wedge apex is not at the board centre",
                    triangle.arm
                )));
            }
            let expected = center::base_edge(triangle.arm, h);
            if triangle.vertices[1..] != expected {
                return Err(LayoutError::InvariantViolation(format!(
                    "{:?} wedge base is not its edge of the centre square",
                    triangle.arm
                )));
            }

            let arm_color = self.params.color_of(triangle.arm.quadrant());
            if triangle.color != arm_color {
                return Err(LayoutError::InvariantViolation(format!(
                    "{:?} wedge is {} but its arm is {}",
                    triangle.arm, triangle.color, arm_color
                )));
            }
            let mismatched = self.cells.iter().any(|cell| {
                matches!(cell.kind, CellKind::Arm(arm) if arm == triangle.arm)
                    && cell.color != triangle.color
            });
            if mismatched {
                return Err(LayoutError::InvariantViolation(format!(
                    "{:?} arm cells disagree with their wedge color",
                    triangle.arm
                )));
            }
        }

        Ok(())
    }
}
