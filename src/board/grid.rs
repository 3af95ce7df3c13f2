//! The N×N base grid and the colored cross path running through it.

use super::error::LayoutError;
use super::geometry::{Placement, PrimitiveKind, Shape};
use super::outline::{Outline, outline};
use super::params::{Arm, Color, LayoutParameters};

/// What a grid cell is painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Background,
    /// Part of an arm's straight run toward the centre.
    Arm(Arm),
    /// The entry square of an arm, one row or column off the centre line.
    Start(Arm),
}

impl CellKind {
    pub fn arm(self) -> Option<Arm> {
        match self {
            CellKind::Background => None,
            CellKind::Arm(arm) | CellKind::Start(arm) => Some(arm),
        }
    }
}

/// One square of the base grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub kind: CellKind,
    pub color: Color,
    pub placement: Placement,
    pub shape: Shape,
    pub outline: Option<Outline>,
}

/// Cells of `arm`'s straight run, from the board edge inward.
///
/// The outermost cell of each line and the centre cell are not part of the run.
pub fn arm_run(arm: Arm, board_size: u32) -> impl Iterator<Item = (u32, u32)> {
    let c = (board_size - 1) / 2;
    let last = board_size - 1;
    (1..c).map(move |k| match arm {
        Arm::Left => (c, k),
        Arm::Right => (c, last - k),
        Arm::Top => (k, c),
        Arm::Bottom => (last - k, c),
    })
}

/// The entry square of `arm`: second cell in from the edge, shifted one line
/// toward the arm's home quadrant.
pub fn start_cell(arm: Arm, board_size: u32) -> (u32, u32) {
    let c = (board_size - 1) / 2;
    let last = board_size - 1;
    match arm {
        Arm::Left => (c - 1, 1),
        Arm::Top => (1, c + 1),
        Arm::Right => (c + 1, last - 1),
        Arm::Bottom => (last - 1, c - 1),
    }
}

/// Number of path-colored cells on a board of `board_size`: `c - 1` run cells per
/// arm plus one start cell per arm, which comes to `4 * (board_size - 1) / 2`.
pub fn path_cell_count(board_size: u32) -> usize {
    4 * ((board_size as usize - 1) / 2)
}

/// Builds every cell in row-major order.
pub fn build(params: &LayoutParameters) -> Result<Vec<Cell>, LayoutError> {
    let n = params.board_size;
    if n % 2 == 0 {
        return Err(LayoutError::invalid(
            "board_size",
            n,
            "must be odd so a single centre cell exists",
        ));
    }

    let side = n as usize;
    let mut kinds = vec![CellKind::Background; side * side];
    let index = |(row, col): (u32, u32)| row as usize * side + col as usize;

    for arm in Arm::ALL {
        for position in arm_run(arm, n) {
            kinds[index(position)] = CellKind::Arm(arm);
        }
        kinds[index(start_cell(arm, n))] = CellKind::Start(arm);
    }

    let style = &params.style;
    let shape = Shape::square(params.cell_size);
    let outlined = style.outlines.applies_to(PrimitiveKind::Cell);

    let cells: Vec<Cell> = kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let (row, col) = ((i / side) as u32, (i % side) as u32);
            let placement =
                Placement::on_board(params.cell_center(row, col), style.elevations.grid);
            let color = match kind.arm() {
                Some(arm) => params.color_of(arm.quadrant()),
                None => style.background,
            };
            Cell {
                row,
                col,
                kind,
                color,
                outline: outlined.then(|| outline(&placement, &shape)),
                placement,
                shape: shape.clone(),
            }
        })
        .collect();

    tracing::debug!(cells = cells.len(), board_size = n, "grid built");
    Ok(cells)
}
