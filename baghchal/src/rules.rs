use serde::{Deserialize, Serialize};

use crate::{Board, Cell, Position};

/// Optional rule variations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Whether tigers may also jump diagonally, i.e. two cells along both axes.
    pub diagonal_captures: bool,
}

static ORTHOGONAL_JUMPS: [(i8, i8); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];
static DIAGONAL_JUMPS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

impl Rules {
    /// The displacements `(d_row, d_col)` a capturing tiger can make.
    pub fn jump_offsets(&self) -> impl Iterator<Item = (i8, i8)> {
        let diagonal: &'static [(i8, i8)] = if self.diagonal_captures {
            &DIAGONAL_JUMPS
        } else {
            &[]
        };
        ORTHOGONAL_JUMPS.iter().chain(diagonal).copied()
    }

    /// Whether a displacement has the shape of a jump over exactly one cell.
    pub fn is_jump(&self, d_row: i16, d_col: i16) -> bool {
        match (d_row.abs(), d_col.abs()) {
            (2, 0) | (0, 2) => true,
            (2, 2) => self.diagonal_captures,
            _ => false,
        }
    }
}

/// Checks whether the tiger at `tiger` may capture by jumping to `dest`.
///
/// This is the only place where the capture rule is implemented. A capture is legal iff
/// * there is a tiger at `tiger`,
/// * `dest` is on the board,
/// * `dest` is two cells away along one axis (or along both axes, with diagonal captures),
/// * there is a goat on the cell in between, and
/// * `dest` is empty.
pub fn is_legal_capture(board: &Board, rules: &Rules, tiger: Position, dest: Position) -> bool {
    if board.get(tiger) != Some(Cell::Tiger) || !board.is_in_bounds(dest) {
        return false;
    }
    let d_row = i16::from(dest.row) - i16::from(tiger.row);
    let d_col = i16::from(dest.col) - i16::from(tiger.col);
    if !rules.is_jump(d_row, d_col) {
        return false;
    }
    let Some(jumped_over) = tiger.midpoint(dest) else {
        return false;
    };
    board.get(jumped_over) == Some(Cell::Goat) && board.get(dest) == Some(Cell::Empty)
}
