use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    is_legal_capture, IllegalCapture, InvalidPlacement, Move, OutOfBounds, PositionFromStrErr, Rules,
};

/// The side length of the standard board.
pub const BOARD_SIZE: i8 = 5;

/// A coordinate pair on the board.
///
/// `row` and `col` are matrix indices, i.e. `(0, 0)` is the top left corner.
/// A position is not necessarily on the board, see [`Board::is_in_bounds()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Returns `None` if the result does not fit into the coordinate type.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    /// The cell exactly halfway between `self` and `other`.
    ///
    /// Returns `None` when the halfway point falls between cells, i.e. when
    /// the displacement is odd along some axis.
    pub fn midpoint(self, other: Position) -> Option<Position> {
        let row_sum = i16::from(self.row) + i16::from(other.row);
        let col_sum = i16::from(self.col) + i16::from(other.col);
        if row_sum % 2 != 0 || col_sum % 2 != 0 {
            return None;
        }
        // The average of two i8 values is always an i8
        Some(Position {
            row: (row_sum / 2) as i8,
            col: (col_sum / 2) as i8,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"2 3"`, `"2,3"` and `"(2, 3)"`.
impl FromStr for Position {
    type Err = PositionFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);
        let mut coords = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let row = coords.next().ok_or(PositionFromStrErr::TooFewCoordinates)?;
        let col = coords.next().ok_or(PositionFromStrErr::TooFewCoordinates)?;
        if coords.next().is_some() {
            return Err(PositionFromStrErr::TooManyCoordinates);
        }
        let parse = |coord: &str| {
            coord
                .parse::<i8>()
                .map_err(|_| PositionFromStrErr::InvalidCoordinate(String::from(coord)))
        };
        Ok(Position {
            row: parse(row)?,
            col: parse(col)?,
        })
    }
}

/// The contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Goat,
    Tiger,
}

impl Cell {
    pub fn name(&self) -> &'static str {
        match self {
            Cell::Empty => "empty cell",
            Cell::Goat => "goat",
            Cell::Tiger => "tiger",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Goat => 'G',
            Cell::Tiger => 'T',
        }
    }
}

/// A square grid of cells.
///
/// Pieces only enter the board through [`Board::place_tiger()`] and
/// [`Board::place_goat()`], and only move through [`Board::capture()`], so
/// two pieces can never share a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: i8,
    /// Row-major, `size * size` entries.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board where every cell is empty.
    ///
    /// Panics if `size` is not positive.
    pub fn empty(size: i8) -> Self {
        assert!(size > 0, "Board size must be positive, got {}", size);
        let num_cells = size as usize * size as usize;
        Self {
            size,
            cells: vec![Cell::Empty; num_cells],
        }
    }

    pub fn size(&self) -> i8 {
        self.size
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.row) && (0..self.size).contains(&pos.col)
    }

    /// Whether the position lies in the outermost ring of the board.
    pub fn is_on_edge(&self, pos: Position) -> bool {
        self.is_in_bounds(pos)
            && (pos.row == 0 || pos.col == 0 || pos.row == self.size - 1 || pos.col == self.size - 1)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_in_bounds(pos) {
            Some(pos.row as usize * self.size as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Returns `None` for positions off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn cell_at(&self, pos: Position) -> Result<Cell, OutOfBounds> {
        self.get(pos).ok_or(OutOfBounds {
            pos,
            size: self.size,
        })
    }

    pub fn place_tiger(&mut self, pos: Position) -> Result<(), InvalidPlacement> {
        self.place(pos, Cell::Tiger)
    }

    pub fn place_goat(&mut self, pos: Position) -> Result<(), InvalidPlacement> {
        self.place(pos, Cell::Goat)
    }

    // The board is only written to after all checks passed
    fn place(&mut self, pos: Position, piece: Cell) -> Result<(), InvalidPlacement> {
        let idx = self.index(pos).ok_or(InvalidPlacement::OutOfBounds { pos })?;
        match self.cells[idx] {
            Cell::Empty => {
                self.cells[idx] = piece;
                Ok(())
            }
            occupant => Err(InvalidPlacement::Occupied { pos, occupant }),
        }
    }

    /// Computes the board after the tiger performs the capture `mv`.
    ///
    /// The move is validated with [`is_legal_capture()`] first; `self` is never modified.
    pub fn capture(&self, rules: &Rules, mv: &Move) -> Result<Board, IllegalCapture> {
        if !is_legal_capture(self, rules, mv.origin, mv.destination)
            || mv.origin.midpoint(mv.destination) != Some(mv.captured)
        {
            return Err(IllegalCapture { mv: *mv });
        }
        let mut next = self.clone();
        for (pos, cell) in [
            (mv.origin, Cell::Empty),
            (mv.captured, Cell::Empty),
            (mv.destination, Cell::Tiger),
        ] {
            // All three positions were checked to be in bounds by is_legal_capture()
            if let Some(idx) = next.index(pos) {
                next.cells[idx] = cell;
            }
        }
        Ok(next)
    }

    /// All positions on the board, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position { row, col }))
    }

    fn positions_of(&self, piece: Cell) -> impl Iterator<Item = Position> + '_ {
        self.positions()
            .zip(self.cells.iter())
            .filter(move |&(_, &cell)| cell == piece)
            .map(|(pos, _)| pos)
    }

    pub fn tigers(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions_of(Cell::Tiger)
    }

    pub fn goats(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions_of(Cell::Goat)
    }

    pub fn tiger_count(&self) -> usize {
        self.tigers().count()
    }

    pub fn goat_count(&self) -> usize {
        self.goats().count()
    }

    pub fn empty_count(&self) -> usize {
        self.positions_of(Cell::Empty).count()
    }

    /// The rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size as usize)
    }

    /// A read-only copy of the grid, for display purposes.
    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}
