use quickcheck::{Arbitrary, Gen};

use crate::{Board, Cell, Position, Rules};

/// A board, a starting cell and a target cell for checking the capture rule.
#[derive(Clone, Debug)]
pub struct CaptureInput {
    pub board: Board,
    pub rules: Rules,
    /// Usually a tiger, but not always
    pub tiger: Position,
    /// Usually in jumping distance, but not always
    pub dest: Position,
}

impl Arbitrary for CaptureInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let board = Board::arbitrary(g);
        let rules = Rules {
            diagonal_captures: bool::arbitrary(g),
        };

        let tigers: Vec<Position> = board.tigers().collect();
        let tiger = match g.choose(&tigers) {
            Some(&pos) if u8::arbitrary(g) % 4 != 0 => pos,
            _ => arbitrary_position_near(g, board.size()),
        };

        // Bias towards real jumps, with the occasional odd displacement
        let dest = if bool::arbitrary(g) {
            let (d_row, d_col) = *g
                .choose(&[
                    (-2, 0),
                    (2, 0),
                    (0, -2),
                    (0, 2),
                    (-2, -2),
                    (-2, 2),
                    (2, -2),
                    (2, 2),
                ])
                .unwrap();
            Position::new(tiger.row + d_row, tiger.col + d_col)
        } else {
            let d_row = (u8::arbitrary(g) % 7) as i8 - 3;
            let d_col = (u8::arbitrary(g) % 7) as i8 - 3;
            Position::new(tiger.row + d_row, tiger.col + d_col)
        };

        CaptureInput {
            board,
            rules,
            tiger,
            dest,
        }
    }
}

/// A position on the board or at most one cell outside of it.
fn arbitrary_position_near(g: &mut Gen, size: i8) -> Position {
    let span = (size + 2) as u8;
    Position::new(
        (u8::arbitrary(g) % span) as i8 - 1,
        (u8::arbitrary(g) % span) as i8 - 1,
    )
}

impl Arbitrary for Cell {
    fn arbitrary(g: &mut Gen) -> Self {
        // Goats are the most common piece in real games
        *g.choose(&[Cell::Empty, Cell::Empty, Cell::Goat, Cell::Goat, Cell::Tiger])
            .unwrap()
    }
}

impl Arbitrary for Board {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = (u8::arbitrary(g) % 5) as i8 + 3;
        let mut board = Board::empty(size);
        let positions: Vec<Position> = board.positions().collect();
        for pos in positions {
            match Cell::arbitrary(g) {
                Cell::Empty => {}
                Cell::Goat => board.place_goat(pos).unwrap(),
                Cell::Tiger => board.place_tiger(pos).unwrap(),
            }
        }
        board
    }
}
