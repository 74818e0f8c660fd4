use crate::Board;

/// Draws the board as text, with row and column numbers.
///
/// ```text
///      0 1 2
///    ╭───────╮
///  0 │ T . T │
///  1 │ . G . │
///  2 │ . T . │
///    ╰───────╯
/// ```
pub fn visualize_board(board: &Board) -> String {
    let size = board.size() as usize;
    let border = "─".repeat(2 * size + 1);

    let mut result = String::from("    ");
    for col in 0..size {
        result += &format!("{:>2}", col);
    }
    result += &format!("\n   ╭{}╮\n", border);
    for (row, cells) in board.rows().enumerate() {
        result += &format!("{:>2} │", row);
        for cell in cells {
            result.push(' ');
            result.push(cell.symbol());
        }
        result += " │\n";
    }
    result += &format!("   ╰{}╯", border);
    result
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn small_board() {
        let mut board = Board::empty(3);
        board.place_tiger(Position::new(0, 0)).unwrap();
        board.place_tiger(Position::new(0, 2)).unwrap();
        board.place_tiger(Position::new(2, 1)).unwrap();
        board.place_goat(Position::new(1, 1)).unwrap();
        let expected = [
            "     0 1 2",
            "   ╭───────╮",
            " 0 │ T . T │",
            " 1 │ . G . │",
            " 2 │ . T . │",
            "   ╰───────╯",
        ]
        .join("\n");
        assert_eq!(board.to_string(), expected);
    }
}
