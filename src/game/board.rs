//! Board and player types
//!
//! The board is a plain value: every move produces a new board.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// A player mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Always moves first
    X,
    O,
}

impl Player {
    pub fn as_str(&self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 3x3 board in row-major order.
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
///
/// Serializes as a 9-element array of `null`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Option<Player>; BOARD_CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from raw cells
    pub fn from_cells(cells: [Option<Player>; BOARD_CELLS]) -> Self {
        Self { cells }
    }

    /// Mark at `index`, `None` if empty or out of range
    pub fn get(&self, index: usize) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn cells(&self) -> &[Option<Player>; BOARD_CELLS] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Copy of this board with `index` set to `player`.
    ///
    /// Callers validate the move first (see [`super::apply_move`]).
    pub(crate) fn with_mark(&self, index: usize, player: Player) -> Self {
        let mut cells = self.cells;
        cells[index] = Some(player);
        Self { cells }
    }

    /// Display strings for each cell (`""` when empty)
    pub fn labels(&self) -> [&'static str; BOARD_CELLS] {
        self.cells.map(|c| c.map(|p| p.as_str()).unwrap_or(""))
    }
}

impl fmt::Display for Board {
    /// Grid with empty cells shown as their 1-based square number
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, "{}", index + 1)?,
                }
                if col < 2 {
                    f.write_str(" | ")?;
                }
            }
            if row < 2 {
                f.write_str("\n---------\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        assert_eq!(board.filled(), 0);
        assert!(!board.is_full());
        assert_eq!(board.get(4), None);
        assert_eq!(board.get(42), None);
    }

    #[test]
    fn test_with_mark_copies() {
        let board = Board::new();
        let next = board.with_mark(4, Player::X);
        assert_eq!(board.get(4), None);
        assert_eq!(next.get(4), Some(Player::X));
        assert_eq!(next.filled(), 1);
    }

    #[test]
    fn test_json_matches_legacy_format() {
        let board = Board::new().with_mark(0, Player::X).with_mark(4, Player::O);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X",null,null,null,"O",null,null,null,null]"#);

        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_json_rejects_wrong_length() {
        assert!(serde_json::from_str::<Board>("[null,null]").is_err());
        assert!(serde_json::from_str::<Board>(r#"["Z",null,null,null,null,null,null,null,null]"#).is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::new().with_mark(0, Player::X).with_mark(8, Player::O);
        assert_eq!(
            board.to_string(),
            "X | 2 | 3\n---------\n4 | 5 | 6\n---------\n7 | 8 | O"
        );
    }

    #[test]
    fn test_labels() {
        let board = Board::new().with_mark(2, Player::O);
        assert_eq!(board.labels(), ["", "", "O", "", "", "", "", "", ""]);
    }
}
