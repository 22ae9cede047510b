//! Move rules and derived state
//!
//! Everything here is a pure function of the board.

use thiserror::Error;

use super::board::{BOARD_CELLS, Board, Player};

/// The 8 winning lines, scanned in this order
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Why a move was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("the game is already decided")]
    GameDecided,

    #[error("square {0} is already taken")]
    Occupied(usize),

    #[error("square {0} is off the board")]
    OutOfBounds(usize),
}

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Player),
    /// All cells filled without a line
    Drawn,
}

impl Outcome {
    /// Won and Drawn accept no further moves
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Whose turn it is: X on an even number of filled cells, O on odd
pub fn next_player(board: &Board) -> Player {
    if board.filled() % 2 == 0 {
        Player::X
    } else {
        Player::O
    }
}

/// Player holding the first completed line, if any
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.get(a)?;
        (board.get(b) == Some(mark) && board.get(c) == Some(mark)).then_some(mark)
    })
}

/// Status line shown above the board
pub fn status(winner: Option<Player>, board: &Board, next: Player) -> String {
    match winner {
        Some(player) => format!("Winner: {player}"),
        None if board.is_full() => "Scratch: Cat's game".to_string(),
        None => format!("Next player: {next}"),
    }
}

/// Place `player` at `index`, producing a new board.
///
/// The input board is never modified.
pub fn apply_move(board: &Board, index: usize, player: Player) -> Result<Board, InvalidMove> {
    if winner(board).is_some() {
        return Err(InvalidMove::GameDecided);
    }
    if index >= BOARD_CELLS {
        return Err(InvalidMove::OutOfBounds(index));
    }
    if board.is_occupied(index) {
        return Err(InvalidMove::Occupied(index));
    }
    Ok(board.with_mark(index, player))
}

pub fn outcome(board: &Board) -> Outcome {
    match winner(board) {
        Some(player) => Outcome::Won(player),
        None if board.is_full() => Outcome::Drawn,
        None => Outcome::InProgress,
    }
}
