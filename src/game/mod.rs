//! Tic-tac-toe rules
//!
//! Pure and stateless:
//! - Boards are immutable values, a move yields a new board
//! - Next player, winner and status are derived from the board alone
//! - No storage or platform dependencies

pub mod board;
pub mod rules;

pub use board::{BOARD_CELLS, Board, Player};
pub use rules::{InvalidMove, LINES, Outcome, apply_move, next_player, outcome, status, winner};
