//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! The agent searches a bounded number of plies with alpha-beta pruning and
//! scores the positions it cannot see past with a heuristic that rewards
//! open threes and twos and heavily penalises the opponent's open threes.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::{Board, Piece}, search::choose_move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // the player has three discs along the bottom row, the AI must block
//! let board = Board::from_moves("152636", Piece::Player)?;
//! let column = choose_move(&board, 2)?;
//!
//! assert_eq!(column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod terminal;

pub mod evaluation;

pub mod search;

pub mod protocol;

pub mod selfplay;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
