//! Detection of finished games

use crate::board::{Board, Cell, Piece};

/// The state of a game after the last move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerWin,
    AiWin,
    Draw,
}

/// Whether `piece` has four aligned discs anywhere on the board
///
/// Every horizontal, vertical and diagonal line of four is checked, stopping at
/// the first complete one.
pub fn winning_move(board: &Board, piece: Piece) -> bool {
    let cell = Cell::from(piece);
    board
        .windows()
        .any(|window| window.iter().all(|&c| c == cell))
}

/// A node is terminal when either side has won or no column can be played
pub fn is_terminal(board: &Board) -> bool {
    winning_move(board, Piece::Player) || winning_move(board, Piece::Ai) || board.is_full()
}

/// The winner of the position, if any
pub fn winner(board: &Board) -> Option<Piece> {
    if winning_move(board, Piece::Ai) {
        Some(Piece::Ai)
    } else if winning_move(board, Piece::Player) {
        Some(Piece::Player)
    } else {
        None
    }
}

pub fn game_state(board: &Board) -> GameState {
    match winner(board) {
        Some(Piece::Ai) => GameState::AiWin,
        Some(Piece::Player) => GameState::PlayerWin,
        None if board.is_full() => GameState::Draw,
        None => GameState::Playing,
    }
}
