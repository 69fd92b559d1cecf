//! Heuristic scoring of positions the search cannot see past

use crate::board::{Board, Cell, Piece, NUM_WINDOWS};
use crate::CONNECT;

/// Bonus for a complete line of four
pub const FOUR_SCORE: i64 = 1000;
/// Bonus for three discs and one open cell
pub const THREE_SCORE: i64 = 10;
/// Bonus for two discs and two open cells
pub const TWO_SCORE: i64 = 5;
/// Penalty for an opponent's three discs and one open cell
pub const OPPONENT_THREE_SCORE: i64 = -100;

/// Largest magnitude `score_position` can ever return
pub const MAX_HEURISTIC: i64 = NUM_WINDOWS as i64 * FOUR_SCORE;

/// Scores a single window for `piece`
pub fn evaluate_window(window: &[Cell; CONNECT], piece: Piece) -> i64 {
    let own = Cell::from(piece);
    let opponent = Cell::from(piece.opponent());

    let count = |target: Cell| window.iter().filter(|&&c| c == target).count();
    let (own_count, opponent_count, empty_count) =
        (count(own), count(opponent), count(Cell::Empty));

    let mut score = match (own_count, empty_count) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };

    // counted on top of any pattern of our own
    if opponent_count == 3 && empty_count == 1 {
        score += OPPONENT_THREE_SCORE;
    }

    score
}

/// Sums the window scores of every horizontal, vertical and diagonal window
/// from the point of view of `piece`
pub fn score_position(board: &Board, piece: Piece) -> i64 {
    board
        .windows()
        .map(|window| evaluate_window(&window, piece))
        .sum()
}
