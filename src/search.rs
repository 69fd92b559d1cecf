//! An agent to choose Connect 4 moves with a depth-limited game tree search

use static_assertions::*;
use tracing::debug;

use std::time::Instant;

use crate::{
    board::{Board, Piece},
    error::EngineError,
    evaluation::{score_position, MAX_HEURISTIC},
    terminal::{winner, winning_move},
    WIDTH,
};

/// Value of a position where the AI has four in a row
pub const AI_WIN_SCORE: i64 = 100_000_000_000_000;
/// Value of a position where the player has four in a row
pub const PLAYER_WIN_SCORE: i64 = -10_000_000_000_000;

// wins and losses must rank above and below every heuristic value
const_assert!(AI_WIN_SCORE > MAX_HEURISTIC);
const_assert!(PLAYER_WIN_SCORE < -MAX_HEURISTIC);

/// Search depth for local interactive play
pub const LOCAL_DEPTH: u32 = 6;
/// Search depth when answering a live turn notification
pub const LIVE_DEPTH: u32 = 5;

/// The column picked at a node and its value, `column` is `None` at leaves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i64,
}

/// A minimax search with alpha-beta pruning
///
/// # Notes
/// Maximizing plies drop AI discs and minimizing plies drop player discs.
/// Columns are explored left to right and a child only replaces the current
/// best when it is strictly better, so ties go to the leftmost column.
///
/// # Position Scoring
/// A position where the AI has four in a row is worth [`AI_WIN_SCORE`], one
/// where the player does is worth [`PLAYER_WIN_SCORE`] and a full board is
/// worth 0. When the depth runs out first, the position is scored by
/// [`score_position`] from the AI's point of view, at every ply.
#[derive(Clone, Debug)]
pub struct Minimax {
    /// The number of nodes searched by this `Minimax` so far (for diagnostics only)
    pub node_count: usize,
    pruning: bool,
    undo_moves: bool,
}

impl Minimax {
    /// Creates a pruning search that copies the board for every child
    pub fn new() -> Self {
        Self {
            node_count: 0,
            pruning: true,
            undo_moves: false,
        }
    }

    /// Disables alpha-beta cutoffs, visiting the whole tree
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Plays and takes back moves on a single board instead of copying it
    pub fn with_undo(mut self) -> Self {
        self.undo_moves = true;
        self
    }

    /// Searches `depth` plies below `board`
    ///
    /// Returns the best column for the side to move (`None` at a leaf) and
    /// its value.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        alpha: i64,
        beta: i64,
        maximizing: bool,
    ) -> SearchResult {
        let mut board = *board;
        self.minimax(&mut board, depth, alpha, beta, maximizing)
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> SearchResult {
        self.node_count += 1;

        if let Some(score) = leaf_value(board, depth) {
            return SearchResult {
                column: None,
                score,
            };
        }

        let piece = if maximizing { Piece::Ai } else { Piece::Player };
        let mut best = SearchResult {
            column: board.valid_locations().next(),
            score: if maximizing { i64::MIN } else { i64::MAX },
        };

        for column in 0..WIDTH {
            // full columns are skipped, leaving the valid locations in ascending order
            let row = match board.next_open_row(column) {
                Some(row) => row,
                None => continue,
            };

            let score = if self.undo_moves {
                board.drop_piece(row, column, piece);
                let score = self
                    .minimax(board, depth - 1, alpha, beta, !maximizing)
                    .score;
                board.remove_piece(column);
                score
            } else {
                let mut child = *board;
                child.drop_piece(row, column, piece);
                self.minimax(&mut child, depth - 1, alpha, beta, !maximizing)
                    .score
            };

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        column: Some(column),
                        score,
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        column: Some(column),
                        score,
                    };
                }
                beta = beta.min(best.score);
            }

            // the opponent already has a better alternative higher up the tree
            if self.pruning && alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

/// The value of `board` when the search stops here, `None` if it must continue
fn leaf_value(board: &Board, depth: u32) -> Option<i64> {
    if winning_move(board, Piece::Ai) {
        Some(AI_WIN_SCORE)
    } else if winning_move(board, Piece::Player) {
        Some(PLAYER_WIN_SCORE)
    } else if board.is_full() {
        Some(0)
    } else if depth == 0 {
        Some(score_position(board, Piece::Ai))
    } else {
        None
    }
}

/// A move chosen by the [`Engine`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Decision {
    pub column: usize,
    pub score: i64,
    pub node_count: usize,
}

/// Chooses AI moves at a fixed search depth
///
/// The engine holds no state between calls, the same board and depth always
/// give the same decision.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Engine {
    depth: u32,
}

impl Engine {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// An engine searching [`LOCAL_DEPTH`] plies
    pub fn local() -> Self {
        Self::new(LOCAL_DEPTH)
    }

    /// An engine searching [`LIVE_DEPTH`] plies
    pub fn live() -> Self {
        Self::new(LIVE_DEPTH)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Searches for the AI's best move, rejecting boards with no move to make
    pub fn decide(&self, board: &Board) -> Result<Decision, EngineError> {
        if self.depth == 0 {
            return Err(EngineError::ZeroDepth);
        }
        if let Some(piece) = winner(board) {
            return Err(EngineError::GameOver(piece));
        }
        if board.is_full() {
            return Err(EngineError::NoValidMoves);
        }

        let start_time = Instant::now();
        let mut minimax = Minimax::new();
        let result = minimax.search(board, self.depth, i64::MIN, i64::MAX, true);
        let column = result.column.ok_or(EngineError::NoValidMoves)?;

        debug!(
            depth = self.depth,
            column,
            score = result.score,
            nodes = minimax.node_count,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "chose move"
        );

        Ok(Decision {
            column,
            score: result.score,
            node_count: minimax.node_count,
        })
    }

    pub fn choose_move(&self, board: &Board) -> Result<usize, EngineError> {
        self.decide(board).map(|decision| decision.column)
    }
}

/// Chooses the AI's column for `board`, searching `depth` plies
pub fn choose_move(board: &Board, depth: u32) -> Result<usize, EngineError> {
    Engine::new(depth).choose_move(board)
}

/// Chooses the AI's column for `board` together with its value
pub fn choose_move_with_score(board: &Board, depth: u32) -> Result<(usize, i64), EngineError> {
    Engine::new(depth)
        .decide(board)
        .map(|decision| (decision.column, decision.score))
}
