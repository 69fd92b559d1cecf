//! Error types for the board boundary, the move selection facade and the
//! turn-notification protocol

use crate::board::Piece;

/// Errors raised when a move or a board snapshot violates the rules of the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} out of range, columns must be between 0 and {max}")]
    InvalidColumn { column: usize, max: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("could not parse '{0}' as a valid move")]
    UnparsableMove(char),

    #[error("expected a {rows}x{columns} grid, found {found_rows} rows and {found_columns} columns")]
    WrongDimensions {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("unknown cell value {0}")]
    UnknownCell(u8),

    #[error("unknown turn id {0}, expected 1 or 2")]
    UnknownTurnId(u8),

    #[error("floating disc at row {row}, column {column}")]
    FloatingDisc { row: usize, column: usize },
}

/// Errors returned by the move selection facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("no valid moves remain, the board is full")]
    NoValidMoves,

    #[error("the game is already over, {0} has four in a row")]
    GameOver(Piece),
}

/// Errors raised while answering coordinator events.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid board snapshot: {0}")]
    Board(#[from] BoardError),

    #[error("engine could not choose a move: {0}")]
    Engine(#[from] EngineError),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}
