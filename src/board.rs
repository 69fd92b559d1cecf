//! The game board: a fixed grid of cells filled bottom-up under gravity

use std::fmt;

use crate::{error::BoardError, CONNECT, HEIGHT, WIDTH};

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Piece {
    Player,
    Ai,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::Player => Piece::Ai,
            Piece::Ai => Piece::Player,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Player => write!(f, "the player"),
            Piece::Ai => write!(f, "the AI"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    Player,
    Ai,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Player => Cell::Player,
            Piece::Ai => Cell::Ai,
        }
    }
}

/// Total number of 4-cell lines (horizontal, vertical and both diagonals)
pub const NUM_WINDOWS: usize = HEIGHT * (WIDTH - CONNECT + 1)
    + WIDTH * (HEIGHT - CONNECT + 1)
    + 2 * (HEIGHT - CONNECT + 1) * (WIDTH - CONNECT + 1);

const fn index(row: usize, column: usize) -> usize {
    column + WIDTH * row
}

/// Builds the cell indices of every window, grouped by orientation:
/// horizontal, vertical, diagonal `/` and diagonal `\`
const fn windows() -> [[usize; CONNECT]; NUM_WINDOWS] {
    // (row step, column step) for each orientation
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];
    let span = CONNECT as isize - 1;

    let mut windows = [[0; CONNECT]; NUM_WINDOWS];
    let mut n = 0;
    let mut d = 0;
    while d < DIRECTIONS.len() {
        let (dr, dc) = DIRECTIONS[d];
        let mut row = 0;
        while row < HEIGHT {
            let mut column = 0;
            while column < WIDTH {
                let end_row = row as isize + dr * span;
                let end_column = column as isize + dc * span;
                if end_row >= 0 && end_row < HEIGHT as isize && end_column < WIDTH as isize {
                    let mut i = 0;
                    while i < CONNECT {
                        windows[n][i] = index(
                            (row as isize + dr * i as isize) as usize,
                            (column as isize + dc * i as isize) as usize,
                        );
                        i += 1;
                    }
                    n += 1;
                }
                column += 1;
            }
            row += 1;
        }
        d += 1;
    }
    assert!(n == NUM_WINDOWS);
    windows
}

/// Cell indices of every window on the board
pub static WINDOWS: [[usize; CONNECT]; NUM_WINDOWS] = windows();

/// A Connect 4 grid, row 0 is the bottom row
///
/// Boards are small `Copy` values, so every branch of a search can own its
/// own copy. Within a column all empty cells sit above all occupied cells.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Builds a board from `HEIGHT` rows of `WIDTH` cells, bottom row first
    pub fn from_grid<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, BoardError> {
        let found_columns = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.len() != HEIGHT || rows.iter().any(|row| row.as_ref().len() != WIDTH) {
            return Err(BoardError::WrongDimensions {
                rows: HEIGHT,
                columns: WIDTH,
                found_rows: rows.len(),
                found_columns,
            });
        }

        let mut board = Self::new();
        for column in 0..WIDTH {
            for (row, cells) in rows.iter().enumerate() {
                let cell = cells.as_ref()[column];
                if cell.is_empty() {
                    continue;
                }
                // every disc must rest on the one below it
                if board.heights[column] != row {
                    return Err(BoardError::FloatingDisc { row, column });
                }
                board.cells[index(row, column)] = cell;
                board.heights[column] += 1;
            }
        }
        Ok(board)
    }

    /// Builds a board from a string of 1-indexed column digits, alternating
    /// pieces starting with `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Piece) -> Result<Self, BoardError> {
        let mut board = Self::new();
        let mut piece = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.play_checked(column - 1, piece)?;
                    piece = piece.opponent();
                }
                _ => return Err(BoardError::UnparsableMove(column_char)),
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[index(row, column)]
    }

    /// The cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[index(row, 0)..index(row + 1, 0)]
    }

    /// Number of discs on the board
    pub fn num_moves(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Rejects columns outside the board
    pub fn check_column(column: usize) -> Result<usize, BoardError> {
        if column < WIDTH {
            Ok(column)
        } else {
            Err(BoardError::InvalidColumn {
                column,
                max: WIDTH - 1,
            })
        }
    }

    /// Whether a disc can still be dropped into `column`
    ///
    /// `column` must be on the board, see [`Board::check_column`].
    pub fn is_valid_location(&self, column: usize) -> bool {
        self.cells[index(HEIGHT - 1, column)].is_empty()
    }

    /// The row a disc dropped into `column` lands on, `None` when the column is full
    pub fn next_open_row(&self, column: usize) -> Option<usize> {
        let height = self.heights[column];
        if height < HEIGHT {
            Some(height)
        } else {
            None
        }
    }

    /// Places a disc without any validation, the caller guarantees that
    /// `row` is the next open row of `column`
    pub fn drop_piece(&mut self, row: usize, column: usize, piece: Piece) {
        self.cells[index(row, column)] = piece.into();
        self.heights[column] = row + 1;
    }

    /// Removes the topmost disc of `column`, undoing the last `drop_piece` there
    pub fn remove_piece(&mut self, column: usize) {
        if self.heights[column] > 0 {
            self.heights[column] -= 1;
            self.cells[index(self.heights[column], column)] = Cell::Empty;
        }
    }

    /// Validates `column`, drops `piece` into it and returns the landing row
    pub fn play_checked(&mut self, column: usize, piece: Piece) -> Result<usize, BoardError> {
        let column = Self::check_column(column)?;
        let row = self
            .next_open_row(column)
            .ok_or(BoardError::ColumnFull { column })?;
        self.drop_piece(row, column, piece);
        Ok(row)
    }

    /// Columns that can still be played, in ascending order
    pub fn valid_locations(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.is_valid_location(column))
    }

    pub fn is_full(&self) -> bool {
        self.valid_locations().next().is_none()
    }

    /// Every 4-cell window of the board, see [`WINDOWS`]
    pub fn windows(&self) -> impl Iterator<Item = [Cell; CONNECT]> + '_ {
        WINDOWS.iter().map(move |window| window.map(|i| self.cells[i]))
    }

    /// The same position with the Player and AI discs exchanged
    pub fn swapped(&self) -> Self {
        let mut board = *self;
        for cell in board.cells.iter_mut() {
            *cell = match *cell {
                Cell::Empty => Cell::Empty,
                Cell::Player => Cell::Ai,
                Cell::Ai => Cell::Player,
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            for cell in self.row(row) {
                let symbol = match cell {
                    Cell::Empty => ' ',
                    Cell::Player => 'X',
                    Cell::Ai => 'O',
                };
                write!(f, "|{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", "-".repeat(2 * WIDTH + 3))
    }
}
