//! Engine-against-engine games from every two-move opening

use anyhow::{anyhow, Result};
use indicatif::*;
use rayon::prelude::*;
use tracing::debug;

use std::sync::mpsc::*;
use std::thread;
use std::time::Instant;

use crate::{
    board::{Board, Piece},
    search::Engine,
    terminal::{game_state, GameState},
    WIDTH,
};

/// Results of a batch of self-play games, counted from the AI side
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    pub ai_wins: usize,
    pub player_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, state: GameState) {
        match state {
            GameState::AiWin => self.ai_wins += 1,
            GameState::PlayerWin => self.player_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
    }

    pub fn games(&self) -> usize {
        self.ai_wins + self.player_wins + self.draws
    }
}

/// Every pair of opening columns, the player moving first
pub fn openings() -> Vec<(usize, usize)> {
    (0..WIDTH)
        .flat_map(|first| (0..WIDTH).map(move |second| (first, second)))
        .collect()
}

/// Plays `board` out to the end, `to_move` moving next
///
/// The AI side is searched by `ai`, the player side by `player` on the
/// swapped board so that both engines maximise for their own discs.
pub fn play_out(
    mut board: Board,
    mut to_move: Piece,
    ai: Engine,
    player: Engine,
) -> Result<GameState> {
    loop {
        let state = game_state(&board);
        if state != GameState::Playing {
            return Ok(state);
        }

        let column = match to_move {
            Piece::Ai => ai.choose_move(&board)?,
            Piece::Player => player.choose_move(&board.swapped())?,
        };
        board.play_checked(column, to_move)?;
        to_move = to_move.opponent();
    }
}

/// Plays every opening of [`openings`] in parallel and tallies the results
pub fn play_openings(ai: Engine, player: Engine) -> Result<Tally> {
    let start = Instant::now();
    let openings = openings();
    let total = openings.len();

    let (tx, rx) = channel();
    let worker = thread::spawn(move || {
        // stops at the first failed send, the receiver only hangs up after an error
        openings.par_iter().try_for_each_with(tx, |tx, &(first, second)| {
            let mut board = Board::new();
            board.drop_piece(0, first, Piece::Player);
            let row = if first == second { 1 } else { 0 };
            board.drop_piece(row, second, Piece::Ai);

            let result = play_out(board, Piece::Player, ai, player);
            tx.send(((first, second), result))
        })
        .ok();
    });

    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing openings: {bar:40.cyan/blue} {pos}/{len} {msg} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let mut tally = Tally::default();
    let mut failure = None;
    for _ in 0..total {
        let ((first, second), result) = rx.recv()?;
        let state = match result {
            Ok(state) => state,
            Err(err) => {
                failure = Some(err.context(format!("opening {}{}", first + 1, second + 1)));
                break;
            }
        };
        debug!(first, second, ?state, "opening finished");

        tally.record(state);
        progress.inc(1);
        progress.set_message(&format!(
            "(AI {} / player {} / draw {})",
            tally.ai_wins, tally.player_wins, tally.draws
        ));
    }
    progress.finish();

    // hanging up makes the worker's next send fail and ends its iteration
    drop(rx);
    worker
        .join()
        .map_err(|_| anyhow!("self-play worker thread panicked"))?;
    if let Some(err) = failure {
        return Err(err);
    }

    println!(
        "Played {} openings in {}",
        tally.games(),
        HumanDuration(start.elapsed())
    );
    Ok(tally)
}
