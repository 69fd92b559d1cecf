//! Messages exchanged with a remote match coordinator
//!
//! The coordinator announces each turn with a `ready` event carrying the
//! board and answers a `play` event with the chosen column. Once a game ends
//! it sends `finish` and waits for `player_ready` before the next game.
//! Only the message shapes and the decisions live here, the socket is left to
//! the caller.
//!
//! There is no error event in the protocol. A `ready` event that cannot be
//! answered (an unknown turn id, a malformed snapshot, a board that is
//! already won or full) yields a [`ProtocolError`] and no reply, leaving the
//! coordinator to settle the game on its own clock.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    board::{Board, Cell},
    error::{BoardError, ProtocolError},
    search::Engine,
};

/// Tournament joined when none is configured
pub const DEFAULT_TOURNAMENT_ID: u64 = 5555;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignIn {
    pub user_name: String,
    pub tournament_id: u64,
    pub user_role: String,
}

/// It is our turn in `game_id`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ready {
    pub game_id: Value,
    pub player_turn_id: u8,
    /// Rows listed top row first, 0 for an empty cell or the turn id of the owner
    pub board: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finish {
    pub game_id: Value,
    pub player_turn_id: u8,
    #[serde(default)]
    pub winner_turn_id: Option<u8>,
    pub board: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub tournament_id: u64,
    pub player_turn_id: u8,
    pub game_id: Value,
    pub movement: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReady {
    pub tournament_id: u64,
    pub player_turn_id: u8,
    pub game_id: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    Ready(Ready),
    Finish(Finish),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    Signin(SignIn),
    Play(Play),
    PlayerReady(PlayerReady),
}

/// Turn ids the coordinator hands out, one per seat
pub const TURN_IDS: [u8; 2] = [1, 2];

/// Converts a coordinator snapshot into a board seen from `own_id`'s side:
/// our discs become AI discs and the opponent's discs become player discs
pub fn board_from_snapshot(rows: &[Vec<u8>], own_id: u8) -> Result<Board, BoardError> {
    if !TURN_IDS.contains(&own_id) {
        return Err(BoardError::UnknownTurnId(own_id));
    }
    let opponent_id = TURN_IDS[0] + TURN_IDS[1] - own_id;

    let grid = rows
        .iter()
        .rev()
        .map(|row| {
            row.iter()
                .map(|&value| match value {
                    0 => Ok(Cell::Empty),
                    id if id == own_id => Ok(Cell::Ai),
                    id if id == opponent_id => Ok(Cell::Player),
                    other => Err(BoardError::UnknownCell(other)),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Board::from_grid(&grid)
}

/// Answers coordinator events for one signed-in player
#[derive(Copy, Clone, Debug)]
pub struct Session {
    engine: Engine,
    tournament_id: u64,
}

impl Session {
    pub fn new(engine: Engine, tournament_id: u64) -> Self {
        Self {
            engine,
            tournament_id,
        }
    }

    pub fn sign_in<S: Into<String>>(&self, user_name: S) -> Outbound {
        Outbound::Signin(SignIn {
            user_name: user_name.into(),
            tournament_id: self.tournament_id,
            user_role: "player".to_string(),
        })
    }

    pub fn handle(&self, event: Inbound) -> Result<Outbound, ProtocolError> {
        match event {
            Inbound::Ready(ready) => {
                let board = board_from_snapshot(&ready.board, ready.player_turn_id)?;
                debug!(
                    player = ready.player_turn_id,
                    discs = board.num_moves(),
                    "received board\n{}",
                    board
                );

                let movement = self.engine.choose_move(&board)?;
                info!(game = %ready.game_id, movement, "playing move");

                Ok(Outbound::Play(Play {
                    tournament_id: self.tournament_id,
                    player_turn_id: ready.player_turn_id,
                    game_id: ready.game_id,
                    movement,
                }))
            }
            Inbound::Finish(finish) => {
                match finish.winner_turn_id {
                    Some(winner) if winner == finish.player_turn_id => {
                        info!(game = %finish.game_id, "game won")
                    }
                    Some(0) | None => info!(game = %finish.game_id, "game drawn"),
                    Some(winner) => info!(game = %finish.game_id, winner, "game lost"),
                }

                Ok(Outbound::PlayerReady(PlayerReady {
                    tournament_id: self.tournament_id,
                    player_turn_id: finish.player_turn_id,
                    game_id: finish.game_id,
                }))
            }
        }
    }

    /// Decodes one JSON event and encodes the reply
    pub fn handle_line(&self, line: &str) -> Result<String, ProtocolError> {
        let event: Inbound = serde_json::from_str(line)?;
        let reply = self.handle(event)?;
        Ok(serde_json::to_string(&reply)?)
    }
}
