use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar};
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::io::{stdin, stdout, BufRead, Write};
use std::time::Instant;

use connect4_minimax::{
    board::{Board, Piece},
    protocol::{Session, DEFAULT_TOURNAMENT_ID},
    search::{Engine, LIVE_DEPTH, LOCAL_DEPTH},
    selfplay,
    terminal::{game_state, GameState},
    WIDTH,
};

mod display;

#[derive(Parser)]
#[command(about = "Play Connect 4 against a minimax agent")]
struct Args {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info", global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game against the AI in the terminal
    Play {
        /// Number of plies the AI searches
        #[arg(short, long, default_value_t = LOCAL_DEPTH)]
        depth: u32,

        /// Let the AI make the first move
        #[arg(long, default_value_t = false)]
        ai_first: bool,
    },

    /// Answer match coordinator events, read as JSON lines from stdin
    Respond {
        /// Number of plies the AI searches
        #[arg(short, long, default_value_t = LIVE_DEPTH)]
        depth: u32,

        #[arg(short, long, default_value_t = DEFAULT_TOURNAMENT_ID)]
        tournament_id: u64,

        /// Name announced when signing in
        #[arg(short, long, default_value = "connect4_minimax")]
        user_name: String,
    },

    /// Play every two-move opening with the engine on both sides
    Selfplay {
        /// Number of plies searched for the AI side
        #[arg(long, default_value_t = LOCAL_DEPTH)]
        ai_depth: u32,

        /// Number of plies searched for the player side
        #[arg(long, default_value_t = LIVE_DEPTH)]
        player_depth: u32,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    match args.command.unwrap_or(Command::Play {
        depth: LOCAL_DEPTH,
        ai_first: false,
    }) {
        Command::Play { depth, ai_first } => play(Engine::new(depth), ai_first),
        Command::Respond {
            depth,
            tournament_id,
            user_name,
        } => respond(Session::new(Engine::new(depth), tournament_id), user_name),
        Command::Selfplay {
            ai_depth,
            player_depth,
        } => {
            let tally = selfplay::play_openings(Engine::new(ai_depth), Engine::new(player_depth))?;
            println!(
                "AI (depth {}) wins: {}\nPlayer (depth {}) wins: {}\nDraws: {}",
                ai_depth, tally.ai_wins, player_depth, tally.player_wins, tally.draws
            );
            Ok(())
        }
    }
}

fn play(engine: Engine, ai_first: bool) -> Result<()> {
    let stdin = stdin();
    let mut board = Board::new();
    let mut to_move = if ai_first { Piece::Ai } else { Piece::Player };

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        display::draw(&board)?;

        match game_state(&board) {
            GameState::Playing => {}
            // end states
            GameState::PlayerWin => {
                println!("You win!");
                break;
            }
            GameState::AiWin => {
                println!("The AI wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }

        match to_move {
            Piece::Player => {
                print!("Move input (1-{}) > ", WIDTH);
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    // stdin closed
                    return Ok(());
                }

                let column = match input_str.trim().parse::<usize>() {
                    Ok(column @ 1..=WIDTH) => column - 1,
                    _ => {
                        println!("Invalid column: {}", input_str.trim());
                        continue;
                    }
                };
                if let Err(err) = board.play_checked(column, Piece::Player) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }
            Piece::Ai => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message("AI is thinking...");
                spinner.enable_steady_tick(100);

                let start = Instant::now();
                let decision = engine.decide(&board)?;
                spinner.finish_and_clear();

                println!(
                    "AI plays column {} after {} ({} positions searched, score {})",
                    decision.column + 1,
                    HumanDuration(start.elapsed()),
                    decision.node_count,
                    decision.score
                );
                board.play_checked(decision.column, Piece::Ai)?;
            }
        }
        to_move = to_move.opponent();
    }
    Ok(())
}

fn respond(session: Session, user_name: String) -> Result<()> {
    let stdout = stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", serde_json::to_string(&session.sign_in(user_name))?)?;
    out.flush()?;
    info!("signed in, waiting for events");

    for line in stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match session.handle_line(&line) {
            Ok(reply) => {
                writeln!(out, "{}", reply)?;
                out.flush()?;
            }
            // the protocol has no error reply, the coordinator times the turn out
            Err(err) => warn!("ignoring event: {}", err),
        }
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    // stdout carries the protocol in `respond`, keep logs on stderr
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
