use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tilesweep_core::*;

use leaderboard::Leaderboard;
use store::JsonFileStore;
use terminal::{Terminal, parse_pair};

mod leaderboard;
mod store;
mod terminal;

#[derive(Parser, Debug)]
#[command(version, about = "Reveal and flag tiles on a mined grid", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed for the mine layout instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where the game in progress is saved after every move
    #[arg(long, default_value = "saved_game.json")]
    save_file: PathBuf,

    /// Where winning times are kept
    #[arg(long, default_value = "leaderboard")]
    leaderboard: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Start a new game
    New {
        /// Player name, asked for when missing
        #[arg(short, long)]
        name: Option<String>,

        /// Board size as ROWS,COLS, asked for when missing
        #[arg(long, value_parser = parse_size)]
        size: Option<Coord2>,
    },
    /// Resume the saved game
    Load,
}

fn parse_size(arg: &str) -> core::result::Result<Coord2, String> {
    parse_pair(arg)
        .filter(|&(rows, cols)| rows > 0 && cols > 0)
        .ok_or_else(|| format!("expected ROWS,COLS between 1 and {}, got {:?}", Coord::MAX, arg))
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(verbose.log_level_filter().as_str().to_ascii_lowercase())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn ask_command<R: BufRead, W: Write>(terminal: &mut Terminal<R, W>) -> io::Result<Command> {
    let mut answer = terminal.prompt("Would you like to 1 start a new game 2 load an old game.")?;
    loop {
        match answer.as_str() {
            "1" => return Ok(Command::New { name: None, size: None }),
            "2" => return Ok(Command::Load),
            _ => answer = terminal.prompt("Choose 1 or 2")?,
        }
    }
}

fn ask_size<R: BufRead, W: Write>(terminal: &mut Terminal<R, W>) -> io::Result<Coord2> {
    let mut answer = terminal.prompt("Choose the size of your board (rows, cols), empty for 9, 9.")?;
    loop {
        if answer.is_empty() {
            return Ok(BoardConfig::DEFAULT_SIZE);
        }
        match parse_size(&answer) {
            Ok(size) => return Ok(size),
            Err(err) => answer = terminal.prompt(&err)?,
        }
    }
}

fn new_game<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    store: &mut JsonFileStore,
    name: Option<String>,
    size: Option<Coord2>,
    seed: u64,
) -> Result<Game> {
    let name = match name {
        Some(name) => name,
        None => terminal.prompt("What's your name?")?,
    };
    let size = match size {
        Some(size) => size,
        None => ask_size(terminal)?,
    };

    log::debug!("seed: {}", seed);
    let board = Board::random(size, seed)?;
    Game::start(name, board, store)
        .with_context(|| format!("Could not save the new game to {}", store.path().display()))
}

/// Plays one game to the end and reports the result.
fn run<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    store: &mut JsonFileStore,
    leaderboard: &mut Leaderboard,
    command: Option<Command>,
    seed: u64,
) -> Result<GameState> {
    let command = match command {
        Some(command) => command,
        None => ask_command(terminal)?,
    };

    let mut game = match command {
        Command::New { name, size } => new_game(terminal, store, name, size, seed)?,
        Command::Load => Game::restore(store)
            .with_context(|| format!("Could not load a saved game from {}", store.path().display()))?,
    };

    let state = game.play(terminal, store, leaderboard)?;

    match state {
        GameState::Won => {
            terminal.say("You won!")?;
            terminal.say(&format!("You took {} seconds", game.elapsed_secs()))?;
            for entry in leaderboard.entries()? {
                terminal.say(&entry.to_string())?;
            }
        }
        GameState::Lost | GameState::InProgress => terminal.say("Try again")?,
    }

    Ok(state)
}

fn main() -> Result<()> {
    use rand::Rng;

    let args = Args::parse();
    init_logging(&args.verbose);
    log::debug!("{:?}", args);

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut store = JsonFileStore::new(args.save_file);
    let mut leaderboard = Leaderboard::new(args.leaderboard);

    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());

    run(&mut terminal, &mut store, &mut leaderboard, args.command, seed)?;
    Ok(())
}
