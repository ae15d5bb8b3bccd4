//! Boundaries between a running game and the outside world.
//!
//! The core never reads input or writes output itself, a front end supplies
//! these and [`Game::play`] drives them one turn at a time.

use std::io;

use crate::*;

/// Source of player moves. Only legal, in-bounds positions may be returned.
pub trait PlayerInput {
    fn request_action(&mut self, board: &Board) -> io::Result<Action>;
}

/// Yes/no answers for the auto-complete offers.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

pub trait DisplaySink {
    fn render(&mut self, view: &BoardView) -> io::Result<()>;

    /// A rejected move or other message the player should see.
    fn notice(&mut self, message: &str) -> io::Result<()>;
}

/// Save slot for a game in progress.
pub trait GameStore {
    fn save(&mut self, game: &Game) -> io::Result<()>;
    fn load(&mut self) -> io::Result<Game>;
    fn clear(&mut self) -> io::Result<()>;
}

pub trait ResultsSink {
    fn record_result(&mut self, player: &str, elapsed_secs: u64) -> io::Result<()>;
}

/// Everything an interactive front end provides.
pub trait Console: PlayerInput + Confirm + DisplaySink {}

impl<T: PlayerInput + Confirm + DisplaySink + ?Sized> Console for T {}
