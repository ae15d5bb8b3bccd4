use core::str::FromStr;
use std::io;

use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Reveal,
    Flag,
}

impl FromStr for ActionKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Self::Reveal),
            "f" | "flag" => Ok(Self::Flag),
            _ => Err(GameError::InvalidAction),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub position: Coord2,
}

impl Action {
    pub const fn reveal(position: Coord2) -> Self {
        Self {
            kind: ActionKind::Reveal,
            position,
        }
    }

    pub const fn flag(position: Coord2) -> Self {
        Self {
            kind: ActionKind::Flag,
            position,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One player's game: the board plus the play time accumulated over every session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    player: String,
    time_passed_ms: i64,
    /// Start of the current session, a restored game starts a new one.
    #[serde(skip, default = "Utc::now")]
    session_start: DateTime<Utc>,
}

impl Game {
    pub fn new(player: impl Into<String>, board: Board) -> Self {
        Self {
            board,
            player: player.into(),
            time_passed_ms: 0,
            session_start: Utc::now(),
        }
    }

    /// Creates a game and saves it right away.
    pub fn start(
        player: impl Into<String>,
        board: Board,
        store: &mut (impl GameStore + ?Sized),
    ) -> io::Result<Self> {
        let mut game = Self::new(player, board);
        log::debug!(
            "Starting game for {} on {:?}",
            game.player,
            game.board.size()
        );
        game.save(store)?;
        Ok(game)
    }

    /// Loads a saved game, keeping its accumulated time and starting a new session.
    pub fn restore(store: &mut (impl GameStore + ?Sized)) -> io::Result<Self> {
        let mut game = store.load()?;
        game.resume();
        log::debug!(
            "Restored game for {} with {} ms played",
            game.player,
            game.time_passed_ms
        );
        Ok(game)
    }

    pub fn resume(&mut self) {
        self.session_start = Utc::now();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn state(&self) -> GameState {
        if self.board.lost() {
            GameState::Lost
        } else if self.board.won() {
            GameState::Won
        } else {
            GameState::InProgress
        }
    }

    /// Whole seconds played across all sessions, including the current one.
    pub fn elapsed_secs(&self) -> u64 {
        let total = self.time_passed_ms + Self::millis_since(self.session_start, Utc::now());
        (total / 1000).max(0) as u64
    }

    /// Folds the current session into the total and starts counting afresh.
    pub fn checkpoint(&mut self) {
        let now = Utc::now();
        self.time_passed_ms += Self::millis_since(self.session_start, now);
        self.session_start = now;
    }

    pub fn save(&mut self, store: &mut (impl GameStore + ?Sized)) -> io::Result<()> {
        self.checkpoint();
        store.save(self)
    }

    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome> {
        if self.board.is_over() {
            return Err(GameError::AlreadyEnded);
        }

        match action.kind {
            ActionKind::Reveal => self.board.reveal(action.position).map(ActionOutcome::Reveal),
            ActionKind::Flag => self.board.toggle_flag(action.position).map(ActionOutcome::Mark),
        }
    }

    /// Runs turns until the board is won or lost.
    ///
    /// Every turn renders, asks for a move, applies it, saves, then offers
    /// auto-complete (saving again if that changed the board). A win is sent to
    /// `results`; either way the finished game is cleared from `store`.
    pub fn play<C, S, R>(&mut self, console: &mut C, store: &mut S, results: &mut R) -> io::Result<GameState>
    where
        C: Console + ?Sized,
        S: GameStore + ?Sized,
        R: ResultsSink + ?Sized,
    {
        while !self.state().is_finished() {
            console.render(&self.board.view())?;

            let action = console.request_action(&self.board)?;
            match self.apply(action) {
                Ok(outcome) => log::debug!("{:?} -> {:?}", action, outcome),
                Err(err) => {
                    if !err.is_notice() {
                        log::warn!("Rejected {:?}: {}", action, err);
                    }
                    console.notice(&err.to_string())?;
                }
            }
            self.save(store)?;

            if self.board.auto_complete(console)? {
                self.save(store)?;
            }
        }

        console.render(&self.board.view())?;

        let state = self.state();
        if state == GameState::Won {
            self.checkpoint();
            let elapsed = self.elapsed_secs();
            log::debug!("{} won in {} s", self.player, elapsed);
            results.record_result(&self.player, elapsed)?;
        } else {
            log::debug!("{} lost", self.player);
        }
        store.clear()?;

        Ok(state)
    }

    fn millis_since(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (now - start).num_milliseconds().max(0)
    }
}
