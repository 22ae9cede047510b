//! Game session with persisted time-travel history
//!
//! Holds two independent slots:
//! - `squares-history`: every board from the empty one onward
//! - `squares-step`: index of the board being shown
//!
//! Both are rewritten after each change, so a session reopened from the
//! same store resumes where it left off.

use thiserror::Error;

use crate::game::{self, Board, InvalidMove, Outcome, Player};
use crate::persistence::{Initial, PersistError, PersistentState, Update};
use crate::storage::KeyValueStore;

/// Slot names used by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    pub step: String,
    pub history: String,
}

impl SessionKeys {
    pub const STEP: &'static str = "squares-step";
    pub const HISTORY: &'static str = "squares-history";

    /// Default keys, prefixed with `ns:` when a namespace is given
    pub fn namespaced(namespace: Option<&str>) -> Self {
        match namespace {
            Some(ns) => Self {
                step: format!("{ns}:{}", Self::STEP),
                history: format!("{ns}:{}", Self::HISTORY),
            },
            None => Self::default(),
        }
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            step: Self::STEP.to_string(),
            history: Self::HISTORY.to_string(),
        }
    }
}

/// Result of clicking a square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Played { index: usize, player: Player },
    /// Nothing changed
    Rejected(InvalidMove),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("step {step} is outside the history (length {len})")]
    StepOutOfRange { step: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Label for the history button at `index`
pub fn move_label(index: usize) -> String {
    if index == 0 {
        "Go to start".to_string()
    } else {
        format!("Go to move {index}")
    }
}

pub struct GameSession<S> {
    step: PersistentState<usize, S>,
    history: PersistentState<Vec<Board>, S>,
}

impl<S: KeyValueStore + Clone> GameSession<S> {
    /// Load a session from `store`, starting fresh if nothing usable is there.
    ///
    /// Stored data that breaks the history/step invariants is repaired and
    /// written back.
    pub fn open(store: S, keys: SessionKeys) -> Result<Self> {
        let step = PersistentState::new(store.clone(), keys.step, Initial::Value(0));
        let history = PersistentState::new(
            store,
            keys.history,
            Initial::lazy(|| vec![Board::new()]),
        );
        let mut session = Self { step, history };
        session.repair()?;
        log::info!(
            "Session ready: step {} of {}",
            session.step(),
            session.history.value().len()
        );
        Ok(session)
    }

    fn repair(&mut self) -> Result<()> {
        if self.history.value().is_empty() {
            log::warn!("Stored history is empty, starting over");
            self.history.set(vec![Board::new()])?;
        }
        let len = self.history.value().len();
        if *self.step.value() >= len {
            log::warn!(
                "Stored step {} is past the history (length {}), clamping",
                self.step.value(),
                len
            );
            self.step.set(len - 1)?;
        }
        Ok(())
    }

    pub fn step(&self) -> usize {
        *self.step.value()
    }

    pub fn history(&self) -> &[Board] {
        self.history.value()
    }

    /// Board currently shown
    pub fn board(&self) -> Board {
        self.history.value()[self.step()]
    }

    pub fn next_player(&self) -> Player {
        game::next_player(&self.board())
    }

    pub fn winner(&self) -> Option<Player> {
        game::winner(&self.board())
    }

    pub fn outcome(&self) -> Outcome {
        game::outcome(&self.board())
    }

    pub fn status(&self) -> String {
        let board = self.board();
        game::status(game::winner(&board), &board, game::next_player(&board))
    }

    /// Labels for every history entry, oldest first
    pub fn moves(&self) -> Vec<String> {
        (0..self.history.value().len()).map(move_label).collect()
    }

    pub fn keys(&self) -> SessionKeys {
        SessionKeys {
            step: self.step.key().to_string(),
            history: self.history.key().to_string(),
        }
    }

    /// Play the next player's mark at `index` on the shown board.
    ///
    /// The new board is appended to the end of the history, which is never
    /// shortened, and becomes the shown one. Rejected moves leave the session
    /// untouched.
    pub fn select_square(&mut self, index: usize) -> Result<MoveOutcome> {
        let board = self.board();
        let player = game::next_player(&board);
        let next = match game::apply_move(&board, index, player) {
            Ok(next) => next,
            Err(reason) => {
                log::debug!("Rejected move at {}: {}", index, reason);
                return Ok(MoveOutcome::Rejected(reason));
            }
        };

        // History first: a stale step still indexes a valid board
        let last = self.history.value().len();
        self.history.set(Update::with(move |prev: &Vec<Board>| {
            let mut history = prev.clone();
            history.push(next);
            history
        }))?;
        self.step.set(last)?;

        log::debug!("{} played square {}", player, index);
        Ok(MoveOutcome::Played { index, player })
    }

    /// Back to a single empty board
    pub fn restart(&mut self) -> Result<()> {
        // Step first so it never points past the shortened history
        self.step.set(0)?;
        self.history.set(vec![Board::new()])?;
        log::info!("Game restarted");
        Ok(())
    }

    /// Show the board at `step`
    pub fn go_to(&mut self, step: usize) -> Result<()> {
        let len = self.history.value().len();
        if step >= len {
            return Err(SessionError::StepOutOfRange { step, len });
        }
        self.step.set(step)?;
        Ok(())
    }

    /// Move both slots under a new namespace
    pub fn set_namespace(&mut self, namespace: Option<&str>) -> Result<()> {
        let keys = SessionKeys::namespaced(namespace);
        self.history.set_key(keys.history)?;
        self.step.set_key(keys.step)?;
        Ok(())
    }
}
