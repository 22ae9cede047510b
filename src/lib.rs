//! Squares - tic-tac-toe with time-travel history
//!
//! Core modules:
//! - `game`: Pure rules (next player, winner, status, moves)
//! - `storage`: Key-value slot backends (memory, file, LocalStorage)
//! - `persistence`: Values bound to a storage slot
//! - `session`: History + step kept in storage across restarts
//! - `config`: Runtime settings
//! - `platform`: Browser bindings (wasm32)

pub mod config;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod storage;

pub use config::Config;
pub use game::{Board, InvalidMove, Outcome, Player};
pub use persistence::{Codec, Initial, JsonCodec, PersistError, PersistentState, Update};
pub use session::{GameSession, MoveOutcome, SessionError, SessionKeys};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, StorageError};
