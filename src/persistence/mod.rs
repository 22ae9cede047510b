//! Values mirrored into key-value storage
//!
//! Features:
//! - Pluggable codec (JSON by default)
//! - Lazy defaults
//! - Corruption recovery (bad slots are dropped, never surfaced)
//! - Key migration (old slot removed when the key changes)

pub mod codec;
pub mod state;

use thiserror::Error;

pub use codec::{Codec, CodecError, FnCodec, JsonCodec};
pub use state::{Initial, PersistentState, Update};

use crate::storage::StorageError;

/// Failure writing a value back to storage
#[derive(Error, Debug)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("could not encode value: {0}")]
    Encode(CodecError),
}
