//! Errors surfaced by the loot runtime.
use thiserror::Error;

use loot_core::{ErrorSeverity, GridError, LootError, LootId, PackingError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} is not a container in this scene")]
    UnknownContainer(LootId),

    #[error("{0} is not a loose item in this scene")]
    UnknownItem(LootId),

    #[error("scenario object {loot} has an invalid layout")]
    InvalidLayout {
        loot: LootId,
        #[source]
        source: GridError,
    },

    #[error("scenario uses {0} more than once")]
    DuplicateObject(LootId),

    #[error(transparent)]
    Packing(#[from] PackingError),
}

impl LootError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownContainer(_) | Self::UnknownItem(_) => ErrorSeverity::Validation,
            Self::InvalidLayout { .. } | Self::DuplicateObject(_) => ErrorSeverity::Fatal,
            Self::Packing(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownContainer(_) => "RUNTIME_UNKNOWN_CONTAINER",
            Self::UnknownItem(_) => "RUNTIME_UNKNOWN_ITEM",
            Self::InvalidLayout { .. } => "RUNTIME_INVALID_LAYOUT",
            Self::DuplicateObject(_) => "RUNTIME_DUPLICATE_OBJECT",
            Self::Packing(error) => error.error_code(),
        }
    }
}
