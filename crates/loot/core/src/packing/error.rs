use crate::error::{ErrorSeverity, LootError};
use crate::state::{GridError, ItemId};

/// Errors reported by the packing engine.
///
/// Every variant is returned with the affected containers already back in
/// their prior state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PackingError {
    #[error("no container supplied to repack")]
    NoContainer,

    /// Repack could not find room for this item; the container was rolled back.
    #[error("{item} could not be placed in any grid")]
    Unplaceable { item: ItemId },

    /// Pickup found no free grid for this item.
    #[error("no free space for {item}")]
    NoSpace { item: ItemId },

    /// A grid refused an offset it had just reported as free.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl LootError for PackingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoContainer => ErrorSeverity::Validation,
            Self::Unplaceable { .. } | Self::NoSpace { .. } => ErrorSeverity::Recoverable,
            Self::Grid(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoContainer => "PACKING_NO_CONTAINER",
            Self::Unplaceable { .. } => "PACKING_UNPLACEABLE",
            Self::NoSpace { .. } => "PACKING_NO_SPACE",
            Self::Grid(error) => error.error_code(),
        }
    }
}
