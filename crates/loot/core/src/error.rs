//! Common error infrastructure for loot-core.
//!
//! Domain-specific errors (`ClaimError`, `GridError`, `PackingError`) live next
//! to the operations that produce them. This module holds the classification
//! shared by all of them so hosts can decide between retrying, abandoning the
//! loot target, or surfacing a message.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the agent can pick another target or retry later
/// - **Validation**: the request itself was malformed for the current state
/// - **Internal**: state inconsistency that points at a bug
/// - **Fatal**: a collaborator contract was broken, the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: loot already claimed by another agent, no room for an item.
    Recoverable,

    /// Examples: item placed outside its grid, no container supplied.
    Validation,

    /// Examples: a grid refusing an offset it just reported as free.
    Internal,

    /// Examples: oracle returned data violating its contract.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all loot-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait LootError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for matching in tests without depending on
    /// display text.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_is_recoverable() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
