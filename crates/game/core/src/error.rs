//! Common error infrastructure for scorebook-core.
//!
//! Domain-specific errors (`ValidationError`, `StateError`, `SequenceError`)
//! live next to the operations that produce them. This module only holds the
//! classification shared by all of them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the scorer can fix the input and resubmit
/// - **Validation**: the submitted action breaks a scoring rule
/// - **Internal**: recorded history no longer agrees with the live state
/// - **Fatal**: seed data is malformed and no game can be built from it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry after changing the request.
    ///
    /// Examples: undo on an empty history, stale substitution target
    Recoverable,

    /// Validation error - the action violates a scoring invariant.
    ///
    /// Examples: fourth out, two runners on one base
    Validation,

    /// Internal error - replayed history disagrees with the cached state.
    Internal,

    /// Fatal error - the game cannot be constructed.
    ///
    /// Examples: non-contiguous batting order in the seed lineup
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
}

/// Common trait for all scorebook-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for UI message lookup and testing. Default implementation uses
    /// the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
