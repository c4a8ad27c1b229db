//! Common error infrastructure for game-core.
//!
//! In-game illegality (walking into a wall, acting with a dead entity, stairs that
//! lead nowhere) is never an error: the resolver treats it as a no-op. The error
//! types in this crate cover the remaining cases, which are caller-visible:
//! generation with pathological parameters, and inventory/equipment requests that
//! cannot be satisfied. Domain-specific errors live next to the operations that
//! produce them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed after the caller changes something
///   (frees an inventory slot, picks another slot)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry after changing the request or the state.
    ///
    /// Examples: inventory full, not enough items to remove
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero quantity, armour offered to the weapon slot
    Validation,

    /// Internal error - setup or state inconsistency.
    ///
    /// Examples: generator parameters that cannot place a single room
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a setup defect.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for logging fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
