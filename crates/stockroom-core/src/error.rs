//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── LedgerError      - CoreError + DbError composition                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent ledger rule violations. They are all local and
/// recoverable: the caller may retry with corrected input, and no state
/// was mutated when one is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// Surfaced distinctly from validation failures so callers can tell a
    /// stale id apart from bad input.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A borrow requested more units than are currently free to lend.
    #[error("Not enough available stock for {name}: available {available}, requested {requested}")]
    InsufficientAvailable {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A purchase requested more units than the pool owns.
    #[error("Not enough stock for {name}: owned {owned}, requested {requested}")]
    InsufficientOwned {
        name: String,
        owned: i64,
        requested: i64,
    },

    /// A product update would break `0 <= availability <= master_count`.
    ///
    /// The ledger rejects rather than clamps here: clamping on update would
    /// silently hide caller bugs, while clamping at creation time is a
    /// documented convenience.
    #[error(
        "Update would violate stock invariant for product {id}: availability {availability}, master count {master_count}"
    )]
    InvariantViolation {
        id: String,
        availability: i64,
        master_count: i64,
    },

    /// Report export asked for a month outside the report window.
    #[error("Unknown report month: {0}")]
    UnknownMonth(String),

    /// Credential hashing failed (malformed stored hash, etc.).
    #[error("Credential error: {0}")]
    Credential(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a lending-record or product input doesn't meet
/// requirements. Validation runs fully before any mutation, so a
/// `ValidationError` always means "nothing changed".
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value must have an exact length.
    #[error("{field} must be exactly {expected} characters")]
    WrongLength { field: String, expected: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Value must be non-negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Return date is on or before the taken date.
    #[error("Return date must be greater than taken date")]
    ReturnNotAfterTaken,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientAvailable {
            name: "Multimeter".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Not enough available stock for Multimeter: available 3, requested 5"
        );

        let err = CoreError::InsufficientOwned {
            name: "Breadboard".to_string(),
            owned: 10,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for Breadboard: owned 10, requested 12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "student name".to_string(),
        };
        assert_eq!(err.to_string(), "student name is required");

        let err = ValidationError::WrongLength {
            field: "usn".to_string(),
            expected: 10,
        };
        assert_eq!(err.to_string(), "usn must be exactly 10 characters");

        let err = ValidationError::ReturnNotAfterTaken;
        assert_eq!(
            err.to_string(),
            "Return date must be greater than taken date"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
