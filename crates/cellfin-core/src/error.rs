//! # Error Types
//!
//! Domain-specific error types for cellfin-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cellfin-core errors (this file)                                       │
//! │  ├── ErrorKind    - Closed set of validation failure reasons           │
//! │  ├── FieldError   - An ErrorKind attached to the field that failed     │
//! │  └── CoreError    - Failures of the fallible constructors              │
//! │                                                                         │
//! │  cellfin-session errors (separate crate)                               │
//! │  └── SessionError - Configuration load/save failures                   │
//! │                                                                         │
//! │  Flow: ErrorKind → FieldError → CoreError → SessionError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Validation errors are informational: they annotate input, they never
//!    stop a preview from being computed
//! 4. Each (field, kind) pair maps to a user-facing message

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Field
// =============================================================================

/// The form field a validation outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The USD amount field.
    Usd,
    /// The exchange rate field (local currency per USD).
    Rate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Usd => write!(f, "usd"),
            Field::Rate => write!(f, "rate"),
        }
    }
}

// =============================================================================
// Error Kind
// =============================================================================

/// Why a field failed validation.
///
/// One variant per failing rule in [`crate::validation`]. The set is closed:
/// the presentation layer can match exhaustively to pick localized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Text does not start with a number, or the number is negative
    /// (USD) or not strictly positive (rate).
    #[error("not a positive number")]
    NotAPositiveNumber,

    /// USD amount above the 10,000 ceiling.
    #[error("too large")]
    TooLarge,

    /// USD amount above zero but below one cent.
    #[error("below minimum")]
    BelowMinimum,

    /// Exchange rate left empty.
    #[error("required")]
    Required,

    /// Exchange rate outside the sanity window. Advisory only.
    #[error("outside plausible range")]
    OutOfPlausibleRange,
}

impl ErrorKind {
    /// Returns true for warning-style kinds that flag suspicious but usable
    /// input.
    ///
    /// ## Example
    /// ```rust
    /// use cellfin_core::ErrorKind;
    ///
    /// assert!(ErrorKind::OutOfPlausibleRange.is_advisory());
    /// assert!(!ErrorKind::Required.is_advisory());
    /// ```
    pub const fn is_advisory(&self) -> bool {
        matches!(self, ErrorKind::OutOfPlausibleRange)
    }
}

// =============================================================================
// Field Error
// =============================================================================

/// A validation failure on a specific field.
///
/// ## User Workflow
/// ```text
/// User types "abc" into the USD box
///      │
///      ▼
/// validate_usd("abc")
///      │
///      ▼
/// FieldError { field: Usd, kind: NotAPositiveNumber }
///      │
///      ▼
/// UI shows: "Please enter a valid positive amount"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
}

impl FieldError {
    /// Creates a new field error.
    pub const fn new(field: Field, kind: ErrorKind) -> Self {
        FieldError { field, kind }
    }

    /// Default English message for this failure, as shown under the input.
    ///
    /// Combinations no validator produces (e.g. a USD `Required`) still get
    /// a sensible message so the mapping stays total.
    pub const fn message(&self) -> &'static str {
        match (self.field, self.kind) {
            (Field::Usd, ErrorKind::NotAPositiveNumber) => "Please enter a valid positive amount",
            (Field::Usd, ErrorKind::TooLarge) => "Amount too large. Please enter a smaller amount",
            (Field::Usd, ErrorKind::BelowMinimum) => "Minimum amount is $0.01",
            (Field::Usd, ErrorKind::Required) => "Amount is required",
            (Field::Usd, ErrorKind::OutOfPlausibleRange) => "Amount seems unusual. Please verify",
            (Field::Rate, ErrorKind::Required) => "Exchange rate is required",
            (Field::Rate, ErrorKind::NotAPositiveNumber) => "Please enter a valid exchange rate",
            (Field::Rate, ErrorKind::OutOfPlausibleRange) => {
                "Exchange rate seems unusual. Please verify"
            }
            (Field::Rate, ErrorKind::TooLarge) => "Exchange rate too large",
            (Field::Rate, ErrorKind::BelowMinimum) => "Exchange rate too small",
        }
    }

    /// Shorthand for `self.kind.is_advisory()`.
    pub const fn is_advisory(&self) -> bool {
        self.kind.is_advisory()
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors from the fallible constructors of the engine.
///
/// The main flow (`validate` → `compute` → `format`) never fails; these
/// only surface when a caller asks for a strictly validated value.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input text failed a blocking validation rule.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FieldError),

    /// A numeric input was negative, zero where it must be positive, or
    /// not finite.
    #[error("{field} must be a finite number {requirement}, got {value}")]
    InvalidAmount {
        field: Field,
        requirement: &'static str,
        value: f64,
    },

    /// A fee rate was outside `[0, 1]` or not finite.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidFeeRate { name: &'static str, value: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
