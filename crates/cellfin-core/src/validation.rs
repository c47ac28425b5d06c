//! # Validation Module
//!
//! Advisory checks over the raw text of the two form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Independent Passes                             │
//! │                                                                         │
//! │  Raw text ──┬──► best_effort_number ──► compute ──► preview (always)   │
//! │             │                                                           │
//! │             └──► THIS MODULE ──► ValidationReport ──► error text (UI)  │
//! │                                                                         │
//! │  Validation never gates the preview. It only tells the UI which        │
//! │  message to show under which field.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cellfin_core::validation::{validate_rate, validate_usd};
//! use cellfin_core::ErrorKind;
//!
//! assert!(validate_usd("").is_valid());
//! assert_eq!(validate_rate("").kind(), Some(ErrorKind::Required));
//! ```

use crate::error::{ErrorKind, Field};
use crate::parse::parse_leading_number;
use crate::types::{RawInputs, ValidationReport, ValidationResult};

// =============================================================================
// Limits
// =============================================================================

/// Largest USD amount accepted in one conversion.
pub const MAX_USD_AMOUNT: f64 = 10_000.0;

/// Smallest non-zero USD amount (one cent).
pub const MIN_USD_AMOUNT: f64 = 0.01;

/// Lower edge of the plausible exchange rate window.
pub const MIN_PLAUSIBLE_RATE: f64 = 50.0;

/// Upper edge of the plausible exchange rate window.
pub const MAX_PLAUSIBLE_RATE: f64 = 200.0;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the USD amount text.
///
/// ## Rules (first failing rule wins)
/// 1. Empty → valid (not entered yet, previews as zero)
/// 2. No leading number, or negative → `NotAPositiveNumber`
/// 3. Above 10,000 → `TooLarge`
/// 4. Above zero but below 0.01 → `BelowMinimum`
///
/// ## Example
/// ```rust
/// use cellfin_core::validation::validate_usd;
/// use cellfin_core::ErrorKind;
///
/// assert!(validate_usd("0.01").is_valid());
/// assert_eq!(validate_usd("0.009").kind(), Some(ErrorKind::BelowMinimum));
/// assert_eq!(validate_usd("10000.01").kind(), Some(ErrorKind::TooLarge));
/// ```
pub fn validate_usd(text: &str) -> ValidationResult {
    if text.is_empty() {
        return ValidationResult::Valid;
    }

    let invalid = |kind| ValidationResult::invalid(Field::Usd, kind);

    let value = match parse_leading_number(text) {
        Some(value) if value >= 0.0 => value,
        _ => return invalid(ErrorKind::NotAPositiveNumber),
    };

    if value > MAX_USD_AMOUNT {
        return invalid(ErrorKind::TooLarge);
    }

    if value > 0.0 && value < MIN_USD_AMOUNT {
        return invalid(ErrorKind::BelowMinimum);
    }

    ValidationResult::Valid
}

/// Validates the exchange rate text.
///
/// ## Rules (first failing rule wins)
/// 1. Empty → `Required`
/// 2. No leading number, or not above zero → `NotAPositiveNumber`
/// 3. Below 50 or above 200 → `OutOfPlausibleRange` (advisory)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User enters rate: 250                                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_rate("250") ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── empty?        → "Exchange rate is required"                   │
/// │       ├── <= 0 / text?  → "Please enter a valid exchange rate"          │
/// │       ├── outside 50..=200 → "Exchange rate seems unusual..."  ◄─ here  │
/// │       └── OK                                                            │
/// │                                                                         │
/// │  The preview still shows the breakdown computed at 250.                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_rate(text: &str) -> ValidationResult {
    let invalid = |kind| ValidationResult::invalid(Field::Rate, kind);

    if text.is_empty() {
        return invalid(ErrorKind::Required);
    }

    let value = match parse_leading_number(text) {
        Some(value) if value > 0.0 => value,
        _ => return invalid(ErrorKind::NotAPositiveNumber),
    };

    if !(MIN_PLAUSIBLE_RATE..=MAX_PLAUSIBLE_RATE).contains(&value) {
        return invalid(ErrorKind::OutOfPlausibleRange);
    }

    ValidationResult::Valid
}

/// Validates both fields independently.
pub fn validate(raw: &RawInputs) -> ValidationReport {
    ValidationReport {
        usd: validate_usd(&raw.usd_text),
        rate: validate_rate(&raw.rate_text),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
