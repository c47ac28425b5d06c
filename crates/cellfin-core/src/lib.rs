//! # cellfin-core: Pure Conversion Engine for the CellFin Converter
//!
//! This crate is the **heart** of the CellFin currency converter. It turns
//! the two raw form fields (USD amount, exchange rate) into a validated,
//! fully computed and formatted fee breakdown, as pure functions with zero
//! I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CellFin Converter                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Form UI (browser / desktop)                  │   │
//! │  │    USD input ──► Rate input ──► Breakdown card ──► Copy summary │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ debounced input events                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              cellfin-session (config, debounce, state)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cellfin-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │ calculator│  │ formatter │  │   types   │  │   │
//! │  │   │  usd/rate │  │ fees, VAT │  │ ৳ / $     │  │ Raw/Result│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Value types (RawInputs, ConversionResult, ValidationReport)
//! - [`parse`] - Lenient numeric-prefix parsing of form text
//! - [`validation`] - Per-field advisory checks
//! - [`calculator`] - Base, bank charge, VAT and total
//! - [`formatter`] - Currency display strings and the copyable summary
//! - [`engine`] - The three operations bundled with a fee schedule
//! - [`error`] - Error kinds and messages
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, nothing cached
//! 2. **Validation Annotates**: a failed check never stops the preview
//! 3. **Round Late**: amounts stay unrounded until formatted
//! 4. **Fixed Formatting**: no system locale, identical output everywhere
//!
//! ## Example Usage
//!
//! ```rust
//! use cellfin_core::{compute, format, validate, RawInputs};
//!
//! let raw = RawInputs::new("100", "123");
//! assert!(validate(&raw).is_clean());
//!
//! let result = compute(100.0, 123.0);
//! let display = format(&result);
//!
//! assert_eq!(display.base_display, "৳ 12,300.00");
//! assert_eq!(display.total_display, "৳ 12,724.35");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod parse;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{compute, FeeSchedule, BANK_CHARGE_RATE, VAT_RATE};
pub use engine::{ConversionEngine, Evaluation};
pub use error::{CoreError, CoreResult, ErrorKind, Field, FieldError};
pub use formatter::{
    format, format_foreign_currency, format_local_currency, format_summary, Currency,
    FormattedBreakdown, SummaryTemplate,
};
pub use types::*;
pub use validation::{validate, validate_rate, validate_usd};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Exchange rate pre-filled when the form is reset.
///
/// ## Business Reason
/// A typical card rate at launch; saves typing on the common case. This is
/// product configuration, hosts may override it (see cellfin-session).
pub const DEFAULT_EXCHANGE_RATE: f64 = 123.0;
