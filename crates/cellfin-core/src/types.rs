//! # Domain Types
//!
//! Value types that flow through the conversion engine.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   validate    ┌───────────────────┐                │
//! │  │   RawInputs     │ ────────────► │ ValidationReport  │  (advisory)    │
//! │  │  ─────────────  │               │  usd  / rate      │                │
//! │  │  usd_text       │               └───────────────────┘                │
//! │  │  rate_text      │                                                    │
//! │  └────────┬────────┘                                                    │
//! │           │ preview (best effort) / try_from_raw (strict)               │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   compute     ┌───────────────────┐   format       │
//! │  │ ConversionInput │ ────────────► │ ConversionResult  │ ──────────►    │
//! │  │  usd_amount     │               │  base, bank_charge│  Formatted-    │
//! │  │  exchange_rate  │               │  vat, total       │  Breakdown     │
//! │  └─────────────────┘               └───────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is an immutable value. Nothing is cached between calls:
//! each input change produces fresh values from scratch.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::{compute, FeeSchedule};
use crate::error::{CoreError, CoreResult, ErrorKind, Field, FieldError};
use crate::parse::best_effort_number;
use crate::validation::{validate_rate, validate_usd};

// =============================================================================
// Raw Inputs
// =============================================================================

/// Unvalidated text exactly as typed into the two form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    /// USD amount text. May be empty while the user is typing.
    pub usd_text: String,

    /// Exchange rate text (local currency per USD).
    pub rate_text: String,
}

impl RawInputs {
    /// Creates raw inputs from any pair of strings.
    pub fn new(usd_text: impl Into<String>, rate_text: impl Into<String>) -> Self {
        RawInputs {
            usd_text: usd_text.into(),
            rate_text: rate_text.into(),
        }
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of validating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    /// The field passed every rule.
    Valid,
    /// The field failed a rule; the first failing rule wins.
    Invalid { field: Field, kind: ErrorKind },
}

impl ValidationResult {
    /// Shorthand for an `Invalid` outcome.
    #[inline]
    pub const fn invalid(field: Field, kind: ErrorKind) -> Self {
        ValidationResult::Invalid { field, kind }
    }

    /// Returns true if the field passed.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns the failure, if any.
    pub const fn error(&self) -> Option<FieldError> {
        match *self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { field, kind } => Some(FieldError::new(field, kind)),
        }
    }

    /// Returns the failure kind, if any.
    pub const fn kind(&self) -> Option<ErrorKind> {
        match *self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { kind, .. } => Some(kind),
        }
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Independent validation outcomes for both fields.
///
/// A render layer may show both errors at once; neither outcome affects the
/// other, and neither blocks the preview calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub usd: ValidationResult,
    pub rate: ValidationResult,
}

impl ValidationReport {
    /// Returns true when both fields passed every rule.
    pub const fn is_clean(&self) -> bool {
        self.usd.is_valid() && self.rate.is_valid()
    }

    /// All failures, USD first.
    pub fn errors(&self) -> Vec<FieldError> {
        [self.usd.error(), self.rate.error()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Failures that are not merely advisory.
    pub fn blocking_errors(&self) -> Vec<FieldError> {
        self.errors()
            .into_iter()
            .filter(|err| !err.is_advisory())
            .collect()
    }
}

// =============================================================================
// Conversion Input
// =============================================================================

/// A numeric (USD amount, exchange rate) pair ready for the calculator.
///
/// ## Construction Paths
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ConversionInput::new(usd, rate)      numeric, checked                  │
/// │  ConversionInput::try_from_raw(raw)   text, fails on blocking errors    │
/// │  ConversionInput::preview(raw)        text, never fails (live preview)  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// `preview` bypasses validation on purpose: the form keeps showing a best
/// effort result while the user is mid-edit, and validation only annotates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConversionInput {
    usd_amount: f64,
    exchange_rate: f64,
}

impl ConversionInput {
    /// Creates an input pair, requiring `usd_amount >= 0` and
    /// `exchange_rate > 0`, both finite.
    ///
    /// ## Example
    /// ```rust
    /// use cellfin_core::ConversionInput;
    ///
    /// assert!(ConversionInput::new(100.0, 123.0).is_ok());
    /// assert!(ConversionInput::new(-1.0, 123.0).is_err());
    /// assert!(ConversionInput::new(100.0, 0.0).is_err());
    /// ```
    pub fn new(usd_amount: f64, exchange_rate: f64) -> CoreResult<Self> {
        if !usd_amount.is_finite() || usd_amount < 0.0 {
            return Err(CoreError::InvalidAmount {
                field: Field::Usd,
                requirement: ">= 0",
                value: usd_amount,
            });
        }

        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(CoreError::InvalidAmount {
                field: Field::Rate,
                requirement: "> 0",
                value: exchange_rate,
            });
        }

        Ok(ConversionInput {
            usd_amount,
            exchange_rate,
        })
    }

    /// Validates raw text and builds the input pair.
    ///
    /// Fails with the first blocking error (USD checked first). Advisory
    /// failures such as an unusual rate are accepted. An empty USD field
    /// reads as zero.
    pub fn try_from_raw(raw: &RawInputs) -> CoreResult<Self> {
        for outcome in [validate_usd(&raw.usd_text), validate_rate(&raw.rate_text)] {
            if let Some(err) = outcome.error() {
                if !err.is_advisory() {
                    return Err(err.into());
                }
            }
        }

        Ok(Self::preview(raw))
    }

    /// Builds the best-effort pair used for the live preview.
    ///
    /// Unparseable, negative or infinite text reads as zero, so the rate may
    /// be zero here and the preview is then all zeros.
    pub fn preview(raw: &RawInputs) -> Self {
        ConversionInput {
            usd_amount: best_effort_number(&raw.usd_text),
            exchange_rate: best_effort_number(&raw.rate_text),
        }
    }

    #[inline]
    pub const fn usd_amount(&self) -> f64 {
        self.usd_amount
    }

    #[inline]
    pub const fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    /// Runs the calculator with the standard fee schedule.
    pub fn compute(&self) -> ConversionResult {
        compute(self.usd_amount, self.exchange_rate)
    }

    /// Runs the calculator with a custom fee schedule.
    pub fn compute_with(&self, fees: &FeeSchedule) -> ConversionResult {
        fees.compute(self.usd_amount, self.exchange_rate)
    }
}

// =============================================================================
// Conversion Result
// =============================================================================

/// The four-stage breakdown of one conversion, in local currency.
///
/// Every derived field is a deterministic function of the two inputs:
/// ```text
/// base_amount  = usd_amount × exchange_rate
/// bank_charge  = base_amount × bank charge rate (3%)
/// vat_amount   = bank_charge × VAT rate (15%)
/// total_amount = base_amount + bank_charge + vat_amount
/// ```
/// Values are kept unrounded; rounding happens only when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub usd_amount: f64,
    pub exchange_rate: f64,
    pub base_amount: f64,
    pub bank_charge: f64,
    pub vat_amount: f64,
    pub total_amount: f64,
}

impl ConversionResult {
    /// Returns true when there is something to pay (total above zero).
    ///
    /// The form highlights the breakdown card only in this state.
    #[inline]
    pub fn has_calculation(&self) -> bool {
        self.total_amount > 0.0
    }

    /// Fees on top of the base amount (bank charge plus VAT).
    #[inline]
    pub fn total_fees(&self) -> f64 {
        self.bank_charge + self.vat_amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_accessors() {
        assert!(ValidationResult::Valid.is_valid());
        assert_eq!(ValidationResult::Valid.error(), None);

        let invalid = ValidationResult::invalid(Field::Rate, ErrorKind::Required);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.kind(), Some(ErrorKind::Required));
        assert_eq!(
            invalid.error(),
            Some(FieldError::new(Field::Rate, ErrorKind::Required))
        );
    }

    #[test]
    fn test_report_errors_in_field_order() {
        let report = ValidationReport {
            usd: ValidationResult::invalid(Field::Usd, ErrorKind::TooLarge),
            rate: ValidationResult::invalid(Field::Rate, ErrorKind::OutOfPlausibleRange),
        };
        assert!(!report.is_clean());

        let errors = report.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, Field::Usd);
        assert_eq!(errors[1].field, Field::Rate);

        let blocking = report.blocking_errors();
        assert_eq!(blocking, vec![FieldError::new(Field::Usd, ErrorKind::TooLarge)]);
    }

    #[test]
    fn test_input_new_rejects_bad_numbers() {
        assert!(ConversionInput::new(0.0, 123.0).is_ok());
        assert!(ConversionInput::new(-0.01, 123.0).is_err());
        assert!(ConversionInput::new(f64::NAN, 123.0).is_err());
        assert!(ConversionInput::new(1.0, 0.0).is_err());
        assert!(ConversionInput::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_try_from_raw() {
        let input = ConversionInput::try_from_raw(&RawInputs::new("100", "123")).unwrap();
        assert_eq!(input.usd_amount(), 100.0);
        assert_eq!(input.exchange_rate(), 123.0);

        // Empty USD is allowed and reads as zero
        let input = ConversionInput::try_from_raw(&RawInputs::new("", "123")).unwrap();
        assert_eq!(input.usd_amount(), 0.0);

        // Unusual rate is only a warning
        let input = ConversionInput::try_from_raw(&RawInputs::new("10", "250")).unwrap();
        assert_eq!(input.exchange_rate(), 250.0);

        // Missing rate blocks
        let err = ConversionInput::try_from_raw(&RawInputs::new("10", "")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(FieldError {
                field: Field::Rate,
                kind: ErrorKind::Required
            })
        ));

        // USD is reported first
        let err = ConversionInput::try_from_raw(&RawInputs::new("-5", "")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(FieldError {
                field: Field::Usd,
                ..
            })
        ));
    }

    #[test]
    fn test_preview_never_fails() {
        let input = ConversionInput::preview(&RawInputs::new("abc", ""));
        assert_eq!(input.usd_amount(), 0.0);
        assert_eq!(input.exchange_rate(), 0.0);

        // Invalid-but-parseable text still previews
        let input = ConversionInput::preview(&RawInputs::new("20000", "500"));
        assert_eq!(input.usd_amount(), 20000.0);
        assert_eq!(input.exchange_rate(), 500.0);
    }

    #[test]
    fn test_has_calculation() {
        assert!(!ConversionResult::default().has_calculation());
        let result = ConversionInput::new(1.0, 123.0).unwrap().compute();
        assert!(result.has_calculation());
        assert!((result.total_fees() - (3.69 + 0.5535)).abs() < 1e-9);
    }

    #[test]
    fn test_validation_result_json_shape() {
        let json = serde_json::to_value(ValidationResult::Valid).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "valid" }));

        let json =
            serde_json::to_value(ValidationResult::invalid(Field::Usd, ErrorKind::BelowMinimum))
                .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "invalid", "field": "usd", "kind": "below_minimum" })
        );
    }

    #[test]
    fn test_raw_inputs_camel_case() {
        let json = serde_json::to_value(RawInputs::new("1", "123.00")).unwrap();
        assert_eq!(json, serde_json::json!({ "usdText": "1", "rateText": "123.00" }));
    }
}
