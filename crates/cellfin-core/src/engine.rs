//! # Conversion Engine
//!
//! Bundles the three engine operations behind one value so a host can carry
//! its configured fee schedule and summary template around.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RawInputs ──► validate() ──► ValidationReport     (annotation only)    │
//! │      │                                                                  │
//! │      └──────► preview() ───► compute() ──► format() ──► Breakdown       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no mutable state; two calls with the same inputs always
//! produce identical output.

use serde::Serialize;

use crate::calculator::FeeSchedule;
use crate::formatter::{format_with, FormattedBreakdown, SummaryTemplate};
use crate::types::{ConversionInput, ConversionResult, RawInputs, ValidationReport};
use crate::validation;

/// Stateless validate → compute → format pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionEngine {
    fees: FeeSchedule,
    template: SummaryTemplate,
}

/// Everything the form needs after one input change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub validation: ValidationReport,
    pub result: ConversionResult,
    pub display: FormattedBreakdown,
}

impl ConversionEngine {
    /// Creates an engine with a custom fee schedule and summary template.
    ///
    /// The template's fee labels are aligned to `fees`.
    pub fn new(fees: FeeSchedule, mut template: SummaryTemplate) -> Self {
        template.fees = fees;
        ConversionEngine { fees, template }
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn template(&self) -> &SummaryTemplate {
        &self.template
    }

    /// Advisory validation of both fields.
    pub fn validate(&self, raw: &RawInputs) -> ValidationReport {
        validation::validate(raw)
    }

    /// Computes the breakdown for a numeric pair.
    pub fn compute(&self, usd_amount: f64, exchange_rate: f64) -> ConversionResult {
        self.fees.compute(usd_amount, exchange_rate)
    }

    /// Renders every display string for a result.
    pub fn format(&self, result: &ConversionResult) -> FormattedBreakdown {
        format_with(result, &self.template)
    }

    /// Best-effort computation over raw text, ignoring validation.
    pub fn preview(&self, raw: &RawInputs) -> ConversionResult {
        ConversionInput::preview(raw).compute_with(&self.fees)
    }

    /// Runs the full pipeline for one input change.
    ///
    /// ## Example
    /// ```rust
    /// use cellfin_core::{ConversionEngine, RawInputs};
    ///
    /// let engine = ConversionEngine::default();
    /// let eval = engine.evaluate(&RawInputs::new("100", "123"));
    ///
    /// assert!(eval.validation.is_clean());
    /// assert_eq!(eval.display.total_display, "৳ 12,724.35");
    /// ```
    pub fn evaluate(&self, raw: &RawInputs) -> Evaluation {
        let validation = self.validate(raw);
        let result = self.preview(raw);
        let display = self.format(&result);

        Evaluation {
            validation,
            result,
            display,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
