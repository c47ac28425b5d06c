//! # Converter Session
//!
//! Holds the two form fields and produces a fresh snapshot after every
//! change.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Form Action              Session Method          State Change          │
//! │  ───────────              ──────────────          ────────────          │
//! │                                                                         │
//! │  Type USD ───────────────► set_usd_text() ──────► inputs.usd_text      │
//! │                                                                         │
//! │  Type rate ──────────────► set_rate_text() ─────► inputs.rate_text     │
//! │                                                                         │
//! │  Click Reset ────────────► reset() ─────────────► "" / "123.00"        │
//! │                                                                         │
//! │  Click Copy ─────────────► plain_text_summary() ► (read only)          │
//! │                                                                         │
//! │  NOTE: every write returns a SessionSnapshot. Invalid input is          │
//! │        annotated in the snapshot, never rejected.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use cellfin_core::{
    ConversionEngine, ConversionResult, FormattedBreakdown, RawInputs, ValidationReport,
};

use crate::config::ConverterConfig;
use crate::debounce::Debounced;
use crate::error::SessionResult;

/// Everything the form renders after one change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub inputs: RawInputs,
    pub validation: ValidationReport,
    pub result: ConversionResult,
    pub display: FormattedBreakdown,
}

impl SessionSnapshot {
    /// Evaluates one pair of raw inputs.
    pub fn evaluate(engine: &ConversionEngine, inputs: RawInputs) -> Self {
        let evaluation = engine.evaluate(&inputs);
        SessionSnapshot {
            inputs,
            validation: evaluation.validation,
            result: evaluation.result,
            display: evaluation.display,
        }
    }

    /// The messages to show under each field, USD first.
    pub fn messages(&self) -> Vec<&'static str> {
        self.validation
            .errors()
            .iter()
            .map(|error| error.message())
            .collect()
    }
}

/// The converter form's state.
#[derive(Debug, Clone)]
pub struct ConverterSession {
    engine: ConversionEngine,
    inputs: RawInputs,
    default_rate_text: String,
    config: ConverterConfig,
}

impl ConverterSession {
    /// Creates a session from configuration, starting in the reset state.
    pub fn new(config: ConverterConfig) -> SessionResult<Self> {
        config.validate()?;
        let engine = config.engine()?;
        let default_rate_text = config.session.default_rate_text();

        Ok(ConverterSession {
            engine,
            inputs: RawInputs::new("", default_rate_text.clone()),
            default_rate_text,
            config,
        })
    }

    /// Creates a session with the standard fees and a 123.00 rate.
    pub fn with_defaults() -> Self {
        let config = ConverterConfig::default();
        let default_rate_text = config.session.default_rate_text();

        ConverterSession {
            engine: ConversionEngine::default(),
            inputs: RawInputs::new("", default_rate_text.clone()),
            default_rate_text,
            config,
        }
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn inputs(&self) -> &RawInputs {
        &self.inputs
    }

    // =========================================================================
    // Input Changes
    // =========================================================================

    /// Replaces the USD text.
    pub fn set_usd_text(&mut self, text: impl Into<String>) -> SessionSnapshot {
        self.inputs.usd_text = text.into();
        self.recompute()
    }

    /// Replaces the exchange rate text.
    pub fn set_rate_text(&mut self, text: impl Into<String>) -> SessionSnapshot {
        self.inputs.rate_text = text.into();
        self.recompute()
    }

    /// Replaces both fields at once.
    pub fn set_values(
        &mut self,
        usd_text: impl Into<String>,
        rate_text: impl Into<String>,
    ) -> SessionSnapshot {
        self.inputs = RawInputs::new(usd_text, rate_text);
        self.recompute()
    }

    /// Clears the amount and restores the default rate.
    pub fn reset(&mut self) -> SessionSnapshot {
        info!(rate = %self.default_rate_text, "Converter reset");
        self.inputs = RawInputs::new("", self.default_rate_text.clone());
        self.snapshot()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Best-effort breakdown of the current text.
    pub fn current_calculation(&self) -> ConversionResult {
        self.engine.preview(&self.inputs)
    }

    /// Advisory checks of the current text.
    pub fn validate(&self) -> ValidationReport {
        self.engine.validate(&self.inputs)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::evaluate(&self.engine, self.inputs.clone())
    }

    /// The copyable export of the current calculation.
    pub fn plain_text_summary(&self) -> String {
        let result = self.current_calculation();
        self.engine.template().render(&result)
    }

    /// A debounced evaluator using this session's engine and window.
    ///
    /// Hosts feed it the raw inputs after each keystroke and render only
    /// the snapshots that resolve to `Some`.
    pub fn debouncer(
        &self,
    ) -> Debounced<impl Fn(RawInputs) -> SessionSnapshot + Send + Sync + 'static> {
        let engine = self.engine.clone();
        Debounced::new(self.config.session.debounce_window(), move |inputs: RawInputs| {
            SessionSnapshot::evaluate(&engine, inputs)
        })
    }

    fn recompute(&self) -> SessionSnapshot {
        let snapshot = self.snapshot();
        debug!(
            usd = %snapshot.inputs.usd_text,
            rate = %snapshot.inputs.rate_text,
            total = snapshot.result.total_amount,
            clean = snapshot.validation.is_clean(),
            "Recomputed conversion"
        );
        snapshot
    }
}

impl Default for ConverterSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}
