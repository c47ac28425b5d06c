//! # Calculator Module
//!
//! The four-step monetary breakdown of a USD payment made with a local card.
//!
//! ## The Breakdown
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  USD amount × exchange rate                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Base amount ────────────┬──────────────────────────────┐               │
//! │       │                  │                              │               │
//! │       ▼ × 3%             │                              │               │
//! │  Bank charge ────────────┼──────────────┐               │               │
//! │       │                  │              │               │               │
//! │       ▼ × 15%            │              │               │               │
//! │  VAT on charge ──────────┼──────────────┼───────┐       │               │
//! │                          ▼              ▼       ▼       │               │
//! │                    Total = base + charge + VAT          │               │
//! │                          = base × 1.0345  ◄─────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! VAT applies to the bank charge only, never to the base amount.
//!
//! ## Why Floats Here?
//! The breakdown reports exact products (e.g. VAT of 0.5535 on a one-dollar
//! payment at 123); rounding to cents happens only in [`crate::formatter`].
//!
//! ## Usage
//! ```rust
//! use cellfin_core::calculator::compute;
//!
//! let result = compute(100.0, 123.0);
//! assert!((result.total_amount - 12_724.35).abs() < 1e-6);
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::ConversionResult;

// =============================================================================
// Fee Constants
// =============================================================================

/// Bank charge on the base amount (3%).
pub const BANK_CHARGE_RATE: f64 = 0.03;

/// VAT on the bank charge (15%).
pub const VAT_RATE: f64 = 0.15;

// =============================================================================
// Fee Schedule
// =============================================================================

/// The fee rates applied on top of the base amount.
///
/// [`compute`] always uses [`FeeSchedule::STANDARD`]; hosts that load rates
/// from configuration call [`FeeSchedule::compute`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    bank_charge_rate: f64,
    vat_rate: f64,
}

impl FeeSchedule {
    /// 3% bank charge, 15% VAT on the charge.
    pub const STANDARD: FeeSchedule = FeeSchedule {
        bank_charge_rate: BANK_CHARGE_RATE,
        vat_rate: VAT_RATE,
    };

    /// Creates a schedule; both rates are fractions in `[0, 1]`.
    ///
    /// ## Example
    /// ```rust
    /// use cellfin_core::calculator::FeeSchedule;
    ///
    /// assert!(FeeSchedule::new(0.02, 0.15).is_ok());
    /// assert!(FeeSchedule::new(3.0, 0.15).is_err()); // 300% is a typo
    /// ```
    pub fn new(bank_charge_rate: f64, vat_rate: f64) -> CoreResult<Self> {
        check_rate("bank_charge_rate", bank_charge_rate)?;
        check_rate("vat_rate", vat_rate)?;

        Ok(FeeSchedule {
            bank_charge_rate,
            vat_rate,
        })
    }

    #[inline]
    pub const fn bank_charge_rate(&self) -> f64 {
        self.bank_charge_rate
    }

    #[inline]
    pub const fn vat_rate(&self) -> f64 {
        self.vat_rate
    }

    /// Total over base: `1 + bank + bank × vat` (1.0345 for the standard
    /// schedule).
    pub fn total_multiplier(&self) -> f64 {
        1.0 + self.bank_charge_rate + self.bank_charge_rate * self.vat_rate
    }

    /// Computes the breakdown for one conversion.
    ///
    /// Total function: any non-negative finite inputs produce a result.
    /// Inputs are not re-validated; keeping negatives and non-finite values
    /// out is the caller's job (see [`crate::parse::best_effort_number`]).
    ///
    /// ## User Workflow
    /// ```text
    /// USD 100 at 123 BDT/USD
    ///      │
    ///      ▼
    /// compute(100, 123) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Base 12,300.00 + charge 369.00 + VAT 55.35 = 12,724.35
    /// ```
    pub fn compute(&self, usd_amount: f64, exchange_rate: f64) -> ConversionResult {
        let base_amount = usd_amount * exchange_rate;
        let bank_charge = base_amount * self.bank_charge_rate;
        let vat_amount = bank_charge * self.vat_rate;
        let total_amount = base_amount + bank_charge + vat_amount;

        ConversionResult {
            usd_amount,
            exchange_rate,
            base_amount,
            bank_charge,
            vat_amount,
            total_amount,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::STANDARD
    }
}

fn check_rate(name: &'static str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(CoreError::InvalidFeeRate { name, value });
    }
    Ok(())
}

// =============================================================================
// Free Function
// =============================================================================

/// Computes the breakdown with the standard 3% charge and 15% VAT.
#[inline]
pub fn compute(usd_amount: f64, exchange_rate: f64) -> ConversionResult {
    FeeSchedule::STANDARD.compute(usd_amount, exchange_rate)
}

// =============================================================================
// Unit Tests
// =============================================================================
