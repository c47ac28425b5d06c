//! # Formatter Module
//!
//! Turns a [`ConversionResult`] into the strings the form displays and the
//! plain-text summary the user can copy.
//!
//! ## Two Number Styles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  On-screen breakdown (grouped)        Copyable summary (plain)          │
//! │  ─────────────────────────────        ────────────────────────          │
//! │  ৳ 12,724.35                          ৳12724.35                         │
//! │  $1,000.00                            $1000.00                          │
//! │  ৳ 0.00  (canonical zero)             ৳0.00                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both styles round the exact decimal value of the amount to two
//! decimals, half away from zero (`0.015` is stored just below the tie and
//! renders `0.01`). Grouping is a fixed rule (`,` every three digits, `.`
//! decimal point); no system locale is consulted, so output is identical on
//! every platform.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::FeeSchedule;
use crate::types::ConversionResult;

// =============================================================================
// Currency
// =============================================================================

/// The two currencies the form displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// US dollar, the foreign currency being paid.
    Usd,
    /// Bangladeshi taka, the local currency debited.
    Bdt,
}

impl Currency {
    /// Prefix used on grouped display strings.
    pub const fn display_prefix(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Bdt => "৳ ",
        }
    }

    /// Bare symbol used inside the plain-text summary.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Bdt => "৳",
        }
    }

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Bdt => "BDT",
        }
    }

    /// Canonical display for exactly zero.
    pub const fn zero_display(&self) -> &'static str {
        match self {
            Currency::Usd => "$0.00",
            Currency::Bdt => "৳ 0.00",
        }
    }
}

/// The currency the card is billed in.
pub const LOCAL_CURRENCY: Currency = Currency::Bdt;

/// The currency of the payment being converted.
pub const FOREIGN_CURRENCY: Currency = Currency::Usd;

// =============================================================================
// Number Formatting
// =============================================================================

/// From this magnitude up, every `f64` is a whole number.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// An amount rounded to cents: sign, integer digits, two-digit cents.
struct Cents {
    negative: bool,
    whole: String,
    cents: u64,
}

/// Rounds the exact decimal value of `amount` to cents, half away from
/// zero. A value that rounds to zero is never negative.
fn to_cents(amount: f64) -> Cents {
    let magnitude = amount.abs();

    if magnitude >= EXACT_INTEGER_LIMIT {
        return Cents {
            negative: amount < 0.0,
            whole: format!("{magnitude:.0}"),
            cents: 0,
        };
    }

    let total_cents = Decimal::from_f64_retain(magnitude)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED;
    let total_cents = total_cents.to_u64().unwrap_or(0);

    Cents {
        negative: amount < 0.0 && total_cents > 0,
        whole: (total_cents / 100).to_string(),
        cents: total_cents % 100,
    }
}

fn non_finite(amount: f64) -> &'static str {
    if amount.is_nan() {
        "NaN"
    } else if amount > 0.0 {
        "∞"
    } else {
        "-∞"
    }
}

/// Inserts `,` between every group of three digits, from the right.
///
/// ## Example
/// ```rust
/// use cellfin_core::formatter::group_thousands;
///
/// assert_eq!(group_thousands(1_234_567), "1,234,567");
/// assert_eq!(group_thousands(999), "999");
/// ```
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Formats to two decimals with thousands grouping, no currency symbol.
pub fn format_grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return non_finite(amount).to_string();
    }

    let rounded = to_cents(amount);
    let sign = if rounded.negative { "-" } else { "" };
    format!("{sign}{}.{:02}", group_digits(&rounded.whole), rounded.cents)
}

/// Formats to exactly two decimals without grouping.
///
/// ## Example
/// ```rust
/// use cellfin_core::formatter::format_fixed;
///
/// assert_eq!(format_fixed(12_724.35), "12724.35");
/// assert_eq!(format_fixed(0.5535), "0.55");
/// ```
pub fn format_fixed(amount: f64) -> String {
    if !amount.is_finite() {
        return non_finite(amount).to_string();
    }

    let rounded = to_cents(amount);
    let sign = if rounded.negative { "-" } else { "" };
    format!("{sign}{}.{:02}", rounded.whole, rounded.cents)
}

/// Formats a fraction as a percentage label, dropping trailing zeros
/// (`0.03` → `"3"`, `0.025` → `"2.5"`).
pub fn format_percent(rate: f64) -> String {
    let fixed = format_fixed(rate * 100.0);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

// =============================================================================
// Currency Formatting
// =============================================================================

/// Formats an amount for on-screen display in the given currency.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    if amount == 0.0 {
        return currency.zero_display().to_string();
    }

    format!("{}{}", currency.display_prefix(), format_grouped(amount))
}

/// Formats a local-currency amount: `৳ 12,724.35`, zero as `৳ 0.00`.
///
/// ## Example
/// ```rust
/// use cellfin_core::formatter::format_local_currency;
///
/// assert_eq!(format_local_currency(12_724.35), "৳ 12,724.35");
/// assert_eq!(format_local_currency(0.0), "৳ 0.00");
/// ```
pub fn format_local_currency(amount: f64) -> String {
    format_currency(amount, LOCAL_CURRENCY)
}

/// Formats a USD amount: `$1,000.00`, zero as `$0.00`.
pub fn format_foreign_currency(amount: f64) -> String {
    format_currency(amount, FOREIGN_CURRENCY)
}

// =============================================================================
// Summary Template
// =============================================================================

/// Default first line of the copyable summary.
pub const DEFAULT_SUMMARY_TITLE: &str = "CellFin Virtual Mastercard - Currency Conversion Summary";

/// Default closing lines of the copyable summary.
pub const DEFAULT_SUMMARY_FOOTER: [&str; 2] = [
    "Generated by CellFin Virtual Mastercard Currency Converter",
    "Islami Bank Bangladesh Limited",
];

/// The fixed layout of the plain-text summary.
///
/// ## Rendered Layout
/// ```text
/// CellFin Virtual Mastercard - Currency Conversion Summary
///
/// USD Amount: $100.00
/// Exchange Rate: ৳123.00 per USD
///
/// Calculation Breakdown:
/// • Base Amount: ৳12300.00
/// • Bank Charge (3%): ৳369.00
/// • VAT on Charge (15%): ৳55.35
///
/// Total BDT Required: ৳12724.35
///
/// Generated by CellFin Virtual Mastercard Currency Converter
/// Islami Bank Bangladesh Limited
/// ```
///
/// Numbers use [`format_fixed`]: two decimals, never grouped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTemplate {
    /// First line.
    pub title: String,

    /// Closing lines, printed after the total.
    pub footer: Vec<String>,

    /// Rates shown in the fee labels.
    pub fees: FeeSchedule,
}

impl Default for SummaryTemplate {
    fn default() -> Self {
        SummaryTemplate {
            title: DEFAULT_SUMMARY_TITLE.to_string(),
            footer: DEFAULT_SUMMARY_FOOTER.iter().map(|line| line.to_string()).collect(),
            fees: FeeSchedule::STANDARD,
        }
    }
}

impl SummaryTemplate {
    /// Renders the summary for one result.
    pub fn render(&self, result: &ConversionResult) -> String {
        let usd = FOREIGN_CURRENCY.symbol();
        let local = LOCAL_CURRENCY.symbol();
        let local_code = LOCAL_CURRENCY.code();

        let mut lines = vec![
            self.title.clone(),
            String::new(),
            format!("USD Amount: {usd}{}", format_fixed(result.usd_amount)),
            format!(
                "Exchange Rate: {local}{} per USD",
                format_fixed(result.exchange_rate)
            ),
            String::new(),
            "Calculation Breakdown:".to_string(),
            format!("• Base Amount: {local}{}", format_fixed(result.base_amount)),
            format!(
                "• Bank Charge ({}%): {local}{}",
                format_percent(self.fees.bank_charge_rate()),
                format_fixed(result.bank_charge)
            ),
            format!(
                "• VAT on Charge ({}%): {local}{}",
                format_percent(self.fees.vat_rate()),
                format_fixed(result.vat_amount)
            ),
            String::new(),
            format!(
                "Total {local_code} Required: {local}{}",
                format_fixed(result.total_amount)
            ),
        ];

        if !self.footer.is_empty() {
            lines.push(String::new());
            lines.extend(self.footer.iter().cloned());
        }

        lines.join("\n")
    }
}

/// Renders the summary with the default template.
pub fn format_summary(result: &ConversionResult) -> String {
    SummaryTemplate::default().render(result)
}

// =============================================================================
// Formatted Breakdown
// =============================================================================

/// Every string the form shows for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBreakdown {
    pub base_display: String,
    pub bank_charge_display: String,
    pub vat_display: String,
    pub total_display: String,
    pub summary_usd_display: String,
    pub summary_total_display: String,
    pub plain_text_summary: String,
    /// Whether the breakdown card should be highlighted (total above zero).
    pub has_calculation: bool,
}

/// Formats a result with the default summary template.
pub fn format(result: &ConversionResult) -> FormattedBreakdown {
    format_with(result, &SummaryTemplate::default())
}

/// Formats a result with a custom summary template.
pub fn format_with(result: &ConversionResult, template: &SummaryTemplate) -> FormattedBreakdown {
    FormattedBreakdown {
        base_display: format_local_currency(result.base_amount),
        bank_charge_display: format_local_currency(result.bank_charge),
        vat_display: format_local_currency(result.vat_amount),
        total_display: format_local_currency(result.total_amount),
        summary_usd_display: format_foreign_currency(result.usd_amount),
        summary_total_display: format_local_currency(result.total_amount),
        plain_text_summary: template.render(result),
        has_calculation: result.has_calculation(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;

    #[test]
    fn test_canonical_zero() {
        assert_eq!(format_local_currency(0.0), "৳ 0.00");
        assert_eq!(format_local_currency(-0.0), "৳ 0.00");
        assert_eq!(format_foreign_currency(0.0), "$0.00");
    }

    #[test]
    fn test_grouped_display() {
        assert_eq!(format_local_currency(12_724.35), "৳ 12,724.35");
        assert_eq!(format_local_currency(123.0), "৳ 123.00");
        assert_eq!(format_local_currency(1_234_567.891), "৳ 1,234,567.89");
        assert_eq!(format_foreign_currency(10_000.0), "$10,000.00");
        assert_eq!(format_foreign_currency(0.5), "$0.50");
    }

    #[test]
    fn test_rounding_to_cents() {
        assert_eq!(format_local_currency(0.5535), "৳ 0.55");
        assert_eq!(format_local_currency(127.2435), "৳ 127.24");
        assert_eq!(format_local_currency(0.005), "৳ 0.01");
        // Rounds to zero but is not exactly zero
        assert_eq!(format_local_currency(0.001), "৳ 0.00");
        assert_eq!(format_local_currency(-0.001), "৳ 0.00");
    }

    #[test]
    fn test_rounds_exact_decimal_value() {
        // Stored just below the tie
        assert_eq!(format_fixed(0.015), "0.01");
        assert_eq!(format_fixed(0.045), "0.04");
        assert_eq!(format_fixed(0.155), "0.15");
        assert_eq!(format_local_currency(1.005), "৳ 1.00");

        // Exactly representable ties go away from zero
        assert_eq!(format_fixed(0.125), "0.13");
        assert_eq!(format_fixed(0.375), "0.38");
        assert_eq!(format_fixed(-0.125), "-0.13");
    }

    #[test]
    fn test_huge_amounts_stay_exact() {
        let big = 2f64.powi(70);
        assert_eq!(format_fixed(big), "1180591620717411303424.00");
        assert_eq!(format_local_currency(big), "৳ 1,180,591,620,717,411,303,424.00");
        assert_eq!(format_fixed(-(2f64.powi(60))), "-1152921504606846976.00");

        // Largest values that still carry a fraction
        assert_eq!(format_fixed(4_503_599_627_370_495.5), "4503599627370495.50");
        assert_eq!(format_fixed(2f64.powi(53)), "9007199254740992.00");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format_foreign_currency(-5.5), "$-5.50");
        assert_eq!(format_local_currency(f64::INFINITY), "৳ ∞");
        assert_eq!(format_fixed(f64::NAN), "NaN");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12_300), "12,300");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }

    #[test]
    fn test_fixed_is_ungrouped() {
        assert_eq!(format_fixed(12_724.35), "12724.35");
        assert_eq!(format_fixed(0.0), "0.00");
        assert_eq!(format_fixed(123.0), "123.00");
        assert_eq!(format_fixed(-2.0), "-2.00");
    }

    #[test]
    fn test_percent_labels() {
        assert_eq!(format_percent(0.03), "3");
        assert_eq!(format_percent(0.15), "15");
        assert_eq!(format_percent(0.025), "2.5");
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(1.0), "100");
    }

    #[test]
    fn test_summary_lists_all_six_fields() {
        let summary = format_summary(&compute(100.0, 123.0));
        let expected = "\
CellFin Virtual Mastercard - Currency Conversion Summary

USD Amount: $100.00
Exchange Rate: ৳123.00 per USD

Calculation Breakdown:
• Base Amount: ৳12300.00
• Bank Charge (3%): ৳369.00
• VAT on Charge (15%): ৳55.35

Total BDT Required: ৳12724.35

Generated by CellFin Virtual Mastercard Currency Converter
Islami Bank Bangladesh Limited";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_custom_template() {
        let fees = FeeSchedule::new(0.025, 0.15).unwrap();
        let template = SummaryTemplate {
            title: "Quote".to_string(),
            footer: Vec::new(),
            fees,
        };
        let summary = template.render(&fees.compute(2.0, 100.0));
        assert!(summary.starts_with("Quote\n\nUSD Amount: $2.00\n"));
        assert!(summary.contains("• Bank Charge (2.5%): ৳5.00"));
        assert!(summary.ends_with("Total BDT Required: ৳205.75"));
    }

    #[test]
    fn test_format_breakdown() {
        let display = format(&compute(100.0, 123.0));
        assert_eq!(display.base_display, "৳ 12,300.00");
        assert_eq!(display.bank_charge_display, "৳ 369.00");
        assert_eq!(display.vat_display, "৳ 55.35");
        assert_eq!(display.total_display, "৳ 12,724.35");
        assert_eq!(display.summary_usd_display, "$100.00");
        assert_eq!(display.summary_total_display, "৳ 12,724.35");
        assert!(display.plain_text_summary.contains("৳12724.35"));
        assert!(display.has_calculation);
    }

    #[test]
    fn test_format_empty_breakdown() {
        let display = format(&compute(0.0, 123.0));
        assert_eq!(display.total_display, "৳ 0.00");
        assert_eq!(display.summary_usd_display, "$0.00");
        assert!(!display.has_calculation);
    }
}
