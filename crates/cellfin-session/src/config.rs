//! # Converter Configuration
//!
//! Product configuration for the converter form.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CELLFIN_DEFAULT_RATE=121.50                                        │
//! │     CELLFIN_DEBOUNCE_MS=150                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cellfin-converter/converter.toml (Linux)                 │
//! │     ~/Library/Application Support/com.cellfin.converter/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     3% bank charge, 15% VAT, rate 123.00, 100ms debounce               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # converter.toml
//! [fees]
//! bank_charge_rate = 0.03
//! vat_rate = 0.15
//!
//! [session]
//! default_rate = 123.0
//! debounce_ms = 100
//!
//! [summary]
//! title = "CellFin Virtual Mastercard - Currency Conversion Summary"
//! footer = ["Generated by CellFin Virtual Mastercard Currency Converter"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use cellfin_core::calculator::{FeeSchedule, BANK_CHARGE_RATE, VAT_RATE};
use cellfin_core::formatter::{SummaryTemplate, DEFAULT_SUMMARY_FOOTER, DEFAULT_SUMMARY_TITLE};
use cellfin_core::{ConversionEngine, DEFAULT_EXCHANGE_RATE};

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::error::{SessionError, SessionResult};

/// Longest debounce window accepted from configuration.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

// =============================================================================
// Fee Settings
// =============================================================================

/// Fee rates, as fractions (0.03 = 3%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSettings {
    /// Bank charge on the base amount.
    #[serde(default = "default_bank_charge_rate")]
    pub bank_charge_rate: f64,

    /// VAT on the bank charge.
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,
}

fn default_bank_charge_rate() -> f64 {
    BANK_CHARGE_RATE
}

fn default_vat_rate() -> f64 {
    VAT_RATE
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            bank_charge_rate: default_bank_charge_rate(),
            vat_rate: default_vat_rate(),
        }
    }
}

impl FeeSettings {
    /// Builds the engine's fee schedule.
    pub fn schedule(&self) -> SessionResult<FeeSchedule> {
        FeeSchedule::new(self.bank_charge_rate, self.vat_rate)
            .map_err(|err| SessionError::InvalidConfig(err.to_string()))
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Form behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Exchange rate pre-filled on reset.
    #[serde(default = "default_rate")]
    pub default_rate: f64,

    /// Quiet period before a burst of keystrokes is recomputed (ms).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            default_rate: default_rate(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SessionSettings {
    /// Returns the debounce window as a Duration.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Default rate as the form shows it after reset (`"123.00"`).
    pub fn default_rate_text(&self) -> String {
        format!("{:.2}", self.default_rate)
    }
}

// =============================================================================
// Summary Settings
// =============================================================================

/// Branding lines of the copyable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySettings {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_footer")]
    pub footer: Vec<String>,
}

fn default_title() -> String {
    DEFAULT_SUMMARY_TITLE.to_string()
}

fn default_footer() -> Vec<String> {
    DEFAULT_SUMMARY_FOOTER.iter().map(|line| line.to_string()).collect()
}

impl Default for SummarySettings {
    fn default() -> Self {
        SummarySettings {
            title: default_title(),
            footer: default_footer(),
        }
    }
}

// =============================================================================
// Main Converter Configuration
// =============================================================================

/// Complete converter configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    #[serde(default)]
    pub fees: FeeSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub summary: SummarySettings,
}

impl ConverterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (converter.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading converter config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load converter config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Converter config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        self.fees.schedule()?;

        let rate = self.session.default_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "default_rate must be a positive number, got {}",
                rate
            )));
        }

        if self.session.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SessionError::InvalidConfig(format!(
                "debounce_ms must be at most {}, got {}",
                MAX_DEBOUNCE_MS, self.session.debounce_ms
            )));
        }

        Ok(())
    }

    /// Builds the conversion engine this configuration describes.
    pub fn engine(&self) -> SessionResult<ConversionEngine> {
        let fees = self.fees.schedule()?;
        let template = SummaryTemplate {
            title: self.summary.title.clone(),
            footer: self.summary.footer.clone(),
            fees,
        };
        Ok(ConversionEngine::new(fees, template))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rate) = parse_override::<f64>(&lookup, "CELLFIN_DEFAULT_RATE") {
            debug!(rate, "Overriding default rate from environment");
            self.session.default_rate = rate;
        }

        if let Some(ms) = parse_override::<u64>(&lookup, "CELLFIN_DEBOUNCE_MS") {
            debug!(ms, "Overriding debounce window from environment");
            self.session.debounce_ms = ms;
        }

        if let Some(rate) = parse_override::<f64>(&lookup, "CELLFIN_BANK_CHARGE_RATE") {
            debug!(rate, "Overriding bank charge rate from environment");
            self.fees.bank_charge_rate = rate;
        }

        if let Some(rate) = parse_override::<f64>(&lookup, "CELLFIN_VAT_RATE") {
            debug!(rate, "Overriding VAT rate from environment");
            self.fees.vat_rate = rate;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cellfin", "converter")
            .map(|dirs| dirs.config_dir().join("converter.toml"))
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.fees.bank_charge_rate, 0.03);
        assert_eq!(config.fees.vat_rate, 0.15);
        assert_eq!(config.session.default_rate, 123.0);
        assert_eq!(config.session.debounce_window(), Duration::from_millis(100));
        assert_eq!(config.session.default_rate_text(), "123.00");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ConverterConfig = toml::from_str(
            r#"
            [session]
            default_rate = 121.5
            "#,
        )
        .unwrap();
        assert_eq!(config.session.default_rate, 121.5);
        assert_eq!(config.session.debounce_ms, 100);
        assert_eq!(config.fees, FeeSettings::default());
        assert_eq!(config.summary, SummarySettings::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ConverterConfig::default();

        config.session.default_rate = 0.0;
        assert!(config.validate().is_err());

        config.session.default_rate = 110.0;
        config.fees.vat_rate = 15.0; // percent instead of fraction
        assert!(matches!(config.validate(), Err(SessionError::InvalidConfig(_))));

        config.fees.vat_rate = 0.15;
        config.session.debounce_ms = MAX_DEBOUNCE_MS + 1;
        assert!(config.validate().is_err());

        config.session.debounce_ms = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = ConverterConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CELLFIN_DEFAULT_RATE", "119.75"),
            ("CELLFIN_DEBOUNCE_MS", "250"),
            ("CELLFIN_BANK_CHARGE_RATE", "0.025"),
            ("CELLFIN_VAT_RATE", "0.10"),
        ]));
        assert_eq!(config.session.default_rate, 119.75);
        assert_eq!(config.session.debounce_ms, 250);
        assert_eq!(config.fees.vat_rate, 0.10);
        assert_eq!(config.fees.bank_charge_rate, 0.025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = ConverterConfig::default();
        config.apply_overrides(lookup_from(&[("CELLFIN_DEBOUNCE_MS", "soon")]));
        assert_eq!(config.session.debounce_ms, 100);
    }

    #[test]
    fn test_engine_uses_configured_fees() {
        let mut config = ConverterConfig::default();
        config.fees.bank_charge_rate = 0.02;
        config.summary.footer.clear();

        let engine = config.engine().unwrap();
        let result = engine.compute(100.0, 100.0);
        assert!((result.bank_charge - 200.0).abs() < 1e-9);

        let summary = engine.format(&result).plain_text_summary;
        assert!(summary.contains("Bank Charge (2%)"));
        assert!(summary.ends_with("Total BDT Required: ৳10230.00"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("converter.toml");

        let mut config = ConverterConfig::default();
        config.session.default_rate = 118.0;
        config.summary.title = "Branch Quote".to_string();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[session]"));
        assert!(contents.contains("[fees]"));

        let loaded: ConverterConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("converter.toml");
        std::fs::write(&path, "[session]\ndefault_rate = -1.0\n").unwrap();

        assert!(ConverterConfig::load(Some(path.clone())).is_err());
        // load_or_default falls back rather than failing
        let config = ConverterConfig::load_or_default(Some(path));
        assert_eq!(config.session.default_rate, 123.0);
    }
}
