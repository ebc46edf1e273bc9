//! Tripwise Configuration Parser
//!
//! Parses tripwise.toml files: backend location and pricing strategy.

use crate::pricing::FixedRates;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the config directory
pub const CONFIG_FILE_NAME: &str = "tripwise.toml";

/// Upper bound for any configured rate, in currency units
pub const MAX_RATE: u32 = 1_000_000;

/// The main configuration structure matching tripwise.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripwiseConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Booking backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., "https://shop.example.com/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Where unit prices come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingStrategy {
    /// Placeholder constants from this file
    #[default]
    Fixed,
    /// Prices on the catalog records
    Catalog,
}

/// Pricing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub strategy: PricingStrategy,

    /// ISO 4217 currency code shown and sent with orders
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_nightly_rate")]
    pub nightly_rate: Decimal,

    #[serde(default = "default_flight_rate")]
    pub flight_rate: Decimal,

    #[serde(default = "default_car_daily_rate")]
    pub car_daily_rate: Decimal,

    /// Flat per-traveller activity price, used by both strategies
    #[serde(default = "default_activity_rate")]
    pub activity_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            strategy: PricingStrategy::default(),
            currency: default_currency(),
            nightly_rate: default_nightly_rate(),
            flight_rate: default_flight_rate(),
            car_daily_rate: default_car_daily_rate(),
            activity_rate: default_activity_rate(),
        }
    }
}

impl PricingConfig {
    pub fn fixed_rates(&self) -> FixedRates {
        FixedRates {
            nightly: self.nightly_rate,
            flight: self.flight_rate,
            car_daily: self.car_daily_rate,
            activity: self.activity_rate,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_nightly_rate() -> Decimal {
    FixedRates::default().nightly
}

fn default_flight_rate() -> Decimal {
    FixedRates::default().flight
}

fn default_car_daily_rate() -> Decimal {
    FixedRates::default().car_daily
}

fn default_activity_rate() -> Decimal {
    FixedRates::default().activity
}

impl TripwiseConfig {
    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse tripwise.toml")
    }

    /// Load from an explicit path, or the first default location that
    /// exists, or fall back to built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in Self::default_locations() {
            if candidate.exists() {
                tracing::debug!("Using config file {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// ./tripwise.toml, then $XDG_CONFIG_HOME/tripwise/tripwise.toml
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            locations.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("tripwise").join(CONFIG_FILE_NAME));
        }
        locations
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!(
                "api.base_url must start with http:// or https://, got: {}",
                url
            );
        }

        if !(1..=300).contains(&self.api.timeout_secs) {
            anyhow::bail!(
                "api.timeout_secs must be between 1 and 300, got: {}",
                self.api.timeout_secs
            );
        }

        let currency = &self.pricing.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            anyhow::bail!(
                "pricing.currency should be a 3-letter ISO code (e.g., 'USD'), got: {}",
                currency
            );
        }

        let rates = [
            ("nightly_rate", self.pricing.nightly_rate),
            ("flight_rate", self.pricing.flight_rate),
            ("car_daily_rate", self.pricing.car_daily_rate),
            ("activity_rate", self.pricing.activity_rate),
        ];
        for (name, rate) in rates {
            if rate.is_sign_negative() {
                anyhow::bail!("pricing.{} must not be negative, got: {}", name, rate);
            }
            if rate > Decimal::from(MAX_RATE) {
                anyhow::bail!("pricing.{} must be at most {}, got: {}", name, MAX_RATE, rate);
            }
        }

        Ok(())
    }
}

/// Generate a template tripwise.toml file
pub fn generate_template(base_url: &str) -> String {
    format!(r#"# Tripwise Configuration

[api]
# Base URL of the booking REST API
base_url = "{base_url}"

# Request timeout in seconds
timeout_secs = 30

[pricing]
# "fixed" uses the rates below, "catalog" uses prices from the catalog
strategy = "fixed"
currency = "USD"

nightly_rate = "150.00"
flight_rate = "300.00"
car_daily_rate = "45.00"

# Flat per-traveller price of each activity (used by both strategies)
activity_rate = "50.00"
"#,
        base_url = base_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = TripwiseConfig::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 30); // default
        assert_eq!(config.pricing.strategy, PricingStrategy::Fixed);
        assert_eq!(config.pricing.fixed_rates(), FixedRates::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [api]
            base_url = "https://shop.example.com/api"
            timeout_secs = 10

            [pricing]
            strategy = "catalog"
            currency = "EUR"
            nightly_rate = "99.90"
            flight_rate = 250
            activity_rate = "20"
        "#;

        let config = TripwiseConfig::from_str(toml).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.pricing.strategy, PricingStrategy::Catalog);
        assert_eq!(config.pricing.nightly_rate, Decimal::new(9990, 2));
        assert_eq!(config.pricing.flight_rate, Decimal::from(250));
        assert_eq!(config.pricing.car_daily_rate, Decimal::from(45)); // default
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = TripwiseConfig::from_str("[api]\nbase_url = \"ftp://nope\"").unwrap();
        assert!(config.validate().is_err());

        let config = TripwiseConfig::from_str("[pricing]\ncurrency = \"euro\"").unwrap();
        assert!(config.validate().is_err());

        let config = TripwiseConfig::from_str("[pricing]\nnightly_rate = \"-1\"").unwrap();
        assert!(config.validate().is_err());

        let config = TripwiseConfig::from_str("[api]\ntimeout_secs = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_rates() {
        let config = TripwiseConfig::from_str("[pricing]\nnightly_rate = \"1000000\"").unwrap();
        assert!(config.validate().is_ok());

        let config =
            TripwiseConfig::from_str("[pricing]\nactivity_rate = \"1000000000\"").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pricing.activity_rate must be at most"));
    }

    #[test]
    fn test_template_round_trips() {
        let template = generate_template("https://shop.example.com/api");
        let config = TripwiseConfig::from_str(&template).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        config.validate().unwrap();
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[pricing]\ncurrency = \"GBP\"\n").unwrap();

        let config = TripwiseConfig::load(Some(&path)).unwrap();
        assert_eq!(config.pricing.currency, "GBP");

        assert!(TripwiseConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
