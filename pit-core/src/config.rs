//! Calculator configuration.
//!
//! Everything that varies by jurisdiction or tax year lives here and is
//! handed to the calculator at construction time. A configuration can be
//! built in code, taken from [`CalculatorConfig::default`] (Nigeria 2025), or
//! parsed from TOML:
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pit_core::{CalculatorConfig, NegativeAmountPolicy};
//!
//! let config = CalculatorConfig::from_toml_str(
//!     r#"
//!     rent_relief_cap = "600000"
//!     negative_amounts = "clamp"
//!
//!     [[bands]]
//!     width = "1000000"
//!     rate = "0"
//!
//!     [[bands]]
//!     rate = "0.20"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.rent_relief_cap, dec!(600000));
//! assert_eq!(config.rent_relief_rate, dec!(0.20));
//! assert_eq!(config.negative_amounts, NegativeAmountPolicy::Clamp);
//! assert_eq!(config.bands.thresholds(), vec![dec!(1000000)]);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::BandSchedule;

/// Errors raised while loading or validating a [`CalculatorConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rent relief rate must be between 0 and 1, got {0}")]
    InvalidRentReliefRate(Decimal),

    #[error("rent relief cap must be non-negative, got {0}")]
    NegativeRentReliefCap(Decimal),

    #[error("config parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// What the input boundary does with a negative monetary amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeAmountPolicy {
    /// Fail with [`InputError::NegativeAmount`](crate::calculations::InputError::NegativeAmount).
    #[default]
    Reject,
    /// Replace the amount with zero.
    Clamp,
    /// Keep the amount as entered. A negative deduction then lowers the tax.
    PassThrough,
}

/// Jurisdiction and year specific parameters.
///
/// The fields are public, so a value built in code is unchecked until
/// [`Self::validate`] runs. [`Self::from_toml_str`] and
/// [`LiabilityCalculator::try_new`](crate::calculations::LiabilityCalculator::try_new)
/// both validate; [`LiabilityCalculator::new`](crate::calculations::LiabilityCalculator::new)
/// does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Progressive band table applied to chargeable income.
    pub bands: BandSchedule,

    /// Share of rent paid that counts as relief.
    pub rent_relief_rate: Decimal,

    /// Maximum rent relief for a full year. Divided evenly across shorter
    /// periods.
    pub rent_relief_cap: Decimal,

    pub negative_amounts: NegativeAmountPolicy,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            bands: BandSchedule::nigeria_2025(),
            rent_relief_rate: Decimal::new(20, 2),
            rent_relief_cap: Decimal::from(500_000),
            negative_amounts: NegativeAmountPolicy::Reject,
        }
    }
}

impl CalculatorConfig {
    /// Parses and validates a TOML document. Missing keys take their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, a band schedule
    /// that fails validation, or any error reported by [`Self::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the relief parameters. The band schedule is validated when it
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `rent_relief_rate` is not in `[0, 1]`
    /// - `rent_relief_cap` is negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rent_relief_rate < Decimal::ZERO || self.rent_relief_rate > Decimal::ONE {
            return Err(ConfigError::InvalidRentReliefRate(self.rent_relief_rate));
        }
        if self.rent_relief_cap < Decimal::ZERO {
            return Err(ConfigError::NegativeRentReliefCap(self.rent_relief_cap));
        }
        Ok(())
    }

    /// Replaces the band schedule, keeping every other setting.
    pub fn with_bands(
        mut self,
        bands: BandSchedule,
    ) -> Self {
        self.bands = bands;
        self
    }
}
