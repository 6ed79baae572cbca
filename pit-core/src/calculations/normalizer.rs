//! Input boundary for the liability calculator.
//!
//! Request payloads name whichever fields the caller happens to know about.
//! [`RawTaxInput`] accepts that loose shape (every field optional, unknown
//! keys ignored, the field names used by older profile payloads accepted as
//! aliases) and [`TaxInputNormalizer`] turns it into a fully-populated
//! [`TaxInput`] exactly once, before any arithmetic happens.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pit_core::calculations::{RawTaxInput, TaxInputNormalizer};
//! use pit_core::{NegativeAmountPolicy, Period};
//!
//! let mut raw = RawTaxInput::default();
//! raw.set("employment_income", dec!(250000)).unwrap();
//! raw.set("annual_rent", dec!(60000)).unwrap();
//! raw.period = Some("Monthly".to_string());
//!
//! let input = TaxInputNormalizer::new(NegativeAmountPolicy::Reject)
//!     .normalize(&raw)
//!     .unwrap();
//!
//! assert_eq!(input.employment_income, dec!(250000));
//! assert_eq!(input.house_rent, dec!(60000));
//! assert_eq!(input.business_income, dec!(0));
//! assert_eq!(input.period, Period::Monthly);
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::{CalculatorConfig, NegativeAmountPolicy};
use crate::models::{Period, TaxInput};

/// Largest magnitude accepted for any single monetary field: one quadrillion
/// (10^15). Fifteen fields at this size still sum and scale to a yearly
/// figure well inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Errors raised while normalizing raw calculator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The period is neither annual nor monthly.
    #[error("unrecognised period '{0}'; expected 'annual' or 'monthly'")]
    InvalidPeriod(String),

    /// A monetary field is below zero and the policy is to reject it.
    #[error("{field} must not be negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Decimal },

    /// A monetary field is larger in magnitude than [`MAX_AMOUNT`].
    #[error("{field} must not exceed {max} in magnitude, got {amount}", max = MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, amount: Decimal },

    /// [`RawTaxInput::set`] was given a name that matches no field.
    #[error("unknown input field '{0}'")]
    UnknownField(String),
}

/// Loosely-typed calculator input. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawTaxInput {
    pub employment_income: Option<Decimal>,
    pub business_income: Option<Decimal>,
    pub investment_income: Option<Decimal>,
    pub other_income: Option<Decimal>,
    pub chargeable_gains: Option<Decimal>,
    pub exempt_income: Option<Decimal>,
    pub final_wht_income: Option<Decimal>,
    pub losses_allowed: Option<Decimal>,
    pub capital_allowances: Option<Decimal>,
    #[serde(alias = "nhf")]
    pub national_housing_fund: Option<Decimal>,
    #[serde(alias = "nhis")]
    pub national_health_insurance: Option<Decimal>,
    #[serde(alias = "pension")]
    pub pension_contribution: Option<Decimal>,
    #[serde(alias = "house_loan_interest")]
    pub mortgage_interest: Option<Decimal>,
    #[serde(alias = "life_insurance")]
    pub life_insurance_premium: Option<Decimal>,
    #[serde(alias = "annual_rent")]
    pub house_rent: Option<Decimal>,
    pub period: Option<String>,
}

impl RawTaxInput {
    /// Assigns a monetary field by name. Accepts the same aliases as
    /// deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownField`] if `name` matches no monetary
    /// field.
    pub fn set(
        &mut self,
        name: &str,
        value: Decimal,
    ) -> Result<(), InputError> {
        let slot = self
            .field_mut(name)
            .ok_or_else(|| InputError::UnknownField(name.to_string()))?;
        *slot = Some(value);
        Ok(())
    }

    fn field_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Option<Decimal>> {
        let slot = match name {
            "employment_income" => &mut self.employment_income,
            "business_income" => &mut self.business_income,
            "investment_income" => &mut self.investment_income,
            "other_income" => &mut self.other_income,
            "chargeable_gains" => &mut self.chargeable_gains,
            "exempt_income" => &mut self.exempt_income,
            "final_wht_income" => &mut self.final_wht_income,
            "losses_allowed" => &mut self.losses_allowed,
            "capital_allowances" => &mut self.capital_allowances,
            "national_housing_fund" | "nhf" => &mut self.national_housing_fund,
            "national_health_insurance" | "nhis" => &mut self.national_health_insurance,
            "pension_contribution" | "pension" => &mut self.pension_contribution,
            "mortgage_interest" | "house_loan_interest" => &mut self.mortgage_interest,
            "life_insurance_premium" | "life_insurance" => &mut self.life_insurance_premium,
            "house_rent" | "annual_rent" => &mut self.house_rent,
            _ => return None,
        };
        Some(slot)
    }
}

/// Turns a [`RawTaxInput`] into a [`TaxInput`].
///
/// Absent amounts become zero and an absent period becomes
/// [`Period::Annual`]. Negative amounts are handled according to the
/// configured [`NegativeAmountPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxInputNormalizer {
    policy: NegativeAmountPolicy,
}

impl TaxInputNormalizer {
    pub fn new(policy: NegativeAmountPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(config.negative_amounts)
    }

    pub fn policy(&self) -> NegativeAmountPolicy {
        self.policy
    }

    /// Produces a fully-populated input. `raw` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if:
    /// - the period is present but not recognised
    /// - a monetary field is larger in magnitude than [`MAX_AMOUNT`], under
    ///   every policy
    /// - a monetary field is negative under [`NegativeAmountPolicy::Reject`]
    ///
    /// The first offending field in declaration order is reported.
    pub fn normalize(
        &self,
        raw: &RawTaxInput,
    ) -> Result<TaxInput, InputError> {
        let period = self.period(raw.period.as_deref())?;

        Ok(TaxInput {
            employment_income: self.amount("employment_income", raw.employment_income)?,
            business_income: self.amount("business_income", raw.business_income)?,
            investment_income: self.amount("investment_income", raw.investment_income)?,
            other_income: self.amount("other_income", raw.other_income)?,
            chargeable_gains: self.amount("chargeable_gains", raw.chargeable_gains)?,
            exempt_income: self.amount("exempt_income", raw.exempt_income)?,
            final_wht_income: self.amount("final_wht_income", raw.final_wht_income)?,
            losses_allowed: self.amount("losses_allowed", raw.losses_allowed)?,
            capital_allowances: self.amount("capital_allowances", raw.capital_allowances)?,
            national_housing_fund: self
                .amount("national_housing_fund", raw.national_housing_fund)?,
            national_health_insurance: self
                .amount("national_health_insurance", raw.national_health_insurance)?,
            pension_contribution: self.amount("pension_contribution", raw.pension_contribution)?,
            mortgage_interest: self.amount("mortgage_interest", raw.mortgage_interest)?,
            life_insurance_premium: self
                .amount("life_insurance_premium", raw.life_insurance_premium)?,
            house_rent: self.amount("house_rent", raw.house_rent)?,
            period,
        })
    }

    fn period(
        &self,
        period: Option<&str>,
    ) -> Result<Period, InputError> {
        match period {
            None => Ok(Period::default()),
            Some(s) => Period::parse(s).ok_or_else(|| InputError::InvalidPeriod(s.to_string())),
        }
    }

    fn amount(
        &self,
        field: &'static str,
        value: Option<Decimal>,
    ) -> Result<Decimal, InputError> {
        let amount = value.unwrap_or(Decimal::ZERO);
        if amount.abs() > MAX_AMOUNT {
            return Err(InputError::AmountTooLarge { field, amount });
        }
        if amount >= Decimal::ZERO {
            return Ok(amount);
        }

        match self.policy {
            NegativeAmountPolicy::Reject => Err(InputError::NegativeAmount { field, amount }),
            NegativeAmountPolicy::Clamp => {
                warn!(field, amount = %amount, "negative amount clamped to zero");
                Ok(Decimal::ZERO)
            }
            NegativeAmountPolicy::PassThrough => {
                warn!(field, amount = %amount, "negative amount passed through unchanged");
                Ok(amount)
            }
        }
    }
}
