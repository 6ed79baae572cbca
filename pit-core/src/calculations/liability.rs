//! Progressive personal income tax liability.
//!
//! # Pipeline
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total income: all income less exempt income, final-WHT income, losses and capital allowances (minimum 0) |
//! | 2    | Rent relief: rent × relief rate, capped at the annual cap divided across the period |
//! | 3    | Eligible deductions: NHF + NHIS + pension + mortgage interest + life insurance + rent relief |
//! | 4    | Chargeable income: Step 1 − Step 3 (minimum 0) |
//! | 5    | Tax: chargeable income walked through the band schedule |
//! | 6    | Annualisation: Step 5 × periods per year |
//!
//! Inputs for a monthly period are monthly figures and are banded as they
//! are; only the resulting tax is multiplied up to a yearly amount.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pit_core::calculations::LiabilityCalculator;
//! use pit_core::{CalculatorConfig, TaxInput};
//!
//! let calculator = LiabilityCalculator::new(CalculatorConfig::default());
//!
//! let input = TaxInput {
//!     employment_income: dec!(15000000),
//!     pension_contribution: dec!(1000000),
//!     house_rent: dec!(3000000),
//!     ..TaxInput::default()
//! };
//!
//! let result = calculator.compute(&input);
//!
//! assert_eq!(result.rent_relief, dec!(500000));
//! assert_eq!(result.eligible_deductions, dec!(1500000));
//! assert_eq!(result.chargeable_income, dec!(13500000));
//! assert_eq!(result.tax_due, dec!(2265000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{non_negative, round_half_up};
use crate::config::{CalculatorConfig, ConfigError};
use crate::models::{LiabilityResult, Period, TaxInput};

/// Full-precision intermediate figures for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Breakdown {
    pub total_income: Decimal,
    pub rent_relief: Decimal,
    pub eligible_deductions: Decimal,
    pub chargeable_income: Decimal,
    /// Band tax for the input's own period, before annualisation.
    pub period_tax: Decimal,
}

/// Computes chargeable income and tax due from a [`TaxInput`].
///
/// Holds nothing but its configuration, so a single instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct LiabilityCalculator {
    config: CalculatorConfig,
}

impl LiabilityCalculator {
    /// Wraps `config` as given. Nothing is checked; a configuration assembled
    /// in code should go through [`Self::try_new`] instead.
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Validates `config`, then wraps it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`CalculatorConfig::validate`].
    pub fn try_new(config: CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Runs the full pipeline. Reported amounts are rounded to two decimal
    /// places; `tax_due` is the annual-equivalent liability.
    pub fn compute(
        &self,
        input: &TaxInput,
    ) -> LiabilityResult {
        let breakdown = self.breakdown(input);

        let result = LiabilityResult {
            period: input.period,
            total_income: round_half_up(breakdown.total_income),
            rent_relief: round_half_up(breakdown.rent_relief),
            eligible_deductions: round_half_up(breakdown.eligible_deductions),
            chargeable_income: round_half_up(breakdown.chargeable_income),
            tax_due: round_half_up(self.annualize(breakdown.period_tax, input.period)),
        };

        debug!(
            period = %result.period,
            total_income = %result.total_income,
            eligible_deductions = %result.eligible_deductions,
            chargeable_income = %result.chargeable_income,
            tax_due = %result.tax_due,
            "computed tax liability"
        );

        result
    }

    /// Walks `amount` through the band schedule and returns the tax, without
    /// rounding or annualisation.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pit_core::calculations::LiabilityCalculator;
    ///
    /// let calculator = LiabilityCalculator::default();
    ///
    /// // 800,000 at 0% + 200,000 at 15%
    /// assert_eq!(calculator.band_tax(dec!(1000000)), dec!(30000));
    /// ```
    pub fn band_tax(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;
        let mut remaining = amount;

        for band in self.config.bands.bands() {
            if remaining <= Decimal::ZERO {
                break;
            }
            let taxed = match band.width {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            tax = tax.saturating_add(taxed.saturating_mul(band.rate));
            remaining -= taxed;
        }

        tax
    }

    pub(crate) fn breakdown(
        &self,
        input: &TaxInput,
    ) -> Breakdown {
        let total_income = self.total_income(input);
        let rent_relief = self.rent_relief(input.house_rent, input.period);
        let eligible_deductions = self.eligible_deductions(input, rent_relief);
        let chargeable_income = self.chargeable_income(total_income, eligible_deductions);
        let period_tax = self.band_tax(chargeable_income);

        Breakdown {
            total_income,
            rent_relief,
            eligible_deductions,
            chargeable_income,
            period_tax,
        }
    }

    /// Expresses a tax computed on one period's figures as a yearly amount.
    pub(crate) fn annualize(
        &self,
        tax: Decimal,
        period: Period,
    ) -> Decimal {
        tax.saturating_mul(period.periods_per_year())
    }

    /// Step 1.
    fn total_income(
        &self,
        input: &TaxInput,
    ) -> Decimal {
        let gross = sum([
            input.employment_income,
            input.business_income,
            input.investment_income,
            input.other_income,
            input.chargeable_gains,
        ]);
        let reductions = sum([
            input.exempt_income,
            input.final_wht_income,
            input.losses_allowed,
            input.capital_allowances,
        ]);

        non_negative(gross.saturating_sub(reductions))
    }

    /// Step 2. The cap is scaled to the period; the rent itself is not.
    fn rent_relief(
        &self,
        house_rent: Decimal,
        period: Period,
    ) -> Decimal {
        let cap = self.config.rent_relief_cap / period.periods_per_year();
        house_rent
            .saturating_mul(self.config.rent_relief_rate)
            .min(cap)
    }

    /// Step 3.
    fn eligible_deductions(
        &self,
        input: &TaxInput,
        rent_relief: Decimal,
    ) -> Decimal {
        sum([
            input.national_housing_fund,
            input.national_health_insurance,
            input.pension_contribution,
            input.mortgage_interest,
            input.life_insurance_premium,
            rent_relief,
        ])
    }

    /// Step 4.
    fn chargeable_income(
        &self,
        total_income: Decimal,
        eligible_deductions: Decimal,
    ) -> Decimal {
        non_negative(total_income.saturating_sub(eligible_deductions))
    }
}

/// Adds `amounts`, pinning at the bounds of [`Decimal`] instead of
/// overflowing.
fn sum<const N: usize>(amounts: [Decimal; N]) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
}
