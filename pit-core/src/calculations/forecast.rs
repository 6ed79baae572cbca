//! "What-if" comparison of tax with and without deductions.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pit_core::calculations::ForecastReporter;
//! use pit_core::TaxInput;
//!
//! let reporter = ForecastReporter::default();
//!
//! let forecast = reporter.forecast(&TaxInput {
//!     employment_income: dec!(15000000),
//!     pension_contribution: dec!(1000000),
//!     house_rent: dec!(3000000),
//!     ..TaxInput::default()
//! });
//!
//! assert_eq!(forecast.gross_tax_liability, dec!(2580000));
//! assert_eq!(forecast.estimated_tax_due, dec!(2265000));
//! assert_eq!(forecast.relief_savings(), dec!(315000));
//! ```

use crate::calculations::LiabilityCalculator;
use crate::calculations::common::round_half_up;
use crate::config::CalculatorConfig;
use crate::models::{ForecastResult, TaxInput};

/// Reports the tax due alongside the tax that would be due if no deductions
/// were claimed. Nothing is stored; the same input always yields the same
/// report.
#[derive(Debug, Clone, Default)]
pub struct ForecastReporter {
    calculator: LiabilityCalculator,
}

impl ForecastReporter {
    pub fn new(calculator: LiabilityCalculator) -> Self {
        Self { calculator }
    }

    pub fn from_config(config: CalculatorConfig) -> Self {
        Self::new(LiabilityCalculator::new(config))
    }

    pub fn calculator(&self) -> &LiabilityCalculator {
        &self.calculator
    }

    /// Builds the comparison for `input`.
    ///
    /// Both tax figures are annual equivalents. `total_deductions` is left in
    /// the input's own period.
    pub fn forecast(
        &self,
        input: &TaxInput,
    ) -> ForecastResult {
        let breakdown = self.calculator.breakdown(input);
        let gross_tax = self.calculator.band_tax(breakdown.total_income);

        ForecastResult {
            period: input.period,
            gross_tax_liability: round_half_up(self.calculator.annualize(gross_tax, input.period)),
            total_income: round_half_up(breakdown.total_income),
            total_deductions: round_half_up(breakdown.eligible_deductions),
            estimated_tax_due: round_half_up(
                self.calculator.annualize(breakdown.period_tax, input.period),
            ),
        }
    }
}
