use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// Outcome of a single liability computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityResult {
    pub period: Period,

    /// Gross income less exempt income, withheld income, losses and capital
    /// allowances. Never negative.
    pub total_income: Decimal,

    /// Capped rent relief included in `eligible_deductions`.
    pub rent_relief: Decimal,

    pub eligible_deductions: Decimal,

    /// `total_income` less `eligible_deductions`, floored at zero.
    pub chargeable_income: Decimal,

    /// Annual-equivalent tax liability.
    pub tax_due: Decimal,
}

/// Side-by-side view of the tax with and without deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub period: Period,

    /// Annual-equivalent tax if no deductions or reliefs were claimed.
    pub gross_tax_liability: Decimal,

    pub total_income: Decimal,

    /// Deductions for the period as entered; not annualised.
    pub total_deductions: Decimal,

    /// Annual-equivalent tax after deductions.
    pub estimated_tax_due: Decimal,
}

impl ForecastResult {
    /// Tax avoided by claiming the deductions.
    pub fn relief_savings(&self) -> Decimal {
        self.gross_tax_liability - self.estimated_tax_due
    }
}
