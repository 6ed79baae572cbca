use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// Fully-populated calculator input.
///
/// Every monetary field is expressed in the same [`Period`] as `period`.
/// Build one through [`TaxInputNormalizer`](crate::calculations::TaxInputNormalizer)
/// when starting from a loosely-typed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    // Income
    pub employment_income: Decimal,
    pub business_income: Decimal,
    pub investment_income: Decimal,
    pub other_income: Decimal,
    pub chargeable_gains: Decimal,

    // Subtracted from gross income
    pub exempt_income: Decimal,
    pub final_wht_income: Decimal,
    pub losses_allowed: Decimal,
    pub capital_allowances: Decimal,

    // Eligible deductions
    pub national_housing_fund: Decimal,
    pub national_health_insurance: Decimal,
    pub pension_contribution: Decimal,
    pub mortgage_interest: Decimal,
    pub life_insurance_premium: Decimal,

    /// Rent paid in the period. Only a capped share of it is deductible.
    pub house_rent: Decimal,

    pub period: Period,
}
