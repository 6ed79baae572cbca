//! Shared arithmetic helpers for the liability pipeline.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to kobo (two decimal places), half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pit_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(41666.665)), dec!(41666.67));
/// assert_eq!(round_half_up(dec!(41666.664)), dec!(41666.66));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors `value` at zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pit_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-250)), dec!(0));
/// assert_eq!(non_negative(dec!(250)), dec!(250));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
