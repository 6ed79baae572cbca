//! Personal income tax calculations.
//!
//! Input flows through three stages: [`TaxInputNormalizer`] turns a loose
//! payload into a [`TaxInput`](crate::TaxInput), [`LiabilityCalculator`]
//! computes the liability, and [`ForecastReporter`] sets it beside the tax
//! that would be due without deductions.

pub mod common;
pub mod forecast;
pub mod liability;
pub mod normalizer;

pub use forecast::ForecastReporter;
pub use liability::LiabilityCalculator;
pub use normalizer::{InputError, MAX_AMOUNT, RawTaxInput, TaxInputNormalizer};
