//! End-to-end checks of the file loaders feeding the calculator.

use pit_core::calculations::{ForecastReporter, LiabilityCalculator, TaxInputNormalizer};
use pit_core::{BandSchedule, CalculatorConfig, NegativeAmountPolicy, Period};
use pit_data::{BandLoaderError, BandScheduleLoader, InputFileLoader};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const NIGERIA_2025_BANDS: &str = include_str!("../test-data/nigeria_2025_bands.csv");
const FLAT_BANDS: &str = include_str!("../test-data/flat_bands.csv");
const SALARIED_ANNUAL: &str = include_str!("../test-data/salaried_annual.toml");
const SALARIED_MONTHLY: &str = include_str!("../test-data/salaried_monthly.toml");
const CALCULATOR_CONFIG: &str = include_str!("../test-data/calculator_config.toml");

fn calculator_with_bands(csv: &str) -> LiabilityCalculator {
    let bands = BandScheduleLoader::parse(csv.as_bytes()).expect("Failed to parse bands");
    LiabilityCalculator::new(CalculatorConfig::default().with_bands(bands))
}

#[test]
fn test_bundled_band_table_matches_default_schedule() {
    let bands =
        BandScheduleLoader::parse(NIGERIA_2025_BANDS.as_bytes()).expect("Failed to parse bands");

    assert_eq!(bands, BandSchedule::nigeria_2025());
}

#[test]
fn test_annual_input_file_end_to_end() {
    let raw = InputFileLoader::parse(SALARIED_ANNUAL).expect("Failed to parse input");
    let input = TaxInputNormalizer::default()
        .normalize(&raw)
        .expect("Failed to normalize");

    let result = calculator_with_bands(NIGERIA_2025_BANDS).compute(&input);

    assert_eq!(result.period, Period::Annual);
    assert_eq!(result.total_income, dec!(15000000));
    assert_eq!(result.rent_relief, dec!(500000));
    assert_eq!(result.eligible_deductions, dec!(1500000));
    assert_eq!(result.chargeable_income, dec!(13500000));
    assert_eq!(result.tax_due, dec!(2265000));
}

#[test]
fn test_monthly_input_file_forecast() {
    let raw = InputFileLoader::parse(SALARIED_MONTHLY).expect("Failed to parse input");
    let input = TaxInputNormalizer::default()
        .normalize(&raw)
        .expect("Failed to normalize");

    let reporter = ForecastReporter::new(calculator_with_bands(NIGERIA_2025_BANDS));
    let forecast = reporter.forecast(&input);

    assert_eq!(forecast.period, Period::Monthly);
    assert_eq!(forecast.gross_tax_liability, dec!(360000));
    assert_eq!(forecast.total_deductions, dec!(41666.67));
    assert_eq!(forecast.estimated_tax_due, dec!(285000));
    assert_eq!(forecast.relief_savings(), dec!(75000));
}

#[test]
fn test_custom_band_table_changes_tax() {
    let raw = InputFileLoader::parse("employment_income = 3000000").expect("Failed to parse input");
    let input = TaxInputNormalizer::default()
        .normalize(&raw)
        .expect("Failed to normalize");

    let result = calculator_with_bands(FLAT_BANDS).compute(&input);

    assert_eq!(result.tax_due, dec!(200000));
}

#[test]
fn test_config_file_with_band_override() {
    let bands = BandScheduleLoader::parse(FLAT_BANDS.as_bytes()).expect("Failed to parse bands");
    let config = CalculatorConfig::from_toml_str(CALCULATOR_CONFIG)
        .expect("Failed to parse config")
        .with_bands(bands);

    assert_eq!(config.negative_amounts, NegativeAmountPolicy::Clamp);

    let raw = InputFileLoader::parse(
        r#"
        employment_income = 5000000
        house_rent = 4000000
        mortgage_interest = -50000
        "#,
    )
    .expect("Failed to parse input");
    let input = TaxInputNormalizer::from_config(&config)
        .normalize(&raw)
        .expect("Failed to normalize");

    let result = LiabilityCalculator::new(config).compute(&input);

    // 10% of rent is 400,000, capped at 250,000
    assert_eq!(result.rent_relief, dec!(250000));
    assert_eq!(result.chargeable_income, dec!(4750000));
    assert_eq!(result.tax_due, dec!(375000));
}

#[test]
fn test_negative_amount_in_file_is_rejected_by_default() {
    let raw = InputFileLoader::parse("employment_income = -1").expect("Failed to parse input");

    let result = TaxInputNormalizer::default().normalize(&raw);

    assert!(result.is_err());
}

#[test]
fn test_band_table_with_gap_in_unbounded_band_is_rejected() {
    let csv = "width,rate\n800000,0\n,0.15\n9000000,0.18\n";

    let err = BandScheduleLoader::parse(csv.as_bytes()).expect_err("Should fail");

    assert!(
        matches!(err, BandLoaderError::Schedule(_)),
        "expected Schedule error, got {err:?}"
    );
}

#[test]
fn test_profile_keys_in_input_file_are_ignored() {
    let with_profile = format!(
        "{}\n{}",
        r#"
        name = "Ada Obi"
        NIN = "12345678901"
        email = "ada@example.com"
        tax_id = "TIN-0042"
        "#,
        SALARIED_ANNUAL
    );

    let plain = InputFileLoader::parse(SALARIED_ANNUAL).expect("Failed to parse input");
    let raw = InputFileLoader::parse(&with_profile).expect("Failed to parse input");

    assert_eq!(raw, plain);

    let input = TaxInputNormalizer::default()
        .normalize(&raw)
        .expect("Failed to normalize");
    let forecast = ForecastReporter::default().forecast(&input);

    assert_eq!(forecast.total_deductions, dec!(1500000));
    assert_eq!(forecast.estimated_tax_due, dec!(2265000));
}
