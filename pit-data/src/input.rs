use pit_core::calculations::RawTaxInput;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputFileError {
    #[error("input file parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for InputFileError {
    fn from(err: toml::de::Error) -> Self {
        InputFileError::Parse(err.to_string())
    }
}

/// Reads calculator input from a flat TOML document.
///
/// Keys are the field names accepted by [`RawTaxInput`], aliases included.
/// Amounts may be written as integers, floats or quoted strings; quote them
/// when exact cents matter.
///
/// ```
/// use pit_data::InputFileLoader;
/// use rust_decimal_macros::dec;
///
/// let raw = InputFileLoader::parse(
///     r#"
///     period = "monthly"
///     employment_income = 1250000
///     pension = "100000.50"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(raw.employment_income, Some(dec!(1250000)));
/// assert_eq!(raw.pension_contribution, Some(dec!(100000.50)));
/// assert_eq!(raw.period.as_deref(), Some("monthly"));
/// ```
pub struct InputFileLoader;

impl InputFileLoader {
    pub fn parse(s: &str) -> Result<RawTaxInput, InputFileError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_is_empty_input() {
        let raw = InputFileLoader::parse("").expect("Failed to parse input");

        assert_eq!(raw, RawTaxInput::default());
    }

    #[test]
    fn legacy_profile_names_are_accepted() {
        let raw = InputFileLoader::parse(
            r#"
            nhf = 30000
            nhis = 12000
            house_loan_interest = 250000
            life_insurance = 40000
            annual_rent = 2400000
            "#,
        )
        .expect("Failed to parse input");

        assert_eq!(raw.national_housing_fund, Some(dec!(30000)));
        assert_eq!(raw.national_health_insurance, Some(dec!(12000)));
        assert_eq!(raw.mortgage_interest, Some(dec!(250000)));
        assert_eq!(raw.life_insurance_premium, Some(dec!(40000)));
        assert_eq!(raw.house_rent, Some(dec!(2400000)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = InputFileLoader::parse("employment_income = = 5").expect_err("Should fail");

        assert!(matches!(err, InputFileError::Parse(_)));
    }

    #[test]
    fn non_numeric_amount_is_parse_error() {
        let err = InputFileLoader::parse(r#"employment_income = "lots""#).expect_err("Should fail");

        assert!(matches!(err, InputFileError::Parse(_)));
    }
}
