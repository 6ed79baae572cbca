use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reporting period the input figures are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Annual,
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a period name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "yearly" => Some(Self::Annual),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// How many of these periods make up one tax year.
    pub fn periods_per_year(&self) -> Decimal {
        match self {
            Self::Annual => Decimal::ONE,
            Self::Monthly => Decimal::from(12),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
