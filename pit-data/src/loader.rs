use std::io::Read;

use pit_core::{BandSchedule, BandScheduleError, TaxBand};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a band schedule.
#[derive(Debug, Error)]
pub enum BandLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid band schedule: {0}")]
    Schedule(#[from] BandScheduleError),
}

impl From<csv::Error> for BandLoaderError {
    fn from(err: csv::Error) -> Self {
        BandLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a band table.
///
/// - `width`: how much chargeable income the band covers (empty for the
///   final, unbounded band)
/// - `rate`: the marginal rate as a decimal (e.g., 0.15 for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BandRecord {
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl From<BandRecord> for TaxBand {
    fn from(record: BandRecord) -> Self {
        TaxBand {
            width: record.width,
            rate: record.rate,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for band tables stored as CSV.
///
/// Rows are read top to bottom, lowest band first:
///
/// ```csv
/// width,rate
/// 800000,0
/// 2200000,0.15
/// ,0.25
/// ```
pub struct BandScheduleLoader;

impl BandScheduleLoader {
    /// Parse band rows from a CSV reader without validating them as a
    /// schedule.
    pub fn parse_records<R: Read>(reader: R) -> Result<Vec<BandRecord>, BandLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse a CSV band table into a validated [`BandSchedule`].
    ///
    /// # Errors
    ///
    /// * [`BandLoaderError::CsvParse`]: a row is malformed or a column is
    ///   missing.
    /// * [`BandLoaderError::Schedule`]: the rows parse but do not form a
    ///   usable schedule (no rows, a non-positive width, a rate outside
    ///   `[0, 1]`, or an unbounded band anywhere but last).
    pub fn parse<R: Read>(reader: R) -> Result<BandSchedule, BandLoaderError> {
        let records = Self::parse_records(reader)?;
        debug!(bands = records.len(), "parsed band table");

        let schedule = BandSchedule::new(records.into_iter().map(TaxBand::from).collect())?;
        Ok(schedule)
    }
}
