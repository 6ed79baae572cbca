use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when assembling a [`BandSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BandScheduleError {
    #[error("band schedule has no bands")]
    Empty,

    #[error("band {index} must have a positive width, got {width}")]
    NonPositiveWidth { index: usize, width: Decimal },

    #[error("band {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("band {0} is unbounded but is not the last band")]
    UnboundedBandNotLast(usize),

    #[error("the last band must be unbounded")]
    MissingUnboundedBand,
}

/// One marginal band: the next `width` of chargeable income is taxed at
/// `rate`. A band without a width absorbs whatever income remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    #[serde(default)]
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub fn bounded(
        width: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            width: Some(width),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self { width: None, rate }
    }
}

/// An ordered, validated sequence of [`TaxBand`]s.
///
/// Bands are consumed cumulatively from the first one. Every band but the
/// last has a positive width, the last one is unbounded, and all rates lie
/// in `[0, 1]`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pit_core::{BandSchedule, TaxBand};
///
/// let schedule = BandSchedule::new(vec![
///     TaxBand::bounded(dec!(1000), dec!(0)),
///     TaxBand::unbounded(dec!(0.10)),
/// ])
/// .unwrap();
///
/// assert_eq!(schedule.thresholds(), vec![dec!(1000)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBand>", into = "Vec<TaxBand>")]
pub struct BandSchedule {
    bands: Vec<TaxBand>,
}

impl BandSchedule {
    /// Validates `bands` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BandScheduleError`] if the list is empty, a width is not
    /// positive, a rate is outside `[0, 1]`, or the unbounded band is missing
    /// or not last.
    pub fn new(bands: Vec<TaxBand>) -> Result<Self, BandScheduleError> {
        if bands.is_empty() {
            return Err(BandScheduleError::Empty);
        }

        let last = bands.len() - 1;
        for (index, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(BandScheduleError::InvalidRate {
                    index,
                    rate: band.rate,
                });
            }
            match band.width {
                Some(width) if width <= Decimal::ZERO => {
                    return Err(BandScheduleError::NonPositiveWidth { index, width });
                }
                Some(_) if index == last => {
                    return Err(BandScheduleError::MissingUnboundedBand);
                }
                None if index != last => {
                    return Err(BandScheduleError::UnboundedBandNotLast(index));
                }
                _ => {}
            }
        }

        Ok(Self { bands })
    }

    /// Personal income tax bands of the Nigeria Tax Act 2025 (Fourth Schedule).
    pub fn nigeria_2025() -> Self {
        Self {
            bands: vec![
                TaxBand::bounded(Decimal::from(800_000), Decimal::ZERO),
                TaxBand::bounded(Decimal::from(2_200_000), Decimal::new(15, 2)),
                TaxBand::bounded(Decimal::from(9_000_000), Decimal::new(18, 2)),
                TaxBand::bounded(Decimal::from(13_000_000), Decimal::new(21, 2)),
                TaxBand::bounded(Decimal::from(25_000_000), Decimal::new(23, 2)),
                TaxBand::unbounded(Decimal::new(25, 2)),
            ],
        }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Cumulative income levels at which the marginal rate changes.
    pub fn thresholds(&self) -> Vec<Decimal> {
        self.bands
            .iter()
            .filter_map(|band| band.width)
            .scan(Decimal::ZERO, |total, width| {
                *total += width;
                Some(*total)
            })
            .collect()
    }

    /// Marginal rate that applies to the next unit of income above `amount`.
    pub fn marginal_rate(
        &self,
        amount: Decimal,
    ) -> Decimal {
        let mut lower = Decimal::ZERO;
        for band in &self.bands {
            match band.width {
                Some(width) if amount >= lower + width => lower += width,
                _ => return band.rate,
            }
        }
        // Unreachable for a validated schedule; the last band is unbounded.
        self.bands.last().map_or(Decimal::ZERO, |band| band.rate)
    }
}

impl Default for BandSchedule {
    fn default() -> Self {
        Self::nigeria_2025()
    }
}

impl TryFrom<Vec<TaxBand>> for BandSchedule {
    type Error = BandScheduleError;

    fn try_from(bands: Vec<TaxBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BandSchedule> for Vec<TaxBand> {
    fn from(schedule: BandSchedule) -> Self {
        schedule.bands
    }
}
