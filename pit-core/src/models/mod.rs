mod liability;
mod period;
mod tax_band;
mod tax_input;

pub use liability::{ForecastResult, LiabilityResult};
pub use period::Period;
pub use tax_band::{BandSchedule, BandScheduleError, TaxBand};
pub use tax_input::TaxInput;
