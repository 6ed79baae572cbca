//! File-facing side of the calculator: band tables from CSV, calculator
//! input from TOML, and the `pit-estimate` command-line tool.

mod input;
mod loader;

pub use input::{InputFileError, InputFileLoader};
pub use loader::{BandLoaderError, BandRecord, BandScheduleLoader};
