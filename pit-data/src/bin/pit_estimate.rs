use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pit_core::calculations::{ForecastReporter, LiabilityCalculator, RawTaxInput, TaxInputNormalizer};
use pit_core::{CalculatorConfig, ForecastResult, LiabilityResult};
use pit_data::{BandScheduleLoader, InputFileLoader};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Estimate personal income tax under a progressive band schedule.
///
/// Input amounts come from a TOML file, `--set` flags, or both; flags win.
/// Absent amounts are zero. Tax figures are always reported as annual
/// equivalents.
#[derive(Parser, Debug)]
#[command(name = "pit-estimate")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file of input amounts (e.g. employment_income = 15000000)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Set one input amount, e.g. `--set house_rent=3000000`. Repeatable.
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, Decimal)>,

    /// Period the amounts cover: annual or monthly
    #[arg(short, long)]
    period: Option<String>,

    /// TOML calculator configuration (bands, rent relief, negative policy)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV band table overriding the configured bands
    #[arg(short, long)]
    bands: Option<PathBuf>,

    /// Also report the tax that would be due without any deductions
    #[arg(short, long, default_value_t = false)]
    forecast: bool,
}

fn parse_assignment(s: &str) -> Result<(String, Decimal), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let value = value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{}': {e}", value.trim()))?;
    Ok((name.trim().to_string(), value))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`.
/// * Writes to stderr so stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── loading ─────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<CalculatorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = read_to_string(path)?;
            CalculatorConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration: {}", path.display()))?
        }
        None => CalculatorConfig::default(),
    };

    if let Some(path) = &args.bands {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let bands = BandScheduleLoader::parse(file)
            .with_context(|| format!("Failed to load bands: {}", path.display()))?;
        info!(bands = bands.bands().len(), "using band table from {}", path.display());
        config = config.with_bands(bands);
    }

    Ok(config)
}

fn load_input(args: &Args) -> Result<RawTaxInput> {
    let mut raw = match &args.input {
        Some(path) => {
            let text = read_to_string(path)?;
            InputFileLoader::parse(&text)
                .with_context(|| format!("Failed to parse input: {}", path.display()))?
        }
        None => RawTaxInput::default(),
    };

    for (name, value) in &args.set {
        raw.set(name, *value)
            .with_context(|| format!("Invalid --set {name}={value}"))?;
    }
    if let Some(period) = &args.period {
        raw.period = Some(period.clone());
    }

    Ok(raw)
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
}

// ─── output ──────────────────────────────────────────────────────────────────

fn print_liability(result: &LiabilityResult) {
    println!("Period:               {}", result.period);
    println!("Total income:         {}", result.total_income);
    println!("Rent relief:          {}", result.rent_relief);
    println!("Eligible deductions:  {}", result.eligible_deductions);
    println!("Chargeable income:    {}", result.chargeable_income);
    println!("Tax due (annual):     {}", result.tax_due);
}

fn print_forecast(forecast: &ForecastResult) {
    println!();
    println!("Gross tax (no reliefs): {}", forecast.gross_tax_liability);
    println!("Total deductions:       {}", forecast.total_deductions);
    println!("Estimated tax due:      {}", forecast.estimated_tax_due);
    println!("Relief savings:         {}", forecast.relief_savings());
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = load_config(&args)?;
    let raw = load_input(&args)?;

    let input = TaxInputNormalizer::from_config(&config)
        .normalize(&raw)
        .context("Invalid calculator input")?;
    debug!(period = %input.period, "normalized input");

    let calculator = LiabilityCalculator::try_new(config).context("Invalid configuration")?;
    print_liability(&calculator.compute(&input));

    if args.forecast {
        let reporter = ForecastReporter::new(calculator);
        print_forecast(&reporter.forecast(&input));
    }

    Ok(())
}
