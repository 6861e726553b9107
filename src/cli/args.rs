use crate::core::DateRange;
use crate::io::InputSource;
use crate::strategy::BatchConfig;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Import card invoice text as categorized transactions
#[derive(Parser, Debug)]
#[command(name = "findash-import")]
#[command(about = "Import card invoice text as categorized transactions", long_about = None)]
pub struct CliArgs {
    /// Invoice text files; `-` or none reads standard input
    #[arg(value_name = "INPUT", help = "Invoice text files ('-' or none for stdin)")]
    pub inputs: Vec<PathBuf>,

    /// Processing strategy to use for the inputs
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent"
    )]
    pub strategy: StrategyType,

    /// Maximum number of inputs imported concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of inputs imported concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// CSV file with category rules replacing the built-in ones
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Report written to stdout
    #[arg(long = "format", value_name = "FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Also write rejected lines as CSV to this file
    #[arg(long = "errors", value_name = "FILE")]
    pub errors: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) bounding plausible transaction dates
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Report formats written to stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One CSV row per imported record
    Csv,
    /// Transaction payloads, errors and totals as JSON
    Json,
    /// Totals per category, income, expense and balance as CSV
    Summary,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.max_concurrent_batches {
            Some(max_concurrent_batches) => BatchConfig::new(max_concurrent_batches),
            None => BatchConfig::default(),
        }
    }

    /// Inputs to import; standard input when none were given
    pub fn input_sources(&self) -> Vec<InputSource> {
        if self.inputs.is_empty() {
            return vec![InputSource::Stdin];
        }
        self.inputs
            .iter()
            .map(|path| InputSource::from_arg(path))
            .collect()
    }

    /// Plausible date window, anchored on `--today` when given
    pub fn date_range(&self) -> DateRange {
        match self.today {
            Some(today) => DateRange::up_to(today),
            None => DateRange::default(),
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
