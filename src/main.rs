//! findash-import CLI
//!
//! Command-line interface for importing pasted card-invoice text as
//! categorized transactions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- fatura.txt > transactions.csv
//! pbpaste | cargo run -- --format json > payloads.json
//! cargo run -- --strategy sync --rules regras.csv --errors erros.csv fatura.txt
//! cargo run -- --strategy async --max-concurrent 4 setembro.txt outubro.txt
//! cargo run -- --format summary --today 2025-10-01 fatura.txt
//! ```
//!
//! Every input is tokenized, parsed and classified; rejected lines never stop
//! the import and can be written to a separate CSV with `--errors`. Logs go to
//! stderr (`RUST_LOG`, or `-v` / `-vv`).
//!
//! # Exit Codes
//!
//! - 0: Success, including runs with rejected lines
//! - 1: Error (file not found, bad rule file, nothing to import, etc.)

use findash_import::cli::{self, CliArgs, OutputFormat};
use findash_import::core::{BatchBuilder, CategoryRules, RecordParser};
use findash_import::io::{
    load_rules, write_errors_csv, write_json_report, write_records_csv, write_summary_csv,
};
use findash_import::strategy;
use findash_import::types::ImportError;
use std::fs::File;
use std::io::Write;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() {
    let args = cli::parse_args();
    setup_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flags
fn setup_logging(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn run(args: &CliArgs) -> Result<(), ImportError> {
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => CategoryRules::builtin(),
    };
    tracing::info!("Classifying with {} rules", rules.len());

    let builder = Arc::new(BatchBuilder::new(
        RecordParser::new(args.date_range()),
        rules,
    ));

    let config = if matches!(args.strategy, cli::StrategyType::Async) {
        Some(args.to_batch_config())
    } else {
        None
    };
    let strategy = strategy::create_strategy(args.strategy, builder, config);

    let batches = strategy.process(&args.input_sources())?;

    let mut output = std::io::stdout().lock();
    match args.format {
        OutputFormat::Csv => write_records_csv(&batches, &mut output)?,
        OutputFormat::Json => write_json_report(&batches, &mut output)?,
        OutputFormat::Summary => write_summary_csv(&batches, &mut output)?,
    }

    if let Some(path) = &args.errors {
        let mut file = File::create(path).map_err(|e| {
            ImportError::output(format!("Failed to create '{}': {}", path.display(), e))
        })?;
        write_errors_csv(&batches, &mut file)?;
        file.flush()
            .map_err(|e| ImportError::output(format!("Failed to flush '{}': {}", path.display(), e)))?;
    }

    Ok(())
}
