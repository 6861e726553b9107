//! Processing strategy module for import runs
//!
//! This module defines the Strategy pattern for complete import pipelines:
//! reading every input, building one import batch per input and collecting the
//! batches in input order. Different implementations (sequential, concurrent)
//! can be selected at runtime and produce identical results.

use crate::cli::StrategyType;
use crate::core::BatchBuilder;
use crate::io::InputSource;
use crate::types::{ImportBatch, ImportError, SourceBatch};
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete import runs
///
/// Each strategy reads all inputs, runs them through the shared batch builder
/// and returns one [`SourceBatch`] per non-empty input, in input order.
pub trait ProcessingStrategy: Send + Sync {
    /// Import every input
    ///
    /// # Arguments
    ///
    /// * `inputs` - Files or stdin, in the order given on the command line
    ///
    /// # Returns
    ///
    /// * `Ok(batches)` - one batch per input that had at least one non-blank line
    /// * `Err(ImportError)` - an input could not be read, the runtime failed, or
    ///   every input was empty (`NothingToImport`)
    ///
    /// Rejected lines are never fatal; they are reported inside the batches.
    fn process(&self, inputs: &[InputSource]) -> Result<Vec<SourceBatch>, ImportError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `builder` - Batch builder shared by every input of the run
/// * `config` - Optional concurrency configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    builder: Arc<BatchBuilder>,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(builder)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(builder, config))
        }
    }
}

/// Turn per-input outcomes into the result of a run
///
/// Empty inputs are logged and skipped. The run fails with the first fatal
/// error, or with `NothingToImport` when no input had anything to import.
pub(crate) fn collect_batches(
    outcomes: Vec<(String, Result<ImportBatch, ImportError>)>,
) -> Result<Vec<SourceBatch>, ImportError> {
    let mut labels = Vec::with_capacity(outcomes.len());
    let mut batches = Vec::with_capacity(outcomes.len());

    for (source, outcome) in outcomes {
        match outcome {
            Ok(batch) => batches.push(SourceBatch {
                source: source.clone(),
                batch,
            }),
            Err(ImportError::NothingToImport { .. }) => {
                tracing::warn!("{}: nothing to import, skipping", source);
            }
            Err(e) => return Err(e),
        }
        labels.push(source);
    }

    if batches.is_empty() {
        let input = if labels.is_empty() {
            "<no input>".to_string()
        } else {
            labels.join(", ")
        };
        return Err(ImportError::nothing_to_import(&input));
    }

    Ok(batches)
}
