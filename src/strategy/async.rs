//! Asynchronous processing strategy
//!
//! Imports several inputs concurrently on a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (max_concurrent_batches)
//!     ├── InputSource::read_to_string_async (tokio fs / stdin)
//!     └── Arc<BatchBuilder> (shared read-only by every task)
//! ```
//!
//! # Ordering
//!
//! One task is spawned per input and at most `max_concurrent_batches` run at
//! once. Results are buffered in input order, so the output is identical to
//! the sync strategy's for the same inputs.

use crate::core::BatchBuilder;
use crate::io::InputSource;
use crate::strategy::{collect_batches, ProcessingStrategy};
use crate::types::{ImportError, SourceBatch};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Configuration for concurrent processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Maximum number of inputs imported concurrently, also the worker thread count
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; zero falls back to the default
    pub fn new(max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            max_concurrent_batches,
        }
    }
}

/// Asynchronous processing strategy
///
/// AsyncProcessingStrategy is Send + Sync; the batch builder it shares with
/// its tasks is immutable.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    builder: Arc<BatchBuilder>,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `builder` - Batch builder shared by every input
    /// * `config` - BatchConfig with max_concurrent_batches
    pub fn new(builder: Arc<BatchBuilder>, config: BatchConfig) -> Self {
        Self { builder, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Import every input concurrently
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Spawns one task per input that reads it and builds its batch
    /// 3. Collects task results in input order
    ///
    /// A panicked or cancelled task is reported as `ImportError::Runtime`.
    fn process(&self, inputs: &[InputSource]) -> Result<Vec<SourceBatch>, ImportError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .enable_all()
            .build()
            .map_err(|e| ImportError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        let joined = runtime.block_on(async {
            stream::iter(inputs.iter().cloned())
                .map(|input| {
                    let builder = Arc::clone(&self.builder);
                    tokio::spawn(async move {
                        let label = input.label();
                        let outcome = match input.read_to_string_async().await {
                            Ok(text) => builder.import(&label, &text),
                            Err(e) => Err(e),
                        };
                        (label, outcome)
                    })
                })
                .buffered(self.config.max_concurrent_batches)
                .collect::<Vec<_>>()
                .await
        });

        let mut outcomes = Vec::with_capacity(joined.len());
        for result in joined {
            let outcome =
                result.map_err(|e| ImportError::runtime(format!("Import task failed: {}", e)))?;
            outcomes.push(outcome);
        }

        collect_batches(outcomes)
    }
}
