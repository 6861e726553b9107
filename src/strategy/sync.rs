//! Synchronous processing strategy
//!
//! Reads and imports inputs one after the other on the calling thread. Each
//! input is read whole with a blocking read, then handed to the batch builder.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - reading to `InputSource::read_to_string`
//! - parsing and classification to `BatchBuilder::import`
//! - the run outcome to `collect_batches`

use crate::core::BatchBuilder;
use crate::io::InputSource;
use crate::strategy::{collect_batches, ProcessingStrategy};
use crate::types::{ImportError, SourceBatch};
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use findash_import::core::BatchBuilder;
/// use findash_import::io::InputSource;
/// use findash_import::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::sync::Arc;
///
/// let strategy = SyncProcessingStrategy::new(Arc::new(BatchBuilder::with_builtin_rules()));
/// let batches = strategy
///     .process(&[InputSource::File("fatura.txt".into())])
///     .expect("Import failed");
/// println!("{} records", batches[0].batch.imported_count());
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    builder: Arc<BatchBuilder>,
}

impl SyncProcessingStrategy {
    pub fn new(builder: Arc<BatchBuilder>) -> Self {
        Self { builder }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, inputs: &[InputSource]) -> Result<Vec<SourceBatch>, ImportError> {
        let mut outcomes = Vec::with_capacity(inputs.len());

        for input in inputs {
            let label = input.label();
            let text = input.read_to_string()?;
            let outcome = self.builder.import(&label, &text);
            outcomes.push((label, outcome));
        }

        collect_batches(outcomes)
    }
}
