//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Parsed and imported records, transaction type, API payload
//! - `batch`: The import batch returned to the caller
//! - `error`: Line errors and fatal import errors

pub mod batch;
pub mod error;
pub mod record;

pub use batch::{Duplicate, ImportBatch, SourceBatch};
pub use error::{ImportError, ParseError, ParseErrorKind};
pub use record::{
    format_brl, ImportedRecord, LineNumber, ParsedRecord, TransactionPayload, TransactionType,
    DEFAULT_CATEGORY,
};
