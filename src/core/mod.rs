//! Core import logic module
//!
//! This module contains the import pipeline components, leaves first:
//! - `tokenizer` - Splits pasted text into numbered, non-blank lines
//! - `parser` - Parses one line into a record or a line error
//! - `classifier` - Ordered category rules and description canonicalization
//! - `batch_builder` - Runs the pipeline over a whole submission
//! - `summary` - Totals, category breakdown and monthly grouping
//! - `traits` - Trait abstractions for interchangeable implementations

pub mod batch_builder;
pub mod classifier;
pub mod parser;
pub mod summary;
pub mod tokenizer;
pub mod traits;

pub use batch_builder::BatchBuilder;
pub use classifier::{canonicalize, CategoryRule, CategoryRules, Classification};
pub use parser::{DateRange, RecordParser};
pub use summary::{category_breakdown, group_by_month, CategoryTotal, Summary};
pub use tokenizer::{tokenize, RawLine};
pub use traits::Classifier;
