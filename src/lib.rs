//! findash-import Library
//! # Overview
//!
//! This library turns text pasted from a credit-card invoice into categorized
//! transactions, with a sync and an async strategy for importing several
//! inputs at once.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ParsedRecord, ImportBatch, errors, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Import pipeline components:
//!   - [`core::tokenizer`] - Numbered, non-blank lines of the pasted text
//!   - [`core::parser`] - `DD/MM/YYYY - DESCRIPTION - R$ AMOUNT` line parsing
//!   - [`core::classifier`] - Ordered category rules, first match wins
//!   - [`core::batch_builder`] - Partial-success import of a whole submission
//!   - [`core::summary`] - Totals, category breakdown, monthly grouping
//! - [`io`] - Input sources, rule files and report formats
//! - [`strategy`] - Sequential and concurrent processing of several inputs
//!
//! # Line Format
//!
//! ```text
//! 25/09/2025 - IFOOD*RESTAURANTE BOM PRATO - R$ 55,40
//! 24/09/2025 - UBER TRIP - R$ 12,00
//! ```
//!
//! Lines that do not match are reported with their line number and reason
//! (`MalformedFormat`, `InvalidDate`, `InvalidAmount`) while the rest of the
//! text is still imported.
//!
//! # Example
//!
//! ```
//! use findash_import::BatchBuilder;
//!
//! let batch = BatchBuilder::with_builtin_rules()
//!     .import("<paste>", "24/09/2025 - UBER TRIP - R$ 12,00\nnot an invoice line")
//!     .unwrap();
//!
//! assert_eq!(batch.imported_count(), 1);
//! assert_eq!(batch.records()[0].category, "Transporte");
//! assert_eq!(batch.errors()[0].line_number, 2);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{BatchBuilder, CategoryRule, CategoryRules, Classifier, DateRange, RecordParser};
pub use io::{load_rules, InputSource};
pub use types::{
    ImportBatch, ImportError, ImportedRecord, ParseError, ParseErrorKind, ParsedRecord,
    TransactionPayload, TransactionType,
};
