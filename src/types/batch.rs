//! Import batch: the complete result of one pasted-text submission

use super::error::ParseError;
use super::record::{ImportedRecord, LineNumber};
use serde::Serialize;

/// A record equal to an earlier record of the same batch
///
/// Two records are equal when date, description and amount all match.
/// Duplicates are still imported; they are only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// Line of the repeated record
    pub line_number: LineNumber,

    /// Line where the same record first appeared
    pub first_line_number: LineNumber,
}

/// Result of processing one submission
///
/// Records, errors and duplicates are kept in input order. A batch is immutable once
/// built; it belongs to the caller that requested the import.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportBatch {
    records: Vec<ImportedRecord>,
    errors: Vec<ParseError>,
    duplicates: Vec<Duplicate>,
    line_count: usize,
}

impl ImportBatch {
    pub(crate) fn new(
        records: Vec<ImportedRecord>,
        errors: Vec<ParseError>,
        duplicates: Vec<Duplicate>,
    ) -> Self {
        let line_count = records.len() + errors.len();
        ImportBatch {
            records,
            errors,
            duplicates,
            line_count,
        }
    }

    /// Successfully parsed and classified records
    pub fn records(&self) -> &[ImportedRecord] {
        &self.records
    }

    /// Lines that could not be imported
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Records that repeat an earlier record
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Number of non-blank lines that were processed
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn imported_count(&self) -> usize {
        self.records.len()
    }

    /// True when the submission contained no non-blank lines at all
    pub fn nothing_to_import(&self) -> bool {
        self.line_count == 0
    }

    /// First line of the record that `line_number` duplicates, if any
    ///
    /// Duplicates are sorted by line number, so this is a binary search.
    pub fn duplicate_of(&self, line_number: LineNumber) -> Option<LineNumber> {
        self.duplicates
            .binary_search_by_key(&line_number, |d| d.line_number)
            .ok()
            .map(|i| self.duplicates[i].first_line_number)
    }
}

/// Import batch labelled with the input it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBatch {
    /// File path as given, or `<stdin>`
    pub source: String,
    pub batch: ImportBatch,
}
