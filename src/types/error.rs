//! Error types for the invoice importer
//!
//! Two kinds of failure exist and they are kept apart on purpose:
//!
//! - **Line errors** ([`ParseError`]): one invoice line could not be turned into
//!   a record. These are data. They are collected in the import batch and never
//!   stop the rest of the text from being processed.
//! - **Fatal errors** ([`ImportError`]): the import as a whole cannot proceed
//!   (input file missing, rule file invalid, nothing to import, output failure).

use crate::types::record::LineNumber;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single invoice line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// The line does not have the `DATE - DESCRIPTION - R$ AMOUNT` shape
    MalformedFormat,

    /// The date is not `DD/MM/YYYY`, is not a real calendar date, or is out of range
    InvalidDate,

    /// Missing `R$` marker, non-numeric value, or a value that is not positive
    InvalidAmount,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::MalformedFormat => "MalformedFormat",
            ParseErrorKind::InvalidDate => "InvalidDate",
            ParseErrorKind::InvalidAmount => "InvalidAmount",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected invoice line
///
/// Carries everything the caller needs to show the user which line failed and
/// why, so only the failing lines have to be corrected and resubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Original line number in the pasted text
    pub line_number: LineNumber,

    /// The trimmed line as it was submitted
    pub raw_text: String,

    /// Reason for rejection
    #[serde(rename = "reason")]
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line_number: LineNumber, raw_text: &str, kind: ParseErrorKind) -> Self {
        ParseError {
            line_number,
            raw_text: raw_text.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line_number, self.kind, self.raw_text)
    }
}

/// Fatal error for an import run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// The submitted text has no non-blank lines
    ///
    /// Reported instead of an empty success so the caller can tell the user
    /// there was nothing to import.
    #[error("Nothing to import in {input}")]
    NothingToImport {
        /// Label of the input (file path or `<stdin>`)
        input: String,
    },

    /// The category rule file could not be read as CSV
    #[error("Rule file error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    RuleFile {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// A category rule is not usable (bad regex, unknown match kind or type)
    #[error("Invalid rule '{pattern}': {message}")]
    InvalidRule {
        /// Pattern of the offending rule
        pattern: String,
        /// Description of the problem
        message: String,
    },

    /// The async runtime could not be created or a task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },

    /// A report could not be written
    #[error("Output error: {message}")]
    Output {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        ImportError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        ImportError::RuleFile {
            line,
            message: error.to_string(),
        }
    }
}

impl ImportError {
    /// Create a NothingToImport error
    pub fn nothing_to_import(input: &str) -> Self {
        ImportError::NothingToImport {
            input: input.to_string(),
        }
    }

    /// Create an InvalidRule error
    pub fn invalid_rule(pattern: &str, message: impl fmt::Display) -> Self {
        ImportError::InvalidRule {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ImportError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an Output error
    pub fn output(message: impl fmt::Display) -> Self {
        ImportError::Output {
            message: message.to_string(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl fmt::Display) -> Self {
        ImportError::Runtime {
            message: message.to_string(),
        }
    }
}
