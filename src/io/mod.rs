//! I/O module
//!
//! Handles reading invoice text and rule files, and writing reports.
//!
//! # Components
//!
//! - `input` - Input sources (file or stdin) with blocking and async reads
//! - `rules_format` - CSV rule file loading
//! - `report_format` - Records, errors, JSON and summary report serialization

pub mod input;
pub mod report_format;
pub mod rules_format;

pub use input::InputSource;
pub use report_format::{write_errors_csv, write_json_report, write_records_csv, write_summary_csv};
pub use rules_format::{convert_rule_row, load_rules, read_rules, RuleRow};
