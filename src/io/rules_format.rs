//! CSV format for category rule files
//!
//! A rule file lists rules in evaluation order, one per row:
//!
//! ```text
//! pattern,category,match,type
//! uber eats,Alimentação,,
//! uber,Transporte,contains,
//! ^posto\s,Transporte,regex,
//! estorno,Estorno,,INCOME
//! ```
//!
//! `match` defaults to `contains`; `type` is optional and overrides the
//! transaction type of matching records. Lines starting with `#` are comments.

use crate::core::classifier::{CategoryRule, CategoryRules};
use crate::types::{ImportError, TransactionType};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of a rule file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RuleRow {
    pub pattern: String,
    pub category: String,
    #[serde(default, rename = "match")]
    pub match_kind: Option<String>,
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,
}

/// Convert a RuleRow into a CategoryRule
///
/// Validates the match kind, the optional type override and, for regex rules,
/// the pattern itself.
pub fn convert_rule_row(row: RuleRow) -> Result<CategoryRule, ImportError> {
    if row.pattern.is_empty() {
        return Err(ImportError::invalid_rule("", "pattern is empty"));
    }
    if row.category.is_empty() {
        return Err(ImportError::invalid_rule(&row.pattern, "category is empty"));
    }

    let match_kind = row.match_kind.as_deref().unwrap_or("").to_lowercase();
    let rule = match match_kind.as_str() {
        "" | "contains" => CategoryRule::contains(&row.pattern, &row.category),
        "regex" => CategoryRule::regex(&row.pattern, &row.category)?,
        other => {
            return Err(ImportError::invalid_rule(
                &row.pattern,
                format!("unknown match kind '{}'", other),
            ))
        }
    };

    let tx_type = row.tx_type.as_deref().unwrap_or("").to_uppercase();
    match tx_type.as_str() {
        "" => Ok(rule),
        "INCOME" => Ok(rule.with_type(TransactionType::Income)),
        "EXPENSE" => Ok(rule.with_type(TransactionType::Expense)),
        other => Err(ImportError::invalid_rule(
            &row.pattern,
            format!("unknown transaction type '{}'", other),
        )),
    }
}

/// Read rules from any CSV reader, keeping their order
pub fn read_rules<R: Read>(reader: R) -> Result<CategoryRules, ImportError> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rules = Vec::new();
    for row in csv_reader.deserialize::<RuleRow>() {
        rules.push(convert_rule_row(row?)?);
    }

    Ok(CategoryRules::new(rules))
}

/// Load a rule file from disk
pub fn load_rules(path: &Path) -> Result<CategoryRules, ImportError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImportError::file_not_found(&path.display().to_string()),
        _ => ImportError::Io {
            message: format!("Failed to open rule file '{}': {}", path.display(), e),
        },
    })?;

    let rules = read_rules(file)?;
    tracing::debug!("Loaded {} category rules from {}", rules.len(), path.display());
    Ok(rules)
}
