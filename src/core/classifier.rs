//! Category classifier
//!
//! Assigns a category to a transaction description using an ordered list of
//! rules. The first rule that matches wins; when nothing matches the
//! description falls into [`DEFAULT_CATEGORY`].
//!
//! # Matching
//!
//! Descriptions are canonicalized before matching: lowercased, Latin
//! diacritics removed and runs of whitespace collapsed to one space. So
//! `FARMÁCIA  SÃO JOÃO` is matched as `farmacia sao joao`.
//!
//! - `contains` rules canonicalize their pattern the same way and match on
//!   substring.
//! - `regex` rules have the diacritics of their pattern removed, are compiled
//!   case-insensitively and run against the canonical description.
//!
//! Rule order is part of the configuration. `uber eats` must come before
//! `uber` for food deliveries to land in food rather than transport.

use crate::core::traits::Classifier;
use crate::types::{ImportError, TransactionType, DEFAULT_CATEGORY};
use regex::{Regex, RegexBuilder};

/// How a rule's pattern is compared with a description
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// Canonical substring match
    Contains(String),

    /// Case-insensitive regular expression over the canonical description
    Regex(Regex),
}

impl RuleMatcher {
    fn is_match(&self, canonical_description: &str) -> bool {
        match self {
            RuleMatcher::Contains(pattern) => canonical_description.contains(pattern.as_str()),
            RuleMatcher::Regex(regex) => regex.is_match(canonical_description),
        }
    }
}

/// One pattern → category mapping
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pattern: String,
    matcher: RuleMatcher,
    category: String,
    tx_type: Option<TransactionType>,
}

impl CategoryRule {
    /// Substring rule; the pattern is canonicalized
    pub fn contains(pattern: &str, category: &str) -> Self {
        CategoryRule {
            pattern: pattern.to_string(),
            matcher: RuleMatcher::Contains(canonicalize(pattern)),
            category: category.to_string(),
            tx_type: None,
        }
    }

    /// Regex rule, compiled case-insensitively without diacritics
    pub fn regex(pattern: &str, category: &str) -> Result<Self, ImportError> {
        let regex = RegexBuilder::new(&strip_pattern_diacritics(pattern))
            .case_insensitive(true)
            .build()
            .map_err(|e| ImportError::invalid_rule(pattern, e))?;

        Ok(CategoryRule {
            pattern: pattern.to_string(),
            matcher: RuleMatcher::Regex(regex),
            category: category.to_string(),
            tx_type: None,
        })
    }

    /// Override the transaction type of matching records
    pub fn with_type(mut self, tx_type: TransactionType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tx_type(&self) -> Option<TransactionType> {
        self.tx_type
    }
}

/// Outcome of classifying one description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub category: &'a str,

    /// Type override from the matching rule, if it has one
    pub tx_type: Option<TransactionType>,
}

impl<'a> Classification<'a> {
    /// Result for descriptions no rule matched
    pub const UNMATCHED: Self = Classification {
        category: DEFAULT_CATEGORY,
        tx_type: None,
    };
}

/// Ordered, immutable set of category rules
#[derive(Debug, Clone, Default)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Rule set with no rules; everything is classified as [`DEFAULT_CATEGORY`]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in rules for common Brazilian invoice descriptions
    pub fn builtin() -> Self {
        let expense = |pattern: &str, category: &str| CategoryRule::contains(pattern, category);
        let income = |pattern: &str, category: &str| {
            CategoryRule::contains(pattern, category).with_type(TransactionType::Income)
        };

        Self::new(vec![
            income("estorno", "Estorno"),
            income("salario", "Salário"),
            income("reembolso", "Estorno"),
            expense("uber eats", "Alimentação"),
            expense("ifood", "Alimentação"),
            expense("rappi", "Alimentação"),
            expense("restaurante", "Alimentação"),
            expense("padaria", "Alimentação"),
            expense("lanchonete", "Alimentação"),
            expense("supermercado", "Mercado"),
            expense("mercado", "Mercado"),
            expense("uber", "Transporte"),
            expense("99app", "Transporte"),
            expense("posto", "Transporte"),
            expense("combustivel", "Transporte"),
            expense("estacionamento", "Transporte"),
            expense("netflix", "Assinaturas"),
            expense("spotify", "Assinaturas"),
            expense("amazon prime", "Assinaturas"),
            expense("farmacia", "Saúde"),
            expense("drogaria", "Saúde"),
            expense("aluguel", "Moradia"),
            expense("condominio", "Moradia"),
        ])
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Classifier for CategoryRules {
    fn classify(&self, description: &str) -> Classification<'_> {
        let canonical = canonicalize(description);

        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(&canonical))
            .map(|rule| Classification {
                category: &rule.category,
                tx_type: rule.tx_type,
            })
            .unwrap_or(Classification::UNMATCHED)
    }
}

/// Canonical form used for matching
///
/// Lowercase, Latin diacritics stripped, whitespace runs collapsed to a single
/// space, ends trimmed.
pub fn canonicalize(text: &str) -> String {
    let mut canonical = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = !canonical.is_empty();
            continue;
        }
        if pending_space {
            canonical.push(' ');
            pending_space = false;
        }
        canonical.push(strip_diacritic(c));
    }

    canonical
}

/// Remove diacritics from a regex pattern without touching its syntax
///
/// ASCII is left alone so escapes like `\S` and `\D` keep their meaning.
fn strip_pattern_diacritics(pattern: &str) -> String {
    pattern
        .chars()
        .flat_map(|c| {
            let lowered: Vec<char> = if c.is_ascii() {
                vec![c]
            } else {
                c.to_lowercase().collect()
            };
            lowered.into_iter().map(strip_diacritic)
        })
        .collect()
}

fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
