//! Import batch builder
//!
//! Orchestrates tokenizer → record parser → classifier for every line of a
//! submission and collects the outcome in an [`ImportBatch`].
//!
//! # Partial success
//!
//! A rejected line never stops the rest of the text from being processed.
//! Every non-blank line ends up either as a record or as an error, so
//! `records + errors` always equals the number of non-blank lines.
//!
//! # Determinism
//!
//! The batch is a pure function of the text, the parser's date range and the
//! classifier. Building twice from the same text gives equal batches.

use crate::core::classifier::CategoryRules;
use crate::core::parser::RecordParser;
use crate::core::tokenizer::tokenize;
use crate::core::traits::Classifier;
use crate::types::{
    Duplicate, ImportBatch, ImportError, ImportedRecord, LineNumber, ParsedRecord,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Builds import batches from pasted invoice text
///
/// The classifier is fixed at construction; the builder holds no other state
/// and can be shared between threads when the classifier can.
#[derive(Debug, Clone)]
pub struct BatchBuilder<C = CategoryRules> {
    parser: RecordParser,
    classifier: C,
}

impl BatchBuilder<CategoryRules> {
    /// Builder with the default date range and the built-in rule set
    pub fn with_builtin_rules() -> Self {
        Self::new(RecordParser::default(), CategoryRules::builtin())
    }
}

impl<C: Classifier> BatchBuilder<C> {
    pub fn new(parser: RecordParser, classifier: C) -> Self {
        Self { parser, classifier }
    }

    pub fn parser(&self) -> &RecordParser {
        &self.parser
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Process every line of `text`
    ///
    /// Always returns a batch. A batch built from blank text reports
    /// [`ImportBatch::nothing_to_import`]; use [`BatchBuilder::import`] to get
    /// that as an error instead.
    pub fn build(&self, text: &str) -> ImportBatch {
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut duplicates = Vec::new();
        let mut seen: HashMap<(NaiveDate, String, Decimal), LineNumber> = HashMap::new();

        for line in tokenize(text) {
            match self.parser.parse(&line) {
                Ok(record) => {
                    let key = (record.date, record.description.clone(), record.amount);
                    if let Some(&first_line_number) = seen.get(&key) {
                        duplicates.push(Duplicate {
                            line_number: record.line_number,
                            first_line_number,
                        });
                    } else {
                        seen.insert(key, record.line_number);
                    }
                    records.push(self.categorize(record));
                }
                Err(error) => {
                    tracing::debug!("Skipping {}", error);
                    errors.push(error);
                }
            }
        }

        ImportBatch::new(records, errors, duplicates)
    }

    /// Process `text`, treating a submission without non-blank lines as an error
    ///
    /// # Arguments
    ///
    /// * `input` - Label of the submission used in the error (file path, `<stdin>`)
    /// * `text` - The pasted invoice text
    ///
    /// # Returns
    ///
    /// * `Ok(ImportBatch)` - at least one non-blank line was processed
    /// * `Err(ImportError::NothingToImport)` - the text was empty or blank
    pub fn import(&self, input: &str, text: &str) -> Result<ImportBatch, ImportError> {
        let batch = self.build(text);
        if batch.nothing_to_import() {
            return Err(ImportError::nothing_to_import(input));
        }

        tracing::info!(
            "{}: imported {} of {} lines ({} rejected, {} duplicates)",
            input,
            batch.imported_count(),
            batch.line_count(),
            batch.errors().len(),
            batch.duplicates().len()
        );
        Ok(batch)
    }

    fn categorize(&self, mut record: ParsedRecord) -> ImportedRecord {
        let classification = self.classifier.classify(&record.description);
        if let Some(tx_type) = classification.tx_type {
            record.tx_type = tx_type;
        }

        ImportedRecord {
            category: classification.category.to_string(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::CategoryRule;
    use crate::core::parser::DateRange;
    use crate::core::tokenizer::tokenize;
    use crate::types::{ParseErrorKind, TransactionType};
    use rstest::rstest;

    fn builder() -> BatchBuilder {
        let reference = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        BatchBuilder::new(
            RecordParser::new(DateRange::up_to(reference)),
            CategoryRules::builtin(),
        )
    }

    const INVOICE: &str = "25/09/2025 - IFOOD*RESTAURANTE BOM PRATO - R$ 55,40\n\
                           24/09/2025 - UBER TRIP - R$ 12,00\n\
                           \n\
                           31/02/2025 - TEST - R$ 10,00\n\
                           25/09/2025 - TEST - R$ 0,00\n\
                           linha sem formato\n\
                           23/09/2025 - ESTORNO LOJA X - R$ 30,00\n";

    #[test]
    fn test_build_mixed_invoice() {
        let batch = builder().build(INVOICE);

        let record_lines: Vec<_> = batch.records().iter().map(|r| r.line_number()).collect();
        assert_eq!(record_lines, vec![1, 2, 7]);

        let errors: Vec<_> = batch
            .errors()
            .iter()
            .map(|e| (e.line_number, e.kind))
            .collect();
        assert_eq!(
            errors,
            vec![
                (4, ParseErrorKind::InvalidDate),
                (5, ParseErrorKind::InvalidAmount),
                (6, ParseErrorKind::MalformedFormat),
            ]
        );

        let ifood = &batch.records()[0];
        assert_eq!(ifood.category, "Alimentação");
        assert_eq!(ifood.tx_type(), TransactionType::Expense);
        assert_eq!(ifood.amount(), Decimal::new(5540, 2));

        assert_eq!(batch.records()[1].category, "Transporte");

        let refund = &batch.records()[2];
        assert_eq!(refund.category, "Estorno");
        assert_eq!(refund.tx_type(), TransactionType::Income);
    }

    #[rstest]
    #[case::mixed(INVOICE)]
    #[case::all_valid("01/09/2025 - A - R$ 1,00\n02/09/2025 - B - R$ 2,00")]
    #[case::all_invalid("x\ny\n\n\nz")]
    #[case::blank_only("\n  \n\t\n")]
    #[case::crlf("01/09/2025 - A - R$ 1,00\r\n\r\nbad\r\n")]
    fn test_every_non_blank_line_is_accounted_for(#[case] text: &str) {
        let batch = builder().build(text);
        let non_blank = tokenize(text).count();

        assert_eq!(batch.records().len() + batch.errors().len(), non_blank);
        assert_eq!(batch.line_count(), non_blank);
    }

    #[test]
    fn test_blank_input_is_nothing_to_import() {
        let batch = builder().build("\n   \n\n");

        assert!(batch.records().is_empty());
        assert!(batch.errors().is_empty());
        assert!(batch.nothing_to_import());

        let result = builder().import("<stdin>", "\n   \n\n");
        assert_eq!(result, Err(ImportError::nothing_to_import("<stdin>")));
    }

    #[test]
    fn test_all_invalid_lines_is_not_nothing_to_import() {
        let result = builder().import("fatura.txt", "bad line\nanother\n");
        let batch = result.unwrap();

        assert_eq!(batch.imported_count(), 0);
        assert_eq!(batch.errors().len(), 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder();
        assert_eq!(builder.build(INVOICE), builder.build(INVOICE));
    }

    #[test]
    fn test_duplicates_are_flagged_but_kept() {
        let text = "25/09/2025 - UBER TRIP - R$ 12,00\n\
                    25/09/2025 - UBER TRIP - R$ 12,00\n\
                    25/09/2025 - UBER TRIP - R$ 13,00\n\
                    25/09/2025 - UBER TRIP - R$ 12,0\n";
        let batch = builder().build(text);

        assert_eq!(batch.imported_count(), 4);
        assert_eq!(
            batch.duplicates(),
            &[
                Duplicate { line_number: 2, first_line_number: 1 },
                Duplicate { line_number: 4, first_line_number: 1 },
            ]
        );
        assert_eq!(batch.duplicate_of(4), Some(1));
        assert_eq!(batch.duplicate_of(3), None);
    }

    #[test]
    fn test_duplicate_lookup_over_interleaved_lines() {
        let text: String = (1..=40)
            .map(|i| format!("{:02}/09/2025 - UBER TRIP - R$ 12,00\n", i % 4 + 1))
            .collect();
        let batch = builder().build(&text);

        assert_eq!(batch.duplicates().len(), 36);
        assert!(batch
            .duplicates()
            .windows(2)
            .all(|w| w[0].line_number < w[1].line_number));
        for line in 1..=40 {
            let expected = (line > 4).then_some((line - 1) % 4 + 1);
            assert_eq!(batch.duplicate_of(line), expected, "line {}", line);
        }
        assert_eq!(batch.duplicate_of(41), None);
    }

    #[test]
    fn test_uses_rules_given_at_construction() {
        let reference = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let without_uber = BatchBuilder::new(
            RecordParser::new(DateRange::up_to(reference)),
            CategoryRules::new(vec![CategoryRule::contains("ifood", "Alimentação")]),
        );

        let batch = without_uber.build("24/09/2025 - UBER TRIP - R$ 12,00");
        assert_eq!(batch.records()[0].category, "Outros");
    }
}
