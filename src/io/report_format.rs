//! Report serialization for import batches
//!
//! Every writer takes the batches of one run, in input order, and writes a
//! complete report:
//! - records CSV: `source,line,date,title,amount,category,type,duplicate_of`
//! - errors CSV: `source,line,reason,raw`
//! - JSON: per-source transaction payloads, errors and duplicates plus totals
//! - summary CSV: expense total per category, then income, expense and balance
//!
//! Writers do no reads and hold no state; output order follows the input.

use crate::core::summary::{category_breakdown, Summary};
use crate::types::{
    Duplicate, ImportError, ImportedRecord, ParseError, SourceBatch, TransactionPayload,
};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

fn all_records(batches: &[SourceBatch]) -> impl Iterator<Item = &ImportedRecord> {
    batches.iter().flat_map(|sb| sb.batch.records())
}

/// Write imported records as CSV
///
/// Amounts use a dot decimal separator with two places and dates are ISO
/// (`YYYY-MM-DD`). `duplicate_of` holds the line of the first equal record, or
/// is empty.
///
/// # Arguments
///
/// * `batches` - Batches of the run, in input order
/// * `output` - Writer receiving the CSV
pub fn write_records_csv(
    batches: &[SourceBatch],
    output: &mut dyn Write,
) -> Result<(), ImportError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "source",
            "line",
            "date",
            "title",
            "amount",
            "category",
            "type",
            "duplicate_of",
        ])
        .map_err(|e| ImportError::output(format!("Failed to write CSV header: {}", e)))?;

    for source_batch in batches {
        let batch = &source_batch.batch;
        for record in batch.records() {
            let duplicate_of = batch
                .duplicate_of(record.line_number())
                .map(|line| line.to_string())
                .unwrap_or_default();

            writer
                .write_record(&[
                    source_batch.source.clone(),
                    record.line_number().to_string(),
                    record.record.date.format("%Y-%m-%d").to_string(),
                    record.record.description.clone(),
                    format!("{:.2}", record.amount()),
                    record.category.clone(),
                    record.tx_type().to_string(),
                    duplicate_of,
                ])
                .map_err(|e| ImportError::output(format!("Failed to write record: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| ImportError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write rejected lines as CSV
///
/// `raw` is the trimmed line exactly as it was submitted.
pub fn write_errors_csv(batches: &[SourceBatch], output: &mut dyn Write) -> Result<(), ImportError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["source", "line", "reason", "raw"])
        .map_err(|e| ImportError::output(format!("Failed to write CSV header: {}", e)))?;

    for source_batch in batches {
        for error in source_batch.batch.errors() {
            let line = error.line_number.to_string();
            writer
                .write_record([
                    source_batch.source.as_str(),
                    line.as_str(),
                    error.kind.as_str(),
                    error.raw_text.as_str(),
                ])
                .map_err(|e| ImportError::output(format!("Failed to write error: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| ImportError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sources: Vec<JsonSource<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSource<'a> {
    source: &'a str,
    lines: usize,
    imported: usize,
    transactions: Vec<TransactionPayload>,
    errors: &'a [ParseError],
    duplicates: &'a [Duplicate],
}

#[derive(Serialize)]
struct JsonSummary {
    #[serde(with = "rust_decimal::serde::float")]
    total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
    by_category: Vec<JsonCategoryTotal>,
}

#[derive(Serialize)]
struct JsonCategoryTotal {
    category: String,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
}

/// Write the run as pretty-printed JSON
///
/// Each source lists the creation payloads for the transaction API; the
/// summary covers all sources together.
pub fn write_json_report(
    batches: &[SourceBatch],
    output: &mut dyn Write,
) -> Result<(), ImportError> {
    let sources = batches
        .iter()
        .map(|sb| JsonSource {
            source: &sb.source,
            lines: sb.batch.line_count(),
            imported: sb.batch.imported_count(),
            transactions: sb.batch.records().iter().map(|r| r.to_payload()).collect(),
            errors: sb.batch.errors(),
            duplicates: sb.batch.duplicates(),
        })
        .collect();

    let totals = Summary::from_records(all_records(batches));
    let by_category = category_breakdown(all_records(batches))
        .into_iter()
        .map(|ct| JsonCategoryTotal {
            category: ct.category,
            total: ct.total,
        })
        .collect();

    let report = JsonReport {
        sources,
        summary: JsonSummary {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            balance: totals.balance,
            by_category,
        },
    };

    serde_json::to_writer_pretty(&mut *output, &report)
        .map_err(|e| ImportError::output(format!("Failed to write JSON report: {}", e)))?;
    writeln!(output).map_err(|e| ImportError::output(format!("Failed to write output: {}", e)))?;
    output
        .flush()
        .map_err(|e| ImportError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write totals as CSV
///
/// One `category,total` row per expense category in order of first
/// appearance, followed by `income`, `expense` and `balance` rows.
pub fn write_summary_csv(
    batches: &[SourceBatch],
    output: &mut dyn Write,
) -> Result<(), ImportError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["category", "total"])
        .map_err(|e| ImportError::output(format!("Failed to write CSV header: {}", e)))?;

    let totals = Summary::from_records(all_records(batches));
    let breakdown = category_breakdown(all_records(batches));

    let rows = breakdown
        .iter()
        .map(|ct| (ct.category.as_str(), ct.total))
        .chain([
            ("income", totals.total_income),
            ("expense", totals.total_expense),
            ("balance", totals.balance),
        ]);

    for (label, total) in rows {
        let total = format!("{:.2}", total);
        writer
            .write_record([label, total.as_str()])
            .map_err(|e| ImportError::output(format!("Failed to write summary row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| ImportError::output(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BatchBuilder, CategoryRules, DateRange, RecordParser};
    use chrono::NaiveDate;

    const INVOICE: &str = "\
25/09/2025 - IFOOD*RESTAURANTE BOM PRATO - R$ 55,40
24/09/2025 - UBER TRIP - R$ 12,00
linha sem formato
24/09/2025 - UBER TRIP - R$ 12,00
20/09/2025 - ESTORNO LOJA X - R$ 30,00
";

    fn batches() -> Vec<SourceBatch> {
        let reference = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let builder = BatchBuilder::new(
            RecordParser::new(DateRange::up_to(reference)),
            CategoryRules::builtin(),
        );
        vec![SourceBatch {
            source: "fatura.txt".to_string(),
            batch: builder.build(INVOICE),
        }]
    }

    fn render(write: fn(&[SourceBatch], &mut dyn Write) -> Result<(), ImportError>) -> String {
        let mut output = Vec::new();
        write(&batches(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_records_csv() {
        let expected = "\
source,line,date,title,amount,category,type,duplicate_of
fatura.txt,1,2025-09-25,IFOOD*RESTAURANTE BOM PRATO,55.40,Alimentação,EXPENSE,
fatura.txt,2,2025-09-24,UBER TRIP,12.00,Transporte,EXPENSE,
fatura.txt,4,2025-09-24,UBER TRIP,12.00,Transporte,EXPENSE,2
fatura.txt,5,2025-09-20,ESTORNO LOJA X,30.00,Estorno,INCOME,
";
        assert_eq!(render(write_records_csv), expected);
    }

    #[test]
    fn test_write_errors_csv() {
        let expected = "\
source,line,reason,raw
fatura.txt,3,MalformedFormat,linha sem formato
";
        assert_eq!(render(write_errors_csv), expected);
    }

    #[test]
    fn test_write_summary_csv() {
        let expected = "\
category,total
Alimentação,55.40
Transporte,24.00
income,30.00
expense,79.40
balance,-49.40
";
        assert_eq!(render(write_summary_csv), expected);
    }

    #[test]
    fn test_write_json_report() {
        let report: serde_json::Value = serde_json::from_str(&render(write_json_report)).unwrap();

        let source = &report["sources"][0];
        assert_eq!(source["source"], "fatura.txt");
        assert_eq!(source["lines"], 5);
        assert_eq!(source["imported"], 4);

        let first = &source["transactions"][0];
        assert_eq!(first["title"], "IFOOD*RESTAURANTE BOM PRATO");
        assert_eq!(first["amount"], 55.4);
        assert_eq!(first["category"], "Alimentação");
        assert_eq!(first["type"], "EXPENSE");
        assert_eq!(first["date"], "2025-09-25T00:00:00.000Z");

        assert_eq!(source["errors"][0]["line_number"], 3);
        assert_eq!(source["errors"][0]["reason"], "MalformedFormat");
        assert_eq!(source["duplicates"][0]["line_number"], 4);
        assert_eq!(source["duplicates"][0]["first_line_number"], 2);

        assert_eq!(report["summary"]["total_income"], 30.0);
        assert_eq!(report["summary"]["balance"], -49.4);
        assert_eq!(report["summary"]["by_category"][1]["category"], "Transporte");
    }

    #[test]
    fn test_empty_run_writes_headers_only() {
        let mut output = Vec::new();
        write_records_csv(&[], &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "source,line,date,title,amount,category,type,duplicate_of\n"
        );
    }
}
