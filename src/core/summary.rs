//! Aggregate views over imported records
//!
//! Totals for income, expenses and balance, the expense breakdown by category
//! (the data behind the dashboard's pie chart) and grouping by month.

use crate::types::{ImportedRecord, TransactionType};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Income, expense and balance totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,

    /// `total_income - total_expense`; negative when spending exceeds income
    pub balance: Decimal,
}

impl Summary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ImportedRecord>,
    {
        let mut summary = Summary::default();
        for record in records {
            match record.tx_type() {
                TransactionType::Income => summary.total_income += record.amount(),
                TransactionType::Expense => summary.total_expense += record.amount(),
            }
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Sum expenses per category
///
/// Income records are ignored. Categories are listed in the order they first
/// appear in `records`.
pub fn category_breakdown<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a ImportedRecord>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in records {
        if record.tx_type() != TransactionType::Expense {
            continue;
        }
        match totals.iter_mut().find(|t| t.category == record.category) {
            Some(entry) => entry.total += record.amount(),
            None => totals.push(CategoryTotal {
                category: record.category.clone(),
                total: record.amount(),
            }),
        }
    }

    totals
}

/// Group records by `(year, month)` in chronological order
///
/// Records keep their input order within a month.
pub fn group_by_month<'a, I>(records: I) -> BTreeMap<(i32, u32), Vec<&'a ImportedRecord>>
where
    I: IntoIterator<Item = &'a ImportedRecord>,
{
    let mut months: BTreeMap<(i32, u32), Vec<&'a ImportedRecord>> = BTreeMap::new();
    for record in records {
        let date = record.record.date;
        months
            .entry((date.year(), date.month()))
            .or_default()
            .push(record);
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParsedRecord;
    use chrono::NaiveDate;

    fn record(
        line_number: usize,
        date: (i32, u32, u32),
        cents: i64,
        category: &str,
        tx_type: TransactionType,
    ) -> ImportedRecord {
        ImportedRecord {
            record: ParsedRecord {
                line_number,
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                description: format!("LINE {line_number}"),
                amount: Decimal::new(cents, 2),
                tx_type,
            },
            category: category.to_string(),
        }
    }

    fn sample() -> Vec<ImportedRecord> {
        vec![
            record(1, (2025, 9, 25), 5540, "Alimentação", TransactionType::Expense),
            record(2, (2025, 9, 24), 1200, "Transporte", TransactionType::Expense),
            record(3, (2025, 8, 30), 2000, "Alimentação", TransactionType::Expense),
            record(4, (2025, 9, 1), 500000, "Salário", TransactionType::Income),
            record(5, (2024, 12, 31), 3000, "Estorno", TransactionType::Income),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let summary = Summary::from_records(&sample());

        assert_eq!(summary.total_income, Decimal::new(503000, 2));
        assert_eq!(summary.total_expense, Decimal::new(8740, 2));
        assert_eq!(summary.balance, Decimal::new(494260, 2));
    }

    #[test]
    fn test_summary_negative_balance() {
        let records = vec![record(1, (2025, 9, 1), 1000, "Outros", TransactionType::Expense)];
        let summary = Summary::from_records(&records);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::new(-1000, 2));
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let records: Vec<ImportedRecord> = Vec::new();
        assert_eq!(Summary::from_records(&records), Summary::default());
    }

    #[test]
    fn test_category_breakdown_expenses_only_in_first_seen_order() {
        let breakdown = category_breakdown(&sample());

        assert_eq!(
            breakdown,
            vec![
                CategoryTotal {
                    category: "Alimentação".to_string(),
                    total: Decimal::new(7540, 2),
                },
                CategoryTotal {
                    category: "Transporte".to_string(),
                    total: Decimal::new(1200, 2),
                },
            ]
        );
    }

    #[test]
    fn test_group_by_month_is_chronological() {
        let records = sample();
        let months = group_by_month(&records);

        let keys: Vec<_> = months.keys().copied().collect();
        assert_eq!(keys, vec![(2024, 12), (2025, 8), (2025, 9)]);

        let september: Vec<_> = months[&(2025, 9)].iter().map(|r| r.line_number()).collect();
        assert_eq!(september, vec![1, 2, 4]);
    }
}
