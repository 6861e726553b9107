//! Record parser for invoice lines
//!
//! Parses one line of the form `DD/MM/YYYY - DESCRIPTION - R$ AMOUNT` into a
//! [`ParsedRecord`]. Failures come back as [`ParseError`] values carrying the
//! line number, the raw text and the reason, so a caller can report every line
//! instead of stopping at the first bad one.
//!
//! # Field rules
//!
//! - **Structure**: the separator ` - ` must appear at least twice. The date is
//!   everything before the first separator, the amount field everything after
//!   the last one, and the description is what lies between (it may contain
//!   ` - ` itself). An empty segment is a structural error.
//! - **Date**: `DD/MM/YYYY` forming a real calendar date inside the parser's
//!   [`DateRange`].
//! - **Amount**: `R$` followed by a positive number written with `,` as the
//!   decimal separator and optional `.` thousands separators.
//!
//! Checks run in that order, so a line with both a bad date and a bad amount
//! is reported as `InvalidDate`.

use crate::core::tokenizer::RawLine;
use crate::types::{ParseError, ParseErrorKind, ParsedRecord, TransactionType};
use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Delimiter between the three fields of a line
pub const FIELD_SEPARATOR: &str = " - ";

/// Currency marker that must prefix the amount field
pub const CURRENCY_MARKER: &str = "R$";

/// How far past the reference date a transaction date may lie
pub const MAX_DAYS_AHEAD: u64 = 366;

/// Inclusive range of dates accepted as plausible transaction dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    earliest: NaiveDate,
    latest: NaiveDate,
}

impl DateRange {
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Self {
        Self { earliest, latest }
    }

    /// Range from 1970-01-01 to [`MAX_DAYS_AHEAD`] days after `reference`
    pub fn up_to(reference: NaiveDate) -> Self {
        let earliest = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
        let latest = reference
            .checked_add_days(Days::new(MAX_DAYS_AHEAD))
            .unwrap_or(NaiveDate::MAX);
        Self { earliest, latest }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }

    pub fn earliest(&self) -> NaiveDate {
        self.earliest
    }

    pub fn latest(&self) -> NaiveDate {
        self.latest
    }
}

impl Default for DateRange {
    /// Range ending [`MAX_DAYS_AHEAD`] days after today (local time)
    fn default() -> Self {
        Self::up_to(Local::now().date_naive())
    }
}

/// Parser for single invoice lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordParser {
    date_range: DateRange,
}

impl RecordParser {
    pub fn new(date_range: DateRange) -> Self {
        Self { date_range }
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Parse one tokenized line
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedRecord)` - typed as an expense, amount rescaled to 2 places
    /// * `Err(ParseError)` - with the first failing check as the reason
    pub fn parse(&self, line: &RawLine<'_>) -> Result<ParsedRecord, ParseError> {
        let fail = |kind| ParseError::new(line.line_number, line.text, kind);

        let (date_field, description, amount_field) =
            split_fields(line.text).ok_or_else(|| fail(ParseErrorKind::MalformedFormat))?;

        let date = parse_date(date_field)
            .filter(|date| self.date_range.contains(*date))
            .ok_or_else(|| fail(ParseErrorKind::InvalidDate))?;

        let amount = parse_amount(amount_field).ok_or_else(|| fail(ParseErrorKind::InvalidAmount))?;

        Ok(ParsedRecord {
            line_number: line.line_number,
            date,
            description: description.to_string(),
            amount,
            tx_type: TransactionType::Expense,
        })
    }
}

/// Split a line into its date, description and amount segments
///
/// Returns `None` when the separator appears fewer than twice or a segment is
/// empty after trimming.
fn split_fields(text: &str) -> Option<(&str, &str, &str)> {
    let (date, rest) = text.split_once(FIELD_SEPARATOR)?;
    let (description, amount) = rest.rsplit_once(FIELD_SEPARATOR)?;

    let fields = (date.trim(), description.trim(), amount.trim());
    if fields.0.is_empty() || fields.1.is_empty() || fields.2.is_empty() {
        return None;
    }
    Some(fields)
}

/// Parse a `DD/MM/YYYY` date
///
/// Day and month take one or two digits, the year exactly four.
pub fn parse_date(field: &str) -> Option<NaiveDate> {
    let mut parts = field.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if !is_digits(day, 1..=2) || !is_digits(month, 1..=2) || !is_digits(year, 4..=4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parse an `R$ 1.234,56` amount field into a positive decimal with scale 2
pub fn parse_amount(field: &str) -> Option<Decimal> {
    let value = field.strip_prefix(CURRENCY_MARKER)?.trim_start();

    let (int_part, frac_part) = match value.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (value, None),
    };

    if !is_grouped_integer(int_part) {
        return None;
    }
    if let Some(frac) = frac_part {
        if !is_digits(frac, 1..=2) {
            return None;
        }
    }

    let digits = int_part.replace('.', "");
    let normalized = match frac_part {
        Some(frac) => format!("{digits}.{frac}"),
        None => digits,
    };

    let mut amount = Decimal::from_str(&normalized).ok()?;
    amount.rescale(2);
    // rescale keeps the old scale when the mantissa has no room for cents
    (amount.scale() == 2 && amount > Decimal::ZERO).then_some(amount)
}

fn is_digits(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Plain digits, or digit groups of three separated by `.` (`1.234.567`)
fn is_grouped_integer(s: &str) -> bool {
    if !s.contains('.') {
        return is_digits(s, 1..=usize::MAX);
    }

    let mut groups = s.split('.');
    let leading_ok = groups.next().is_some_and(|g| is_digits(g, 1..=3));
    leading_ok && groups.all(|g| is_digits(g, 3..=3))
}
