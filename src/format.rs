//! Formatting and parsing of the amounts and dates shown in the menu.

use numfmt::{Formatter, Precision, Scales};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    Error,
    transaction::{Transaction, TransactionKind, normalise_date},
};

const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day].[month].[year] [hour]:[minute]:[second]");
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day].[month].[year]");

/// Formats amounts of money with a currency symbol, thousands separators and
/// two decimal places, e.g. "$1,234.50" or "-$12.30".
pub struct CurrencyFormat {
    symbol: String,
    positive: Formatter,
    negative: Formatter,
}

impl CurrencyFormat {
    /// Create a currency format that prefixes amounts with `symbol`.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidArgument] if `symbol`
    /// cannot be used as a prefix, e.g. because it is too long.
    pub fn new(symbol: &str) -> Result<Self, Error> {
        let build = |prefix: &str| {
            Formatter::currency(prefix)
                .map(|formatter| {
                    formatter
                        .precision(Precision::Decimals(2))
                        .scales(Scales::none())
                })
                .map_err(|error| {
                    Error::InvalidArgument(format!(
                        "invalid currency symbol \"{symbol}\": {error:?}"
                    ))
                })
        };

        Ok(Self {
            symbol: symbol.to_owned(),
            positive: build(symbol)?,
            negative: build(&format!("-{symbol}"))?,
        })
    }

    /// Format `amount` with the currency symbol.
    pub fn format(&self, amount: f64) -> String {
        let (prefix_length, formatted) = if amount < 0.0 {
            (self.symbol.len() + 1, self.negative.fmt_string(amount.abs()))
        } else if amount > 0.0 {
            (self.symbol.len(), self.positive.fmt_string(amount))
        } else {
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            return format!("{}0.00", self.symbol);
        };

        pad_decimals(formatted, prefix_length)
    }
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3" and "12.00"
/// as "12", so they are added back here.
fn pad_decimals(mut formatted: String, prefix_length: usize) -> String {
    let digits = formatted.get(prefix_length..).unwrap_or_default();
    let (length, point) = (digits.len(), digits.rfind('.'));

    let decimals = match point {
        Some(point) => length - point - 1,
        None => {
            formatted.push('.');
            0
        }
    };

    for _ in decimals..2 {
        formatted.push('0');
    }

    formatted
}

/// Format `date_time` as "DD.MM.YYYY HH:MM:SS" in the timezone `offset`.
///
/// Dates that cannot be shown in `offset`, e.g. because they would fall past
/// the year 9999, are shown in UTC instead.
pub fn format_date_time(date_time: OffsetDateTime, offset: UtcOffset) -> String {
    let local = date_time.checked_to_offset(offset).unwrap_or(date_time);

    local
        .format(DATE_TIME_FORMAT)
        .unwrap_or_else(|_| local.to_string())
}

/// Parse a date and time written as "DD.MM.YYYY HH:MM:SS" in the timezone
/// `offset`.
///
/// # Errors
/// This function will return an [Error::InvalidArgument] if `text` does not
/// match the format, or if the date falls outside the years 0000 to 9999 in
/// UTC.
pub fn parse_date_time(text: &str, offset: UtcOffset) -> Result<OffsetDateTime, Error> {
    let date_time = PrimitiveDateTime::parse(text.trim(), DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidArgument(format!("invalid date \"{text}\": {error}")))?;

    normalise_date(date_time.assume_offset(offset))
}

/// Parse a date written as "DD.MM.YYYY".
///
/// # Errors
/// This function will return an [Error::InvalidArgument] if `text` does not
/// match the format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|error| Error::InvalidArgument(format!("invalid date \"{text}\": {error}")))
}

/// Format a transaction as a single numbered line, e.g.
/// "1. [01.05.2025 09:00:00] +$1,000.00 (Salary)".
///
/// `position` is zero based, the printed number starts at one.
pub fn format_transaction_line(
    position: usize,
    transaction: &Transaction,
    currency: &CurrencyFormat,
    offset: UtcOffset,
) -> String {
    let sign = match transaction.kind() {
        TransactionKind::Income => "+",
        TransactionKind::Expense | TransactionKind::Undefined => "-",
    };

    let mut line = format!(
        "{}. [{}] {sign}{}",
        position + 1,
        format_date_time(transaction.date(), offset),
        currency.format(transaction.amount())
    );

    if let Some(description) = transaction.description().filter(|text| !text.is_empty()) {
        line.push_str(&format!(" ({description})"));
    }

    line
}

/// Capitalise the first character of `string`, e.g. for showing error
/// messages as sentences.
///
/// From https://crates.io/crates/capitalize
pub fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
