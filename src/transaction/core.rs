//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// A newtype wrapper for the UUIDs that identify transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generate a new random transaction ID.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TransactionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for TransactionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|error| Error::MalformedRecord(format!("invalid ID \"{s}\": {error}")))
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Whether money was earned or spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
    /// Neither income nor expense. Only ever read from files, never created
    /// by the menu.
    Undefined,
}

impl TransactionKind {
    /// The name used for this kind in the transaction file.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
            TransactionKind::Undefined => "UNDEFINED",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            "UNDEFINED" => Ok(TransactionKind::Undefined),
            other => Err(Error::MalformedRecord(format!(
                "unknown transaction kind \"{other}\""
            ))),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Undefined => "Undefined",
        };

        f.write_str(label)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The amount is always a non-negative magnitude, the direction of the money
/// is given by [Transaction::kind].
///
/// To create a new `Transaction`, use [Transaction::create]. To edit one, use
/// [Transaction::with_overrides].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,
    date: OffsetDateTime,
    kind: TransactionKind,
    amount: f64,
    description: Option<String>,
}

impl Transaction {
    /// Create a new transaction with a freshly generated ID.
    ///
    /// If `date` is `None`, the current time is used. Dates are stored in UTC.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidArgument] if `amount` is
    /// negative, NaN or infinite.
    pub fn create(
        kind: TransactionKind,
        amount: f64,
        description: Option<String>,
        date: Option<OffsetDateTime>,
    ) -> Result<Self, Error> {
        Self::from_parts(
            TransactionId::new_v4(),
            date.unwrap_or_else(OffsetDateTime::now_utc),
            kind,
            amount,
            description,
        )
    }

    /// Assemble a transaction from existing field values, e.g. ones read from
    /// a file.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidArgument] if `amount` is
    /// negative, NaN or infinite, or if `date` falls outside the years 0000
    /// to 9999 in UTC.
    pub fn from_parts(
        id: TransactionId,
        date: OffsetDateTime,
        kind: TransactionKind,
        amount: f64,
        description: Option<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            id,
            date: normalise_date(date)?,
            kind,
            amount: validate_amount(amount)?,
            description,
        })
    }

    /// Create a copy of this transaction that keeps its ID and replaces every
    /// field set in `overrides`.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidArgument] if the
    /// overriding amount is negative, NaN or infinite.
    pub fn with_overrides(&self, overrides: TransactionOverrides) -> Result<Self, Error> {
        Self::from_parts(
            self.id,
            overrides.date.unwrap_or(self.date),
            overrides.kind.unwrap_or(self.kind),
            overrides.amount.unwrap_or(self.amount),
            overrides
                .description
                .unwrap_or_else(|| self.description.clone()),
        )
    }

    /// The ID of the transaction.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// When the transaction happened, in UTC.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    /// Whether the transaction was an income or an expense.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The fields to replace in [Transaction::with_overrides].
///
/// Fields left as `None` keep their original value. For the description,
/// `Some(None)` clears it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionOverrides {
    /// Replacement kind.
    pub kind: Option<TransactionKind>,
    /// Replacement amount.
    pub amount: Option<f64>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement date.
    pub date: Option<OffsetDateTime>,
}

impl TransactionOverrides {
    /// Set the replacement kind.
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the replacement amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the replacement description, `None` clears the description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the replacement date.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }
}

/// Convert `date` to UTC, checking that it can be written as an RFC 3339
/// date, i.e. that its UTC year is between 0000 and 9999.
///
/// # Errors
/// This function will return an [Error::InvalidArgument] if the date is out
/// of range.
pub(crate) fn normalise_date(date: OffsetDateTime) -> Result<OffsetDateTime, Error> {
    date.checked_to_offset(UtcOffset::UTC)
        .filter(|utc| (0..=9999).contains(&utc.year()))
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "date {date} must be between the years 0000 and 9999 in UTC"
            ))
        })
}

fn validate_amount(amount: f64) -> Result<f64, Error> {
    if !amount.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "amount must be a finite number, got {amount}"
        )));
    }

    if amount < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "amount must not be negative, got {amount}"
        )));
    }

    // Normalise negative zero so that it does not leak into the file.
    Ok(amount.abs())
}

// ============================================================================
// TESTS
// ============================================================================
