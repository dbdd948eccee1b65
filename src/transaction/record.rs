//! Conversion between [Transaction] and the plain record stored on disk.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    Error,
    transaction::{Transaction, TransactionId, TransactionKind},
};

/// The structural form of a [Transaction] as written to the transaction file.
///
/// Dates are RFC 3339 strings and kinds use their upper case names, e.g.
/// `"INCOME"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The hyphenated UUID of the transaction.
    pub id: String,
    /// When the transaction happened, including the UTC offset.
    pub date: String,
    /// One of `"INCOME"`, `"EXPENSE"` or `"UNDEFINED"`.
    ///
    /// Older files name this field `type`.
    #[serde(alias = "type")]
    pub kind: String,
    /// The non-negative amount of money.
    pub amount: f64,
    /// An optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<&Transaction> for TransactionRecord {
    type Error = Error;

    fn try_from(transaction: &Transaction) -> Result<Self, Self::Error> {
        let date = transaction.date().format(&Rfc3339).map_err(|error| {
            Error::MalformedRecord(format!(
                "could not format the date of transaction {}: {error}",
                transaction.id()
            ))
        })?;

        Ok(Self {
            id: transaction.id().to_string(),
            date,
            kind: transaction.kind().as_str().to_owned(),
            amount: transaction.amount(),
            description: transaction.description().map(ToOwned::to_owned),
        })
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let id: TransactionId = record.id.parse()?;
        let date = OffsetDateTime::parse(&record.date, &Rfc3339).map_err(|error| {
            Error::MalformedRecord(format!("invalid date \"{}\": {error}", record.date))
        })?;
        let kind: TransactionKind = record.kind.parse()?;

        Transaction::from_parts(id, date, kind, record.amount, record.description).map_err(
            |error| match error {
                Error::InvalidArgument(reason) => {
                    Error::MalformedRecord(format!("transaction {id}: {reason}"))
                }
                error => error,
            },
        )
    }
}
