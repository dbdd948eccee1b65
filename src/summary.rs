//! Totals and simple searches over a list of transactions.
//!
//! Search functions return each match together with its position in the
//! input, so that callers can refer back to the original list.

use time::{Date, UtcOffset};

use crate::transaction::{Transaction, TransactionKind};

/// The sum of all income amounts.
pub fn income_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind() == TransactionKind::Income)
        .map(|transaction| transaction.amount().abs())
        .sum()
}

/// The sum of all expense amounts as a negative number.
pub fn expense_total(transactions: &[Transaction]) -> f64 {
    -transactions
        .iter()
        .filter(|transaction| transaction.kind() == TransactionKind::Expense)
        .map(|transaction| transaction.amount().abs())
        .sum::<f64>()
}

/// Total income minus total expenses.
pub fn balance(transactions: &[Transaction]) -> f64 {
    income_total(transactions) + expense_total(transactions)
}

/// Transactions of the given `kind`.
pub fn by_kind(transactions: &[Transaction], kind: TransactionKind) -> Vec<(usize, &Transaction)> {
    transactions
        .iter()
        .enumerate()
        .filter(|(_, transaction)| transaction.kind() == kind)
        .collect()
}

/// Transactions that happened on `date`, where the calendar day is taken in
/// the timezone `offset`.
pub fn by_date(
    transactions: &[Transaction],
    date: Date,
    offset: UtcOffset,
) -> Vec<(usize, &Transaction)> {
    transactions
        .iter()
        .enumerate()
        .filter(|(_, transaction)| transaction.date().to_offset(offset).date() == date)
        .collect()
}

/// Transactions whose amount is exactly `amount`.
pub fn by_amount(transactions: &[Transaction], amount: f64) -> Vec<(usize, &Transaction)> {
    transactions
        .iter()
        .enumerate()
        .filter(|(_, transaction)| transaction.amount() == amount)
        .collect()
}
