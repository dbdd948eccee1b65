//! Parsing of the numbers typed into the menu.

use crate::transaction::TransactionKind;

/// Parse a non-zero signed amount, where a negative number is an expense.
///
/// Returns the kind and the magnitude of the amount, or `None` if `text` is
/// not a finite, non-zero number.
pub(super) fn parse_signed_amount(text: &str) -> Option<(TransactionKind, f64)> {
    let amount: f64 = text.trim().parse().ok()?;

    if !amount.is_finite() || amount == 0.0 {
        return None;
    }

    let kind = if amount < 0.0 {
        TransactionKind::Expense
    } else {
        TransactionKind::Income
    };

    Some((kind, amount.abs()))
}

/// Parse a non-negative amount to search for.
pub(super) fn parse_search_amount(text: &str) -> Option<f64> {
    let amount: f64 = text.trim().parse().ok()?;

    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Parse a one based list number, returning the zero based position if it
/// is within `count` items.
pub(super) fn parse_list_position(text: &str, count: usize) -> Option<usize> {
    let number: usize = text.trim().parse().ok()?;

    (1..=count).contains(&number).then(|| number - 1)
}
