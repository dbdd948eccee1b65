//! Views for listing, inspecting and editing transactions.

use std::{
    cmp::Reverse,
    io::{BufRead, Write},
};

use time::OffsetDateTime;

use crate::{
    Error,
    format::{format_date_time, format_transaction_line, parse_date_time},
    menu::{
        CHOOSE_ACTION, INVALID_INPUT, Menu, View,
        input::{parse_list_position, parse_signed_amount},
    },
    stores::TransactionStore,
    transaction::{Transaction, TransactionId, TransactionOverrides},
};

impl<S, R, W> Menu<'_, S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    pub(super) fn transactions(&mut self) -> Result<View, Error> {
        let mut transactions = self.store.list().to_vec();
        transactions.sort_by_key(|transaction| Reverse(transaction.date()));

        writeln!(self.output, "\n[Transactions]")?;
        for (position, transaction) in transactions.iter().enumerate() {
            let line = format_transaction_line(position, transaction, &self.currency, self.offset);
            writeln!(self.output, "{line}")?;
        }

        writeln!(self.output, "{CHOOSE_ACTION}")?;
        match transactions.len() {
            0 => {}
            1 => writeln!(self.output, "1. View transaction details")?,
            count => writeln!(
                self.output,
                "1-{count}. View transaction details [enter the number]"
            )?,
        }
        writeln!(self.output, "+. Add a transaction")?;
        writeln!(self.output, "<. Back")?;
        writeln!(self.output, "q. Quit")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        let next = match choice.trim() {
            "+" => View::Add,
            "<" => View::Home,
            "q" => View::Quit,
            number if number.chars().all(|c| c.is_ascii_digit()) && !number.is_empty() => {
                match parse_list_position(number, transactions.len()) {
                    Some(position) => View::Details(transactions[position].id()),
                    None => {
                        writeln!(self.output, "{INVALID_INPUT}")?;
                        View::Transactions
                    }
                }
            }
            _ => View::Transactions,
        };

        Ok(next)
    }

    pub(super) fn details(&mut self, id: TransactionId) -> Result<View, Error> {
        let transaction = self.store.get(id)?.clone();

        writeln!(self.output, "\n[Transaction #{id}]")?;
        writeln!(
            self.output,
            "Date: {}",
            format_date_time(transaction.date(), self.offset)
        )?;
        writeln!(self.output, "Type: {}", transaction.kind())?;
        writeln!(
            self.output,
            "Amount: {}",
            self.currency.format(transaction.amount())
        )?;
        writeln!(
            self.output,
            "Description: {}",
            transaction.description().unwrap_or_default()
        )?;

        writeln!(self.output, "{CHOOSE_ACTION}")?;
        writeln!(self.output, "1. Change the date")?;
        writeln!(self.output, "2. Change the amount")?;
        writeln!(self.output, "3. Change the description")?;
        writeln!(self.output, "4. Delete")?;
        writeln!(self.output, "<. Back")?;
        writeln!(self.output, "q. Quit")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        let next = match choice.trim() {
            "1" => View::EditDate(id),
            "2" => View::EditAmount(id),
            "3" => View::EditDescription(id),
            "4" => {
                self.store.remove(id)?;
                self.store.save()?;
                tracing::info!("Deleted transaction {id}");
                View::Transactions
            }
            "<" => View::Transactions,
            "q" => View::Quit,
            _ => View::Details(id),
        };

        Ok(next)
    }

    pub(super) fn edit_date(&mut self, id: TransactionId) -> Result<View, Error> {
        let transaction = self.store.get(id)?.clone();

        writeln!(self.output, "\n[Transaction #{id}]")?;
        let Some(text) =
            self.prompt("Enter a date (DD.MM.YYYY HH:MM:SS) or leave empty for now: ")?
        else {
            return Ok(View::Quit);
        };

        let date = if text.trim().is_empty() {
            OffsetDateTime::now_utc()
        } else {
            match parse_date_time(&text, self.offset) {
                Ok(date) => date,
                Err(error) => {
                    tracing::debug!("Rejected date input: {error}");
                    writeln!(self.output, "{INVALID_INPUT}")?;
                    return Ok(View::EditDate(id));
                }
            }
        };

        self.update(&transaction, TransactionOverrides::default().date(date))?;

        Ok(View::Details(id))
    }

    pub(super) fn edit_amount(&mut self, id: TransactionId) -> Result<View, Error> {
        let transaction = self.store.get(id)?.clone();

        writeln!(self.output, "\n[Transaction #{id}]")?;
        let Some(text) = self.prompt("Enter an amount (negative for expenses): ")? else {
            return Ok(View::Quit);
        };

        let Some((kind, amount)) = parse_signed_amount(&text) else {
            writeln!(self.output, "{INVALID_INPUT}")?;
            return Ok(View::EditAmount(id));
        };

        self.update(
            &transaction,
            TransactionOverrides::default().kind(kind).amount(amount),
        )?;

        Ok(View::Details(id))
    }

    pub(super) fn edit_description(&mut self, id: TransactionId) -> Result<View, Error> {
        let transaction = self.store.get(id)?.clone();

        writeln!(self.output, "\n[Transaction #{id}]")?;
        let Some(text) = self.prompt("Enter a description: ")? else {
            return Ok(View::Quit);
        };

        let description = Some(text).filter(|text| !text.trim().is_empty());
        self.update(
            &transaction,
            TransactionOverrides::default().description(description),
        )?;

        Ok(View::Details(id))
    }

    fn update(
        &mut self,
        transaction: &Transaction,
        overrides: TransactionOverrides,
    ) -> Result<(), Error> {
        let edited = transaction.with_overrides(overrides)?;

        self.store.replace(transaction.id(), edited)?;
        self.store.save()?;
        tracing::info!("Updated transaction {}", transaction.id());

        Ok(())
    }
}
