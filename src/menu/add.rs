use std::io::{BufRead, Write};

use time::OffsetDateTime;

use crate::{
    Error,
    format::{format_date_time, parse_date_time},
    menu::{INVALID_INPUT, Menu, View, input::parse_signed_amount},
    stores::TransactionStore,
    transaction::Transaction,
};

impl<S, R, W> Menu<'_, S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    /// Ask for the details of a new transaction and add it after the user
    /// confirms them.
    pub(super) fn add(&mut self) -> Result<View, Error> {
        writeln!(self.output, "\n[Add a transaction]")?;

        let (kind, amount) = loop {
            let Some(text) = self.prompt("Enter an amount (negative for expenses): ")? else {
                return Ok(View::Quit);
            };

            match parse_signed_amount(&text) {
                Some(parsed) => break parsed,
                None => writeln!(self.output, "{INVALID_INPUT}")?,
            }
        };

        let date = loop {
            let Some(text) =
                self.prompt("Enter a date (DD.MM.YYYY HH:MM:SS) or leave empty for now: ")?
            else {
                return Ok(View::Quit);
            };

            if text.trim().is_empty() {
                break OffsetDateTime::now_utc();
            }

            match parse_date_time(&text, self.offset) {
                Ok(date) => break date,
                Err(_) => writeln!(self.output, "{INVALID_INPUT}")?,
            }
        };

        let Some(description) = self.prompt("Enter a description: ")? else {
            return Ok(View::Quit);
        };
        let description = Some(description).filter(|text| !text.trim().is_empty());

        writeln!(self.output, "\n[Check the details]")?;
        writeln!(self.output, "Type: {kind}")?;
        writeln!(self.output, "Amount: {}", self.currency.format(amount))?;
        writeln!(self.output, "Date: {}", format_date_time(date, self.offset))?;
        writeln!(
            self.output,
            "Description: {}",
            description.as_deref().unwrap_or_default()
        )?;

        let Some(answer) = self.prompt("Create? (y/n) ")? else {
            return Ok(View::Quit);
        };

        if answer.trim().eq_ignore_ascii_case("y") {
            let transaction = Transaction::create(kind, amount, description, Some(date))?;
            let id = transaction.id();

            self.store.add(transaction)?;
            self.store.save()?;
            tracing::info!("Added transaction {id}");
        }

        Ok(View::Transactions)
    }
}
