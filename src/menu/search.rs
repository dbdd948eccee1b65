use std::io::{BufRead, Write};

use crate::{
    Error,
    format::{format_transaction_line, parse_date},
    menu::{CHOOSE_ACTION, INVALID_INPUT, Menu, View, input::parse_search_amount},
    stores::TransactionStore,
    summary,
    transaction::{Transaction, TransactionKind},
};

impl<S, R, W> Menu<'_, S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    pub(super) fn search(&mut self) -> Result<View, Error> {
        writeln!(self.output, "{CHOOSE_ACTION}")?;
        writeln!(self.output, "1. Search by type")?;
        writeln!(self.output, "2. Search by date")?;
        writeln!(self.output, "3. Search by amount")?;
        writeln!(self.output, "<. Back")?;
        writeln!(self.output, "q. Quit")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        let lines = match choice.trim() {
            "1" => return Ok(View::SearchByKind),
            "2" => {
                let Some(text) = self.prompt("Enter a date (DD.MM.YYYY): ")? else {
                    return Ok(View::Quit);
                };
                let Ok(date) = parse_date(&text) else {
                    writeln!(self.output, "{INVALID_INPUT}")?;
                    return Ok(View::Search);
                };

                self.result_lines(summary::by_date(self.store.list(), date, self.offset))
            }
            "3" => {
                let Some(text) = self.prompt("Enter an amount: ")? else {
                    return Ok(View::Quit);
                };
                let Some(amount) = parse_search_amount(&text) else {
                    writeln!(self.output, "{INVALID_INPUT}")?;
                    return Ok(View::Search);
                };

                self.result_lines(summary::by_amount(self.store.list(), amount))
            }
            "<" => return Ok(View::Home),
            "q" => return Ok(View::Quit),
            _ => return Ok(View::Search),
        };

        self.show_results(&lines)
    }

    pub(super) fn search_by_kind(&mut self) -> Result<View, Error> {
        writeln!(self.output, "1. All income")?;
        writeln!(self.output, "2. All expenses")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        let kind = match choice.trim() {
            "1" => TransactionKind::Income,
            "2" => TransactionKind::Expense,
            _ => return Ok(View::Search),
        };

        let lines = self.result_lines(summary::by_kind(self.store.list(), kind));

        self.show_results(&lines)
    }

    fn result_lines(&self, results: Vec<(usize, &Transaction)>) -> Vec<String> {
        results
            .into_iter()
            .map(|(position, transaction)| {
                format_transaction_line(position, transaction, &self.currency, self.offset)
            })
            .collect()
    }

    fn show_results(&mut self, lines: &[String]) -> Result<View, Error> {
        writeln!(self.output, "\n[Search results]")?;

        if lines.is_empty() {
            writeln!(self.output, "No transactions found.")?;
        }

        for line in lines {
            writeln!(self.output, "{line}")?;
        }

        writeln!(self.output, "\n[Press Enter to continue]")?;
        match self.prompt("> ")? {
            Some(_) => Ok(View::Search),
            None => Ok(View::Quit),
        }
    }
}
