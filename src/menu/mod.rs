//! The interactive terminal menu.
//!
//! The menu is a loop over [View]s. Each view reads a choice from the input,
//! writes to the output and returns the view to show next.

mod add;
mod balance;
mod input;
mod search;
#[cfg(test)]
mod test_utils;
mod transactions;

use std::io::{BufRead, Write};

use time::UtcOffset;

use crate::{
    Config, Error,
    format::{CurrencyFormat, capitalise_first_char},
    stores::TransactionStore,
    transaction::TransactionId,
};

const CHOOSE_ACTION: &str = "\n[Choose an action]";
const INVALID_INPUT: &str = "Invalid input";

/// The screens of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The main menu.
    Home,
    /// Balance, total income and total expenses.
    Balance,
    /// All transactions, newest first.
    Transactions,
    /// A single transaction and the actions for editing it.
    Details(TransactionId),
    /// Prompt for a new transaction date.
    EditDate(TransactionId),
    /// Prompt for a new transaction amount.
    EditAmount(TransactionId),
    /// Prompt for a new transaction description.
    EditDescription(TransactionId),
    /// Prompts for creating a new transaction.
    Add,
    /// The search options.
    Search,
    /// Search by income or expense.
    SearchByKind,
    /// Leave the menu.
    Quit,
}

/// Drives a [TransactionStore] from a line based input and a text output.
pub struct Menu<'a, S, R, W> {
    store: &'a mut S,
    input: R,
    output: W,
    currency: CurrencyFormat,
    offset: UtcOffset,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    /// Create a menu for `store` that reads choices from `input` and writes
    /// to `output`, showing dates and amounts as set in `config`.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidArgument] if the currency
    /// symbol in `config` cannot be used.
    pub fn new(store: &'a mut S, input: R, output: W, config: &Config) -> Result<Self, Error> {
        Ok(Self {
            store,
            input,
            output,
            currency: CurrencyFormat::new(&config.currency_symbol)?,
            offset: config.local_offset,
        })
    }

    /// Show views until the user quits or the input ends.
    ///
    /// Errors from the store are shown to the user, who is then taken back
    /// to the main menu.
    ///
    /// # Errors
    /// This function will return an [Error::Io] if reading the input or
    /// writing the output fails.
    pub fn run(&mut self) -> Result<(), Error> {
        let mut view = View::Home;

        loop {
            tracing::debug!("Showing view {view:?}");

            view = match self.show(view) {
                Ok(View::Quit) => break,
                Ok(next) => next,
                Err(Error::Io(error)) => return Err(Error::Io(error)),
                Err(error) => {
                    tracing::warn!("Returning to the main menu after an error: {error}");
                    self.report(&error)?;
                    View::Home
                }
            };
        }

        tracing::info!("Leaving the menu");
        Ok(())
    }

    fn show(&mut self, view: View) -> Result<View, Error> {
        match view {
            View::Home => self.home(),
            View::Balance => self.balance(),
            View::Transactions => self.transactions(),
            View::Details(id) => self.details(id),
            View::EditDate(id) => self.edit_date(id),
            View::EditAmount(id) => self.edit_amount(id),
            View::EditDescription(id) => self.edit_description(id),
            View::Add => self.add(),
            View::Search => self.search(),
            View::SearchByKind => self.search_by_kind(),
            View::Quit => Ok(View::Quit),
        }
    }

    fn home(&mut self) -> Result<View, Error> {
        writeln!(self.output, "{CHOOSE_ACTION}")?;
        writeln!(self.output, "1. View balance")?;
        writeln!(self.output, "2. Add a transaction")?;
        writeln!(self.output, "3. View transactions")?;
        writeln!(self.output, "4. Search")?;
        writeln!(self.output, "q. Quit")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        Ok(match choice.trim() {
            "1" => View::Balance,
            "2" => View::Add,
            "3" => View::Transactions,
            "4" => View::Search,
            "q" => View::Quit,
            _ => View::Home,
        })
    }

    /// Write `text` and read one line, without the line ending.
    ///
    /// Returns `None` once the input has ended.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn report(&mut self, error: &Error) -> Result<(), Error> {
        writeln!(self.output, "\n{}", capitalise_first_char(&error.to_string()))?;
        Ok(())
    }
}
