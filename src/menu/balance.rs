use std::io::{BufRead, Write};

use crate::{
    Error,
    menu::{CHOOSE_ACTION, Menu, View},
    stores::TransactionStore,
    summary,
};

impl<S, R, W> Menu<'_, S, R, W>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
{
    pub(super) fn balance(&mut self) -> Result<View, Error> {
        writeln!(self.output, "{CHOOSE_ACTION}")?;
        writeln!(self.output, "1. Balance")?;
        writeln!(self.output, "2. Total income")?;
        writeln!(self.output, "3. Total expenses")?;
        writeln!(self.output, "<. Back")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(View::Quit);
        };

        let transactions = self.store.list();
        let (label, amount) = match choice.trim() {
            "1" => ("Your balance", summary::balance(transactions)),
            "2" => ("Total income", summary::income_total(transactions)),
            "3" => ("Total expenses", summary::expense_total(transactions)),
            "<" => return Ok(View::Home),
            _ => return Ok(View::Balance),
        };

        writeln!(self.output, "\n{label}: {}", self.currency.format(amount))?;

        Ok(View::Balance)
    }
}
