//! Application settings resolved from the command line.

use std::path::PathBuf;

use time::UtcOffset;

use crate::{Error, format::CurrencyFormat, timezone::get_local_offset};

/// The settings shared by the store, the menu and logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the JSON transaction file.
    pub db_path: PathBuf,
    /// File path the log is appended to.
    pub log_path: PathBuf,
    /// The canonical timezone name dates are shown in, e.g. "Pacific/Auckland".
    pub timezone: String,
    /// The current UTC offset of [Config::timezone].
    pub local_offset: UtcOffset,
    /// The symbol amounts are prefixed with, e.g. "$".
    pub currency_symbol: String,
}

impl Config {
    /// Resolve the settings.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidTimezone] if `timezone` is not a canonical timezone name,
    /// - or [Error::InvalidArgument] if `currency_symbol` cannot be used to
    ///   format amounts.
    pub fn new(
        db_path: PathBuf,
        log_path: PathBuf,
        timezone: &str,
        currency_symbol: &str,
    ) -> Result<Self, Error> {
        let local_offset = get_local_offset(timezone)
            .ok_or_else(|| Error::InvalidTimezone(timezone.to_owned()))?;

        CurrencyFormat::new(currency_symbol)?;

        Ok(Self {
            db_path,
            log_path,
            timezone: timezone.to_owned(),
            local_offset,
            currency_symbol: currency_symbol.to_owned(),
        })
    }
}
