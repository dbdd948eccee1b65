use std::{
    error::Error,
    io,
    path::PathBuf,
    process::exit,
};

use clap::Parser;

use ledger_rs::{
    Config, JsonFileStore, Menu, format::capitalise_first_char, logging::setup_logging,
};

/// A terminal ledger for recording income and expenses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON transaction file. It is created if it does not exist.
    #[arg(long, default_value = "ledger.json")]
    db_path: PathBuf,

    /// File path the log is appended to.
    #[arg(long, default_value = "ledger.log")]
    log_path: PathBuf,

    /// The canonical timezone dates are shown and entered in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The symbol amounts are shown with.
    #[arg(long, default_value = "$")]
    currency: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match Config::new(args.db_path, args.log_path, &args.timezone, &args.currency) {
        Ok(config) => config,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    setup_logging(&config.log_path)?;
    tracing::info!(
        "Starting ledger with {:?} in timezone {}",
        config.db_path,
        config.timezone
    );

    let mut store = match JsonFileStore::open_or_create(&config.db_path) {
        Ok(store) => store,
        Err(error) => {
            print_error(format!("could not open {:?}: {error}", config.db_path));
            exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut store, stdin.lock(), stdout.lock(), &config)?.run()?;

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}
