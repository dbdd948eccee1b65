//! Sets up logging to a file.
//!
//! Standard output belongs to the menu, so log events are only written to the
//! log file.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::Error;

/// The log level used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global subscriber that appends log events to `log_path`.
///
/// The filter is read from the `RUST_LOG` environment variable, falling back
/// to [DEFAULT_LOG_FILTER].
///
/// # Errors
/// This function will return an [Error::Io] if the log file cannot be opened
/// or a global subscriber has already been installed.
pub fn setup_logging(log_path: &Path) -> Result<(), Error> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| {
            Error::Io(format!(
                "could not open log file {}: {error}",
                log_path.display()
            ))
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_log)
        .try_init()
        .map_err(|error| Error::Io(format!("could not set up logging: {error}")))
}
