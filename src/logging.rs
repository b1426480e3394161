use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "TASKPAD_LOG";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(String),
}

impl LogTarget {
    /// Parse a `--log` value. Anything that isn't `off`/`stderr` is a file path.
    pub fn parse(s: &str) -> Self {
        match s {
            "" | "0" | "off" => LogTarget::Off,
            "stderr" => LogTarget::Stderr,
            path => LogTarget::File(path.to_string()),
        }
    }
}

/// Install the global subscriber for `target`.
///
/// The filter comes from `TASKPAD_LOG`, defaulting to `warn` on stderr and
/// `debug` for log files.
pub fn init_logging(target: &LogTarget) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => "warn",
        LogTarget::File(_) => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
