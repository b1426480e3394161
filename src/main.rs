use std::path::Path;

use clap::Parser;
use taskpad::cli::commands::Cli;
use taskpad::cli::handlers;
use taskpad::io::config_io::Settings;
use taskpad::logging::{LogTarget, init_logging};

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns the terminal, so it only logs when pointed at a file.
    let default_log = if cli.command.is_none() { "off" } else { "stderr" };
    let target = LogTarget::parse(cli.log.as_deref().unwrap_or(default_log));
    init_logging(&target)?;

    let settings = Settings::resolve(
        cli.config.as_deref().map(Path::new),
        cli.data_dir.as_deref().map(Path::new),
    )?;

    match cli.command {
        // No subcommand → launch TUI
        None => taskpad::tui::run(&settings),
        Some(command) => handlers::dispatch(command, &settings, cli.json),
    }
}
