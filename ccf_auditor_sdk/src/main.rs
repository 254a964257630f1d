//! # CCF Auditor CLI
//!

use ccf_auditor_sdk::cli::{self, Cli};
use ccf_core::{log_info, logging};
use clap::Parser;
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let preferences = cli.preferences()?;

    logging::init_global_logging_with_preferences(preferences.logging.clone())?;
    log_info!("CCF auditor starting", "version" => env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    cli::run(&cli, &preferences, stdin.lock(), &mut stdout)
}
