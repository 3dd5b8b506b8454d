//! # dupsweep CLI
//!
//! Command-line interface for the duplicate image sweeper.
//!
//! ## Usage
//! ```bash
//! dupsweep ~/Photos
//! dupsweep ~/Photos --similarity 3 --execute
//! dupsweep ~/Photos --move-duplicates
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
