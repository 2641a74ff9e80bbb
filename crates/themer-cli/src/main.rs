//! Themer CLI - local theme switching
//!
//! A theme is a folder under `themes/` with an `init.sh` and a
//! `deinit.sh` script. Themer remembers which theme is loaded and runs
//! the right scripts when switching.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a theme from the skeleton, then edit its scripts
//! themer new-theme nord
//!
//! # Switch to it
//! themer load-theme nord
//! themer display-theme
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;

use clap::Parser;

mod commands;

use commands::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose {
        "warn,themer=debug,themer_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
