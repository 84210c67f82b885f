//! Entry point for the `stack-maint` CLI.
//!
//! Parses arguments, dispatches to the command handler, and maps errors to
//! exit codes.

use stack_maint::cli::Cli;
use stack_maint::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    let prefix = cli.command.error_prefix();
    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            if !err.already_reported() {
                eprintln!("{} {}", prefix, err);
            }
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
