//! Command implementations.

mod compare;
mod parse;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Compare {
            output,
            nestest,
            all,
            radix,
            strip_unofficial,
            no_stack_page,
        } => compare::cmd_compare(&compare::CompareArgs {
            output,
            nestest,
            all: *all,
            radix: (*radix).into(),
            strip_unofficial: *strip_unofficial,
            no_stack_page: *no_stack_page,
            quiet: cli.silent,
        }),
        Commands::Parse { format, line } => parse::cmd_parse(*format, line),
    }
}
