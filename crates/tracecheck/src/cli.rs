//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracecheck::report::Radix;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "tracecheck")]
#[command(about = "Validate a 6502 emulator trace against a nestest reference log")]
#[command(version)]
pub struct Cli {
    /// Show metrics summary after execution
    #[arg(long, global = true)]
    pub metrics: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare an emulator trace with the nestest reference line by line
    Compare {
        /// Emulator trace (plain text or .zst)
        #[arg(long, default_value = "output.log")]
        output: PathBuf,

        /// nestest reference trace (plain text or .zst)
        #[arg(long, default_value = "nestest.log")]
        nestest: PathBuf,

        /// Report every mismatching line instead of stopping at the first
        #[arg(long)]
        all: bool,

        /// How register values are printed in diagnostics
        #[arg(long, value_enum, default_value = "dec")]
        radix: RadixArg,

        /// Drop the `*` nestest puts in front of unofficial opcodes
        #[arg(long)]
        strip_unofficial: bool,

        /// Do not strip the `01` page from four-digit emulator stack pointers
        #[arg(long)]
        no_stack_page: bool,
    },
    /// Parse a single trace line and print the decoded record
    Parse {
        /// Layout of the line
        #[arg(long, value_enum)]
        format: FormatArg,

        /// The trace line
        #[arg(value_name = "LINE")]
        line: String,
    },
}

/// Diagnostic radix.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum RadixArg {
    #[default]
    Dec,
    Hex,
}

impl From<RadixArg> for Radix {
    fn from(arg: RadixArg) -> Self {
        match arg {
            RadixArg::Dec => Self::Decimal,
            RadixArg::Hex => Self::Hex,
        }
    }
}

/// Trace line layout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// nestest reference log
    Nestest,
    /// Emulator trace
    Output,
}
