//! tracecheck CLI - emulator trace validation against nestest

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let metrics_handle = if cli.metrics {
        tracecheck::metrics::CliRecorder::default().install()
    } else {
        None
    };
    tracecheck::metrics::init();

    let default_level = if cli.verbose {
        "tracecheck=debug"
    } else if cli.silent {
        "tracecheck=error"
    } else {
        "tracecheck=info"
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = default_level.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let exit_code = commands::run_command(&cli);

    if let Some(handle) = metrics_handle {
        handle.print_summary();
    }

    std::process::exit(exit_code);
}
