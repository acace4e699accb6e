//! Compare command.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use tracecheck::report::{self, Radix};
use tracecheck::{
    CompareConfig, EmulatorFormat, ReferenceFormat, TraceComparison, compare_traces, load_trace,
};
use tracing::{debug, error};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal::{self, Spinner};

pub struct CompareArgs<'a> {
    pub output: &'a Path,
    pub nestest: &'a Path,
    pub all: bool,
    pub radix: Radix,
    pub strip_unofficial: bool,
    pub no_stack_page: bool,
    pub quiet: bool,
}

/// Load both traces, compare them, and print diagnostics to stdout.
pub fn cmd_compare(args: &CompareArgs<'_>) -> i32 {
    let start = Instant::now();
    let config = CompareConfig {
        stop_on_first: !args.all,
        reference: ReferenceFormat {
            strip_unofficial_marker: args.strip_unofficial,
        },
        emulator: EmulatorFormat {
            stack_page_prefix: if args.no_stack_page {
                None
            } else {
                EmulatorFormat::default().stack_page_prefix
            },
        },
    };

    let spinner = Spinner::new("Loading traces...", args.quiet);
    let nestest = match load_trace(args.nestest) {
        Ok(lines) => lines,
        Err(e) => {
            spinner.finish_and_clear();
            error!(path = %args.nestest.display(), "failed to load nestest trace");
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };
    let output = match load_trace(args.output) {
        Ok(lines) => lines,
        Err(e) => {
            spinner.finish_and_clear();
            error!(path = %args.output.display(), "failed to load output trace");
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    spinner.set_message(format!("Comparing {} lines...", nestest.len().min(output.len())));
    let result = compare_traces(&nestest, &output, &config);
    spinner.finish_and_clear();

    let comparison = match result {
        Ok(comparison) => comparison,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };
    debug!(elapsed = ?start.elapsed(), "comparison finished");

    let mut stdout = io::stdout().lock();
    if let Err(e) = report::write_report(&mut stdout, &comparison, args.radix)
        .and_then(|()| stdout.flush())
    {
        terminal::error(&format!("failed to write report: {e}"));
        return EXIT_FAILURE;
    }

    if !args.quiet {
        summarize(args, &comparison);
    }

    if comparison.is_match() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

fn summarize(args: &CompareArgs<'_>, comparison: &TraceComparison) {
    if comparison.nestest_lines != comparison.output_lines {
        terminal::warning(&format!(
            "trace lengths differ (nestest {}, output {}); compared the first {}",
            comparison.nestest_lines, comparison.output_lines, comparison.compared
        ));
    }

    match comparison.first_mismatch() {
        None => terminal::success(&format!("{} lines match", comparison.compared)),
        Some(first) => {
            terminal::error(&format!(
                "{} mismatching line(s), first at line {}",
                comparison.mismatches.len(),
                first.line
            ));
            terminal::info("traces compared:");
            terminal::path_output(args.output);
            terminal::path_output(args.nestest);
        }
    }
}
