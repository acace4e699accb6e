//! Parse command: decode a single trace line.

use std::io;

use tracecheck::report::{self, Radix};
use tracecheck::{EmulatorFormat, LineFormat, ReferenceFormat};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, FormatArg};
use crate::terminal;

pub fn cmd_parse(format: FormatArg, line: &str) -> i32 {
    let reference = ReferenceFormat::default();
    let emulator = EmulatorFormat::default();
    let parser: &dyn LineFormat = match format {
        FormatArg::Nestest => &reference,
        FormatArg::Output => &emulator,
    };

    match parser.parse_line(line.trim()) {
        Ok(record) => {
            if let Err(e) = report::write_record(&mut io::stdout().lock(), &record, Radix::Hex) {
                terminal::error(&format!("failed to write record: {e}"));
                return EXIT_FAILURE;
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            terminal::error(&format!("{} line: {e}", parser.name()));
            EXIT_FAILURE
        }
    }
}
