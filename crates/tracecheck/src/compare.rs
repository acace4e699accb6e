//! Positional comparison of two parsed traces.

use std::time::Instant;

use tracing::debug;

use crate::{
    EmulatorFormat, Error, Field, Instruction, LineFormat, ReferenceFormat, Result, TraceSide,
};

/// Configuration for trace comparison behavior.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Whether to stop on the first mismatching line.
    pub stop_on_first: bool,
    /// Layout of the nestest side.
    pub reference: ReferenceFormat,
    /// Layout of the emulator side.
    pub emulator: EmulatorFormat,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            stop_on_first: true,
            reference: ReferenceFormat::default(),
            emulator: EmulatorFormat::default(),
        }
    }
}

/// A line whose records disagree.
#[derive(Debug, Clone)]
pub struct LineMismatch {
    /// 1-based line number.
    pub line: usize,
    pub nestest: Instruction,
    pub output: Instruction,
    /// Differing fields, in report order.
    pub fields: Vec<Field>,
}

/// Result of comparing two traces.
#[derive(Debug, Clone)]
pub struct TraceComparison {
    /// Number of line pairs compared.
    pub compared: usize,
    pub nestest_lines: usize,
    pub output_lines: usize,
    /// Mismatching lines in trace order; at most one when stopping on first.
    pub mismatches: Vec<LineMismatch>,
}

impl TraceComparison {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// First mismatching line, if any.
    #[must_use]
    pub fn first_mismatch(&self) -> Option<&LineMismatch> {
        self.mismatches.first()
    }
}

/// Compare traces using the layouts in `config`.
pub fn compare_traces<S: AsRef<str>>(
    nestest: &[S],
    output: &[S],
    config: &CompareConfig,
) -> Result<TraceComparison> {
    compare_with_formats(
        nestest,
        output,
        &config.reference,
        &config.emulator,
        config.stop_on_first,
    )
}

/// Compare traces line by line up to the shorter length.
///
/// Line `i` of one trace is only ever compared with line `i` of the other;
/// lines past the shorter trace are ignored. A line that fails to parse
/// aborts the comparison.
pub fn compare_with_formats<S, N, O>(
    nestest: &[S],
    output: &[S],
    nestest_format: &N,
    output_format: &O,
    stop_on_first: bool,
) -> Result<TraceComparison>
where
    S: AsRef<str>,
    N: LineFormat + ?Sized,
    O: LineFormat + ?Sized,
{
    let start = Instant::now();
    let len = nestest.len().min(output.len());
    if nestest.len() != output.len() {
        debug!(
            nestest = nestest.len(),
            output = output.len(),
            compared = len,
            "trace lengths differ"
        );
    }

    let mut mismatches = Vec::new();
    let mut compared = 0;

    for (index, (nestest_line, output_line)) in nestest.iter().zip(output).enumerate() {
        let line = index + 1;
        let output_record = parse(output_format, TraceSide::Output, line, output_line.as_ref())?;
        let nestest_record = parse(nestest_format, TraceSide::Nestest, line, nestest_line.as_ref())?;
        compared += 1;

        let fields = output_record.differing_fields(&nestest_record);
        if fields.is_empty() {
            continue;
        }

        debug!(line, fields = fields.len(), "mismatch");
        mismatches.push(LineMismatch {
            line,
            nestest: nestest_record,
            output: output_record,
            fields,
        });
        if stop_on_first {
            break;
        }
    }

    let comparison = TraceComparison {
        compared,
        nestest_lines: nestest.len(),
        output_lines: output.len(),
        mismatches,
    };
    crate::metrics::record_comparison(&comparison, start.elapsed());
    Ok(comparison)
}

fn parse<F: LineFormat + ?Sized>(
    format: &F,
    side: TraceSide,
    line: usize,
    text: &str,
) -> Result<Instruction> {
    format
        .parse_line(text.trim())
        .map_err(|source| Error::Parse {
            side,
            line,
            text: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    fn nestest_line(address: u16, p: u8, clock: u64) -> String {
        format!(
            "{address:04X}  EA        NOP                             A:00 X:00 Y:00 P:{p:02X} SP:FD PPU:  0, 21 CYC:{clock}"
        )
    }

    fn output_line(address: u16, p: u8, clock: u64) -> String {
        format!("NOP A:00,X:00,Y:00,P:{p:02X},SP:FD ${address:04X} {clock}")
    }

    fn traces(len: u16) -> (Vec<String>, Vec<String>) {
        let nestest = (0..len)
            .map(|i| nestest_line(0xC000 + i, 0x24, 7 + 2 * u64::from(i)))
            .collect();
        let output = (0..len)
            .map(|i| output_line(0xC000 + i, 0x24, 7 + 2 * u64::from(i)))
            .collect();
        (nestest, output)
    }

    #[test]
    fn test_identical_traces_match() {
        let (nestest, output) = traces(64);
        let result = compare_traces(&nestest, &output, &CompareConfig::default()).unwrap();

        assert!(result.is_match());
        assert_eq!(result.compared, 64);
        assert!(result.first_mismatch().is_none());
    }

    #[test]
    fn test_single_flag_mismatch() {
        let (nestest, mut output) = traces(64);
        output[41] = output_line(0xC000 + 41, 0x25, 7 + 2 * 41);

        let result = compare_traces(&nestest, &output, &CompareConfig::default()).unwrap();
        let mismatch = result.first_mismatch().unwrap();

        assert_eq!(result.mismatches.len(), 1);
        assert_eq!(mismatch.line, 42);
        assert_eq!(mismatch.fields, vec![Field::P]);
        assert_eq!(mismatch.output.p, 0x25);
        assert_eq!(mismatch.nestest.p, 0x24);
        assert_eq!(result.compared, 42);
    }

    #[test]
    fn test_stop_on_first_false_reports_every_line() {
        let (nestest, mut output) = traces(10);
        output[2] = output_line(0xC000 + 2, 0x25, 11);
        output[7] = output_line(0xC000 + 7, 0x24, 99);

        let config = CompareConfig {
            stop_on_first: false,
            ..Default::default()
        };
        let result = compare_traces(&nestest, &output, &config).unwrap();

        let lines: Vec<usize> = result.mismatches.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![3, 8]);
        assert_eq!(result.mismatches[1].fields, vec![Field::Clock]);
        assert_eq!(result.compared, 10);
    }

    #[test]
    fn test_shorter_trace_truncates_silently() {
        let (nestest, output) = traces(20);
        let result = compare_traces(&nestest[..20], &output[..5], &CompareConfig::default()).unwrap();

        assert!(result.is_match());
        assert_eq!(result.compared, 5);
        assert_eq!(result.nestest_lines, 20);
        assert_eq!(result.output_lines, 5);

        let empty: Vec<String> = Vec::new();
        let result = compare_traces(&empty, &output, &CompareConfig::default()).unwrap();
        assert_eq!(result.compared, 0);
        assert!(result.is_match());
    }

    #[test]
    fn test_missing_clock_is_not_compared() {
        let (nestest, _) = traces(3);
        let output: Vec<String> = (0..3u16)
            .map(|i| format!("NOP A:00,X:00,Y:00,P:24,SP:FD ${:04X}", 0xC000 + i))
            .collect();

        let result = compare_traces(&nestest, &output, &CompareConfig::default()).unwrap();
        assert!(result.is_match());
    }

    #[test]
    fn test_parse_failure_names_side_and_line() {
        let (nestest, mut output) = traces(5);
        output[3] = "NOP A:00,X:00".to_string();

        let err = compare_traces(&nestest, &output, &CompareConfig::default()).unwrap_err();
        match err {
            Error::Parse {
                side, line, source, ..
            } => {
                assert_eq!(side, TraceSide::Output);
                assert_eq!(line, 4);
                assert_eq!(source, ParseError::MissingToken { expected: "Y:" });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_failure_after_mismatch_is_not_reached() {
        let (nestest, mut output) = traces(5);
        output[1] = output_line(0xC001, 0x26, 9);
        output[3] = "garbage".to_string();

        let result = compare_traces(&nestest, &output, &CompareConfig::default()).unwrap();
        assert_eq!(result.first_mismatch().map(|m| m.line), Some(2));
    }

    #[test]
    fn test_generic_formats() {
        struct Fixed;

        impl LineFormat for Fixed {
            fn name(&self) -> &'static str {
                "fixed"
            }

            fn parse_line(&self, line: &str) -> tracecheck_format::Result<Instruction> {
                EmulatorFormat::default().parse_line(line)
            }
        }

        let (_, output) = traces(4);
        let result = compare_with_formats(&output, &output, &Fixed, &Fixed, true).unwrap();
        assert!(result.is_match());
        assert_eq!(result.compared, 4);
    }
}
