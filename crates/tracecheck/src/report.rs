//! Human-readable mismatch diagnostics.
//!
//! ```text
//! Problem in line 42
//! output p: 37, nestest p: 36
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::{Field, FieldValue, Instruction, LineMismatch, TraceComparison};

/// How numeric register values are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Radix {
    /// Plain decimal.
    #[default]
    Decimal,
    /// `$`-prefixed hexadecimal (`$C000`, `$24`). Clocks stay decimal.
    Hex,
}

struct Shown<'a>(FieldValue<'a>, Radix);

impl fmt::Display for Shown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (FieldValue::Name(name), _) => f.write_str(name),
            (FieldValue::Count(count), _) => write!(f, "{count}"),
            (FieldValue::Word(word), Radix::Decimal) => write!(f, "{word}"),
            (FieldValue::Byte(byte), Radix::Decimal) => write!(f, "{byte}"),
            (FieldValue::Word(word), Radix::Hex) => write!(f, "${word:04X}"),
            (FieldValue::Byte(byte), Radix::Hex) => write!(f, "${byte:02X}"),
        }
    }
}

/// Write the diagnostic block for one mismatching line.
pub fn write_mismatch<W: Write>(out: &mut W, mismatch: &LineMismatch, radix: Radix) -> io::Result<()> {
    writeln!(out, "Problem in line {}", mismatch.line)?;
    for &field in &mismatch.fields {
        let (Some(output), Some(nestest)) =
            (mismatch.output.value(field), mismatch.nestest.value(field))
        else {
            continue;
        };
        writeln!(
            out,
            "output {field}: {}, nestest {field}: {}",
            Shown(output, radix),
            Shown(nestest, radix)
        )?;
    }
    Ok(())
}

/// Write diagnostics for every mismatch; nothing for matching traces.
pub fn write_report<W: Write>(out: &mut W, comparison: &TraceComparison, radix: Radix) -> io::Result<()> {
    for mismatch in &comparison.mismatches {
        write_mismatch(out, mismatch, radix)?;
    }
    Ok(())
}

/// Write one decoded record as `field: value` pairs on a single line.
///
/// A missing clock is printed as `-`.
pub fn write_record<W: Write>(out: &mut W, record: &Instruction, radix: Radix) -> io::Result<()> {
    for (index, field) in Field::ALL.into_iter().enumerate() {
        if index > 0 {
            out.write_all(b", ")?;
        }
        match record.value(field) {
            Some(value) => write!(out, "{field}: {}", Shown(value, radix))?,
            None => write!(out, "{field}: -")?,
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(p: u8, clock: Option<u64>) -> Instruction {
        Instruction {
            name: "LDA".to_string(),
            address: 0xC5F5,
            a: 0x10,
            x: 0,
            y: 0,
            p,
            sp: 0xFD,
            clock,
        }
    }

    fn render(mismatch: &LineMismatch, radix: Radix) -> String {
        let mut out = Vec::new();
        write_mismatch(&mut out, mismatch, radix).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_field_decimal() {
        let mismatch = LineMismatch {
            line: 42,
            nestest: record(0x24, Some(7)),
            output: record(0x25, Some(7)),
            fields: vec![Field::P],
        };
        assert_eq!(
            render(&mismatch, Radix::Decimal),
            "Problem in line 42\noutput p: 37, nestest p: 36\n"
        );
    }

    #[test]
    fn test_fields_in_hex() {
        let mut output = record(0x24, Some(9));
        output.name = "STA".to_string();
        output.address = 0xC5F7;
        let mismatch = LineMismatch {
            line: 3,
            nestest: record(0x24, Some(7)),
            fields: output.differing_fields(&record(0x24, Some(7))),
            output,
        };
        assert_eq!(
            render(&mismatch, Radix::Hex),
            "Problem in line 3\n\
             output name: STA, nestest name: LDA\n\
             output address: $C5F7, nestest address: $C5F5\n\
             output clock: 9, nestest clock: 7\n"
        );
    }

    #[test]
    fn test_record_line() {
        let mut out = Vec::new();
        write_record(&mut out, &record(0x24, None), Radix::Hex).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name: LDA, address: $C5F5, x: $00, y: $00, a: $10, sp: $FD, p: $24, clock: -\n"
        );
    }

    #[test]
    fn test_matching_comparison_writes_nothing() {
        let comparison = TraceComparison {
            compared: 10,
            nestest_lines: 10,
            output_lines: 10,
            mismatches: Vec::new(),
        };
        let mut out = Vec::new();
        write_report(&mut out, &comparison, Radix::Decimal).unwrap();
        assert!(out.is_empty());
    }
}
