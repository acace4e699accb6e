//! nestest reference log layout.
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
//! ```
//!
//! Address, one to three raw instruction bytes, mnemonic, free disassembly,
//! then `A:`/`X:`/`Y:`/`P:`/`SP:` registers and a trailing `CYC:` counter.

use crate::lexer::{TokenCursor, parse_dec_u64, parse_hex_u8, parse_hex_u16};
use crate::{Field, Instruction, LineFormat, Result};

const CLOCK_KEY: &str = "CYC:";

/// Parser for nestest log lines.
#[derive(Debug, Clone, Default)]
pub struct ReferenceFormat {
    /// Drop the `*` nestest puts in front of unofficial opcodes (`*NOP`).
    pub strip_unofficial_marker: bool,
}

impl ReferenceFormat {
    pub fn parse(&self, line: &str) -> Result<Instruction> {
        let mut cursor = TokenCursor::new(line);

        let address = parse_hex_u16(Field::Address, cursor.next_token("address")?)?;
        // Raw opcode/operand bytes; their count depends on the addressing mode.
        cursor.skip_fixed_width(2);

        let mut name = cursor.next_token("mnemonic")?.to_ascii_uppercase();
        if self.strip_unofficial_marker && name.starts_with('*') {
            name.remove(0);
        }

        cursor.skip_until_prefix("A:")?;
        let a = parse_hex_u8(Field::A, cursor.take_prefixed("A:")?)?;
        let x = parse_hex_u8(Field::X, cursor.take_prefixed("X:")?)?;
        let y = parse_hex_u8(Field::Y, cursor.take_prefixed("Y:")?)?;
        let p = parse_hex_u8(Field::P, cursor.take_prefixed("P:")?)?;
        let sp = parse_hex_u8(Field::Sp, cursor.take_prefixed("SP:")?)?;

        let clock = trailing_clock(&cursor)?;

        Ok(Instruction {
            name,
            address,
            a,
            x,
            y,
            p,
            sp,
            clock,
        })
    }
}

/// Clock from the end of the line: `CYC:123`, or `CYC: 123` split in two.
/// Anything else after SP (older logs end in `SL:241`) means no clock.
fn trailing_clock(cursor: &TokenCursor<'_>) -> Result<Option<u64>> {
    let rest = cursor.remaining();
    let Some((&last, before)) = rest.split_last() else {
        return Ok(None);
    };
    if let Some(value) = last.strip_prefix(CLOCK_KEY) {
        return parse_dec_u64(Field::Clock, value).map(Some);
    }
    if before.last() == Some(&CLOCK_KEY) {
        return parse_dec_u64(Field::Clock, last).map(Some);
    }
    Ok(None)
}

impl LineFormat for ReferenceFormat {
    fn name(&self) -> &'static str {
        "nestest"
    }

    fn parse_line(&self, line: &str) -> Result<Instruction> {
        self.parse(line)
    }
}
