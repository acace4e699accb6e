//! Emulator trace layout.
//!
//! The emulator has logged several revisions of the same line. All of them
//! put the registers in a fixed `A X Y P SP` run behind an `A:` marker:
//!
//! ```text
//! JMP $C5F5 A: 00, X: 00, Y: 00, P: 24, SP: FD, PC: C000, CYC: 7
//! C000 JMP $C5F5      A: $00, X: $00, Y: $00, P: $24, SP: $01FD, AM: Absolute
//! JMP $C5F5 A:00,X:00,Y:00,P:24,SP:FD $C000 7
//! ```

use crate::lexer::{TokenCursor, parse_dec_u64, parse_hex_u8, parse_hex_u16};
use crate::{Field, Instruction, LineFormat, ParseError, Result};

/// Parser for the emulator's own trace lines.
#[derive(Debug, Clone)]
pub struct EmulatorFormat {
    /// Page digits stripped from a four-digit stack pointer (`$01FD` -> `FD`).
    /// `None` rejects four-digit stack pointers.
    pub stack_page_prefix: Option<String>,
}

impl Default for EmulatorFormat {
    fn default() -> Self {
        Self {
            stack_page_prefix: Some("01".to_string()),
        }
    }
}

impl EmulatorFormat {
    pub fn parse(&self, line: &str) -> Result<Instruction> {
        let mut cursor = TokenCursor::with_commas(line);

        let leading_address = match cursor.peek() {
            Some(token) if is_address_token(token) => {
                cursor.next_token("address")?;
                Some(parse_hex_u16(Field::Address, token)?)
            }
            _ => None,
        };

        let name = cursor.next_token("mnemonic")?.to_ascii_uppercase();

        cursor.skip_until_prefix("A:")?;
        let a = parse_hex_u8(Field::A, cursor.take_field("A:")?)?;
        let x = parse_hex_u8(Field::X, cursor.take_field("X:")?)?;
        let y = parse_hex_u8(Field::Y, cursor.take_field("Y:")?)?;
        let p = parse_hex_u8(Field::P, cursor.take_field("P:")?)?;
        let sp = parse_hex_u8(Field::Sp, self.strip_stack_page(cursor.take_field("SP:")?))?;

        let trailer = read_trailer(&mut cursor, leading_address)?;
        let address = trailer
            .address
            .ok_or(ParseError::MissingToken { expected: "address" })?;

        Ok(Instruction {
            name,
            address,
            a,
            x,
            y,
            p,
            sp,
            clock: trailer.clock,
        })
    }

    fn strip_stack_page<'a>(&self, text: &'a str) -> &'a str {
        let Some(page) = self.stack_page_prefix.as_deref() else {
            return text;
        };
        let digits = text.strip_prefix('$').unwrap_or(text);
        if digits.len() == 4 {
            digits.strip_prefix(page).unwrap_or(text)
        } else {
            text
        }
    }
}

/// A leading program counter is exactly four hex digits; mnemonics are three
/// letters (or `*` plus three), so the two never collide.
fn is_address_token(token: &str) -> bool {
    let digits = token.strip_prefix('$').unwrap_or(token);
    digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug)]
struct Trailer {
    address: Option<u16>,
    clock: Option<u64>,
}

/// Tokens after the register run: labelled `PC:`/`CYC:` pairs, other labels
/// (skipped with their value) and bare address/clock values.
fn read_trailer(cursor: &mut TokenCursor<'_>, leading_address: Option<u16>) -> Result<Trailer> {
    let mut trailer = Trailer {
        address: leading_address,
        clock: None,
    };
    let mut bare_address_taken = leading_address.is_some();

    while let Some(token) = cursor.peek() {
        match token.split_once(':') {
            Some((key, rest)) => {
                cursor.next_token("label")?;
                let value = if rest.is_empty() {
                    label_value(cursor)
                } else {
                    Some(rest)
                };
                match key {
                    "PC" => {
                        let value = value.ok_or(ParseError::MissingToken { expected: "PC value" })?;
                        trailer.address = Some(parse_hex_u16(Field::Address, value)?);
                        bare_address_taken = true;
                    }
                    "CYC" => {
                        let value = value.ok_or(ParseError::MissingToken { expected: "CYC value" })?;
                        trailer.clock = Some(parse_dec_u64(Field::Clock, value)?);
                    }
                    _ => {}
                }
            }
            None => {
                cursor.next_token("trailer")?;
                if !bare_address_taken {
                    trailer.address = Some(parse_hex_u16(Field::Address, token)?);
                    bare_address_taken = true;
                } else if trailer.clock.is_none() {
                    trailer.clock = Some(parse_dec_u64(Field::Clock, token)?);
                } else {
                    return Err(ParseError::UnexpectedToken {
                        token: token.to_string(),
                    });
                }
            }
        }
    }
    Ok(trailer)
}

/// Value of a label written split from its key (`CYC: 7`).
///
/// The accumulator addressing mode is logged as an empty `AM:`, so a label
/// at the end of the line or directly before another label has no value.
fn label_value<'a>(cursor: &mut TokenCursor<'a>) -> Option<&'a str> {
    cursor.peek().filter(|token| !token.contains(':'))?;
    cursor.next_token("label value").ok()
}

impl LineFormat for EmulatorFormat {
    fn name(&self) -> &'static str {
        "output"
    }

    fn parse_line(&self, line: &str) -> Result<Instruction> {
        self.parse(line)
    }
}
