//! Line formats for 6502 execution traces.
//!
//! Two textual layouts are understood: the nestest reference log and the
//! emulator's own trace. Both decode into the same [`Instruction`] record so
//! traces from either side can be compared field by field.

mod emulator;
mod lexer;
mod record;
mod reference;


pub use emulator::EmulatorFormat;
pub use lexer::{TokenCursor, parse_dec_u64, parse_hex_u8, parse_hex_u16};
pub use record::{Field, FieldValue, Instruction};
pub use reference::ReferenceFormat;

use thiserror::Error;

/// Trace line parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line ended before {expected}")]
    MissingToken { expected: &'static str },
    #[error("expected {expected} prefix, found {token:?}")]
    MissingPrefix {
        expected: &'static str,
        token: String,
    },
    #[error("marker {marker:?} not found")]
    MarkerNotFound { marker: &'static str },
    #[error("invalid {field} value {text:?}")]
    InvalidNumber { field: Field, text: String },
    #[error("unexpected token {token:?}")]
    UnexpectedToken { token: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// A trace layout that decodes one line into an [`Instruction`].
pub trait LineFormat {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Parse one trimmed trace line.
    fn parse_line(&self, line: &str) -> Result<Instruction>;
}
