//! Cursor over whitespace-separated trace tokens.
//!
//! Both layouts are scanned left to right with a handful of named rules:
//! skip fixed-width tokens, skip until a marker, take a prefixed token, take
//! a labelled field. Keeping the rules here lets each layout describe itself
//! as a sequence of rule applications instead of index arithmetic.

use crate::{Field, ParseError, Result};

/// Tokens of a single trace line plus a read position.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Split on whitespace only.
    #[must_use]
    pub fn new(line: &'a str) -> Self {
        Self {
            tokens: line.split_whitespace().collect(),
            pos: 0,
        }
    }

    /// Split on whitespace and commas (`A:00,X:00,` style layouts).
    #[must_use]
    pub fn with_commas(line: &'a str) -> Self {
        Self {
            tokens: line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .collect(),
            pos: 0,
        }
    }

    /// Next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Tokens not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &[&'a str] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume one token; `expected` names it in the error.
    pub fn next_token(&mut self, expected: &'static str) -> Result<&'a str> {
        let token = self.peek().ok_or(ParseError::MissingToken { expected })?;
        self.pos += 1;
        Ok(token)
    }

    /// Advance while the next token is exactly `width` characters long.
    ///
    /// Returns the number of tokens skipped.
    pub fn skip_fixed_width(&mut self, width: usize) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|token| token.chars().count() == width) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Advance until the next token starts with `marker`, leaving it unread.
    pub fn skip_until_prefix(&mut self, marker: &'static str) -> Result<()> {
        while let Some(token) = self.peek() {
            if token.starts_with(marker) {
                return Ok(());
            }
            self.pos += 1;
        }
        Err(ParseError::MarkerNotFound { marker })
    }

    /// Consume a token that must start with `prefix` and return the rest.
    pub fn take_prefixed(&mut self, prefix: &'static str) -> Result<&'a str> {
        let token = self.next_token(prefix)?;
        token
            .strip_prefix(prefix)
            .ok_or_else(|| ParseError::MissingPrefix {
                expected: prefix,
                token: token.to_string(),
            })
    }

    /// Consume a labelled field written either fused (`A:00`) or split
    /// across two tokens (`A: 00`).
    pub fn take_field(&mut self, key: &'static str) -> Result<&'a str> {
        let rest = self.take_prefixed(key)?;
        if rest.is_empty() {
            self.next_token(key)
        } else {
            Ok(rest)
        }
    }
}

fn digits(text: &str, radix: u32) -> Option<&str> {
    let text = text.strip_prefix('$').unwrap_or(text);
    if text.is_empty() || !text.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(text)
}

fn invalid(field: Field, text: &str) -> ParseError {
    ParseError::InvalidNumber {
        field,
        text: text.to_string(),
    }
}

/// Parse a hexadecimal byte, tolerating one leading `$`.
pub fn parse_hex_u8(field: Field, text: &str) -> Result<u8> {
    digits(text, 16)
        .and_then(|d| u8::from_str_radix(d, 16).ok())
        .ok_or_else(|| invalid(field, text))
}

/// Parse a hexadecimal word, tolerating one leading `$`.
pub fn parse_hex_u16(field: Field, text: &str) -> Result<u16> {
    digits(text, 16)
        .and_then(|d| u16::from_str_radix(d, 16).ok())
        .ok_or_else(|| invalid(field, text))
}

/// Parse a decimal count.
pub fn parse_dec_u64(field: Field, text: &str) -> Result<u64> {
    digits(text, 10)
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| invalid(field, text))
}
