//! Whitespace-separated token reader
//!
//! Reads the command stream the way `scanf` would: commands are single
//! non-whitespace bytes, arguments are signed decimal integers. Input is
//! pulled one line at a time so interactive sessions respond per line.

use std::io::BufRead;

use crate::error::{Result, SessionError};

/// Pull-based token reader over a `BufRead`
pub struct Scanner<R> {
    reader: R,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
        }
    }

    /// Advance past whitespace, refilling the line buffer as needed
    ///
    /// Returns `false` once the input is exhausted.
    fn skip_whitespace(&mut self) -> Result<bool> {
        loop {
            while let Some(byte) = self.line.get(self.pos) {
                if !byte.is_ascii_whitespace() {
                    return Ok(true);
                }
                self.pos += 1;
            }

            self.line.clear();
            self.pos = 0;
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(false);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.line.get(self.pos).copied()
    }

    /// Next non-whitespace byte, or `None` at end of input
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }
        let byte = self.peek();
        self.pos += 1;
        Ok(byte)
    }

    /// Next signed decimal integer
    ///
    /// `what` names the value for error messages. On malformed input the
    /// offending token is consumed and returned in the error.
    pub fn next_int(&mut self, what: &'static str) -> Result<i64> {
        if !self.skip_whitespace()? {
            return Err(SessionError::UnexpectedEof(what));
        }

        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }

        let parsed = std::str::from_utf8(&self.line[start..self.pos])
            .ok()
            .and_then(|text| text.parse::<i64>().ok());

        match parsed {
            Some(value) => Ok(value),
            None => {
                while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace()) {
                    self.pos += 1;
                }
                Err(SessionError::Parse {
                    expected: what,
                    found: String::from_utf8_lossy(&self.line[start..self.pos]).into_owned(),
                })
            }
        }
    }
}
