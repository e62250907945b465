// Byte-level decoding of the big-endian Timer encoding

pub mod parser;

pub use parser::{parse_char_array, parse_f32_be, parse_f64_be, parse_i32_be, parse_u32_be};

use nom::IResult;
use thiserror::Error;

/// Fewer bytes available than a field or region declares.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("truncated read of '{what}' at byte {at}: wanted {wanted} bytes, {available} available")]
pub struct Truncated {
    pub what: String,
    pub at: usize,
    pub wanted: usize,
    pub available: usize,
}

/// Forward-only cursor over a fully-loaded file image. Every read
/// consumes exactly the declared number of bytes or fails; nothing is
/// ever re-read.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn truncated(&self, wanted: usize, what: &str) -> Truncated {
        Truncated {
            what: what.to_string(),
            at: self.pos,
            wanted,
            available: self.remaining(),
        }
    }

    fn apply<T>(
        &mut self,
        wanted: usize,
        what: &str,
        parse: impl Fn(&'a [u8]) -> IResult<&'a [u8], T>,
    ) -> Result<T, Truncated> {
        match parse(self.rest()) {
            Ok((_, value)) => {
                self.pos += wanted;
                Ok(value)
            }
            Err(_) => Err(self.truncated(wanted, what)),
        }
    }

    /// Take exactly `wanted` bytes, advancing the cursor.
    pub fn take(&mut self, wanted: usize, what: &str) -> Result<&'a [u8], Truncated> {
        self.apply(wanted, what, parser::parse_char_array(wanted))
    }

    /// Consume `wanted` bytes without interpreting them.
    pub fn skip(&mut self, wanted: usize, what: &str) -> Result<(), Truncated> {
        self.take(wanted, what).map(|_| ())
    }

    pub fn read_i32(&mut self, what: &str) -> Result<i32, Truncated> {
        self.apply(4, what, parser::parse_i32_be)
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32, Truncated> {
        self.apply(4, what, parser::parse_u32_be)
    }

    pub fn read_f32(&mut self, what: &str) -> Result<f32, Truncated> {
        self.apply(4, what, parser::parse_f32_be)
    }

    pub fn read_f64(&mut self, what: &str) -> Result<f64, Truncated> {
        self.apply(8, what, parser::parse_f64_be)
    }

    /// Fixed-length text: strict UTF-8 with trailing NUL padding
    /// stripped. Undecodable bytes yield `None` after a warning; the
    /// bytes are consumed either way so the walk can continue.
    pub fn read_text(&mut self, len: usize, what: &str) -> Result<Option<String>, Truncated> {
        let bytes = self.take(len, what)?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Some(text.trim_end_matches('\0').to_string())),
            Err(_) => {
                tracing::warn!("unable to decode contents of '{}'", what);
                Ok(None)
            }
        }
    }
}
