//! Pull-based character sources feeding the sliding window
//!
//! The segmenter never requires the whole input to be resident in memory; it
//! asks a [`CharSource`] for at most as many characters as the window can take.

use std::io::{self, Read};

/// Size of the byte chunk requested from an underlying reader
const READ_CHUNK: usize = 8 * 1024;

/// A source of characters read in bounded slices.
pub trait CharSource {
    /// Read up to `buf.len()` characters into `buf`.
    ///
    /// Returns the number of characters written. `Ok(0)` for a non-empty
    /// `buf` means the source is exhausted.
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_chars(buf)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_chars(buf)
    }
}

/// Characters from an in-memory string
#[derive(Debug, Clone, Default)]
pub struct StrSource {
    text: String,
    position: usize,
}

impl StrSource {
    /// Create a source over `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: 0,
        }
    }

    /// Bytes not yet handed out
    pub fn remaining(&self) -> &str {
        &self.text[self.position..]
    }
}

impl From<&str> for StrSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StrSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl CharSource for StrSource {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut count = 0;
        for ch in self.text[self.position..].chars().take(buf.len()) {
            buf[count] = ch;
            self.position += ch.len_utf8();
            count += 1;
        }
        Ok(count)
    }
}

/// Incremental UTF-8 decoder over any [`Read`]
///
/// Multi-byte sequences split between two reads are carried over. Invalid
/// UTF-8 is reported as [`io::ErrorKind::InvalidData`] once every character
/// before it has been delivered.
#[derive(Debug)]
pub struct Utf8Source<R> {
    reader: R,
    /// Undecoded tail: at most one incomplete sequence
    pending: Vec<u8>,
    decoded: Vec<char>,
    next: usize,
    invalid: bool,
    eof: bool,
}

impl<R: Read> Utf8Source<R> {
    /// Wrap a byte reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::with_capacity(4),
            decoded: Vec::new(),
            next: 0,
            invalid: false,
            eof: false,
        }
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let read = self.reader.read(&mut chunk)?;
        if read == 0 {
            self.eof = true;
            return Ok(());
        }

        self.pending.extend_from_slice(&chunk[..read]);
        self.decoded.clear();
        self.next = 0;

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                self.decoded.extend(text.chars());
                self.pending.len()
            }
            Err(e) => {
                let valid = &self.pending[..e.valid_up_to()];
                // The prefix was just validated, so this cannot fail.
                if let Ok(text) = std::str::from_utf8(valid) {
                    self.decoded.extend(text.chars());
                }
                if e.error_len().is_some() {
                    self.invalid = true;
                }
                e.valid_up_to()
            }
        };
        self.pending.drain(..valid_up_to);
        Ok(())
    }
}

impl<R: Read> CharSource for Utf8Source<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.next < self.decoded.len() {
                let count = (self.decoded.len() - self.next).min(buf.len());
                buf[..count].copy_from_slice(&self.decoded[self.next..self.next + count]);
                self.next += count;
                return Ok(count);
            }

            if self.invalid {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream did not contain valid UTF-8",
                ));
            }

            if self.eof {
                if self.pending.is_empty() {
                    return Ok(0);
                }
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "stream ended inside a UTF-8 sequence",
                ));
            }

            self.fill()?;
        }
    }
}
