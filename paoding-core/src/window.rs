//! Fixed-capacity character window over an unbounded input
//!
//! The window holds `len() <= capacity()` characters. `offset()` is the global
//! position of the first held character and only ever grows. `cursor()` marks
//! how far the matcher has conclusively resolved; characters from the cursor
//! on are kept across refills.

use std::io;

use crate::source::CharSource;

/// Sliding window buffer
#[derive(Debug, Clone)]
pub struct Window {
    chars: Vec<char>,
    capacity: usize,
    offset: usize,
    cursor: usize,
    end_marked: bool,
}

impl Window {
    /// Create an empty window holding at most `capacity` characters
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            capacity,
            offset: 0,
            cursor: 0,
            end_marked: false,
        }
    }

    /// Drop everything before `unresolved_from`, then top up from `source`.
    ///
    /// The dropped prefix advances the global offset. Returns how many
    /// characters were read; `0` with free space means the source is
    /// exhausted. Read failures are returned as-is and leave the window
    /// holding exactly the shifted characters.
    pub fn shift_and_refill<S: CharSource + ?Sized>(
        &mut self,
        unresolved_from: usize,
        source: &mut S,
    ) -> io::Result<usize> {
        let shift = unresolved_from.min(self.chars.len());
        if shift > 0 {
            self.chars.drain(..shift);
            self.advance_offset(shift);
        }
        self.cursor = self.cursor.saturating_sub(shift);

        let held = self.chars.len();
        if held == self.capacity || self.end_marked {
            return Ok(0);
        }

        self.chars.resize(self.capacity, '\0');
        match source.read_chars(&mut self.chars[held..]) {
            Ok(read) => {
                self.chars.truncate(held + read);
                log::trace!(
                    "window refill at offset {}: kept {held}, read {read}",
                    self.offset
                );
                Ok(read)
            }
            Err(e) => {
                self.chars.truncate(held);
                Err(e)
            }
        }
    }

    /// Record that no more input will arrive.
    ///
    /// Only possible while the window has free space; returns whether the
    /// end was marked.
    pub fn mark_end(&mut self) -> bool {
        if self.chars.len() < self.capacity {
            self.end_marked = true;
        }
        self.end_marked
    }

    /// Move the global offset forward by `n` shifted-out characters
    pub fn advance_offset(&mut self, n: usize) {
        self.offset += n;
    }

    /// Mark `[.., position)` as resolved
    pub fn resolve_to(&mut self, position: usize) {
        debug_assert!(position >= self.cursor && position <= self.chars.len());
        self.cursor = position.min(self.chars.len());
    }

    /// Valid characters currently held
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of valid characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the window holds nothing
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Maximum number of characters held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether no free space remains
    pub fn is_full(&self) -> bool {
        self.chars.len() == self.capacity
    }

    /// Global offset of `chars()[0]`
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// End of the resolved prefix
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input is known to end after the held characters
    pub fn is_final(&self) -> bool {
        self.end_marked
    }

    /// Final and fully resolved
    pub fn is_drained(&self) -> bool {
        self.end_marked && self.cursor == self.chars.len()
    }

    /// Back to the freshly constructed state
    pub fn reset(&mut self) {
        self.chars.clear();
        self.offset = 0;
        self.cursor = 0;
        self.end_marked = false;
    }
}
