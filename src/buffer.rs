//! Fixed-capacity line buffer.
//!
//! [`LineBuffer`] holds one raw line at a time and is overwritten by every
//! [`fill_line`](LineBuffer::fill_line). Its capacity never changes after construction: bytes of
//! a line beyond the capacity are read and dropped, and the result reports that the line was
//! truncated.
//!
//! # Example
//!
//! ```
//! use cfg_reader::buffer::{LineBuffer, LineResult};
//! use std::io::Cursor;
//!
//! let mut reader = Cursor::new(b"name Alice\nage 30");
//! let mut line = LineBuffer::with_capacity(64);
//!
//! assert_eq!(line.fill_line(&mut reader).unwrap(), LineResult::Complete(10));
//! assert_eq!(line.line(), b"name Alice");
//!
//! // The last line doesn't need a terminator
//! assert_eq!(line.fill_line(&mut reader).unwrap(), LineResult::Complete(6));
//! assert_eq!(line.line(), b"age 30");
//!
//! assert_eq!(line.fill_line(&mut reader).unwrap(), LineResult::Eof);
//! ```

use crate::constants::MAX_LINE_SIZE;
use std::io::{self, BufRead};

/// Outcome of a single [`LineBuffer::fill_line`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineResult {
    /// A whole line was read.
    ///
    /// Contains the number of bytes stored, not counting the terminator.
    Complete(usize),

    /// A line was read but didn't fit; the rest of it was discarded.
    ///
    /// Contains the number of bytes stored, which is the buffer capacity.
    Truncated(usize),

    /// There are no more lines.
    Eof,
}

impl LineResult {
    /// Returns the number of bytes stored in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cfg_reader::buffer::LineResult;
    /// assert_eq!(LineResult::Complete(42).count(), 42);
    /// assert_eq!(LineResult::Truncated(8).count(), 8);
    /// assert_eq!(LineResult::Eof.count(), 0);
    /// ```
    pub const fn count(&self) -> usize {
        match self {
            Self::Complete(n) | Self::Truncated(n) => *n,
            Self::Eof => 0,
        }
    }

    /// Returns `true` unless this is [`LineResult::Eof`].
    pub const fn is_line(&self) -> bool {
        !matches!(self, Self::Eof)
    }
}

/// A reusable buffer for one line of input.
///
/// Storage grows as lines arrive and is kept between lines, so a large
/// [`cap()`](Self::cap) costs nothing until a line actually needs the room.
///
/// # Invariants
///
/// `self.buf.len() <= self.cap` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    /// Bytes of the current line.
    buf: Vec<u8>,
    /// Maximum number of bytes a line may occupy.
    cap: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Creates a new buffer holding up to [`MAX_LINE_SIZE`] bytes per line.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE_SIZE)
    }

    /// Creates a new buffer holding up to `capacity` bytes per line.
    ///
    /// A capacity of zero is raised to one. At most [`MAX_LINE_SIZE`] bytes are allocated up
    /// front, whatever the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cfg_reader::buffer::LineBuffer;
    /// assert_eq!(LineBuffer::with_capacity(16).cap(), 16);
    /// assert_eq!(LineBuffer::with_capacity(0).cap(), 1);
    ///
    /// // Nothing near this much is allocated
    /// assert_eq!(LineBuffer::with_capacity(usize::MAX).cap(), usize::MAX);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(1);

        Self {
            buf: Vec::with_capacity(cap.min(MAX_LINE_SIZE)),
            cap,
        }
    }

    /// Returns the current line, without its terminator.
    #[inline]
    pub fn line(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the maximum number of bytes a line may occupy.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the length of the current line.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the current line is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Forgets the current line without releasing its storage.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Reads the next line from `reader`, replacing the current one.
    ///
    /// A line ends at `\n` or at the end of input. The terminator is consumed but not stored; a
    /// preceding `\r` is kept. Bytes past [`cap()`](Self::cap) are consumed and dropped so the
    /// next call starts on the following line. A truncated line never ends in part of a UTF-8
    /// character; the incomplete tail is dropped as well.
    ///
    /// Returns [`LineResult::Eof`] only when no byte at all could be read.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cfg_reader::buffer::{LineBuffer, LineResult};
    /// # use std::io::Cursor;
    /// let mut reader = Cursor::new(b"0123456789\nnext\n");
    /// let mut line = LineBuffer::with_capacity(4);
    ///
    /// assert_eq!(line.fill_line(&mut reader).unwrap(), LineResult::Truncated(4));
    /// assert_eq!(line.line(), b"0123");
    ///
    /// assert_eq!(line.fill_line(&mut reader).unwrap(), LineResult::Complete(4));
    /// assert_eq!(line.line(), b"next");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than [`Interrupted`](io::ErrorKind::Interrupted) encountered
    /// while reading. Interrupted reads are retried.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Safe by invariant"
    )]
    pub fn fill_line(&mut self, reader: &mut impl BufRead) -> io::Result<LineResult> {
        self.clear();

        // Whether anything, stored or dropped, belonged to this line
        let mut seen = false;
        let mut truncated = false;

        loop {
            // Get more input, retrying on interrupt
            let available = loop {
                match reader.fill_buf() {
                    Ok(data) => break data,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            };

            if available.is_empty() {
                // We've hit EOF
                if !seen {
                    return Ok(LineResult::Eof);
                }
                return Ok(self.finish(truncated));
            }
            seen = true;

            // Split off this line's part of the input
            let (content, used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(i) => (&available[..i], i + 1, true),
                None => (available, available.len(), false),
            };

            // Keep what fits
            let room = self.cap - self.len();
            let keep = content.len().min(room);
            self.buf.extend_from_slice(&content[..keep]);

            if keep < content.len() {
                truncated = true;
            }

            // Mark the input as consumed, including anything we dropped
            reader.consume(used);

            if done {
                return Ok(self.finish(truncated));
            }
        }
    }

    /// Wraps up a line that has been read, cutting a truncated one back to a whole character.
    fn finish(&mut self, truncated: bool) -> LineResult {
        if !truncated {
            return LineResult::Complete(self.len());
        }

        let keep = complete_prefix_len(&self.buf);
        self.buf.truncate(keep);

        LineResult::Truncated(self.len())
    }
}

/// Length of `bytes` without a trailing incomplete UTF-8 sequence.
///
/// Only the tail is inspected; invalid bytes earlier in the line are left alone.
#[expect(clippy::arithmetic_side_effects, reason = "start <= bytes.len()")]
fn complete_prefix_len(bytes: &[u8]) -> usize {
    // A UTF-8 sequence is at most 4 bytes, so its lead byte is within the last 4
    let tail_start = bytes.len().saturating_sub(4);
    let Some(start) = bytes
        .iter()
        .rposition(|&b| b & 0b1100_0000 != 0b1000_0000)
        .filter(|&i| i >= tail_start)
    else {
        return bytes.len();
    };

    match bytes.get(start..).map(str::from_utf8) {
        // Cut short rather than invalid
        Some(Err(e)) if e.error_len().is_none() => start + e.valid_up_to(),
        _ => bytes.len(),
    }
}

#[cfg(test)]
mod tests;
