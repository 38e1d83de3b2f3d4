//! Tests for the LineBuffer
//!
//! These tests are in the same narrative order as the main file: the result type, creation and
//! accessors, and then line filling, which builds on all of them.

#![expect(
    clippy::indexing_slicing,
    clippy::unwrap_used,
    reason = "Okay in tests"
)]

use super::*;
use std::io::{BufReader, Cursor, Read};

/// A reader that hands out its data a few bytes at a time, interrupting itself in between.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
    interrupt: bool,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }

        let n = self.step.min(buf.len()).min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}

/// A reader that fails after handing out its data.
struct Broken<'a> {
    data: &'a [u8],
}

impl Read for Broken<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("disk on fire"));
        }
        let n = self.data.read(buf)?;
        Ok(n)
    }
}

// -----------------------------------------------------------------------------
// LineResult
// -----------------------------------------------------------------------------

#[test]
fn test_line_result_count() {
    assert_eq!(LineResult::Complete(123).count(), 123);
    assert_eq!(LineResult::Truncated(123).count(), 123);
    assert_eq!(LineResult::Eof.count(), 0);
}

#[test]
fn test_line_result_is_line() {
    assert!(LineResult::Complete(0).is_line());
    assert!(LineResult::Truncated(1).is_line());
    assert!(!LineResult::Eof.is_line());
}

// -----------------------------------------------------------------------------
// LineBuffer - Creation
// -----------------------------------------------------------------------------

#[test]
fn test_line_buffer_new() {
    let buffer = LineBuffer::new();

    assert_eq!(buffer.cap(), MAX_LINE_SIZE);
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert_eq!(buffer.line(), b"");
    assert_eq!(buffer, LineBuffer::default());
}

#[test]
fn test_line_buffer_with_capacity() {
    let buffer = LineBuffer::with_capacity(7);
    assert_eq!(buffer.cap(), 7);
    assert!(buffer.buf.capacity() >= 7);

    // Zero gets raised so there's always room for something
    let buffer = LineBuffer::with_capacity(0);
    assert_eq!(buffer.cap(), 1);
}

#[test]
fn test_line_buffer_with_huge_capacity() {
    // Allocation is bounded up front and grows only with the lines actually read
    let mut buffer = LineBuffer::with_capacity(usize::MAX);
    assert_eq!(buffer.cap(), usize::MAX);
    assert!(buffer.buf.capacity() <= MAX_LINE_SIZE);

    let mut reader = Cursor::new(b"a 1\n");
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(3));
    assert_eq!(buffer.line(), b"a 1");
}

// -----------------------------------------------------------------------------
// LineBuffer - Filling
// -----------------------------------------------------------------------------

#[test]
fn test_fill_line_empty_input() {
    let mut reader = Cursor::new(b"");
    let mut buffer = LineBuffer::new();

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
    assert!(buffer.is_empty());
}

#[test]
fn test_fill_line_sequence() {
    let mut reader = Cursor::new(b"# settings\nname  Alice\n\nage 30\r\n");
    let mut buffer = LineBuffer::new();

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(10));
    assert_eq!(buffer.line(), b"# settings");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(11));
    assert_eq!(buffer.line(), b"name  Alice");

    // Blank lines are still lines
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(0));
    assert_eq!(buffer.line(), b"");

    // Carriage returns are kept, only the newline goes
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(7));
    assert_eq!(buffer.line(), b"age 30\r");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
}

#[test]
fn test_fill_line_without_trailing_newline() {
    let mut reader = Cursor::new(b"a b\nlast line");
    let mut buffer = LineBuffer::new();

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(3));
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(9));
    assert_eq!(buffer.line(), b"last line");
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
}

#[test]
fn test_fill_line_truncates() {
    let mut reader = Cursor::new(b"abcdefgh\nxy\nlonger-last");
    let mut buffer = LineBuffer::with_capacity(4);

    // The rest of the line is dropped, not carried into the next one
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Truncated(4));
    assert_eq!(buffer.line(), b"abcd");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(2));
    assert_eq!(buffer.line(), b"xy");

    // Truncation is still reported when the input ends mid-line
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Truncated(4));
    assert_eq!(buffer.line(), b"long");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
}

#[test]
fn test_fill_line_exactly_at_capacity() {
    let mut reader = Cursor::new(b"abcd\n");
    let mut buffer = LineBuffer::with_capacity(4);

    // The terminator doesn't count against the capacity
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(4));
    assert_eq!(buffer.line(), b"abcd");
}

#[test]
fn test_fill_line_across_reads() {
    let data = b"first line here\nsecond\n";
    let trickle = Trickle {
        data,
        step: 3,
        interrupt: false,
    };
    // A tiny BufReader forces lines to span several fill_buf calls
    let mut reader = BufReader::with_capacity(2, trickle);
    let mut buffer = LineBuffer::new();

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(15));
    assert_eq!(buffer.line(), b"first line here");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(6));
    assert_eq!(buffer.line(), b"second");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
}

#[test]
fn test_fill_line_error() {
    let broken = Broken { data: b"ok line\n" };
    let mut reader = BufReader::new(broken);
    let mut buffer = LineBuffer::new();

    // Data before the failure comes through
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Complete(7));
    assert_eq!(buffer.line(), b"ok line");

    // Then the error surfaces instead of an EOF
    let err = buffer.fill_line(&mut reader).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
}

#[test]
fn test_fill_line_truncates_on_char_boundary() {
    // "k wü" would end half way through the two byte 'ü'
    let mut reader = Cursor::new("k wüx\nk 世界\n".as_bytes());
    let mut buffer = LineBuffer::with_capacity(4);

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Truncated(3));
    assert_eq!(buffer.line(), b"k w");

    // Two bytes into a three byte character
    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Truncated(2));
    assert_eq!(buffer.line(), b"k ");

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Eof);
}

#[test]
fn test_fill_line_keeps_whole_char_at_limit() {
    let mut reader = Cursor::new("k wü more\n".as_bytes());
    let mut buffer = LineBuffer::with_capacity(5);

    assert_eq!(buffer.fill_line(&mut reader).unwrap(), LineResult::Truncated(5));
    assert_eq!(buffer.line(), "k wü".as_bytes());
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

#[test]
fn test_complete_prefix_len() {
    assert_eq!(complete_prefix_len(b""), 0);
    assert_eq!(complete_prefix_len(b"abc"), 3);
    assert_eq!(complete_prefix_len("aü".as_bytes()), 3);
    assert_eq!(complete_prefix_len(&"aü".as_bytes()[..2]), 1);
    assert_eq!(complete_prefix_len(&"a世".as_bytes()[..3]), 1);
    assert_eq!(complete_prefix_len(&"😀".as_bytes()[..3]), 0);

    // Invalid bytes are somebody else's problem, only a cut-off tail is dropped
    assert_eq!(complete_prefix_len(b"a\xff"), 2);
    assert_eq!(complete_prefix_len(b"\x80\x80\x80\x80\x80"), 5);
}
