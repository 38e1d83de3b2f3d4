//! Pull-style access to configuration pairs.
//!
//! [`Entries`] yields the same pairs, in the same order, as
//! [`ConfigReader::read`](crate::ConfigReader::read) hands to its callback, but as owned
//! [`Entry`] values produced on demand.
//!
//! # Example
//!
//! ```
//! use cfg_reader::{ConfigReader, Entry};
//!
//! let input = "name Alice\n# age 30\nlang rust\n";
//! let entries: Vec<Entry> = ConfigReader::new()
//!     .entries_from(input.as_bytes())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(entries, [Entry::new("name", "Alice"), Entry::new("lang", "rust")]);
//! ```

use crate::buffer::LineBuffer;
use crate::error::ReadError;
use crate::reader::{ConfigReader, ReadSummary};
use std::io::BufRead;
use std::iter::FusedIterator;

/// An owned configuration pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// The key, trimmed.
    pub key: String,
    /// The value, as the raw second token of its line.
    pub value: String,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<Entry> for (String, String) {
    fn from(entry: Entry) -> Self {
        (entry.key, entry.value)
    }
}

/// Iterator over the pairs of a configuration source.
///
/// Created by [`ConfigReader::entries`] and [`ConfigReader::entries_from`]. Stops for good after
/// the end of input or the first error.
#[derive(Debug)]
pub struct Entries<R> {
    config: ConfigReader,
    reader: R,
    line: LineBuffer,
    summary: ReadSummary,
    done: bool,
}

impl<R: BufRead> Entries<R> {
    pub(crate) fn new(config: ConfigReader, reader: R) -> Self {
        Self {
            line: LineBuffer::with_capacity(config.max_line_size()),
            config,
            reader,
            summary: ReadSummary::default(),
            done: false,
        }
    }

    /// Returns the counters for the lines read so far.
    pub fn summary(&self) -> ReadSummary {
        self.summary
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<Entry, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let result = match self.line.fill_line(&mut self.reader) {
                Ok(result) => result,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };

            if !result.is_line() {
                self.done = true;
                log::debug!(
                    "Configuration exhausted: {} entries from {} lines",
                    self.summary.entries,
                    self.summary.lines
                );
                break;
            }

            let text = String::from_utf8_lossy(self.line.line());
            if let Some((key, value)) = self.config.scan_line(result, &text, &mut self.summary) {
                return Some(Ok(Entry::new(key, value)));
            }
        }

        None
    }
}

impl<R: BufRead> FusedIterator for Entries<R> {}
