use crate::buffer::{LineBuffer, LineResult};
use crate::constants::{MAX_KEY_SIZE, MAX_VALUE_SIZE};
use crate::entries::Entries;
use crate::error::ReadError;
use crate::trim::{is_space, trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a configuration file with the default limits, calling `on_entry` for every pair.
///
/// Shorthand for [`ConfigReader::new().read(path, on_entry)`](ConfigReader::read).
///
/// # Errors
///
/// See [`ConfigReader::read`].
pub fn read<F>(path: impl AsRef<Path>, on_entry: F) -> Result<ReadSummary, ReadError>
where
    F: FnMut(&str, &str),
{
    ConfigReader::new().read(path, on_entry)
}

/// Opens a configuration file with the default limits and iterates over its pairs.
///
/// Shorthand for [`ConfigReader::new().entries(path)`](ConfigReader::entries).
///
/// # Errors
///
/// See [`ConfigReader::entries`].
pub fn entries(path: impl AsRef<Path>) -> Result<Entries<BufReader<File>>, ReadError> {
    ConfigReader::new().entries(path)
}

/// Counters describing a finished (or ongoing) scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    /// Lines read, including skipped ones.
    pub lines: usize,
    /// Pairs handed to the caller.
    pub entries: usize,
    /// Blank, comment and single-token lines.
    pub skipped: usize,
    /// Lines or tokens that had to be cut to fit a limit.
    pub truncated: usize,
}

/// Reader for line-oriented `key value` configuration.
///
/// Each line is split on whitespace. The first token is the key and the second the value; any
/// further tokens are ignored. Lines with fewer than two tokens are skipped, as are lines whose
/// key starts with `#`. Only the first token is checked for `#`, so `key value # note` still
/// yields `("key", "value")`.
///
/// The reader itself holds nothing but its limits. Every call allocates its own line buffer, so
/// one `ConfigReader` can serve any number of reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigReader {
    max_key_size: usize,
    max_value_size: usize,
    max_line_size: usize,
}

impl Default for ConfigReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigReader {
    /// Creates a new `ConfigReader` with the default limits.
    ///
    /// Keys and values are capped at [`MAX_KEY_SIZE`] and [`MAX_VALUE_SIZE`], lines at their sum.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a [`ConfigReaderBuilder`] for configuring a new `ConfigReader`.
    pub fn builder() -> ConfigReaderBuilder {
        ConfigReaderBuilder {
            max_key_size: None,
            max_value_size: None,
            max_line_size: None,
        }
    }

    /// Returns the key length limit in bytes.
    pub fn max_key_size(&self) -> usize {
        self.max_key_size
    }

    /// Returns the value length limit in bytes.
    pub fn max_value_size(&self) -> usize {
        self.max_value_size
    }

    /// Returns the line length limit in bytes.
    pub fn max_line_size(&self) -> usize {
        self.max_line_size
    }

    /// Reads the file at `path`, calling `on_entry(key, value)` for every pair in file order.
    ///
    /// The strings passed to `on_entry` only live for the duration of the call; copy out
    /// whatever should be kept.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cfg_reader::ConfigReader;
    /// use std::collections::HashMap;
    ///
    /// let mut settings = HashMap::new();
    /// let summary = ConfigReader::new().read("app.cfg", |key, value| {
    ///     settings.insert(key.to_owned(), value.to_owned());
    /// })?;
    /// println!("{} settings from {} lines", summary.entries, summary.lines);
    /// # Ok::<(), cfg_reader::ReadError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - [`ReadError::NotFound`] if `path` doesn't exist.
    /// - [`ReadError::Open`] if the file can't be opened.
    /// - [`ReadError::Read`] if reading fails part way through. Pairs before the failure have
    ///   already been delivered.
    ///
    /// In the first two cases `on_entry` is never called.
    pub fn read<F>(&self, path: impl AsRef<Path>, on_entry: F) -> Result<ReadSummary, ReadError>
    where
        F: FnMut(&str, &str),
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReadError::open(path, e))?;

        log::debug!("Reading configuration from {}", path.display());

        self.read_from(file, on_entry)
    }

    /// Reads configuration from any [`Read`], calling `on_entry(key, value)` for every pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfg_reader::ConfigReader;
    ///
    /// let input = "# settings\nname  Alice\nage   30\n\n# trailing\n";
    /// let mut seen = Vec::new();
    /// let summary = ConfigReader::new()
    ///     .read_from(input.as_bytes(), |key, value| seen.push(format!("{key}={value}")))
    ///     .unwrap();
    ///
    /// assert_eq!(seen, ["name=Alice", "age=30"]);
    /// assert_eq!(summary.lines, 5);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Read`] if the reader fails. End of input is not an error.
    pub fn read_from<R, F>(&self, reader: R, mut on_entry: F) -> Result<ReadSummary, ReadError>
    where
        R: Read,
        F: FnMut(&str, &str),
    {
        let mut reader = BufReader::new(reader);
        let mut line = LineBuffer::with_capacity(self.max_line_size);
        let mut summary = ReadSummary::default();

        loop {
            let result = line.fill_line(&mut reader)?;
            if !result.is_line() {
                break;
            }

            let text = String::from_utf8_lossy(line.line());
            if let Some((key, value)) = self.scan_line(result, &text, &mut summary) {
                on_entry(key, value);
            }
        }

        log::debug!(
            "Configuration read: {} entries from {} lines ({} skipped, {} truncated)",
            summary.entries,
            summary.lines,
            summary.skipped,
            summary.truncated
        );

        Ok(summary)
    }

    /// Opens the file at `path` and returns an iterator over its pairs.
    ///
    /// The iterator reads lazily and applies the same rules as [`read`](Self::read). To start
    /// over, call `entries` again.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cfg_reader::ConfigReader;
    /// use std::collections::HashMap;
    ///
    /// let settings = ConfigReader::new()
    ///     .entries("app.cfg")?
    ///     .map(|entry| entry.map(<(String, String)>::from))
    ///     .collect::<Result<HashMap<_, _>, _>>()?;
    /// # Ok::<(), cfg_reader::ReadError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotFound`] or [`ReadError::Open`] if the file can't be opened.
    /// Read failures are yielded by the iterator.
    pub fn entries(&self, path: impl AsRef<Path>) -> Result<Entries<BufReader<File>>, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReadError::open(path, e))?;

        log::debug!("Iterating configuration from {}", path.display());

        Ok(self.entries_from(file))
    }

    /// Returns an iterator over the pairs read from any [`Read`].
    pub fn entries_from<R: Read>(&self, reader: R) -> Entries<BufReader<R>> {
        Entries::new(*self, BufReader::new(reader))
    }

    /// Parses a single line, returning its `(key, value)` pair if it has one.
    ///
    /// Tokens longer than the limits are cut short at a character boundary, keeping at least
    /// their first character.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cfg_reader::ConfigReader;
    /// let reader = ConfigReader::new();
    /// assert_eq!(reader.parse_line("  spaced_key   spaced_value  "), Some(("spaced_key", "spaced_value")));
    /// assert_eq!(reader.parse_line("key value # note"), Some(("key", "value")));
    /// assert_eq!(reader.parse_line("# this is a comment"), None);
    /// assert_eq!(reader.parse_line("keyonly"), None);
    /// assert_eq!(reader.parse_line("   "), None);
    /// ```
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let (key, value) = split_line(line)?;
        let key = truncate(key, self.max_key_size);
        let value = truncate(value, self.max_value_size);

        accept_key(key).map(|key| (key, value))
    }

    /// Applies the line rules to one line read from input, keeping `summary` up to date.
    #[expect(clippy::arithmetic_side_effects, reason = "Counts can't outgrow the input")]
    pub(crate) fn scan_line<'a>(
        &self,
        result: LineResult,
        line: &'a str,
        summary: &mut ReadSummary,
    ) -> Option<(&'a str, &'a str)> {
        summary.lines += 1;
        let number = summary.lines;

        if matches!(result, LineResult::Truncated(_)) {
            summary.truncated += 1;
            log::warn!(
                "Line {number} exceeds {} bytes and was truncated to {}",
                self.max_line_size,
                result.count()
            );
        }

        let Some((raw_key, raw_value)) = split_line(line) else {
            log::trace!("Skipping line {number}: fewer than two tokens");
            summary.skipped += 1;
            return None;
        };

        let key = truncate(raw_key, self.max_key_size);
        let value = truncate(raw_value, self.max_value_size);
        if key.len() < raw_key.len() || value.len() < raw_value.len() {
            summary.truncated += 1;
            log::warn!(
                "Line {number}: key or value exceeds its limit ({} / {} bytes) and was truncated",
                self.max_key_size,
                self.max_value_size
            );
        }

        let Some(key) = accept_key(key) else {
            log::trace!("Skipping line {number}: comment or empty key");
            summary.skipped += 1;
            return None;
        };

        summary.entries += 1;
        Some((key, value))
    }
}

/// A builder for constructing a [`ConfigReader`] with custom limits.
///
/// Limits of zero are raised to one. The line limit defaults to the sum of the key and value
/// limits.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct ConfigReaderBuilder {
    max_key_size: Option<usize>,
    max_value_size: Option<usize>,
    max_line_size: Option<usize>,
}

impl ConfigReaderBuilder {
    /// Sets the key length limit. Defaults to [`MAX_KEY_SIZE`].
    ///
    /// Longer keys are cut at a character boundary. A key is never cut below its first
    /// character, so a limit smaller than that character still yields a one character key.
    pub fn max_key_size(mut self, size: usize) -> Self {
        self.max_key_size = Some(size);
        self
    }

    /// Sets the value length limit. Defaults to [`MAX_VALUE_SIZE`].
    pub fn max_value_size(mut self, size: usize) -> Self {
        self.max_value_size = Some(size);
        self
    }

    /// Sets the line length limit, not counting the terminator.
    pub fn max_line_size(mut self, size: usize) -> Self {
        self.max_line_size = Some(size);
        self
    }

    /// Builds the [`ConfigReader`] with the configured limits.
    pub fn build(self) -> ConfigReader {
        let max_key_size = self.max_key_size.unwrap_or(MAX_KEY_SIZE).max(1);
        let max_value_size = self.max_value_size.unwrap_or(MAX_VALUE_SIZE).max(1);
        let max_line_size = self
            .max_line_size
            .unwrap_or(max_key_size.saturating_add(max_value_size))
            .max(1);

        ConfigReader {
            max_key_size,
            max_value_size,
            max_line_size,
        }
    }
}

/// Returns the first two whitespace separated tokens of `line`, if there are two.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line
        .split(|c: char| u8::try_from(c).is_ok_and(is_space))
        .filter(|token| !token.is_empty());

    let key = tokens.next()?;
    let value = tokens.next()?;

    Some((key, value))
}

/// Trims a candidate key, rejecting it if it's empty or a comment.
fn accept_key(key: &str) -> Option<&str> {
    let key = trim(key);

    if key.is_empty() || key.starts_with('#') {
        return None;
    }

    Some(key)
}

/// Cuts `token` down to at most `max` bytes without splitting a character.
///
/// The first character is always kept, even when it alone is wider than `max`.
#[expect(clippy::arithmetic_side_effects, reason = "Index 0 is always a boundary")]
fn truncate(token: &str, max: usize) -> &str {
    if token.len() <= max {
        return token;
    }

    let mut end = max;
    while !token.is_char_boundary(end) {
        end -= 1;
    }

    if end == 0 {
        end = token.chars().next().map_or(0, char::len_utf8);
    }

    token.get(..end).unwrap_or_default()
}
