//! A reader for line-oriented `key value` configuration files.
//!
//! Every significant line of a file holds a key and a value separated by whitespace:
//!
//! ```text
//! # settings
//! name  Alice
//! age   30
//! ```
//!
//! Lines with fewer than two tokens are skipped, and so are lines whose key starts with `#`.
//! Anything after the second token is ignored. There's no quoting, nesting or type coercion;
//! values are always handed over as text.
//!
//! # Quick start
//!
//! ```
//! use cfg_reader::ConfigReader;
//!
//! let input = "# settings\nname  Alice\nage   30\n\n# trailing\n";
//! let mut pairs = Vec::new();
//!
//! ConfigReader::new()
//!     .read_from(input.as_bytes(), |key, value| {
//!         pairs.push((key.to_owned(), value.to_owned()));
//!     })
//!     .unwrap();
//!
//! assert_eq!(pairs, [
//!     ("name".to_owned(), "Alice".to_owned()),
//!     ("age".to_owned(), "30".to_owned()),
//! ]);
//! ```
//!
//! For files on disk, use [`read`] or [`ConfigReader::read`]. They fail with a [`ReadError`] if
//! the file is missing, can't be opened, or can't be read to the end.
//!
//! # Limits
//!
//! ```
//! use cfg_reader::ConfigReader;
//!
//! let reader = ConfigReader::builder()
//!     .max_key_size(32)      // keys are cut to 32 bytes
//!     .max_value_size(1024)  // values to 1 KiB
//!     .build();
//!
//! assert_eq!(reader.max_line_size(), 32 + 1024);
//! ```
//!
//! Oversized lines and tokens are truncated and a warning is logged through the [`log`] facade;
//! the scan itself never fails because of them.
//!
//! # Crate organisation
//!
//! - [`ConfigReader`] — the reader, holding its size limits.
//! - [`ConfigReaderBuilder`] — configures the limits before building a [`ConfigReader`].
//! - [`Entries`] — a lazy iterator over owned [`Entry`] values, as an alternative to callbacks.
//! - [`trim`] — the whitespace trimming used on keys.
//! - [`buffer::LineBuffer`] — the fixed-capacity line buffer behind every read.
//! - [`constants`] — the default limits.

pub mod buffer;
pub mod constants;
mod entries;
mod error;
mod reader;
pub mod trim;

pub use entries::{Entries, Entry};
pub use error::ReadError;
pub use reader::{ConfigReader, ConfigReaderBuilder, ReadSummary, entries, read};
