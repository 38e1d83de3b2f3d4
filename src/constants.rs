//! Size limits for keys, values and lines.
//!
//! These are the defaults used by [`ConfigReader`](crate::ConfigReader) when no limit is set
//! through its builder. Anything longer than a limit is truncated, never rejected.
//!
//! # Invariant
//!
//! - `MAX_KEY_SIZE` and `MAX_VALUE_SIZE` are non-zero
//! - `MAX_LINE_SIZE == MAX_KEY_SIZE + MAX_VALUE_SIZE`, so a line holding a key and a value that
//!   both fit their own limit is never cut short by the line limit before its value starts

/// Maximum length of a key in bytes (256).
pub const MAX_KEY_SIZE: usize = 1 << 8;

/// Maximum length of a value in bytes (256).
pub const MAX_VALUE_SIZE: usize = 1 << 8;

/// Maximum length of a single line in bytes, not counting the line terminator.
///
/// Derived from [`MAX_KEY_SIZE`] and [`MAX_VALUE_SIZE`].
pub const MAX_LINE_SIZE: usize = MAX_KEY_SIZE + MAX_VALUE_SIZE;
