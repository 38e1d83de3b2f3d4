//! Whitespace trimming.
//!
//! Whitespace here is the set recognised by C's `isspace` in the default locale: space, tab,
//! line feed, vertical tab, form feed and carriage return. Note that this is one byte wider than
//! [`u8::is_ascii_whitespace`], which leaves out the vertical tab (`0x0B`).
//!
//! # Example
//!
//! ```
//! use cfg_reader::trim::trim;
//!
//! assert_eq!(trim("  key\t\r\n"), "key");
//! assert_eq!(trim(" \x0b "), "");
//! ```

use std::ops::Range;

/// Returns `true` if `byte` is a whitespace byte.
///
/// # Examples
///
/// ```
/// # use cfg_reader::trim::is_space;
/// assert!(is_space(b' '));
/// assert!(is_space(0x0b)); // vertical tab
/// assert!(!is_space(b'#'));
/// ```
#[inline]
pub const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Returns the sub-slice of `s` without leading and trailing whitespace.
///
/// Only the ASCII bytes accepted by [`is_space`] are removed, so the cut always falls on a
/// character boundary.
///
/// # Examples
///
/// ```
/// # use cfg_reader::trim::trim;
/// assert_eq!(trim("  spaced_key  "), "spaced_key");
/// assert_eq!(trim(trim(" once ")), "once");
/// ```
pub fn trim(s: &str) -> &str {
    s.get(trimmed_range(s.as_bytes())).unwrap_or_default()
}

/// Index range of `bytes` left after trimming. Empty when `bytes` is all whitespace.
#[expect(clippy::arithmetic_side_effects, reason = "end < bytes.len()")]
fn trimmed_range(bytes: &[u8]) -> Range<usize> {
    let Some(start) = bytes.iter().position(|&b| !is_space(b)) else {
        // Nothing but whitespace
        return 0..0;
    };

    // There's at least one non-space byte, so this always finds one at or after `start`
    let end = bytes.iter().rposition(|&b| !is_space(b)).unwrap_or(start);

    start..end + 1
}
