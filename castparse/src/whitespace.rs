// SPDX-License-Identifier: Apache-2.0

//! Whitespace and sign scanning shared by all parsers.

use log::trace;

use crate::Parsed;

/// Space, tab, newline, vertical tab, form feed or carriage return.
#[inline]
pub const fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Index of the first non-whitespace byte, or `s.len()` if there is none.
#[inline]
pub fn skip_leading_whitespace(s: &[u8]) -> usize {
    s.iter().position(|&c| !is_whitespace(c)).unwrap_or(s.len())
}

/// True if `s` is empty or holds only whitespace.
#[inline]
pub fn is_all_whitespace(s: &[u8]) -> bool {
    s.iter().all(|&c| is_whitespace(c))
}

/// Strips whitespace from both ends.
pub fn trim_whitespace(s: &[u8]) -> &[u8] {
    let start = skip_leading_whitespace(s);
    let rest = &s[start..];
    let end = rest
        .iter()
        .rposition(|&c| !is_whitespace(c))
        .map_or(0, |i| i + 1);
    &rest[..end]
}

/// Splits off a leading `+` or `-`. Returns `(is_negative, rest)`.
#[inline]
pub(crate) fn split_sign(s: &[u8]) -> (bool, &[u8]) {
    match s {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, s),
    }
}

/// Runs `parse` on `s` and, if that does not succeed, once more after
/// skipping leading whitespace. Unpadded input pays for a single pass.
#[inline]
pub(crate) fn retry_after_leading_whitespace<T>(
    s: &[u8],
    what: &str,
    parse: impl Fn(&[u8]) -> Parsed<T>,
) -> Parsed<T> {
    let parsed = parse(s);
    if parsed.is_success() {
        return parsed;
    }
    let start = skip_leading_whitespace(s);
    if start == 0 {
        return parsed;
    }
    trace!("{what}: retrying after {start} bytes of leading whitespace");
    parse(&s[start..])
}
