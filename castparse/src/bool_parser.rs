// SPDX-License-Identifier: Apache-2.0

use crate::whitespace::{is_all_whitespace, retry_after_leading_whitespace};
use crate::Parsed;

/// Parses `true` or `false`, case-insensitively. Only whitespace may surround
/// the token.
pub fn parse_bool(s: &[u8]) -> Parsed<bool> {
    retry_after_leading_whitespace(s, "parse_bool", parse_bool_internal)
}

fn parse_bool_internal(s: &[u8]) -> Parsed<bool> {
    if let Some(rest) = strip_prefix_ignore_case(s, b"true") {
        if is_all_whitespace(rest) {
            return Parsed::success(true);
        }
    } else if let Some(rest) = strip_prefix_ignore_case(s, b"false") {
        if is_all_whitespace(rest) {
            return Parsed::success(false);
        }
    }
    Parsed::failure()
}

/// `s` without `prefix` if it starts with it, ASCII case ignored.
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
