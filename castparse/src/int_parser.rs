// SPDX-License-Identifier: Apache-2.0

//! Saturating integer parsing for base 10 and bases 2 through 36.
//!
//! Both entry points first parse assuming there is no leading whitespace and
//! only retry after skipping it when that attempt did not succeed, so padded
//! input costs a second pass while the common case stays branch-light.
//! Trailing whitespace is always accepted. Out-of-range literals saturate to
//! the type's minimum or maximum and report [`ParseStatus::Overflow`].

use log::warn;

use crate::whitespace::{is_all_whitespace, retry_after_leading_whitespace, split_sign};
use crate::{ParseStatus, Parsed};

/// Signed integer widths the parsers can produce.
///
/// Digits accumulate as an unsigned `u64` magnitude. The width only supplies
/// its limits and the final narrowing.
pub trait ParseInt: Copy + Default + PartialEq + core::fmt::Debug {
    /// Number of digits in the longest literal of this width, sign excluded.
    /// Any shorter run of digits cannot overflow.
    const MAX_ASCII_LEN: usize;
    /// `Self::MAX` as an unsigned magnitude.
    const MAX_MAGNITUDE: u64;

    /// Builds a value from a magnitude in `0..=MAX_MAGNITUDE + 1`, where the
    /// extra one is only valid together with `negative`.
    fn from_magnitude(magnitude: u64, negative: bool) -> Self;
}

macro_rules! impl_parse_int {
    ($int_ty:ty, $max_len:expr) => {
        impl ParseInt for $int_ty {
            const MAX_ASCII_LEN: usize = $max_len;
            const MAX_MAGNITUDE: u64 = <$int_ty>::MAX as u64;

            #[inline]
            fn from_magnitude(magnitude: u64, negative: bool) -> Self {
                // MAX + 1 narrows to MIN, which is its own wrapping negation.
                let value = magnitude as $int_ty;
                if negative {
                    value.wrapping_neg()
                } else {
                    value
                }
            }
        }
    };
}

impl_parse_int!(i8, 3);
impl_parse_int!(i16, 5);
impl_parse_int!(i32, 10);
impl_parse_int!(i64, 19);

/// Parses a base-10 integer, saturating on overflow.
pub fn parse_int<T: ParseInt>(s: &[u8]) -> Parsed<T> {
    retry_after_leading_whitespace(s, "parse_int", parse_int_internal::<T>)
}

/// Parses an integer written in `base` (2 through 36). Letters of either case
/// are digits 10 to 35. A base outside that range is a [`ParseStatus::Failure`].
pub fn parse_int_radix<T: ParseInt>(s: &[u8], base: u32) -> Parsed<T> {
    retry_after_leading_whitespace(s, "parse_int_radix", |s| {
        parse_int_radix_internal::<T>(s, base)
    })
}

#[inline]
fn decimal_digit(c: u8) -> Option<u64> {
    if c.is_ascii_digit() {
        Some(u64::from(c - b'0'))
    } else {
        None
    }
}

/// Single pass without the whitespace retry. Leading whitespace fails.
pub(crate) fn parse_int_internal<T: ParseInt>(s: &[u8]) -> Parsed<T> {
    if s.is_empty() {
        return Parsed::failure();
    }
    let (negative, digits) = split_sign(s);
    // Negative literals may reach one past MAX.
    let max_val = T::MAX_MAGNITUDE + u64::from(negative);

    if digits.len() < T::MAX_ASCII_LEN {
        return parse_magnitude_no_overflow(digits).map(|val| T::from_magnitude(val, negative));
    }

    let max_div_10 = max_val / 10;
    let max_mod_10 = max_val % 10;

    let mut val: u64 = 0;
    for (i, &c) in digits.iter().enumerate() {
        match decimal_digit(c) {
            Some(digit) => {
                // Check before accumulating so the in-range path never wraps.
                if val > max_div_10 || (val == max_div_10 && digit > max_mod_10) {
                    return Parsed::overflow(T::from_magnitude(max_val, negative));
                }
                val = val * 10 + digit;
            }
            None => {
                if i == 0 || !is_all_whitespace(&digits[i..]) {
                    return Parsed::failure();
                }
                return Parsed::success(T::from_magnitude(val, negative));
            }
        }
    }
    Parsed::success(T::from_magnitude(val, negative))
}

/// Digit runs shorter than the width's maximum literal length.
fn parse_magnitude_no_overflow(s: &[u8]) -> Parsed<u64> {
    let Some((&first, rest)) = s.split_first() else {
        // Sign without digits
        return Parsed::failure();
    };
    let mut val = match decimal_digit(first) {
        Some(digit) => digit,
        None => return Parsed::failure(),
    };
    for (i, &c) in rest.iter().enumerate() {
        match decimal_digit(c) {
            Some(digit) => val = val * 10 + digit,
            None => {
                if !is_all_whitespace(&rest[i..]) {
                    return Parsed::failure();
                }
                return Parsed::success(val);
            }
        }
    }
    Parsed::success(val)
}

fn parse_int_radix_internal<T: ParseInt>(s: &[u8], base: u32) -> Parsed<T> {
    if !(2..=36).contains(&base) {
        warn!("parse_int_radix: unsupported base {base}");
        return Parsed::failure();
    }
    if s.is_empty() {
        return Parsed::failure();
    }
    let (negative, digits) = split_sign(s);
    let max_val = T::MAX_MAGNITUDE + u64::from(negative);
    let base = u64::from(base);
    let max_div_base = max_val / base;
    let max_mod_base = max_val % base;

    let mut val: u64 = 0;
    let mut consumed = 0;
    for &c in digits {
        // A digit at or above the base ends the literal like any other byte.
        let digit = match char::from(c).to_digit(36).map(u64::from) {
            Some(digit) if digit < base => digit,
            _ => break,
        };
        if val > max_div_base || (val == max_div_base && digit > max_mod_base) {
            return Parsed::overflow(T::from_magnitude(max_val, negative));
        }
        val = val * base + digit;
        consumed += 1;
    }

    if consumed == 0 || !is_all_whitespace(&digits[consumed..]) {
        return Parsed::failure();
    }
    Parsed::new(T::from_magnitude(val, negative), ParseStatus::Success)
}
