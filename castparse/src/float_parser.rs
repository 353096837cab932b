// SPDX-License-Identifier: Apache-2.0

//! Floating point parsing.
//!
//! Plain `123.456` literals are accumulated by hand, which is much faster than
//! a general conversion. Literals with an exponent fall back to the standard
//! library's correctly rounded `FromStr`, since exponent scaling by hand loses
//! precision. Overflow needs no special handling: the value becomes infinite.

use core::ops::Neg;
use core::str::FromStr;

use log::trace;

use crate::bool_parser::strip_prefix_ignore_case;
use crate::whitespace::{
    is_all_whitespace, retry_after_leading_whitespace, split_sign, trim_whitespace,
};
use crate::{ParseStatus, Parsed};

/// Significant fractional digits folded into the `i64` remainder. A double
/// holds 15 to 17 significant digits; one more gets the rounding right, and
/// any more would overflow the remainder.
const MAX_FRACTION_SIG_FIGS: u32 = 18;

/// Floating point widths the parser can produce.
pub trait ParseFloat: Copy + Default + PartialEq + FromStr + Neg<Output = Self> + core::fmt::Debug {
    const INFINITY: Self;
    const NAN: Self;

    /// Narrows the `f64` accumulator to this width.
    fn from_f64(value: f64) -> Self;

    fn is_infinite(self) -> bool;
}

impl ParseFloat for f32 {
    const INFINITY: Self = f32::INFINITY;
    const NAN: Self = f32::NAN;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl ParseFloat for f64 {
    const INFINITY: Self = f64::INFINITY;
    const NAN: Self = f64::NAN;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

/// Parses a float. `inf`, `infinity` and `nan` are accepted in any case, with
/// an optional sign. A result that is infinite without being spelled as
/// infinity reports [`ParseStatus::Overflow`]; there is no underflow.
pub fn parse_float<T: ParseFloat>(s: &[u8]) -> Parsed<T> {
    retry_after_leading_whitespace(s, "parse_float", parse_float_internal::<T>)
}

/// Matches `inf` or `infinity` followed only by whitespace.
fn is_infinity(s: &[u8]) -> bool {
    match strip_prefix_ignore_case(s, b"inf") {
        Some(rest) => {
            let rest = strip_prefix_ignore_case(rest, b"inity").unwrap_or(rest);
            is_all_whitespace(rest)
        }
        None => false,
    }
}

fn is_nan(s: &[u8]) -> bool {
    strip_prefix_ignore_case(s, b"nan").is_some_and(is_all_whitespace)
}

fn parse_float_internal<T: ParseFloat>(s: &[u8]) -> Parsed<T> {
    if s.is_empty() {
        return Parsed::failure();
    }
    let (negative, body) = split_sign(s);
    let signed = |value: T| if negative { -value } else { value };

    if is_infinity(body) {
        return Parsed::success(signed(T::INFINITY));
    }
    if is_nan(body) {
        return Parsed::success(signed(T::NAN));
    }

    // f64 keeps precision while accumulating, whatever the target width.
    let mut val: f64 = 0.0;
    let mut divide: f64 = 1.0;
    let mut remainder: i64 = 0;
    let mut decimal = false;
    let mut found_digit = false;
    // Digits seen after leading zeros. Trailing zeros count too, which is harmless.
    let mut sig_figs: u32 = 0;
    let mut scientific = false;

    for (i, &c) in body.iter().enumerate() {
        match c {
            b'0'..=b'9' => {
                let digit = c - b'0';
                found_digit = true;
                if digit != 0 || sig_figs > 0 {
                    sig_figs += 1;
                }
                if decimal {
                    if sig_figs <= MAX_FRACTION_SIG_FIGS {
                        remainder = remainder * 10 + i64::from(digit);
                        divide *= 10.0;
                    }
                } else {
                    val = val * 10.0 + f64::from(digit);
                }
            }
            b'.' if !decimal => decimal = true,
            b'e' | b'E' => {
                scientific = true;
                break;
            }
            _ => {
                if i == 0 || !is_all_whitespace(&body[i..]) {
                    return Parsed::failure();
                }
                break;
            }
        }
    }

    let value = if scientific {
        match parse_scientific::<T>(body) {
            Some(value) => value,
            None => return Parsed::failure(),
        }
    } else {
        if !found_digit && !decimal {
            // Sign only
            return Parsed::failure();
        }
        T::from_f64(val + remainder as f64 / divide)
    };

    let status = if value.is_infinite() {
        ParseStatus::Overflow
    } else {
        ParseStatus::Success
    };
    Parsed::new(signed(value), status)
}

/// Reparses a sign-stripped literal that has an exponent.
fn parse_scientific<T: ParseFloat>(body: &[u8]) -> Option<T> {
    trace!("parse_float: exponent present, using FromStr on {} bytes", body.len());
    let literal = core::str::from_utf8(trim_whitespace(body)).ok()?;
    T::from_str(literal).ok()
}
