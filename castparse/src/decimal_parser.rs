// SPDX-License-Identifier: Apache-2.0

//! Fixed precision and scale decimal parsing.
//!
//! A literal is parsed into an unscaled integer that is matched against a
//! target `(precision, scale)`. Digits past the target precision are counted
//! but never accumulated, so the accumulator cannot overflow its storage.
//! The counts are used afterwards to classify the literal:
//!
//! * too many integer digits: [`ParseStatus::Overflow`], saturated to
//!   `±(10^precision - 1)`;
//! * too many fractional digits: [`ParseStatus::Underflow`], truncated or
//!   rounded half-up to the target scale;
//! * otherwise [`ParseStatus::Success`], scaled up to the target scale.
//!
//! Leading and trailing whitespace is ignored. An empty literal fails, a
//! lone `.` is zero and a trailing `.` is ignored.

use log::{debug, trace};

use crate::decimal_storage::DecimalStorage;
use crate::int_parser::parse_int_internal;
use crate::whitespace::{split_sign, trim_whitespace};
use crate::{ParseError, ParseStatus, Parsed};

/// An unscaled decimal. The scale lives with the caller's target type, so
/// the represented number is `unscaled × 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct DecimalValue<T = i128>(T);

impl<T: DecimalStorage> DecimalValue<T> {
    pub const fn new(unscaled: T) -> Self {
        Self(unscaled)
    }

    pub fn unscaled(self) -> T {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < T::ZERO
    }

    /// Formats the value as a plain decimal literal with `scale` fractional
    /// digits, e.g. unscaled `-1230` at scale 2 renders as `-12.30`.
    pub fn display(self, scale: u8) -> DecimalDisplay<T> {
        DecimalDisplay { value: self, scale }
    }
}

/// [`core::fmt::Display`] adapter returned by [`DecimalValue::display`].
#[derive(Debug, Clone, Copy)]
pub struct DecimalDisplay<T> {
    value: DecimalValue<T>,
    scale: u8,
}

impl<T: DecimalStorage> core::fmt::Display for DecimalDisplay<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let magnitude = self.value.0.unsigned_abs_u128();
        let sign = if self.value.is_negative() { "-" } else { "" };
        if self.scale == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        let (integral, fraction) = match 10u128.checked_pow(u32::from(self.scale)) {
            Some(divisor) => (magnitude / divisor, magnitude % divisor),
            None => (0, magnitude),
        };
        let width = usize::from(self.scale);
        write!(f, "{sign}{integral}.{fraction:0width$}")
    }
}

/// A validated target `(precision, scale)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalShape {
    precision: u8,
    scale: u8,
}

impl DecimalShape {
    /// Checks `1 <= precision <= T::MAX_PRECISION` and `scale <= precision`.
    pub fn new<T: DecimalStorage>(precision: u8, scale: u8) -> Result<Self, ParseError> {
        if precision == 0 || precision > T::MAX_PRECISION || scale > precision {
            return Err(ParseError::InvalidShape { precision, scale });
        }
        Ok(Self { precision, scale })
    }

    pub const fn precision(&self) -> u8 {
        self.precision
    }

    pub const fn scale(&self) -> u8 {
        self.scale
    }
}

/// Everything the scan learns about a literal before it is classified.
#[derive(Debug)]
struct Literal<T> {
    negative: bool,
    /// The first `min(total_digits, digit_cap)` significant digits.
    value: T,
    /// Significant digits seen, leading zeros excluded.
    total_digits: i32,
    /// Digits seen after the dot, leading zeros included.
    digits_after_dot: i32,
    exponent: i32,
    /// Only recorded when rounding was requested.
    first_truncated_digit: u8,
    found_value: bool,
    found_dot: bool,
}

impl<T: DecimalStorage> Literal<T> {
    /// Folds the exponent in and returns the literal's own
    /// `(precision, scale)`. A positive exponent beyond the fractional digits
    /// scales the accumulator up.
    fn apply_exponent(&mut self) -> (i32, i32) {
        if self.exponent > self.digits_after_dot {
            // 0.1e3 is 100: scale 0, precision 3
            let shift = self.exponent - self.digits_after_dot;
            self.value = self
                .value
                .saturating_mul(T::scale_multiplier(shift.unsigned_abs()));
            (self.total_digits + shift, 0)
        } else {
            // 100e-4 has scale 4; 0.001 has precision 1 but needs 3 for its scale
            let scale = self.digits_after_dot - self.exponent;
            (self.total_digits.max(scale), scale)
        }
    }

    fn is_empty(&self) -> bool {
        !self.found_value && !self.found_dot
    }
}

/// The scan stopped before classification.
#[derive(Debug)]
struct Rejected {
    status: ParseStatus,
    negative: bool,
}

fn scan_literal<T: DecimalStorage>(
    s: &[u8],
    digit_cap: u8,
    round: bool,
) -> Result<Literal<T>, Rejected> {
    let (negative, mut s) = split_sign(trim_whitespace(s));

    let mut found_value = false;
    while let [b'0', rest @ ..] = s {
        found_value = true;
        s = rest;
    }

    // Zeros right after the dot are not significant either, which tells
    // 0.01e2 (fits DECIMAL(1, 0)) apart from 0.10e2 (does not).
    let mut found_dot = false;
    let mut digits_after_dot = 0;
    if let [b'.', rest @ ..] = s {
        found_dot = true;
        s = rest;
        while let [b'0', rest @ ..] = s {
            found_value = true;
            digits_after_dot += 1;
            s = rest;
        }
    }

    let digit_cap = i32::from(digit_cap);
    let mut literal = Literal {
        negative,
        value: T::ZERO,
        total_digits: 0,
        digits_after_dot,
        exponent: 0,
        first_truncated_digit: 0,
        found_value,
        found_dot,
    };

    for (i, &c) in s.iter().enumerate() {
        match c {
            b'0'..=b'9' => {
                let digit = c - b'0';
                literal.found_value = true;
                if literal.total_digits < digit_cap {
                    literal.value = literal.value.mul10_add(digit);
                } else if round && literal.total_digits == digit_cap {
                    literal.first_truncated_digit = digit;
                }
                literal.total_digits += 1;
                if literal.found_dot {
                    literal.digits_after_dot += 1;
                }
            }
            b'.' if !literal.found_dot => literal.found_dot = true,
            b'e' | b'E' => {
                let exponent = parse_int_internal::<i8>(&s[i + 1..]);
                trace!("decimal exponent: {exponent:?}");
                return match exponent.status {
                    ParseStatus::Success => {
                        literal.exponent = i32::from(exponent.value);
                        Ok(literal)
                    }
                    // So many fractional digits that nothing is left
                    ParseStatus::Overflow if exponent.value < 0 => Err(Rejected {
                        status: ParseStatus::Underflow,
                        negative,
                    }),
                    status => Err(Rejected { status, negative }),
                };
            }
            _ => {
                return Err(Rejected {
                    status: ParseStatus::Failure,
                    negative,
                })
            }
        }
    }
    Ok(literal)
}

/// Parses a decimal literal into an unscaled value at the given target
/// `precision` and `scale`, rounding half-up instead of truncating excess
/// fractional digits when `round` is set.
///
/// Requires `scale <= precision <= T::MAX_PRECISION`; use [`DecimalShape`]
/// to check a shape up front.
pub fn parse_decimal<T: DecimalStorage>(
    s: &[u8],
    precision: u8,
    scale: u8,
    round: bool,
) -> Parsed<DecimalValue<T>> {
    debug_assert!(
        scale <= precision && precision <= T::MAX_PRECISION,
        "invalid decimal shape ({precision}, {scale})"
    );

    let mut literal = match scan_literal::<T>(s, precision, round) {
        Ok(literal) => literal,
        Err(Rejected { status, negative }) => {
            let value = match status {
                ParseStatus::Overflow => T::max_for_precision(precision),
                _ => T::ZERO,
            };
            let value = if negative { -value } else { value };
            return Parsed::new(DecimalValue(value), status);
        }
    };

    // Taken before the exponent changes the digit counts.
    let truncated_digit_count = (literal.total_digits - i32::from(precision)).max(0);
    let (literal_precision, literal_scale) = literal.apply_exponent();
    let target_precision = i32::from(precision);
    let target_scale = i32::from(scale);

    let mut value = literal.value;
    let status = if literal_precision - literal_scale > target_precision - target_scale {
        ParseStatus::Overflow
    } else if literal_scale > target_scale {
        // The accumulator holds fewer fractional digits than the literal when
        // the precision cap dropped some.
        let value_scale = literal_scale - truncated_digit_count;
        let shift = value_scale - target_scale;
        if shift > 0 {
            value = value.scale_down_and_round(shift.unsigned_abs(), round);
            ParseStatus::Underflow
        } else {
            // Every excess digit was dropped by the cap: round on the first one.
            if literal.first_truncated_digit >= 5 {
                value = value + T::ONE;
            }
            if value == T::scale_multiplier(u32::from(precision)) {
                debug!("decimal rounding carried past precision {precision}");
                ParseStatus::Overflow
            } else {
                ParseStatus::Underflow
            }
        }
    } else if literal.is_empty() {
        return Parsed::failure();
    } else {
        if target_scale > literal_scale {
            // No digits were truncated, so this stays within the precision.
            let shift = (target_scale - literal_scale).unsigned_abs();
            value = value.saturating_mul(T::scale_multiplier(shift));
        }
        ParseStatus::Success
    };

    if status == ParseStatus::Overflow {
        value = T::max_for_precision(precision);
    }
    let value = if literal.negative { -value } else { value };
    Parsed::new(DecimalValue(value), status)
}

/// [`parse_decimal`] with a pre-validated shape.
pub fn parse_decimal_with_shape<T: DecimalStorage>(
    s: &[u8],
    shape: DecimalShape,
    round: bool,
) -> Parsed<DecimalValue<T>> {
    parse_decimal::<T>(s, shape.precision, shape.scale, round)
}

/// Infers the smallest shape that holds the literal exactly: `0.01` is
/// `(2, 2)`, `123.45` is `(5, 2)`, `1e3` is `(4, 0)`.
///
/// Literals that need more than 38 digits report [`ParseStatus::Overflow`]
/// with the precision capped at 38.
pub fn decimal_shape(s: &[u8]) -> Parsed<DecimalShape> {
    const MAX_PRECISION: u8 = <i128 as DecimalStorage>::MAX_PRECISION;

    let mut literal = match scan_literal::<i128>(s, MAX_PRECISION, false) {
        Ok(literal) => literal,
        Err(Rejected { status, .. }) => return Parsed::new(DecimalShape::default(), status),
    };
    if literal.is_empty() {
        return Parsed::failure();
    }
    let (precision, scale) = literal.apply_exponent();
    let cap = i32::from(MAX_PRECISION);
    let shape = DecimalShape {
        precision: precision.clamp(1, cap) as u8,
        scale: scale.clamp(0, cap) as u8,
    };
    if precision > cap {
        Parsed::overflow(shape)
    } else {
        Parsed::success(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn dec(s: &str, precision: u8, scale: u8, round: bool) -> Parsed<i128> {
        parse_decimal::<i128>(s.as_bytes(), precision, scale, round).map(DecimalValue::unscaled)
    }

    #[test]
    fn test_exact_literals() {
        assert_eq!(dec("0.01", 2, 2, false), Parsed::success(1));
        assert_eq!(dec("123.45", 5, 2, false), Parsed::success(12345));
        assert_eq!(dec("-123.45", 5, 2, false), Parsed::success(-12345));
        assert_eq!(dec("+7", 1, 0, false), Parsed::success(7));
        assert_eq!(dec("007.50", 4, 2, false), Parsed::success(750));
    }

    #[test]
    fn test_scale_up() {
        assert_eq!(dec("1.5", 10, 3, false), Parsed::success(1500));
        assert_eq!(dec("42", 10, 4, false), Parsed::success(420_000));
        assert_eq!(dec("-0.5", 3, 2, false), Parsed::success(-50));
    }

    #[test]
    fn test_special_literals() {
        assert_eq!(dec("", 5, 2, false), Parsed::failure());
        assert_eq!(dec("   ", 5, 2, false), Parsed::failure());
        assert_eq!(dec("-", 5, 2, false), Parsed::failure());
        assert_eq!(dec(".", 5, 2, false), Parsed::success(0));
        assert_eq!(dec("12.", 5, 2, false), Parsed::success(1200));
        assert_eq!(dec("  12.5 \t", 5, 2, false), Parsed::success(1250));
        assert_eq!(dec("0", 5, 2, false), Parsed::success(0));
        assert_eq!(dec("-0.00", 5, 2, false), Parsed::success(0));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(dec("1.2.3", 5, 2, false), Parsed::failure());
        assert_eq!(dec("1 2", 5, 2, false), Parsed::failure());
        assert_eq!(dec("abc", 5, 2, false), Parsed::failure());
        assert_eq!(dec("1,5", 5, 2, false), Parsed::failure());
        assert_eq!(dec("--1", 5, 2, false), Parsed::failure());
        assert_eq!(dec("1e", 5, 2, false), Parsed::failure());
        assert_eq!(dec("1e1.5", 5, 2, false), Parsed::failure());
        assert_eq!(dec("1e 2", 5, 2, false), Parsed::failure());
    }

    #[test]
    fn test_integer_side_overflow_saturates() {
        assert_eq!(dec("12345", 4, 0, false), Parsed::overflow(9999));
        assert_eq!(dec("-12345", 4, 0, false), Parsed::overflow(-9999));
        assert_eq!(dec("100", 4, 2, false), Parsed::overflow(9999));
        assert_eq!(dec("0.10e2", 1, 0, true), Parsed::overflow(9));
    }

    #[test]
    fn test_underflow_truncates_or_rounds() {
        assert_eq!(dec("123.456", 5, 2, true), Parsed::underflow(12346));
        assert_eq!(dec("123.456", 5, 2, false), Parsed::underflow(12345));
        assert_eq!(dec("1.2345", 10, 2, false), Parsed::underflow(123));
        assert_eq!(dec("1.235", 10, 2, true), Parsed::underflow(124));
        assert_eq!(dec("-1.235", 10, 2, true), Parsed::underflow(-124));
        assert_eq!(dec("1.234", 10, 2, true), Parsed::underflow(123));
    }

    #[test]
    fn test_underflow_with_insignificant_fraction() {
        // The 1 and 0 land on the far side of the dot once leading zeros are dropped.
        assert_eq!(dec("0.10", 1, 0, true), Parsed::underflow(0));
        assert_eq!(dec("0.5", 1, 0, true), Parsed::underflow(1));
        assert_eq!(dec("0.4", 1, 0, true), Parsed::underflow(0));
    }

    #[test]
    fn test_rounding_overflow() {
        assert_eq!(dec("999.995", 5, 2, true), Parsed::overflow(99999));
        assert_eq!(dec("-999.995", 5, 2, true), Parsed::overflow(-99999));
        assert_eq!(dec("999.995", 5, 2, false), Parsed::underflow(99999));
        assert_eq!(dec("999.994", 5, 2, true), Parsed::underflow(99999));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(dec("1e5", 10, 0, false), Parsed::success(100_000));
        assert_eq!(dec("1e5", 10, 2, false), Parsed::success(10_000_000));
        assert_eq!(dec("1.5e1", 3, 1, false), Parsed::success(150));
        assert_eq!(dec("0.01e2", 1, 0, false), Parsed::success(1));
        assert_eq!(dec("1e-2", 5, 2, false), Parsed::success(1));
        assert_eq!(dec("125E-2", 5, 2, false), Parsed::success(125));
        assert_eq!(dec("1e5", 5, 0, false), Parsed::overflow(99_999));
        assert_eq!(dec("1.26e-1", 5, 2, true), Parsed::underflow(13));
    }

    #[test]
    fn test_exponent_out_of_range() {
        assert_eq!(dec("1e200", 10, 0, false), Parsed::overflow(9_999_999_999));
        assert_eq!(dec("-1e200", 10, 0, false), Parsed::overflow(-9_999_999_999));
        assert_eq!(dec("1e-200", 10, 2, false), Parsed::underflow(0));
    }

    #[test]
    fn test_precision_cap_keeps_accumulator_small() {
        // Eleven significant digits into DECIMAL(1, 0): only the first is accumulated.
        assert_eq!(dec("10000000000e-10", 1, 0, false), Parsed::underflow(1));
        let long = format!("0.{}", "3".repeat(60));
        assert_eq!(
            dec(&long, 38, 38, false),
            Parsed::underflow(33_333_333_333_333_333_333_333_333_333_333_333_333)
        );
    }

    #[test]
    fn test_other_storage_widths() {
        let parsed = parse_decimal::<i64>(b"-12.345", 18, 3, false);
        assert_eq!(parsed, Parsed::success(DecimalValue::new(-12_345i64)));
        let parsed = parse_decimal::<i32>(b"1234567890", 9, 0, false);
        assert_eq!(parsed, Parsed::overflow(DecimalValue::new(999_999_999i32)));
    }

    #[test]
    fn test_display() {
        assert_eq!(DecimalValue::new(-1230i128).display(2).to_string(), "-12.30");
        assert_eq!(DecimalValue::new(5i64).display(3).to_string(), "0.005");
        assert_eq!(DecimalValue::new(42i32).display(0).to_string(), "42");
        assert_eq!(DecimalValue::new(0i128).display(2).to_string(), "0.00");
    }

    #[test]
    fn test_shape_validation() {
        assert!(DecimalShape::new::<i128>(38, 10).is_ok());
        assert_eq!(
            DecimalShape::new::<i128>(39, 0),
            Err(ParseError::InvalidShape { precision: 39, scale: 0 })
        );
        assert_eq!(
            DecimalShape::new::<i64>(19, 0),
            Err(ParseError::InvalidShape { precision: 19, scale: 0 })
        );
        assert!(DecimalShape::new::<i64>(4, 5).is_err());
        assert!(DecimalShape::new::<i64>(0, 0).is_err());
    }

    #[test]
    fn test_parse_with_shape() {
        let shape = DecimalShape::new::<i64>(6, 2).unwrap();
        assert_eq!(
            parse_decimal_with_shape::<i64>(b"1234.5", shape, false),
            Parsed::success(DecimalValue::new(123_450))
        );
    }

    #[test]
    fn test_decimal_shape() {
        let shape = |s: &str| decimal_shape(s.as_bytes()).map(|d| (d.precision(), d.scale()));
        assert_eq!(shape("0.01"), Parsed::success((2, 2)));
        assert_eq!(shape("123.45"), Parsed::success((5, 2)));
        assert_eq!(shape("-00123"), Parsed::success((3, 0)));
        assert_eq!(shape("1e3"), Parsed::success((4, 0)));
        assert_eq!(shape("125e-4"), Parsed::success((4, 4)));
        assert_eq!(shape("."), Parsed::success((1, 0)));
        assert_eq!(shape("0"), Parsed::success((1, 0)));
        assert_eq!(shape("1e100"), Parsed::overflow((38, 0)));
        assert_eq!(shape(""), Parsed::failure());
        assert_eq!(shape("x"), Parsed::failure());
    }
}
