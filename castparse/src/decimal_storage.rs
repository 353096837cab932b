// SPDX-License-Identifier: Apache-2.0

//! Fixed-width arithmetic for unscaled decimal accumulators.
//!
//! Keeps the power-of-ten tables and the rounding divide out of the decimal
//! parser. Everything here works on non-negative magnitudes; the parser
//! applies the sign last.

use core::ops::{Add, Neg, Sub};

/// Signed integer storage for an unscaled decimal value.
pub trait DecimalStorage:
    Copy
    + Default
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + core::fmt::Debug
    + core::fmt::Display
{
    /// Most decimal digits this width can hold at every value.
    const MAX_PRECISION: u8;
    const ZERO: Self;
    const ONE: Self;

    /// `self * 10 + digit`. The parser bounds the digit count by the target
    /// precision, so this does not overflow for valid shapes; it wraps rather
    /// than panics if a caller passes an oversized precision.
    fn mul10_add(self, digit: u8) -> Self;

    /// `10^exp`, saturating to `Self::MAX` above [`Self::MAX_PRECISION`].
    fn scale_multiplier(exp: u32) -> Self;

    fn saturating_mul(self, rhs: Self) -> Self;

    /// Divides a non-negative magnitude by `10^shift`. With `round`, a dropped
    /// remainder of at least half rounds up.
    fn scale_down_and_round(self, shift: u32, round: bool) -> Self;

    /// Magnitude without sign, widened for formatting.
    fn unsigned_abs_u128(self) -> u128;

    /// Largest magnitude with `precision` digits, `10^precision - 1`.
    #[inline]
    fn max_for_precision(precision: u8) -> Self {
        Self::scale_multiplier(u32::from(precision)) - Self::ONE
    }
}

macro_rules! impl_decimal_storage {
    ($int_ty:ty, $max_precision:literal) => {
        impl DecimalStorage for $int_ty {
            const MAX_PRECISION: u8 = $max_precision;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn mul10_add(self, digit: u8) -> Self {
                self.wrapping_mul(10).wrapping_add(<$int_ty>::from(digit))
            }

            #[inline]
            fn scale_multiplier(exp: u32) -> Self {
                const POW10: [$int_ty; $max_precision + 1] = {
                    let mut table = [1; $max_precision + 1];
                    let mut i = 1;
                    while i < table.len() {
                        table[i] = table[i - 1] * 10;
                        i += 1;
                    }
                    table
                };
                match POW10.get(exp as usize) {
                    Some(&multiplier) => multiplier,
                    None => <$int_ty>::MAX,
                }
            }

            #[inline]
            fn saturating_mul(self, rhs: Self) -> Self {
                <$int_ty>::saturating_mul(self, rhs)
            }

            fn scale_down_and_round(self, shift: u32, round: bool) -> Self {
                if shift > u32::from(Self::MAX_PRECISION) {
                    // Any stored magnitude is below a tenth of 10^shift.
                    return 0;
                }
                let divisor = Self::scale_multiplier(shift);
                let quotient = self / divisor;
                if round && shift > 0 && self % divisor >= divisor / 2 {
                    quotient + 1
                } else {
                    quotient
                }
            }

            #[inline]
            fn unsigned_abs_u128(self) -> u128 {
                u128::from(self.unsigned_abs())
            }
        }
    };
}

impl_decimal_storage!(i32, 9);
impl_decimal_storage!(i64, 18);
impl_decimal_storage!(i128, 38);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_multiplier() {
        assert_eq!(<i32 as DecimalStorage>::scale_multiplier(0), 1);
        assert_eq!(<i32 as DecimalStorage>::scale_multiplier(9), 1_000_000_000);
        assert_eq!(<i32 as DecimalStorage>::scale_multiplier(10), i32::MAX);
        assert_eq!(<i64 as DecimalStorage>::scale_multiplier(18), 10i64.pow(18));
        assert_eq!(<i128 as DecimalStorage>::scale_multiplier(38), 10i128.pow(38));
        assert_eq!(<i128 as DecimalStorage>::scale_multiplier(39), i128::MAX);
    }

    #[test]
    fn test_max_for_precision() {
        assert_eq!(<i64 as DecimalStorage>::max_for_precision(1), 9);
        assert_eq!(<i64 as DecimalStorage>::max_for_precision(5), 99_999);
        assert_eq!(
            <i128 as DecimalStorage>::max_for_precision(38),
            10i128.pow(38) - 1
        );
    }

    #[test]
    fn test_mul10_add() {
        let value = 0i64.mul10_add(1).mul10_add(2).mul10_add(3);
        assert_eq!(value, 123);
    }

    #[test]
    fn test_scale_down_truncates() {
        assert_eq!(12_345i64.scale_down_and_round(2, false), 123);
        assert_eq!(12_399i64.scale_down_and_round(2, false), 123);
        assert_eq!(12_345i64.scale_down_and_round(0, true), 12_345);
    }

    #[test]
    fn test_scale_down_rounds_half_up() {
        assert_eq!(12_349i64.scale_down_and_round(2, true), 123);
        assert_eq!(12_350i64.scale_down_and_round(2, true), 124);
        assert_eq!(1_235i128.scale_down_and_round(1, true), 124);
        assert_eq!(5i32.scale_down_and_round(1, true), 1);
        assert_eq!(4i32.scale_down_and_round(1, true), 0);
    }

    #[test]
    fn test_scale_down_beyond_width() {
        let big = 10i128.pow(38) - 1;
        assert_eq!(big.scale_down_and_round(39, true), 0);
        assert_eq!(big.scale_down_and_round(100, false), 0);
        assert_eq!(big.scale_down_and_round(38, true), 1);
    }

    #[test]
    fn test_unsigned_abs() {
        assert_eq!((-42i32).unsigned_abs_u128(), 42);
        assert_eq!(i128::MIN.unsigned_abs_u128(), 1u128 << 127);
    }
}
