// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! The per-width tables drive the overflow-free fast paths, so a wrong entry
//! would silently wrap instead of saturating. These checks keep them in step
//! with the primitive types' limits.

use crate::decimal_storage::DecimalStorage;
use crate::int_parser::ParseInt;

// Literal length of each integer width: digits of MAX, sign excluded
const _: () = {
    assert!(<i8 as ParseInt>::MAX_ASCII_LEN == i8::MAX.ilog10() as usize + 1);
    assert!(<i16 as ParseInt>::MAX_ASCII_LEN == i16::MAX.ilog10() as usize + 1);
    assert!(<i32 as ParseInt>::MAX_ASCII_LEN == i32::MAX.ilog10() as usize + 1);
    assert!(<i64 as ParseInt>::MAX_ASCII_LEN == i64::MAX.ilog10() as usize + 1);
    // The fast path accumulates up to MAX_ASCII_LEN - 1 digits in a u64.
    assert!(<i64 as ParseInt>::MAX_ASCII_LEN - 1 <= u64::MAX.ilog10() as usize);
};

// Decimal precision of each storage width: 10^p must be representable
const _: () = {
    assert!(<i32 as DecimalStorage>::MAX_PRECISION as u32 == i32::MAX.ilog10());
    assert!(<i64 as DecimalStorage>::MAX_PRECISION as u32 == i64::MAX.ilog10());
    assert!(<i128 as DecimalStorage>::MAX_PRECISION as u32 == i128::MAX.ilog10());
};
