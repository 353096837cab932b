// SPDX-License-Identifier: Apache-2.0

//! Parsing of text spans into typed values for casts in query execution.
//!
//! Every parser takes a byte slice (no terminator needed) and returns a
//! [`Parsed`] value with a [`ParseStatus`]. Malformed input is reported, never
//! panicked on, and out-of-range values saturate:
//!
//! ```
//! use castparse::{parse_decimal, parse_int, ParseStatus, Parsed};
//!
//! assert_eq!(parse_int::<i8>(b" 300 "), Parsed::overflow(i8::MAX));
//!
//! let price = parse_decimal::<i128>(b"123.456", 5, 2, true);
//! assert_eq!(price.value.unscaled(), 12346);
//! assert_eq!(price.status, ParseStatus::Underflow);
//! ```
//!
//! Whitespace (space, `\t`, `\n`, `\v`, `\f`, `\r`) around a literal is
//! ignored. The crate is `no_std` and never allocates.

#![cfg_attr(not(test), no_std)]

// Compile-time configuration validation
mod config_check;

mod parse_error;
pub use parse_error::{ParseError, ParseStatus, Parsed};

pub mod whitespace;

mod int_parser;
pub use int_parser::{parse_int, parse_int_radix, ParseInt};

#[cfg(feature = "float")]
mod float_parser;
#[cfg(feature = "float")]
pub use float_parser::{parse_float, ParseFloat};

mod bool_parser;
pub use bool_parser::parse_bool;

mod decimal_storage;
pub use decimal_storage::DecimalStorage;

mod decimal_parser;
pub use decimal_parser::{
    decimal_shape, parse_decimal, parse_decimal_with_shape, DecimalDisplay, DecimalShape,
    DecimalValue,
};
