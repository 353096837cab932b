// SPDX-License-Identifier: Apache-2.0

/// Outcome attached to every parsed value.
///
/// Malformed input is a normal outcome, not an error path: every parser
/// returns one of these alongside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseStatus {
    /// The value is exact.
    Success,
    /// The literal did not match the grammar. The value is zero.
    Failure,
    /// The magnitude did not fit the target. The value is saturated to the
    /// extreme of the correct sign.
    Overflow,
    /// More fractional digits than the target scale allows (decimals only).
    /// The value is the truncated or rounded approximation.
    Underflow,
}

/// A parsed value together with its [`ParseStatus`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub status: ParseStatus,
}

impl<T> Parsed<T> {
    pub const fn new(value: T, status: ParseStatus) -> Self {
        Self { value, status }
    }

    pub const fn success(value: T) -> Self {
        Self::new(value, ParseStatus::Success)
    }

    pub const fn overflow(value: T) -> Self {
        Self::new(value, ParseStatus::Overflow)
    }

    pub const fn underflow(value: T) -> Self {
        Self::new(value, ParseStatus::Underflow)
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }

    pub fn is_failure(&self) -> bool {
        self.status == ParseStatus::Failure
    }

    /// Applies `f` to the value, keeping the status.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        Parsed::new(f(self.value), self.status)
    }

    /// Treats anything other than [`ParseStatus::Success`] as an error.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self.status {
            ParseStatus::Success => Ok(self.value),
            other => Err(other.into()),
        }
    }

    /// Like [`Parsed::into_result`], but accepts an underflowed (rounded or
    /// truncated) value as a degraded success.
    pub fn into_lenient_result(self) -> Result<T, ParseError> {
        match self.status {
            ParseStatus::Success | ParseStatus::Underflow => Ok(self.value),
            other => Err(other.into()),
        }
    }
}

impl<T: Default> Parsed<T> {
    pub fn failure() -> Self {
        Self::new(T::default(), ParseStatus::Failure)
    }
}

/// Errors surfaced when a caller escalates a [`ParseStatus`] into a `Result`,
/// or hands in an unusable decimal shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a literal of the requested type.
    InvalidLiteral,
    /// The literal does not fit the target type or shape.
    Overflow,
    /// The literal has more fractional digits than the target scale.
    Underflow,
    /// A decimal shape with `precision < scale`, zero precision, or more
    /// digits than the storage width holds.
    InvalidShape { precision: u8, scale: u8 },
}

impl From<ParseStatus> for ParseError {
    fn from(status: ParseStatus) -> Self {
        match status {
            ParseStatus::Overflow => ParseError::Overflow,
            ParseStatus::Underflow => ParseError::Underflow,
            // Success never reaches here through the public conversions
            ParseStatus::Failure | ParseStatus::Success => ParseError::InvalidLiteral,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidLiteral => f.write_str("invalid literal"),
            ParseError::Overflow => f.write_str("value out of range for target type"),
            ParseError::Underflow => f.write_str("value has more fractional digits than target scale"),
            ParseError::InvalidShape { precision, scale } => {
                write!(f, "invalid decimal shape ({precision}, {scale})")
            }
        }
    }
}
