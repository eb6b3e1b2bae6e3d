//! Definitions.

use std::collections::TryReserveError;

use smallvec::CollectionAllocErr;
use thiserror::Error;

/// A word.
pub type Word = u64;

/// Doubled word.
pub type DoubleWord = u128;

/// Word with sign.
pub type SignedWord = i128;

/// An exponent.
pub type Exponent = i32;

/// Maximum exponent value.
pub const EXPONENT_MAX: Exponent = Exponent::MAX;

/// Minimum exponent value.
pub const EXPONENT_MIN: Exponent = Exponent::MIN;

/// Maximum value of a word.
pub const WORD_MAX: Word = Word::MAX;

/// Base of words.
pub const WORD_BASE: DoubleWord = WORD_MAX as DoubleWord + 1;

/// Size of a word in bits.
pub const WORD_BIT_SIZE: usize = core::mem::size_of::<Word>() * 8;

/// Word with the most significant bit set.
pub const WORD_SIGNIFICANT_BIT: Word = WORD_MAX << (WORD_BIT_SIZE - 1);

/// Minimum precision in bits accepted by the public interface.
pub const PRECISION_MIN: usize = 32;

/// Maximum precision in bits accepted by the public interface.
pub const PRECISION_MAX: usize = EXPONENT_MAX as usize;

/// Default precision of a `Context`.
pub const DEFAULT_P: usize = 64;

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    /// Negative.
    Neg = -1,

    /// Positive or zero.
    Pos = 1,
}

impl Sign {
    /// Changes the sign to the opposite.
    pub fn invert(&self) -> Self {
        match *self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Returns true if the sign is positive.
    pub fn is_positive(&self) -> bool {
        *self == Sign::Pos
    }

    /// Returns true if the sign is negative.
    pub fn is_negative(&self) -> bool {
        *self == Sign::Neg
    }

    /// Sign of a product or a quotient.
    pub(crate) fn mul(self, other: Sign) -> Sign {
        if self == other {
            Sign::Pos
        } else {
            Sign::Neg
        }
    }
}

/// Possible errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Exponent value becomes greater than the upper bound for exponent value.
    #[error("exponent overflow ({0:?})")]
    ExponentOverflow(Sign),

    /// Value becomes smaller than the smallest normal value.
    #[error("exponent underflow ({0:?})")]
    ExponentUnderflow(Sign),

    /// Divizor is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Argument is outside of the function's domain.
    #[error("invalid argument")]
    InvalidArgument,

    /// Requested precision is outside of [PRECISION_MIN, PRECISION_MAX].
    #[error("precision {0} is out of the supported range")]
    InvalidPrecision(usize),

    /// Malformed decimal text.
    #[error("failed to parse a number")]
    Parse,

    /// Numeric comparison involving NaN.
    #[error("NaN cannot be ordered numerically")]
    Unordered,

    /// Memory allocation error.
    #[error("memory allocation failure")]
    MemoryAllocation,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::MemoryAllocation
    }
}

impl From<CollectionAllocErr> for Error {
    fn from(_: CollectionAllocErr) -> Self {
        Error::MemoryAllocation
    }
}

/// Rounding modes.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum RoundingMode {
    /// Round toward positive infinity.
    Up,

    /// Round toward negative infinity.
    Down,

    /// Round toward zero.
    ToZero,

    /// Round away from zero.
    FromZero,

    /// Round to nearest, ties to even.
    ToEven,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::ToEven
    }
}

/// Returns an error if `p` can't be used as the precision of a result.
pub(crate) fn check_precision(p: usize) -> Result<(), Error> {
    if (PRECISION_MIN..=PRECISION_MAX).contains(&p) {
        Ok(())
    } else {
        Err(Error::InvalidPrecision(p))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_precision_range() {
        assert!(check_precision(PRECISION_MIN).is_ok());
        assert!(check_precision(1024).is_ok());
        assert_eq!(check_precision(31), Err(Error::InvalidPrecision(31)));
        assert_eq!(check_precision(0), Err(Error::InvalidPrecision(0)));
    }

    #[test]
    fn test_sign() {
        assert_eq!(Sign::Pos.invert(), Sign::Neg);
        assert_eq!(Sign::Neg.mul(Sign::Neg), Sign::Pos);
        assert_eq!(Sign::Neg.mul(Sign::Pos), Sign::Neg);
        assert!(Sign::Neg.is_negative());
    }
}
