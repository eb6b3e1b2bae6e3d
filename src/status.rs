//! Status flags reported by operations.

use bitflags::bitflags;

bitflags! {
    /// Conditions raised while computing a result.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        /// The result is undefined, the value is NaN.
        const INVALID_OP = 1 << 0;

        /// A finite nonzero value was divided by zero.
        const DIV_BY_ZERO = 1 << 1;

        /// The exponent of the result exceeds the maximum exponent.
        const OVERFLOW = 1 << 2;

        /// The result is smaller than the smallest normal value.
        const UNDERFLOW = 1 << 3;

        /// The result is rounded.
        const INEXACT = 1 << 4;
    }
}

impl Status {
    /// No condition was raised.
    pub const OK: Status = Status::empty();

    /// Attaches the status to a value.
    pub fn and<T>(self, value: T) -> StatusAnd<T> {
        StatusAnd { status: self, value }
    }
}

/// A value together with the status of the operation that produced it.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAnd<T> {
    /// Conditions raised.
    pub status: Status,

    /// Result.
    pub value: T,
}

impl<T> StatusAnd<T> {
    /// Transforms the value keeping the status.
    pub fn map<F: FnOnce(T) -> U, U>(self, f: F) -> StatusAnd<U> {
        StatusAnd { status: self.status, value: f(self.value) }
    }

    /// Splits into the value and the status.
    pub fn into_parts(self) -> (T, Status) {
        (self.value, self.status)
    }
}

impl<T: Default> Default for StatusAnd<T> {
    fn default() -> Self {
        Status::OK.and(T::default())
    }
}

/// Extracts the value of a `StatusAnd`, merging its status into a local variable.
///
/// `unpack!(status |=, expr)` accumulates, `unpack!(status =, expr)` overwrites.
#[macro_export]
macro_rules! unpack {
    ($status:ident|=, $e:expr) => {
        match $e {
            $crate::StatusAnd { status, value } => {
                $status |= status;
                value
            }
        }
    };
    ($status:ident=, $e:expr) => {
        match $e {
            $crate::StatusAnd { status, value } => {
                $status = status;
                value
            }
        }
    };
}
