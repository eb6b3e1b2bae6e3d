//! BigFloat including finite numbers, signed zeroes, infinities, and `NaN`.

use crate::common::consts::ONE;
use crate::defs::check_precision;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::util::pi_pow2;
use crate::parser::ParsedKind;
use crate::status::Status;
use crate::status::StatusAnd;
use crate::strop::precision_for_digits;
use crate::unpack;
use core::cmp::Ordering;
use core::fmt::Display;
use core::fmt::Formatter;
use core::ops::Deref;
use core::str::FromStr;

#[cfg(feature = "random")]
use {
    crate::common::util::words_for,
    crate::defs::{WORD_MAX, WORD_SIGNIFICANT_BIT},
    rand::random,
    rand::Rng,
};

/// Not a number.
pub const NAN: BigFloat = BigFloat { inner: Flavor::NaN };

/// Positive infinity.
pub const INF_POS: BigFloat = BigFloat { inner: Flavor::Inf(Sign::Pos) };

/// Negative infinity.
pub const INF_NEG: BigFloat = BigFloat { inner: Flavor::Inf(Sign::Neg) };

/// Number representation.
///
/// Operations take the precision of the result `p` and the rounding mode `rm`,
/// and return the result together with the status flags raised while computing it.
#[derive(Debug)]
pub struct BigFloat {
    inner: Flavor,
}

#[derive(Debug)]
enum Flavor {
    Zero(Sign),
    Value(BigFloatNumber),
    Inf(Sign),
    NaN,
}

// Finite operand, zeroes are materialized for the arithmetic of BigFloatNumber.
enum Finite<'a> {
    Ref(&'a BigFloatNumber),
    Own(BigFloatNumber),
}

impl Deref for Finite<'_> {
    type Target = BigFloatNumber;

    fn deref(&self) -> &BigFloatNumber {
        match self {
            Finite::Ref(v) => v,
            Finite::Own(v) => v,
        }
    }
}

// Handler of a special argument of a function: sign, precision, rounding mode, constants cache.
type SpecialFn = fn(Sign, usize, RoundingMode, &mut Consts) -> Result<StatusAnd<BigFloat>, Error>;

fn ok(inner: Flavor) -> Result<StatusAnd<BigFloat>, Error> {
    Ok(Status::OK.and(BigFloat { inner }))
}

fn invalid() -> Result<StatusAnd<BigFloat>, Error> {
    Ok(Status::INVALID_OP.and(NAN))
}

impl BigFloat {
    /// Returns a new BigFloat with the value of positive zero.
    pub const fn new() -> Self {
        BigFloat { inner: Flavor::Zero(Sign::Pos) }
    }

    /// Creates a BigFloat from f64. The conversion is exact.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn from_f64(f: f64) -> Result<Self, Error> {
        let inner = if f.is_nan() {
            Flavor::NaN
        } else if f.is_infinite() {
            Flavor::Inf(if f > 0.0 { Sign::Pos } else { Sign::Neg })
        } else if f == 0.0 {
            Flavor::Zero(if f.is_sign_negative() { Sign::Neg } else { Sign::Pos })
        } else {
            Flavor::Value(BigFloatNumber::from_f64(f)?)
        };

        Ok(BigFloat { inner })
    }

    /// Assigns the value of `f` to `self`. The conversion is exact.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn set_f64(&mut self, f: f64) -> Result<(), Error> {
        *self = Self::from_f64(f)?;
        Ok(())
    }

    /// Parses a decimal number from the string `s` and rounds it to precision `p` using the rounding mode `rm`.
    /// Strings `inf`, `infinity`, and `nan` are accepted in any letter case.
    ///
    /// ## Errors
    ///
    ///  - Parse: the string is not a number.
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn parse(s: &str, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        let ps = crate::parser::parse(s)?;

        match ps.kind() {
            ParsedKind::NaN => ok(Flavor::NaN),
            ParsedKind::Inf => ok(Flavor::Inf(ps.sign())),
            ParsedKind::Finite => {
                let (digits, e) = ps.raw_parts();
                Self::result_to_ext(BigFloatNumber::from_decimal(ps.sign(), digits, e, p, rm))
            }
        }
    }

    /// Assigns the number parsed from the string `s` with precision `p`, rounding to nearest-even.
    ///
    /// ## Errors
    ///
    ///  - Parse: the string is not a number.
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn set_str(&mut self, s: &str, p: usize) -> Result<Status, Error> {
        let (v, status) = Self::parse(s, p, RoundingMode::ToEven)?.into_parts();
        *self = v;
        Ok(status)
    }

    /// Assigns a copy of `d2` to `self`.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn set_from(&mut self, d2: &Self) -> Result<(), Error> {
        *self = d2.try_clone()?;
        Ok(())
    }

    /// Returns a copy of `self`.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn try_clone(&self) -> Result<Self, Error> {
        let inner = match &self.inner {
            Flavor::Zero(s) => Flavor::Zero(*s),
            Flavor::Value(v) => Flavor::Value(v.clone()?),
            Flavor::Inf(s) => Flavor::Inf(*s),
            Flavor::NaN => Flavor::NaN,
        };
        Ok(BigFloat { inner })
    }

    /// Assigns pi with precision `p` rounded using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn set_pi(&mut self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Status, Error> {
        let (v, status) = cc.pi(p, rm)?.into_parts();
        *self = v;
        Ok(status)
    }

    /// Assigns the natural logarithm of 2 with precision `p` rounded using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn set_ln2(&mut self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Status, Error> {
        let (v, status) = cc.ln2(p, rm)?.into_parts();
        *self = v;
        Ok(status)
    }

    /// Changes the sign of `self`. The sign of `NaN` is not defined, and it stays unchanged.
    pub fn negate(&mut self) {
        match &mut self.inner {
            Flavor::Zero(s) | Flavor::Inf(s) => *s = s.invert(),
            Flavor::Value(v) => v.inv_sign(),
            Flavor::NaN => {}
        }
    }

    /// Returns `self` with the opposite sign.
    pub fn neg(&self) -> Self {
        let mut ret = self.clone();
        ret.negate();
        ret
    }

    /// Returns true if `self` is zero or a finite nonzero number.
    pub fn is_finite(&self) -> bool {
        matches!(self.inner, Flavor::Zero(_) | Flavor::Value(_))
    }

    /// Returns true if `self` is not a number.
    pub fn is_nan(&self) -> bool {
        matches!(self.inner, Flavor::NaN)
    }

    /// Returns true if `self` is positive or negative zero.
    pub fn is_zero(&self) -> bool {
        matches!(self.inner, Flavor::Zero(_))
    }

    /// Returns true if `self` is infinite.
    pub fn is_inf(&self) -> bool {
        matches!(self.inner, Flavor::Inf(_))
    }

    /// Returns true if the sign of `self` is negative. Returns false for `NaN`.
    pub fn is_negative(&self) -> bool {
        self.sign() == Some(Sign::Neg)
    }

    /// Returns true if the sign of `self` is positive. Returns false for `NaN`.
    pub fn is_positive(&self) -> bool {
        self.sign() == Some(Sign::Pos)
    }

    /// Returns the sign of `self`, or None for `NaN`.
    pub fn sign(&self) -> Option<Sign> {
        match &self.inner {
            Flavor::Zero(s) | Flavor::Inf(s) => Some(*s),
            Flavor::Value(v) => Some(v.sign()),
            Flavor::NaN => None,
        }
    }

    /// Returns the binary exponent of a finite nonzero `self`: the value is `0.m * 2^e`.
    pub fn exponent(&self) -> Option<Exponent> {
        match &self.inner {
            Flavor::Value(v) => Some(v.exponent()),
            _ => None,
        }
    }

    /// Returns the number of bits in the mantissa of a finite nonzero `self`.
    pub fn precision(&self) -> Option<usize> {
        match &self.inner {
            Flavor::Value(v) => Some(v.mantissa_max_bit_len()),
            _ => None,
        }
    }

    /// Returns the mantissa words of a finite nonzero `self`, least significant word first.
    pub fn mantissa_digits(&self) -> Option<&[Word]> {
        match &self.inner {
            Flavor::Value(v) => Some(v.mantissa().digits()),
            _ => None,
        }
    }

    fn is_odd_int(&self) -> bool {
        match &self.inner {
            Flavor::Value(v) => v.is_odd_int(),
            _ => false,
        }
    }

    fn is_one(&self) -> bool {
        match &self.inner {
            Flavor::Value(v) => v.cmp(&ONE) == Ordering::Equal,
            _ => false,
        }
    }

    fn finite(&self) -> Result<Option<Finite<'_>>, Error> {
        Ok(match &self.inner {
            Flavor::Value(v) => Some(Finite::Ref(v)),
            Flavor::Zero(s) => Some(Finite::Own(BigFloatNumber::new2(WORD_BIT_SIZE, *s, false)?)),
            _ => None,
        })
    }

    // Applies `f` to finite operands.
    fn finite_op<F>(&self, d2: &Self, f: F) -> Result<StatusAnd<Self>, Error>
    where
        F: FnOnce(&BigFloatNumber, &BigFloatNumber) -> Result<BigFloatNumber, Error>,
    {
        match (self.finite()?, d2.finite()?) {
            (Some(a), Some(b)) => Self::result_to_ext(f(&a, &b)),
            _ => ok(Flavor::NaN),
        }
    }

    /// Converts the result of an operation on finite numbers to BigFloat with status flags.
    pub(crate) fn result_to_ext(res: Result<BigFloatNumber, Error>) -> Result<StatusAnd<Self>, Error> {
        match res {
            Ok(mut v) => {
                let status = if v.inexact() { Status::INEXACT } else { Status::OK };
                v.set_inexact(false);
                let inner = if v.is_zero() { Flavor::Zero(v.sign()) } else { Flavor::Value(v) };
                Ok(status.and(BigFloat { inner }))
            }
            Err(Error::ExponentOverflow(s)) => {
                Ok((Status::OVERFLOW | Status::INEXACT).and(BigFloat { inner: Flavor::Inf(s) }))
            }
            Err(Error::ExponentUnderflow(s)) => {
                Ok((Status::UNDERFLOW | Status::INEXACT).and(BigFloat { inner: Flavor::Zero(s) }))
            }
            Err(Error::DivisionByZero) => Ok(Status::DIV_BY_ZERO.and(INF_POS)),
            Err(Error::InvalidArgument) => invalid(),
            Err(e) => Err(e),
        }
    }

    /// Adds `d2` to `self` and rounds the result to precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn add(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match (&self.inner, &d2.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => ok(Flavor::NaN),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => {
                if s1 != s2 {
                    invalid()
                } else {
                    ok(Flavor::Inf(*s1))
                }
            }
            (Flavor::Inf(s), _) | (_, Flavor::Inf(s)) => ok(Flavor::Inf(*s)),
            _ => self.finite_op(d2, |a, b| a.add(b, p, rm)),
        }
    }

    /// Subtracts `d2` from `self` and rounds the result to precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn sub(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match (&self.inner, &d2.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => ok(Flavor::NaN),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => {
                if s1 == s2 {
                    invalid()
                } else {
                    ok(Flavor::Inf(*s1))
                }
            }
            (Flavor::Inf(s), _) => ok(Flavor::Inf(*s)),
            (_, Flavor::Inf(s)) => ok(Flavor::Inf(s.invert())),
            _ => self.finite_op(d2, |a, b| a.sub(b, p, rm)),
        }
    }

    /// Multiplies `self` by `d2` and rounds the result to precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn mul(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match (&self.inner, &d2.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => ok(Flavor::NaN),
            (Flavor::Inf(_), Flavor::Zero(_)) | (Flavor::Zero(_), Flavor::Inf(_)) => invalid(),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => ok(Flavor::Inf(s1.mul(*s2))),
            (Flavor::Inf(s), Flavor::Value(v)) | (Flavor::Value(v), Flavor::Inf(s)) => {
                ok(Flavor::Inf(s.mul(v.sign())))
            }
            _ => self.finite_op(d2, |a, b| a.mul(b, p, rm)),
        }
    }

    /// Divides `self` by `d2` and rounds the result to precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn div(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match (&self.inner, &d2.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => ok(Flavor::NaN),
            (Flavor::Inf(_), Flavor::Inf(_)) | (Flavor::Zero(_), Flavor::Zero(_)) => invalid(),
            (Flavor::Inf(s1), Flavor::Zero(s2)) => ok(Flavor::Inf(s1.mul(*s2))),
            (Flavor::Inf(s1), Flavor::Value(v)) => ok(Flavor::Inf(s1.mul(v.sign()))),
            (Flavor::Zero(s1), Flavor::Inf(s2)) => ok(Flavor::Zero(s1.mul(*s2))),
            (Flavor::Value(v), Flavor::Inf(s2)) => ok(Flavor::Zero(v.sign().mul(*s2))),
            (Flavor::Value(v), Flavor::Zero(s2)) => {
                Ok(Status::DIV_BY_ZERO.and(BigFloat { inner: Flavor::Inf(v.sign().mul(*s2)) }))
            }
            _ => self.finite_op(d2, |a, b| a.div(b, p, rm)),
        }
    }

    /// Computes the quotient `q` of `self / d2` rounded to an integer using the rounding mode `q_rm`,
    /// and the remainder `self - q * d2`. Both are rounded to precision `p` using the rounding mode `rm`.
    /// `q_rm` equal to `ToEven` gives the IEEE remainder, `ToZero` gives the truncated remainder.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn divrem(
        &self,
        d2: &Self,
        p: usize,
        rm: RoundingMode,
        q_rm: RoundingMode,
    ) -> Result<StatusAnd<(Self, Self)>, Error> {
        check_precision(p)?;

        let nan_pair = |status: Status| -> Result<StatusAnd<(Self, Self)>, Error> { Ok(status.and((NAN, NAN))) };

        match (&self.inner, &d2.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => nan_pair(Status::OK),
            (Flavor::Inf(_), _) | (_, Flavor::Zero(_)) => nan_pair(Status::INVALID_OP),
            (_, Flavor::Inf(s2)) => {
                let q = BigFloat { inner: Flavor::Zero(self.sign().unwrap_or(Sign::Pos).mul(*s2)) };
                let (r, status) = self.round(p, rm)?.into_parts();
                Ok(status.and((q, r)))
            }
            _ => match (self.finite()?, d2.finite()?) {
                (Some(a), Some(b)) => {
                    let (q, r) = match a.divrem(&b, p, rm, q_rm) {
                        Ok(qr) => qr,
                        Err(Error::InvalidArgument) => return nan_pair(Status::INVALID_OP),
                        Err(e) => return Err(e),
                    };
                    let mut status = Status::OK;
                    let q = unpack!(status |=, Self::result_to_ext(q)?);
                    let r = unpack!(status |=, Self::result_to_ext(r)?);
                    Ok(status.and((q, r)))
                }
                _ => nan_pair(Status::OK),
            },
        }
    }

    /// Computes the remainder described in `divrem`.
    /// The remainder does not depend on the magnitude of the quotient, a quotient out of the exponent range
    /// affects only the status of `divrem`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn rem(&self, d2: &Self, p: usize, rm: RoundingMode, q_rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match (&self.inner, &d2.inner) {
            (Flavor::Value(a), Flavor::Value(b)) => Self::result_to_ext(a.rem(b, p, rm, q_rm)),
            _ => self.divrem(d2, p, rm, q_rm).map(|v| v.map(|(_, r)| r)),
        }
    }

    /// Returns the square root of `self` with precision `p` rounded using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn sqrt(&self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match &self.inner {
            Flavor::NaN => ok(Flavor::NaN),
            Flavor::Inf(Sign::Pos) => ok(Flavor::Inf(Sign::Pos)),
            Flavor::Inf(Sign::Neg) => invalid(),
            Flavor::Zero(s) => ok(Flavor::Zero(*s)),
            Flavor::Value(v) => Self::result_to_ext(v.sqrt(p, rm)),
        }
    }

    /// Returns `self` rounded to precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn round(&self, p: usize, rm: RoundingMode) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        match &self.inner {
            Flavor::Value(v) => {
                let mut r = v.clone()?;
                let res = r.set_precision(p, rm).map(|_| r);
                Self::result_to_ext(res)
            }
            _ => Ok(Status::OK.and(self.clone())),
        }
    }

    /// Computes `self` to the power of `y` with precision `p` rounded using the rounding mode `rm`.
    /// Special values follow IEEE 754: `x^0 = 1` and `1^y = 1` for any `x` and `y`, zero to a negative power
    /// raises the division by zero, a negative base with a non-integer power is an invalid operation.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn pow(&self, y: &Self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        check_precision(p)?;

        if y.is_zero() || self.is_one() {
            return Self::result_to_ext(BigFloatNumber::from_word(1, p));
        }

        match (&self.inner, &y.inner) {
            (Flavor::NaN, _) | (_, Flavor::NaN) => ok(Flavor::NaN),
            (Flavor::Zero(s), _) => {
                let rs = if y.is_odd_int() { *s } else { Sign::Pos };
                match &y.inner {
                    Flavor::Inf(Sign::Neg) => ok(Flavor::Inf(Sign::Pos)),
                    _ if y.is_negative() => Ok(Status::DIV_BY_ZERO.and(BigFloat { inner: Flavor::Inf(rs) })),
                    _ => ok(Flavor::Zero(rs)),
                }
            }
            (Flavor::Inf(s), _) => {
                let rs = if *s == Sign::Neg && y.is_odd_int() { Sign::Neg } else { Sign::Pos };
                if y.is_negative() {
                    ok(Flavor::Zero(rs))
                } else {
                    ok(Flavor::Inf(rs))
                }
            }
            (Flavor::Value(x), Flavor::Inf(sy)) => match x.abs_cmp(&ONE) {
                Ordering::Equal => Self::result_to_ext(BigFloatNumber::from_word(1, p)),
                Ordering::Less => ok(if sy.is_positive() { Flavor::Zero(Sign::Pos) } else { Flavor::Inf(Sign::Pos) }),
                Ordering::Greater => {
                    ok(if sy.is_positive() { Flavor::Inf(Sign::Pos) } else { Flavor::Zero(Sign::Pos) })
                }
            },
            _ => self.finite_op(y, |a, b| a.pow(b, p, rm, cc)),
        }
    }

    // Special arguments of the functions.

    fn keep_zero(s: Sign, _p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        ok(Flavor::Zero(s))
    }

    fn to_one(_s: Sign, p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        Self::result_to_ext(BigFloatNumber::from_word(1, p))
    }

    fn to_nan(_s: Sign, _p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        invalid()
    }

    fn to_half_pi(s: Sign, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        Self::result_to_ext(pi_pow2(-1, s, p, rm, cc))
    }

    fn to_half_pi_pos(_s: Sign, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        Self::to_half_pi(Sign::Pos, p, rm, cc)
    }

    fn exp_inf(s: Sign, _p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        ok(if s.is_positive() { Flavor::Inf(Sign::Pos) } else { Flavor::Zero(Sign::Pos) })
    }

    fn ln_inf(s: Sign, _p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        if s.is_positive() {
            ok(Flavor::Inf(Sign::Pos))
        } else {
            invalid()
        }
    }

    fn ln_zero(_s: Sign, _p: usize, _rm: RoundingMode, _cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
        Ok(Status::DIV_BY_ZERO.and(INF_NEG))
    }

    fn special(
        &self,
        zero: SpecialFn,
        inf: SpecialFn,
        p: usize,
        rm: RoundingMode,
        cc: &mut Consts,
    ) -> Option<Result<StatusAnd<Self>, Error>> {
        match &self.inner {
            Flavor::NaN => Some(ok(Flavor::NaN)),
            Flavor::Zero(s) => Some(zero(*s, p, rm, cc)),
            Flavor::Inf(s) => Some(inf(*s, p, rm, cc)),
            Flavor::Value(_) => None,
        }
    }
}

macro_rules! gen_wrapper_arg_rm_cc {
    ($comment:literal, $fname:ident, $zero:path, $inf:path) => {
        #[doc=$comment]
        ///
        /// ## Errors
        ///
        ///  - InvalidPrecision: `p` is outside of the supported range.
        ///  - MemoryAllocation: failed to allocate memory.
        pub fn $fname(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<StatusAnd<Self>, Error> {
            check_precision(p)?;

            if let Some(ret) = self.special($zero, $inf, p, rm, cc) {
                return ret;
            }

            match &self.inner {
                Flavor::Value(v) => Self::result_to_ext(v.$fname(p, rm, cc)),
                _ => ok(Flavor::NaN),
            }
        }
    };
}

impl BigFloat {
    gen_wrapper_arg_rm_cc!("Returns `e` to the power of `self`.", exp, Self::to_one, Self::exp_inf);
    gen_wrapper_arg_rm_cc!("Returns the natural logarithm of `self`.", ln, Self::ln_zero, Self::ln_inf);
    gen_wrapper_arg_rm_cc!(
        "Returns the sine of `self`. The function takes an angle in radians as an argument.",
        sin,
        Self::keep_zero,
        Self::to_nan
    );
    gen_wrapper_arg_rm_cc!(
        "Returns the cosine of `self`. The function takes an angle in radians as an argument.",
        cos,
        Self::to_one,
        Self::to_nan
    );
    gen_wrapper_arg_rm_cc!(
        "Returns the tangent of `self`. The function takes an angle in radians as an argument.",
        tan,
        Self::keep_zero,
        Self::to_nan
    );
    gen_wrapper_arg_rm_cc!(
        "Returns the arcsine of `self`. The result is an angle in radians ranging from -pi/2 to pi/2.",
        asin,
        Self::keep_zero,
        Self::to_nan
    );
    gen_wrapper_arg_rm_cc!(
        "Returns the arccosine of `self`. The result is an angle in radians ranging from 0 to pi.",
        acos,
        Self::to_half_pi_pos,
        Self::to_nan
    );
    gen_wrapper_arg_rm_cc!(
        "Returns the arctangent of `self`. The result is an angle in radians ranging from -pi/2 to pi/2.",
        atan,
        Self::keep_zero,
        Self::to_half_pi
    );
}

// Position of the value in the total order, finite nonzero numbers of the same sign share a rank.
fn total_rank(inner: &Flavor) -> u8 {
    match inner {
        Flavor::Inf(Sign::Neg) => 0,
        Flavor::Value(v) if v.is_negative() => 1,
        Flavor::Zero(Sign::Neg) => 2,
        Flavor::Zero(Sign::Pos) => 3,
        Flavor::Value(_) => 4,
        Flavor::Inf(Sign::Pos) => 5,
        Flavor::NaN => 6,
    }
}

impl BigFloat {
    /// Compares absolute values of `self` and `d2`. Zero is the smallest, followed by finite numbers and infinity.
    /// `NaN` is placed after infinity.
    pub fn cmp_abs(&self, d2: &Self) -> Ordering {
        let rank = |inner: &Flavor| match inner {
            Flavor::Zero(_) => 0,
            Flavor::Value(_) => 1,
            Flavor::Inf(_) => 2,
            Flavor::NaN => 3,
        };

        match (&self.inner, &d2.inner) {
            (Flavor::Value(a), Flavor::Value(b)) => a.abs_cmp(b),
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }

    /// Compares `self` and `d2` in the total order:
    /// -Inf < negative numbers < -0 < +0 < positive numbers < +Inf < NaN.
    pub fn cmp_total(&self, d2: &Self) -> Ordering {
        match (&self.inner, &d2.inner) {
            (Flavor::Value(a), Flavor::Value(b)) if a.sign() == b.sign() => a.cmp(b),
            (a, b) => total_rank(a).cmp(&total_rank(b)),
        }
    }

    /// Compares numeric values of `self` and `d2`. Zeroes of different signs are equal.
    ///
    /// ## Errors
    ///
    ///  - Unordered: one of the numbers is `NaN`.
    pub fn cmp_numeric(&self, d2: &Self) -> Result<Ordering, Error> {
        if self.is_nan() || d2.is_nan() {
            return Err(Error::Unordered);
        }

        Ok(match (&self.inner, &d2.inner) {
            (Flavor::Zero(_), Flavor::Zero(_)) => Ordering::Equal,
            (Flavor::Value(a), Flavor::Value(b)) => a.cmp(b),
            (a, b) => total_rank(a).cmp(&total_rank(b)),
        })
    }

    /// Converts `self` to f64 rounding to nearest-even.
    pub fn to_f64(&self) -> f64 {
        match &self.inner {
            Flavor::Zero(s) => {
                if s.is_negative() {
                    -0.0
                } else {
                    0.0
                }
            }
            Flavor::Value(v) => v.to_f64(),
            Flavor::Inf(s) => {
                if s.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            Flavor::NaN => f64::NAN,
        }
    }

    fn special_str(&self) -> Option<&'static str> {
        match &self.inner {
            Flavor::Inf(Sign::Pos) => Some("Infinity"),
            Flavor::Inf(Sign::Neg) => Some("-Infinity"),
            Flavor::NaN => Some("NaN"),
            _ => None,
        }
    }

    /// Formats `self` with exactly `n` digits after the decimal point, rounding to nearest-even.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn to_fixed(&self, n: usize) -> Result<String, Error> {
        if let Some(s) = self.special_str() {
            return Ok(s.to_owned());
        }
        self.finite()?.map_or(Ok(String::new()), |v| v.format_fixed(n))
    }

    /// Formats `self` with `n` significant digits, rounding to nearest-even.
    /// The exponential notation `d.ddde±E` is used unless -7 < E < n.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn to_fraction(&self, n: usize) -> Result<String, Error> {
        if let Some(s) = self.special_str() {
            return Ok(s.to_owned());
        }
        self.finite()?.map_or(Ok(String::new()), |v| v.format_fraction(n))
    }

    /// Formats the shortest decimal which parses back to `self` rounded to precision `p`.
    /// The exponential notation is used unless the decimal exponent E satisfies -7 < E < 21.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn to_free(&self, p: usize) -> Result<String, Error> {
        check_precision(p)?;

        if let Some(s) = self.special_str() {
            return Ok(s.to_owned());
        }
        self.finite()?.map_or(Ok(String::new()), |v| v.format_free(p))
    }

    /// Returns a random normalized number with precision `p` and exponent in the range
    /// from `exp_from` to `exp_to` inclusive. The sign can be positive and negative. Zero is excluded.
    /// The function does not follow any specific distribution law.
    /// The intended use of this function is for testing.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `exp_from` is greater than `exp_to`.
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    #[cfg(feature = "random")]
    pub fn random_normal(p: usize, exp_from: Exponent, exp_to: Exponent) -> Result<Self, Error> {
        check_precision(p)?;

        if exp_from > exp_to {
            return Err(Error::InvalidArgument);
        }

        let n = words_for(p);
        let mut words = Vec::new();
        words.try_reserve_exact(n)?;
        words.extend((0..n).map(|_| random::<Word>()));

        words[n - 1] |= WORD_SIGNIFICANT_BIT;
        let unused = n * WORD_BIT_SIZE - p;
        if unused > 0 {
            words[0] &= WORD_MAX << unused;
        }

        let e = rand::thread_rng().gen_range(exp_from..=exp_to);
        let s = if random::<bool>() { Sign::Pos } else { Sign::Neg };

        Ok(BigFloat { inner: Flavor::Value(BigFloatNumber::from_raw_parts(&words, e, s)?) })
    }
}

impl Clone for BigFloat {
    fn clone(&self) -> Self {
        let inner = match &self.inner {
            Flavor::Zero(s) => Flavor::Zero(*s),
            Flavor::Value(v) => Flavor::Value(v.dup()),
            Flavor::Inf(s) => Flavor::Inf(*s),
            Flavor::NaN => Flavor::NaN,
        };
        BigFloat { inner }
    }
}

impl Default for BigFloat {
    fn default() -> Self {
        BigFloat::new()
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_numeric(other) == Ok(Ordering::Equal)
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cmp_numeric(other).ok()
    }
}

impl Display for BigFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if let Some(s) = self.special_str() {
            return f.write_str(s);
        }

        let s = match &self.inner {
            Flavor::Zero(Sign::Neg) => "-0".to_owned(),
            Flavor::Zero(Sign::Pos) => "0".to_owned(),
            Flavor::Value(v) => v.format().map_err(|_| core::fmt::Error)?,
            _ => String::new(),
        };

        f.write_str(&s)
    }
}

impl FromStr for BigFloat {
    type Err = Error;

    /// Parses a number with a precision sufficient for the digits of the string, rounding to nearest-even.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.bytes().filter(|c| c.is_ascii_digit()).count();
        BigFloat::parse(s, precision_for_digits(n), RoundingMode::ToEven).map(|v| v.value)
    }
}
