//! Power function.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use core::cmp::Ordering;

// Swaps overflow and underflow, used when the result is inverted.
fn invert_range_error(e: Error) -> Error {
    match e {
        Error::ExponentOverflow(s) => Error::ExponentUnderflow(s),
        Error::ExponentUnderflow(s) => Error::ExponentOverflow(s),
        e => e,
    }
}

// Replaces the sign of a range error.
fn resign_range_error(e: Error, s: Sign) -> Error {
    match e {
        Error::ExponentOverflow(_) => Error::ExponentOverflow(s),
        Error::ExponentUnderflow(_) => Error::ExponentUnderflow(s),
        e => e,
    }
}

impl BigFloatNumber {
    /// Computes `self` to the power of `y` with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the result is too large.
    ///  - ExponentUnderflow: the result is too small.
    ///  - DivisionByZero: `self` is zero and `y` is negative.
    ///  - InvalidArgument: `self` is negative and `y` is not an integer.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn pow(&self, y: &Self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if y.is_zero() || self.cmp(&ONE) == Ordering::Equal {
            return Self::from_word(1, p);
        }

        if self.is_zero() {
            if y.is_negative() {
                return Err(Error::DivisionByZero);
            }
            let s = if self.is_negative() && y.is_odd_int() { Sign::Neg } else { Sign::Pos };
            return Self::new2(p, s, false);
        }

        if y.is_int() && self.abs_cmp(&ONE) == Ordering::Equal {
            // (-1)^y, y may be wider than a word
            let mut ret = Self::from_word(1, p)?;
            if y.is_odd_int() {
                ret.set_sign(Sign::Neg);
            }
            return Ok(ret);
        }

        if y.is_int() && y.exponent() as usize <= WORD_BIT_SIZE {
            let n = y.int_low_word()?;
            return self.powi(n, y.is_negative(), p, rm);
        }

        if self.is_negative() && !y.is_int() {
            return Err(Error::InvalidArgument);
        }

        if let Some(ret) = self.pow_dyadic(y, p, rm)? {
            return Ok(ret);
        }

        self.pow_general(y, p, rm, cc)
    }

    // self^n, or self^-n if `inv` is set.
    fn powi(&self, n: Word, inv: bool, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        let n_bits = WORD_BIT_SIZE - n.leading_zeros() as usize;
        let s = if self.is_negative() && n & 1 == 1 { Sign::Neg } else { Sign::Pos };

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            // squaring doubles the relative error
            let p_x = p_wrk + n_bits + 16;

            let x = match self.powi_wrk(n, p_x) {
                Ok(x) => x,
                Err(e) if inv => return Err(resign_range_error(invert_range_error(e), s)),
                Err(e) => return Err(resign_range_error(e, s)),
            };

            let mut ret = if inv { x.reciprocal(p_x, RoundingMode::ToEven)? } else { x };

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("powi: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }

    // Binary powering with precision p_x.
    fn powi_wrk(&self, mut n: Word, p_x: usize) -> Result<Self, Error> {
        let rm = RoundingMode::ToEven;

        let mut x = self.clone()?;
        let mut ret = ONE.clone()?;

        loop {
            if n & 1 == 1 {
                ret = ret.mul(&x, p_x, rm)?;
            }

            n >>= 1;
            if n == 0 {
                break;
            }

            x = x.mul(&x, p_x, rm)?;
        }

        Ok(ret)
    }

    // For y = Y / 2^k tries to find an exact 2^k-th root of a positive `self`,
    // and raises it to the power Y. Returns None if the root is not exact.
    fn pow_dyadic(&self, y: &Self, p: usize, rm: RoundingMode) -> Result<Option<Self>, Error> {
        if self.is_negative() || self.inexact() {
            return Ok(None);
        }

        let tz = y.mantissa().trailing_zeros();
        let k = -(y.int_exp() + tz as isize);
        let y_bits = y.mantissa().bit_len() - tz;

        if k <= 0 || k > WORD_BIT_SIZE as isize || y_bits > WORD_BIT_SIZE {
            return Ok(None);
        }

        let p_root = self.mantissa_max_bit_len();
        let mut root = self.clone()?;
        for _ in 0..k {
            root = root.sqrt(p_root, RoundingMode::ToZero)?;
            if root.inexact() {
                return Ok(None);
            }
        }

        let n = y.mantissa().shr(tz)?.low_word();

        root.powi(n, y.is_negative(), p, rm).map(Some)
    }

    // e^(y * ln(|self|)) with the sign of the result for negative `self` and integer `y`.
    fn pow_general(&self, y: &Self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        let s = if self.is_negative() && y.is_odd_int() { Sign::Neg } else { Sign::Pos };
        let x = self.abs()?;

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            // |y * ln(x)| < 2^32, which costs up to 32 bits of the result
            let p_t = p_wrk + WORD_BIT_SIZE;

            let t = x.ln(p_t, RoundingMode::ToEven, cc)?.mul(y, p_t, RoundingMode::ToEven)?;

            if t.exponent() > 32 {
                return Err(if t.is_positive() {
                    Error::ExponentOverflow(s)
                } else {
                    Error::ExponentUnderflow(s)
                });
            }

            let mut ret =
                t.exp(p_wrk + 8, RoundingMode::ToEven, cc).map_err(|e| resign_range_error(e, s))?;
            ret.set_sign(s);
            ret.set_inexact(true);

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("pow: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn num(f: f64) -> BigFloatNumber {
        BigFloatNumber::from_f64(f).unwrap()
    }

    #[test]
    fn test_pow() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        // exact integer power
        let r = num(3.0).pow(&num(5.0), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 243.0);
        assert!(!r.inexact());

        let r = num(-2.0).pow(&num(3.0), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), -8.0);
        let r = num(-2.0).pow(&num(-2.0), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 0.25);
        assert!(!r.inexact());

        // exact dyadic power
        let r = num(4.0).pow(&num(1.5), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 8.0);
        assert!(!r.inexact());
        let r = num(16.0).pow(&num(-0.25), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 0.5);
        assert!(!r.inexact());

        // inexact
        let r = num(2.0).pow(&num(0.5), 53, rm, &mut cc).unwrap();
        assert!(r.inexact());
        assert_eq!(r.to_f64(), core::f64::consts::SQRT_2);

        let r = num(10.0).pow(&num(-1.0), 53, rm, &mut cc).unwrap();
        assert!(r.inexact());
        assert_eq!(r.to_f64(), 0.1);

        for (a, b) in [(1.5, 2.25), (0.3, -7.125), (123.0, 0.1), (2.0, 100.5), (0.999, 12345.0)] {
            let r = num(a).pow(&num(b), 53, rm, &mut cc).unwrap().to_f64();
            let e = a.powf(b);
            assert!((r - e).abs() <= e * 4.0 * f64::EPSILON, "{}^{}", a, b);
        }

        // special cases
        let r = num(7.0).pow(&num(0.0), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        let r = num(1.0).pow(&num(123.456), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        assert_eq!(num(-2.0).pow(&num(0.5), 64, rm, &mut cc).err(), Some(Error::InvalidArgument));
        assert_eq!(num(0.0).pow(&num(-1.0), 64, rm, &mut cc).err(), Some(Error::DivisionByZero));

        // minus one to integer powers wider than a word
        let r = num(-1.0).pow(&num(2f64.powi(70)), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        assert!(!r.inexact());
        let odd = num(2f64.powi(70)).add(&num(1.0), 128, rm).unwrap();
        let r = num(-1.0).pow(&odd, 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), -1.0);
        let r = num(-1.0).pow(&odd.neg().unwrap(), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), -1.0);
        let mut y = num(3.0);
        y.set_exponent(200);
        let r = num(-1.0).pow(&y, 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        let r = num(-1.0).pow(&num(-(2f64.powi(80) + 1.0)), 64, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        assert_eq!(num(-1.0).pow(&num(0.5), 64, rm, &mut cc).err(), Some(Error::InvalidArgument));
    }

    #[test]
    fn test_pow_limits() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        assert_eq!(
            num(10.0).pow(&num(1e12), 64, rm, &mut cc).err(),
            Some(Error::ExponentOverflow(Sign::Pos))
        );
        assert_eq!(
            num(-10.0).pow(&num(-1e12 - 1.0), 64, rm, &mut cc).err(),
            Some(Error::ExponentUnderflow(Sign::Neg))
        );
        assert_eq!(
            num(10.0).pow(&num(1e20), 64, rm, &mut cc).err(),
            Some(Error::ExponentOverflow(Sign::Pos))
        );
        assert_eq!(
            num(0.5).pow(&num(1e10 + 0.5), 64, rm, &mut cc).err(),
            Some(Error::ExponentUnderflow(Sign::Pos))
        );
    }
}
