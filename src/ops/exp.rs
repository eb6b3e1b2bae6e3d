//! Exponentiation.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::common::util::sqrt_int;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::series::series_run;
use crate::ops::series::PolycoeffGen;
use crate::ops::util::compute_small_exp;
use crate::ops::util::series_guard;

// Polynomial coefficient generator: 1/n!
struct ExpPolycoeffGen {
    fct: BigFloatNumber,
    n: usize,
    p: usize,
}

impl ExpPolycoeffGen {
    fn new(p: usize) -> Result<Self, Error> {
        Ok(ExpPolycoeffGen { fct: BigFloatNumber::from_word(1, p)?, n: 0, p })
    }
}

impl PolycoeffGen for ExpPolycoeffGen {
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error> {
        self.n += 1;
        let n = BigFloatNumber::from_usize(self.n)?;
        self.fct = self.fct.div(&n, self.p, rm)?;
        Ok(&self.fct)
    }
}

impl BigFloatNumber {
    /// Computes `e` to the power of `self` with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the result is too large.
    ///  - ExponentUnderflow: the result is too small.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn exp(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::from_word(1, p);
        }

        // |x| >= 2^32 is far beyond the exponent range
        if self.exponent() > 32 {
            return Err(if self.is_positive() {
                Error::ExponentOverflow(Sign::Pos)
            } else {
                Error::ExponentUnderflow(Sign::Pos)
            });
        }

        compute_small_exp!(ONE, self.exponent() as isize, self.is_negative(), p, rm);

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let k_max = sqrt_int(p_wrk) / 2;
            let p_x = p_wrk + k_max + series_guard(p_wrk);

            let (mut ret, n) = self.exp_reduced(p_x, k_max, cc)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                ret.mul_pow2(n)?;
                break Ok(ret);
            }

            log::trace!("exp: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }

    // Returns y and n such that e^self = y * 2^n, y is computed with precision p_x.
    fn exp_reduced(&self, p_x: usize, k_max: usize, cc: &mut Consts) -> Result<(Self, isize), Error> {
        let rm = RoundingMode::ToEven;

        // x = n*ln(2) + r
        let ln2 = cc.ln_2_num(p_x + 2 * WORD_BIT_SIZE)?;

        let nf = self.div(&ln2, WORD_BIT_SIZE, rm)?.round_to_int(RoundingMode::ToEven)?;
        let n = nf.to_i64()?.ok_or(Error::InvalidArgument)? as isize;

        let mut r = if n == 0 {
            self.clone()?
        } else {
            let nln2 = nf.mul_full_prec(&ln2)?;
            self.sub(&nln2, p_x, rm)?
        };

        if r.is_zero() {
            let mut one = Self::from_word(1, p_x)?;
            one.set_inexact(true);
            return Ok((one, n));
        }

        // r = r / 2^k
        let k = (k_max as isize + r.exponent() as isize).max(0) as usize;
        r.mul_pow2(-(k as isize))?;

        let acc = Self::from_word(1, p_x)?;
        let x_step = r.clone()?;
        let mut polycoeff_gen = ExpPolycoeffGen::new(p_x)?;
        let mut ret = series_run(acc, r, x_step, &mut polycoeff_gen, p_x)?;

        for _ in 0..k {
            ret = ret.mul(&ret, p_x, rm)?;
        }

        Ok((ret, n))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use core::cmp::Ordering;

    #[test]
    fn test_exp() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        let one = BigFloatNumber::from_word(1, 64).unwrap();
        let e = one.exp(53, rm, &mut cc).unwrap();
        assert!(e.inexact());
        assert_eq!(e.to_f64(), core::f64::consts::E);

        let z = BigFloatNumber::new(64).unwrap();
        let r = z.exp(64, rm, &mut cc).unwrap();
        assert!(!r.inexact());
        assert_eq!(r.cmp(&one), Ordering::Equal);

        // e^-x * e^x = 1
        let x = BigFloatNumber::from_f64(-12.375).unwrap();
        let a = x.exp(256, rm, &mut cc).unwrap();
        let b = x.neg().unwrap().exp(256, rm, &mut cc).unwrap();
        let d = a.mul(&b, 256, rm).unwrap().sub(&one, 256, rm).unwrap();
        assert!(d.is_zero() || d.exponent() < -250);

        // directed rounding brackets the value
        let lo = one.exp(100, RoundingMode::Down, &mut cc).unwrap();
        let hi = one.exp(100, RoundingMode::Up, &mut cc).unwrap();
        assert_eq!(lo.cmp(&hi), Ordering::Less);
        let mut hi2 = lo.add_correction(false).unwrap();
        hi2.set_precision(100, RoundingMode::Up).unwrap();
        assert_eq!(hi2.cmp(&hi), Ordering::Equal);
    }

    #[test]
    fn test_exp_limits() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        let big = BigFloatNumber::from_f64(1e10).unwrap();
        assert_eq!(big.exp(64, rm, &mut cc).err(), Some(Error::ExponentOverflow(Sign::Pos)));
        assert_eq!(big.neg().unwrap().exp(64, rm, &mut cc).err(), Some(Error::ExponentUnderflow(Sign::Pos)));

        // beyond the exponent range after reduction
        let x = BigFloatNumber::from_f64(2e9).unwrap();
        assert_eq!(x.exp(64, rm, &mut cc).err(), Some(Error::ExponentOverflow(Sign::Pos)));

        // tiny arguments
        let mut t = BigFloatNumber::from_word(1, 64).unwrap();
        t.set_exponent(-200);
        let r = t.exp(64, RoundingMode::Up, &mut cc).unwrap();
        assert_eq!(r.cmp(&BigFloatNumber::from_word(1, 64).unwrap()), Ordering::Greater);
        let r = t.exp(64, RoundingMode::ToEven, &mut cc).unwrap();
        assert_eq!(r.to_f64(), 1.0);
        t.inv_sign();
        let r = t.exp(64, RoundingMode::Down, &mut cc).unwrap();
        assert_eq!(r.cmp(&BigFloatNumber::from_word(1, 64).unwrap()), Ordering::Less);

        for f in [0.5, -0.75, 3.0, 100.0, -700.0, 1e-5] {
            let x = BigFloatNumber::from_f64(f).unwrap();
            let r = x.exp(53, rm, &mut cc).unwrap().to_f64();
            assert!((r - f.exp()).abs() <= f.exp() * f64::EPSILON, "exp({})", f);
        }
    }
}
