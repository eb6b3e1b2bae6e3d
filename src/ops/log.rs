//! Natural logarithm.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::common::util::sqrt_int;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::series::series_run;
use crate::ops::series::PolycoeffGen;
use crate::ops::util::series_guard;
use core::cmp::Ordering;

// Polynomial coefficient generator: 1/3, 1/5, 1/7, ...
struct AtanhPolycoeffGen {
    val: BigFloatNumber,
    n: usize,
    p: usize,
}

impl AtanhPolycoeffGen {
    fn new(p: usize) -> Result<Self, Error> {
        Ok(AtanhPolycoeffGen { val: BigFloatNumber::new(p)?, n: 1, p })
    }
}

impl PolycoeffGen for AtanhPolycoeffGen {
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error> {
        self.n += 2;
        let n = BigFloatNumber::from_usize(self.n)?;
        self.val = ONE.div(&n, self.p, rm)?;
        Ok(&self.val)
    }
}

impl BigFloatNumber {
    /// Computes the natural logarithm of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: the argument is zero.
    ///  - InvalidArgument: the argument is negative.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn ln(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if self.is_negative() {
            return Err(Error::InvalidArgument);
        }

        if self.cmp(&ONE) == Ordering::Equal {
            return Self::new(p);
        }

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let k = sqrt_int(p_wrk) / 2;
            let p_x = p_wrk + 2 * k + series_guard(p_wrk);

            let mut ret = self.ln_wrk(p_x, k, cc)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("ln: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }

    // ln(x) with precision p_x, x is positive and not 1.
    fn ln_wrk(&self, p_x: usize, k: usize, cc: &mut Consts) -> Result<Self, Error> {
        let e = self.exponent();

        if e == 0 || e == 1 {
            return self.ln_near_one(p_x, k);
        }

        // ln(m * 2^e) = ln(m) + e * ln(2), |ln(m)| < ln(2) <= |e * ln(2)|
        let mut m = self.clone()?;
        m.set_exponent(0);
        let lnm = m.ln_near_one(p_x, k)?;

        let ln2 = cc.ln_2_num(p_x + 2 * WORD_BIT_SIZE)?;
        let e = Self::from_i64(e as i64)?;
        let eln2 = ln2.mul(&e, p_x, RoundingMode::ToEven)?;

        lnm.add(&eln2, p_x, RoundingMode::ToEven)
    }

    // ln(x) for x in [0.5, 2), using ln(x) = 2^(k+1) * atanh((y - 1) / (y + 1)), where y = x^(1/2^k).
    fn ln_near_one(&self, p_x: usize, k: usize) -> Result<Self, Error> {
        let rm = RoundingMode::ToEven;

        let d = self.sub_full_prec(&ONE)?;
        if d.is_zero() {
            return Self::new(p_x);
        }

        let (y, k) = if (d.exponent() as isize) <= -(k as isize) {
            (self.clone()?, 0)
        } else {
            let mut y = self.clone()?;
            for _ in 0..k {
                y = y.sqrt(p_x, rm)?;
            }
            (y, k)
        };

        let num = y.sub(&ONE, p_x, rm)?;
        let den = y.add(&ONE, p_x, rm)?;
        let z = num.div(&den, p_x, rm)?;

        let z2 = z.mul(&z, p_x, rm)?;
        let x_first = z.mul(&z2, p_x, rm)?;
        let mut polycoeff_gen = AtanhPolycoeffGen::new(p_x)?;
        let mut ret = series_run(z, x_first, z2, &mut polycoeff_gen, p_x)?;

        ret.mul_pow2(k as isize + 1)?;

        Ok(ret)
    }
}
