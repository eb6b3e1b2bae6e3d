//! Arctangent.

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
use core::cmp::Ordering;

// Polynomial coefficient generator: -1/3, 1/5, -1/7, ...
struct AtanPolycoeffGen {
    val: BigFloatNumber,
    n: usize,
    sign: Sign,
    p: usize,
}

impl AtanPolycoeffGen {
    fn new(p: usize) -> Result<Self, Error> {
        Ok(AtanPolycoeffGen { val: BigFloatNumber::new(p)?, n: 1, sign: Sign::Pos, p })
    }
}

impl PolycoeffGen for AtanPolycoeffGen {
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error> {
        self.n += 2;
        self.sign = self.sign.invert();

        let n = BigFloatNumber::from_usize(self.n)?;
        self.val = ONE.div(&n, self.p, rm)?;
        self.val.set_sign(self.sign);

        Ok(&self.val)
    }
}

impl BigFloatNumber {
    /// Computes the arctangent of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn atan(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::new2(p, self.sign(), self.inexact());
        }

        compute_small_exp!(self, 2 * self.exponent() as isize - 1, true, p, rm);

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let p_x = p_wrk + series_guard(p_wrk) + 4;

            let mut ret = self.atan_wrk(p_x, cc)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("atan: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }

    /// Arctangent of a nonzero number with precision about `p_x`.
    pub(crate) fn atan_wrk(&self, p_x: usize, cc: &mut Consts) -> Result<Self, Error> {
        let rm = RoundingMode::ToEven;

        match self.abs_cmp(&ONE) {
            Ordering::Equal => {
                // pi/4
                let mut ret = cc.pi_num(p_x)?;
                ret.mul_pow2(-2)?;
                ret.set_sign(self.sign());
                Ok(ret)
            }
            Ordering::Greater => {
                // sign(x) * pi/2 - atan(1/x)
                let mut hp = cc.pi_num(p_x)?;
                hp.mul_pow2(-1)?;
                hp.set_sign(self.sign());

                let y = self.reciprocal(p_x, rm)?;
                let a = y.atan_reduced(p_x)?;

                hp.sub(&a, p_x, rm)
            }
            Ordering::Less => self.atan_reduced(p_x),
        }
    }

    // atan(x) for |x| < 1 using atan(x) = 2 * atan(x / (1 + sqrt(1 + x^2))) and the series.
    fn atan_reduced(&self, p_x: usize) -> Result<Self, Error> {
        let rm = RoundingMode::ToEven;

        if (2 * self.exponent() as isize) < -(p_x as isize) - 2 {
            let mut ret = self.clone()?;
            ret.set_precision(p_x, rm)?;
            ret.set_inexact(true);
            return Ok(ret);
        }

        let k_target = (sqrt_int(p_x) / 4).max(2) as isize;
        let k = (k_target + self.exponent() as isize).max(0) as usize;

        let mut y = self.clone()?;
        for _ in 0..k {
            let y2 = y.mul(&y, p_x, rm)?;
            let d = y2.add(&ONE, p_x, rm)?.sqrt(p_x, rm)?.add(&ONE, p_x, rm)?;
            y = y.div(&d, p_x, rm)?;
        }

        let y2 = y.mul(&y, p_x, rm)?;
        let x_first = y.mul(&y2, p_x, rm)?;
        let mut acc = y;
        acc.set_precision(p_x, rm)?;

        let mut polycoeff_gen = AtanPolycoeffGen::new(p_x)?;
        let mut ret = series_run(acc, x_first, y2, &mut polycoeff_gen, p_x)?;

        ret.mul_pow2(k as isize)?;

        Ok(ret)
    }
}
