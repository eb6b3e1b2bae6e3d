//! Sine.

use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::cos::cos_series;
use crate::ops::series::series_run;
use crate::ops::series::PolycoeffGen;
use crate::ops::util::compute_small_exp;
use crate::ops::util::series_guard;
use crate::ops::util::trig_correct_bits;

// Polynomial coefficient generator: -1/3!, 1/5!, -1/7!, ...
struct SinPolycoeffGen {
    fct: BigFloatNumber,
    inc: usize,
    sign: Sign,
    p: usize,
}

impl SinPolycoeffGen {
    fn new(p: usize) -> Result<Self, Error> {
        Ok(SinPolycoeffGen { fct: BigFloatNumber::from_word(1, p)?, inc: 1, sign: Sign::Pos, p })
    }
}

impl PolycoeffGen for SinPolycoeffGen {
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error> {
        let d = BigFloatNumber::from_usize((self.inc + 1) * (self.inc + 2))?;
        self.inc += 2;

        self.fct = self.fct.div(&d, self.p, rm)?;
        self.sign = self.sign.invert();
        self.fct.set_sign(self.sign);

        Ok(&self.fct)
    }
}

/// Sine of a reduced argument `r` computed with the series at precision `p`.
pub(crate) fn sin_series(r: &BigFloatNumber, p: usize) -> Result<BigFloatNumber, Error> {
    if r.is_zero() {
        return r.clone();
    }

    let rm = RoundingMode::ToEven;
    let r2 = r.mul(r, p, rm)?;
    let x_first = r.mul(&r2, p, rm)?;
    let mut acc = r.clone()?;
    acc.set_precision(p, rm)?;

    let mut polycoeff_gen = SinPolycoeffGen::new(p)?;
    series_run(acc, x_first, r2, &mut polycoeff_gen, p)
}

impl BigFloatNumber {
    /// Computes the sine of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn sin(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::new2(p, self.sign(), self.inexact());
        }

        compute_small_exp!(self, 2 * self.exponent() as isize - 2, true, p, rm);

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let p_x = p_wrk + series_guard(p_wrk);

            let arg = self.reduce_trig_arg(p_x, cc)?;

            if !arg.r.is_zero() {
                let f = match arg.quadrant {
                    0 => sin_series(&arg.r, p_x)?,
                    1 => cos_series(&arg.r, p_x)?,
                    2 => sin_series(&arg.r, p_x)?.neg()?,
                    _ => cos_series(&arg.r, p_x)?.neg()?,
                };

                let s = trig_correct_bits(p_wrk, &f, &arg);

                let mut ret = f;
                if s > 0 && ret.try_set_precision(p, rm, s)? {
                    break Ok(ret);
                }
            }

            log::trace!("sin: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }
}
