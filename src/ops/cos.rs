//! Cosine.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::series::series_run;
use crate::ops::series::PolycoeffGen;
use crate::ops::sin::sin_series;
use crate::ops::util::compute_small_exp;
use crate::ops::util::series_guard;
use crate::ops::util::trig_correct_bits;

// Polynomial coefficient generator: -1/2!, 1/4!, -1/6!, ...
struct CosPolycoeffGen {
    fct: BigFloatNumber,
    inc: usize,
    sign: Sign,
    p: usize,
}

impl CosPolycoeffGen {
    fn new(p: usize) -> Result<Self, Error> {
        Ok(CosPolycoeffGen { fct: BigFloatNumber::from_word(1, p)?, inc: 0, sign: Sign::Pos, p })
    }
}

impl PolycoeffGen for CosPolycoeffGen {
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error> {
        let d = BigFloatNumber::from_usize((self.inc + 1) * (self.inc + 2))?;
        self.inc += 2;

        self.fct = self.fct.div(&d, self.p, rm)?;
        self.sign = self.sign.invert();
        self.fct.set_sign(self.sign);

        Ok(&self.fct)
    }
}

/// Cosine of a reduced argument `r` computed with the series at precision `p`.
pub(crate) fn cos_series(r: &BigFloatNumber, p: usize) -> Result<BigFloatNumber, Error> {
    let mut acc = BigFloatNumber::from_word(1, p)?;

    if r.is_zero() {
        acc.set_inexact(r.inexact());
        return Ok(acc);
    }

    let r2 = r.mul(r, p, RoundingMode::ToEven)?;
    let x_first = r2.clone()?;

    let mut polycoeff_gen = CosPolycoeffGen::new(p)?;
    series_run(acc, x_first, r2, &mut polycoeff_gen, p)
}

impl BigFloatNumber {
    /// Computes the cosine of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn cos(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            let mut ret = Self::from_word(1, p)?;
            ret.set_inexact(self.inexact());
            return Ok(ret);
        }

        compute_small_exp!(ONE, 2 * self.exponent() as isize - 1, true, p, rm);

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let p_x = p_wrk + series_guard(p_wrk);

            let arg = self.reduce_trig_arg(p_x, cc)?;

            if !arg.r.is_zero() {
                let f = match arg.quadrant {
                    0 => cos_series(&arg.r, p_x)?,
                    1 => sin_series(&arg.r, p_x)?.neg()?,
                    2 => cos_series(&arg.r, p_x)?.neg()?,
                    _ => sin_series(&arg.r, p_x)?,
                };

                let s = trig_correct_bits(p_wrk, &f, &arg);

                let mut ret = f;
                if s > 0 && ret.try_set_precision(p, rm, s)? {
                    break Ok(ret);
                }
            }

            log::trace!("cos: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use core::cmp::Ordering;

    #[test]
    fn test_cosine() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        let z = BigFloatNumber::new(64).unwrap();
        let r = z.cos(64, rm, &mut cc).unwrap();
        assert_eq!(r.cmp(&ONE), Ordering::Equal);
        assert!(!r.inexact());

        for f in [0.5, -0.75, 1.0, 3.0, 10.0, -100.5, 1e-3, 123456.0] {
            let x = BigFloatNumber::from_f64(f).unwrap();
            let r = x.cos(53, rm, &mut cc).unwrap().to_f64();
            assert!((r - f.cos()).abs() <= f.cos().abs() * 2.0 * f64::EPSILON, "cos({})", f);
        }

        // cos(pi/2) is tiny
        let mut hp = cc.pi_num(256).unwrap();
        hp.mul_pow2(-1).unwrap();
        hp.set_precision(128, RoundingMode::ToEven).unwrap();
        let r = hp.cos(64, rm, &mut cc).unwrap();
        assert!(!r.is_zero());
        assert!(r.exponent() < -120);

        // small argument
        let mut t = BigFloatNumber::from_word(1, 64).unwrap();
        t.set_exponent(-100);
        let r = t.cos(64, RoundingMode::Up, &mut cc).unwrap();
        assert_eq!(r.cmp(&ONE), Ordering::Equal);
        let r = t.cos(64, RoundingMode::Down, &mut cc).unwrap();
        assert_eq!(r.cmp(&ONE), Ordering::Less);
    }
}
