//! Tangent.

use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::cos::cos_series;
use crate::ops::sin::sin_series;
use crate::ops::util::compute_small_exp;
use crate::ops::util::series_guard;
use crate::ops::util::trig_correct_bits;

impl BigFloatNumber {
    /// Computes the tangent of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn tan(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::new2(p, self.sign(), self.inexact());
        }

        compute_small_exp!(self, 2 * self.exponent() as isize - 1, false, p, rm);

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            // sin and cos are divided, one more guard word for the quotient
            let p_x = p_wrk + series_guard(p_wrk) + 2;

            let arg = self.reduce_trig_arg(p_x, cc)?;

            if !arg.r.is_zero() {
                let s = sin_series(&arg.r, p_x)?;
                let c = cos_series(&arg.r, p_x)?;

                let f = if arg.quadrant & 1 == 0 {
                    s.div(&c, p_x, RoundingMode::ToEven)?
                } else {
                    c.div(&s, p_x, RoundingMode::ToEven)?.neg()?
                };

                let n = trig_correct_bits(p_wrk, &f, &arg);

                let mut ret = f;
                if n > 0 && ret.try_set_precision(p, rm, n)? {
                    break Ok(ret);
                }
            }

            log::trace!("tan: raising working precision from {}", p_wrk);

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
    fn test_tangent() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        for f in [0.5, -0.75, 1.0, 3.0, 10.0, -100.5, 1e-3, 1.5] {
            let x = BigFloatNumber::from_f64(f).unwrap();
            let r = x.tan(53, rm, &mut cc).unwrap();
            assert!(r.inexact());
            let r = r.to_f64();
            assert!((r - f.tan()).abs() <= f.tan().abs() * 4.0 * f64::EPSILON, "tan({})", f);
        }

        // close to pi/2 the value is large
        let mut hp = cc.pi_num(256).unwrap();
        hp.mul_pow2(-1).unwrap();
        hp.set_precision(128, RoundingMode::ToEven).unwrap();
        let r = hp.tan(64, rm, &mut cc).unwrap();
        assert!(r.exponent() > 120);

        // small argument
        let mut t = BigFloatNumber::from_word(1, 64).unwrap();
        t.set_exponent(-100);
        let r = t.tan(64, RoundingMode::Up, &mut cc).unwrap();
        assert_eq!(r.cmp(&t), Ordering::Greater);
        let r = t.tan(64, RoundingMode::ToEven, &mut cc).unwrap();
        assert_eq!(r.cmp(&t), Ordering::Equal);
    }
}
