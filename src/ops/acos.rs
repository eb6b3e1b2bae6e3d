//! Arccosine.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::util::pi_pow2;
use crate::ops::util::series_guard;
use core::cmp::Ordering;

impl BigFloatNumber {
    /// Computes the arccosine of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: argument is greater than 1 or smaller than -1.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn acos(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return pi_pow2(-1, Sign::Pos, p, rm, cc);
        }

        match self.abs_cmp(&ONE) {
            Ordering::Greater => return Err(Error::InvalidArgument),
            Ordering::Equal => {
                return if self.is_positive() { Self::new(p) } else { pi_pow2(0, Sign::Pos, p, rm, cc) };
            }
            Ordering::Less => {}
        }

        // 1 - x and 1 + x are exact
        let a = ONE.sub_full_prec(self)?;
        let b = ONE.add_full_prec(self)?;

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let p_x = p_wrk + series_guard(p_wrk) + 6;

            // acos(x) = 2 * atan(sqrt((1 - x) / (1 + x)))
            let z = a.div(&b, p_x, RoundingMode::ToEven)?.sqrt(p_x, RoundingMode::ToEven)?;

            let mut ret = z.atan_wrk(p_x, cc)?;
            ret.mul_pow2(1)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("acos: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_arccosine() {
        let mut cc = Consts::new().unwrap();
        let rm = RoundingMode::ToEven;

        let one = BigFloatNumber::from_word(1, 64).unwrap();
        let r = one.acos(64, rm, &mut cc).unwrap();
        assert!(r.is_zero());
        assert!(!r.inexact());

        let r = one.neg().unwrap().acos(53, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), core::f64::consts::PI);

        let r = BigFloatNumber::new(64).unwrap().acos(53, rm, &mut cc).unwrap();
        assert_eq!(r.to_f64(), core::f64::consts::FRAC_PI_2);

        for f in [0.5, -0.75, 0.999, 1e-3, -0.125, -0.9999999, 1e-30] {
            let x = BigFloatNumber::from_f64(f).unwrap();
            let r = x.acos(53, rm, &mut cc).unwrap().to_f64();
            assert!((r - f.acos()).abs() <= f.acos().abs() * 2.0 * f64::EPSILON, "acos({})", f);
        }

        let x = BigFloatNumber::from_f64(-1.0625).unwrap();
        assert_eq!(x.acos(64, rm, &mut cc).err(), Some(Error::InvalidArgument));
    }
}
