//! Arcsine.

use crate::common::consts::ONE;
use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;
use crate::ops::util::compute_small_exp;
use crate::ops::util::pi_pow2;
use crate::ops::util::series_guard;
use core::cmp::Ordering;

impl BigFloatNumber {
    /// Computes the arcsine of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// This function requires constants cache `cc` for computing the result.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: argument is greater than 1 or smaller than -1.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn asin(&self, p: usize, rm: RoundingMode, cc: &mut Consts) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::new2(p, self.sign(), self.inexact());
        }

        match self.abs_cmp(&ONE) {
            Ordering::Greater => return Err(Error::InvalidArgument),
            Ordering::Equal => return pi_pow2(-1, self.sign(), p, rm, cc),
            Ordering::Less => {}
        }

        compute_small_exp!(self, 2 * self.exponent() as isize - 2, false, p, rm);

        // 1 - x and 1 + x are exact
        let a = ONE.sub_full_prec(self)?;
        let b = ONE.add_full_prec(self)?;

        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let p_x = p_wrk + series_guard(p_wrk) + 6;

            // asin(x) = atan(x / sqrt((1 - x)*(1 + x)))
            let d = a.mul(&b, p_x, RoundingMode::ToEven)?.sqrt(p_x, RoundingMode::ToEven)?;
            let z = self.div(&d, p_x, RoundingMode::ToEven)?;

            let mut ret = z.atan_wrk(p_x, cc)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("asin: raising working precision from {}", p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }
}
