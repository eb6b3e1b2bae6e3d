//! Auxiliary items.

use crate::common::util::log2_ceil;
use crate::common::util::round_p;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;
use crate::ops::consts::Consts;

/// Argument of a trigonometric function reduced by a multiple of pi/2.
#[derive(Debug)]
pub(crate) struct TrigArg {
    /// Reduced value in about [-pi/4, pi/4].
    pub r: BigFloatNumber,

    /// The multiple of pi/2 modulo 4.
    pub quadrant: usize,

    /// Binary exponent bounding the absolute error of `r`, None if `r` is exact.
    pub err_exp: Option<isize>,
}

impl BigFloatNumber {
    /// Reduces `self` by the nearest multiple of pi/2. The reduced value has precision about `p`.
    pub(crate) fn reduce_trig_arg(&self, p: usize, cc: &mut Consts) -> Result<TrigArg, Error> {
        let e = self.exponent() as isize;

        // |x| < 1/2 is already reduced
        if e < 0 || self.is_zero() {
            return Ok(TrigArg { r: self.clone()?, quadrant: 0, err_exp: None });
        }

        let p_pi = p + e as usize + WORD_BIT_SIZE;
        let mut half_pi = cc.pi_num(p_pi)?;
        half_pi.mul_pow2(-1)?;

        let k = self
            .div(&half_pi, e as usize + WORD_BIT_SIZE, RoundingMode::ToEven)?
            .round_to_int(RoundingMode::ToEven)?;

        if k.is_zero() {
            return Ok(TrigArg { r: self.clone()?, quadrant: 0, err_exp: None });
        }

        let kpi = k.mul_full_prec(&half_pi)?;
        let r = self.sub(&kpi, p + WORD_BIT_SIZE, RoundingMode::ToEven)?;

        let low = (k.int_low_word()? & 3) as usize;
        let quadrant = if k.is_negative() { (4 - low) & 3 } else { low };

        // |k| < 2^e, and the error of pi/2 is below 2^(1 - p_pi)
        Ok(TrigArg { r, quadrant, err_exp: Some(e + 2 - p_pi as isize) })
    }
}

/// Number of correct bits of a function value `f` of the reduced argument `r`.
/// The function's derivative is assumed to be bounded relative to min(|f|, |r|).
pub(crate) fn trig_correct_bits(p_wrk: usize, f: &BigFloatNumber, arg: &TrigArg) -> usize {
    match arg.err_exp {
        None => p_wrk,
        Some(err_exp) => {
            if f.is_zero() || arg.r.is_zero() {
                return 0;
            }
            let e = (f.exponent() as isize).min(arg.r.exponent() as isize);
            let s = e - err_exp - 4;
            if s <= 0 {
                0
            } else {
                (s as usize).min(p_wrk)
            }
        }
    }
}

/// Returns `s * pi * 2^k` rounded to `p` bits using the rounding mode `rm`.
pub(crate) fn pi_pow2(
    k: isize,
    s: Sign,
    p: usize,
    rm: RoundingMode,
    cc: &mut Consts,
) -> Result<BigFloatNumber, Error> {
    let mut p_inc = WORD_BIT_SIZE;
    let mut p_wrk = p + p_inc;

    loop {
        let mut ret = cc.pi_num(p_wrk)?;
        ret.mul_pow2(k)?;
        ret.set_sign(s);

        if ret.try_set_precision(p, rm, p_wrk)? {
            break Ok(ret);
        }

        p_wrk += p_inc;
        p_inc = round_p(p_wrk / 5);
    }
}

/// Guard bits absorbing the rounding error accumulated while summing a series at precision `p`.
pub(crate) fn series_guard(p: usize) -> usize {
    log2_ceil(p) + 8
}

/// Compute result for argument with small exponent.
///
/// If the terms after the first one of the function's series are smaller than the last bit of
/// `$arg` extended to `$p` bits, the result is `$arg` moved by a sub-ulp amount toward or away from zero.
macro_rules! compute_small_exp {
    ($arg:expr, $exp:expr, $toward_zero:expr, $p:ident, $rm:ident) => {
        if ($p.max($arg.mantissa_max_bit_len()) as isize) + 1 < -($exp) {
            let mut x = $arg.clone()?;
            if $p > x.mantissa_max_bit_len() {
                x.set_precision($p, RoundingMode::ToZero)?;
            }
            let mut ret = x.add_correction($toward_zero)?;
            ret.set_precision($p, $rm)?;
            return Ok(ret);
        }
    };
}

pub(super) use compute_small_exp;

#[cfg(test)]
mod tests {

    use super::*;
    use core::cmp::Ordering;

    #[test]
    fn test_reduce_trig_arg() {
        let mut cc = Consts::new().unwrap();

        let x = BigFloatNumber::from_f64(0.3).unwrap();
        let a = x.reduce_trig_arg(128, &mut cc).unwrap();
        assert_eq!(a.quadrant, 0);
        assert!(a.err_exp.is_none());
        assert_eq!(a.r.cmp(&x), Ordering::Equal);

        // 10 = 6 * pi/2 + 0.575...
        let x = BigFloatNumber::from_f64(10.0).unwrap();
        let a = x.reduce_trig_arg(128, &mut cc).unwrap();
        assert_eq!(a.quadrant, 2);
        assert!((a.r.to_f64() - (10.0 - 3.0 * core::f64::consts::PI)).abs() < 1e-15);

        let x = BigFloatNumber::from_f64(-2.0).unwrap();
        let a = x.reduce_trig_arg(128, &mut cc).unwrap();
        assert_eq!(a.quadrant, 3);
        assert!((a.r.to_f64() - (-2.0 + core::f64::consts::FRAC_PI_2)).abs() < 1e-15);
        assert!(a.err_exp.unwrap() < -128);
    }

    #[test]
    fn test_correct_bits() {
        let r = BigFloatNumber::from_f64(0.5).unwrap();
        let f = BigFloatNumber::from_f64(0.25).unwrap();
        let arg = TrigArg { r, quadrant: 0, err_exp: Some(-100) };
        assert_eq!(trig_correct_bits(200, &f, &arg), 100 - 1 - 4);
        assert_eq!(trig_correct_bits(50, &f, &arg), 50);
        let arg = TrigArg { r: BigFloatNumber::new(64).unwrap(), quadrant: 0, err_exp: Some(-100) };
        assert_eq!(trig_correct_bits(200, &f, &arg), 0);
    }

    #[test]
    fn test_pi_pow2() {
        let mut cc = Consts::new().unwrap();
        let r = pi_pow2(-1, Sign::Neg, 53, RoundingMode::ToEven, &mut cc).unwrap();
        assert_eq!(r.to_f64(), -core::f64::consts::FRAC_PI_2);
        let lo = pi_pow2(0, Sign::Pos, 100, RoundingMode::Down, &mut cc).unwrap();
        let hi = pi_pow2(0, Sign::Pos, 100, RoundingMode::Up, &mut cc).unwrap();
        assert_eq!(lo.cmp(&hi), Ordering::Less);
    }

    #[test]
    fn test_series_guard() {
        assert_eq!(series_guard(64), 14);
        assert!(series_guard(100000) < WORD_BIT_SIZE);
    }
}
