//! Square root.

use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::num::BigFloatNumber;

impl BigFloatNumber {
    /// Computes the square root of a number with precision `p`. The result is rounded using the rounding mode `rm`.
    /// The square root of -0 is -0.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: the argument is negative.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn sqrt(&self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        if self.is_zero() {
            return Self::new2(p, self.sign(), self.inexact());
        }

        if self.is_negative() {
            return Err(Error::InvalidArgument);
        }

        // the value is m * 2^ie; widen m to at least 2(p + 2) bits and make the exponent even
        let ie = self.int_exp();
        let bl = self.mantissa().bit_len();
        let mut sh = (2 * (p + 2)).saturating_sub(bl);
        if (ie - sh as isize) & 1 != 0 {
            sh += 1;
        }

        let (r, exact) = self.mantissa().shl(sh)?.sqrt_rem()?;
        let lsb = (ie - sh as isize) / 2;

        let mut ret = Self::from_int_parts(Sign::Pos, &r, lsb, !exact, p, rm)?;
        if self.inexact() {
            ret.set_inexact(true);
        }

        Ok(ret)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use core::cmp::Ordering;
    use rand::random;

    #[test]
    fn test_sqrt() {
        let rm = RoundingMode::ToEven;

        let x = BigFloatNumber::from_word(16, 64).unwrap();
        let r = x.sqrt(64, rm).unwrap();
        assert!(!r.inexact());
        assert_eq!(r.to_f64(), 4.0);

        let x = BigFloatNumber::from_f64(0.5).unwrap();
        let r = x.sqrt(53, rm).unwrap();
        assert!(r.inexact());
        assert_eq!(r.to_f64(), core::f64::consts::FRAC_1_SQRT_2);

        let x = BigFloatNumber::from_f64(2.0).unwrap();
        let lo = x.sqrt(200, RoundingMode::Down).unwrap();
        let hi = x.sqrt(200, RoundingMode::Up).unwrap();
        assert_eq!(lo.cmp(&hi), Ordering::Less);
        assert_ne!(lo.mul_full_prec(&lo).unwrap().cmp(&x), Ordering::Greater);
        assert_eq!(hi.mul_full_prec(&hi).unwrap().cmp(&x), Ordering::Greater);

        let z = BigFloatNumber::new2(64, Sign::Neg, false).unwrap();
        let r = z.sqrt(64, rm).unwrap();
        assert!(r.is_zero() && r.is_negative());

        let n = BigFloatNumber::from_f64(-1.0).unwrap();
        assert_eq!(n.sqrt(64, rm).err(), Some(Error::InvalidArgument));

        // odd exponents
        let x = BigFloatNumber::from_f64(2f64.powi(-51)).unwrap();
        assert_eq!(x.sqrt(53, rm).unwrap().to_f64(), 2f64.powi(-51).sqrt());
    }

    #[test]
    fn test_sqrt_random() {
        for _ in 0..1000 {
            let f = (random::<u64>() >> 11) as f64 * 2f64.powi(random::<i32>() % 100);
            let x = BigFloatNumber::from_f64(f).unwrap();
            assert_eq!(x.sqrt(53, RoundingMode::ToEven).unwrap().to_f64(), f.sqrt());
        }
    }
}
