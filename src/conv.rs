//! Conversion between decimal and binary representations.

use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::Word;
use crate::mantissa::Mantissa;
use crate::mantissa::DECIMAL_BASE_LOG10;
use crate::num::BigFloatNumber;
use core::cmp::Ordering;

/// log10(2)
pub(crate) const LOG10_2: f64 = 0.301_029_995_663_981_2;

// Any nonzero number with a larger absolute decimal exponent is out of the exponent range.
const DEC_EXP_MAX: i64 = 646_456_995;

// Integer value of decimal digits.
fn digits_to_mantissa(digits: &[u8]) -> Result<Mantissa, Error> {
    let mut m = Mantissa::new(1)?;

    for chunk in digits.chunks(DECIMAL_BASE_LOG10) {
        let v = chunk.iter().fold(0 as Word, |acc, d| acc * 10 + *d as Word);
        m.mul_add_word((10 as Word).pow(chunk.len() as u32), v)?;
    }

    Ok(m)
}

fn pow10(n: usize) -> Result<Mantissa, Error> {
    Mantissa::pow_word(10, n)
}

/// Number of decimal digits which always identify a number with precision `p`.
pub(crate) fn max_digits(p: usize) -> usize {
    (p as f64 * LOG10_2).ceil() as usize + 1
}

impl BigFloatNumber {
    /// Converts `digits * 10^e10` with sign `s` to a number with precision `p` using the rounding mode `rm`.
    /// `digits` contains values from 0 to 9, most significant first.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the value is too large.
    ///  - ExponentUnderflow: the value is too small.
    ///  - MemoryAllocation: failed to allocate memory.
    pub(crate) fn from_decimal(
        s: Sign,
        digits: &[u8],
        e10: i64,
        p: usize,
        rm: RoundingMode,
    ) -> Result<Self, Error> {
        if digits.iter().all(|d| *d == 0) {
            return Self::new2(p, s, false);
        }

        // 10^(top - 1) <= value < 10^top
        let top = e10 + digits.len() as i64;
        if top > DEC_EXP_MAX {
            return Err(Error::ExponentOverflow(s));
        }
        if top < -DEC_EXP_MAX {
            return Err(Error::ExponentUnderflow(s));
        }

        let m = digits_to_mantissa(digits)?;

        if e10 >= 0 {
            let n = m.mul(&pow10(e10 as usize)?)?;
            Self::from_int_parts(s, &n, 0, false, p, rm)
        } else {
            // quotient with at least p + 2 bits, the remainder goes to the sticky bit
            let d = pow10((-e10) as usize)?;
            let sh = (p + 2 + d.bit_len()).saturating_sub(m.bit_len());
            let (q, r) = m.shl(sh)?.div_rem(&d)?;
            Self::from_int_parts(s, &q, -(sh as isize), !r.is_zero(), p, rm)
        }
    }

    /// Returns |self| * 10^k rounded to an integer, ties to even.
    pub(crate) fn scaled_int(&self, k: i64) -> Result<Mantissa, Error> {
        let ie = self.int_exp();

        let mut n = self.mantissa().try_clone()?;
        let mut d = Mantissa::from_word(1)?;

        if k >= 0 {
            n = n.mul(&pow10(k as usize)?)?;
        } else {
            d = pow10((-k) as usize)?;
        }

        if ie >= 0 {
            n = n.shl(ie as usize)?;
        } else {
            d = d.shl((-ie) as usize)?;
        }

        let (mut q, r) = n.div_rem(&d)?;

        match r.shl(1)?.cmp(&d) {
            Ordering::Greater => q.add_word(1)?,
            Ordering::Equal if q.is_odd() => q.add_word(1)?,
            _ => {}
        }

        Ok(q)
    }

    /// Returns `n` significant decimal digits of the nonzero |self| rounded to nearest-even,
    /// and the decimal exponent of the first digit.
    pub(crate) fn to_sig_digits(&self, n: usize) -> Result<(String, i64), Error> {
        debug_assert!(!self.is_zero() && n > 0);

        // 2^(e-1) <= |self| < 2^e, the estimate is off by one at most
        let mut e10 = ((self.exponent() as f64 - 1.0) * LOG10_2).floor() as i64;

        loop {
            let q = self.scaled_int(n as i64 - 1 - e10)?;
            let s = q.to_decimal()?;

            match s.len().cmp(&n) {
                Ordering::Greater => e10 += 1,
                Ordering::Less => e10 -= 1,
                Ordering::Equal => return Ok((s, e10)),
            }
        }
    }

    /// Returns the shortest decimal digits of the nonzero `self` which convert back to `self` rounded
    /// to precision `p` with rounding to nearest-even, and the decimal exponent of the first digit.
    /// Trailing zeroes are removed.
    pub(crate) fn to_shortest_digits(&self, p: usize) -> Result<(String, i64), Error> {
        let mut target = self.clone()?;
        target.set_precision(p, RoundingMode::ToEven)?;

        let n_max = max_digits(p);

        for n in 1..n_max {
            let (s, e10) = target.to_sig_digits(n)?;

            let mut digits = Vec::new();
            digits.try_reserve_exact(n)?;
            digits.extend(s.bytes().map(|c| c - b'0'));

            match Self::from_decimal(target.sign(), &digits, e10 + 1 - n as i64, p, RoundingMode::ToEven) {
                Ok(back) => {
                    if back.cmp(&target) == Ordering::Equal {
                        return Ok((trim_zeroes(s), e10));
                    }
                }
                Err(Error::ExponentOverflow(_)) | Err(Error::ExponentUnderflow(_)) => {}
                Err(e) => return Err(e),
            }
        }

        log::trace!("shortest representation falls back to {} digits", n_max);

        let (s, e10) = target.to_sig_digits(n_max)?;
        Ok((trim_zeroes(s), e10))
    }
}

fn trim_zeroes(mut s: String) -> String {
    let l = s.trim_end_matches('0').len().max(1);
    s.truncate(l);
    s
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dec(digits: &[u8], e10: i64, p: usize, rm: RoundingMode) -> BigFloatNumber {
        BigFloatNumber::from_decimal(Sign::Pos, digits, e10, p, rm).unwrap()
    }

    #[test]
    fn test_from_decimal() {
        let rm = RoundingMode::ToEven;

        assert_eq!(dec(&[1], -1, 53, rm).to_f64(), 0.1);
        assert_eq!(dec(&[1, 2, 5], -3, 64, rm).to_f64(), 0.125);
        assert!(!dec(&[1, 2, 5], -3, 64, rm).inexact());
        assert_eq!(dec(&[1, 7], 300, 53, rm).to_f64(), 1.7e301);
        assert_eq!(dec(&[4, 9, 4, 0, 6, 5, 6, 4, 5, 8], -333, 53, rm).to_f64(), 4.940656458e-324);

        // 0.1 is between two binary numbers
        let lo = dec(&[1], -1, 64, RoundingMode::Down);
        let hi = dec(&[1], -1, 64, RoundingMode::Up);
        assert_eq!(lo.cmp(&hi), Ordering::Less);
        assert!(lo.inexact() && hi.inexact());

        // many digits
        let digits: Vec<u8> = core::iter::repeat(9).take(100).collect();
        let r = dec(&digits, -100, 64, rm);
        assert_eq!(r.to_f64(), 1.0);

        assert!(dec(&[], 5, 64, rm).is_zero());
        assert_eq!(
            BigFloatNumber::from_decimal(Sign::Neg, &[1], 1_000_000_000, 64, rm).err(),
            Some(Error::ExponentOverflow(Sign::Neg))
        );
        assert_eq!(
            BigFloatNumber::from_decimal(Sign::Pos, &[1], -1_000_000_000, 64, rm).err(),
            Some(Error::ExponentUnderflow(Sign::Pos))
        );
    }

    #[test]
    fn test_to_digits() {
        let x = BigFloatNumber::from_f64(123.456).unwrap();
        assert_eq!(x.to_sig_digits(5).unwrap(), ("12346".to_owned(), 2));
        assert_eq!(x.to_sig_digits(1).unwrap(), ("1".to_owned(), 2));

        let x = BigFloatNumber::from_f64(9.99).unwrap();
        assert_eq!(x.to_sig_digits(2).unwrap(), ("10".to_owned(), 1));

        let x = BigFloatNumber::from_f64(0.1).unwrap();
        assert_eq!(x.to_shortest_digits(53).unwrap(), ("1".to_owned(), -1));
        assert_eq!(x.to_shortest_digits(64).unwrap(), ("10000000000000000555".to_owned(), -1));

        let x = BigFloatNumber::from_f64(2.5e-300).unwrap();
        assert_eq!(x.to_shortest_digits(53).unwrap(), ("25".to_owned(), -300));

        let x = BigFloatNumber::from_f64(0.125).unwrap();
        assert_eq!(x.scaled_int(1).unwrap().to_decimal().unwrap(), "1");
        assert_eq!(x.scaled_int(2).unwrap().to_decimal().unwrap(), "12");
        assert_eq!(x.scaled_int(3).unwrap().to_decimal().unwrap(), "125");
    }
}
