//! Remainder of division.

use crate::defs::Error;
use crate::defs::EXPONENT_MAX;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::mantissa::Mantissa;
use crate::num::BigFloatNumber;
use crate::round::round_up;
use core::cmp::Ordering;

/// Quotient and remainder. Each carries its own result since the quotient can leave
/// the exponent range while the remainder is still representable.
pub type DivRem = (Result<BigFloatNumber, Error>, Result<BigFloatNumber, Error>);

impl BigFloatNumber {
    /// Computes `self - q * d2`, where `q` is the quotient `self / d2` rounded to an integer with
    /// the rounding mode `q_rm`. Returns `q` and the remainder, both rounded to precision `p` using the rounding mode `rm`.
    ///
    /// `q_rm` equal to `ToEven` gives the IEEE remainder, `ToZero` gives the truncated remainder.
    /// A zero remainder has the sign of `self`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `d2` is zero.
    ///  - MemoryAllocation: failed to allocate memory.
    ///
    /// Range errors of the quotient and of the remainder are reported in the returned pair.
    pub fn divrem(&self, d2: &Self, p: usize, rm: RoundingMode, q_rm: RoundingMode) -> Result<DivRem, Error> {
        if d2.is_zero() {
            return Err(Error::InvalidArgument);
        }

        let sa = self.sign();
        let sq = sa.mul(d2.sign());
        let inexact = self.inexact() || d2.inexact();

        if self.is_zero() {
            return Ok((Self::new2(p, sq, inexact), Self::new2(p, sa, inexact)));
        }

        let (mut q, mut r) = if (self.exponent() as isize) < d2.exponent() as isize - 1 {
            // |self / d2| < 1/2
            if round_up(q_rm, sq.is_positive(), false, false, true) {
                let mut q = Self::from_word(1, p)?;
                q.set_sign(sq);
                let r = if sq.is_positive() { self.sub(d2, p, rm) } else { self.add(d2, p, rm) };
                (Ok(q), r)
            } else {
                let mut v = self.clone()?;
                let r = v.set_precision(p, rm).map(|_| v);
                (Self::new2(p, sq, false), r)
            }
        } else {
            self.divrem_int(d2, p, rm, q_rm)?
        };

        if inexact {
            if let Ok(q) = q.as_mut() {
                q.set_inexact(true);
            }
            if let Ok(r) = r.as_mut() {
                r.set_inexact(true);
            }
        }

        Ok((q, r))
    }

    /// Computes the remainder `self - q * d2` described in `divrem`.
    ///
    /// ## Errors
    ///
    ///  - ExponentUnderflow: the remainder is too small.
    ///  - InvalidArgument: `d2` is zero.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn rem(&self, d2: &Self, p: usize, rm: RoundingMode, q_rm: RoundingMode) -> Result<Self, Error> {
        self.divrem(d2, p, rm, q_rm).and_then(|(_, r)| r)
    }

    // Both numbers are scaled to integers with a common least significant bit, and divided exactly.
    // A quotient above 2^EXPONENT_MAX is not built, its parity comes from the residue modulo 2 * d2.
    fn divrem_int(&self, d2: &Self, p: usize, rm: RoundingMode, q_rm: RoundingMode) -> Result<DivRem, Error> {
        let sa = self.sign();
        let sq = sa.mul(d2.sign());

        let ia = self.int_exp();
        let ib = d2.int_exp();
        let lsb = ia.min(ib);

        let b = d2.mantissa().shl((ib - lsb) as usize)?;

        let q_overflow = self.exponent() as isize - d2.exponent() as isize > EXPONENT_MAX as isize;

        let (q, q_odd, r) = if q_overflow {
            let r2 = shl_mod(self.mantissa(), (ia - lsb) as usize, &b.shl(1)?)?;
            if r2.cmp(&b) == Ordering::Less {
                (None, false, r2)
            } else {
                let r = r2.sub(&b)?;
                (None, true, r)
            }
        } else {
            let a = self.mantissa().shl((ia - lsb) as usize)?;
            let (q, r) = a.div_rem(&b)?;
            let q_odd = q.is_odd();
            (Some(q), q_odd, r)
        };

        let (round_bit, sticky) = match r.shl(1)?.cmp(&b) {
            Ordering::Greater => (true, true),
            Ordering::Equal => (true, false),
            Ordering::Less => (false, !r.is_zero()),
        };

        let up = round_up(q_rm, sq.is_positive(), q_odd, round_bit, sticky);

        let (rs, rm_mag): (Sign, Mantissa) = if up { (sa.invert(), b.sub(&r)?) } else { (sa, r) };

        let r = if rm_mag.is_zero() {
            Self::new2(p, sa, false)
        } else {
            Self::from_int_parts(rs, &rm_mag, lsb, false, p, rm)
        };

        let q = match q {
            None => Err(Error::ExponentOverflow(sq)),
            Some(mut q) => {
                if up {
                    q.add_word(1)?;
                }
                if q.is_zero() {
                    Self::new2(p, sq, false)
                } else {
                    Self::from_int_parts(sq, &q, 0, false, p, rm)
                }
            }
        };

        Ok((q, r))
    }
}

// (m * 2^k) mod d by binary powering of 2 modulo d.
fn shl_mod(m: &Mantissa, k: usize, d: &Mantissa) -> Result<Mantissa, Error> {
    let mut t = Mantissa::from_word(1)?;

    for i in (0..usize::BITS - k.leading_zeros()).rev() {
        t = t.mul(&t)?.div_rem(d)?.1;
        if (k >> i) & 1 == 1 {
            t = t.shl(1)?.div_rem(d)?.1;
        }
    }

    Ok(m.mul(&t)?.div_rem(d)?.1)
}
