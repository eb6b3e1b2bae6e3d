//! BigFloatNumber definition and basic arithmetic, comparison, and number manipulation operations.

use crate::common::util::words_for;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::defs::Word;
use crate::defs::EXPONENT_MAX;
use crate::defs::EXPONENT_MIN;
use crate::defs::WORD_BIT_SIZE;
use crate::defs::WORD_SIGNIFICANT_BIT;
use crate::mantissa::Mantissa;
use crate::round::can_round;
use crate::round::round_mantissa;
use crate::round::round_up;
use core::cmp::Ordering;

/// A finite floating point number with mantissa of an arbitrary size, an exponent, and the sign.
///
/// The value is `0.m * 2^e`, the mantissa is normalized unless the number is zero.
/// The `inexact` flag tells that the number is an approximation of the value it stands for.
#[derive(Debug, Hash)]
pub(crate) struct BigFloatNumber {
    e: Exponent,
    s: Sign,
    m: Mantissa,
    inexact: bool,
}

// 64 bits of `m` starting from bit `pos`.
fn word_at_bit(m: &[Word], pos: usize) -> Word {
    let idx = pos / WORD_BIT_SIZE;
    let sh = pos % WORD_BIT_SIZE;
    let lo = m.get(idx).copied().unwrap_or(0) >> sh;
    let hi = if sh > 0 { m.get(idx + 1).copied().unwrap_or(0) << (WORD_BIT_SIZE - sh) } else { 0 };
    lo | hi
}

/// Converts an unbounded exponent to `Exponent`, reporting overflow or underflow for a number with sign `s`.
pub(crate) fn exponent_in_range(e: isize, s: Sign) -> Result<Exponent, Error> {
    if e > EXPONENT_MAX as isize {
        Err(Error::ExponentOverflow(s))
    } else if e < EXPONENT_MIN as isize {
        Err(Error::ExponentUnderflow(s))
    } else {
        Ok(e as Exponent)
    }
}

impl BigFloatNumber {
    /// Returns a new number with value of 0 and precision of `p` bits.
    pub fn new(p: usize) -> Result<Self, Error> {
        Self::new2(p, Sign::Pos, false)
    }

    /// Returns a new number with value of 0, precision of `p` bits, sign `s`, and marked as inexact if `inexact` is true.
    pub fn new2(p: usize, s: Sign, inexact: bool) -> Result<Self, Error> {
        Ok(BigFloatNumber { m: Mantissa::new(words_for(p).max(1))?, e: 0, s, inexact })
    }

    /// Rounds `m` * 2^`lsb` (plus an infinitely small positive amount if `sticky` is set) to `p` bits.
    ///
    /// When `sticky` is set, `m` should carry at least `p + 2` significant bits for the directed modes
    /// to produce the exact result; shorter values are extended.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow, ExponentUnderflow: the result does not fit the exponent range.
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn from_int_parts(
        s: Sign,
        m: &Mantissa,
        lsb: isize,
        sticky: bool,
        p: usize,
        rm: RoundingMode,
    ) -> Result<Self, Error> {
        if m.is_zero() {
            return Self::new2(p, s, sticky);
        }

        let r = round_mantissa(m, sticky, p, rm, s.is_positive())?;
        let e = exponent_in_range(lsb + r.e, s)?;

        Ok(BigFloatNumber { e, s, m: r.m, inexact: r.inexact })
    }

    /// Constructs a number with precision `p` from a single word.
    pub fn from_word(d: Word, p: usize) -> Result<Self, Error> {
        Self::from_int_parts(Sign::Pos, &Mantissa::from_word(d)?, 0, false, p, RoundingMode::ToEven)
    }

    /// Constructs an exact number from a `usize`.
    pub fn from_usize(u: usize) -> Result<Self, Error> {
        Self::from_word(u as Word, WORD_BIT_SIZE)
    }

    /// Constructs an exact number from an `i64`.
    pub fn from_i64(i: i64) -> Result<Self, Error> {
        let mut ret = Self::from_word(i.unsigned_abs(), WORD_BIT_SIZE)?;
        if i < 0 {
            ret.s = Sign::Neg;
        }
        Ok(ret)
    }

    /// Constructs a number from normalized words, the exponent, and the sign.
    pub fn from_raw_parts(m: &[Word], e: Exponent, s: Sign) -> Result<Self, Error> {
        if m.is_empty() || m[m.len() - 1] & WORD_SIGNIFICANT_BIT == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(BigFloatNumber { e, s, m: Mantissa::from_words(m)?, inexact: false })
    }

    /// Constructs an exact number from a finite `f64`.
    pub fn from_f64(f: f64) -> Result<Self, Error> {
        if !f.is_finite() {
            return Err(Error::InvalidArgument);
        }

        let bits = f.to_bits();
        let s = if bits >> 63 != 0 { Sign::Neg } else { Sign::Pos };
        let exp_bits = ((bits >> 52) & 0x7ff) as isize;
        let frac = bits & ((1 << 52) - 1);

        let (m, lsb) = if exp_bits == 0 { (frac, -1074) } else { (frac | (1 << 52), exp_bits - 1075) };

        Self::from_int_parts(s, &Mantissa::from_word(m)?, lsb, false, WORD_BIT_SIZE, RoundingMode::ToEven)
    }

    /// Converts to `f64` rounding to nearest, ties to even.
    pub fn to_f64(&self) -> f64 {
        let sign_bit = if self.is_negative() { 1u64 << 63 } else { 0 };
        if self.is_zero() {
            return f64::from_bits(sign_bit);
        }

        let e = self.e as isize;
        if e > 1024 {
            return f64::from_bits(sign_bit | f64::INFINITY.to_bits());
        }
        if e < -1074 {
            // below half of the smallest subnormal
            return f64::from_bits(sign_bit);
        }

        // the result is q * 2^lsb where q has at most 53 bits
        let lsb = (e - 53).max(-1074);
        let sh = (lsb - self.int_exp()) as usize;
        let digits = self.m.digits();
        let mut q = word_at_bit(digits, sh);
        let round_bit = self.m.bit(sh - 1);
        let sticky = self.m.any_bit_below(sh - 1);
        if round_up(RoundingMode::ToEven, true, q & 1 != 0, round_bit, sticky) {
            q += 1;
        }

        if q == 0 {
            return f64::from_bits(sign_bit);
        }

        let l = (WORD_BIT_SIZE - q.leading_zeros() as usize) as isize;
        let top = lsb + l - 1;
        if top > 1023 {
            return f64::from_bits(sign_bit | f64::INFINITY.to_bits());
        }

        let bits = if top >= -1022 {
            let frac = if l <= 53 { q << (53 - l) } else { q >> (l - 53) };
            (((top + 1023) as u64) << 52) | (frac & ((1 << 52) - 1))
        } else {
            q
        };

        f64::from_bits(sign_bit | bits)
    }

    /// Returns a copy of the number.
    pub fn clone(&self) -> Result<Self, Error> {
        Ok(BigFloatNumber { e: self.e, s: self.s, m: self.m.try_clone()?, inexact: self.inexact })
    }

    /// Returns a copy of the number. Allocation failure aborts like it does for the standard collections.
    pub(crate) fn dup(&self) -> Self {
        BigFloatNumber { e: self.e, s: self.s, m: Clone::clone(&self.m), inexact: self.inexact }
    }

    pub fn exponent(&self) -> Exponent {
        self.e
    }

    /// Sets the exponent. The value must be in range.
    pub fn set_exponent(&mut self, e: Exponent) {
        self.e = e;
    }

    /// Multiplies by 2^`n`.
    pub fn mul_pow2(&mut self, n: isize) -> Result<(), Error> {
        if !self.is_zero() {
            self.e = exponent_in_range(self.e as isize + n, self.s)?;
        }
        Ok(())
    }

    pub fn sign(&self) -> Sign {
        self.s
    }

    pub fn set_sign(&mut self, s: Sign) {
        self.s = s;
    }

    pub fn inv_sign(&mut self) {
        self.s = self.s.invert();
    }

    pub fn is_positive(&self) -> bool {
        self.s == Sign::Pos
    }

    pub fn is_negative(&self) -> bool {
        self.s == Sign::Neg
    }

    pub fn is_zero(&self) -> bool {
        self.m.is_zero()
    }

    pub fn inexact(&self) -> bool {
        self.inexact
    }

    pub fn set_inexact(&mut self, inexact: bool) {
        self.inexact = inexact;
    }

    pub fn mantissa(&self) -> &Mantissa {
        &self.m
    }

    /// Number of bits the mantissa can hold.
    pub fn mantissa_max_bit_len(&self) -> usize {
        self.m.len() * WORD_BIT_SIZE
    }

    /// Exponent of the least significant bit of the mantissa.
    pub fn int_exp(&self) -> isize {
        self.e as isize - self.mantissa_max_bit_len() as isize
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Result<Self, Error> {
        let mut ret = self.clone()?;
        ret.s = Sign::Pos;
        Ok(ret)
    }

    /// Returns the negated value.
    pub fn neg(&self) -> Result<Self, Error> {
        let mut ret = self.clone()?;
        ret.inv_sign();
        Ok(ret)
    }

    /// Rounds the number to `p` bits.
    pub fn set_precision(&mut self, p: usize, rm: RoundingMode) -> Result<(), Error> {
        if self.is_zero() {
            self.m = Mantissa::new(words_for(p).max(1))?;
            return Ok(());
        }

        let r = round_mantissa(&self.m, false, p, rm, self.is_positive())?;
        self.e = exponent_in_range(self.int_exp() + r.e, self.s)?;
        self.m = r.m;
        self.inexact |= r.inexact;

        Ok(())
    }

    /// Rounds the number to `p` bits if the number is exact, or if the approximation with
    /// `s` correct bits is known to round the same way as the approximated value.
    /// Returns false if the number needs to be computed with higher precision.
    pub fn try_set_precision(&mut self, p: usize, rm: RoundingMode, s: usize) -> Result<bool, Error> {
        if !self.inexact {
            self.set_precision(p, rm)?;
            return Ok(true);
        }

        if self.is_zero() || !can_round(self.m.digits(), p, s, rm) {
            return Ok(false);
        }

        self.set_precision(p, rm)?;

        Ok(true)
    }

    /// Returns the number moved toward or away from zero by an amount smaller than any bit of its mantissa.
    pub fn add_correction(&self, toward_zero: bool) -> Result<Self, Error> {
        let l = self.m.len();
        let mut m = Mantissa::new(l + 1)?;
        m.digits_mut()[1..].copy_from_slice(self.m.digits());

        if toward_zero {
            m.sub_word(1);
        } else {
            m.add_word(1)?;
        }

        let mut ret = Self::from_int_parts(
            self.s,
            &m,
            self.int_exp() - WORD_BIT_SIZE as isize,
            false,
            (l + 1) * WORD_BIT_SIZE,
            RoundingMode::ToZero,
        )?;
        ret.inexact = true;

        Ok(ret)
    }

    /// Compares absolute values.
    pub fn abs_cmp(&self, d2: &Self) -> Ordering {
        match (self.is_zero(), d2.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        if self.e != d2.e {
            return self.e.cmp(&d2.e);
        }

        let mut i1 = self.m.digits().iter().rev();
        let mut i2 = d2.m.digits().iter().rev();
        loop {
            match (i1.next(), i2.next()) {
                (Some(a), Some(b)) => {
                    if a != b {
                        return a.cmp(b);
                    }
                }
                (Some(a), None) => {
                    if *a != 0 {
                        return Ordering::Greater;
                    }
                }
                (None, Some(b)) => {
                    if *b != 0 {
                        return Ordering::Less;
                    }
                }
                (None, None) => return Ordering::Equal,
            }
        }
    }

    /// Compares values. Zeroes of different signs are equal.
    pub fn cmp(&self, d2: &Self) -> Ordering {
        match (self.is_zero(), d2.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if d2.is_positive() { Ordering::Less } else { Ordering::Greater };
            }
            (false, true) => {
                return if self.is_positive() { Ordering::Greater } else { Ordering::Less };
            }
            _ => {}
        }

        if self.s != d2.s {
            return if self.is_positive() { Ordering::Greater } else { Ordering::Less };
        }

        let c = self.abs_cmp(d2);
        if self.is_positive() {
            c
        } else {
            c.reverse()
        }
    }

    /// Returns true if the number is an integer.
    pub fn is_int(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.e <= 0 {
            return false;
        }
        let ie = self.int_exp();
        ie >= 0 || !self.m.any_bit_below((-ie) as usize)
    }

    /// Returns true if the number is an odd integer.
    pub fn is_odd_int(&self) -> bool {
        if self.is_zero() || self.e <= 0 {
            return false;
        }
        let ie = self.int_exp();
        if ie > 0 {
            return false;
        }
        let sh = (-ie) as usize;
        self.is_int() && self.m.bit(sh)
    }

    /// Rounds the number to an integer using rounding mode `rm`. The precision of the result is
    /// sufficient to hold the integer exactly.
    pub fn round_to_int(&self, rm: RoundingMode) -> Result<Self, Error> {
        let ie = self.int_exp();
        if self.is_zero() || ie >= 0 {
            return self.clone();
        }

        let sh = (-ie) as usize;
        let mut q = self.m.shr(sh)?;
        let round_bit = self.m.bit(sh - 1);
        let sticky = self.m.any_bit_below(sh - 1);

        if round_up(rm, self.is_positive(), q.is_odd(), round_bit, sticky) {
            q.add_word(1)?;
        }

        let mut ret = if q.is_zero() {
            Self::new2(WORD_BIT_SIZE, self.s, false)?
        } else {
            Self::from_int_parts(self.s, &q, 0, false, q.bit_len(), RoundingMode::ToZero)?
        };
        ret.inexact = self.inexact;

        Ok(ret)
    }

    /// Returns the absolute value of an integer modulo 2^`WORD_BIT_SIZE`.
    pub fn int_low_word(&self) -> Result<Word, Error> {
        let ie = self.int_exp();
        if self.is_zero() || ie >= WORD_BIT_SIZE as isize {
            Ok(0)
        } else if ie >= 0 {
            Ok(self.m.digits()[0] << ie)
        } else {
            Ok(self.m.shr((-ie) as usize)?.low_word())
        }
    }

    /// Converts an integer to `i64`. Returns None if the value does not fit.
    pub fn to_i64(&self) -> Result<Option<i64>, Error> {
        if self.is_zero() {
            return Ok(Some(0));
        }
        if self.e > 63 {
            return Ok(None);
        }
        let v = self.int_low_word()? as i64;
        Ok(Some(if self.is_negative() { -v } else { v }))
    }

    /// Adds `d2` and rounds the result to `p` bits.
    pub fn add(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        self.add_sub(d2, p, rm, false)
    }

    /// Subtracts `d2` and rounds the result to `p` bits.
    pub fn sub(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        self.add_sub(d2, p, rm, true)
    }

    /// Exact sum.
    pub fn add_full_prec(&self, d2: &Self) -> Result<Self, Error> {
        let p = self.full_prec_with(d2);
        self.add(d2, p, RoundingMode::ToZero)
    }

    /// Exact difference.
    pub fn sub_full_prec(&self, d2: &Self) -> Result<Self, Error> {
        let p = self.full_prec_with(d2);
        self.sub(d2, p, RoundingMode::ToZero)
    }

    // Precision sufficient for an exact sum or difference.
    fn full_prec_with(&self, d2: &Self) -> usize {
        if self.is_zero() {
            return d2.mantissa_max_bit_len();
        }
        if d2.is_zero() {
            return self.mantissa_max_bit_len();
        }
        let top = self.e.max(d2.e) as isize + 1;
        let bottom = self.int_exp().min(d2.int_exp());
        (top - bottom) as usize
    }

    fn add_sub(&self, d2: &Self, p: usize, rm: RoundingMode, subtract: bool) -> Result<Self, Error> {
        let s2 = if subtract { d2.s.invert() } else { d2.s };
        let inexact = self.inexact || d2.inexact;

        if d2.is_zero() || self.is_zero() {
            let (src, s) = if d2.is_zero() { (self, self.s) } else { (d2, s2) };
            if src.is_zero() {
                // sum of zeroes
                let s = if self.s == s2 {
                    self.s
                } else if rm == RoundingMode::Down {
                    Sign::Neg
                } else {
                    Sign::Pos
                };
                return Self::new2(p, s, inexact);
            }
            let mut ret = src.clone()?;
            ret.s = s;
            ret.set_precision(p, rm)?;
            ret.inexact |= inexact;
            return Ok(ret);
        }

        let (a, sa, b, sb) = if self.e >= d2.e { (self, self.s, d2, s2) } else { (d2, s2, self, self.s) };

        let a_int = a.int_exp();
        let b_int = b.int_exp();
        let k = (p + 2).saturating_sub(a.mantissa_max_bit_len());

        let mut ret = if (b.e as isize) <= a_int - k as isize {
            // b is smaller than one unit of a extended to at least p + 2 bits
            let mut am = a.m.shl(k)?;
            if sa != sb {
                am.sub_word(1);
            }
            Self::from_int_parts(sa, &am, a_int - k as isize, true, p, rm)?
        } else {
            let lsb = a_int.min(b_int);
            let am = a.m.shl((a_int - lsb) as usize)?;
            let bm = b.m.shl((b_int - lsb) as usize)?;

            if sa == sb {
                Self::from_int_parts(sa, &am.add(&bm)?, lsb, false, p, rm)?
            } else {
                match am.cmp(&bm) {
                    Ordering::Greater => Self::from_int_parts(sa, &am.sub(&bm)?, lsb, false, p, rm)?,
                    Ordering::Less => Self::from_int_parts(sb, &bm.sub(&am)?, lsb, false, p, rm)?,
                    Ordering::Equal => {
                        let s = if rm == RoundingMode::Down { Sign::Neg } else { Sign::Pos };
                        Self::new2(p, s, false)?
                    }
                }
            }
        };

        ret.inexact |= inexact;
        Ok(ret)
    }

    /// Multiplies by `d2` and rounds the result to `p` bits.
    pub fn mul(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        let s = self.s.mul(d2.s);
        let inexact = self.inexact || d2.inexact;

        if self.is_zero() || d2.is_zero() {
            return Self::new2(p, s, inexact);
        }

        let m = self.m.mul(&d2.m)?;
        let mut ret = Self::from_int_parts(s, &m, self.int_exp() + d2.int_exp(), false, p, rm)?;
        ret.inexact |= inexact;

        Ok(ret)
    }

    /// Exact product.
    pub fn mul_full_prec(&self, d2: &Self) -> Result<Self, Error> {
        let p = self.mantissa_max_bit_len() + d2.mantissa_max_bit_len();
        self.mul(d2, p, RoundingMode::ToZero)
    }

    /// Divides by `d2` and rounds the result to `p` bits.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d2` is zero.
    pub fn div(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        if d2.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let s = self.s.mul(d2.s);
        let inexact = self.inexact || d2.inexact;

        if self.is_zero() {
            return Self::new2(p, s, inexact);
        }

        let la = self.m.bit_len();
        let lb = d2.m.bit_len();
        let k = (p + 2 + lb).saturating_sub(la);

        let a = self.m.shl(k)?;
        let (q, r) = a.div_rem(&d2.m)?;

        let lsb = self.int_exp() - k as isize - d2.int_exp();
        let mut ret = Self::from_int_parts(s, &q, lsb, !r.is_zero(), p, rm)?;
        ret.inexact |= inexact;

        Ok(ret)
    }

    /// Returns the reciprocal rounded to `p` bits.
    pub fn reciprocal(&self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        let one = Self::from_word(1, WORD_BIT_SIZE)?;
        one.div(self, p, rm)
    }
}
