//! Natural numbers backing mantissas.

use crate::common::buf::WordBuf;
use crate::common::util::add_carry;
use crate::common::util::any_bit_below;
use crate::common::util::bit_at;
use crate::common::util::bit_len;
use crate::common::util::shift_slice_left;
use crate::common::util::shift_slice_right;
use crate::common::util::sub_borrow;
use crate::common::util::words_for;
use crate::defs::DoubleWord;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;
use core::cmp::Ordering;
use itertools::izip;

/// Largest power of 10 fitting in a word.
pub(crate) const DECIMAL_BASE: Word = 10_000_000_000_000_000_000;

/// Number of decimal digits in `DECIMAL_BASE`.
pub(crate) const DECIMAL_BASE_LOG10: usize = 19;

/// Natural number stored as a sequence of words, least significant word first.
/// Leading zero words are allowed.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub(crate) struct Mantissa {
    pub(super) m: WordBuf,
}

impl Mantissa {
    /// Zero with `len` words.
    pub fn new(len: usize) -> Result<Self, Error> {
        Ok(Mantissa { m: WordBuf::new(len)? })
    }

    pub fn from_word(d: Word) -> Result<Self, Error> {
        Ok(Mantissa { m: WordBuf::from_slice(&[d])? })
    }

    pub fn from_words(s: &[Word]) -> Result<Self, Error> {
        Ok(Mantissa { m: WordBuf::from_slice(s)? })
    }

    /// Returns 2^n.
    pub fn pow2(n: usize) -> Result<Self, Error> {
        let mut ret = Self::new(n / WORD_BIT_SIZE + 1)?;
        ret.m[n / WORD_BIT_SIZE] = 1 << (n % WORD_BIT_SIZE);
        Ok(ret)
    }

    /// Returns `base`^`n`.
    pub fn pow_word(base: Word, mut n: usize) -> Result<Self, Error> {
        let mut ret = Self::from_word(1)?;
        let mut x = Self::from_word(base)?;
        while n > 0 {
            if n & 1 != 0 {
                ret = ret.mul(&x)?;
            }
            n >>= 1;
            if n > 0 {
                x = x.mul(&x)?;
            }
        }
        Ok(ret)
    }

    pub fn try_clone(&self) -> Result<Self, Error> {
        Ok(Mantissa { m: self.m.try_clone()? })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.m.len()
    }

    #[inline]
    pub fn digits(&self) -> &[Word] {
        &self.m
    }

    #[inline]
    pub fn digits_mut(&mut self) -> &mut [Word] {
        &mut self.m
    }

    pub fn is_zero(&self) -> bool {
        self.m.iter().all(|d| *d == 0)
    }

    pub fn is_odd(&self) -> bool {
        self.m.first().map_or(false, |d| d & 1 != 0)
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        bit_len(&self.m)
    }

    #[inline]
    pub fn bit(&self, n: usize) -> bool {
        bit_at(&self.m, n)
    }

    /// True if any of the `n` least significant bits is set.
    pub fn any_bit_below(&self, n: usize) -> bool {
        any_bit_below(&self.m, n)
    }

    /// Number of trailing zero bits, 0 for zero.
    pub fn trailing_zeros(&self) -> usize {
        for (i, d) in self.m.iter().enumerate() {
            if *d != 0 {
                return i * WORD_BIT_SIZE + d.trailing_zeros() as usize;
            }
        }
        0
    }

    /// Removes leading zero words.
    pub fn trim(&mut self) {
        self.m.trunc_leading_zeroes();
    }

    /// Least significant word.
    pub fn low_word(&self) -> Word {
        self.m.first().copied().unwrap_or(0)
    }

    /// Returns `self` * 2^`n`.
    pub fn shl(&self, n: usize) -> Result<Self, Error> {
        let bl = self.bit_len();
        let mut ret = Self::new(words_for(bl + n).max(1))?;
        let l = words_for(bl).min(ret.len());
        ret.m[..l].copy_from_slice(&self.m[..l]);
        shift_slice_left(&mut ret.m, n);
        Ok(ret)
    }

    /// Returns `self` / 2^`n` rounded down.
    pub fn shr(&self, n: usize) -> Result<Self, Error> {
        let bl = self.bit_len();
        let mut ret = Self::from_words(&self.m[..words_for(bl)])?;
        shift_slice_right(&mut ret.m, n);
        ret.trim();
        Ok(ret)
    }

    /// Shifts the number so that its most significant bit becomes the most significant bit of `n` words.
    /// Bits shifted out are lost.
    pub fn normalized(&self, n: usize) -> Result<Self, Error> {
        let bl = self.bit_len();
        let width = n * WORD_BIT_SIZE;
        let mut ret = Self::new(n)?;
        if bl == 0 {
            return Ok(ret);
        }
        if bl <= width {
            let l = words_for(bl);
            ret.m[..l].copy_from_slice(&self.m[..l]);
            shift_slice_left(&mut ret.m, width - bl);
        } else {
            let tmp = self.shr(bl - width)?;
            let l = tmp.len().min(n);
            ret.m[..l].copy_from_slice(&tmp.m[..l]);
        }
        Ok(ret)
    }

    /// Compares numeric values.
    pub fn cmp(&self, other: &Self) -> Ordering {
        let l1 = words_for(self.bit_len());
        let l2 = words_for(other.bit_len());
        if l1 != l2 {
            return l1.cmp(&l2);
        }
        for (a, b) in self.m[..l1].iter().rev().zip(other.m[..l2].iter().rev()) {
            if a != b {
                return a.cmp(b);
            }
        }
        Ordering::Equal
    }

    /// Returns `self` + `other`.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        let (a, b) = if self.len() >= other.len() { (self, other) } else { (other, self) };
        let mut ret = Self::new(a.len() + 1)?;
        let mut c = 0;
        let (r_lo, r_hi) = ret.m.split_at_mut(b.len());
        for (x, y, r) in izip!(a.m.iter(), b.m.iter(), r_lo.iter_mut()) {
            c = add_carry(*x, *y, c, r);
        }
        for (x, r) in a.m[b.len()..].iter().zip(r_hi.iter_mut()) {
            c = add_carry(*x, 0, c, r);
        }
        let l = ret.len();
        ret.m[l - 1] = c;
        ret.trim();
        Ok(ret)
    }

    /// Returns `self` - `other`. `self` must not be smaller than `other`.
    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        debug_assert!(self.cmp(other) != Ordering::Less);
        let mut ret = self.try_clone()?;
        ret.sub_assign(other);
        ret.trim();
        Ok(ret)
    }

    /// Subtracts `other` in place. `self` must not be smaller than `other`.
    pub fn sub_assign(&mut self, other: &Self) {
        let ol = words_for(other.bit_len());
        let mut c = 0;
        let (lo, hi) = self.m.split_at_mut(ol);
        for (x, y) in lo.iter_mut().zip(other.m[..ol].iter()) {
            c = sub_borrow(*x, *y, c, x);
        }
        for x in hi.iter_mut() {
            if c == 0 {
                break;
            }
            c = sub_borrow(*x, 0, c, x);
        }
        debug_assert!(c == 0);
    }

    /// Adds `d` in place.
    pub fn add_word(&mut self, d: Word) -> Result<(), Error> {
        let mut c = d;
        for x in self.m.iter_mut() {
            if c == 0 {
                return Ok(());
            }
            c = add_carry(*x, 0, c, x);
        }
        if c > 0 {
            self.m.try_push(c)?;
        }
        Ok(())
    }

    /// Subtracts `d` in place. `self` must not be smaller than `d`.
    pub fn sub_word(&mut self, d: Word) {
        let mut c = d;
        for x in self.m.iter_mut() {
            if c == 0 {
                break;
            }
            c = sub_borrow(*x, c, 0, x);
        }
        debug_assert!(c == 0);
    }

    /// Returns `self` * `d`.
    pub fn mul_word(&self, d: Word) -> Result<Self, Error> {
        let mut ret = Self::new(self.len() + 1)?;
        let mut c: DoubleWord = 0;
        for (x, r) in self.m.iter().zip(ret.m.iter_mut()) {
            let v = *x as DoubleWord * d as DoubleWord + c;
            *r = v as Word;
            c = v >> WORD_BIT_SIZE;
        }
        let l = ret.len();
        ret.m[l - 1] = c as Word;
        ret.trim();
        Ok(ret)
    }

    /// Replaces `self` with `self` * `mul` + `add`.
    pub fn mul_add_word(&mut self, mul: Word, add: Word) -> Result<(), Error> {
        let mut c = add as DoubleWord;
        for x in self.m.iter_mut() {
            let v = *x as DoubleWord * mul as DoubleWord + c;
            *x = v as Word;
            c = v >> WORD_BIT_SIZE;
        }
        if c > 0 {
            self.m.try_push(c as Word)?;
        }
        Ok(())
    }

    /// Divides in place by `d` and returns the remainder.
    pub fn div_rem_word(&mut self, d: Word) -> Word {
        debug_assert!(d != 0);
        let mut r: DoubleWord = 0;
        for x in self.m.iter_mut().rev() {
            let v = (r << WORD_BIT_SIZE) | *x as DoubleWord;
            *x = (v / d as DoubleWord) as Word;
            r = v % d as DoubleWord;
        }
        r as Word
    }

    /// Decimal representation without leading zeroes. Zero is "0".
    pub fn to_decimal(&self) -> Result<String, Error> {
        let mut n = self.try_clone()?;
        n.trim();
        let mut chunks = Vec::new();
        chunks.try_reserve_exact(n.len() * 2 + 1)?;
        while !n.is_zero() {
            chunks.push(n.div_rem_word(DECIMAL_BASE));
            n.trim();
        }
        let mut ret = String::new();
        ret.try_reserve_exact(chunks.len() * DECIMAL_BASE_LOG10 + 1)?;
        match chunks.pop() {
            Some(top) => {
                ret.push_str(&top.to_string());
                for c in chunks.iter().rev() {
                    ret.push_str(&format!("{:019}", c));
                }
            }
            None => ret.push('0'),
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Mantissa::from_words(&[Word::MAX, Word::MAX]).unwrap();
        let b = Mantissa::from_word(1).unwrap();

        let s = a.add(&b).unwrap();
        assert_eq!(s.digits(), &[0, 0, 1]);
        assert_eq!(s.bit_len(), 129);
        assert_eq!(s.trailing_zeros(), 128);

        let d = s.sub(&b).unwrap();
        assert_eq!(d.cmp(&a), Ordering::Equal);

        let mut w = Mantissa::from_words(&[0, 0, 1]).unwrap();
        w.sub_word(1);
        assert_eq!(w.digits(), &[Word::MAX, Word::MAX, 0]);
        w.add_word(1).unwrap();
        assert_eq!(w.digits(), &[0, 0, 1]);

        let mut x = Mantissa::from_word(Word::MAX).unwrap();
        x.add_word(1).unwrap();
        assert_eq!(x.digits(), &[0, 1]);

        assert_eq!(b.cmp(&a), Ordering::Less);
        assert_eq!(Mantissa::from_words(&[5, 0, 0]).unwrap().cmp(&Mantissa::from_word(5).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_shifts() {
        let a = Mantissa::from_word(0b1011).unwrap();
        let s = a.shl(126).unwrap();
        assert_eq!(s.bit_len(), 130);
        assert!(s.bit(126) && s.bit(127) && !s.bit(128) && s.bit(129));
        assert!(!s.any_bit_below(126));
        assert!(s.any_bit_below(127));
        let r = s.shr(127).unwrap();
        assert_eq!(r.digits(), &[0b101]);

        let n = a.normalized(2).unwrap();
        assert_eq!(n.digits(), &[0, 0xB000000000000000]);
        let n = s.normalized(1).unwrap();
        assert_eq!(n.digits(), &[0xB000000000000000]);

        assert_eq!(Mantissa::pow2(70).unwrap().bit_len(), 71);
    }

    #[test]
    fn test_word_ops() {
        let a = Mantissa::from_words(&[Word::MAX, 3]).unwrap();
        let m = a.mul_word(4).unwrap();
        assert_eq!(m.digits(), &[Word::MAX - 3, 15]);

        let mut x = Mantissa::from_word(0).unwrap();
        for d in [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1] {
            x.mul_add_word(10, d).unwrap();
        }
        assert_eq!(x.to_decimal().unwrap(), "123456789012345678901");
        let r = x.div_rem_word(1000);
        assert_eq!(r, 901);
        assert_eq!(x.to_decimal().unwrap(), "123456789012345678");

        assert_eq!(Mantissa::new(3).unwrap().to_decimal().unwrap(), "0");
        assert_eq!(Mantissa::pow_word(10, 25).unwrap().to_decimal().unwrap(), "10000000000000000000000000");
        assert_eq!(Mantissa::pow_word(7, 0).unwrap().to_decimal().unwrap(), "1");
    }
}
