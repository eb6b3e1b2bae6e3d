//! Multiplication: schoolbook for short operands, Karatsuba otherwise.

use crate::common::buf::WordBuf;
use crate::common::util::add_carry;
use crate::common::util::bit_len;
use crate::common::util::sub_borrow;
use crate::common::util::words_for;
use crate::defs::DoubleWord;
use crate::defs::Error;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;
use crate::mantissa::Mantissa;
use itertools::izip;

/// Operand length in words starting from which Karatsuba is used.
const KARATSUBA_THRESHOLD: usize = 32;

impl Mantissa {
    /// Returns `self` * `other`.
    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        let a = &self.m[..words_for(self.bit_len())];
        let b = &other.m[..words_for(other.bit_len())];
        let mut ret = Self::new(a.len() + b.len())?;
        if !a.is_empty() && !b.is_empty() {
            Self::mul_slices(a, b, &mut ret.m)?;
        }
        ret.trim();
        Ok(ret)
    }

    // m3 must be zeroed and hold at least m1.len() + m2.len() words.
    fn mul_slices(m1: &[Word], m2: &[Word], m3: &mut [Word]) -> Result<(), Error> {
        if m1.len().min(m2.len()) < KARATSUBA_THRESHOLD {
            Self::mul_basic(m1, m2, m3);
            Ok(())
        } else {
            Self::toom2(m1, m2, m3)
        }
    }

    fn mul_basic(m1: &[Word], m2: &[Word], m3: &mut [Word]) {
        for (i, d1) in m1.iter().enumerate() {
            if *d1 == 0 {
                continue;
            }
            let mut c: DoubleWord = 0;
            for (d2, d3) in m2.iter().zip(m3[i..].iter_mut()) {
                let v = *d1 as DoubleWord * *d2 as DoubleWord + *d3 as DoubleWord + c;
                *d3 = v as Word;
                c = v >> WORD_BIT_SIZE;
            }
            m3[i + m2.len()] = c as Word;
        }
    }

    // s3 = s1 + s2, s3 must be longer than both s1 and s2.
    fn add_slices(s1: &[Word], s2: &[Word], s3: &mut [Word]) {
        let (long, short) = if s1.len() >= s2.len() { (s1, s2) } else { (s2, s1) };
        let mut c = 0;
        let (lo, hi) = s3.split_at_mut(short.len());
        for (a, b, x) in izip!(long.iter(), short.iter(), lo.iter_mut()) {
            c = add_carry(*a, *b, c, x);
        }
        let mut hi = hi.iter_mut();
        for (a, x) in long[short.len()..].iter().zip(hi.by_ref()) {
            c = add_carry(*a, 0, c, x);
        }
        for x in hi {
            *x = c;
            c = 0;
        }
    }

    // s1 -= s2, the result must be non-negative.
    fn sub_assign_slices(s1: &mut [Word], s2: &[Word]) {
        let s2 = &s2[..words_for(bit_len(s2))];
        let (lo, hi) = s1.split_at_mut(s2.len());
        let mut c = 0;
        for (x, y) in lo.iter_mut().zip(s2.iter()) {
            c = sub_borrow(*x, *y, c, x);
        }
        for x in hi.iter_mut() {
            if c == 0 {
                break;
            }
            c = sub_borrow(*x, 0, c, x);
        }
    }

    // s1 += s2, the sum must fit in s1.
    fn add_assign_slices(s1: &mut [Word], s2: &[Word]) {
        let s2 = &s2[..words_for(bit_len(s2))];
        let (lo, hi) = s1.split_at_mut(s2.len());
        let mut c = 0;
        for (x, y) in lo.iter_mut().zip(s2.iter()) {
            c = add_carry(*x, *y, c, x);
        }
        for x in hi.iter_mut() {
            if c == 0 {
                break;
            }
            c = add_carry(*x, 0, c, x);
        }
    }

    // Karatsuba: (a1*B + a0)(b1*B + b0) = z2*B^2 + ((a0 + a1)(b0 + b1) - z2 - z0)*B + z0
    fn toom2(m1: &[Word], m2: &[Word], m3: &mut [Word]) -> Result<(), Error> {
        let n = (m1.len().min(m2.len()) + 1) >> 1;
        let n2 = n << 1;

        let (a0, a1) = m1.split_at(n);
        let (b0, b1) = m2.split_at(n);

        let total = m1.len() + m2.len();
        let (z0, z2) = m3[..total].split_at_mut(n2);
        Self::mul_slices(a0, b0, z0)?;
        Self::mul_slices(a1, b1, &mut z2[..a1.len() + b1.len()])?;

        let x1l = a0.len().max(a1.len()) + 1;
        let x2l = b0.len().max(b1.len()) + 1;
        let mut buf = WordBuf::new(x1l + x2l + x1l + x2l)?;
        let (x1, rest) = buf.split_at_mut(x1l);
        let (x2, z1) = rest.split_at_mut(x2l);

        Self::add_slices(a0, a1, x1);
        Self::add_slices(b0, b1, x2);

        let x1 = &x1[..words_for(bit_len(x1))];
        let x2 = &x2[..words_for(bit_len(x2))];
        Self::mul_slices(x1, x2, &mut z1[..x1.len() + x2.len()])?;

        Self::sub_assign_slices(z1, &m3[..n2]);
        Self::sub_assign_slices(z1, &m3[n2..total]);
        Self::add_assign_slices(&mut m3[n..total], z1);

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    fn random_mantissa(len: usize) -> Mantissa {
        let mut m = Mantissa::new(len).unwrap();
        for d in m.digits_mut() {
            *d = random();
        }
        m
    }

    #[test]
    fn test_mul_small() {
        let a = Mantissa::from_words(&[Word::MAX, Word::MAX]).unwrap();
        let p = a.mul(&a).unwrap();
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(p.digits(), &[1, 0, Word::MAX - 1, Word::MAX]);

        let z = Mantissa::new(2).unwrap();
        assert!(a.mul(&z).unwrap().is_zero());
    }

    #[test]
    fn test_karatsuba() {
        for _ in 0..20 {
            let l1 = KARATSUBA_THRESHOLD + random::<usize>() % 100;
            let l2 = KARATSUBA_THRESHOLD + random::<usize>() % 100;
            let a = random_mantissa(l1);
            let b = random_mantissa(l2);

            let mut expected = Mantissa::new(l1 + l2).unwrap();
            Mantissa::mul_basic(a.digits(), b.digits(), expected.digits_mut());
            expected.trim();

            let p = a.mul(&b).unwrap();
            assert_eq!(p.cmp(&expected), core::cmp::Ordering::Equal);

            // distributivity check against word multiplication
            let w = random::<Word>() | 1;
            let lhs = a.mul_word(w).unwrap().mul(&b).unwrap();
            let rhs = p.mul_word(w).unwrap();
            assert_eq!(lhs.cmp(&rhs), core::cmp::Ordering::Equal);
        }
    }
}
