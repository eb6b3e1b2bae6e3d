//! Long division.

use crate::common::util::shift_slice_left;
use crate::common::util::shift_slice_right;
use crate::common::util::words_for;
use crate::defs::DoubleWord;
use crate::defs::Error;
use crate::defs::SignedWord;
use crate::defs::Word;
use crate::defs::WORD_BASE;
use crate::defs::WORD_BIT_SIZE;
use crate::mantissa::Mantissa;
use core::cmp::Ordering;

impl Mantissa {
    /// Returns the quotient and the remainder of `self` / `d`. `d` must not be zero.
    pub fn div_rem(&self, d: &Self) -> Result<(Self, Self), Error> {
        let bl = words_for(d.bit_len());
        if bl == 0 {
            return Err(Error::DivisionByZero);
        }

        if self.cmp(d) == Ordering::Less {
            let mut r = self.try_clone()?;
            r.trim();
            return Ok((Self::new(1)?, r));
        }

        if bl == 1 {
            let mut q = self.try_clone()?;
            let r = q.div_rem_word(d.m[0]);
            q.trim();
            return Ok((q, Self::from_word(r)?));
        }

        Self::knuth_div(self, d)
    }

    // Knuth's algorithm D for a divisor of at least two words.
    fn knuth_div(a: &Self, b: &Self) -> Result<(Self, Self), Error> {
        let n = words_for(b.bit_len());
        let al = words_for(a.bit_len());
        let shift = b.m[n - 1].leading_zeros() as usize;

        let mut v = Self::from_words(&b.m[..n])?;
        shift_slice_left(&mut v.m, shift);

        let mut u = Self::new(al + 1)?;
        u.m[..al].copy_from_slice(&a.m[..al]);
        shift_slice_left(&mut u.m, shift);

        let m = al - n;
        let mut q = Self::new(m + 1)?;

        let vh = v.m[n - 1] as DoubleWord;
        let vl = v.m[n - 2] as DoubleWord;

        for j in (0..=m).rev() {
            let num = ((u.m[j + n] as DoubleWord) << WORD_BIT_SIZE) | u.m[j + n - 1] as DoubleWord;
            let mut qhat = num / vh;
            let mut rhat = num % vh;

            while qhat >= WORD_BASE
                || qhat * vl > ((rhat << WORD_BIT_SIZE) | u.m[j + n - 2] as DoubleWord)
            {
                qhat -= 1;
                rhat += vh;
                if rhat >= WORD_BASE {
                    break;
                }
            }

            // multiply and subtract
            let mut k: SignedWord = 0;
            let mut t: SignedWord;
            for i in 0..n {
                let p = qhat * v.m[i] as DoubleWord;
                t = u.m[i + j] as SignedWord - k - (p & (Word::MAX as DoubleWord)) as SignedWord;
                u.m[i + j] = t as Word;
                k = (p >> WORD_BIT_SIZE) as SignedWord - (t >> WORD_BIT_SIZE);
            }
            t = u.m[j + n] as SignedWord - k;
            u.m[j + n] = t as Word;

            if t < 0 {
                // add back
                qhat -= 1;
                let mut c: DoubleWord = 0;
                for i in 0..n {
                    let s = u.m[i + j] as DoubleWord + v.m[i] as DoubleWord + c;
                    u.m[i + j] = s as Word;
                    c = s >> WORD_BIT_SIZE;
                }
                u.m[j + n] = u.m[j + n].wrapping_add(c as Word);
            }

            q.m[j] = qhat as Word;
        }

        let mut r = Self::from_words(&u.m[..n])?;
        shift_slice_right(&mut r.m, shift);
        r.trim();
        q.trim();

        Ok((q, r))
    }
}
