//! Auxiliary functions.

use crate::defs::DoubleWord;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;

/// Integer logarithm base 2 of a number, rounded up.
pub fn log2_ceil(mut n: usize) -> usize {
    let mut ret = 0;
    let mut sticky = 0;
    while n > 1 {
        if n & 1 != 0 {
            sticky = 1;
        }
        ret += 1;
        n >>= 1;
    }
    ret + sticky
}

/// Integer square root, rounded down.
pub fn sqrt_int(a: usize) -> usize {
    if a < 2 {
        return a;
    }
    let mut x = a;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + a / x) / 2;
    }
    x
}

/// Round precision to word boundary.
pub fn round_p(p: usize) -> usize {
    ((p.saturating_add(WORD_BIT_SIZE - 1)) / WORD_BIT_SIZE) * WORD_BIT_SIZE
}

/// Number of words needed to hold `p` bits.
#[inline]
pub fn words_for(p: usize) -> usize {
    (p + WORD_BIT_SIZE - 1) / WORD_BIT_SIZE
}

#[inline(always)]
pub fn add_carry(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let s = a as DoubleWord + b as DoubleWord + c as DoubleWord;
    *r = s as Word;
    (s >> WORD_BIT_SIZE) as Word
}

#[inline(always)]
pub fn sub_borrow(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let (d1, o1) = a.overflowing_sub(b);
    let (d2, o2) = d1.overflowing_sub(c);
    *r = d2;
    (o1 | o2) as Word
}

/// Shift `m` left by `n` bits in place. Bits shifted out of the most significant word are lost.
pub fn shift_slice_left(m: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    let l = m.len();
    if idx >= l {
        m.fill(0);
        return;
    }
    if shift > 0 {
        for i in (idx + 1..l).rev() {
            m[i] = (m[i - idx] << shift) | (m[i - idx - 1] >> (WORD_BIT_SIZE - shift));
        }
        m[idx] = m[0] << shift;
    } else if idx > 0 {
        m.copy_within(0..l - idx, idx);
    }
    m[..idx].fill(0);
}

/// Shift `m` right by `n` bits in place.
pub fn shift_slice_right(m: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    let l = m.len();
    if idx >= l {
        m.fill(0);
        return;
    }
    if shift > 0 {
        for i in 0..l - idx - 1 {
            m[i] = (m[i + idx] >> shift) | (m[i + idx + 1] << (WORD_BIT_SIZE - shift));
        }
        m[l - idx - 1] = m[l - 1] >> shift;
    } else if idx > 0 {
        m.copy_within(idx.., 0);
    }
    m[l - idx..].fill(0);
}

/// True if any of the `n` least significant bits of `m` is set.
pub fn any_bit_below(m: &[Word], n: usize) -> bool {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    if m[..idx.min(m.len())].iter().any(|d| *d != 0) {
        return true;
    }
    shift > 0 && idx < m.len() && (m[idx] & ((1 << shift) - 1)) != 0
}

/// Value of bit `n` of `m`.
#[inline]
pub fn bit_at(m: &[Word], n: usize) -> bool {
    let idx = n / WORD_BIT_SIZE;
    idx < m.len() && (m[idx] >> (n % WORD_BIT_SIZE)) & 1 != 0
}

/// Number of significant bits in `m`.
pub fn bit_len(m: &[Word]) -> usize {
    for (i, d) in m.iter().enumerate().rev() {
        if *d != 0 {
            return i * WORD_BIT_SIZE + WORD_BIT_SIZE - d.leading_zeros() as usize;
        }
    }
    0
}
