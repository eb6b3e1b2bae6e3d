//! Buffer for holding mantissa digits.

use crate::defs::Error;
use crate::defs::Word;
use core::ops::Deref;
use core::ops::DerefMut;
use smallvec::SmallVec;

const STATIC_ALLOCATION: usize = 4;

/// Buffer for holding mantissa digits, least significant word first.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct WordBuf {
    inner: SmallVec<[Word; STATIC_ALLOCATION]>,
}

impl WordBuf {
    /// New buffer of `sz` words filled with zeroes.
    #[inline]
    pub fn new(sz: usize) -> Result<Self, Error> {
        let mut inner = SmallVec::new();
        inner.try_reserve_exact(sz)?;
        inner.resize(sz, 0);
        Ok(WordBuf { inner })
    }

    /// New buffer holding a copy of `s`.
    pub fn from_slice(s: &[Word]) -> Result<Self, Error> {
        let mut inner = SmallVec::new();
        inner.try_reserve_exact(s.len())?;
        inner.extend_from_slice(s);
        Ok(WordBuf { inner })
    }

    #[inline]
    pub fn fill(&mut self, d: Word) {
        self.inner.fill(d);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Appends a word at the most significant end.
    pub fn try_push(&mut self, d: Word) -> Result<(), Error> {
        self.inner.try_reserve(1)?;
        self.inner.push(d);
        Ok(())
    }

    /// Resizes the buffer to `n` words. New most significant words are zero.
    pub fn try_resize(&mut self, n: usize) -> Result<(), Error> {
        if n > self.inner.len() {
            self.inner.try_reserve_exact(n - self.inner.len())?;
        }
        self.inner.resize(n, 0);
        Ok(())
    }

    /// Removes most significant words containing zeroes.
    pub fn trunc_leading_zeroes(&mut self) {
        let n = self.inner.iter().rev().take_while(|v| **v == 0).count();
        let sz = self.len();
        self.inner.truncate(sz - n);
    }

    pub fn try_clone(&self) -> Result<Self, Error> {
        Self::from_slice(&self.inner)
    }
}

impl Deref for WordBuf {
    type Target = [Word];

    #[inline]
    fn deref(&self) -> &[Word] {
        self.inner.deref()
    }
}

impl DerefMut for WordBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Word] {
        self.inner.deref_mut()
    }
}
