//! Cache of mathematical constants.

mod ln2;
mod pi;

use crate::common::util::round_p;
use crate::defs::check_precision;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::ext::BigFloat;
use crate::num::BigFloatNumber;
use crate::status::StatusAnd;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ConstId {
    Pi,
    Ln2,
}

/// Constants cache contains arbitrary-precision mathematical constants.
///
/// A cached value is reused only for the precision it was computed with.
/// Functions request constants at working precisions which depend on the argument, so every
/// new precision or argument exponent may add an entry. Long running callers
/// evaluating functions of many different arguments should call `clear` from time to time.
#[derive(Debug, Default)]
pub struct Consts {
    cache: HashMap<(ConstId, usize), BigFloatNumber>,
}

/// In an ideal situation, the `Consts` structure is initialized with `Consts::new` only once,
/// and then used where needed.
impl Consts {
    /// Initializes an empty constants cache.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn new() -> Result<Self, Error> {
        let mut cache = HashMap::new();
        cache.try_reserve(4)?;
        Ok(Consts { cache })
    }

    /// Drops all cached values.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Returns the number of cached values.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn value(&mut self, id: ConstId, p: usize) -> Result<BigFloatNumber, Error> {
        if let Some(v) = self.cache.get(&(id, p)) {
            return v.clone();
        }

        log::debug!("constant {:?} is not cached for precision {}", id, p);

        let v = match id {
            ConstId::Pi => pi::compute_pi(p)?,
            ConstId::Ln2 => ln2::compute_ln2(p)?,
        };

        let ret = v.clone()?;
        self.cache.try_reserve(1)?;
        self.cache.insert((id, p), v);

        Ok(ret)
    }

    /// Returns pi with at least `p` correct bits.
    pub(crate) fn pi_num(&mut self, p: usize) -> Result<BigFloatNumber, Error> {
        self.value(ConstId::Pi, p)
    }

    /// Returns ln(2) with at least `p` correct bits.
    pub(crate) fn ln_2_num(&mut self, p: usize) -> Result<BigFloatNumber, Error> {
        self.value(ConstId::Ln2, p)
    }

    // Correctly rounded value of a constant.
    fn rounded(&mut self, id: ConstId, p: usize, rm: RoundingMode) -> Result<BigFloatNumber, Error> {
        let mut p_inc = WORD_BIT_SIZE;
        let mut p_wrk = p + p_inc;

        loop {
            let mut ret = self.value(id, p_wrk)?;

            if ret.try_set_precision(p, rm, p_wrk)? {
                break Ok(ret);
            }

            log::trace!("constant {:?}: raising working precision from {}", id, p_wrk);

            p_wrk += p_inc;
            p_inc = round_p(p_wrk / 5);
        }
    }

    /// Returns the value of the pi number with precision `p` using rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn pi(&mut self, p: usize, rm: RoundingMode) -> Result<StatusAnd<BigFloat>, Error> {
        check_precision(p)?;
        BigFloat::result_to_ext(self.rounded(ConstId::Pi, p, rm))
    }

    /// Returns the value of the natural logarithm of 2 with precision `p` using rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn ln2(&mut self, p: usize, rm: RoundingMode) -> Result<StatusAnd<BigFloat>, Error> {
        check_precision(p)?;
        BigFloat::result_to_ext(self.rounded(ConstId::Ln2, p, rm))
    }
}
