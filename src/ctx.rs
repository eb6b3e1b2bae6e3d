//! Context holds the constants cache together with the default precision and rounding mode.

use crate::defs::check_precision;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::DEFAULT_P;
use crate::ext::BigFloat;
use crate::ops::consts::Consts;
use crate::status::StatusAnd;

/// Context contains the constants cache and default parameters for operations.
///
/// Numbers do not borrow the context, so dropping it never affects existing numbers.
#[derive(Debug)]
pub struct Context {
    cc: Consts,
    p: usize,
    rm: RoundingMode,
}

impl Context {
    /// Creates a context with an empty constants cache, precision `p`, and rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    ///  - MemoryAllocation: failed to allocate memory for the cache.
    pub fn new(p: usize, rm: RoundingMode) -> Result<Self, Error> {
        check_precision(p)?;
        Ok(Context { cc: Consts::new()?, p, rm })
    }

    /// Drops all cached constants.
    pub fn clear_cache(&mut self) {
        self.cc.clear();
    }

    /// Returns the precision of the context.
    pub fn precision(&self) -> usize {
        self.p
    }

    /// Returns the rounding mode of the context.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }

    /// Sets the precision of the context.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is outside of the supported range.
    pub fn set_precision(&mut self, p: usize) -> Result<(), Error> {
        check_precision(p)?;
        self.p = p;
        Ok(())
    }

    /// Sets the rounding mode of the context.
    pub fn set_rounding_mode(&mut self, rm: RoundingMode) {
        self.rm = rm;
    }

    /// Returns the constants cache of the context.
    pub fn consts(&mut self) -> &mut Consts {
        &mut self.cc
    }

    /// Returns pi.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn const_pi(&mut self) -> Result<StatusAnd<BigFloat>, Error> {
        self.cc.pi(self.p, self.rm)
    }

    /// Returns the natural logarithm of 2.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn const_ln2(&mut self) -> Result<StatusAnd<BigFloat>, Error> {
        self.cc.ln2(self.p, self.rm)
    }

    /// Parses a decimal number from the string `s`.
    ///
    /// ## Errors
    ///
    ///  - Parse: the string is not a number.
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn parse(&self, s: &str) -> Result<StatusAnd<BigFloat>, Error> {
        BigFloat::parse(s, self.p, self.rm)
    }

    /// Computes the remainder of `x / y` with the quotient rounded to the nearest integer, ties to even.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn rem(&self, x: &BigFloat, y: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
        x.rem(y, self.p, self.rm, RoundingMode::ToEven)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context { cc: Consts::default(), p: DEFAULT_P, rm: RoundingMode::ToEven }
    }
}

macro_rules! impl_fun_arg2_rm {
    ($comment:literal, $fname:ident) => {
        #[doc=$comment]
        ///
        /// ## Errors
        ///
        ///  - MemoryAllocation: failed to allocate memory.
        pub fn $fname(&self, x: &BigFloat, y: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
            x.$fname(y, self.p, self.rm)
        }
    };
}

macro_rules! impl_fun_rm_cc {
    ($comment:literal, $fname:ident) => {
        #[doc=$comment]
        ///
        /// ## Errors
        ///
        ///  - MemoryAllocation: failed to allocate memory.
        pub fn $fname(&mut self, x: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
            x.$fname(self.p, self.rm, &mut self.cc)
        }
    };
}

impl Context {
    impl_fun_arg2_rm!("Returns the sum of `x` and `y`.", add);
    impl_fun_arg2_rm!("Returns the difference of `x` and `y`.", sub);
    impl_fun_arg2_rm!("Returns the product of `x` and `y`.", mul);
    impl_fun_arg2_rm!("Returns the quotient of `x` and `y`.", div);

    /// Returns the square root of `x`.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn sqrt(&self, x: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
        x.sqrt(self.p, self.rm)
    }

    /// Returns `x` rounded to the precision of the context.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn round(&self, x: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
        x.round(self.p, self.rm)
    }

    /// Returns `x` to the power of `y`.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory.
    pub fn pow(&mut self, x: &BigFloat, y: &BigFloat) -> Result<StatusAnd<BigFloat>, Error> {
        x.pow(y, self.p, self.rm, &mut self.cc)
    }

    impl_fun_rm_cc!("Returns `e` to the power of `x`.", exp);
    impl_fun_rm_cc!("Returns the natural logarithm of `x`.", ln);
    impl_fun_rm_cc!("Returns the sine of `x`.", sin);
    impl_fun_rm_cc!("Returns the cosine of `x`.", cos);
    impl_fun_rm_cc!("Returns the tangent of `x`.", tan);
    impl_fun_rm_cc!("Returns the arcsine of `x`.", asin);
    impl_fun_rm_cc!("Returns the arccosine of `x`.", acos);
    impl_fun_rm_cc!("Returns the arctangent of `x`.", atan);
}
