//! BigFloatNumber formatting and parsing.

use crate::conv::max_digits;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Sign;
use crate::num::BigFloatNumber;
use crate::parser::ParsedKind;
use core::fmt::Write;

// Plain notation is used for decimal exponents in (PLAIN_EXP_MIN, max).
const PLAIN_EXP_MIN: i64 = -7;

// Upper bound of the decimal exponent for plain notation in the free format.
const FREE_PLAIN_EXP_MAX: i64 = 21;

impl BigFloatNumber {
    /// Parses a finite number from the string `s` with precision `p` using the rounding mode `rm`.
    ///
    /// ## Errors
    ///
    ///  - Parse: the string is not a number, or is infinity or NaN.
    ///  - ExponentOverflow, ExponentUnderflow: the value is out of the exponent range.
    ///  - MemoryAllocation: failed to allocate memory for mantissa.
    pub fn parse(s: &str, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        let ps = crate::parser::parse(s)?;

        if ps.kind() != ParsedKind::Finite {
            return Err(Error::Parse);
        }

        let (digits, e) = ps.raw_parts();
        Self::from_decimal(ps.sign(), digits, e, p, rm)
    }

    /// Formats the number with exactly `n` digits after the decimal point, rounding to nearest-even.
    pub fn format_fixed(&self, n: usize) -> Result<String, Error> {
        let q = self.scaled_int(n as i64)?;
        let digits = q.to_decimal()?;

        let mut ret = String::new();
        ret.try_reserve_exact(digits.len() + n + 3)?;

        if self.is_negative() {
            ret.push('-');
        }

        if digits.len() <= n {
            ret.push('0');
            if n > 0 {
                ret.push('.');
                ret.extend(core::iter::repeat('0').take(n - digits.len()));
                ret.push_str(&digits);
            }
        } else {
            let (int, frac) = digits.split_at(digits.len() - n);
            ret.push_str(int);
            if n > 0 {
                ret.push('.');
                ret.push_str(frac);
            }
        }

        Ok(ret)
    }

    /// Formats the number with `n` significant digits, rounding to nearest-even.
    /// The exponential notation is used unless the decimal exponent is in (-7, n).
    pub fn format_fraction(&self, n: usize) -> Result<String, Error> {
        let n = n.max(1);

        if self.is_zero() {
            let digits = "0".repeat(n);
            return layout(self.sign(), &digits, 0, n as i64);
        }

        let (digits, e10) = self.to_sig_digits(n)?;
        layout(self.sign(), &digits, e10, n as i64)
    }

    /// Formats the shortest decimal which is parsed back to the number rounded to precision `p`.
    pub fn format_free(&self, p: usize) -> Result<String, Error> {
        if self.is_zero() {
            return Ok(if self.is_negative() { "-0" } else { "0" }.to_owned());
        }

        let (digits, e10) = self.to_shortest_digits(p)?;
        layout(self.sign(), &digits, e10, FREE_PLAIN_EXP_MAX)
    }

    /// Formats the shortest decimal which identifies the number at its own precision.
    pub fn format(&self) -> Result<String, Error> {
        self.format_free(self.mantissa_max_bit_len())
    }
}

// Places the decimal point into `digits`, the first digit has decimal exponent `e10`.
fn layout(s: Sign, digits: &str, e10: i64, plain_exp_max: i64) -> Result<String, Error> {
    let mut ret = String::new();
    ret.try_reserve_exact(digits.len() + 32 + e10.unsigned_abs().min(64) as usize)?;

    if s == Sign::Neg {
        ret.push('-');
    }

    let (first, rest) = digits.split_at(1);

    if e10 > PLAIN_EXP_MIN && e10 < plain_exp_max {
        if e10 >= 0 {
            let int_len = e10 as usize + 1;
            if digits.len() <= int_len {
                ret.push_str(digits);
                ret.extend(core::iter::repeat('0').take(int_len - digits.len()));
            } else {
                let (int, frac) = digits.split_at(int_len);
                ret.push_str(int);
                ret.push('.');
                ret.push_str(frac);
            }
        } else {
            ret.push_str("0.");
            ret.extend(core::iter::repeat('0').take((-e10 - 1) as usize));
            ret.push_str(digits);
        }
    } else {
        ret.push_str(first);
        if !rest.is_empty() {
            ret.push('.');
            ret.push_str(rest);
        }
        let es = if e10 < 0 { '-' } else { '+' };
        write!(ret, "e{}{}", es, e10.unsigned_abs()).map_err(|_| Error::MemoryAllocation)?;
    }

    Ok(ret)
}

/// Precision sufficient to hold a decimal number with `n` significant digits.
pub(crate) fn precision_for_digits(n: usize) -> usize {
    ((n as f64 / crate::conv::LOG10_2).ceil() as usize + 2).max(crate::defs::DEFAULT_P)
}
