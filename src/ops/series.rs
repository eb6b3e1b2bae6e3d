//! Power series computation appliance.

use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::BigFloatNumber;

/// Generator of polynomial coefficients.
pub(crate) trait PolycoeffGen {
    /// Returns the next polynomial coefficient value.
    fn next(&mut self, rm: RoundingMode) -> Result<&BigFloatNumber, Error>;
}

/// Computes `acc + c1*x_first + c2*x_first*x_step + c3*x_first*x_step^2 + ...` with precision `p`,
/// where `c1`, `c2`, ... are produced by `polycoeff_gen`.
///
/// Summation stops when a term falls below 2^(-p-2) relative to the accumulated value.
/// The terms are expected to decrease at least geometrically with ratio 1/2.
/// The result is always marked as inexact since the remainder of the series is dropped.
pub(crate) fn series_run<T: PolycoeffGen>(
    mut acc: BigFloatNumber,
    x_first: BigFloatNumber,
    x_step: BigFloatNumber,
    polycoeff_gen: &mut T,
    p: usize,
) -> Result<BigFloatNumber, Error> {
    let rm = RoundingMode::ToEven;
    let mut x_pow = x_first;
    let mut niter = 0usize;

    while !x_pow.is_zero() {
        let coeff = polycoeff_gen.next(rm)?;
        let part = x_pow.mul(coeff, p, rm)?;

        let threshold = acc.exponent() as isize - p as isize - 2;
        if part.exponent() as isize <= threshold {
            break;
        }

        acc = acc.add(&part, p, rm)?;
        x_pow = x_pow.mul(&x_step, p, rm)?;
        niter += 1;
    }

    log::trace!("series converged after {} terms at precision {}", niter, p);

    acc.set_inexact(true);
    Ok(acc)
}
