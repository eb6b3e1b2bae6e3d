//! ln(2)

use crate::common::consts::ONE;
use crate::common::consts::THREE;
use crate::common::util::words_for;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;

// ln(2) = 2/3 * (1 + sum(1 / ((2k + 1) * 9^k))), k = 1, 2, ...
fn pqr(a: usize, b: usize) -> Result<(BigFloatNumber, BigFloatNumber, BigFloatNumber), Error> {
    if a == b - 1 {
        let p = BigFloatNumber::from_word(1, WORD_BIT_SIZE)?;
        let q = BigFloatNumber::from_usize((2 * b + 1) * 9)?;
        let r = BigFloatNumber::from_usize(2 * b + 1)?;

        Ok((p, q, r))
    } else {
        let m = (a + b) / 2;

        let (pa, qa, ra) = pqr(a, m)?;
        let (pb, qb, rb) = pqr(m, b)?;

        let n0 = pa.mul_full_prec(&qb)?;
        let n1 = pb.mul_full_prec(&ra)?;
        let p = n0.add_full_prec(&n1)?;
        let q = qa.mul_full_prec(&qb)?;
        let r = ra.mul_full_prec(&rb)?;

        Ok((p, q, r))
    }
}

/// Computes ln(2) with at least `p` correct bits.
pub(super) fn compute_ln2(p: usize) -> Result<BigFloatNumber, Error> {
    let p_x = words_for(p + WORD_BIT_SIZE) * WORD_BIT_SIZE;
    let rm = RoundingMode::ToEven;

    // each term adds log2(9) bits
    let n = p_x / 3 + 2;
    let (pk, qk, _) = pqr(0, n)?;

    // 2 * (1 + p / q) / 3
    let mut ret = pk.div(&qk, p_x, rm)?;
    ret = ret.add(&ONE, p_x, rm)?;
    ret = ret.div(&THREE, p_x, rm)?;
    ret.mul_pow2(1)?;
    ret.set_inexact(true);

    Ok(ret)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_ln2_const() {
        let c = compute_ln2(53).unwrap();
        assert_eq!(c.to_f64(), core::f64::consts::LN_2);

        let c1 = compute_ln2(1000).unwrap();
        let mut c2 = compute_ln2(2000).unwrap();
        c2.set_precision(c1.mantissa_max_bit_len(), RoundingMode::ToEven).unwrap();
        let d = c1.sub(&c2, 2000, RoundingMode::ToEven).unwrap();
        assert!(d.is_zero() || (d.exponent() as isize) < -1000);
    }
}
