//! π number

use crate::common::util::words_for;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::WORD_BIT_SIZE;
use crate::num::BigFloatNumber;

fn pqr(a: u64, b: u64) -> Result<(BigFloatNumber, BigFloatNumber, BigFloatNumber), Error> {
    if a == b - 1 {
        let n0 = BigFloatNumber::from_word(6 * b - 5, WORD_BIT_SIZE)?;
        let n1 = BigFloatNumber::from_word(2 * b - 1, WORD_BIT_SIZE)?;
        let n2 = BigFloatNumber::from_word(6 * b - 1, WORD_BIT_SIZE)?;

        let n3 = n0.mul_full_prec(&n1)?;
        let r = n3.mul_full_prec(&n2)?;

        let n0 = BigFloatNumber::from_word(10939058860032000, WORD_BIT_SIZE)?;
        let n1 = BigFloatNumber::from_word(b, WORD_BIT_SIZE)?;
        let n2 = n1.mul_full_prec(&n1)?;
        let n3 = n2.mul_full_prec(&n1)?;
        let q = n0.mul_full_prec(&n3)?;

        let n0 = BigFloatNumber::from_word(13591409 + 545140134 * b, WORD_BIT_SIZE)?;
        let mut p = r.mul_full_prec(&n0)?;

        if b & 1 != 0 {
            p.inv_sign();
        }

        Ok((p, q, r))
    } else {
        let m = (a + b) / 2;

        let (pa, qa, ra) = pqr(a, m)?;
        let (pb, qb, rb) = pqr(m, b)?;

        let r = ra.mul_full_prec(&rb)?;
        let q = qa.mul_full_prec(&qb)?;
        let n0 = pa.mul_full_prec(&qb)?;
        let n1 = pb.mul_full_prec(&ra)?;
        let p = n0.add_full_prec(&n1)?;

        Ok((p, q, r))
    }
}

/// Computes pi with at least `p` correct bits.
pub(super) fn compute_pi(p: usize) -> Result<BigFloatNumber, Error> {
    let p_x = words_for(p + WORD_BIT_SIZE) * WORD_BIT_SIZE;
    let rm = RoundingMode::ToEven;

    // each term adds about 47 bits
    let n = (p_x / 47 + 2) as u64;
    let (pk, qk, _) = pqr(0, n)?;

    // q*4270934400 / ((p + q*13591409) * sqrt(10005))
    let n0 = BigFloatNumber::from_word(4270934400, WORD_BIT_SIZE)?;
    let n1 = BigFloatNumber::from_word(13591409, WORD_BIT_SIZE)?;

    let q0 = qk.mul_full_prec(&n0)?;
    let q1 = qk.mul_full_prec(&n1)?;
    let p0 = pk.add_full_prec(&q1)?;

    let f3 = BigFloatNumber::from_word(10005, WORD_BIT_SIZE)?;
    let f4 = f3.sqrt(p_x, rm)?;
    let f5 = p0.mul(&f4, p_x, rm)?;

    let mut ret = q0.div(&f5, p_x, rm)?;
    ret.set_inexact(true);

    Ok(ret)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::defs::Sign;
    use core::cmp::Ordering;

    #[test]
    fn test_pi_const() {
        let mut c = compute_pi(320).unwrap();
        c.set_precision(320, RoundingMode::ToEven).unwrap();
        let r = BigFloatNumber::from_raw_parts(
            &[
                5857503583518590174,
                147421033984662306,
                2955010104097229940,
                14179128828124470481,
                14488038916154245684,
            ],
            2,
            Sign::Pos,
        )
        .unwrap();
        assert_eq!(c.cmp(&r), Ordering::Equal);

        let c = compute_pi(53).unwrap();
        assert_eq!(c.to_f64(), core::f64::consts::PI);
    }
}
