//! Integer square root.

use crate::defs::Error;
use crate::defs::Word;
use crate::mantissa::Mantissa;
use core::cmp::Ordering;

impl Mantissa {
    /// Returns floor(sqrt(`self`)) and true if the root is exact.
    pub fn sqrt_rem(&self) -> Result<(Self, bool), Error> {
        let bl = self.bit_len();
        if bl == 0 {
            return Ok((Self::new(1)?, true));
        }

        if bl <= 104 {
            return self.sqrt_rem_small();
        }

        // Newton's iteration from above: x' = (x + n / x) / 2 decreases until it reaches floor(sqrt(n)).
        let mut x = self.initial_root()?;
        loop {
            let (q, _) = self.div_rem(&x)?;
            let y = x.add(&q)?.shr(1)?;
            if y.cmp(&x) != Ordering::Less {
                break;
            }
            x = y;
        }

        let exact = x.mul(&x)?.cmp(self) == Ordering::Equal;
        Ok((x, exact))
    }

    // Estimate not smaller than the root built from the leading bits.
    fn initial_root(&self) -> Result<Self, Error> {
        let bl = self.bit_len();
        // keep an even number of bits dropped so that the top part scales by a power of 2
        let drop = (bl - 100) & !1;
        let top = self.shr(drop)?;
        let (mut r, _) = top.sqrt_rem_small()?;
        r.add_word(1)?;
        r.shl(drop / 2)
    }

    fn sqrt_rem_small(&self) -> Result<(Self, bool), Error> {
        let d = self.digits();
        let mut v: u128 = 0;
        for w in d.iter().rev() {
            if v != 0 || *w != 0 {
                v = (v << 64) | *w as u128;
            }
        }
        let mut x = (v as f64).sqrt() as u128;
        while x * x > v {
            x -= 1;
        }
        while (x + 1) * (x + 1) <= v {
            x += 1;
        }
        let exact = x * x == v;
        let mut ret = Self::new(2)?;
        ret.digits_mut()[0] = x as Word;
        ret.digits_mut()[1] = (x >> 64) as Word;
        ret.trim();
        Ok((ret, exact))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    #[test]
    fn test_sqrt_rem() {
        let (r, e) = Mantissa::from_word(144).unwrap().sqrt_rem().unwrap();
        assert_eq!(r.digits(), &[12]);
        assert!(e);

        let (r, e) = Mantissa::from_word(145).unwrap().sqrt_rem().unwrap();
        assert_eq!(r.digits(), &[12]);
        assert!(!e);

        let (r, e) = Mantissa::new(1).unwrap().sqrt_rem().unwrap();
        assert!(r.is_zero() && e);

        // 2^400
        let (r, e) = Mantissa::pow2(400).unwrap().sqrt_rem().unwrap();
        assert!(e);
        assert_eq!(r.cmp(&Mantissa::pow2(200).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_sqrt_rem_random() {
        for _ in 0..100 {
            let l = 1 + random::<usize>() % 30;
            let mut a = Mantissa::new(l).unwrap();
            for d in a.digits_mut() {
                *d = random();
            }
            let (r, e) = a.sqrt_rem().unwrap();
            let sq = r.mul(&r).unwrap();
            assert_ne!(sq.cmp(&a), Ordering::Greater);
            let mut r1 = r.try_clone().unwrap();
            r1.add_word(1).unwrap();
            assert_eq!(r1.mul(&r1).unwrap().cmp(&a), Ordering::Greater);
            assert_eq!(e, sq.cmp(&a) == Ordering::Equal);

            let (r2, e2) = sq.sqrt_rem().unwrap();
            assert!(e2);
            assert_eq!(r2.cmp(&r), Ordering::Equal);
        }
    }
}
