//! Rounding of exact intermediate results to the target precision.

use crate::common::util::words_for;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;
use crate::mantissa::Mantissa;

/// Decides whether a truncated magnitude must be incremented by one unit in the last place.
///
/// `round_bit` is the first discarded bit and `sticky` tells if anything nonzero lies below it.
pub(crate) fn round_up(
    rm: RoundingMode,
    is_positive: bool,
    lsb_odd: bool,
    round_bit: bool,
    sticky: bool,
) -> bool {
    match rm {
        RoundingMode::ToEven => round_bit && (sticky || lsb_odd),
        RoundingMode::ToZero => false,
        RoundingMode::FromZero => round_bit || sticky,
        RoundingMode::Up => is_positive && (round_bit || sticky),
        RoundingMode::Down => !is_positive && (round_bit || sticky),
    }
}

/// Natural number rounded to `p` bits.
#[derive(Debug)]
pub(crate) struct Rounded {
    /// Normalized mantissa of `ceil(p / WORD_BIT_SIZE)` words.
    pub m: Mantissa,

    /// Exponent of the result relative to the least significant bit of the input.
    pub e: isize,

    /// True if any nonzero bits were discarded.
    pub inexact: bool,
}

/// Rounds `m` (plus an infinitely small positive amount if `sticky` is set) to `p` bits.
/// `m` must not be zero.
pub(crate) fn round_mantissa(
    m: &Mantissa,
    sticky: bool,
    p: usize,
    rm: RoundingMode,
    is_positive: bool,
) -> Result<Rounded, Error> {
    let bl = m.bit_len();
    debug_assert!(bl > 0);

    // the sticky bit must stay below the round bit
    let ext;
    let src = if sticky && bl < p + 2 {
        ext = m.shl(p + 2 - bl)?;
        &ext
    } else {
        m
    };

    let sbl = src.bit_len();
    let (mut q, round_bit, st) = if sbl > p {
        let sh = sbl - p;
        (src.shr(sh)?, src.bit(sh - 1), sticky || src.any_bit_below(sh - 1))
    } else {
        (src.try_clone()?, false, sticky)
    };

    let mut e = bl as isize;
    if round_up(rm, is_positive, q.is_odd(), round_bit, st) {
        q.add_word(1)?;
        if q.bit_len() > p {
            e += 1;
        }
    }

    Ok(Rounded { m: q.normalized(words_for(p))?, e, inexact: round_bit || st })
}

/// Returns true if an approximation with normalized mantissa `m` and `s` correct bits
/// rounds to `p` bits the same way as the value it approximates.
pub(crate) fn can_round(m: &[Word], p: usize, s: usize, rm: RoundingMode) -> bool {
    let start = if rm == RoundingMode::ToEven { p + 1 } else { p };
    if s <= start + 1 {
        return false;
    }

    let width = m.len() * WORD_BIT_SIZE;
    // bit `i` counting from the most significant one
    let bit = |i: usize| -> bool {
        if i >= width {
            false
        } else {
            let pos = width - 1 - i;
            (m[pos / WORD_BIT_SIZE] >> (pos % WORD_BIT_SIZE)) & 1 != 0
        }
    };

    let first = bit(start);
    (start + 1..s).any(|i| bit(i) != first)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::defs::WORD_SIGNIFICANT_BIT;

    #[test]
    fn test_round_up() {
        use RoundingMode::*;
        assert!(!round_up(ToEven, true, false, true, false));
        assert!(round_up(ToEven, true, true, true, false));
        assert!(round_up(ToEven, false, false, true, true));
        assert!(!round_up(ToEven, true, true, false, true));
        assert!(!round_up(ToZero, true, true, true, true));
        assert!(round_up(FromZero, false, false, false, true));
        assert!(round_up(Up, true, false, false, true));
        assert!(!round_up(Up, false, false, true, true));
        assert!(round_up(Down, false, false, true, false));
        assert!(!round_up(Down, true, false, true, false));
    }

    #[test]
    fn test_round_mantissa() {
        // 0b10111 to 3 bits
        let m = Mantissa::from_word(0b10111).unwrap();
        let r = round_mantissa(&m, false, 3, RoundingMode::ToEven, true).unwrap();
        assert_eq!(r.m.digits(), &[0b110 << 61]);
        assert_eq!(r.e, 5);
        assert!(r.inexact);

        let r = round_mantissa(&m, false, 3, RoundingMode::ToZero, true).unwrap();
        assert_eq!(r.m.digits(), &[0b101 << 61]);

        // carry into a new bit
        let m = Mantissa::from_word(0b1111).unwrap();
        let r = round_mantissa(&m, false, 3, RoundingMode::FromZero, true).unwrap();
        assert_eq!(r.m.digits(), &[WORD_SIGNIFICANT_BIT]);
        assert_eq!(r.e, 5);

        // tie to even
        let m = Mantissa::from_word(0b1001).unwrap();
        let r = round_mantissa(&m, false, 3, RoundingMode::ToEven, true).unwrap();
        assert_eq!(r.m.digits(), &[0b100 << 61]);
        let r = round_mantissa(&m, true, 3, RoundingMode::ToEven, true).unwrap();
        assert_eq!(r.m.digits(), &[0b101 << 61]);
        let m = Mantissa::from_word(0b1011).unwrap();
        let r = round_mantissa(&m, false, 3, RoundingMode::ToEven, true).unwrap();
        assert_eq!(r.m.digits(), &[0b110 << 61]);

        // exact
        let m = Mantissa::from_word(0b101).unwrap();
        let r = round_mantissa(&m, false, 64, RoundingMode::ToEven, true).unwrap();
        assert!(!r.inexact);
        assert_eq!(r.e, 3);
        assert_eq!(r.m.digits(), &[0b101 << 61]);

        // sticky below a short mantissa
        let r = round_mantissa(&m, true, 64, RoundingMode::Up, true).unwrap();
        assert!(r.inexact);
        assert_eq!(r.m.digits(), &[(0b101 << 61) + 1]);
        let r = round_mantissa(&m, true, 64, RoundingMode::Up, false).unwrap();
        assert_eq!(r.m.digits(), &[0b101 << 61]);
    }

    #[test]
    fn test_can_round() {
        let m = [0x8000000000000000u64, 0];
        assert!(!can_round(&m, 64, 128, RoundingMode::ToEven));
        let m = [0x0000000000010000u64, 0x8000000000000000];
        assert!(can_round(&m, 64, 128, RoundingMode::ToEven));
        assert!(can_round(&m, 64, 128, RoundingMode::ToZero));
        assert!(!can_round(&m, 64, 100, RoundingMode::ToEven));
        let m = [Word::MAX, 0x8000000000000001];
        assert!(!can_round(&m, 64, 128, RoundingMode::Down));
        assert!(can_round(&m, 32, 128, RoundingMode::Down));
    }
}
