//! Static constants.

use crate::{defs::WORD_BIT_SIZE, num::BigFloatNumber};
use lazy_static::lazy_static;

lazy_static! {

    /// 1
    pub(crate) static ref ONE: BigFloatNumber = BigFloatNumber::from_word(1, WORD_BIT_SIZE).expect("Constant ONE initialization.");

    /// 3
    pub(crate) static ref THREE: BigFloatNumber = BigFloatNumber::from_word(3, WORD_BIT_SIZE).expect("Constant THREE initialization.");
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_consts() {
        assert_eq!(ONE.to_f64(), 1.0);
        assert_eq!(THREE.to_f64(), 3.0);
        assert!(!ONE.inexact());
    }
}
