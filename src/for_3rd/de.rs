//! Deserialization of BigFloat.

use core::fmt::Formatter;

use crate::strop::precision_for_digits;
use crate::{BigFloat, RoundingMode};
use serde::de::Error;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};

struct BigFloatVisitor {}

impl<'de> Deserialize<'de> for BigFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigFloatVisitor {})
    }
}

impl<'de> Visitor<'de> for BigFloatVisitor {
    type Value = BigFloat;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a number or a string containing a number")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        // integers have at most 20 digits
        BigFloat::parse(&v.to_string(), precision_for_digits(20), RoundingMode::ToEven)
            .map(|v| v.value)
            .map_err(|e| Error::custom(format!("{e:?}")))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        BigFloat::parse(&v.to_string(), precision_for_digits(20), RoundingMode::ToEven)
            .map(|v| v.value)
            .map_err(|e| Error::custom(format!("{e:?}")))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        BigFloat::from_f64(v).map_err(|e| Error::custom(format!("{e:?}")))
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<BigFloat>().map_err(|e| Error::custom(format!("{e:?}")))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }
}

#[cfg(test)]
mod tests {

    use serde_json::{from_str, to_string};

    use crate::BigFloat;

    #[test]
    fn from_json() {
        let x = from_str::<BigFloat>("-0").unwrap();
        assert!(x.is_zero());

        let x = from_str::<BigFloat>("0.3").unwrap();
        assert_eq!(x.to_f64(), 0.3);
        assert_eq!(x.precision(), Some(64));

        let x = from_str::<BigFloat>("\"0.3\"").unwrap();
        assert_eq!(x.to_string(), "0.3");

        let x = from_str::<BigFloat>("18446744073709551615").unwrap();
        assert_eq!(x.to_string(), "18446744073709551615");

        let x = from_str::<BigFloat>("-42").unwrap();
        assert_eq!(x.to_f64(), -42.0);

        let x = from_str::<BigFloat>("\"-Infinity\"").unwrap();
        assert!(x.is_inf() && x.is_negative());
        assert!(from_str::<BigFloat>("\"NaN\"").unwrap().is_nan());

        assert!(from_str::<BigFloat>("\"abc\"").is_err());
        assert!(from_str::<BigFloat>("true").is_err());
    }

    #[test]
    fn json_round_trip() {
        for s in ["1.5", "-0.000123", "3.14159265358979323846264338327950288", "1e-300", "-Infinity"] {
            let x: BigFloat = s.parse().unwrap();
            let json = to_string(&x).unwrap();
            let y = from_str::<BigFloat>(&json).unwrap();
            assert_eq!(x.cmp_total(&y), core::cmp::Ordering::Equal);
            assert_eq!(x.precision(), y.precision());
        }
    }
}
