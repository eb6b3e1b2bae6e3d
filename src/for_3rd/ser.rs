//! Serialization of BigFloat.
//! A number is serialized as a string in the free format at its own precision.

use crate::BigFloat;
use serde::{Serialize, Serializer};

impl Serialize for BigFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
