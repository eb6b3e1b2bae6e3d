//! Binfloat is a library of arbitrary precision binary floating point numbers.
//!
//! Every operation takes the precision of the result in bits and a rounding mode,
//! and returns a correctly rounded result together with the status flags raised while computing it.
//!
//! ## Examples
//!
//! ```
//! use binfloat::{BigFloat, Consts, RoundingMode, Status};
//!
//! let p = 128;
//! let rm = RoundingMode::ToEven;
//! let mut cc = Consts::new().unwrap();
//!
//! let two = BigFloat::from_f64(2.0).unwrap();
//! let r = two.sqrt(p, rm).unwrap();
//! assert_eq!(r.status, Status::INEXACT);
//! assert_eq!(r.value.to_fraction(30).unwrap(), "1.41421356237309504880168872421");
//!
//! let zero = BigFloat::new();
//! let r = zero.ln(p, rm, &mut cc).unwrap();
//! assert_eq!(r.status, Status::DIV_BY_ZERO);
//! assert!(r.value.is_inf() && r.value.is_negative());
//! ```
//!
//! Operations which only need the defaults can go through a `Context`:
//!
//! ```
//! use binfloat::Context;
//!
//! let mut ctx = Context::default();
//! let x = ctx.parse("0.5").unwrap().value;
//! let y = ctx.atan(&x).unwrap().value;
//! assert_eq!(y.to_fraction(10).unwrap(), "0.4636476090");
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::module_inception)]

mod common;
mod conv;
mod ctx;
mod defs;
mod ext;
mod mantissa;
mod num;
mod ops;
mod parser;
mod round;
mod status;
mod strop;

#[cfg(feature = "serde")]
mod for_3rd;

pub use crate::ctx::Context;
pub use crate::defs::Error;
pub use crate::defs::Exponent;
pub use crate::defs::RoundingMode;
pub use crate::defs::Sign;
pub use crate::defs::Word;
pub use crate::ext::BigFloat;
pub use crate::ext::INF_NEG;
pub use crate::ext::INF_POS;
pub use crate::ext::NAN;
pub use crate::ops::consts::Consts;
pub use crate::status::Status;
pub use crate::status::StatusAnd;

pub use crate::defs::DEFAULT_P;
pub use crate::defs::EXPONENT_MAX;
pub use crate::defs::EXPONENT_MIN;
pub use crate::defs::PRECISION_MAX;
pub use crate::defs::PRECISION_MIN;
pub use crate::defs::WORD_BIT_SIZE;
