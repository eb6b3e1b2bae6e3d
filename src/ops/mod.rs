//! Operations on numbers.

pub(crate) mod consts;

mod acos;
mod asin;
mod atan;
mod cos;
mod exp;
mod log;
mod pow;
mod rem;
mod series;
mod sin;
mod sqrt;
mod tan;
pub(crate) mod util;
