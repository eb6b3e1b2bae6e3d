//! Natural number arithmetic on word sequences.

mod div;
#[allow(clippy::module_inception)]
mod mantissa;
mod mul;
mod sqrt;

pub(crate) use mantissa::Mantissa;
pub(crate) use mantissa::DECIMAL_BASE;
pub(crate) use mantissa::DECIMAL_BASE_LOG10;
