pub(crate) mod buf;
pub(crate) mod consts;
pub(crate) mod util;
