//! Theme tokens, adaptive scaling and accessible color selection.

pub(crate) mod contrast;
pub(crate) mod scale;
pub(crate) mod tokens;
