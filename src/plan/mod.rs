//! Lecture plan input model.

pub(crate) mod expand;
pub(crate) mod model;
