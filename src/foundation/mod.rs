//! Shared primitives: geometry re-exports, colors, errors, hashing.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
