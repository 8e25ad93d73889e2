//! Page size resolution and the safe content frame.

pub(crate) mod geometry;
