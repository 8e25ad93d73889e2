//! Diagram layout engines.
//!
//! Both engines produce a [`DiagramLayout`](node::DiagramLayout): positioned nodes plus
//! connector paths, in page coordinates (top-left origin, y down). Nothing here knows about
//! output containers.

pub(crate) mod grid;
pub(crate) mod node;
pub(crate) mod radial;
