//! Text measurement, wrapping, title fitting and the flow/pagination state machine.

pub(crate) mod flow;
pub(crate) mod metrics;
pub(crate) mod title;
pub(crate) mod wrap;
