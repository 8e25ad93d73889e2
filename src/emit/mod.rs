//! Output containers.
//!
//! Each emitter walks the [`PagePlan`](crate::compose::page::PagePlan) draw operations of a
//! [`ComposedDocument`] and expresses them with the container's own primitives. Emitters never
//! lay anything out; every position, size and wrapped line comes from composition.

pub(crate) mod background;
pub(crate) mod pdf;
pub(crate) mod pptx;
pub(crate) mod raster;

use crate::{compose::composer::ComposedDocument, foundation::error::LecternResult};

/// Writes a composed document into an output container.
pub trait DocumentEmitter {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Serialize `doc` to bytes.
    fn emit(&mut self, doc: &ComposedDocument) -> LecternResult<Vec<u8>>;
}
