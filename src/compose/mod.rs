//! Shared glue between layout engines and emitters.
//!
//! Composition turns a [`DocumentPlan`](crate::DocumentPlan) into a list of [`PagePlan`]s: flat
//! draw operations in page coordinates. Both emitters consume the same pages, so a slide deck and
//! a handout built from one plan agree on every position and wrapped line.
//!
//! [`PagePlan`]: page::PagePlan

pub(crate) mod composer;
pub(crate) mod deck;
pub(crate) mod handout;
pub(crate) mod options;
pub(crate) mod page;
pub(crate) mod strategy;
