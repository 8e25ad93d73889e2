//! Lectern is an adaptive layout engine for lecture material.
//!
//! A [`DocumentPlan`] (topic, slides, bullet points, requested diagrams) is laid out once and
//! written into either container:
//!
//! - a slide deck ([`OutputFormat::Pptx`]): title splash, then one slide per plan slide with
//!   continuation slides when bullets overflow
//! - a paginated handout ([`OutputFormat::Pdf`]): title page, a cheat-sheet (knowledge map plus
//!   one page per requested diagram) and per-slide notes
//! - a raster preview of any page ([`OutputFormat::Png`])
//!
//! Layout is deterministic: the same plan and options always produce the same bytes. Cosmetic
//! problems never fail a render; they are reported as [`Degradation`] values.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod emit;
mod foundation;
mod layout;
mod page;
mod pipeline;
mod plan;
mod text;
mod theme;

pub use crate::foundation::core::{Affine, BezPath, Edges, HAlign, Point, Rect, Rgb, Size, Vec2};
pub use crate::foundation::error::{LecternError, LecternResult, USER_FACING_FAILURE};

pub use crate::theme::contrast::{
    ContrastChoice, DARK_TEXT, DEFAULT_MIN_CONTRAST, LIGHT_TEXT, contrast_ratio, pick_text_color,
    readable_text_on, relative_luminance,
};
pub use crate::theme::scale::{BASELINE_WIDTH, MAX_SCALE, MIN_SCALE, compute_scale};
pub use crate::theme::tokens::{
    Decorations, FolioStyle, FontRoles, LayoutConstants, MarkerShape, Palette, SizeTable, Theme,
    ThemeName, resolve_theme,
};

pub use crate::page::geometry::{
    ContentFrame, DevicePreset, Orientation, PageGeometry, PageSize, RenderedPage, effective_insets,
    resolve_page_size,
};

pub use crate::text::flow::{
    FlowItem, FlowItemKind, FlowOutcome, FlowState, FlowStyle, PlacedItem, PlacedLine,
    PlacedMarker, TextFlow,
};
pub use crate::text::metrics::{FontRole, StandardMetrics, TextMeasure};
pub use crate::text::title::{MAX_TITLE_LINES, TitleFit, fit_title};
pub use crate::text::wrap::{ELLIPSIS, WrappedText, truncate_to_width, wrap_clamped, wrap_text};

pub use crate::layout::grid::{GridConfig, GridShape, MAX_STEPS, grid_shape, layout_grid};
pub use crate::layout::node::{
    Connector, CurveStyle, DiagramLayout, Node, NodeId, NodeKind, Tone,
};
pub use crate::layout::radial::{
    BranchSpec, MAX_BRANCHES, MAX_CHILDREN, RadialConfig, layout_radial,
};

pub use crate::plan::expand::expand_point;
pub use crate::plan::model::{DiagramKind, DocumentPlan, ExpandedContent, Slide};

pub use crate::compose::composer::{ComposedDocument, compose};
pub use crate::compose::options::{DocumentLayout, LayoutTuning, RasterOptions, RenderOptions};
pub use crate::compose::page::{
    Degradation, DrawOp, Fill, PageKind, PagePlan, Stroke, TextBlock, TextLine,
};
pub use crate::compose::strategy::{
    DiagramBody, DiagramInput, Resolved, Strategy, StrategyFailure, resolve_diagram,
    strategies_for,
};

pub use crate::emit::DocumentEmitter;
pub use crate::emit::pdf::PdfEmitter;
pub use crate::emit::pptx::PptxEmitter;
pub use crate::emit::raster::RasterEmitter;

pub use crate::pipeline::{
    OutputFormat, RenderJob, RenderedDocument, render_batch, render_document,
    render_document_with,
};
