//! Ordered diagram rendering strategies.
//!
//! Each diagram kind maps to a list of strategies tried in order. A strategy either produces a
//! layout that fits the frame or reports why it did not; the first success wins and every
//! failure is logged. The list always ends with [`Strategy::Bullets`], which cannot fail.

use crate::{
    compose::options::LayoutTuning,
    layout::{
        grid::{GridConfig, layout_grid},
        node::{CurveStyle, DiagramLayout},
        radial::{BranchSpec, layout_radial},
    },
    page::geometry::ContentFrame,
    plan::model::DiagramKind,
    text::metrics::TextMeasure,
};

/// One way of drawing a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Step grid with the given connector style.
    Grid(CurveStyle),
    /// Radial map.
    Radial {
        /// Place each branch's children.
        children: bool,
        /// Join neighbouring branches with bowed cross-connections.
        cross_links: bool,
    },
    /// Plain bullet list of the same points.
    Bullets,
}

impl Strategy {
    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grid(CurveStyle::Bezier) => "grid",
            Self::Grid(_) => "grid-straight",
            Self::Radial {
                children: true,
                cross_links: false,
            } => "radial-children",
            Self::Radial {
                cross_links: true, ..
            } => "radial-cross-links",
            Self::Radial { .. } => "radial",
            Self::Bullets => "bullets",
        }
    }

    fn attempt(
        self,
        measure: &dyn TextMeasure,
        frame: &ContentFrame,
        input: &DiagramInput<'_>,
        tuning: &LayoutTuning,
    ) -> Result<DiagramBody, Rejection> {
        match self {
            Self::Grid(style) => {
                let cfg = GridConfig {
                    connector_style: style,
                    ..tuning.grid
                };
                let layout = layout_grid(measure, frame, &input.items, &cfg)
                    .map_err(|e| Rejection::new(e.to_string()))?;
                if !layout.fits(frame) {
                    return Err(Rejection::new("grid does not fit the content frame"));
                }
                Ok(DiagramBody::Diagram(layout))
            }
            Self::Radial {
                children,
                cross_links,
            } => {
                let branches: Vec<BranchSpec> = input
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, label)| {
                        let kids = match (children, input.children.get(i)) {
                            (true, Some(c)) => c.clone(),
                            _ => Vec::new(),
                        };
                        BranchSpec::new(label.clone()).with_children(kids)
                    })
                    .collect();
                let links: Vec<(usize, usize)> = if cross_links {
                    (1..branches.len()).map(|i| (i - 1, i)).collect()
                } else {
                    Vec::new()
                };
                let layout =
                    layout_radial(measure, frame, input.center, &branches, &links, &tuning.radial);
                let forced = layout.force_placed_count();
                if forced > 0 {
                    return Err(Rejection {
                        reason: format!("{forced} radial nodes were force-placed"),
                        force_placed: forced,
                    });
                }
                if !layout.fits(frame) {
                    return Err(Rejection::new("radial map leaves the content frame"));
                }
                Ok(DiagramBody::Diagram(layout))
            }
            Self::Bullets => Ok(DiagramBody::Bullets(input.items.clone())),
        }
    }
}

struct Rejection {
    reason: String,
    force_placed: usize,
}

impl Rejection {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            force_placed: 0,
        }
    }
}

/// Strategies for a diagram kind, most specific first.
pub fn strategies_for(kind: DiagramKind) -> Vec<Strategy> {
    let mut out = match kind {
        DiagramKind::Process => vec![Strategy::Grid(CurveStyle::Bezier)],
        DiagramKind::Timeline => vec![Strategy::Grid(CurveStyle::Straight)],
        DiagramKind::Tree => vec![
            Strategy::Radial {
                children: true,
                cross_links: false,
            },
            Strategy::Radial {
                children: false,
                cross_links: false,
            },
        ],
        DiagramKind::Compare => vec![Strategy::Radial {
            children: false,
            cross_links: true,
        }],
        DiagramKind::Unknown => Vec::new(),
    };
    out.push(Strategy::Bullets);
    out
}

/// Content of a diagram, independent of how it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramInput<'a> {
    /// Central label (radial) or heading context.
    pub center: &'a str,
    /// Branch labels or steps, in order.
    pub items: Vec<String>,
    /// Child labels per item; may be shorter than `items`.
    pub children: Vec<Vec<String>>,
}

/// Result of a successful strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagramBody {
    /// Positioned nodes and connectors.
    Diagram(DiagramLayout),
    /// Items to flow as bullets.
    Bullets(Vec<String>),
}

/// Why a strategy was skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyFailure {
    /// The strategy.
    pub strategy: Strategy,
    /// Reason.
    pub reason: String,
    /// Force-placed nodes that caused the failure, if any.
    pub force_placed: usize,
}

/// First successful body plus the failures that preceded it.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Winning strategy.
    pub strategy: Strategy,
    /// Its output.
    pub body: DiagramBody,
    /// Earlier strategies that failed.
    pub failures: Vec<StrategyFailure>,
}

/// Try `strategies` in order.
#[tracing::instrument(skip_all, fields(items = input.items.len()))]
pub fn resolve_diagram(
    measure: &dyn TextMeasure,
    frame: &ContentFrame,
    input: &DiagramInput<'_>,
    strategies: &[Strategy],
    tuning: &LayoutTuning,
) -> Resolved {
    let mut failures = Vec::new();
    for &strategy in strategies {
        match strategy.attempt(measure, frame, input, tuning) {
            Ok(body) => {
                tracing::debug!(strategy = strategy.name(), "diagram strategy succeeded");
                return Resolved {
                    strategy,
                    body,
                    failures,
                };
            }
            Err(r) => {
                tracing::warn!(
                    strategy = strategy.name(),
                    reason = %r.reason,
                    "diagram strategy failed"
                );
                failures.push(StrategyFailure {
                    strategy,
                    reason: r.reason,
                    force_placed: r.force_placed,
                });
            }
        }
    }
    Resolved {
        strategy: Strategy::Bullets,
        body: DiagramBody::Bullets(input.items.clone()),
        failures,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/strategy.rs"]
mod tests;
