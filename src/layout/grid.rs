//! Step-flow grid layout.

use crate::{
    foundation::{
        core::{BezPath, Point, Rect, Vec2},
        error::{LecternError, LecternResult},
    },
    layout::node::{
        Connector, CurveStyle, DiagramLayout, Node, NodeId, NodeKind, Tone, arrowhead,
        bowed_curve, elbow_path, straight_path,
    },
    page::geometry::ContentFrame,
    text::{
        metrics::{FontRole, TextMeasure},
        wrap::wrap_clamped,
    },
};

/// Most steps a grid flow accepts.
pub const MAX_STEPS: usize = 6;

/// Tunables for [`layout_grid`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Horizontal gap between boxes.
    pub gap: f64,
    /// Lower clamp of the target box width.
    pub min_box_width: f64,
    /// Upper clamp of the target box width.
    pub max_box_width: f64,
    /// Overrides the computed target box width.
    pub target_box_width: Option<f64>,
    /// Upper clamp of the column count.
    pub max_columns: usize,
    /// Box height.
    pub box_height: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Inner padding of a box.
    pub padding: f64,
    /// Size of the `Step N` caption.
    pub caption_size: f64,
    /// Size of the label text.
    pub label_size: f64,
    /// Label line limit.
    pub max_label_lines: usize,
    /// Gap between the grid and the progress bar.
    pub progress_gap: f64,
    /// Progress bar height.
    pub progress_height: f64,
    /// Gap between progress segments.
    pub progress_segment_gap: f64,
    /// Arrowhead length.
    pub arrow_size: f64,
    /// Connector style; `Elbow` applies to row changes only.
    pub connector_style: CurveStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 28.0,
            min_box_width: 160.0,
            max_box_width: 220.0,
            target_box_width: None,
            max_columns: 3,
            box_height: 85.0,
            row_gap: 48.0,
            padding: 10.0,
            caption_size: 12.0,
            label_size: 11.0,
            max_label_lines: 3,
            progress_gap: 22.0,
            progress_height: 8.0,
            progress_segment_gap: 4.0,
            arrow_size: 7.0,
            connector_style: CurveStyle::Bezier,
        }
    }
}

/// Column/row arrangement chosen for a step count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape {
    /// Box width.
    pub box_width: f64,
    /// Columns.
    pub columns: usize,
    /// Rows.
    pub rows: usize,
}

/// Target width `clamp(frame_width/3 - gap, min, max)`, columns
/// `clamp(floor((frame_width + gap) / (target + gap)), 1, max_columns)`, rows `ceil(n / columns)`.
pub fn grid_shape(frame_width: f64, steps: usize, cfg: &GridConfig) -> GridShape {
    let target = cfg.target_box_width.unwrap_or_else(|| {
        (frame_width / 3.0 - cfg.gap).clamp(cfg.min_box_width, cfg.max_box_width)
    });
    let fit = ((frame_width + cfg.gap) / (target + cfg.gap)).floor();
    let columns = (fit.max(1.0) as usize).clamp(1, cfg.max_columns.max(1));
    let rows = steps.div_ceil(columns);
    GridShape {
        box_width: target.min(frame_width.max(0.0)),
        columns,
        rows,
    }
}

/// Lay out `steps` as a wrapped grid centered in `frame`.
///
/// Fails for an empty list or more than [`MAX_STEPS`] steps; the result may still overflow a
/// small frame, which callers check with [`DiagramLayout::fits`].
#[tracing::instrument(skip_all, fields(steps = steps.len()))]
pub fn layout_grid(
    measure: &dyn TextMeasure,
    frame: &ContentFrame,
    steps: &[String],
    cfg: &GridConfig,
) -> LecternResult<DiagramLayout> {
    if steps.is_empty() {
        return Err(LecternError::layout("grid flow needs at least one step"));
    }
    if steps.len() > MAX_STEPS {
        return Err(LecternError::layout(format!(
            "grid flow supports at most {MAX_STEPS} steps, got {}",
            steps.len()
        )));
    }

    let shape = grid_shape(frame.width, steps.len(), cfg);
    let used_cols = shape.columns.min(steps.len());
    let bw = shape.box_width;
    let bh = cfg.box_height;
    let grid_w = used_cols as f64 * bw + (used_cols as f64 - 1.0) * cfg.gap;
    let grid_h = shape.rows as f64 * bh + (shape.rows as f64 - 1.0) * cfg.row_gap;
    let total_h = grid_h + cfg.progress_gap + cfg.progress_height;

    let x0 = frame.x + ((frame.width - grid_w) * 0.5).max(0.0);
    let y0 = frame.y + ((frame.height - total_h) * 0.5).max(0.0);
    tracing::debug!(
        columns = shape.columns,
        rows = shape.rows,
        box_width = bw,
        "grid shape"
    );

    let inner_w = (bw - 2.0 * cfg.padding).max(1.0);
    let mut nodes = Vec::with_capacity(steps.len());
    for (i, label) in steps.iter().enumerate() {
        let row = i / shape.columns;
        let col = i % shape.columns;
        let rect = Rect::new(
            x0 + col as f64 * (bw + cfg.gap),
            y0 + row as f64 * (bh + cfg.row_gap),
            x0 + col as f64 * (bw + cfg.gap) + bw,
            y0 + row as f64 * (bh + cfg.row_gap) + bh,
        );
        let wrapped = wrap_clamped(
            measure,
            label,
            FontRole::Body,
            cfg.label_size,
            inner_w,
            cfg.max_label_lines,
        );
        if wrapped.truncated {
            tracing::debug!(step = i, "step label truncated");
        }
        nodes.push(Node {
            id: NodeId(i),
            kind: NodeKind::Step,
            label: label.clone(),
            description: None,
            caption: Some(format!("Step {}", i + 1)),
            lines: wrapped.lines,
            role: FontRole::Body,
            font_size: cfg.label_size,
            center: rect.center(),
            width: bw,
            height: bh,
            fill: Tone::Accent,
            parent: None,
            force_placed: false,
        });
    }

    let mut connectors = Vec::with_capacity(steps.len().saturating_sub(1));
    for pair in nodes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (ra, rb) = (a.rect(), b.rect());
        let same_row = (ra.y0 - rb.y0).abs() < 1e-9;
        let (path, tail_dir, tip, style) = if same_row {
            let from = Point::new(ra.x1 + 2.0, ra.center().y);
            let to = Point::new(rb.x0 - 2.0, rb.center().y);
            match cfg.connector_style {
                CurveStyle::Bezier => {
                    let p = bowed_curve(from, to, -0.3);
                    let dir = end_tangent(&p, to);
                    (p, dir, to, CurveStyle::Bezier)
                }
                _ => (straight_path(from, to), to - from, to, CurveStyle::Straight),
            }
        } else {
            let from = Point::new(ra.center().x, ra.y1 + 2.0);
            let to = Point::new(rb.center().x, rb.y0 - 2.0);
            match cfg.connector_style {
                CurveStyle::Bezier => {
                    let pull = (to.y - from.y).abs() * 0.9 + 20.0;
                    let mut p = BezPath::new();
                    p.move_to(from);
                    p.curve_to(
                        from + Vec2::new(0.0, pull),
                        to - Vec2::new(0.0, pull),
                        to,
                    );
                    (p, Vec2::new(0.0, 1.0), to, CurveStyle::Bezier)
                }
                CurveStyle::Straight | CurveStyle::Elbow => {
                    (elbow_path(from, to), Vec2::new(0.0, 1.0), to, CurveStyle::Elbow)
                }
            }
        };
        connectors.push(Connector {
            source: a.id,
            target: b.id,
            style,
            color: Tone::Muted,
            width: 1.6,
            path,
            arrow: arrowhead(tip, tail_dir, cfg.arrow_size),
        });
    }

    let bar_y = y0 + grid_h + cfg.progress_gap;
    let n = steps.len() as f64;
    let seg_w = ((grid_w - (n - 1.0) * cfg.progress_segment_gap) / n).max(0.0);
    let progress = (0..steps.len())
        .map(|i| {
            let x = x0 + i as f64 * (seg_w + cfg.progress_segment_gap);
            Rect::new(x, bar_y, x + seg_w, bar_y + cfg.progress_height)
        })
        .collect();

    Ok(DiagramLayout {
        nodes,
        connectors,
        progress,
        rings: Vec::new(),
    })
}

fn end_tangent(path: &BezPath, end: Point) -> Vec2 {
    match path.elements().last() {
        Some(kurbo::PathEl::CurveTo(_, c2, _)) => end - *c2,
        _ => Vec2::new(1.0, 0.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
