use crate::{
    foundation::core::{BezPath, Point, Rect, Rgb, Vec2},
    page::geometry::ContentFrame,
    text::{
        metrics::{FontRole, TextMeasure},
        wrap::wrap_clamped,
    },
    theme::tokens::Palette,
};

/// Index of a node inside its [`DiagramLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Role of a node in a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Hub of a radial diagram.
    Central,
    /// First ring of a radial diagram.
    Branch,
    /// Second ring, attached to a branch.
    Child,
    /// Box in a step flow.
    Step,
}

/// Palette slot used for fills and strokes; resolved against a theme at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// `palette.accent`.
    Accent,
    /// `palette.accent2`.
    Accent2,
    /// `palette.muted`.
    Muted,
}

impl Tone {
    /// Concrete color under `palette`.
    pub fn resolve(self, palette: &Palette) -> Rgb {
        match self {
            Self::Accent => palette.accent,
            Self::Accent2 => palette.accent2,
            Self::Muted => palette.muted,
        }
    }
}

/// A positioned, labelled box.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Identity within the layout.
    pub id: NodeId,
    /// Role.
    pub kind: NodeKind,
    /// Full label text.
    pub label: String,
    /// Optional secondary text.
    pub description: Option<String>,
    /// Small caption drawn above the label (e.g. `Step 2`).
    pub caption: Option<String>,
    /// Label broken into display lines.
    pub lines: Vec<String>,
    /// Label font role.
    pub role: FontRole,
    /// Label font size.
    pub font_size: f64,
    /// Box center.
    pub center: Point,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Fill slot.
    pub fill: Tone,
    /// Parent node (children and branches).
    pub parent: Option<NodeId>,
    /// Accepted while still overlapping a neighbour.
    pub force_placed: bool,
}

impl Node {
    /// Bounding box.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, (self.width, self.height))
    }

    /// Radius of the bounding circle used for collision tests.
    pub fn collision_radius(&self, factor: f64) -> f64 {
        self.width.max(self.height) * factor
    }
}

/// How a connector is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    /// Cubic Bezier.
    #[default]
    Bezier,
    /// Straight segment.
    Straight,
    /// Axis-aligned dog-leg.
    Elbow,
}

/// Edge between two nodes, with its final path.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// Start node.
    pub source: NodeId,
    /// End node.
    pub target: NodeId,
    /// Curve style used to build `path`.
    pub style: CurveStyle,
    /// Stroke slot.
    pub color: Tone,
    /// Stroke width.
    pub width: f64,
    /// Stroked path.
    pub path: BezPath,
    /// Filled arrowhead at the target end.
    pub arrow: Option<BezPath>,
}

/// Output of a diagram engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramLayout {
    /// Nodes in placement order.
    pub nodes: Vec<Node>,
    /// Connectors, drawn beneath nodes.
    pub connectors: Vec<Connector>,
    /// Filled progress-bar segments.
    pub progress: Vec<Rect>,
    /// Guide rings `(center, radius)` drawn behind everything.
    pub rings: Vec<(Point, f64)>,
}

impl DiagramLayout {
    /// Number of nodes accepted while overlapping.
    pub fn force_placed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.force_placed).count()
    }

    /// Union of node boxes and progress segments.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::rect)
            .chain(self.progress.iter().copied())
            .reduce(|a, b| a.union(b))
    }

    /// Whether every node box and progress segment lies in `frame`.
    pub fn fits(&self, frame: &ContentFrame) -> bool {
        self.bounds().is_none_or(|b| frame.contains_rect(b))
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }
}

/// Label lines and box size produced by [`fit_label_box`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LabelBox {
    pub(crate) lines: Vec<String>,
    pub(crate) font_size: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Largest font in `[min_size, max_size]` whose wrapped label box fits `max_dim` on both axes.
///
/// Falls back to `min_size` with an ellipsized last line when nothing fits.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fit_label_box(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    max_size: f64,
    min_size: f64,
    max_dim: f64,
    padding: Vec2,
    max_lines: usize,
) -> LabelBox {
    let inner = (max_dim - 2.0 * padding.x).max(1.0);
    let build = |size: f64| {
        let wrapped = wrap_clamped(measure, text, role, size, inner, max_lines);
        let text_w = wrapped
            .lines
            .iter()
            .map(|l| measure.measure(l, role, size))
            .fold(0.0, f64::max);
        let lines = wrapped.lines.len().max(1) as f64;
        let b = LabelBox {
            font_size: size,
            width: text_w + 2.0 * padding.x,
            height: lines * size * 1.2 + 2.0 * padding.y,
            lines: wrapped.lines,
        };
        (b, wrapped.truncated)
    };

    let mut size = max_size.max(min_size);
    loop {
        let (b, truncated) = build(size);
        if !truncated && b.width <= max_dim && b.height <= max_dim {
            return b;
        }
        if size <= min_size {
            return b;
        }
        size = (size - 1.0).max(min_size);
    }
}

/// Cubic from `from` to `to` whose control points sit at 1/3 and 2/3 of the chord, pushed
/// sideways by `bias * chord length`.
pub fn bowed_curve(from: Point, to: Point, bias: f64) -> BezPath {
    let d = to - from;
    let normal = Vec2::new(-d.y, d.x);
    let c1 = from + d * (1.0 / 3.0) + normal * bias;
    let c2 = from + d * (2.0 / 3.0) + normal * bias;
    let mut p = BezPath::new();
    p.move_to(from);
    p.curve_to(c1, c2, to);
    p
}

/// Straight segment.
pub fn straight_path(from: Point, to: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(to);
    p
}

/// Vertical-horizontal-vertical dog-leg meeting at the vertical midpoint.
pub fn elbow_path(from: Point, to: Point) -> BezPath {
    let mid = (from.y + to.y) * 0.5;
    let mut p = BezPath::new();
    p.move_to(from);
    p.line_to(Point::new(from.x, mid));
    p.line_to(Point::new(to.x, mid));
    p.line_to(to);
    p
}

/// Filled triangle whose tip is at `tip`, pointing along `direction`.
pub fn arrowhead(tip: Point, direction: Vec2, size: f64) -> Option<BezPath> {
    let len = direction.hypot();
    if len <= f64::EPSILON {
        return None;
    }
    let u = direction / len;
    let n = Vec2::new(-u.y, u.x);
    let base = tip - u * size;
    let mut p = BezPath::new();
    p.move_to(tip);
    p.line_to(base + n * (size * 0.5));
    p.line_to(base - n * (size * 0.5));
    p.close_path();
    Some(p)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/node.rs"]
mod tests;
