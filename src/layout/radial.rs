//! Radial concept-map layout.
//!
//! One central node, up to [`MAX_BRANCHES`] branches on a circle around it, and up to
//! [`MAX_CHILDREN`] children per branch further out along the branch angle. Branch boxes are
//! sized to their angular slot so an even spread does not collide; angle nudging and a fixed
//! number of relaxation passes resolve what remains. Anything still overlapping afterwards is
//! flagged `force_placed`.

use std::f64::consts::{PI, TAU};

use crate::{
    foundation::core::{BezPath, Point, Vec2},
    layout::node::{
        Connector, CurveStyle, DiagramLayout, Node, NodeId, NodeKind, Tone, bowed_curve,
        fit_label_box, straight_path,
    },
    page::geometry::ContentFrame,
    text::metrics::{FontRole, TextMeasure},
};

/// Branches beyond this are dropped.
pub const MAX_BRANCHES: usize = 8;
/// Children per branch beyond this are dropped.
pub const MAX_CHILDREN: usize = 2;

const EPS: f64 = 1e-9;

/// Tunables for [`layout_radial`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    /// Branch ring radius as a fraction of the frame's smaller dimension.
    pub radius_ratio: f64,
    /// Collision circle radius as a fraction of `max(width, height)`.
    pub collision_factor: f64,
    /// Minimum clearance between collision circles.
    pub gutter: f64,
    /// Candidate angles tried per branch.
    pub nudge_attempts: usize,
    /// Angle step between candidates, in degrees.
    pub nudge_step_deg: f64,
    /// Pairwise relaxation passes after placement.
    pub relaxation_passes: usize,
    /// Radial distance from the branch ring to the first child.
    pub child_offset: f64,
    /// Radial distance between consecutive children.
    pub child_spacing: f64,
    /// Largest font for the central label.
    pub center_font: f64,
    /// Largest font for branch labels.
    pub branch_font: f64,
    /// Largest font for child labels.
    pub child_font: f64,
    /// Smallest font any label may shrink to.
    pub min_font: f64,
    /// Upper bound on a branch box's larger dimension.
    pub max_branch_box: f64,
    /// Upper bound on the central box's larger dimension.
    pub max_center_box: f64,
    /// Upper bound on a child box's larger dimension.
    pub max_child_box: f64,
    /// Sideways bow of cross-connections, as a fraction of their length.
    pub cross_link_bias: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            radius_ratio: 0.35,
            collision_factor: 0.6,
            gutter: 10.0,
            nudge_attempts: 6,
            nudge_step_deg: 7.0,
            relaxation_passes: 4,
            child_offset: 96.0,
            child_spacing: 80.0,
            center_font: 16.0,
            branch_font: 12.0,
            child_font: 9.0,
            min_font: 7.0,
            max_branch_box: 150.0,
            max_center_box: 170.0,
            max_child_box: 64.0,
            cross_link_bias: 0.2,
        }
    }
}

/// One branch of a radial diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BranchSpec {
    /// Branch label.
    pub label: String,
    /// Optional secondary text carried on the node.
    pub description: Option<String>,
    /// Child labels (at most [`MAX_CHILDREN`] are used).
    pub children: Vec<String>,
}

impl BranchSpec {
    /// Branch without children.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Attach child labels.
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }
}

/// Lay out a radial diagram inside `frame`.
///
/// `cross_links` are pairs of branch indices joined by a bowed connector. Output is fully
/// determined by the inputs.
#[tracing::instrument(skip_all, fields(branches = branches.len()))]
pub fn layout_radial(
    measure: &dyn TextMeasure,
    frame: &ContentFrame,
    center_label: &str,
    branches: &[BranchSpec],
    cross_links: &[(usize, usize)],
    cfg: &RadialConfig,
) -> DiagramLayout {
    if branches.len() > MAX_BRANCHES {
        tracing::debug!(
            dropped = branches.len() - MAX_BRANCHES,
            "radial layout keeps the first {MAX_BRANCHES} branches"
        );
    }
    let branches = &branches[..branches.len().min(MAX_BRANCHES)];
    let n = branches.len();
    let center = frame.center();
    let radius = cfg.radius_ratio * frame.min_dimension();
    let factor = cfg.collision_factor;

    // Size boxes from the room each one has: a branch may not be wider than its angular slot,
    // and the hub gets whatever the ring leaves over.
    let slot = if n >= 2 {
        2.0 * radius * (PI / n as f64).sin()
    } else {
        2.0 * radius
    };
    let ring_room = (radius - cfg.gutter).max(0.0);
    let branch_r = ((slot - cfg.gutter) * 0.5).min(ring_room * 0.45).max(0.0);
    let branch_dim = (branch_r / factor * 0.98).min(cfg.max_branch_box);
    let center_dim = if n == 0 {
        cfg.max_center_box
    } else {
        ((ring_room - factor * branch_dim) / factor * 0.98).min(cfg.max_center_box)
    };

    let mut nodes = Vec::with_capacity(1 + n * (1 + MAX_CHILDREN));
    let center_box = fit_label_box(
        measure,
        center_label,
        FontRole::Title,
        cfg.center_font,
        cfg.min_font,
        center_dim.max(1.0),
        Vec2::new(12.0, 10.0),
        3,
    );
    nodes.push(Node {
        id: NodeId(0),
        kind: NodeKind::Central,
        label: center_label.to_owned(),
        description: None,
        caption: None,
        lines: center_box.lines,
        role: FontRole::Title,
        font_size: center_box.font_size,
        center,
        width: center_box.width,
        height: center_box.height,
        fill: Tone::Accent,
        parent: None,
        force_placed: false,
    });

    let mut branch_angles = Vec::with_capacity(n);
    let mut branch_ids = Vec::with_capacity(n);
    for (i, spec) in branches.iter().enumerate() {
        let b = fit_label_box(
            measure,
            &spec.label,
            FontRole::Title,
            cfg.branch_font,
            cfg.min_font,
            branch_dim.max(1.0),
            Vec2::new(8.0, 6.0),
            2,
        );
        let mut node = Node {
            id: NodeId(nodes.len()),
            kind: NodeKind::Branch,
            label: spec.label.clone(),
            description: spec.description.clone(),
            caption: None,
            lines: b.lines,
            role: FontRole::Title,
            font_size: b.font_size,
            center,
            width: b.width,
            height: b.height,
            fill: if i % 2 == 0 { Tone::Accent2 } else { Tone::Accent },
            parent: Some(NodeId(0)),
            force_placed: false,
        };

        let base = TAU * i as f64 / n as f64 - PI / 2.0;
        let attempts = cfg.nudge_attempts.max(1);
        let mut chosen = base;
        for attempt in 0..attempts {
            let angle = candidate_angle(base, attempt, cfg.nudge_step_deg);
            node.center = center + Vec2::from_angle(angle) * radius;
            chosen = angle;
            if !collides(&node, &nodes, factor, cfg.gutter) {
                break;
            }
            if attempt + 1 == attempts {
                tracing::debug!(branch = i, "branch placed at last candidate angle");
            }
        }
        branch_angles.push(chosen);
        branch_ids.push(node.id);
        nodes.push(node);
    }

    let mut rings = vec![(center, radius)];
    let mut any_children = false;
    for (i, spec) in branches.iter().enumerate() {
        let angle = branch_angles[i];
        for (j, label) in spec.children.iter().take(MAX_CHILDREN).enumerate() {
            any_children = true;
            let b = fit_label_box(
                measure,
                label,
                FontRole::Body,
                cfg.child_font,
                cfg.min_font,
                cfg.max_child_box,
                Vec2::new(6.0, 4.0),
                2,
            );
            let dist = radius + cfg.child_offset + j as f64 * cfg.child_spacing;
            nodes.push(Node {
                id: NodeId(nodes.len()),
                kind: NodeKind::Child,
                label: label.clone(),
                description: None,
                caption: None,
                lines: b.lines,
                role: FontRole::Body,
                font_size: b.font_size,
                center: center + Vec2::from_angle(angle) * dist,
                width: b.width,
                height: b.height,
                fill: Tone::Muted,
                parent: Some(branch_ids[i]),
                force_placed: false,
            });
        }
    }
    if any_children {
        rings.push((center, radius + cfg.child_offset));
    }

    relax(&mut nodes, factor, cfg.gutter, cfg.relaxation_passes);
    flag_residual_overlaps(&mut nodes, factor, cfg.gutter);

    let mut connectors = Vec::new();
    for &id in &branch_ids {
        let node = &nodes[id.0];
        connectors.push(Connector {
            source: NodeId(0),
            target: id,
            style: CurveStyle::Bezier,
            color: node.fill,
            width: 2.0,
            path: radial_spoke(center, node.center, radius),
            arrow: None,
        });
    }
    for node in nodes.iter().filter(|n| n.kind == NodeKind::Child) {
        let Some(parent) = node.parent.and_then(|p| nodes.get(p.0)) else {
            continue;
        };
        connectors.push(Connector {
            source: parent.id,
            target: node.id,
            style: CurveStyle::Straight,
            color: Tone::Muted,
            width: 1.2,
            path: straight_path(parent.center, node.center),
            arrow: None,
        });
    }
    for &(a, b) in cross_links {
        let (Some(&ia), Some(&ib)) = (branch_ids.get(a), branch_ids.get(b)) else {
            tracing::debug!(a, b, "ignoring cross-link to a missing branch");
            continue;
        };
        if ia == ib {
            continue;
        }
        connectors.push(Connector {
            source: ia,
            target: ib,
            style: CurveStyle::Bezier,
            color: Tone::Muted,
            width: 1.2,
            path: cross_connection(nodes[ia.0].center, nodes[ib.0].center, cfg.cross_link_bias),
            arrow: None,
        });
    }

    let forced = nodes.iter().filter(|n| n.force_placed).count();
    if forced > 0 {
        tracing::warn!(forced, "radial layout left overlapping nodes");
    }

    DiagramLayout {
        nodes,
        connectors,
        progress: Vec::new(),
        rings,
    }
}

/// Candidate angle for a nudge attempt: base, +step, -step, +2*step, -2*step, ...
pub fn candidate_angle(base: f64, attempt: usize, step_deg: f64) -> f64 {
    if attempt == 0 {
        return base;
    }
    let k = attempt.div_ceil(2) as f64;
    let sign = if attempt % 2 == 1 { 1.0 } else { -1.0 };
    base + sign * k * step_deg.to_radians()
}

/// Center-to-branch connector: control points pulled toward the branch along its angle.
pub fn radial_spoke(center: Point, node: Point, radius: f64) -> BezPath {
    let d = node - center;
    let dir = if d.hypot() > EPS {
        d / d.hypot()
    } else {
        Vec2::new(0.0, -1.0)
    };
    let c1 = center + dir * (0.4 * radius);
    let c2 = node - dir * (0.4 * radius * 0.3);
    let mut p = BezPath::new();
    p.move_to(center);
    p.curve_to(c1, c2, node);
    p
}

/// Bowed connection between two arbitrary nodes; `bias` sets how far the curve bows.
pub fn cross_connection(a: Point, b: Point, bias: f64) -> BezPath {
    bowed_curve(a, b, bias)
}

fn required_distance(a: &Node, b: &Node, factor: f64, gutter: f64) -> f64 {
    a.collision_radius(factor) + b.collision_radius(factor) + gutter
}

fn collides(node: &Node, placed: &[Node], factor: f64, gutter: f64) -> bool {
    placed.iter().any(|other| {
        node.center.distance(other.center) + EPS < required_distance(node, other, factor, gutter)
    })
}

fn relax(nodes: &mut [Node], factor: f64, gutter: f64, passes: usize) {
    for _ in 0..passes {
        let mut moved = false;
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let need = required_distance(&nodes[i], &nodes[j], factor, gutter);
                let d = nodes[j].center - nodes[i].center;
                let dist = d.hypot();
                let overlap = need - dist;
                if overlap <= EPS {
                    continue;
                }
                let dir = if dist > EPS {
                    d / dist
                } else {
                    // Coincident centers: separate along the index-derived angle.
                    Vec2::from_angle(TAU * j as f64 / nodes.len() as f64)
                };
                if nodes[i].kind == NodeKind::Central {
                    nodes[j].center += dir * overlap;
                } else {
                    nodes[i].center -= dir * (overlap * 0.5);
                    nodes[j].center += dir * (overlap * 0.5);
                }
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
}

/// Recompute `force_placed` from the overlaps left after relaxation.
fn flag_residual_overlaps(nodes: &mut [Node], factor: f64, gutter: f64) {
    for node in nodes.iter_mut() {
        node.force_placed = false;
    }
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let need = required_distance(&nodes[i], &nodes[j], factor, gutter);
            if nodes[i].center.distance(nodes[j].center) + EPS >= need {
                continue;
            }
            if nodes[i].kind != NodeKind::Central {
                nodes[i].force_placed = true;
            }
            if nodes[j].kind != NodeKind::Central {
                nodes[j].force_placed = true;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/radial.rs"]
mod tests;
