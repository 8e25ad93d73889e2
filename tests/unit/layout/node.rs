use super::*;
use crate::text::metrics::StandardMetrics;

#[test]
fn bowed_curve_endpoints_and_bias() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(90.0, 0.0);
    let p = bowed_curve(from, to, 0.2);
    let els: Vec<_> = p.elements().to_vec();
    assert_eq!(els.len(), 2);
    match els[1] {
        kurbo::PathEl::CurveTo(c1, c2, end) => {
            assert_eq!(end, to);
            assert!((c1.x - 30.0).abs() < 1e-9 && (c2.x - 60.0).abs() < 1e-9);
            assert!((c1.y - 18.0).abs() < 1e-9 && (c2.y - 18.0).abs() < 1e-9);
        }
        other => panic!("unexpected element {other:?}"),
    }
}

#[test]
fn elbow_is_axis_aligned() {
    let p = elbow_path(Point::new(10.0, 0.0), Point::new(50.0, 40.0));
    let pts: Vec<Point> = p
        .elements()
        .iter()
        .filter_map(|e| match e {
            kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(pts.len(), 4);
    for w in pts.windows(2) {
        assert!(w[0].x == w[1].x || w[0].y == w[1].y);
    }
}

#[test]
fn arrowhead_tip_is_first_point() {
    let tip = Point::new(100.0, 50.0);
    let a = arrowhead(tip, Vec2::new(1.0, 0.0), 8.0).unwrap();
    assert!(matches!(a.elements()[0], kurbo::PathEl::MoveTo(p) if p == tip));
    assert!(arrowhead(tip, Vec2::ZERO, 8.0).is_none());
}

#[test]
fn label_box_shrinks_to_fit() {
    let m = StandardMetrics;
    let b = fit_label_box(
        &m,
        "Light-dependent reactions",
        FontRole::Title,
        16.0,
        8.0,
        90.0,
        Vec2::new(8.0, 6.0),
        2,
    );
    assert!(b.width <= 90.0 && b.height <= 90.0);
    assert!(b.font_size <= 16.0 && b.font_size >= 8.0);
    assert!(!b.lines.is_empty() && b.lines.len() <= 2);
}

#[test]
fn layout_bounds_and_fit() {
    let node = |x: f64| Node {
        id: NodeId(0),
        kind: NodeKind::Step,
        label: "x".into(),
        description: None,
        caption: None,
        lines: vec!["x".into()],
        role: FontRole::Body,
        font_size: 10.0,
        center: Point::new(x, 50.0),
        width: 20.0,
        height: 10.0,
        fill: Tone::Accent,
        parent: None,
        force_placed: false,
    };
    let layout = DiagramLayout {
        nodes: vec![node(20.0), node(80.0)],
        ..Default::default()
    };
    assert_eq!(layout.bounds(), Some(Rect::new(10.0, 45.0, 90.0, 55.0)));
    assert!(layout.fits(&ContentFrame::new(0.0, 0.0, 100.0, 100.0)));
    assert!(!layout.fits(&ContentFrame::new(0.0, 0.0, 85.0, 100.0)));
    assert!(DiagramLayout::default().fits(&ContentFrame::new(0.0, 0.0, 1.0, 1.0)));
}
