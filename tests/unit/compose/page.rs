use super::*;
use crate::{
    layout::grid::{GridConfig, layout_grid},
    page::geometry::ContentFrame,
    text::metrics::StandardMetrics,
    theme::{contrast::contrast_ratio, tokens::resolve_theme, tokens::ThemeName},
};

fn style(align: HAlign) -> TextStyle {
    TextStyle::new(FontRole::Body, 20.0, Rgb::new(0, 0, 0), align)
}

#[test]
fn text_block_is_aligned_and_stacked() {
    let m = StandardMetrics;
    let mut p = Painter::new(&m);
    let lines = vec!["alpha".to_owned(), "beta gamma".to_owned()];
    let bottom = p.text(&lines, style(HAlign::Right), 10.0, 100.0, 300.0);
    assert_eq!(bottom, 100.0 + 2.0 * 24.0);

    let (ops, misses) = p.finish();
    assert!(misses.is_empty());
    let [DrawOp::Text(block)] = ops.as_slice() else {
        panic!("expected one text block, got {ops:?}");
    };
    for line in &block.lines {
        assert!((line.x + line.width - 310.0).abs() < 1e-9);
    }
    assert_eq!(block.lines[1].baseline - block.lines[0].baseline, 24.0);
    assert!(block.lines[0].baseline > 100.0 && block.lines[0].baseline < 124.0);
}

#[test]
fn empty_text_draws_nothing() {
    let m = StandardMetrics;
    let mut p = Painter::new(&m);
    assert_eq!(p.text(&[], style(HAlign::Left), 0.0, 40.0, 100.0), 40.0);
    assert!(p.finish().0.is_empty());
}

#[test]
fn contrast_misses_are_collected() {
    let m = StandardMetrics;
    let mut p = Painter::new(&m);
    let grey = Rgb::new(0x80, 0x80, 0x80);
    let chosen = p.pick_color(grey, Rgb::new(0x90, 0x90, 0x90), Rgb::new(0x70, 0x70, 0x70), 4.5);
    assert!(chosen == Rgb::new(0x90, 0x90, 0x90) || chosen == Rgb::new(0x70, 0x70, 0x70));
    let white = p.pick_color(Rgb::new(0x11, 0x18, 0x27), LIGHT_TEXT, DARK_TEXT, 4.5);
    assert_eq!(white, LIGHT_TEXT);

    let (_, misses) = p.finish();
    assert_eq!(misses.len(), 1);
    assert_eq!(misses[0].background, grey);
}

#[test]
fn diagram_draws_connectors_before_nodes() {
    let m = StandardMetrics;
    let frame = ContentFrame::new(72.0, 72.0, 816.0, 396.0);
    let steps: Vec<String> = ["Absorb", "Split", "Store"].map(String::from).to_vec();
    let layout = layout_grid(&m, &frame, &steps, &GridConfig::default()).unwrap();
    let theme = resolve_theme(ThemeName::Minimalist);

    let mut p = Painter::new(&m);
    p.diagram(&layout, &theme.palette, 4.5);
    let (ops, _) = p.finish();

    let first_node = ops
        .iter()
        .position(|op| matches!(op, DrawOp::Rect { rect, .. } if rect.height() > 40.0))
        .unwrap();
    let last_path = ops
        .iter()
        .rposition(|op| matches!(op, DrawOp::Path { .. }))
        .unwrap();
    assert!(last_path < first_node);

    let page = PagePlan {
        kind: PageKind::Diagram(DiagramKind::Process),
        size: PageSize {
            width: 960.0,
            height: 540.0,
        },
        title: "Process".into(),
        ops: ops.clone(),
    };
    let text: Vec<&str> = page.text_lines().collect();
    assert!(text.contains(&"Step 1") && text.contains(&"Store"));

    // Node labels are readable on their fills.
    let mut fill = None;
    for op in &ops {
        match op {
            DrawOp::Rect { fill: Some(f), rect, .. } if rect.height() > 40.0 => fill = Some(*f),
            DrawOp::Text(block) => {
                let bg = fill.unwrap();
                assert!(contrast_ratio(block.color, bg) >= 4.5, "{block:?}");
            }
            _ => {}
        }
    }
}

#[test]
fn rule_is_a_thin_rect() {
    let m = StandardMetrics;
    let mut p = Painter::new(&m);
    p.rule(Point::new(10.0, 20.0), 50.0, 2.0, Rgb::new(0, 0, 0));
    p.rule(Point::new(10.0, 20.0), -5.0, 2.0, Rgb::new(0, 0, 0));
    let (ops, _) = p.finish();
    assert_eq!(
        ops[0],
        DrawOp::Rect {
            rect: Rect::new(10.0, 20.0, 60.0, 22.0),
            radius: 0.0,
            fill: Some(Rgb::new(0, 0, 0)),
            stroke: None,
        }
    );
    let DrawOp::Rect { rect, .. } = &ops[1] else {
        panic!("rule should be a rect");
    };
    assert_eq!(rect.width(), 0.0);
}
