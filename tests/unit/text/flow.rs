use super::*;
use crate::text::metrics::StandardMetrics;
use crate::theme::tokens::{ThemeName, resolve_theme};

/// Every character is half an em wide.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn measure(&self, text: &str, _role: FontRole, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.5
    }
}

fn pagination_style() -> FlowStyle {
    FlowStyle {
        body_size: 14.0,
        bullet_leading: 1.35,
        paragraph_leading: 1.35,
        paragraph_gap: 10.0,
        bullet_indent: 18.0,
        marker_size: 6.0,
        marker_gap: 6.0,
        heading_size: 18.0,
    }
}

/// Three ten-letter words: at 14pt half-em each word is 70pt, so a 100pt column holds one per line.
fn three_line_bullets(n: usize) -> Vec<FlowItem> {
    (0..n)
        .map(|i| {
            let w = format!("{:a<10}", i);
            FlowItem::bullet(format!("{w} {w} {w}"), MarkerShape::Square)
        })
        .collect()
}

#[test]
fn pagination_stops_before_crossing_the_limit() {
    let style = pagination_style();
    let frame = ContentFrame::new(0.0, 0.0, 100.0 + style.bullet_text_offset(), 400.0);
    let items = three_line_bullets(10);

    let mut flow = TextFlow::new(&HalfEm, style, frame, frame.bottom());
    assert_eq!(flow.state(), FlowState::Ready);
    let out = flow.flow(&items);

    let line_h = 14.0 * 1.35;
    let stride = 3.0 * line_h + style.bullet_gap();
    let mut expected = 0;
    while expected as f64 * stride + 3.0 * line_h <= 400.0 {
        expected += 1;
    }

    assert_eq!(expected, 6);
    assert_eq!(out.consumed, expected);
    assert_eq!(out.placed.len(), expected);
    assert!(out.needs_page_break());
    assert_eq!(flow.state(), FlowState::StoppedForPageBreak);
    for item in &out.placed {
        assert_eq!(item.lines.len(), 3);
        assert!(item.bottom <= 400.0);
    }

    // A stopped flow places nothing more.
    let again = flow.flow(&items[out.consumed..]);
    assert_eq!(again.consumed, 0);
}

#[test]
fn pagination_is_deterministic() {
    let style = pagination_style();
    let frame = ContentFrame::new(40.0, 60.0, 130.0, 400.0);
    let items = three_line_bullets(10);
    let run = || TextFlow::new(&HalfEm, style, frame, frame.bottom()).flow(&items);
    assert_eq!(run(), run());
}

#[test]
fn continuation_page_finishes_remaining_items() {
    let style = pagination_style();
    let frame = ContentFrame::new(0.0, 0.0, 130.0, 400.0);
    let items = three_line_bullets(10);

    let first = TextFlow::new(&HalfEm, style, frame, frame.bottom()).flow(&items);
    let mut second = TextFlow::new(&HalfEm, style, frame, frame.bottom());
    let rest = second.flow(&items[first.consumed..]);
    assert_eq!(rest.state, FlowState::Finished);
    assert_eq!(first.consumed + rest.consumed, items.len());
    assert_eq!(rest.placed[0].source_index, 0);
}

#[test]
fn bullet_text_columns_align() {
    let style = pagination_style();
    let frame = ContentFrame::new(10.0, 0.0, 300.0, 400.0);
    let items = vec![
        FlowItem::bullet("one", MarkerShape::Dot),
        FlowItem::bullet("two", MarkerShape::Square),
        FlowItem::bullet("three", MarkerShape::Dash),
    ];
    let out = TextFlow::new(&HalfEm, style, frame, frame.bottom()).flow(&items);
    let xs: Vec<f64> = out.placed.iter().map(|p| p.lines[0].x).collect();
    assert!(xs.iter().all(|&x| x == 10.0 + style.bullet_text_offset()));
    for p in &out.placed {
        let m = p.marker.unwrap();
        assert_eq!(m.rect.width(), style.marker_size);
        assert!(m.rect.x1 + style.marker_gap <= p.lines[0].x + 1e-9);
    }
}

#[test]
fn lines_never_exceed_frame_width_with_theme_style() {
    let theme = resolve_theme(ThemeName::Corporate);
    let style = FlowStyle::from_theme(&theme);
    let frame = ContentFrame::new(72.0, 72.0, 420.0, 2000.0);
    let items = vec![
        FlowItem::heading("Core Ideas"),
        FlowItem::paragraph(
            "Enzymes lower activation energy by stabilising the transition state, which speeds \
             up reactions without being consumed.",
        ),
        FlowItem::bullet("Active sites are shaped for specific substrates", MarkerShape::Square),
        FlowItem::bullet("Temperature and pH change enzyme shape", MarkerShape::Dot),
    ];
    let m = StandardMetrics;
    let out = TextFlow::new(&m, style, frame, frame.bottom()).flow(&items);
    assert_eq!(out.state, FlowState::Finished);
    for item in &out.placed {
        for line in &item.lines {
            assert!(line.x + line.width <= frame.right() + 1e-9);
            assert!(m.measure(&line.text, item.role, item.size) <= frame.width);
        }
    }
}

#[test]
fn oversized_item_on_empty_page_is_truncated_not_looped() {
    let style = pagination_style();
    let frame = ContentFrame::new(0.0, 0.0, 130.0, 50.0);
    let items = three_line_bullets(2);
    let out = TextFlow::new(&HalfEm, style, frame, frame.bottom()).flow(&items);
    assert_eq!(out.consumed, 1);
    assert!(out.placed[0].truncated);
    assert_eq!(out.placed[0].lines.len(), 2);
    assert!(out.placed[0].lines[1].text.ends_with(ELLIPSIS));
    assert!(out.needs_page_break());
}

#[test]
fn page_limit_includes_clearance() {
    assert_eq!(TextFlow::page_limit(540.0, 56.0), 540.0 - 56.0 - FLOW_CLEARANCE);
}
