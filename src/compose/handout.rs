//! Paginated handout: title page, cheat-sheet (knowledge map + diagram pages) and notes.

use crate::{
    compose::{
        composer::Composer,
        page::{Degradation, DrawOp, PageKind, Painter, TextStyle},
        strategy::{DiagramBody, DiagramInput, Strategy, resolve_diagram, strategies_for},
    },
    foundation::core::{HAlign, Point, Rect, Rgb},
    layout::radial::MAX_BRANCHES,
    page::geometry::{ContentFrame, effective_insets},
    plan::{
        expand::expand_point,
        model::{DiagramKind, DocumentPlan, Slide},
    },
    text::{
        flow::{FlowItem, FlowStyle},
        metrics::FontRole,
        wrap::wrap_clamped,
    },
    theme::{
        contrast::{DARK_TEXT, LIGHT_TEXT},
        tokens::{MarkerShape, SizeTable},
    },
};

/// Heading of the knowledge-map page.
pub const KNOWLEDGE_MAP_HEADING: &str = "Knowledge Map";
const HEADING_GAP: f64 = 16.0;
const BAND_PAD: f64 = 12.0;
/// Notes body size as a share of the slide body size.
const NOTES_BODY_SHARE: f64 = 0.7;

#[tracing::instrument(skip_all, fields(slides = plan.slides.len()))]
pub(crate) fn compose_handout(c: &mut Composer<'_>, plan: &DocumentPlan) {
    cover(c, plan);

    if !c.options.notes_only {
        knowledge_map(c, plan);
        for (kind, slide) in plan.diagram_requests() {
            diagram_page(c, kind, slide);
        }
    }
    if !c.options.cheatsheet_only {
        let total = plan.slides.len();
        for (i, slide) in plan.slides.iter().enumerate() {
            notes(c, slide, i, total);
        }
    }

    let theme = c.theme.clone();
    let topic = plan.topic.trim().to_owned();
    c.add_footers(true, theme.decor.footer_rule, |page| {
        theme.folio_text(&topic, page)
    });
}

fn cover(c: &mut Composer<'_>, plan: &DocumentPlan) {
    let topic = plan.topic.trim();
    let frame = c.geometry.frame;
    let palette = c.theme.palette;
    let sizes = c.theme.sizes;

    let mut p = c.painter();
    c.background(&mut p, true);
    let bottom = c.title(
        &mut p,
        topic,
        sizes.display,
        palette.text,
        HAlign::Center,
        frame.x,
        frame.y + frame.height * 0.3,
        frame.width,
    );
    let rule_w = 96.0_f64.min(frame.width);
    p.rule(
        Point::new(frame.center().x - rule_w * 0.5, bottom + 12.0),
        rule_w,
        3.0,
        palette.accent,
    );
    let subtitle = format!("Lecture notes · {} slides", plan.slides.len());
    let lines = wrap_clamped(
        c.measure,
        &subtitle,
        FontRole::Body,
        sizes.h3,
        frame.width,
        2,
    )
    .lines;
    p.text(
        &lines,
        TextStyle::new(FontRole::Body, sizes.h3, palette.muted, HAlign::Center),
        frame.x,
        bottom + 27.0,
        frame.width,
    );
    c.push_page(PageKind::Cover, topic.to_owned(), p);
}

fn page_heading<'a>(c: &mut Composer<'a>, p: &mut Painter<'a>, heading: &str) -> f64 {
    let frame = c.geometry.frame;
    let palette = c.theme.palette;
    c.background(p, false);
    if c.theme.decor.header_bar {
        p.fill_rect(
            Rect::new(0.0, 0.0, c.geometry.page.width, 8.0),
            0.0,
            palette.accent,
        );
    }
    let size = c.theme.sizes.h2;
    c.title(
        p,
        heading,
        size,
        palette.text,
        HAlign::Left,
        frame.x,
        frame.y,
        frame.width,
    ) + HEADING_GAP
}

fn notes_style(c: &Composer<'_>) -> FlowStyle {
    let body = (c.theme.sizes.body * NOTES_BODY_SHARE)
        .floor()
        .max(SizeTable::MINIMUMS.body);
    FlowStyle::from_theme(&c.theme).with_body_size(body)
}

fn knowledge_map(c: &mut Composer<'_>, plan: &DocumentPlan) {
    let slides = &plan.slides[..plan.slides.len().min(MAX_BRANCHES)];
    let input = DiagramInput {
        center: plan.topic.trim(),
        items: slides.iter().map(|s| s.title.trim().to_owned()).collect(),
        children: slides
            .iter()
            .map(|s| s.points.iter().take(1).map(|p| p.trim().to_owned()).collect())
            .collect(),
    };
    render_diagram(
        c,
        PageKind::KnowledgeMap,
        KNOWLEDGE_MAP_HEADING,
        &input,
        &strategies_for(DiagramKind::Tree),
        DiagramKind::Tree,
    );
}

fn diagram_page(c: &mut Composer<'_>, kind: DiagramKind, slide: &Slide) {
    let title = slide.title.trim();
    let heading = format!("{}: {title}", kind.heading());
    let input = DiagramInput {
        center: title,
        items: slide.points.iter().map(|p| p.trim().to_owned()).collect(),
        children: Vec::new(),
    };
    render_diagram(
        c,
        PageKind::Diagram(kind),
        &heading,
        &input,
        &strategies_for(kind),
        kind,
    );
}

fn render_diagram(
    c: &mut Composer<'_>,
    kind: PageKind,
    heading: &str,
    input: &DiagramInput<'_>,
    strategies: &[Strategy],
    diagram: DiagramKind,
) {
    let page = c.next_index();
    let mut p = c.painter();
    let top = page_heading(c, &mut p, heading);
    let frame = c.geometry.frame;
    let body = ContentFrame::new(frame.x, top, frame.width, frame.bottom() - top);

    let resolved = resolve_diagram(c.measure, &body, input, strategies, &c.options.tuning);
    for f in &resolved.failures {
        if f.force_placed > 0 {
            c.degrade(Degradation::NodesForcePlaced {
                page,
                count: f.force_placed,
            });
        }
    }

    match resolved.body {
        DiagramBody::Diagram(layout) => {
            let palette = c.theme.palette;
            p.diagram(&layout, &palette, c.min_contrast());
            c.push_page(kind, heading.to_owned(), p);
        }
        DiagramBody::Bullets(items) => {
            c.degrade(Degradation::DiagramFallback { page, diagram });
            let marker = c.theme.decor.bullet_marker;
            let items: Vec<FlowItem> = items
                .iter()
                .map(|t| FlowItem::bullet(t.as_str(), marker))
                .collect();
            let style = notes_style(c);
            c.flow_pages_from(kind, heading, &items, style, &page_heading, Some((p, top)));
        }
    }
}

fn notes<'a>(c: &mut Composer<'a>, slide: &Slide, index: usize, total: usize) {
    let items = note_items(
        slide,
        c.options.include_expanded_content,
        c.options.expand_points,
        c.theme.decor.bullet_marker,
    );
    let style = notes_style(c);
    let header = move |c: &mut Composer<'a>, p: &mut Painter<'a>, title: &str| {
        notes_header(c, p, title, index, total)
    };
    c.flow_pages(PageKind::Notes, slide.title.trim(), &items, style, &header);
}

fn notes_header<'a>(
    c: &mut Composer<'a>,
    p: &mut Painter<'a>,
    title: &str,
    index: usize,
    total: usize,
) -> f64 {
    let frame = c.geometry.frame;
    let palette = c.theme.palette;
    let sizes = c.theme.sizes;
    let min_contrast = c.min_contrast();
    let title_top = effective_insets(&c.theme).top * 0.5;

    c.background(p, false);
    let band = palette.accent;
    // Band height depends on the fitted title, so fit on a scratch painter first.
    let mut scratch = c.painter();
    let title_bottom = c.title(
        &mut scratch,
        title,
        sizes.h2,
        band,
        HAlign::Left,
        frame.x,
        title_top,
        frame.width,
    );
    let caption = format!("Slide {} of {total}", index + 1);
    let cap_style = TextStyle::new(FontRole::Body, sizes.footer, band, HAlign::Left);
    let band_bottom = title_bottom + 4.0 + cap_style.line_height + BAND_PAD;

    p.fill_rect(
        Rect::new(0.0, 0.0, c.geometry.page.width, band_bottom),
        0.0,
        band,
    );
    let color = p.pick_color(band, LIGHT_TEXT, DARK_TEXT, min_contrast);
    for op in scratch.finish().0 {
        p.push(recolor(op, color));
    }
    p.text(
        &[caption],
        TextStyle { color, ..cap_style },
        frame.x,
        title_bottom + 4.0,
        frame.width,
    );
    (band_bottom + HEADING_GAP).max(frame.y)
}

fn recolor(op: DrawOp, color: Rgb) -> DrawOp {
    match op {
        DrawOp::Text(mut block) => {
            block.color = color;
            DrawOp::Text(block)
        }
        other => other,
    }
}

/// Flow items for one slide's notes.
pub(crate) fn note_items(
    slide: &Slide,
    include_expanded: bool,
    expand: bool,
    marker: MarkerShape,
) -> Vec<FlowItem> {
    if include_expanded {
        let mut items = Vec::new();
        if let Some(content) = &slide.expanded_content {
            let paragraphs = content.paragraphs();
            if !paragraphs.is_empty() {
                items.push(FlowItem::heading("Overview"));
                items.extend(paragraphs.into_iter().map(FlowItem::paragraph));
            }
        }
        let concepts: Vec<&str> = non_empty(&slide.key_concepts);
        if !concepts.is_empty() {
            items.push(FlowItem::heading("Core Ideas"));
            items.extend(
                concepts
                    .into_iter()
                    .map(|s| FlowItem::bullet(s, MarkerShape::Square)),
            );
        }
        let details: Vec<&str> = non_empty(&slide.supporting_details);
        if !details.is_empty() {
            items.push(FlowItem::heading("Examples & Pitfalls"));
            items.extend(
                details
                    .into_iter()
                    .map(|s| FlowItem::bullet(s, MarkerShape::Dot)),
            );
        }
        if !items.is_empty() {
            return items;
        }
    }
    slide
        .points
        .iter()
        .map(|p| {
            let text = if expand {
                expand_point(p)
            } else {
                p.trim().to_owned()
            };
            FlowItem::bullet(text, marker)
        })
        .collect()
}

fn non_empty(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/handout.rs"]
mod tests;
