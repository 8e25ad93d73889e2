//! Slide-deck composition: a title splash, then title + bullets slides.

use crate::{
    compose::{
        composer::Composer,
        page::{Degradation, PageKind, Painter, TextStyle},
    },
    foundation::core::{HAlign, Point, Rect, Rgb},
    plan::model::DocumentPlan,
    text::{
        flow::{FlowItem, FlowStyle},
        metrics::FontRole,
        title::fit_title,
        wrap::wrap_clamped,
    },
};

/// Gap between a slide title and its accent rule.
const RULE_GAP: f64 = 8.0;
/// Accent rule thickness.
const RULE_THICKNESS: f64 = 3.0;
/// Accent rule length.
const RULE_LENGTH: f64 = 96.0;
/// Gap between the accent rule and the first bullet.
const BODY_GAP: f64 = 18.0;
/// Height of the theme header bar.
const HEADER_BAR: f64 = 8.0;
/// Share of the frame width the splash ornament may use.
const ORNAMENT_SHARE: f64 = 0.85;
const ORNAMENT_PAD: (f64, f64) = (24.0, 16.0);

#[tracing::instrument(skip_all, fields(slides = plan.slides.len()))]
pub(crate) fn compose_deck(c: &mut Composer<'_>, plan: &DocumentPlan) {
    splash(c, plan);

    let marker = c.theme.decor.bullet_marker;
    let style = FlowStyle::from_theme(&c.theme);
    for slide in &plan.slides {
        let items: Vec<FlowItem> = slide
            .points
            .iter()
            .map(|p| FlowItem::bullet(p.trim(), marker))
            .collect();
        c.flow_pages(PageKind::Content, slide.title.trim(), &items, style, &slide_header);
    }

    let topic = plan.topic.trim().to_owned();
    c.add_footers(true, true, |page| {
        format!("{topic} • {}/{}", page.index + 1, page.total)
    });
}

fn splash(c: &mut Composer<'_>, plan: &DocumentPlan) {
    let topic = plan.topic.trim();
    let frame = c.geometry.frame;
    let palette = c.theme.palette;
    let sizes = c.theme.sizes;
    let min_contrast = c.min_contrast();

    let mut p = c.painter();
    c.background(&mut p, true);

    let (pad_x, pad_y) = ORNAMENT_PAD;
    let max_text_w = (frame.width * ORNAMENT_SHARE - 2.0 * pad_x).max(1.0);
    let fit = fit_title(
        c.measure,
        topic,
        FontRole::Title,
        sizes.display,
        c.theme.layout.min_title_size,
        max_text_w,
    );
    if fit.truncated {
        c.degrade(Degradation::TitleTruncated {
            page: c.next_index(),
            title: topic.to_owned(),
        });
    }

    let style = TextStyle::new(FontRole::Title, fit.size, palette.text, HAlign::Center);
    let text_h = fit.lines.len() as f64 * style.line_height;
    let orn_w = fit.width(c.measure, FontRole::Title) + 2.0 * pad_x;
    let orn_h = text_h + 2.0 * pad_y;
    let orn = Rect::from_center_size(
        Point::new(frame.center().x, frame.y + frame.height * 0.45),
        (orn_w, orn_h),
    );
    let ornament = Rgb::WHITE.lerp(palette.accent, c.theme.decor.ornament_tint);
    p.fill_rect(orn, (orn_h * 0.3).min(16.0), ornament);

    let color = p.pick_color(ornament, palette.text, palette.background, min_contrast);
    p.text(
        &fit.lines,
        TextStyle { color, ..style },
        orn.x0,
        orn.y0 + pad_y,
        orn.width(),
    );

    let n = plan.slides.len();
    let subtitle = match plan.duration_minutes {
        0 => format!("{n} slides"),
        d => format!("{n} slides · {d} min"),
    };
    let sub_style = TextStyle::new(FontRole::Body, sizes.h3, palette.muted, HAlign::Center);
    let lines = wrap_clamped(
        c.measure,
        &subtitle,
        FontRole::Body,
        sizes.h3,
        frame.width,
        2,
    )
    .lines;
    p.text(&lines, sub_style, frame.x, orn.y1 + 18.0, frame.width);

    c.push_page(PageKind::Cover, topic.to_owned(), p);
}

fn slide_header<'a>(c: &mut Composer<'a>, p: &mut Painter<'a>, title: &str) -> f64 {
    let frame = c.geometry.frame;
    let palette = c.theme.palette;
    let size = c.theme.sizes.title;

    c.background(p, true);
    if c.theme.decor.header_bar {
        p.fill_rect(
            Rect::new(0.0, 0.0, c.geometry.page.width, HEADER_BAR),
            0.0,
            palette.accent,
        );
    }
    let bottom = c.title(
        p,
        title,
        size,
        palette.text,
        HAlign::Left,
        frame.x,
        frame.y,
        frame.width,
    );
    let rule_y = bottom + RULE_GAP;
    p.rule(
        Point::new(frame.x, rule_y),
        RULE_LENGTH.min(frame.width),
        RULE_THICKNESS,
        palette.accent,
    );
    rule_y + RULE_THICKNESS + BODY_GAP
}

#[cfg(test)]
#[path = "../../tests/unit/compose/deck.rs"]
mod tests;
