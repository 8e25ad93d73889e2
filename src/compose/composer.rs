use crate::{
    compose::{
        deck::compose_deck,
        handout::compose_handout,
        options::{DocumentLayout, RenderOptions},
        page::{Degradation, DrawOp, Fill, PageKind, PagePlan, Painter, TextStyle},
    },
    foundation::{
        core::{HAlign, Point, Rgb},
        error::LecternResult,
    },
    page::geometry::{ContentFrame, PageGeometry, RenderedPage, effective_insets},
    plan::model::DocumentPlan,
    text::{
        flow::{FlowItem, FlowStyle, PlacedItem, TextFlow},
        metrics::{FontRole, TextMeasure},
        title::fit_title,
        wrap::truncate_to_width,
    },
    theme::{
        scale::compute_scale,
        tokens::{Theme, resolve_theme},
    },
};

/// Characters of flow text quoted in a [`Degradation::FlowTruncated`].
const EXCERPT_CHARS: usize = 40;
/// Distance from the bottom inset edge down to the footer rule.
const FOOTER_RULE_OFFSET: f64 = 12.0;

/// Pages and degradations for one plan.
#[derive(Clone, Debug)]
pub struct ComposedDocument {
    /// Lecture topic (used for document metadata).
    pub topic: String,
    /// Content language tag.
    pub language: String,
    /// Scaled theme the pages were composed with.
    pub theme: Theme,
    /// Pages in order.
    pub pages: Vec<PagePlan>,
    /// Cosmetic problems handled along the way.
    pub degradations: Vec<Degradation>,
}

/// Draws a page header and returns the y where body content starts.
pub(crate) type HeaderFn<'a> = dyn Fn(&mut Composer<'a>, &mut Painter<'a>, &str) -> f64;

/// Resolve theme and geometry, then lay out every page of `plan`.
#[tracing::instrument(skip_all, fields(layout = ?layout, slides = plan.slides.len()))]
pub fn compose(
    measure: &dyn TextMeasure,
    plan: &DocumentPlan,
    options: &RenderOptions,
    layout: DocumentLayout,
) -> LecternResult<ComposedDocument> {
    plan.validate()?;
    options.validate()?;

    let base = resolve_theme(options.theme.unwrap_or(plan.theme));
    let geometry = PageGeometry::resolve(
        options.device_preset.or(plan.device_preset),
        options.orientation.or(plan.orientation),
        options.page_size,
        &base,
    )?;
    let scale = compute_scale(geometry.frame.width);
    let theme = base.scaled(scale);
    tracing::debug!(
        theme = theme.name.as_str(),
        scale,
        title = theme.sizes.title,
        body = theme.sizes.body,
        "resolved theme"
    );

    let mut composer = Composer::new(measure, theme, geometry, options);
    match layout {
        DocumentLayout::Deck => compose_deck(&mut composer, plan),
        DocumentLayout::Handout => compose_handout(&mut composer, plan),
    }
    Ok(composer.finish(plan))
}

/// Mutable state while composing one document.
pub(crate) struct Composer<'a> {
    pub(crate) measure: &'a dyn TextMeasure,
    pub(crate) theme: Theme,
    pub(crate) geometry: PageGeometry,
    pub(crate) options: &'a RenderOptions,
    pages: Vec<PagePlan>,
    degradations: Vec<Degradation>,
}

impl<'a> Composer<'a> {
    pub(crate) fn new(
        measure: &'a dyn TextMeasure,
        theme: Theme,
        geometry: PageGeometry,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            measure,
            theme,
            geometry,
            options,
            pages: Vec::new(),
            degradations: Vec::new(),
        }
    }

    pub(crate) fn painter(&self) -> Painter<'a> {
        Painter::new(self.measure)
    }

    /// Index the next pushed page will get.
    pub(crate) fn next_index(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn min_contrast(&self) -> f64 {
        self.options.tuning.min_contrast
    }

    pub(crate) fn gradient(&self) -> Fill {
        Fill::VerticalGradient {
            top: self.theme.palette.gradient_top,
            bottom: self.theme.palette.gradient_bottom,
        }
    }

    pub(crate) fn degrade(&mut self, d: Degradation) {
        tracing::warn!(degradation = ?d, "degraded output");
        self.degradations.push(d);
    }

    pub(crate) fn push_page(&mut self, kind: PageKind, title: String, painter: Painter<'a>) {
        let page = self.pages.len();
        let (ops, misses) = painter.finish();
        for m in misses {
            self.degrade(Degradation::ContrastFallback {
                page,
                background: m.background,
                ratio: m.ratio,
            });
        }
        self.pages.push(PagePlan {
            kind,
            size: self.geometry.page,
            title,
            ops,
        });
    }

    /// Fit and draw a title; returns the bottom of the drawn block.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn title(
        &mut self,
        painter: &mut Painter<'a>,
        text: &str,
        start_size: f64,
        color: Rgb,
        align: HAlign,
        x: f64,
        top: f64,
        width: f64,
    ) -> f64 {
        let fit = fit_title(
            self.measure,
            text,
            FontRole::Title,
            start_size,
            self.theme.layout.min_title_size,
            width,
        );
        if fit.truncated {
            self.degrade(Degradation::TitleTruncated {
                page: self.next_index(),
                title: text.to_owned(),
            });
        }
        let style = TextStyle::new(FontRole::Title, fit.size, color, align);
        painter.text(&fit.lines, style, x, top, width)
    }

    /// Flow `items` under a header, adding continuation pages titled `"<title> (cont.)"`.
    pub(crate) fn flow_pages(
        &mut self,
        kind: PageKind,
        title: &str,
        items: &[FlowItem],
        style: FlowStyle,
        header: &HeaderFn<'a>,
    ) {
        self.flow_pages_from(kind, title, items, style, header, None);
    }

    /// [`Composer::flow_pages`] whose first page was already started by the caller.
    pub(crate) fn flow_pages_from(
        &mut self,
        kind: PageKind,
        title: &str,
        items: &[FlowItem],
        style: FlowStyle,
        header: &HeaderFn<'a>,
        mut first: Option<(Painter<'a>, f64)>,
    ) {
        let frame = self.geometry.frame;
        let limit = TextFlow::page_limit(self.geometry.page.height, self.theme.layout.safe.bottom);
        let palette = self.theme.palette;

        let mut rest = items;
        let mut part = 0usize;
        loop {
            let page_title = if part == 0 {
                title.to_owned()
            } else {
                format!("{title} (cont.)")
            };
            let (mut painter, top) = match first.take() {
                Some(started) => started,
                None => {
                    let mut painter = self.painter();
                    let top = header(self, &mut painter, &page_title);
                    (painter, top)
                }
            };

            let body = ContentFrame::new(frame.x, top, frame.width, frame.bottom() - top);
            let mut flow = TextFlow::new(self.measure, style, body, limit);
            let outcome = flow.flow(rest);
            // An unplaceable item still has to leave the queue.
            let consumed = outcome.consumed.max(1).min(rest.len());
            self.note_truncation(&rest[..consumed], &outcome.placed);
            painter.flow(
                &outcome.placed,
                body.right(),
                palette.text,
                palette.accent,
                palette.accent,
            );
            tracing::debug!(
                page = self.next_index(),
                placed = outcome.placed.len(),
                state = ?outcome.state,
                "flowed page"
            );
            self.push_page(kind, page_title, painter);

            rest = &rest[consumed..];
            if rest.is_empty() {
                break;
            }
            part += 1;
        }
    }

    fn note_truncation(&mut self, items: &[FlowItem], placed: &[PlacedItem]) {
        let page = self.next_index();
        for (i, item) in items.iter().enumerate() {
            let intact = placed
                .iter()
                .find(|p| p.source_index == i)
                .is_some_and(|p| !p.truncated);
            if !intact {
                self.degrade(Degradation::FlowTruncated {
                    page,
                    excerpt: item.text.chars().take(EXCERPT_CHARS).collect(),
                });
            }
        }
    }

    /// Append a footer to every page (optionally skipping the first).
    pub(crate) fn add_footers(
        &mut self,
        skip_first: bool,
        rule: bool,
        text: impl Fn(&RenderedPage) -> String,
    ) {
        let total = self.pages.len();
        let frame = self.geometry.frame;
        let inset = effective_insets(&self.theme);
        let rule_y = self.geometry.page.height - inset.bottom + FOOTER_RULE_OFFSET;
        let size = self.theme.sizes.footer;
        let color = self.theme.palette.muted;
        let style = TextStyle::new(FontRole::Body, size, color, self.theme.decor.footer_align);

        for (i, page) in self.pages.iter_mut().enumerate() {
            if skip_first && i == 0 {
                continue;
            }
            let mut painter = Painter::new(self.measure);
            if rule {
                painter.rule(Point::new(frame.x, rule_y), frame.width, 0.75, color);
            }
            let folio = RenderedPage {
                index: i,
                total,
                width: page.size.width,
                height: page.size.height,
            };
            let label = truncate_to_width(
                self.measure,
                &text(&folio),
                FontRole::Body,
                size,
                frame.width,
            );
            painter.text(&[label], style, frame.x, rule_y + 6.0, frame.width);
            let (ops, _) = painter.finish();
            page.ops.extend(ops);
        }
    }

    pub(crate) fn background(&self, painter: &mut Painter<'a>, gradient: bool) {
        let fill = if gradient {
            self.gradient()
        } else {
            Fill::Solid(self.theme.palette.background)
        };
        painter.push(DrawOp::Background(fill));
    }

    pub(crate) fn finish(self, plan: &DocumentPlan) -> ComposedDocument {
        ComposedDocument {
            topic: plan.topic.trim().to_owned(),
            language: plan.language.clone(),
            theme: self.theme,
            pages: self.pages,
            degradations: self.degradations,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
