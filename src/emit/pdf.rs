//! Paginated-page emitter (PDF).
//!
//! Text is set in the base-14 faces the measurement tables describe (Helvetica,
//! Helvetica-Bold, Courier) with WinAnsi encoding, so nothing is embedded and measured widths
//! match drawn widths. Page coordinates are flipped from y-down to PDF's y-up.

use std::collections::HashMap;

use kurbo::{PathEl, RoundedRect, Shape};
use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use crate::{
    compose::{
        composer::ComposedDocument,
        page::{DrawOp, Fill, PagePlan, Stroke, TextBlock},
    },
    emit::{
        DocumentEmitter,
        background::{GRADIENT_ROWS, gradient_samples},
    },
    foundation::{
        core::{BezPath, Rgb},
        error::{LecternError, LecternResult},
    },
    text::metrics::FontRole,
};

static FONTS: [(FontRole, &[u8], &[u8]); 3] = [
    (FontRole::Body, b"F1", b"Helvetica"),
    (FontRole::Title, b"F2", b"Helvetica-Bold"),
    (FontRole::Mono, b"F3", b"Courier"),
];

/// Curve flattening tolerance for ellipses and rounded corners, in points.
const TOLERANCE: f64 = 0.1;

/// Writes composed pages as a PDF document.
#[derive(Debug, Default)]
pub struct PdfEmitter;

impl DocumentEmitter for PdfEmitter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    #[tracing::instrument(skip_all, fields(pages = doc.pages.len()))]
    fn emit(&mut self, doc: &ComposedDocument) -> LecternResult<Vec<u8>> {
        if doc.pages.is_empty() {
            return Err(LecternError::emit("document has no pages"));
        }
        let mut refs = RefAlloc::default();
        let catalog_id = refs.bump();
        let tree_id = refs.bump();
        let info_id = refs.bump();
        let font_ids: Vec<Ref> = FONTS.iter().map(|_| refs.bump()).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.document_info(info_id)
            .title(TextStr(&doc.topic))
            .creator(TextStr("lectern"))
            .producer(TextStr("lectern"));
        for ((_, _, base), id) in FONTS.iter().zip(&font_ids) {
            pdf.type1_font(*id)
                .base_font(Name(*base))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let mut gradients: HashMap<(Rgb, Rgb), (Ref, String)> = HashMap::new();
        let mut page_ids = Vec::with_capacity(doc.pages.len());
        for page in &doc.pages {
            let page_id = refs.bump();
            let content_id = refs.bump();
            page_ids.push(page_id);

            let used = page_gradient(page).map(|(top, bottom)| {
                let n = gradients.len();
                gradients
                    .entry((top, bottom))
                    .or_insert_with(|| (refs.bump(), format!("Bg{n}")))
                    .clone()
            });

            let content = page_content(page, used.as_ref().map(|(_, name)| name.as_str()));
            pdf.stream(content_id, &content.finish());

            let mut p = pdf.page(page_id);
            p.parent(tree_id)
                .media_box(PdfRect::new(
                    0.0,
                    0.0,
                    page.size.width as f32,
                    page.size.height as f32,
                ))
                .contents(content_id);
            let mut res = p.resources();
            let mut fonts = res.fonts();
            for ((_, name, _), id) in FONTS.iter().zip(&font_ids) {
                fonts.pair(Name(*name), *id);
            }
            fonts.finish();
            if let Some((id, name)) = &used {
                res.x_objects().pair(Name(name.as_bytes()), *id);
            }
            res.finish();
            p.finish();
        }

        pdf.pages(tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        let mut images: Vec<_> = gradients.into_iter().collect();
        images.sort_by_key(|(_, (id, _))| id.get());
        for ((top, bottom), (id, _)) in images {
            let samples = gradient_samples(top, bottom);
            let mut img = pdf.image_xobject(id, &samples);
            img.width(1);
            img.height(GRADIENT_ROWS as i32);
            img.color_space().device_rgb();
            img.bits_per_component(8);
            img.interpolate(true);
            img.finish();
        }

        let bytes = pdf.finish();
        tracing::debug!(bytes = bytes.len(), "pdf written");
        Ok(bytes)
    }
}

#[derive(Debug)]
struct RefAlloc {
    next: i32,
}

impl Default for RefAlloc {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl RefAlloc {
    fn bump(&mut self) -> Ref {
        let r = Ref::new(self.next);
        self.next += 1;
        r
    }
}

fn page_gradient(page: &PagePlan) -> Option<(Rgb, Rgb)> {
    page.ops.iter().find_map(|op| match op {
        DrawOp::Background(Fill::VerticalGradient { top, bottom }) => Some((*top, *bottom)),
        _ => None,
    })
}

fn page_content(page: &PagePlan, gradient: Option<&str>) -> Content {
    let h = page.size.height;
    let mut c = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Background(Fill::Solid(color)) => {
                c.save_state();
                set_fill(&mut c, *color);
                c.rect(0.0, 0.0, page.size.width as f32, h as f32);
                c.fill_nonzero();
                c.restore_state();
            }
            DrawOp::Background(Fill::VerticalGradient { .. }) => {
                if let Some(name) = gradient {
                    c.save_state();
                    c.transform([page.size.width as f32, 0.0, 0.0, h as f32, 0.0, 0.0]);
                    c.x_object(Name(name.as_bytes()));
                    c.restore_state();
                }
            }
            DrawOp::Rect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                if *radius > 0.0 {
                    let shape = RoundedRect::from_rect(*rect, *radius);
                    shape_path(&mut c, shape.path_elements(TOLERANCE), h);
                } else {
                    c.rect(
                        rect.x0 as f32,
                        (h - rect.y1) as f32,
                        rect.width() as f32,
                        rect.height() as f32,
                    );
                }
                paint(&mut c, *fill, *stroke);
            }
            DrawOp::Ellipse { rect, fill, stroke } => {
                let shape = kurbo::Ellipse::from_rect(*rect);
                shape_path(&mut c, shape.path_elements(TOLERANCE), h);
                paint(&mut c, *fill, *stroke);
            }
            DrawOp::Path { path, fill, stroke } => {
                bez_path(&mut c, path, h);
                paint(&mut c, *fill, *stroke);
            }
            DrawOp::Text(block) => text_block(&mut c, block, h),
        }
    }
    c
}

fn set_fill(c: &mut Content, color: Rgb) {
    let [r, g, b] = color.to_unit_f32();
    c.set_fill_rgb(r, g, b);
}

fn paint(c: &mut Content, fill: Option<Rgb>, stroke: Option<Stroke>) {
    c.save_state();
    if let Some(color) = fill {
        set_fill(c, color);
    }
    if let Some(s) = stroke {
        let [r, g, b] = s.color.to_unit_f32();
        c.set_stroke_rgb(r, g, b);
        c.set_line_width(s.width as f32);
    }
    match (fill.is_some(), stroke.is_some()) {
        (true, true) => {
            c.fill_nonzero_and_stroke();
        }
        (true, false) => {
            c.fill_nonzero();
        }
        (false, true) => {
            c.stroke();
        }
        (false, false) => {
            c.end_path();
        }
    }
    c.restore_state();
}

fn bez_path(c: &mut Content, path: &BezPath, h: f64) {
    shape_path(c, path.elements().iter().copied(), h);
}

fn shape_path(c: &mut Content, els: impl Iterator<Item = PathEl>, h: f64) {
    let y = |v: f64| (h - v) as f32;
    let mut cur = kurbo::Point::ZERO;
    for el in els {
        match el {
            PathEl::MoveTo(p) => {
                c.move_to(p.x as f32, y(p.y));
                cur = p;
            }
            PathEl::LineTo(p) => {
                c.line_to(p.x as f32, y(p.y));
                cur = p;
            }
            PathEl::QuadTo(q, p) => {
                // Degree elevation: PDF has no quadratic segment.
                let c1 = cur + (q - cur) * (2.0 / 3.0);
                let c2 = p + (q - p) * (2.0 / 3.0);
                c.cubic_to(
                    c1.x as f32,
                    y(c1.y),
                    c2.x as f32,
                    y(c2.y),
                    p.x as f32,
                    y(p.y),
                );
                cur = p;
            }
            PathEl::CurveTo(a, b, p) => {
                c.cubic_to(a.x as f32, y(a.y), b.x as f32, y(b.y), p.x as f32, y(p.y));
                cur = p;
            }
            PathEl::ClosePath => {
                c.close_path();
            }
        }
    }
}

fn font_name(role: FontRole) -> &'static [u8] {
    FONTS
        .iter()
        .find(|(r, _, _)| *r == role)
        .map_or(&b"F1"[..], |(_, name, _)| *name)
}

fn text_block(c: &mut Content, block: &TextBlock, h: f64) {
    c.save_state();
    set_fill(c, block.color);
    c.begin_text();
    c.set_font(Name(font_name(block.role)), block.size as f32);
    for line in &block.lines {
        c.set_text_matrix([1.0, 0.0, 0.0, 1.0, line.x as f32, (h - line.baseline) as f32]);
        c.show(Str(&win_ansi(&line.text)));
    }
    c.end_text();
    c.restore_state();
}

/// Encode `text` for the WinAnsi base-14 fonts; unmappable characters become `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{2022}' => 0x95,
            '\u{2026}' => 0x85,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/emit/pdf.rs"]
mod tests;
