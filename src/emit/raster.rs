//! Raster preview emitter (PNG) on the `vello_cpu` rasterizer.
//!
//! Shapes are always drawn. Text needs real glyph outlines, so it is shaped with `parley` and
//! drawn only when a font file is supplied; every line is set with that one face.

use std::path::Path;

use anyhow::Context as _;
use kurbo::{PathEl, RoundedRect, Shape};

use crate::{
    compose::{
        composer::ComposedDocument,
        page::{DrawOp, Fill, PagePlan, Stroke, TextBlock},
    },
    emit::{DocumentEmitter, background::encode_png},
    foundation::{
        core::{Affine, Point, Rgb},
        error::{LecternError, LecternResult},
    },
};

/// Largest accepted output width in pixels.
pub const MAX_WIDTH_PX: u32 = 4096;
const TOLERANCE: f64 = 0.1;

/// Draws one composed page into a PNG.
pub struct RasterEmitter {
    width_px: u32,
    page: usize,
    shaper: Option<GlyphShaper>,
}

impl std::fmt::Debug for RasterEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterEmitter")
            .field("width_px", &self.width_px)
            .field("page", &self.page)
            .field("text", &self.shaper.is_some())
            .finish()
    }
}

impl RasterEmitter {
    /// Shapes-only emitter for page `page` at `width_px` pixels wide.
    pub fn new(width_px: u32, page: usize) -> LecternResult<Self> {
        if width_px == 0 || width_px > MAX_WIDTH_PX {
            return Err(LecternError::validation(format!(
                "raster width must be 1..={MAX_WIDTH_PX} pixels, got {width_px}"
            )));
        }
        Ok(Self {
            width_px,
            page,
            shaper: None,
        })
    }

    /// Draw text with the font at `path`.
    pub fn with_font_file(self, path: &Path) -> LecternResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading font {}", path.display()))?;
        self.with_font_bytes(bytes)
    }

    /// Draw text with an in-memory TTF/OTF font.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> LecternResult<Self> {
        self.shaper = Some(GlyphShaper::new(bytes)?);
        Ok(self)
    }

    fn pixel_size(&self, page: &PagePlan) -> LecternResult<(u16, u16, f64)> {
        let scale = f64::from(self.width_px) / page.size.width;
        let h = (page.size.height * scale).round();
        if !(1.0..=f64::from(u16::MAX)).contains(&h) {
            return Err(LecternError::validation(format!(
                "raster height {h} is out of range"
            )));
        }
        let w = u16::try_from(self.width_px)
            .map_err(|_| LecternError::validation("raster width is out of range"))?;
        Ok((w, h as u16, scale))
    }
}

impl DocumentEmitter for RasterEmitter {
    fn name(&self) -> &'static str {
        "png"
    }

    #[tracing::instrument(skip_all, fields(page = self.page, width_px = self.width_px))]
    fn emit(&mut self, doc: &ComposedDocument) -> LecternResult<Vec<u8>> {
        let page = doc.pages.get(self.page).ok_or_else(|| {
            LecternError::validation(format!(
                "page {} does not exist (document has {})",
                self.page,
                doc.pages.len()
            ))
        })?;
        let (w, h, scale) = self.pixel_size(page)?;
        if self.shaper.is_none() {
            tracing::debug!("no font supplied, drawing shapes only");
        }

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let to_px = Affine::scale(scale);
        for op in &page.ops {
            draw_op(&mut ctx, op, to_px, (w, h), self.shaper.as_mut())?;
        }
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let rgba = unpremultiply(pixmap.data_as_u8_slice());
        let img = image::RgbaImage::from_raw(u32::from(w), u32::from(h), rgba)
            .ok_or_else(|| LecternError::emit("pixmap size mismatch"))?;
        encode_png(&img)
    }
}

fn paint(color: Rgb) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn path_to_cpu(els: impl Iterator<Item = PathEl>) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in els {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn fill_and_stroke(
    ctx: &mut vello_cpu::RenderContext,
    path: &vello_cpu::kurbo::BezPath,
    fill: Option<Rgb>,
    stroke: Option<Stroke>,
) {
    if let Some(c) = fill {
        ctx.set_paint(paint(c));
        ctx.fill_path(path);
    }
    if let Some(s) = stroke {
        ctx.set_paint(paint(s.color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(s.width));
        ctx.stroke_path(path);
    }
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    to_px: Affine,
    (w, h): (u16, u16),
    shaper: Option<&mut GlyphShaper>,
) -> LecternResult<()> {
    ctx.set_transform(affine_to_cpu(to_px));
    match op {
        DrawOp::Background(Fill::Solid(c)) => {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint(*c));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        }
        DrawOp::Background(Fill::VerticalGradient { top, bottom }) => {
            // One band per pixel row.
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            let span = f64::from(h.saturating_sub(1).max(1));
            for y in 0..h {
                let y = f64::from(y);
                ctx.set_paint(paint(top.lerp(*bottom, y / span)));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y, f64::from(w), y + 1.0));
            }
        }
        DrawOp::Rect {
            rect,
            radius,
            fill,
            stroke,
        } => {
            let path = if *radius > 0.0 {
                path_to_cpu(RoundedRect::from_rect(*rect, *radius).path_elements(TOLERANCE))
            } else {
                path_to_cpu(rect.path_elements(TOLERANCE))
            };
            fill_and_stroke(ctx, &path, *fill, *stroke);
        }
        DrawOp::Ellipse { rect, fill, stroke } => {
            let path = path_to_cpu(kurbo::Ellipse::from_rect(*rect).path_elements(TOLERANCE));
            fill_and_stroke(ctx, &path, *fill, *stroke);
        }
        DrawOp::Path { path, fill, stroke } => {
            let path = path_to_cpu(path.elements().iter().copied());
            fill_and_stroke(ctx, &path, *fill, *stroke);
        }
        DrawOp::Text(block) => {
            if let Some(shaper) = shaper {
                shaper.draw(ctx, block, to_px)?;
            }
        }
    }
    Ok(())
}

fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Shapes single lines with `parley` against one registered face.
struct GlyphShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl GlyphShaper {
    fn new(bytes: Vec<u8>) -> LecternResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LecternError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LecternError::validation("registered font family has no name"))?
            .to_string();
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        block: &TextBlock,
        to_px: Affine,
    ) -> LecternResult<()> {
        let size = block.size as f32;
        if !size.is_finite() || size <= 0.0 {
            return Err(LecternError::validation("text size must be finite and > 0"));
        }
        for line in &block.lines {
            let mut builder = self
                .layout_ctx
                .ranged_builder(&mut self.font_ctx, &line.text, 1.0, true);
            builder.push_default(parley::style::StyleProperty::FontStack(
                parley::style::FontStack::Source(std::borrow::Cow::Borrowed(&self.family)),
            ));
            builder.push_default(parley::style::StyleProperty::FontSize(size));
            builder.push_default(parley::style::StyleProperty::Brush(block.color));
            let mut layout: parley::Layout<Rgb> = builder.build(&line.text);
            layout.break_all_lines(None);

            for shaped in layout.lines() {
                let origin = Affine::translate((
                    line.x,
                    line.baseline - f64::from(shaped.metrics().baseline),
                ));
                ctx.set_transform(affine_to_cpu(to_px * origin));
                for item in shaped.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    ctx.set_paint(paint(run.style().brush));
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&self.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/raster.rs"]
mod tests;
