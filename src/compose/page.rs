use crate::{
    foundation::{
        core::{BezPath, HAlign, Point, Rect, Rgb},
        math::align_offset,
    },
    layout::node::{DiagramLayout, NodeKind},
    page::geometry::PageSize,
    plan::model::DiagramKind,
    text::{
        flow::{FlowItemKind, PlacedItem},
        metrics::{FontRole, TextMeasure},
    },
    theme::{
        contrast::{DARK_TEXT, LIGHT_TEXT, pick_text_color},
        tokens::{MarkerShape, Palette},
    },
};

/// Page background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    /// Flat color.
    Solid(Rgb),
    /// Top-to-bottom linear blend.
    VerticalGradient {
        /// Color at the top edge.
        top: Rgb,
        /// Color at the bottom edge.
        bottom: Rgb,
    },
}

/// Outline of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Color.
    pub color: Rgb,
    /// Width in points.
    pub width: f64,
}

/// A single positioned line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    /// Text.
    pub text: String,
    /// Left edge after alignment.
    pub x: f64,
    /// Baseline.
    pub baseline: f64,
    /// Measured advance width.
    pub width: f64,
}

/// Lines sharing one style, laid out top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Lines, already wrapped and positioned.
    pub lines: Vec<TextLine>,
    /// Font role.
    pub role: FontRole,
    /// Font size.
    pub size: f64,
    /// Line advance.
    pub line_height: f64,
    /// Fill color.
    pub color: Rgb,
    /// Alignment of lines within `bounds`.
    pub align: HAlign,
    /// Box the block was laid out in.
    pub bounds: Rect,
}

/// One drawing primitive in page coordinates (points, top-left origin, y down).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Covers the whole page.
    Background(Fill),
    /// Axis-aligned rectangle with optional rounded corners.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Corner radius; 0 for square corners.
        radius: f64,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Ellipse inscribed in `rect`.
    Ellipse {
        /// Bounding box.
        rect: Rect,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Arbitrary path.
    Path {
        /// Geometry.
        path: BezPath,
        /// Fill color.
        fill: Option<Rgb>,
        /// Outline.
        stroke: Option<Stroke>,
    },
    /// Text.
    Text(TextBlock),
}

/// What a page is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    /// Title splash / cover.
    Cover,
    /// Slide with title and bullets.
    Content,
    /// Radial overview of the whole lecture.
    KnowledgeMap,
    /// Diagram for one requested kind.
    Diagram(DiagramKind),
    /// Notes for one slide.
    Notes,
}

/// Everything needed to draw one page.
#[derive(Clone, Debug, PartialEq)]
pub struct PagePlan {
    /// Purpose.
    pub kind: PageKind,
    /// Page dimensions.
    pub size: PageSize,
    /// Heading shown on the page (used for slide names and logging).
    pub title: String,
    /// Draw operations, back to front.
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    /// Every text line on the page, in draw order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().flat_map(|op| match op {
            DrawOp::Text(block) => block.lines.iter().map(|l| l.text.as_str()).collect(),
            _ => Vec::new(),
        })
    }
}

/// A cosmetic problem that was handled locally instead of failing the render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// A title did not fit on two lines at the minimum size and was ellipsized.
    TitleTruncated {
        /// Page index.
        page: usize,
        /// Original title.
        title: String,
    },
    /// Radial nodes remained overlapping after relaxation.
    NodesForcePlaced {
        /// Page index.
        page: usize,
        /// Number of flagged nodes.
        count: usize,
    },
    /// A flow item taller than an empty page was cut short or dropped.
    FlowTruncated {
        /// Page index.
        page: usize,
        /// Start of the affected text.
        excerpt: String,
    },
    /// No text color candidate reached the contrast minimum.
    ContrastFallback {
        /// Page index.
        page: usize,
        /// Background the text sits on.
        background: Rgb,
        /// Ratio of the color that was used.
        ratio: f64,
    },
    /// A diagram could not be laid out and was drawn as bullets.
    DiagramFallback {
        /// Page index.
        page: usize,
        /// Requested diagram kind.
        diagram: DiagramKind,
    },
}

/// Text styling for [`Painter::text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font role.
    pub role: FontRole,
    /// Font size.
    pub size: f64,
    /// Line advance.
    pub line_height: f64,
    /// Color.
    pub color: Rgb,
    /// Alignment within the box width.
    pub align: HAlign,
}

impl TextStyle {
    /// Style with the default 1.2 line advance.
    pub fn new(role: FontRole, size: f64, color: Rgb, align: HAlign) -> Self {
        Self {
            role,
            size,
            line_height: size * 1.2,
            color,
            align,
        }
    }
}

/// Baseline of the first line of a line box starting at `top`.
pub(crate) fn first_baseline(top: f64, size: f64, line_height: f64) -> f64 {
    top + size * 0.8 + (line_height - size) * 0.5
}

/// Background on which neither text color candidate met the minimum contrast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ContrastMiss {
    pub(crate) background: Rgb,
    pub(crate) ratio: f64,
}

/// Accumulates draw operations for one page.
pub struct Painter<'m> {
    measure: &'m dyn TextMeasure,
    ops: Vec<DrawOp>,
    contrast_misses: Vec<ContrastMiss>,
}

impl<'m> Painter<'m> {
    /// Empty page.
    pub fn new(measure: &'m dyn TextMeasure) -> Self {
        Self {
            measure,
            ops: Vec::new(),
            contrast_misses: Vec::new(),
        }
    }

    /// Append a raw operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Filled rectangle.
    pub fn fill_rect(&mut self, rect: Rect, radius: f64, color: Rgb) {
        self.ops.push(DrawOp::Rect {
            rect,
            radius,
            fill: Some(color),
            stroke: None,
        });
    }

    /// Lay `lines` out from `top` inside `[x, x + width]`; returns the bottom of the block.
    pub fn text(
        &mut self,
        lines: &[String],
        style: TextStyle,
        x: f64,
        top: f64,
        width: f64,
    ) -> f64 {
        let factor = style.align.factor();
        let mut baseline = first_baseline(top, style.size, style.line_height);
        let mut placed = Vec::with_capacity(lines.len());
        for text in lines {
            let w = self.measure.measure(text, style.role, style.size);
            placed.push(TextLine {
                text: text.clone(),
                x: x + align_offset(width, w, factor),
                baseline,
                width: w,
            });
            baseline += style.line_height;
        }
        let bottom = top + lines.len() as f64 * style.line_height;
        if !placed.is_empty() {
            self.ops.push(DrawOp::Text(TextBlock {
                lines: placed,
                role: style.role,
                size: style.size,
                line_height: style.line_height,
                color: style.color,
                align: style.align,
                bounds: Rect::new(x, top, x + width, bottom),
            }));
        }
        bottom
    }

    /// Text on a filled background, colored for contrast against `background`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn text_on(
        &mut self,
        background: Rgb,
        min_contrast: f64,
        lines: &[String],
        mut style: TextStyle,
        x: f64,
        top: f64,
        width: f64,
    ) -> f64 {
        style.color = self.contrast_color(background, min_contrast);
        self.text(lines, style, x, top, width)
    }

    fn contrast_color(&mut self, background: Rgb, min_contrast: f64) -> Rgb {
        self.pick_color(background, LIGHT_TEXT, DARK_TEXT, min_contrast)
    }

    /// Better of two text colors on `background`; misses are reported by [`Painter::finish`].
    pub(crate) fn pick_color(&mut self, background: Rgb, a: Rgb, b: Rgb, min_contrast: f64) -> Rgb {
        let choice = pick_text_color(background, a, b, min_contrast);
        if !choice.meets_minimum {
            self.contrast_misses.push(ContrastMiss {
                background,
                ratio: choice.ratio,
            });
        }
        choice.color
    }

    /// Draw the output of a [`TextFlow`](crate::text::flow::TextFlow).
    pub fn flow(
        &mut self,
        placed: &[PlacedItem],
        right: f64,
        text: Rgb,
        marker: Rgb,
        heading: Rgb,
    ) {
        for item in placed {
            if let Some(m) = item.marker {
                let r = m.rect;
                match m.shape {
                    MarkerShape::Dot => self.ops.push(DrawOp::Ellipse {
                        rect: r,
                        fill: Some(marker),
                        stroke: None,
                    }),
                    _ => self.fill_rect(r, 0.0, marker),
                }
            }
            let color = if item.kind == FlowItemKind::Heading {
                heading
            } else {
                text
            };
            let Some(first) = item.lines.first() else {
                continue;
            };
            self.ops.push(DrawOp::Text(TextBlock {
                lines: item
                    .lines
                    .iter()
                    .map(|l| TextLine {
                        text: l.text.clone(),
                        x: l.x,
                        baseline: l.baseline,
                        width: l.width,
                    })
                    .collect(),
                role: item.role,
                size: item.size,
                line_height: item.line_height,
                color,
                align: HAlign::Left,
                bounds: Rect::new(first.x, item.top, right.max(first.x), item.bottom),
            }));
        }
    }

    /// Draw a diagram: rings, connectors, progress bar, then nodes with their labels.
    pub fn diagram(&mut self, layout: &DiagramLayout, palette: &Palette, min_contrast: f64) {
        for &(center, radius) in &layout.rings {
            self.ops.push(DrawOp::Ellipse {
                rect: Rect::from_center_size(center, (radius * 2.0, radius * 2.0)),
                fill: None,
                stroke: Some(Stroke {
                    color: palette.muted,
                    width: 0.75,
                }),
            });
        }
        for c in &layout.connectors {
            let color = c.color.resolve(palette);
            self.ops.push(DrawOp::Path {
                path: c.path.clone(),
                fill: None,
                stroke: Some(Stroke {
                    color,
                    width: c.width,
                }),
            });
            if let Some(arrow) = &c.arrow {
                self.ops.push(DrawOp::Path {
                    path: arrow.clone(),
                    fill: Some(color),
                    stroke: None,
                });
            }
        }
        for seg in &layout.progress {
            self.fill_rect(*seg, seg.height() * 0.5, palette.accent2);
        }

        for node in &layout.nodes {
            let fill = node.fill.resolve(palette);
            let rect = node.rect();
            match node.kind {
                NodeKind::Central => self.ops.push(DrawOp::Ellipse {
                    rect,
                    fill: Some(fill),
                    stroke: None,
                }),
                NodeKind::Child => self.fill_rect(rect, 6.0, fill),
                NodeKind::Branch | NodeKind::Step => {
                    self.fill_rect(rect, (rect.height() * 0.2).min(12.0), fill)
                }
            }

            let body = TextStyle::new(node.role, node.font_size, fill, HAlign::Center);
            let caption = node.caption.as_ref().map(|c| {
                let style = TextStyle::new(FontRole::Title, node.font_size + 1.0, fill, HAlign::Center);
                (vec![c.clone()], style)
            });
            let block_h = node.lines.len() as f64 * body.line_height
                + caption.as_ref().map_or(0.0, |(_, s)| s.line_height + 2.0);
            let mut top = node.center.y - block_h * 0.5;
            if let Some((lines, style)) = caption {
                top = self.text_on(fill, min_contrast, &lines, style, rect.x0, top, rect.width());
                top += 2.0;
            }
            self.text_on(fill, min_contrast, &node.lines, body, rect.x0, top, rect.width());
        }
    }

    /// Thin horizontal rule.
    pub fn rule(&mut self, from: Point, width: f64, thickness: f64, color: Rgb) {
        self.fill_rect(
            Rect::new(from.x, from.y, from.x + width.max(0.0), from.y + thickness),
            0.0,
            color,
        );
    }

    /// Finished operations plus every background on which no text color met the minimum.
    pub(crate) fn finish(self) -> (Vec<DrawOp>, Vec<ContrastMiss>) {
        (self.ops, self.contrast_misses)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/page.rs"]
mod tests;
