//! Paragraph/bullet flow with page-break signalling.
//!
//! A [`TextFlow`] owns a vertical cursor inside one content frame. Items are placed whole: an
//! item is drawn only when all of its wrapped lines end above the flow limit. When an item does
//! not fit, the flow moves to [`FlowState::StoppedForPageBreak`] and reports how many items it
//! consumed; continuing on a fresh page is the caller's job.

use crate::{
    foundation::core::Rect,
    page::geometry::ContentFrame,
    text::{
        metrics::{FontRole, TextMeasure},
        wrap::{ELLIPSIS, wrap_text},
    },
    theme::tokens::{MarkerShape, Theme},
};

/// Clearance kept between the last line and the flow limit.
pub const FLOW_CLEARANCE: f64 = 12.0;

/// Lifecycle of a [`TextFlow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// Nothing placed yet.
    Ready,
    /// Placing items.
    Flowing,
    /// The next item would cross the limit; the caller should start a new page.
    StoppedForPageBreak,
    /// Every item handed to the last [`TextFlow::flow`] call was placed.
    Finished,
}

/// Kind of flow item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowItemKind {
    /// Running paragraph.
    Paragraph,
    /// Bullet with a fixed-size marker.
    Bullet(MarkerShape),
    /// Section heading.
    Heading,
}

/// One unit of flowed content.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowItem {
    /// Item kind.
    pub kind: FlowItemKind,
    /// Unwrapped text.
    pub text: String,
}

impl FlowItem {
    /// Paragraph item.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: FlowItemKind::Paragraph,
            text: text.into(),
        }
    }

    /// Bullet item.
    pub fn bullet(text: impl Into<String>, marker: MarkerShape) -> Self {
        Self {
            kind: FlowItemKind::Bullet(marker),
            text: text.into(),
        }
    }

    /// Heading item.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            kind: FlowItemKind::Heading,
            text: text.into(),
        }
    }
}

/// Typography used by a flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowStyle {
    /// Body text size.
    pub body_size: f64,
    /// Line advance multiplier for bullets.
    pub bullet_leading: f64,
    /// Line advance multiplier for paragraphs.
    pub paragraph_leading: f64,
    /// Extra space after a paragraph.
    pub paragraph_gap: f64,
    /// Indent of the bullet marker from the frame's left edge.
    pub bullet_indent: f64,
    /// Marker edge length.
    pub marker_size: f64,
    /// Gap between marker and text.
    pub marker_gap: f64,
    /// Heading text size.
    pub heading_size: f64,
}

impl FlowStyle {
    /// Style derived from a (scaled) theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            body_size: theme.sizes.body,
            bullet_leading: theme.layout.bullet_leading,
            paragraph_leading: theme.layout.paragraph_leading,
            paragraph_gap: theme.layout.paragraph_gap,
            bullet_indent: theme.layout.bullet_indent,
            marker_size: theme.layout.marker_size,
            marker_gap: theme.layout.marker_gap,
            heading_size: theme.sizes.h3,
        }
    }

    /// Same style with a different body size.
    pub fn with_body_size(mut self, size: f64) -> Self {
        self.body_size = size;
        self
    }

    /// Space after a bullet item.
    pub fn bullet_gap(&self) -> f64 {
        (self.body_size * 0.18).max(4.0)
    }

    /// Horizontal offset of bullet text from the frame's left edge.
    pub fn bullet_text_offset(&self) -> f64 {
        self.bullet_indent + self.marker_size + self.marker_gap
    }

    fn metrics_for(&self, kind: FlowItemKind) -> ItemMetrics {
        match kind {
            FlowItemKind::Paragraph => ItemMetrics {
                role: FontRole::Body,
                size: self.body_size,
                line_height: self.body_size * self.paragraph_leading,
                gap_after: self.paragraph_gap,
                text_offset: 0.0,
            },
            FlowItemKind::Bullet(_) => ItemMetrics {
                role: FontRole::Body,
                size: self.body_size,
                line_height: self.body_size * self.bullet_leading,
                gap_after: self.bullet_gap(),
                text_offset: self.bullet_text_offset(),
            },
            FlowItemKind::Heading => ItemMetrics {
                role: FontRole::Title,
                size: self.heading_size,
                line_height: self.heading_size * 1.2,
                gap_after: self.heading_size * 0.4,
                text_offset: 0.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ItemMetrics {
    role: FontRole,
    size: f64,
    line_height: f64,
    gap_after: f64,
    text_offset: f64,
}

/// A line positioned on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    /// Line text.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Baseline y.
    pub baseline: f64,
    /// Measured width.
    pub width: f64,
}

/// Marker geometry for a bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedMarker {
    /// Marker shape.
    pub shape: MarkerShape,
    /// Bounding box.
    pub rect: Rect,
}

/// An item positioned on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem {
    /// Index into the slice passed to [`TextFlow::flow`].
    pub source_index: usize,
    /// Item kind.
    pub kind: FlowItemKind,
    /// Font role.
    pub role: FontRole,
    /// Font size.
    pub size: f64,
    /// Line advance.
    pub line_height: f64,
    /// Wrapped lines.
    pub lines: Vec<PlacedLine>,
    /// Bullet marker, if any.
    pub marker: Option<PlacedMarker>,
    /// Top of the item's first line box.
    pub top: f64,
    /// Bottom of the item's last line box.
    pub bottom: f64,
    /// Lines were dropped because the item alone is taller than the frame.
    pub truncated: bool,
}

/// Result of one [`TextFlow::flow`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowOutcome {
    /// Items placed by this call, in order.
    pub placed: Vec<PlacedItem>,
    /// Number of input items consumed (placed or, for an unplaceable item, dropped).
    pub consumed: usize,
    /// State after the call.
    pub state: FlowState,
    /// Cursor after the call.
    pub cursor_y: f64,
}

impl FlowOutcome {
    /// Whether the caller must continue on a new page.
    pub fn needs_page_break(&self) -> bool {
        self.state == FlowState::StoppedForPageBreak
    }
}

/// Cursor-driven text flow inside one content frame.
pub struct TextFlow<'m> {
    measure: &'m dyn TextMeasure,
    style: FlowStyle,
    frame: ContentFrame,
    limit_y: f64,
    cursor_y: f64,
    state: FlowState,
    placed_any: bool,
}

impl<'m> TextFlow<'m> {
    /// New flow starting at the top of `frame`; nothing is placed below `limit_y`.
    ///
    /// The limit is clamped to the frame's bottom edge.
    pub fn new(
        measure: &'m dyn TextMeasure,
        style: FlowStyle,
        frame: ContentFrame,
        limit_y: f64,
    ) -> Self {
        Self {
            measure,
            style,
            frame,
            limit_y: limit_y.min(frame.bottom()),
            cursor_y: frame.y,
            state: FlowState::Ready,
            placed_any: false,
        }
    }

    /// Limit for a page of the given height: `page_height - (safe_bottom + clearance)`.
    pub fn page_limit(page_height: f64, safe_bottom: f64) -> f64 {
        page_height - (safe_bottom + FLOW_CLEARANCE)
    }

    /// Current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Current cursor.
    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    /// Move the cursor down without placing anything.
    pub fn advance(&mut self, dy: f64) {
        self.cursor_y += dy.max(0.0);
    }

    /// Height `item` would occupy, including its trailing gap.
    pub fn item_height(&self, item: &FlowItem) -> f64 {
        let m = self.style.metrics_for(item.kind);
        let lines = self.wrap_item(item, &m).len().max(1);
        lines as f64 * m.line_height + m.gap_after
    }

    /// Place as many of `items` as fit.
    pub fn flow(&mut self, items: &[FlowItem]) -> FlowOutcome {
        if self.state == FlowState::StoppedForPageBreak {
            return self.outcome(Vec::new(), 0);
        }
        self.state = FlowState::Flowing;

        let mut placed = Vec::new();
        let mut consumed = 0;
        for (i, item) in items.iter().enumerate() {
            if self.cursor_y > self.limit_y {
                self.state = FlowState::StoppedForPageBreak;
                break;
            }
            let m = self.style.metrics_for(item.kind);
            let lines = self.wrap_item(item, &m);
            let needed = lines.len() as f64 * m.line_height;

            if self.cursor_y + needed <= self.limit_y {
                placed.push(self.place(i, item, &m, lines, false));
                consumed += 1;
                continue;
            }

            if self.placed_any {
                self.state = FlowState::StoppedForPageBreak;
                break;
            }

            // Alone on an empty page and still too tall: keep what fits.
            let room = ((self.limit_y - self.cursor_y) / m.line_height).floor().max(0.0) as usize;
            tracing::warn!(
                item = i,
                lines = lines.len(),
                room,
                "flow item taller than the page, truncating"
            );
            let mut kept: Vec<String> = lines.into_iter().take(room).collect();
            if let Some(last) = kept.last_mut() {
                *last = self.ellipsize(last, &m);
            }
            if !kept.is_empty() {
                placed.push(self.place(i, item, &m, kept, true));
            }
            consumed += 1;
        }

        if consumed == items.len() && self.state != FlowState::StoppedForPageBreak {
            self.state = FlowState::Finished;
        }
        self.outcome(placed, consumed)
    }

    fn outcome(&self, placed: Vec<PlacedItem>, consumed: usize) -> FlowOutcome {
        FlowOutcome {
            placed,
            consumed,
            state: self.state,
            cursor_y: self.cursor_y,
        }
    }

    fn wrap_item(&self, item: &FlowItem, m: &ItemMetrics) -> Vec<String> {
        let width = (self.frame.width - m.text_offset).max(0.0);
        wrap_text(self.measure, &item.text, m.role, m.size, width)
    }

    fn ellipsize(&self, line: &str, m: &ItemMetrics) -> String {
        let width = (self.frame.width - m.text_offset).max(0.0);
        let mut chars: Vec<char> = line.chars().collect();
        loop {
            let head: String = chars.iter().collect();
            let candidate = format!("{}{ELLIPSIS}", head.trim_end());
            if chars.is_empty() || self.measure.measure(&candidate, m.role, m.size) <= width {
                return candidate;
            }
            chars.pop();
        }
    }

    fn place(
        &mut self,
        source_index: usize,
        item: &FlowItem,
        m: &ItemMetrics,
        lines: Vec<String>,
        truncated: bool,
    ) -> PlacedItem {
        let top = self.cursor_y;
        let x = self.frame.x + m.text_offset;
        let ascent = m.size * 0.8;

        let mut placed_lines = Vec::with_capacity(lines.len());
        for text in lines {
            let width = self.measure.measure(&text, m.role, m.size);
            placed_lines.push(PlacedLine {
                text,
                x,
                baseline: self.cursor_y + ascent + (m.line_height - m.size) * 0.5,
                width,
            });
            self.cursor_y += m.line_height;
        }
        let bottom = self.cursor_y;

        let marker = match item.kind {
            FlowItemKind::Bullet(shape) => placed_lines.first().map(|first| {
                let s = self.style.marker_size;
                let cy = first.baseline - m.size * 0.32;
                let h = if shape == MarkerShape::Dash { s * 0.34 } else { s };
                let x0 = self.frame.x + self.style.bullet_indent;
                PlacedMarker {
                    shape,
                    rect: Rect::new(x0, cy - h * 0.5, x0 + s, cy + h * 0.5),
                }
            }),
            _ => None,
        };

        self.cursor_y += m.gap_after;
        self.placed_any = true;

        PlacedItem {
            source_index,
            kind: item.kind,
            role: m.role,
            size: m.size,
            line_height: m.line_height,
            lines: placed_lines,
            marker,
            top,
            bottom,
            truncated,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/flow.rs"]
mod tests;
