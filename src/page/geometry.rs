use crate::{
    foundation::core::{Edges, Point, Rect},
    foundation::error::{LecternError, LecternResult},
    theme::tokens::Theme,
};

/// Named canvas shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreset {
    /// Wide 16:9 canvas.
    #[serde(alias = "wide")]
    Desktop,
    /// Classic 4:3 canvas.
    #[serde(alias = "classic")]
    Tablet,
    /// Tall 9:16 canvas.
    #[serde(alias = "tall")]
    Mobile,
}

impl DevicePreset {
    /// Page size of the preset in points.
    pub fn page_size(self) -> PageSize {
        match self {
            Self::Desktop => PageSize::new(960.0, 540.0),
            Self::Tablet => PageSize::new(720.0, 540.0),
            Self::Mobile => PageSize::new(540.0, 960.0),
        }
    }
}

/// Requested orientation when no preset is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Landscape when the wide canvas leaves enough content width, portrait otherwise.
    #[default]
    Auto,
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// Content width above which `auto` orientation picks landscape.
pub const AUTO_LANDSCAPE_THRESHOLD: f64 = 720.0;

/// Page dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSize {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PageSize {
    /// Build a page size (unchecked; see [`PageSize::validate`]).
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject non-finite and non-positive dimensions.
    pub fn validate(self) -> LecternResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(LecternError::validation("page dimensions must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LecternError::validation(format!(
                "page dimensions must be > 0, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Same page turned 90 degrees.
    pub fn rotated(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Full page rectangle with the origin at the top-left.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Select page dimensions.
///
/// A preset wins over an orientation; with neither, the wide landscape canvas is used.
pub fn resolve_page_size(
    preset: Option<DevicePreset>,
    orientation: Option<Orientation>,
    theme: &Theme,
) -> PageSize {
    if let Some(p) = preset {
        return p.page_size();
    }
    match orientation {
        Some(Orientation::Landscape) => PageSize::new(720.0, 540.0),
        Some(Orientation::Portrait) => PageSize::new(540.0, 720.0),
        Some(Orientation::Auto) => {
            let wide = DevicePreset::Desktop.page_size();
            let frame = ContentFrame::for_page(wide, theme);
            if frame.width > AUTO_LANDSCAPE_THRESHOLD {
                wide
            } else {
                wide.rotated()
            }
        }
        None => DevicePreset::Desktop.page_size(),
    }
}

/// Drawable rectangle inside a page after margins and safe bands (top-left origin, y down).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContentFrame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
}

impl ContentFrame {
    /// Frame from an explicit rectangle; negative extents clamp to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Page bounds minus `max(layout.safe_*, margins.*)` on every side.
    pub fn for_page(page: PageSize, theme: &Theme) -> Self {
        let inset = effective_insets(theme);
        let x = inset.left.min(page.width.max(0.0));
        let y = inset.top.min(page.height.max(0.0));
        Self::new(
            x,
            y,
            page.width - inset.left - inset.right,
            page.height - inset.top - inset.bottom,
        )
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Geometric middle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Smaller of width and height.
    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// As a kurbo rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Sub-frame starting `dy` below the current top.
    pub fn below(&self, dy: f64) -> ContentFrame {
        let dy = dy.clamp(0.0, self.height);
        ContentFrame::new(self.x, self.y + dy, self.width, self.height - dy)
    }

    /// Whether `r` lies inside the frame (with a small tolerance for float noise).
    pub fn contains_rect(&self, r: Rect) -> bool {
        const EPS: f64 = 1e-6;
        r.x0 >= self.x - EPS
            && r.y0 >= self.y - EPS
            && r.x1 <= self.right() + EPS
            && r.y1 <= self.bottom() + EPS
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Inset actually applied on each side of a page.
pub fn effective_insets(theme: &Theme) -> Edges {
    theme.layout.safe.max(theme.margins)
}

/// Resolved page plus its content frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Page dimensions.
    pub page: PageSize,
    /// Safe drawable area.
    pub frame: ContentFrame,
}

impl PageGeometry {
    /// Resolve geometry for a preset/orientation (or an explicit size) under `theme`.
    ///
    /// Fails only when the page or its content frame is degenerate.
    pub fn resolve(
        preset: Option<DevicePreset>,
        orientation: Option<Orientation>,
        explicit: Option<PageSize>,
        theme: &Theme,
    ) -> LecternResult<Self> {
        let page = explicit.unwrap_or_else(|| resolve_page_size(preset, orientation, theme));
        Self::for_page(page, theme)
    }

    /// Geometry for a known page size.
    pub fn for_page(page: PageSize, theme: &Theme) -> LecternResult<Self> {
        page.validate()?;
        let frame = ContentFrame::for_page(page, theme);
        if frame.is_degenerate() {
            return Err(LecternError::layout(format!(
                "content frame is empty for a {}x{} page",
                page.width, page.height
            )));
        }
        tracing::debug!(
            page_w = page.width,
            page_h = page.height,
            frame_w = frame.width,
            frame_h = frame.height,
            "page geometry"
        );
        Ok(Self { page, frame })
    }
}

/// Page identity used for folios.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderedPage {
    /// Zero-based index.
    pub index: usize,
    /// Number of pages in the document.
    pub total: usize,
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/page/geometry.rs"]
mod tests;
