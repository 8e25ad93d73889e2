use crate::{
    foundation::core::{Edges, HAlign, Rgb, rgb},
    page::geometry::RenderedPage,
};

/// One of the built-in visual themes.
///
/// Unknown names resolve to [`ThemeName::Minimalist`] instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeName {
    /// White canvas, blue accent.
    #[default]
    Minimalist,
    /// Dark green board, chalk-colored text.
    Chalkboard,
    /// Light slate canvas with header bar and footer rule.
    Corporate,
}

impl ThemeName {
    /// Lenient lookup; unrecognized names fall back to the default theme.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "chalkboard" => Self::Chalkboard,
            "corporate" => Self::Corporate,
            "minimalist" => Self::Minimalist,
            other => {
                tracing::debug!(theme = other, "unknown theme name, using minimalist");
                Self::Minimalist
            }
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimalist => "minimalist",
            Self::Chalkboard => "chalkboard",
            Self::Corporate => "corporate",
        }
    }
}

impl From<String> for ThemeName {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<ThemeName> for String {
    fn from(t: ThemeName) -> Self {
        t.as_str().to_owned()
    }
}

/// Font family per typographic role.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontRoles {
    /// Headings and titles.
    pub title: String,
    /// Running text and bullets.
    pub body: String,
    /// Code and tabular text.
    pub mono: String,
}

/// Font size per role, in points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SizeTable {
    /// Cover / splash titles.
    pub display: f64,
    /// Slide and page titles.
    pub title: f64,
    /// Section headings.
    pub h2: f64,
    /// Sub-headings and diagram labels.
    pub h3: f64,
    /// Running text.
    pub body: f64,
    /// Folios and footers.
    pub footer: f64,
}

impl SizeTable {
    /// Floor applied to every role after scaling.
    pub const MINIMUMS: SizeTable = SizeTable {
        display: 18.0,
        title: 18.0,
        h2: 18.0,
        h3: 14.0,
        body: 11.0,
        footer: 9.0,
    };

    /// Apply `f` to each role together with that role's minimum.
    pub fn map_with_min(self, f: impl Fn(f64, f64) -> f64) -> SizeTable {
        let m = Self::MINIMUMS;
        SizeTable {
            display: f(self.display, m.display),
            title: f(self.title, m.title),
            h2: f(self.h2, m.h2),
            h3: f(self.h3, m.h3),
            body: f(self.body, m.body),
            footer: f(self.footer, m.footer),
        }
    }
}

/// Color palette.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Page background.
    pub background: Rgb,
    /// Primary text.
    pub text: Rgb,
    /// Secondary text (subtitles, folios).
    pub muted: Rgb,
    /// Primary accent (bands, bars, central nodes).
    pub accent: Rgb,
    /// Secondary accent (branches, progress).
    pub accent2: Rgb,
    /// Top stop of the background gradient.
    pub gradient_top: Rgb,
    /// Bottom stop of the background gradient.
    pub gradient_bottom: Rgb,
}

/// Shape drawn in front of bullet items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    /// Filled circle.
    #[default]
    Dot,
    /// Filled square.
    Square,
    /// Short horizontal bar.
    Dash,
}

/// How page numbers are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolioStyle {
    /// `Page n`.
    #[default]
    PageNumber,
    /// `<topic> · n/total`.
    TopicFraction,
}

/// Layout constants shared by every page of a theme.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConstants {
    /// Bands reserved for headers and footers.
    pub safe: Edges,
    /// Line advance multiplier for bullets.
    pub bullet_leading: f64,
    /// Line advance multiplier for paragraphs.
    pub paragraph_leading: f64,
    /// Extra space after a paragraph.
    pub paragraph_gap: f64,
    /// Indent of bullet text from the frame's left edge.
    pub bullet_indent: f64,
    /// Edge length of bullet markers.
    pub marker_size: f64,
    /// Gap between marker and text.
    pub marker_gap: f64,
    /// Titles never shrink below this size.
    pub min_title_size: f64,
}

/// Theme-specific ornaments.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Decorations {
    /// Default bullet marker.
    pub bullet_marker: MarkerShape,
    /// Accent bar across the top of content pages.
    pub header_bar: bool,
    /// Divider line above the footer.
    pub footer_rule: bool,
    /// Alignment of folio text.
    pub footer_align: HAlign,
    /// Folio wording.
    pub folio: FolioStyle,
    /// Share of the accent mixed into white for the cover ornament.
    pub ornament_tint: f64,
}

/// Complete, immutable set of design tokens.
///
/// Scaling produces a new value (see [`Theme::scaled`]); nothing mutates a resolved theme.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// Which built-in theme this is.
    pub name: ThemeName,
    /// Font families.
    pub fonts: FontRoles,
    /// Font sizes.
    pub sizes: SizeTable,
    /// Colors.
    pub palette: Palette,
    /// Page margins.
    pub margins: Edges,
    /// Spacing and safe bands.
    pub layout: LayoutConstants,
    /// Ornaments.
    pub decor: Decorations,
    /// Scale factor already applied to `sizes` (1.0 for a freshly resolved theme).
    pub scale: f64,
}

const SHARED_LAYOUT: LayoutConstants = LayoutConstants {
    safe: Edges {
        top: 48.0,
        right: 40.0,
        bottom: 56.0,
        left: 40.0,
    },
    bullet_leading: 1.32,
    paragraph_leading: 1.35,
    paragraph_gap: 10.0,
    bullet_indent: 18.0,
    marker_size: 6.0,
    marker_gap: 6.0,
    min_title_size: 18.0,
};

/// Resolve a theme by name. Always returns a complete theme.
pub fn resolve_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Minimalist => Theme {
            name,
            fonts: fonts("Inter Semibold", "Inter", "Courier New"),
            sizes: SizeTable {
                display: 48.0,
                title: 44.0,
                h2: 28.0,
                h3: 22.0,
                body: 24.0,
                footer: 12.0,
            },
            palette: Palette {
                background: rgb(0xFFFFFF),
                text: rgb(0x0F172A),
                muted: rgb(0x64748B),
                accent: rgb(0x2563EB),
                accent2: rgb(0x10B981),
                gradient_top: rgb(0xFFFFFF),
                gradient_bottom: rgb(0xE2E8F0),
            },
            margins: Edges::uniform(72.0),
            layout: SHARED_LAYOUT,
            decor: Decorations {
                bullet_marker: MarkerShape::Dot,
                header_bar: false,
                footer_rule: false,
                footer_align: HAlign::Center,
                folio: FolioStyle::PageNumber,
                ornament_tint: 0.12,
            },
            scale: 1.0,
        },
        ThemeName::Chalkboard => Theme {
            name,
            fonts: fonts("Cabin Sketch", "Comic Neue", "Courier New"),
            sizes: SizeTable {
                display: 48.0,
                title: 44.0,
                h2: 28.0,
                h3: 22.0,
                body: 24.0,
                footer: 12.0,
            },
            palette: Palette {
                background: rgb(0x1F3D2B),
                text: rgb(0xF1F5F9),
                muted: rgb(0xCBD5E1),
                accent: rgb(0xFBBF24),
                accent2: rgb(0x34D399),
                gradient_top: rgb(0x1F3D2B),
                gradient_bottom: rgb(0x274E37),
            },
            margins: Edges::uniform(72.0),
            layout: SHARED_LAYOUT,
            decor: Decorations {
                bullet_marker: MarkerShape::Dash,
                header_bar: false,
                footer_rule: false,
                footer_align: HAlign::Left,
                folio: FolioStyle::PageNumber,
                ornament_tint: 0.25,
            },
            scale: 1.0,
        },
        ThemeName::Corporate => Theme {
            name,
            fonts: fonts("Source Sans Pro Semibold", "Source Sans Pro", "Consolas"),
            sizes: SizeTable {
                display: 44.0,
                title: 40.0,
                h2: 26.0,
                h3: 20.0,
                body: 22.0,
                footer: 12.0,
            },
            palette: Palette {
                background: rgb(0xF8FAFC),
                text: rgb(0x0B132B),
                muted: rgb(0x334155),
                accent: rgb(0x3B82F6),
                accent2: rgb(0x0EA5E9),
                gradient_top: rgb(0xFFFFFF),
                gradient_bottom: rgb(0xE6F0FF),
            },
            margins: Edges::uniform(72.0),
            layout: SHARED_LAYOUT,
            decor: Decorations {
                bullet_marker: MarkerShape::Square,
                header_bar: true,
                footer_rule: true,
                footer_align: HAlign::Right,
                folio: FolioStyle::TopicFraction,
                ornament_tint: 0.15,
            },
            scale: 1.0,
        },
    }
}

fn fonts(title: &str, body: &str, mono: &str) -> FontRoles {
    FontRoles {
        title: title.to_owned(),
        body: body.to_owned(),
        mono: mono.to_owned(),
    }
}

impl Theme {
    /// Lenient lookup by name.
    pub fn named(name: &str) -> Theme {
        resolve_theme(ThemeName::parse_lenient(name))
    }

    /// Folio text for a page.
    pub fn folio_text(&self, topic: &str, page: &RenderedPage) -> String {
        let n = page.index + 1;
        match self.decor.folio {
            FolioStyle::PageNumber => format!("Page {n}"),
            FolioStyle::TopicFraction => format!("{topic} · {n}/{}", page.total),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/tokens.rs"]
mod tests;
