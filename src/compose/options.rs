use std::path::PathBuf;

use crate::{
    foundation::error::{LecternError, LecternResult},
    layout::{grid::GridConfig, radial::RadialConfig},
    page::geometry::{DevicePreset, Orientation, PageSize},
    theme::{contrast::DEFAULT_MIN_CONTRAST, tokens::ThemeName},
};

/// Tunable constants of the layout engines.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Minimum contrast ratio for text on computed backgrounds.
    pub min_contrast: f64,
    /// Radial engine settings (relaxation passes, nudge attempts, gutter, ...).
    pub radial: RadialConfig,
    /// Grid engine settings.
    pub grid: GridConfig,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            min_contrast: DEFAULT_MIN_CONTRAST,
            radial: RadialConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

/// Per-render options. Set fields override the plan's own choices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Theme override.
    pub theme: Option<ThemeName>,
    /// Canvas override.
    pub device_preset: Option<DevicePreset>,
    /// Orientation override.
    pub orientation: Option<Orientation>,
    /// Explicit page size; wins over preset and orientation.
    pub page_size: Option<PageSize>,
    /// Paginated output: title page plus cheat-sheet only.
    pub cheatsheet_only: bool,
    /// Paginated output: title page plus notes only.
    pub notes_only: bool,
    /// Notes pages render expanded sections instead of plain bullets.
    pub include_expanded_content: bool,
    /// Turn terse note bullets into sentences.
    pub expand_points: bool,
    /// Engine constants.
    pub tuning: LayoutTuning,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: None,
            device_preset: None,
            orientation: None,
            page_size: None,
            cheatsheet_only: false,
            notes_only: false,
            include_expanded_content: false,
            expand_points: true,
            tuning: LayoutTuning::default(),
        }
    }
}

impl RenderOptions {
    /// Parse options from JSON (missing fields take defaults).
    pub fn from_json(s: &str) -> LecternResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject contradictory or out-of-range settings.
    pub fn validate(&self) -> LecternResult<()> {
        if self.cheatsheet_only && self.notes_only {
            return Err(LecternError::validation(
                "cheatsheet_only and notes_only are mutually exclusive",
            ));
        }
        if let Some(size) = self.page_size {
            size.validate()?;
        }
        let t = &self.tuning;
        if !(t.min_contrast.is_finite() && t.min_contrast >= 1.0) {
            return Err(LecternError::validation("min_contrast must be >= 1"));
        }
        if t.radial.nudge_attempts == 0 {
            return Err(LecternError::validation("nudge_attempts must be >= 1"));
        }
        if !(t.radial.gutter.is_finite() && t.radial.gutter >= 0.0) {
            return Err(LecternError::validation("gutter must be >= 0"));
        }
        if t.grid.max_columns == 0 {
            return Err(LecternError::validation("grid max_columns must be >= 1"));
        }
        Ok(())
    }
}

/// Which page sequence to compose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLayout {
    /// Title splash plus one or more slides per plan slide.
    #[default]
    Deck,
    /// Title page, cheat-sheet and notes pages.
    Handout,
}

/// Options for PNG previews.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    /// Output width in pixels; height follows the page aspect ratio.
    pub width_px: u32,
    /// Zero-based page to draw.
    pub page: usize,
    /// Composition to draw from.
    pub source: DocumentLayout,
    /// Font used for text; without one only shapes are drawn.
    pub font_path: Option<PathBuf>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width_px: 960,
            page: 0,
            source: DocumentLayout::Deck,
            font_path: None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/options.rs"]
mod tests;
