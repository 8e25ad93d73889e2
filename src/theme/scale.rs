use crate::theme::tokens::Theme;

/// Reference content width the base sizes were designed against (10.24in).
pub const BASELINE_WIDTH: f64 = 737.28;
/// Lower scale bound.
pub const MIN_SCALE: f64 = 0.85;
/// Upper scale bound.
pub const MAX_SCALE: f64 = 1.15;

/// Scale factor for a content frame of the given width, clamped to `[0.85, 1.15]`.
///
/// Non-finite or non-positive widths resolve to the lower bound.
pub fn compute_scale(content_frame_width: f64) -> f64 {
    if !content_frame_width.is_finite() || content_frame_width <= 0.0 {
        return MIN_SCALE;
    }
    (content_frame_width / BASELINE_WIDTH).clamp(MIN_SCALE, MAX_SCALE)
}

impl Theme {
    /// New theme whose sizes are multiplied by `scale`, floored, and clamped to role minimums.
    ///
    /// `self` is left untouched. Scaling compounds: an already-scaled theme is multiplied again and
    /// only the latest factor is kept in `scale`, so callers should scale a freshly resolved theme.
    pub fn scaled(&self, scale: f64) -> Theme {
        let scale = if scale.is_finite() {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            1.0
        };
        let mut out = self.clone();
        out.sizes = self
            .sizes
            .map_with_min(|size, min| (size * scale).floor().max(min));
        out.scale = scale;
        out
    }

    /// Convenience: compute the scale for `content_frame_width` and apply it.
    pub fn scaled_for_width(&self, content_frame_width: f64) -> Theme {
        let scale = compute_scale(content_frame_width);
        tracing::debug!(content_frame_width, scale, "adaptive scale");
        self.scaled(scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/scale.rs"]
mod tests;
