use crate::text::{
    metrics::{FontRole, TextMeasure},
    wrap::wrap_clamped,
};

/// Maximum number of lines a fitted title may occupy.
pub const MAX_TITLE_LINES: usize = 2;

/// A title sized and broken to fit a width.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleFit {
    /// Chosen font size.
    pub size: f64,
    /// One or two lines.
    pub lines: Vec<String>,
    /// Whether the second line was ellipsized.
    pub truncated: bool,
}

impl TitleFit {
    /// Widest line at the chosen size.
    pub fn width(&self, measure: &dyn TextMeasure, role: FontRole) -> f64 {
        self.lines
            .iter()
            .map(|l| measure.measure(l, role, self.size))
            .fold(0.0, f64::max)
    }
}

/// Fit a title into `max_width`.
///
/// Shrinks one point at a time from `start_size` down to `min_size` looking for a single-line
/// fit; failing that, wraps at `min_size` to at most two lines and ellipsizes the second.
pub fn fit_title(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    start_size: f64,
    min_size: f64,
    max_width: f64,
) -> TitleFit {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let min_size = min_size.max(1.0);
    let start_size = start_size.max(min_size);

    let mut size = start_size;
    loop {
        if measure.measure(&text, role, size) <= max_width {
            return TitleFit {
                size,
                lines: if text.is_empty() { Vec::new() } else { vec![text] },
                truncated: false,
            };
        }
        if size <= min_size {
            break;
        }
        size = (size - 1.0).max(min_size);
    }

    let wrapped = wrap_clamped(measure, &text, role, min_size, max_width, MAX_TITLE_LINES);
    if wrapped.truncated {
        tracing::warn!(title = %text, min_size, max_width, "title truncated at minimum size");
    }
    TitleFit {
        size: min_size,
        lines: wrapped.lines,
        truncated: wrapped.truncated,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/title.rs"]
mod tests;
