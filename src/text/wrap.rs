use crate::text::metrics::{FontRole, TextMeasure};

/// Ellipsis appended to truncated text.
pub const ELLIPSIS: &str = "\u{2026}";

/// Result of wrapping with a line limit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedText {
    /// Lines, each no wider than the requested width.
    pub lines: Vec<String>,
    /// Whether text was dropped to honour the line limit.
    pub truncated: bool,
}

/// Greedy word wrap.
///
/// Words are appended while `measure(line + " " + word) <= max_width`. A word wider than
/// `max_width` on its own is split at character boundaries so no line exceeds the width
/// (a single glyph wider than the whole line is the only exception).
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    size: f64,
    max_width: f64,
) -> Vec<String> {
    let fits = |s: &str| measure.measure(s, role, size) <= max_width;

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_owned()
        } else {
            format!("{line} {word}")
        };
        if fits(&candidate) {
            line = candidate;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if fits(word) {
            line = word.to_owned();
        } else {
            let mut chunks = split_overwide(word, &fits);
            line = chunks.pop().unwrap_or_default();
            lines.extend(chunks);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_overwide(word: &str, fits: &dyn Fn(&str) -> bool) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut cur = String::new();
    for c in word.chars() {
        cur.push(c);
        if !fits(&cur) && cur.chars().count() > 1 {
            cur.pop();
            chunks.push(std::mem::take(&mut cur));
            cur.push(c);
        }
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

/// Shorten `text` until it (plus an ellipsis) fits `max_width`.
///
/// Text that already fits is returned unchanged. Returns an empty string when not even the
/// ellipsis fits.
pub fn truncate_to_width(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    size: f64,
    max_width: f64,
) -> String {
    if measure.measure(text, role, size) <= max_width {
        return text.to_owned();
    }
    if measure.measure(ELLIPSIS, role, size) > max_width {
        return String::new();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let head: String = chars.iter().collect();
        let candidate = format!("{}{ELLIPSIS}", head.trim_end());
        if measure.measure(&candidate, role, size) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_owned()
}

/// Wrap to at most `max_lines`; overflow is folded into the last line and ellipsized.
pub fn wrap_clamped(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    size: f64,
    max_width: f64,
    max_lines: usize,
) -> WrappedText {
    let mut lines = wrap_text(measure, text, role, size, max_width);
    if max_lines == 0 {
        let truncated = !lines.is_empty();
        return WrappedText {
            lines: Vec::new(),
            truncated,
        };
    }
    if lines.len() <= max_lines {
        return WrappedText {
            lines,
            truncated: false,
        };
    }

    let rest = lines.split_off(max_lines - 1).join(" ");
    // Force the ellipsis even when the joined remainder would fit after trimming.
    let mut last = truncate_to_width(measure, &rest, role, size, max_width);
    if !last.ends_with(ELLIPSIS) {
        last = force_ellipsis(measure, &last, role, size, max_width);
    }
    lines.push(last);
    WrappedText {
        lines,
        truncated: true,
    }
}

fn force_ellipsis(
    measure: &dyn TextMeasure,
    text: &str,
    role: FontRole,
    size: f64,
    max_width: f64,
) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    loop {
        let head: String = chars.iter().collect();
        let candidate = format!("{}{ELLIPSIS}", head.trim_end());
        if measure.measure(&candidate, role, size) <= max_width || chars.is_empty() {
            return candidate;
        }
        chars.pop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
