use super::*;
use crate::text::metrics::StandardMetrics;

/// Every character is half an em wide.
struct HalfEm;

impl TextMeasure for HalfEm {
    fn measure(&self, text: &str, _role: FontRole, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.5
    }
}

#[test]
fn greedy_wrap_packs_words() {
    // 10pt half-em: 5pt per char, 50pt = 10 chars per line.
    let lines = wrap_text(&HalfEm, "aaa bbb ccc ddd", FontRole::Body, 10.0, 50.0);
    assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
}

#[test]
fn whitespace_is_normalized() {
    let lines = wrap_text(&HalfEm, "  a \n\t b  ", FontRole::Body, 10.0, 100.0);
    assert_eq!(lines, vec!["a b"]);
    assert!(wrap_text(&HalfEm, "   ", FontRole::Body, 10.0, 100.0).is_empty());
}

#[test]
fn overwide_word_is_split_not_looped() {
    let lines = wrap_text(&HalfEm, "xy abcdefghijklmnop z", FontRole::Body, 10.0, 30.0);
    assert_eq!(lines, vec!["xy", "abcdef", "ghijkl", "mnop z"]);
    for l in &lines {
        assert!(HalfEm.measure(l, FontRole::Body, 10.0) <= 30.0);
    }
}

#[test]
fn no_line_exceeds_width_with_real_metrics() {
    let m = StandardMetrics;
    let text = "Chlorophyll absorbs mostly blue and red wavelengths while reflecting green, \
                which is why leaves look green to us during the growing season.";
    for width in [60.0, 120.0, 233.0, 480.0] {
        for size in [11.0, 14.0, 24.0] {
            for line in wrap_text(&m, text, FontRole::Body, size, width) {
                assert!(m.measure(&line, FontRole::Body, size) <= width, "{line:?} @ {width}");
            }
        }
    }
}

#[test]
fn truncate_appends_ellipsis() {
    let t = truncate_to_width(&HalfEm, "abcdefghij", FontRole::Body, 10.0, 30.0);
    assert_eq!(t, "abcde\u{2026}");
    assert_eq!(truncate_to_width(&HalfEm, "abc", FontRole::Body, 10.0, 30.0), "abc");
    assert_eq!(truncate_to_width(&HalfEm, "abc", FontRole::Body, 10.0, 2.0), "");
}

#[test]
fn clamped_wrap_marks_truncation() {
    let w = wrap_clamped(&HalfEm, "aa bb cc dd ee ff", FontRole::Body, 10.0, 25.0, 2);
    assert_eq!(w.lines.len(), 2);
    assert!(w.truncated);
    assert!(w.lines[1].ends_with(ELLIPSIS));
    for l in &w.lines {
        assert!(HalfEm.measure(l, FontRole::Body, 10.0) <= 25.0);
    }

    let w = wrap_clamped(&HalfEm, "aa bb", FontRole::Body, 10.0, 25.0, 3);
    assert!(!w.truncated);
    assert_eq!(w.lines, vec!["aa bb"]);
}
