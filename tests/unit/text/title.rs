use super::*;
use crate::text::{metrics::StandardMetrics, wrap::ELLIPSIS};

const LONG: &str =
    "A Very Long Lecture Title That Does Not Fit on One Line at Forty-Four Points";

#[test]
fn short_title_keeps_start_size() {
    let fit = fit_title(&StandardMetrics, "Cells", FontRole::Title, 44.0, 18.0, 600.0);
    assert_eq!(fit.size, 44.0);
    assert_eq!(fit.lines, vec!["Cells"]);
    assert!(!fit.truncated);
}

#[test]
fn long_title_shrinks_and_wraps_to_two_lines() {
    let m = StandardMetrics;
    let fit = fit_title(&m, LONG, FontRole::Title, 44.0, 18.0, 600.0);
    assert!(fit.size >= 18.0 && fit.size <= 44.0);
    assert!(!fit.lines.is_empty() && fit.lines.len() <= 2);
    for line in &fit.lines {
        assert!(m.measure(line, FontRole::Title, fit.size) <= 600.0);
    }
    if fit.truncated {
        assert!(fit.lines[1].ends_with(ELLIPSIS));
    }
}

#[test]
fn medium_title_shrinks_to_single_line() {
    let m = StandardMetrics;
    let title = "Photosynthesis and the Light Reactions";
    let natural = m.measure(title, FontRole::Title, 44.0);
    assert!(natural > 600.0);
    let fit = fit_title(&m, title, FontRole::Title, 44.0, 18.0, 600.0);
    assert_eq!(fit.lines.len(), 1);
    assert!(fit.size < 44.0);
    assert!(fit.width(&m, FontRole::Title) <= 600.0);
    // One point larger would not have fit.
    assert!(m.measure(title, FontRole::Title, fit.size + 1.0) > 600.0);
}

#[test]
fn overflowing_second_line_is_ellipsized() {
    let m = StandardMetrics;
    let title = LONG.repeat(3);
    let fit = fit_title(&m, &title, FontRole::Title, 44.0, 18.0, 300.0);
    assert_eq!(fit.size, 18.0);
    assert_eq!(fit.lines.len(), 2);
    assert!(fit.truncated);
    assert!(fit.lines[1].ends_with(ELLIPSIS));
    assert!(m.measure(&fit.lines[1], FontRole::Title, 18.0) <= 300.0);
}
