use super::*;

#[test]
fn black_and_white_extremes() {
    assert!((relative_luminance(Rgb::new(0, 0, 0)) - 0.0).abs() < 1e-12);
    assert!((relative_luminance(Rgb::new(255, 255, 255)) - 1.0).abs() < 1e-9);
    let r = contrast_ratio(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
    assert!((r - 21.0).abs() < 1e-6);
}

#[test]
fn ratio_is_symmetric() {
    let a = Rgb::new(0x25, 0x63, 0xEB);
    let b = Rgb::new(0xF1, 0xF5, 0xF9);
    assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
}

#[test]
fn dark_board_gets_white_text() {
    let choice = readable_text_on(Rgb::from_hex("#1F3D2B").unwrap(), DEFAULT_MIN_CONTRAST);
    assert_eq!(choice.color, LIGHT_TEXT);
    assert!(choice.ratio >= 4.5);
    assert!(choice.meets_minimum);
}

#[test]
fn white_page_gets_near_black_text() {
    let choice = readable_text_on(Rgb::from_hex("#FFFFFF").unwrap(), DEFAULT_MIN_CONTRAST);
    assert_eq!(choice.color, DARK_TEXT);
    assert!(choice.ratio >= 4.5);
}

#[test]
fn neither_candidate_qualifies_returns_better_one() {
    // Two mid greys against a mid grey: nothing reaches 4.5.
    let bg = Rgb::new(0x80, 0x80, 0x80);
    let light = Rgb::new(0xA0, 0xA0, 0xA0);
    let dark = Rgb::new(0x50, 0x50, 0x50);
    let choice = pick_text_color(bg, light, dark, 4.5);
    assert!(!choice.meets_minimum);
    let best = contrast_ratio(bg, light).max(contrast_ratio(bg, dark));
    assert_eq!(choice.ratio, best);
}

#[test]
fn qualifying_candidate_beats_higher_threshold_miss() {
    let bg = Rgb::new(0x3B, 0x82, 0xF6);
    let choice = readable_text_on(bg, 3.0);
    assert!(choice.meets_minimum);
    assert!(choice.ratio >= 3.0);
}
