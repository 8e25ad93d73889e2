use super::*;

fn page(index: usize, total: usize) -> RenderedPage {
    RenderedPage {
        index,
        total,
        width: 960.0,
        height: 540.0,
    }
}

#[test]
fn unknown_names_fall_back_to_minimalist() {
    assert_eq!(ThemeName::parse_lenient("neon"), ThemeName::Minimalist);
    assert_eq!(ThemeName::parse_lenient(" Chalkboard "), ThemeName::Chalkboard);
    assert_eq!(Theme::named("").name, ThemeName::Minimalist);
}

#[test]
fn serde_round_trips_through_names() {
    let t: ThemeName = serde_json::from_str("\"corporate\"").unwrap();
    assert_eq!(t, ThemeName::Corporate);
    let t: ThemeName = serde_json::from_str("\"vaporwave\"").unwrap();
    assert_eq!(t, ThemeName::Minimalist);
    assert_eq!(serde_json::to_string(&ThemeName::Chalkboard).unwrap(), "\"chalkboard\"");
}

#[test]
fn every_theme_is_complete() {
    for name in [ThemeName::Minimalist, ThemeName::Chalkboard, ThemeName::Corporate] {
        let t = resolve_theme(name);
        assert_eq!(t.name, name);
        assert_eq!(t.scale, 1.0);
        assert!(!t.fonts.title.is_empty() && !t.fonts.body.is_empty());
        assert!(t.sizes.title >= SizeTable::MINIMUMS.title);
        assert!(t.sizes.body >= SizeTable::MINIMUMS.body);
        assert!(t.margins.left > 0.0 && t.layout.marker_size > 0.0);
    }
}

#[test]
fn chalkboard_is_dark_on_green() {
    let t = resolve_theme(ThemeName::Chalkboard);
    assert_eq!(t.palette.background, Rgb::new(0x1F, 0x3D, 0x2B));
    assert_eq!(t.decor.bullet_marker, MarkerShape::Dash);
}

#[test]
fn folio_styles() {
    let m = resolve_theme(ThemeName::Minimalist);
    assert_eq!(m.folio_text("Cells", &page(0, 4)), "Page 1");
    let c = resolve_theme(ThemeName::Corporate);
    assert_eq!(c.folio_text("Cells", &page(2, 4)), "Cells · 3/4");
}
