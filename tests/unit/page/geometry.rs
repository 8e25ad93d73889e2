use super::*;
use crate::theme::tokens::{ThemeName, resolve_theme};

fn all_themes() -> Vec<Theme> {
    [ThemeName::Minimalist, ThemeName::Chalkboard, ThemeName::Corporate]
        .into_iter()
        .map(resolve_theme)
        .collect()
}

#[test]
fn preset_wins_over_orientation() {
    let t = resolve_theme(ThemeName::Minimalist);
    let p = resolve_page_size(Some(DevicePreset::Mobile), Some(Orientation::Landscape), &t);
    assert_eq!(p, PageSize::new(540.0, 960.0));
}

#[test]
fn defaults_to_wide_landscape() {
    let t = resolve_theme(ThemeName::Minimalist);
    assert_eq!(resolve_page_size(None, None, &t), PageSize::new(960.0, 540.0));
    assert_eq!(
        resolve_page_size(None, Some(Orientation::Portrait), &t),
        PageSize::new(540.0, 720.0)
    );
}

#[test]
fn auto_picks_landscape_when_frame_is_wide_enough() {
    let t = resolve_theme(ThemeName::Minimalist);
    let p = resolve_page_size(None, Some(Orientation::Auto), &t);
    assert!(p.width > p.height);
    assert!(ContentFrame::for_page(p, &t).width > AUTO_LANDSCAPE_THRESHOLD);
}

#[test]
fn auto_falls_back_to_portrait_with_huge_margins() {
    let mut t = resolve_theme(ThemeName::Minimalist);
    t.margins = Edges::uniform(200.0);
    let p = resolve_page_size(None, Some(Orientation::Auto), &t);
    assert!(p.height > p.width);
}

#[test]
fn content_frame_is_inside_page_for_every_combination() {
    let presets = [
        None,
        Some(DevicePreset::Desktop),
        Some(DevicePreset::Tablet),
        Some(DevicePreset::Mobile),
    ];
    let orientations = [
        None,
        Some(Orientation::Auto),
        Some(Orientation::Portrait),
        Some(Orientation::Landscape),
    ];
    for theme in all_themes() {
        for preset in presets {
            for orientation in orientations {
                let g = PageGeometry::resolve(preset, orientation, None, &theme).unwrap();
                let f = g.frame;
                assert!(f.width > 0.0 && f.height > 0.0);
                assert!(f.x >= theme.margins.left && f.y >= theme.margins.top);
                assert!(f.right() <= g.page.width - theme.margins.right + 1e-9);
                assert!(f.bottom() <= g.page.height - theme.margins.bottom + 1e-9);
                assert!(f.bottom() <= g.page.height - theme.layout.safe.bottom + 1e-9);
            }
        }
    }
}

#[test]
fn degenerate_pages_are_fatal() {
    let t = resolve_theme(ThemeName::Minimalist);
    assert!(PageGeometry::for_page(PageSize::new(0.0, 540.0), &t).is_err());
    assert!(PageGeometry::for_page(PageSize::new(-10.0, 540.0), &t).is_err());
    assert!(PageGeometry::for_page(PageSize::new(f64::NAN, 540.0), &t).is_err());
    // Positive page, but margins eat everything.
    let err = PageGeometry::for_page(PageSize::new(100.0, 100.0), &t).unwrap_err();
    assert!(matches!(err, LecternError::Layout(_)));
}

#[test]
fn frame_never_has_negative_extent() {
    let t = resolve_theme(ThemeName::Minimalist);
    let f = ContentFrame::for_page(PageSize::new(50.0, 50.0), &t);
    assert_eq!(f.width, 0.0);
    assert_eq!(f.height, 0.0);
}

#[test]
fn presets_accept_shape_aliases() {
    let p: DevicePreset = serde_json::from_str("\"wide\"").unwrap();
    assert_eq!(p, DevicePreset::Desktop);
    let p: DevicePreset = serde_json::from_str("\"tablet\"").unwrap();
    assert_eq!(p, DevicePreset::Tablet);
}
