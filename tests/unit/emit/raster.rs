use super::*;
use crate::{
    compose::{
        composer::compose,
        options::{DocumentLayout, RenderOptions},
    },
    plan::model::DocumentPlan,
    text::metrics::StandardMetrics,
    theme::tokens::ThemeName,
};

fn doc(theme: ThemeName, layout: DocumentLayout) -> ComposedDocument {
    let plan = DocumentPlan::from_json(include_str!("../../data/lecture_plan.json")).unwrap();
    let opts = RenderOptions {
        theme: Some(theme),
        ..RenderOptions::default()
    };
    compose(&StandardMetrics, &plan, &opts, layout).unwrap()
}

fn decode(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

#[test]
fn preview_keeps_the_page_aspect() {
    let d = doc(ThemeName::Minimalist, DocumentLayout::Deck);
    let png = RasterEmitter::new(480, 0).unwrap().emit(&d).unwrap();
    let img = decode(&png);
    assert_eq!(img.dimensions(), (480, 270));
}

#[test]
fn background_follows_the_theme() {
    let d = doc(ThemeName::Chalkboard, DocumentLayout::Handout);
    // Page 1 (knowledge map) has a solid background.
    let img = decode(&RasterEmitter::new(240, 1).unwrap().emit(&d).unwrap());
    assert_eq!(img.get_pixel(1, 134).0, [0x1F, 0x3D, 0x2B, 0xFF]);
    assert!(img.pixels().all(|p| p.0[3] == 0xFF));

    // The cover gradient starts at the top color.
    let cover = decode(&RasterEmitter::new(240, 0).unwrap().emit(&d).unwrap());
    assert_eq!(cover.get_pixel(0, 0).0, [0x1F, 0x3D, 0x2B, 0xFF]);
}

#[test]
fn shapes_are_drawn_without_a_font() {
    let d = doc(ThemeName::Corporate, DocumentLayout::Deck);
    let img = decode(&RasterEmitter::new(960, 1).unwrap().emit(&d).unwrap());
    // Corporate header bar across the top of every content slide.
    assert_eq!(img.get_pixel(480, 3).0, [0x3B, 0x82, 0xF6, 0xFF]);
}

#[test]
fn bad_requests_are_rejected() {
    let d = doc(ThemeName::Minimalist, DocumentLayout::Deck);
    assert!(RasterEmitter::new(0, 0).is_err());
    assert!(RasterEmitter::new(MAX_WIDTH_PX + 1, 0).is_err());
    let err = RasterEmitter::new(100, 99).unwrap().emit(&d).unwrap_err();
    assert!(matches!(err, LecternError::Validation(_)));
    assert!(
        RasterEmitter::new(100, 0)
            .unwrap()
            .with_font_bytes(b"not a font".to_vec())
            .is_err()
    );
    assert!(
        RasterEmitter::new(100, 0)
            .unwrap()
            .with_font_file(Path::new("/nonexistent/font.ttf"))
            .is_err()
    );
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    assert_eq!(unpremultiply(&[64, 32, 0, 128]), vec![128, 64, 0, 128]);
    assert_eq!(unpremultiply(&[0, 0, 0, 0, 9, 9, 9, 255]), vec![0, 0, 0, 0, 9, 9, 9, 255]);
}
