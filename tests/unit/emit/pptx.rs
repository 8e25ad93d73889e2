use std::io::Read;

use quick_xml::{Reader, events::Event};

use super::*;
use crate::{
    compose::{
        composer::compose,
        options::{DocumentLayout, RenderOptions},
    },
    page::geometry::DevicePreset,
    plan::model::DocumentPlan,
    text::metrics::StandardMetrics,
    theme::tokens::ThemeName,
};

fn deck(opts: &RenderOptions) -> ComposedDocument {
    let plan = DocumentPlan::from_json(include_str!("../../data/lecture_plan.json")).unwrap();
    compose(&StandardMetrics, &plan, opts, DocumentLayout::Deck).unwrap()
}

fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// Text runs of a part; panics if the XML is malformed.
fn runs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"a:t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"a:t" => in_text = false,
            Event::Text(t) if in_text => out.push(t.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

#[test]
fn package_has_one_slide_per_page() {
    let doc = deck(&RenderOptions::default());
    let bytes = PptxEmitter.emit(&doc).unwrap();
    assert!(bytes.starts_with(b"PK"));

    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let slides = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .count();
    assert_eq!(slides, doc.pages.len());
    for required in [
        "[Content_Types].xml",
        "_rels/.rels",
        "ppt/presentation.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/media/bg1.png",
    ] {
        assert!(archive.file_names().any(|n| n == required), "missing {required}");
    }

    let types = part(&bytes, "[Content_Types].xml");
    assert_eq!(types.matches("slide+xml").count(), doc.pages.len());
    runs(&part(&bytes, "ppt/theme/theme1.xml"));
    runs(&part(&bytes, "ppt/presentation.xml"));
}

#[test]
fn slide_size_matches_the_page() {
    let tablet = RenderOptions {
        device_preset: Some(DevicePreset::Tablet),
        ..RenderOptions::default()
    };
    let bytes = PptxEmitter.emit(&deck(&tablet)).unwrap();
    let pres = part(&bytes, "ppt/presentation.xml");
    assert!(pres.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#), "{pres}");
}

#[test]
fn slides_carry_their_text() {
    let doc = deck(&RenderOptions::default());
    let bytes = PptxEmitter.emit(&doc).unwrap();
    for (i, page) in doc.pages.iter().enumerate() {
        let xml = part(&bytes, &format!("ppt/slides/slide{}.xml", i + 1));
        let text = runs(&xml);
        let expected: Vec<&str> = page.text_lines().collect();
        assert_eq!(text, expected, "slide {}", i + 1);
        // Every slide has a gradient picture.
        assert!(xml.contains(r#"r:embed="rId2""#));
    }
    let rels = part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
    assert!(rels.contains("../media/bg1.png"));
}

#[test]
fn markup_in_text_is_escaped() {
    let mut doc = deck(&RenderOptions::default());
    doc.topic = "R&D <notes>".into();
    if let Some(DrawOp::Text(block)) = doc.pages[1]
        .ops
        .iter_mut()
        .find(|op| matches!(op, DrawOp::Text(_)))
    {
        block.lines[0].text = "a < b & \"c\"".into();
    }
    let bytes = PptxEmitter.emit(&doc).unwrap();
    let text = runs(&part(&bytes, "ppt/slides/slide2.xml"));
    assert_eq!(text[0], "a < b & \"c\"");
    assert!(part(&bytes, "docProps/core.xml").contains("R&amp;D &lt;notes&gt;"));
}

#[test]
fn theme_colors_and_header_bar_reach_the_package() {
    let corp = RenderOptions {
        theme: Some(ThemeName::Corporate),
        ..RenderOptions::default()
    };
    let bytes = PptxEmitter.emit(&deck(&corp)).unwrap();
    let theme = part(&bytes, "ppt/theme/theme1.xml");
    assert!(theme.contains(r#"<a:accent1><a:srgbClr val="3B82F6"/></a:accent1>"#));
    assert!(theme.contains(r#"typeface="Source Sans Pro""#));
    let slide = part(&bytes, "ppt/slides/slide2.xml");
    assert!(slide.contains(r#"<a:srgbClr val="3B82F6"/>"#));
}

#[test]
fn output_is_deterministic() {
    let doc = deck(&RenderOptions::default());
    assert_eq!(PptxEmitter.emit(&doc).unwrap(), PptxEmitter.emit(&doc).unwrap());
}

#[test]
fn geometry_helpers() {
    assert_eq!(emu(960.0), 12_192_000);
    assert_eq!(
        preset_geom(Rect::new(0.0, 0.0, 100.0, 40.0), 8.0),
        r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val 20000"/></a:avLst></a:prstGeom>"#
    );
    assert!(preset_geom(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0).contains(r#"prst="rect""#));
}
