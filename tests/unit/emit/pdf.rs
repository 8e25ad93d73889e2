use super::*;
use crate::{
    compose::{
        composer::compose,
        options::{DocumentLayout, RenderOptions},
    },
    plan::model::DocumentPlan,
    text::metrics::StandardMetrics,
};

fn handout() -> ComposedDocument {
    let plan = DocumentPlan::from_json(include_str!("../../data/lecture_plan.json")).unwrap();
    compose(
        &StandardMetrics,
        &plan,
        &RenderOptions::default(),
        DocumentLayout::Handout,
    )
    .unwrap()
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn one_pdf_page_per_composed_page() {
    let doc = handout();
    let bytes = PdfEmitter.emit(&doc).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let pages = count(&bytes, b"/Type /Page") - count(&bytes, b"/Type /Pages");
    assert_eq!(pages, doc.pages.len());
    assert!(count(&bytes, b"/Helvetica-Bold") >= 1);
    assert!(count(&bytes, b"/WinAnsiEncoding") >= 3);
}

#[test]
fn text_and_gradient_are_written() {
    let bytes = PdfEmitter.emit(&handout()).unwrap();
    assert!(count(&bytes, b"(Photosynthesis)") >= 1);
    assert!(count(&bytes, b"(Knowledge Map)") == 1);
    // The cover shares one gradient image.
    assert_eq!(count(&bytes, b"/Subtype /Image"), 1);
    assert!(count(&bytes, b"/Bg0 Do") >= 1);
}

#[test]
fn output_is_deterministic() {
    let doc = handout();
    assert_eq!(PdfEmitter.emit(&doc).unwrap(), PdfEmitter.emit(&doc).unwrap());
}

#[test]
fn empty_documents_are_rejected() {
    let mut doc = handout();
    doc.pages.clear();
    assert!(matches!(
        PdfEmitter.emit(&doc),
        Err(LecternError::Emit(_))
    ));
}

#[test]
fn win_ansi_maps_typographic_punctuation() {
    assert_eq!(win_ansi("a • b"), b"a \x95 b");
    assert_eq!(win_ansi("“x”…"), b"\x93x\x94\x85");
    assert_eq!(win_ansi("café · 2"), b"caf\xe9 \xb7 2");
    assert_eq!(win_ansi("→"), b"?");
}
