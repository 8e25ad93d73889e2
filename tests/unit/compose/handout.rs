use super::*;
use crate::{
    compose::{
        composer::{ComposedDocument, compose},
        options::{DocumentLayout, RenderOptions},
    },
    text::metrics::StandardMetrics,
    theme::tokens::ThemeName,
};

fn fixture() -> DocumentPlan {
    DocumentPlan::from_json(include_str!("../../data/lecture_plan.json")).unwrap()
}

fn handout(plan: &DocumentPlan, opts: &RenderOptions) -> ComposedDocument {
    compose(&StandardMetrics, plan, opts, DocumentLayout::Handout).unwrap()
}

fn kinds(doc: &ComposedDocument) -> Vec<PageKind> {
    doc.pages.iter().map(|p| p.kind).collect()
}

#[test]
fn default_handout_has_cover_cheatsheet_and_notes() {
    let doc = handout(&fixture(), &RenderOptions::default());
    let k = kinds(&doc);
    assert_eq!(
        &k[..5],
        &[
            PageKind::Cover,
            PageKind::KnowledgeMap,
            PageKind::Diagram(DiagramKind::Process),
            PageKind::Diagram(DiagramKind::Tree),
            PageKind::Diagram(DiagramKind::Compare),
        ]
    );
    assert!(k[5..].iter().all(|k| *k == PageKind::Notes));
    assert!(k[5..].len() >= 4);
    assert!(
        !doc.degradations
            .iter()
            .any(|d| matches!(d, Degradation::DiagramFallback { .. })),
        "{:?}",
        doc.degradations
    );
    assert!(doc.pages[0].text_lines().any(|l| l == "Lecture notes · 4 slides"));
}

#[test]
fn page_filters() {
    let plan = fixture();
    let cheat = handout(
        &plan,
        &RenderOptions {
            cheatsheet_only: true,
            ..RenderOptions::default()
        },
    );
    assert!(!kinds(&cheat).contains(&PageKind::Notes));
    assert_eq!(cheat.pages.len(), 5);

    let notes = handout(
        &plan,
        &RenderOptions {
            notes_only: true,
            ..RenderOptions::default()
        },
    );
    let k = kinds(&notes);
    assert_eq!(k[0], PageKind::Cover);
    assert!(k[1..].iter().all(|k| *k == PageKind::Notes));
}

#[test]
fn folios_follow_the_theme() {
    let plan = fixture();
    let doc = handout(&plan, &RenderOptions::default());
    assert!(!doc.pages[0].text_lines().any(|l| l.starts_with("Page ")));
    assert!(doc.pages[1].text_lines().any(|l| l == "Page 2"));

    let corp = handout(
        &plan,
        &RenderOptions {
            theme: Some(ThemeName::Corporate),
            ..RenderOptions::default()
        },
    );
    let total = corp.pages.len();
    let want = format!("Photosynthesis · 2/{total}");
    assert!(corp.pages[1].text_lines().any(|l| l == want));
}

#[test]
fn notes_header_text_is_readable_on_the_band() {
    let plan = fixture();
    let doc = handout(
        &plan,
        &RenderOptions {
            theme: Some(ThemeName::Chalkboard),
            notes_only: true,
            ..RenderOptions::default()
        },
    );
    let caption = doc.pages[1]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text(b) if b.lines.iter().any(|l| l.text == "Slide 1 of 4") => Some(b.color),
            _ => None,
        })
        .unwrap();
    // Chalkboard's amber accent needs dark text.
    assert_eq!(caption, DARK_TEXT);
}

#[test]
fn expanded_sections_replace_bullets() {
    let plan = fixture();
    let doc = handout(
        &plan,
        &RenderOptions {
            notes_only: true,
            include_expanded_content: true,
            ..RenderOptions::default()
        },
    );
    let first_notes: Vec<&str> = doc.pages[1].text_lines().collect();
    assert!(first_notes.contains(&"Overview"));
    assert!(first_notes.contains(&"Core Ideas"));
    assert!(doc.pages.iter().any(|p| p.text_lines().any(|l| l == "Examples & Pitfalls")));
}

#[test]
fn note_items_fall_back_to_points() {
    let slide = Slide::new(2, "Light", vec!["ATP and NADPH are produced".to_owned()]);
    let items = note_items(&slide, true, true, MarkerShape::Dot);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, expand_point("ATP and NADPH are produced"));

    let plain = note_items(&slide, false, false, MarkerShape::Dash);
    assert_eq!(plain[0].text, "ATP and NADPH are produced");
    assert_eq!(
        plain[0].kind,
        crate::text::flow::FlowItemKind::Bullet(MarkerShape::Dash)
    );
}

#[test]
fn unknown_diagram_kind_falls_back_to_bullets() {
    let mut plan = fixture();
    plan.slides[0].diagram = Some(DiagramKind::Unknown);
    let doc = handout(
        &plan,
        &RenderOptions {
            cheatsheet_only: true,
            ..RenderOptions::default()
        },
    );
    let page = doc
        .pages
        .iter()
        .position(|p| p.kind == PageKind::Diagram(DiagramKind::Unknown))
        .unwrap();
    assert!(doc.degradations.contains(&Degradation::DiagramFallback {
        page,
        diagram: DiagramKind::Unknown
    }));
    assert!(
        doc.pages[page]
            .text_lines()
            .any(|l| l.starts_with("Plants convert"))
    );
}
