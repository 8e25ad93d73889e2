use crate::{
    compose::{
        composer::{ComposedDocument, compose},
        options::{DocumentLayout, RenderOptions},
        page::{DrawOp, PageKind},
    },
    page::geometry::{DevicePreset, PageGeometry},
    plan::model::{DocumentPlan, Slide},
    text::metrics::StandardMetrics,
    theme::tokens::{ThemeName, resolve_theme},
};

fn fixture() -> DocumentPlan {
    DocumentPlan::from_json(include_str!("../../data/lecture_plan.json")).unwrap()
}

fn deck(plan: &DocumentPlan, opts: &RenderOptions) -> ComposedDocument {
    compose(&StandardMetrics, plan, opts, DocumentLayout::Deck).unwrap()
}

#[test]
fn splash_then_one_slide_run_per_plan_slide() {
    let plan = fixture();
    let doc = deck(&plan, &RenderOptions::default());
    assert_eq!(doc.pages[0].kind, PageKind::Cover);
    assert_eq!(doc.pages[0].title, "Photosynthesis");
    assert!(doc.pages[1..].iter().all(|p| p.kind == PageKind::Content));

    let firsts: Vec<&str> = doc.pages[1..]
        .iter()
        .map(|p| p.title.as_str())
        .filter(|t| !t.ends_with("(cont.)"))
        .collect();
    let expected: Vec<&str> = plan.slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(firsts, expected);
}

#[test]
fn content_slides_have_a_topic_folio_and_the_splash_does_not() {
    let plan = fixture();
    let doc = deck(&plan, &RenderOptions::default());
    let total = doc.pages.len();
    assert!(!doc.pages[0].text_lines().any(|l| l.contains('•')));
    for (i, page) in doc.pages.iter().enumerate().skip(1) {
        let folio = format!("Photosynthesis • {}/{total}", i + 1);
        assert!(page.text_lines().any(|l| l == folio), "page {i} lacks {folio}");
    }
}

#[test]
fn long_slides_continue_on_extra_slides() {
    let points: Vec<String> = (0..8)
        .map(|i| {
            format!(
                "token{i} {}",
                "energy flows from the sun through producers into consumers ".repeat(4)
            )
        })
        .collect();
    let plan = DocumentPlan {
        topic: "Ecology".into(),
        language: "en".into(),
        theme: ThemeName::Minimalist,
        duration_minutes: 0,
        device_preset: Some(DevicePreset::Tablet),
        orientation: None,
        slides: vec![Slide::new(1, "Energy flow", points)],
    };
    let doc = deck(&plan, &RenderOptions::default());
    assert!(doc.pages.len() > 2);
    assert_eq!(doc.pages[1].title, "Energy flow");
    assert!(doc.pages[2..].iter().all(|p| p.title == "Energy flow (cont.)"));

    for i in 0..8 {
        let token = format!("token{i}");
        assert!(
            doc.pages
                .iter()
                .any(|p| p.text_lines().any(|l| l.contains(&token))),
            "{token} was never drawn"
        );
    }
    assert!(doc.degradations.is_empty(), "{:?}", doc.degradations);
}

#[test]
fn text_stays_inside_the_content_frame() {
    let plan = fixture();
    for theme in [ThemeName::Minimalist, ThemeName::Chalkboard, ThemeName::Corporate] {
        for preset in [DevicePreset::Desktop, DevicePreset::Tablet, DevicePreset::Mobile] {
            let opts = RenderOptions {
                theme: Some(theme),
                device_preset: Some(preset),
                ..RenderOptions::default()
            };
            let doc = deck(&plan, &opts);
            let geo =
                PageGeometry::resolve(Some(preset), None, None, &resolve_theme(theme)).unwrap();
            for page in &doc.pages {
                for op in &page.ops {
                    if let DrawOp::Text(block) = op {
                        for line in &block.lines {
                            assert!(line.x >= geo.frame.x - 1e-6, "{theme:?}/{preset:?}");
                            assert!(
                                line.x + line.width <= geo.frame.right() + 1e-6,
                                "{theme:?}/{preset:?}: {:?}",
                                line.text
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn composition_is_deterministic() {
    let plan = fixture();
    let a = deck(&plan, &RenderOptions::default());
    let b = deck(&plan, &RenderOptions::default());
    assert_eq!(a.pages, b.pages);
}

#[test]
fn corporate_slides_carry_a_header_bar() {
    let plan = fixture();
    let opts = RenderOptions {
        theme: Some(ThemeName::Corporate),
        ..RenderOptions::default()
    };
    let doc = deck(&plan, &opts);
    let accent = doc.theme.palette.accent;
    let has_bar = doc.pages[1].ops.iter().any(|op| {
        matches!(op, DrawOp::Rect { rect, fill: Some(c), .. } if rect.y0 == 0.0 && *c == accent)
    });
    assert!(has_bar);
}
