//! Slide-deck emitter (PPTX).
//!
//! Writes a minimal PresentationML package: one blank master and layout, a theme carrying the
//! deck palette and fonts, and one slide per composed page. Shapes map to preset geometries,
//! connector paths to custom geometry, and text blocks to unwrapped text boxes with one
//! paragraph per composed line. Gradient backgrounds are embedded as a stretched PNG picture.

use std::{
    collections::HashMap,
    io::{Cursor, Write},
};

use kurbo::{PathEl, Shape};
use quick_xml::escape::escape;
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use crate::{
    compose::{
        composer::ComposedDocument,
        page::{DrawOp, Fill, PagePlan, Stroke, TextBlock},
    },
    emit::{DocumentEmitter, background::gradient_png},
    foundation::{
        core::{BezPath, HAlign, Point, Rect, Rgb},
        error::{LecternError, LecternResult},
    },
    text::metrics::FontRole,
    theme::tokens::Theme,
};

/// English Metric Units per point.
pub const EMU_PER_PT: f64 = 12_700.0;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT: &str = "application/vnd.openxmlformats-officedocument.presentationml";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Writes composed pages as a PowerPoint deck.
#[derive(Debug, Default)]
pub struct PptxEmitter;

impl DocumentEmitter for PptxEmitter {
    fn name(&self) -> &'static str {
        "pptx"
    }

    #[tracing::instrument(skip_all, fields(slides = doc.pages.len()))]
    fn emit(&mut self, doc: &ComposedDocument) -> LecternResult<Vec<u8>> {
        let first = doc
            .pages
            .first()
            .ok_or_else(|| LecternError::emit("document has no pages"))?;
        let mut pkg = Package::new();
        let n = doc.pages.len();

        pkg.add("[Content_Types].xml", &content_types(n))?;
        pkg.add("_rels/.rels", &root_rels())?;
        pkg.add("docProps/core.xml", &core_props(doc))?;
        pkg.add("docProps/app.xml", &app_props(n))?;
        pkg.add(
            "ppt/presentation.xml",
            &presentation(n, emu(first.size.width), emu(first.size.height)),
        )?;
        pkg.add("ppt/_rels/presentation.xml.rels", &presentation_rels(n))?;
        pkg.add("ppt/presProps.xml", &pres_props())?;
        pkg.add("ppt/slideMasters/slideMaster1.xml", &slide_master())?;
        pkg.add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &rels(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "theme", "../theme/theme1.xml"),
            ]),
        )?;
        pkg.add("ppt/slideLayouts/slideLayout1.xml", &slide_layout())?;
        pkg.add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &rels(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]),
        )?;
        pkg.add("ppt/theme/theme1.xml", &theme_part(&doc.theme))?;

        let mut media: HashMap<(Rgb, Rgb), String> = HashMap::new();
        for (i, page) in doc.pages.iter().enumerate() {
            let slide_no = i + 1;
            let mut slide_rels = vec![(
                "rId1".to_owned(),
                "slideLayout",
                "../slideLayouts/slideLayout1.xml".to_owned(),
            )];
            let gradient = gradient_of(page);
            if let Some((top, bottom)) = gradient {
                let file = match media.get(&(top, bottom)) {
                    Some(f) => f.clone(),
                    None => {
                        let f = format!("bg{}.png", media.len() + 1);
                        pkg.add_bytes(&format!("ppt/media/{f}"), &gradient_png(top, bottom)?)?;
                        media.insert((top, bottom), f.clone());
                        f
                    }
                };
                slide_rels.push(("rId2".to_owned(), "image", format!("../media/{file}")));
            }
            let xml = SlideWriter::new(&doc.theme, &doc.language).slide(page, gradient.is_some());
            pkg.add(&format!("ppt/slides/slide{slide_no}.xml"), &xml)?;
            let refs: Vec<(&str, &str, &str)> = slide_rels
                .iter()
                .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
                .collect();
            pkg.add(&format!("ppt/slides/_rels/slide{slide_no}.xml.rels"), &rels(&refs))?;
        }

        let bytes = pkg.finish()?;
        tracing::debug!(bytes = bytes.len(), media = media.len(), "pptx written");
        Ok(bytes)
    }
}

/// Points to EMU.
pub fn emu(pt: f64) -> i64 {
    (pt * EMU_PER_PT).round() as i64
}

struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    opts: SimpleFileOptions,
}

impl Package {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            opts: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default()),
        }
    }

    fn add(&mut self, name: &str, xml: &str) -> LecternResult<()> {
        self.add_bytes(name, xml.as_bytes())
    }

    fn add_bytes(&mut self, name: &str, bytes: &[u8]) -> LecternResult<()> {
        self.zip
            .start_file(name, self.opts)
            .map_err(|e| LecternError::emit(format!("{name}: {e}")))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| LecternError::emit(format!("{name}: {e}")))
    }

    fn finish(self) -> LecternResult<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| LecternError::emit(format!("finishing package: {e}")))?;
        Ok(cursor.into_inner())
    }
}

fn gradient_of(page: &PagePlan) -> Option<(Rgb, Rgb)> {
    page.ops.iter().find_map(|op| match op {
        DrawOp::Background(Fill::VerticalGradient { top, bottom }) => Some((*top, *bottom)),
        _ => None,
    })
}

struct SlideWriter<'a> {
    theme: &'a Theme,
    lang: &'a str,
    out: String,
    next_id: u32,
}

impl<'a> SlideWriter<'a> {
    fn new(theme: &'a Theme, lang: &'a str) -> Self {
        Self {
            theme,
            lang,
            out: String::new(),
            next_id: 2,
        }
    }

    fn id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn slide(mut self, page: &PagePlan, has_picture: bool) -> String {
        let solid = page.ops.iter().find_map(|op| match op {
            DrawOp::Background(Fill::Solid(c)) => Some(*c),
            _ => None,
        });
        let bg = solid.map_or_else(String::new, |c| {
            format!(
                r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
                c.hex()
            )
        });

        for op in &page.ops {
            match op {
                DrawOp::Background(Fill::VerticalGradient { .. }) if has_picture => {
                    self.picture(page.size.width, page.size.height)
                }
                DrawOp::Background(_) => {}
                DrawOp::Rect {
                    rect,
                    radius,
                    fill,
                    stroke,
                } => self.preset(*rect, preset_geom(*rect, *radius), *fill, *stroke),
                DrawOp::Ellipse { rect, fill, stroke } => self.preset(
                    *rect,
                    r#"<a:prstGeom prst="ellipse"><a:avLst/></a:prstGeom>"#.to_owned(),
                    *fill,
                    *stroke,
                ),
                DrawOp::Path { path, fill, stroke } => self.path(path, *fill, *stroke),
                DrawOp::Text(block) => self.text(block),
            }
        }

        format!(
            r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld name="{name}">{bg}<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
            name = escape(page.title.as_str()),
            shapes = self.out,
        )
    }

    fn picture(&mut self, w: f64, h: f64) {
        let id = self.id();
        self.out.push_str(&format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Background"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
            xfrm = xfrm(Rect::new(0.0, 0.0, w, h)),
        ));
    }

    fn preset(&mut self, rect: Rect, geom: String, fill: Option<Rgb>, stroke: Option<Stroke>) {
        let id = self.id();
        self.out.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}{geom}{fill}{line}</p:spPr></p:sp>"#,
            xfrm = xfrm(rect),
            fill = fill_xml(fill),
            line = line_xml(stroke),
        ));
    }

    fn path(&mut self, path: &BezPath, fill: Option<Rgb>, stroke: Option<Stroke>) {
        let bounds = path.bounding_box();
        // Zero-extent boxes (straight vertical or horizontal lines) still need a drawable frame.
        let frame = Rect::new(
            bounds.x0,
            bounds.y0,
            bounds.x1.max(bounds.x0 + 1.0),
            bounds.y1.max(bounds.y0 + 1.0),
        );
        let pt = |p: Point| {
            format!(
                r#"<a:pt x="{}" y="{}"/>"#,
                emu(p.x - frame.x0),
                emu(p.y - frame.y0)
            )
        };
        let mut d = String::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => d += &format!("<a:moveTo>{}</a:moveTo>", pt(p)),
                PathEl::LineTo(p) => d += &format!("<a:lnTo>{}</a:lnTo>", pt(p)),
                PathEl::QuadTo(a, p) => {
                    d += &format!("<a:quadBezTo>{}{}</a:quadBezTo>", pt(a), pt(p))
                }
                PathEl::CurveTo(a, b, p) => {
                    d += &format!("<a:cubicBezTo>{}{}{}</a:cubicBezTo>", pt(a), pt(b), pt(p))
                }
                PathEl::ClosePath => d += "<a:close/>",
            }
        }
        let (cx, cy) = (emu(frame.width()), emu(frame.height()));
        let no_fill = if fill.is_none() { r#" fill="none""# } else { "" };
        let geom = format!(
            r#"<a:custGeom><a:avLst/><a:gdLst/><a:ahLst/><a:cxnLst/><a:rect l="0" t="0" r="r" b="b"/><a:pathLst><a:path w="{cx}" h="{cy}"{no_fill}>{d}</a:path></a:pathLst></a:custGeom>"#
        );
        self.preset(frame, geom, fill, stroke);
    }

    fn text(&mut self, block: &TextBlock) {
        let id = self.id();
        let typeface = match block.role {
            FontRole::Title => &self.theme.fonts.title,
            FontRole::Body => &self.theme.fonts.body,
            FontRole::Mono => &self.theme.fonts.mono,
        };
        let bold = if block.role == FontRole::Title { r#" b="1""# } else { "" };
        let algn = match block.align {
            HAlign::Left => "l",
            HAlign::Center => "ctr",
            HAlign::Right => "r",
        };
        let sz = (block.size * 100.0).round() as i64;
        let spacing = (block.line_height * 100.0).round() as i64;

        let mut paras = String::new();
        for line in &block.lines {
            paras.push_str(&format!(
                r#"<a:p><a:pPr algn="{algn}"><a:lnSpc><a:spcPts val="{spacing}"/></a:lnSpc><a:spcBef><a:spcPts val="0"/></a:spcBef></a:pPr><a:r><a:rPr lang="{lang}" sz="{sz}"{bold} dirty="0"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill><a:latin typeface="{face}"/></a:rPr><a:t>{text}</a:t></a:r></a:p>"#,
                lang = escape(self.lang),
                color = block.color.hex(),
                face = escape(typeface.as_str()),
                text = escape(line.text.as_str()),
            ));
        }
        // Composed lines sit at individual x offsets (bullet indents); the box starts at the
        // leftmost one so left-aligned runs keep their position.
        let left = block
            .lines
            .iter()
            .map(|l| l.x)
            .fold(block.bounds.x0, f64::min);
        let bounds = Rect::new(left, block.bounds.y0, block.bounds.x1, block.bounds.y1);
        self.out.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Text {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="none" lIns="0" tIns="0" rIns="0" bIns="0" anchor="t"><a:noAutofit/></a:bodyPr><a:lstStyle/>{paras}</p:txBody></p:sp>"#,
            xfrm = xfrm(bounds),
        ));
    }
}

fn xfrm(r: Rect) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        emu(r.x0),
        emu(r.y0),
        emu(r.width().max(0.0)),
        emu(r.height().max(0.0))
    )
}

fn preset_geom(rect: Rect, radius: f64) -> String {
    let short = rect.width().min(rect.height());
    if radius <= 0.0 || short <= 0.0 {
        return r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#.to_owned();
    }
    // roundRect's adjust is the corner radius as a share of the short side, in 1/100000.
    let adj = ((radius / short) * 100_000.0).round().clamp(0.0, 50_000.0) as i64;
    format!(
        r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val {adj}"/></a:avLst></a:prstGeom>"#
    )
}

fn fill_xml(fill: Option<Rgb>) -> String {
    match fill {
        Some(c) => format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, c.hex()),
        None => "<a:noFill/>".to_owned(),
    }
}

fn line_xml(stroke: Option<Stroke>) -> String {
    match stroke {
        Some(s) => format!(
            r#"<a:ln w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln>"#,
            emu(s.width),
            s.color.hex()
        ),
        None => "<a:ln><a:noFill/></a:ln>".to_owned(),
    }
}

fn rels(items: &[(&str, &str, &str)]) -> String {
    let mut out = format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
    );
    for (id, kind, target) in items {
        out.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{REL}/{kind}" Target="{target}"/>"#
        ));
    }
    out.push_str("</Relationships>");
    out
}

fn content_types(slides: usize) -> String {
    let mut out = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/ppt/presentation.xml" ContentType="{CT}.presentation.main+xml"/><Override PartName="/ppt/presProps.xml" ContentType="{CT}.presProps+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{CT}.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{CT}.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
    );
    for i in 1..=slides {
        out.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{i}.xml" ContentType="{CT}.slide+xml"/>"#
        ));
    }
    out.push_str("</Types>");
    out
}

fn root_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

fn core_props(doc: &ComposedDocument) -> String {
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>lectern</dc:creator><dc:language>{}</dc:language></cp:coreProperties>"#,
        escape(doc.topic.as_str()),
        escape(doc.language.as_str())
    )
}

fn app_props(slides: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>lectern</Application><Slides>{slides}</Slides></Properties>"#
    )
}

fn presentation(slides: usize, cx: i64, cy: i64) -> String {
    let mut ids = String::new();
    for i in 0..slides {
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2));
    }
    format!(
        r#"{XML_DECL}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
    )
}

fn presentation_rels(slides: usize) -> String {
    let mut items: Vec<(String, &str, String)> = vec![(
        "rId1".to_owned(),
        "slideMaster",
        "slideMasters/slideMaster1.xml".to_owned(),
    )];
    for i in 1..=slides {
        items.push((format!("rId{}", i + 1), "slide", format!("slides/slide{i}.xml")));
    }
    items.push((format!("rId{}", slides + 2), "theme", "theme/theme1.xml".to_owned()));
    items.push((format!("rId{}", slides + 3), "presProps", "presProps.xml".to_owned()));
    let refs: Vec<(&str, &str, &str)> = items
        .iter()
        .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
        .collect();
    rels(&refs)
}

fn pres_props() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

const EMPTY_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree>"#;

fn slide_master() -> String {
    format!(
        r#"{XML_DECL}<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld>{EMPTY_TREE}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn slide_layout() -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="blank" preserve="1"><p:cSld name="Blank">{EMPTY_TREE}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

fn theme_part(theme: &Theme) -> String {
    let p = &theme.palette;
    let clr = |name: &str, c: Rgb| format!(r#"<a:{name}><a:srgbClr val="{}"/></a:{name}>"#, c.hex());
    let scheme = [
        clr("dk1", p.text),
        clr("lt1", p.background),
        clr("dk2", p.muted),
        clr("lt2", p.gradient_bottom),
        clr("accent1", p.accent),
        clr("accent2", p.accent2),
        clr("accent3", p.muted),
        clr("accent4", p.gradient_bottom),
        clr("accent5", p.accent),
        clr("accent6", p.accent2),
        clr("hlink", p.accent),
        clr("folHlink", p.accent2),
    ]
    .concat();
    let font = |tag: &str, face: &str| {
        format!(
            r#"<a:{tag}><a:latin typeface="{}"/><a:ea typeface=""/><a:cs typeface=""/></a:{tag}>"#,
            escape(face)
        )
    };
    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = |w: u32| format!(r#"<a:ln w="{w}">{solid}</a:ln>"#);
    format!(
        r#"{XML_DECL}<a:theme xmlns:a="{NS_A}" name="{name}"><a:themeElements><a:clrScheme name="{name}">{scheme}</a:clrScheme><a:fontScheme name="{name}">{major}{minor}</a:fontScheme><a:fmtScheme name="{name}"><a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst><a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#,
        name = theme.name.as_str(),
        major = font("majorFont", &theme.fonts.title),
        minor = font("minorFont", &theme.fonts.body),
        l1 = line(6350),
        l2 = line(12700),
        l3 = line(19050),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/emit/pptx.rs"]
mod tests;
