use crate::{
    foundation::error::{LecternError, LecternResult},
    page::geometry::{DevicePreset, Orientation},
    theme::tokens::ThemeName,
};

/// Most characters in a topic.
pub const MAX_TOPIC_CHARS: usize = 200;
/// Most characters in a slide title.
pub const MAX_TITLE_CHARS: usize = 120;
/// Most points on a slide.
pub const MAX_POINTS: usize = 8;
/// Most characters in a point, key concept or supporting detail.
pub const MAX_POINT_CHARS: usize = 300;

/// Diagram requested for a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    /// Ordered steps.
    Process,
    /// Hierarchy around one root.
    Tree,
    /// Ordered events.
    Timeline,
    /// Side-by-side alternatives.
    Compare,
    /// Anything else; rendered as plain bullets.
    #[serde(other)]
    Unknown,
}

impl DiagramKind {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Tree => "tree",
            Self::Timeline => "timeline",
            Self::Compare => "compare",
            Self::Unknown => "unknown",
        }
    }

    /// Heading used on a diagram page.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Process => "Process Flow",
            Self::Tree => "Concept Tree",
            Self::Timeline => "Timeline",
            Self::Compare => "Comparison",
            Self::Unknown => "Overview",
        }
    }
}

/// Long-form notes attached to a slide: one string, or a list of paragraphs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ExpandedContent {
    /// Free text; blank lines separate paragraphs.
    Text(String),
    /// Pre-split paragraphs.
    Paragraphs(Vec<String>),
}

impl ExpandedContent {
    /// Non-empty, trimmed paragraphs.
    pub fn paragraphs(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => s
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect(),
            Self::Paragraphs(v) => v
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

/// One slide of a lecture.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Slide {
    /// Position in the lecture, as supplied.
    pub index: u32,
    /// Heading.
    pub title: String,
    /// Bullet points.
    pub points: Vec<String>,
    /// Optional diagram request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<DiagramKind>,
    /// Optional long-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_content: Option<ExpandedContent>,
    /// Terms worth memorising.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_concepts: Vec<String>,
    /// Examples and pitfalls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting_details: Vec<String>,
}

impl Slide {
    /// Slide with a title and points only.
    pub fn new(index: u32, title: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            index,
            title: title.into(),
            points,
            diagram: None,
            expanded_content: None,
            key_concepts: Vec::new(),
            supporting_details: Vec::new(),
        }
    }

    /// Same slide requesting `diagram`.
    pub fn with_diagram(mut self, diagram: DiagramKind) -> Self {
        self.diagram = Some(diagram);
        self
    }

    fn validate(&self, position: usize) -> LecternResult<()> {
        let at = |msg: String| LecternError::validation(format!("slide {position}: {msg}"));

        let title = self.title.trim().chars().count();
        if title == 0 || title > MAX_TITLE_CHARS {
            return Err(at(format!(
                "title must be 1..={MAX_TITLE_CHARS} characters, got {title}"
            )));
        }
        if self.points.is_empty() || self.points.len() > MAX_POINTS {
            return Err(at(format!(
                "expected 1..={MAX_POINTS} points, got {}",
                self.points.len()
            )));
        }
        for (i, p) in self.points.iter().enumerate() {
            let n = p.trim().chars().count();
            if n == 0 || n > MAX_POINT_CHARS {
                return Err(at(format!(
                    "point {i} must be 1..={MAX_POINT_CHARS} characters, got {n}"
                )));
            }
        }
        for (field, items) in [
            ("key_concepts", &self.key_concepts),
            ("supporting_details", &self.supporting_details),
        ] {
            if let Some(i) = items
                .iter()
                .position(|s| s.chars().count() > MAX_POINT_CHARS)
            {
                return Err(at(format!(
                    "{field}[{i}] exceeds {MAX_POINT_CHARS} characters"
                )));
            }
        }
        Ok(())
    }
}

fn default_language() -> String {
    "en".to_owned()
}

/// A finished lecture plan, as produced by the content generator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentPlan {
    /// Lecture topic.
    pub topic: String,
    /// Content language tag.
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested theme; unknown names resolve to the default.
    #[serde(default)]
    pub theme: ThemeName,
    /// Planned duration.
    #[serde(default)]
    pub duration_minutes: u32,
    /// Requested canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_preset: Option<DevicePreset>,
    /// Requested orientation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl DocumentPlan {
    /// Parse and validate a JSON plan.
    pub fn from_json(s: &str) -> LecternResult<Self> {
        let plan: Self = serde_json::from_str(s)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Reject plans that make layout meaningless.
    pub fn validate(&self) -> LecternResult<()> {
        let topic = self.topic.trim().chars().count();
        if topic == 0 || topic > MAX_TOPIC_CHARS {
            return Err(LecternError::validation(format!(
                "topic must be 1..={MAX_TOPIC_CHARS} characters, got {topic}"
            )));
        }
        if self.slides.is_empty() {
            return Err(LecternError::validation("plan has no slides"));
        }
        for (i, slide) in self.slides.iter().enumerate() {
            slide.validate(i)?;
        }
        Ok(())
    }

    /// Distinct requested diagram kinds, each with the first slide that asked for it.
    pub fn diagram_requests(&self) -> Vec<(DiagramKind, &Slide)> {
        let mut out: Vec<(DiagramKind, &Slide)> = Vec::new();
        for slide in &self.slides {
            if let Some(kind) = slide.diagram
                && !out.iter().any(|(k, _)| *k == kind)
            {
                out.push((kind, slide));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/model.rs"]
mod tests;
