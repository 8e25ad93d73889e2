use rayon::prelude::*;

use crate::{
    compose::{
        composer::compose,
        options::{DocumentLayout, RasterOptions, RenderOptions},
        page::Degradation,
    },
    emit::{DocumentEmitter, pdf::PdfEmitter, pptx::PptxEmitter, raster::RasterEmitter},
    foundation::error::{LecternError, LecternResult},
    plan::model::DocumentPlan,
    text::metrics::StandardMetrics,
};

/// Output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Slide deck.
    Pptx,
    /// Paginated handout.
    Pdf,
    /// Raster preview of one page.
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }

    /// Format for a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Composition this format is drawn from.
    pub fn layout(self, raster: &RasterOptions) -> DocumentLayout {
        match self {
            Self::Pptx => DocumentLayout::Deck,
            Self::Pdf => DocumentLayout::Handout,
            Self::Png => raster.source,
        }
    }
}

/// A finished output container.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// Container format.
    pub format: OutputFormat,
    /// Container bytes.
    pub bytes: Vec<u8>,
    /// Pages in the composed document (a PNG preview shows one of them).
    pub page_count: usize,
    /// Cosmetic problems handled along the way.
    pub degradations: Vec<Degradation>,
}

/// Compose `plan` and write it as `format`.
///
/// Pipeline:
/// 1. validate the plan and options
/// 2. resolve theme and page geometry, scale the theme to the content frame
/// 3. compose pages (deck for PPTX, handout for PDF)
/// 4. emit the container
pub fn render_document(
    plan: &DocumentPlan,
    options: &RenderOptions,
    format: OutputFormat,
) -> LecternResult<RenderedDocument> {
    render_document_with(plan, options, format, &RasterOptions::default())
}

/// [`render_document`] with explicit raster preview settings.
#[tracing::instrument(skip_all, fields(format = format.extension(), slides = plan.slides.len()))]
pub fn render_document_with(
    plan: &DocumentPlan,
    options: &RenderOptions,
    format: OutputFormat,
    raster: &RasterOptions,
) -> LecternResult<RenderedDocument> {
    let doc = compose(&StandardMetrics, plan, options, format.layout(raster))?;
    let mut emitter = make_emitter(format, raster)?;
    let bytes = emitter.emit(&doc)?;
    tracing::debug!(
        emitter = emitter.name(),
        pages = doc.pages.len(),
        bytes = bytes.len(),
        degradations = doc.degradations.len(),
        "rendered document"
    );
    Ok(RenderedDocument {
        format,
        bytes,
        page_count: doc.pages.len(),
        degradations: doc.degradations,
    })
}

fn make_emitter(
    format: OutputFormat,
    raster: &RasterOptions,
) -> LecternResult<Box<dyn DocumentEmitter>> {
    Ok(match format {
        OutputFormat::Pptx => Box::new(PptxEmitter),
        OutputFormat::Pdf => Box::new(PdfEmitter),
        OutputFormat::Png => {
            let mut e = RasterEmitter::new(raster.width_px, raster.page)?;
            if let Some(path) = &raster.font_path {
                e = e.with_font_file(path)?;
            }
            Box::new(e)
        }
    })
}

/// One document in a batch.
#[derive(Clone, Debug)]
pub struct RenderJob {
    /// Lecture plan.
    pub plan: DocumentPlan,
    /// Render options.
    pub options: RenderOptions,
    /// Output container.
    pub format: OutputFormat,
    /// Preview settings (PNG only).
    pub raster: RasterOptions,
}

impl RenderJob {
    /// Job with default options.
    pub fn new(plan: DocumentPlan, format: OutputFormat) -> Self {
        Self {
            plan,
            options: RenderOptions::default(),
            format,
            raster: RasterOptions::default(),
        }
    }
}

/// Render independent documents in parallel.
///
/// Results come back in input order; one failing job does not affect the others.
/// `threads = None` uses rayon's default pool size.
#[tracing::instrument(skip_all, fields(jobs = jobs.len()))]
pub fn render_batch(
    jobs: &[RenderJob],
    threads: Option<usize>,
) -> LecternResult<Vec<LecternResult<RenderedDocument>>> {
    let pool = build_thread_pool(threads)?;
    Ok(pool.install(|| {
        jobs.par_iter()
            .map(|job| render_document_with(&job.plan, &job.options, job.format, &job.raster))
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> LecternResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LecternError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LecternError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
