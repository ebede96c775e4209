use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::assets::ImageSource;
use crate::assets::decode::load_image;
use crate::compose::ComposeOpts;
use crate::compose::compositor::Compositor;
use crate::compose::request::{DEFAULT_OUTPUT_SCALE, Poem, RenderRequest, credit_line};
use crate::config::job::{ExportFormat, ExportJob};
use crate::export::gate::ExportGate;
use crate::export::pdf::{PdfContent, export_pdf};
use crate::export::png::export_png;
use crate::export::sink::{ExportSink, ExportedArtifact};
use crate::foundation::error::PhotoverseResult;
use crate::template::kind::TemplateKind;
use crate::text::fonts::FontBook;
use crate::text::measure::FontRole;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResultViewOpts {
    pub output_scale: f64,
    pub compose: ComposeOpts,
}

impl Default for ResultViewOpts {
    fn default() -> Self {
        Self {
            output_scale: DEFAULT_OUTPUT_SCALE,
            compose: ComposeOpts::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub artifact: ExportedArtifact,
    /// Font roles with no face. Their text is missing from a PNG export.
    pub missing_faces: Vec<FontRole>,
}

/// A generated poem paired with its photo, ready to be exported.
///
/// Exports take `&self` and are serialized by an [`ExportGate`]: while one runs, others
/// fail fast with [`PhotoverseError::Busy`](crate::PhotoverseError::Busy). The gate is released on every outcome.
pub struct ResultView {
    poem: Poem,
    image: ImageSource,
    author: Option<String>,
    template: TemplateKind,
    opts: ResultViewOpts,
    gate: ExportGate,
    compositor: Mutex<Compositor>,
}

impl ResultView {
    pub fn new(poem: Poem, image: ImageSource, fonts: FontBook, opts: ResultViewOpts) -> Self {
        Self {
            compositor: Mutex::new(Compositor::new(fonts, opts.compose.clone())),
            poem,
            image,
            author: None,
            template: TemplateKind::default(),
            opts,
            gate: ExportGate::new(),
        }
    }

    pub fn from_job(job: &ExportJob, fonts: FontBook) -> PhotoverseResult<Self> {
        job.validate()?;
        let view = Self::new(
            job.load_poem()?,
            ImageSource::Path(job.image.clone()),
            fonts,
            ResultViewOpts {
                output_scale: job.scale,
                compose: job.compose.clone(),
            },
        )
        .with_author(job.author.clone());
        Ok(view.with_template(job.template))
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn with_template(mut self, template: TemplateKind) -> Self {
        self.template = template;
        self
    }

    pub fn select_template(&mut self, template: TemplateKind) {
        self.template = template;
    }

    pub fn template(&self) -> TemplateKind {
        self.template
    }

    pub fn poem(&self) -> &Poem {
        &self.poem
    }

    pub fn gate(&self) -> &ExportGate {
        &self.gate
    }

    /// Whether export controls should currently be disabled.
    pub fn is_exporting(&self) -> bool {
        self.gate.is_busy()
    }

    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::new(self.image.clone(), &self.poem, self.template)
            .with_author(self.author.clone())
            .with_scale(self.opts.output_scale)
    }

    /// Text for copy and share actions.
    pub fn full_text(&self) -> String {
        let mut text = format!("{}\n\n{}", self.poem.title, self.poem.body);
        if let Some(credit) = credit_line(self.author.as_deref()) {
            text.push_str("\n\n");
            text.push_str(&credit);
        }
        text
    }

    /// A panic during an earlier export poisons the lock but leaves the compositor usable.
    fn compositor(&self) -> MutexGuard<'_, Compositor> {
        self.compositor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render_png(
        &self,
        sink: &mut dyn ExportSink,
    ) -> PhotoverseResult<(ExportedArtifact, Vec<FontRole>)> {
        let mut c = self.compositor();
        let (image, plan) = c.prepare(&self.render_request())?;
        let missing = c.missing_faces(&plan);
        if !missing.is_empty() {
            tracing::warn!(?missing, "no font face for some text; it is not drawn");
        }
        let surface = c.render(&plan, &image)?;
        let artifact = export_png(&surface, &self.poem.title, sink)?;
        Ok((artifact, missing))
    }

    #[tracing::instrument(skip(self, sink), fields(template = %self.template))]
    pub fn export_image(&self, sink: &mut dyn ExportSink) -> PhotoverseResult<ExportOutcome> {
        let _guard = self.gate.try_begin()?;
        let result = self.render_png(sink);
        finish(ExportFormat::Png, result)
    }

    #[tracing::instrument(skip(self, sink))]
    pub fn export_pdf(&self, sink: &mut dyn ExportSink) -> PhotoverseResult<ExportOutcome> {
        let _guard = self.gate.try_begin()?;
        let result = load_image(
            &self.image,
            Duration::from_millis(self.opts.compose.decode_timeout_ms),
        )
        .and_then(|image| {
            let mut c = self.compositor();
            let content = PdfContent {
                title: &self.poem.title,
                body: &self.poem.body,
                author: self.author.as_deref(),
                image: &image,
            };
            // Base-14 fonts are always available to a PDF viewer.
            export_pdf(&content, c.text_engine(), sink).map(|artifact| (artifact, Vec::new()))
        });
        finish(ExportFormat::Pdf, result)
    }

    pub fn export(
        &self,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> PhotoverseResult<ExportOutcome> {
        match format {
            ExportFormat::Png => self.export_image(sink),
            ExportFormat::Pdf => self.export_pdf(sink),
        }
    }
}

fn finish(
    format: ExportFormat,
    result: PhotoverseResult<(ExportedArtifact, Vec<FontRole>)>,
) -> PhotoverseResult<ExportOutcome> {
    match result {
        Ok((artifact, missing_faces)) => Ok(ExportOutcome {
            format,
            artifact,
            missing_faces,
        }),
        Err(err) => {
            tracing::warn!(?format, error = %err, "export failed");
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/result_view.rs"]
mod tests;
