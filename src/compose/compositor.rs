use std::collections::BTreeSet;
use std::time::Duration;

use crate::assets::PreparedImage;
use crate::assets::decode::load_image;
use crate::compose::ComposeOpts;
use crate::compose::plan::{DrawOp, RenderPlan, build_plan};
use crate::compose::request::RenderRequest;
use crate::foundation::error::PhotoverseResult;
use crate::render::cpu::CpuBackend;
use crate::render::{RenderBackend, Surface};
use crate::template::geometry::TemplateGeometry;
use crate::text::engine::TextEngine;
use crate::text::fonts::FontBook;
use crate::text::measure::FontRole;

/// Turns a [`RenderRequest`] into pixels.
///
/// Holds the text engine and raster back end so font registration is paid once; every
/// `compose` call still allocates its own surface.
pub struct Compositor {
    text: TextEngine,
    backend: CpuBackend,
    opts: ComposeOpts,
}

impl Compositor {
    pub fn new(fonts: FontBook, opts: ComposeOpts) -> Self {
        Self {
            text: TextEngine::new(fonts),
            backend: CpuBackend::new(),
            opts,
        }
    }

    pub fn opts(&self) -> &ComposeOpts {
        &self.opts
    }

    pub fn text_engine(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Decode the photo and lay out the render without painting.
    ///
    /// Decoding happens first, so a bad image fails before any layout or surface work.
    pub fn prepare(&mut self, req: &RenderRequest) -> PhotoverseResult<(PreparedImage, RenderPlan)> {
        let geometry = TemplateGeometry::for_kind(req.template, req.output_scale)?;
        let image = load_image(
            &req.source_image,
            Duration::from_millis(self.opts.decode_timeout_ms),
        )?;
        let plan = build_plan(
            &geometry,
            (image.width, image.height),
            &req.title,
            &req.body,
            req.author_name.as_deref(),
            &self.opts,
            &mut self.text,
        );
        Ok((image, plan))
    }

    pub fn render(&mut self, plan: &RenderPlan, image: &PreparedImage) -> PhotoverseResult<Surface> {
        self.backend.render(plan, image, &mut self.text)
    }

    /// Roles used by text in `plan` that have no face. Text in those roles is measured but
    /// not painted.
    pub fn missing_faces(&self, plan: &RenderPlan) -> Vec<FontRole> {
        plan.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { font, .. } if !self.text.has_face(font.role) => Some(font.role),
                _ => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[tracing::instrument(
        skip(self, req),
        fields(
            template = %req.template,
            scale = req.output_scale,
            source = %req.source_image.describe()
        )
    )]
    pub fn compose(&mut self, req: &RenderRequest) -> PhotoverseResult<Surface> {
        let (image, plan) = self.prepare(req)?;
        let surface = self.render(&plan, &image)?;
        tracing::debug!(
            width = surface.width,
            height = surface.height,
            font_size = plan.text.fit.font_size,
            lines = plan.text.fit.lines.len(),
            "composed"
        );
        Ok(surface)
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(FontBook::empty(), ComposeOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
