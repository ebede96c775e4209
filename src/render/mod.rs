use crate::assets::PreparedImage;
use crate::compose::plan::RenderPlan;
use crate::foundation::error::PhotoverseResult;
use crate::text::engine::TextEngine;

pub mod cpu;
pub mod surface;

pub use surface::Surface;

/// A raster back end that paints a [`RenderPlan`] onto a fresh surface.
///
/// Each call allocates its own surface; back ends may cache font data between calls but
/// keep no per-render state.
pub trait RenderBackend {
    fn render(
        &mut self,
        plan: &RenderPlan,
        image: &PreparedImage,
        text: &mut TextEngine,
    ) -> PhotoverseResult<Surface>;
}
