use crate::layout::wrap::wrap;
use crate::text::measure::{FontRole, FontSpec, TextMeasure};

/// Line height as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.4;
/// Font size decrement per shrink iteration, in output pixels.
pub const FONT_STEP_PX: f32 = 2.0;

/// Inputs to [`fit`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitParams {
    pub max_width: f32,
    pub max_height: f32,
    pub start_font_px: f32,
    pub min_font_px: f32,
    pub role: FontRole,
    pub step_px: f32,
    pub line_height_factor: f32,
}

impl FitParams {
    pub fn new(
        max_width: f32,
        max_height: f32,
        start_font_px: f32,
        min_font_px: f32,
        role: FontRole,
    ) -> Self {
        Self {
            max_width,
            max_height,
            start_font_px,
            min_font_px,
            role,
            step_px: FONT_STEP_PX,
            line_height_factor: LINE_HEIGHT_FACTOR,
        }
    }
}

/// Output of the shrink-to-fit search.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitResult {
    pub font_size: f32,
    pub lines: Vec<String>,
    pub line_height: f32,
    pub total_height: f32,
    /// The block is still taller than `max_height` at the minimum size. Rendering proceeds.
    pub overflow: bool,
}

impl FitResult {
    pub fn font(&self, role: FontRole) -> FontSpec {
        FontSpec::new(role, self.font_size)
    }
}

/// Wrap `text` and shrink the font in fixed steps until the block fits `max_height`.
///
/// The returned size is always within `[min_font_px, start_font_px]`. When the text still
/// overflows at the minimum size the result is returned with `overflow` set.
#[tracing::instrument(level = "debug", skip(text, measure), fields(chars = text.len()))]
pub fn fit<M: TextMeasure + ?Sized>(text: &str, params: &FitParams, measure: &mut M) -> FitResult {
    let start = params.start_font_px.max(0.0);
    let min = params.min_font_px.clamp(0.0, start);
    let step = if params.step_px > 0.0 {
        params.step_px
    } else {
        FONT_STEP_PX
    };

    let mut font_size = start;
    loop {
        let font = FontSpec::new(params.role, font_size);
        let lines = wrap(text, params.max_width, &font, measure);
        let line_height = font_size * params.line_height_factor;
        let total_height = lines.len() as f32 * line_height;

        let fits = total_height <= params.max_height;
        if fits || font_size <= min {
            if !fits {
                tracing::debug!(
                    font_size,
                    total_height,
                    max_height = params.max_height,
                    "text overflows at minimum size"
                );
            }
            return FitResult {
                font_size,
                lines,
                line_height,
                total_height,
                overflow: !fits,
            };
        }
        let next = (font_size - step).max(min);
        // A step below f32 resolution at this size would never progress.
        font_size = if next < font_size { next } else { min };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
