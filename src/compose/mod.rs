pub mod compositor;
pub mod placement;
pub mod plan;
pub mod request;

use crate::foundation::error::{PhotoverseError, PhotoverseResult};

/// Tunables shared by every render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeOpts {
    /// Upper bound on loading and decoding the source photo.
    pub decode_timeout_ms: u64,
    /// Smallest body size the fitter may reach, in base (unscaled) pixels.
    pub min_body_font_px: f32,
    /// Shrink step, in output pixels.
    pub font_step_px: f32,
    pub line_height_factor: f32,
}

impl ComposeOpts {
    pub fn validate(&self) -> PhotoverseResult<()> {
        if self.decode_timeout_ms == 0 {
            return Err(PhotoverseError::validation(
                "compose.decode_timeout_ms must be > 0",
            ));
        }
        let positive = [
            ("font_step_px", self.font_step_px),
            ("line_height_factor", self.line_height_factor),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(PhotoverseError::validation(format!(
                    "compose.{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        if !self.min_body_font_px.is_finite() || self.min_body_font_px < 0.0 {
            return Err(PhotoverseError::validation(format!(
                "compose.min_body_font_px must be finite and >= 0 (got {})",
                self.min_body_font_px
            )));
        }
        Ok(())
    }
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            decode_timeout_ms: 10_000,
            min_body_font_px: 14.0,
            font_step_px: crate::layout::fit::FONT_STEP_PX,
            line_height_factor: crate::layout::fit::LINE_HEIGHT_FACTOR,
        }
    }
}
