use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::template::kind::TemplateKind;
use crate::text::measure::{FontRole, FontSpec};

pub const SURFACE: Rgba8 = Rgba8::opaque(0xF0, 0xFD, 0xFA);
pub const STORY_BACKGROUND: Rgba8 = Rgba8::opaque(0x14, 0xB8, 0xA6);
pub const POLAROID_BACKGROUND: Rgba8 = Rgba8::opaque(0xFF, 0xFF, 0xFF);
pub const TEXT_DARK: Rgba8 = Rgba8::opaque(0x1F, 0x29, 0x37);
pub const POLAROID_BORDER: Rgba8 = Rgba8::opaque(0xE5, 0xE5, 0xE5);

const TITLE_PX: f64 = 48.0;
const BODY_PX: f64 = 32.0;
const POLAROID_BODY_PX: f64 = 28.0;
const CREDIT_PX: f64 = 24.0;

/// How a photo is placed into its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Fill the slot, cropping overflow, centred.
    Cover,
    /// Fit entirely inside the slot, letterboxed, centred.
    Contain,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub color: Rgba8,
    pub width: f64,
}

/// Rounded panel drawn behind the text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Card {
    pub rect: Rect,
    pub radius: f64,
    pub color: Rgba8,
}

/// Resolved geometry program for one template at one output scale.
///
/// All lengths are output pixels. Title and body baselines are absolute; the credit
/// baseline is relative to where the body ends, see [`TemplateGeometry::credit_offset`].
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateGeometry {
    pub kind: TemplateKind,
    pub scale: f64,
    pub canvas: Canvas,
    pub background: Rgba8,
    pub image_slot: Rect,
    pub image_fit: ImageFit,
    pub slot_border: Option<Border>,
    pub card: Option<Card>,
    pub text_color: Rgba8,
    pub center_x: f64,
    pub title_baseline: f64,
    pub title_font: FontSpec,
    /// Top of the body block; the first line's baseline is one line height below.
    pub body_top: f64,
    pub body_width: f64,
    /// Lowest y the body plus an optional credit band may reach.
    pub body_limit: f64,
    pub body_font: FontSpec,
    pub credit_font: FontSpec,
    /// Height reserved under the body when a credit is drawn.
    pub credit_band: f64,
    /// Distance from the body's end to the credit baseline.
    pub credit_offset: f64,
}

impl TemplateGeometry {
    pub fn for_kind(kind: TemplateKind, scale: f64) -> PhotoverseResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PhotoverseError::validation(format!(
                "output scale must be finite and > 0 (got {scale})"
            )));
        }
        let (bw, bh) = kind.base_size();
        let canvas = Canvas::new(
            (f64::from(bw) * scale).round().max(1.0) as u32,
            (f64::from(bh) * scale).round().max(1.0) as u32,
        )?;
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let px = |v: f64| v * scale;
        let font = |role: FontRole, base: f64| FontSpec::new(role, (base * scale) as f32);

        let geometry = match kind {
            TemplateKind::Story => {
                let band = h * 0.55;
                let card_y = band - px(80.0);
                let card_rect = Rect::new(px(40.0), card_y, w - px(40.0), h - px(60.0));
                let title_baseline = card_y + px(120.0);
                Self {
                    kind,
                    scale,
                    canvas,
                    background: STORY_BACKGROUND,
                    image_slot: Rect::new(0.0, 0.0, w, band),
                    image_fit: ImageFit::Cover,
                    slot_border: None,
                    card: Some(Card {
                        rect: card_rect,
                        radius: px(40.0),
                        color: SURFACE,
                    }),
                    text_color: TEXT_DARK,
                    center_x: w / 2.0,
                    title_baseline,
                    title_font: font(FontRole::Title, TITLE_PX),
                    body_top: title_baseline + px(40.0),
                    body_width: w - px(160.0),
                    body_limit: card_rect.y1,
                    body_font: font(FontRole::Body, BODY_PX),
                    credit_font: font(FontRole::Credit, CREDIT_PX),
                    credit_band: px(100.0),
                    credit_offset: px(50.0),
                }
            }
            TemplateKind::Square => {
                let margin = px(50.0);
                let side = h * 0.45;
                let slot = Rect::new((w - side) / 2.0, margin, (w + side) / 2.0, margin + side);
                let title_baseline = slot.y1 + px(80.0);
                Self {
                    kind,
                    scale,
                    canvas,
                    background: SURFACE,
                    image_slot: slot,
                    image_fit: ImageFit::Contain,
                    slot_border: None,
                    card: None,
                    text_color: TEXT_DARK,
                    center_x: w / 2.0,
                    title_baseline,
                    title_font: font(FontRole::Title, TITLE_PX),
                    body_top: title_baseline + px(20.0),
                    body_width: w - margin * 2.0,
                    body_limit: h - margin,
                    body_font: font(FontRole::Body, BODY_PX),
                    credit_font: font(FontRole::Credit, CREDIT_PX),
                    credit_band: px(60.0),
                    credit_offset: px(40.0),
                }
            }
            TemplateKind::Polaroid => {
                let margin = px(60.0);
                let side = h * 0.45;
                let slot = Rect::new((w - side) / 2.0, margin, (w + side) / 2.0, margin + side);
                let title_baseline = slot.y1 + px(80.0);
                Self {
                    kind,
                    scale,
                    canvas,
                    background: POLAROID_BACKGROUND,
                    image_slot: slot,
                    image_fit: ImageFit::Contain,
                    slot_border: Some(Border {
                        color: POLAROID_BORDER,
                        width: px(2.0),
                    }),
                    card: None,
                    text_color: TEXT_DARK,
                    center_x: w / 2.0,
                    title_baseline,
                    title_font: font(FontRole::Title, TITLE_PX),
                    body_top: title_baseline + px(20.0),
                    body_width: w - margin * 2.0,
                    body_limit: h - px(40.0),
                    body_font: font(FontRole::Mono, POLAROID_BODY_PX),
                    credit_font: font(FontRole::Credit, CREDIT_PX),
                    credit_band: px(50.0),
                    credit_offset: px(40.0),
                }
            }
        };
        Ok(geometry)
    }

    /// Vertical budget for the body, shrinking by the credit band only when a credit is drawn.
    pub fn max_body_height(&self, has_credit: bool) -> f64 {
        let band = if has_credit { self.credit_band } else { 0.0 };
        (self.body_limit - self.body_top - band).max(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/geometry.rs"]
mod tests;
