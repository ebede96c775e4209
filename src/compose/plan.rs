use crate::compose::ComposeOpts;
use crate::compose::placement::place_image;
use crate::compose::request::credit_line;
use crate::foundation::core::{Canvas, Rect, Rgba8};
use crate::layout::fit::{FitParams, FitResult, fit};
use crate::template::geometry::TemplateGeometry;
use crate::template::kind::TemplateKind;
use crate::text::measure::{FontSpec, TextMeasure};

/// One drawing instruction in output pixel space. Ops are painted in order.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Rgba8,
    },
    FillRounded {
        rect: Rect,
        radius: f64,
        color: Rgba8,
    },
    /// The source photo scaled onto `dest`, painted only inside `clip`.
    Image {
        dest: Rect,
        clip: Rect,
    },
    /// A border of `width` centred on the edges of `rect`.
    Frame {
        rect: Rect,
        width: f64,
        color: Rgba8,
    },
    /// A single line of text centred horizontally on `center_x`.
    Text {
        text: String,
        font: FontSpec,
        center_x: f64,
        baseline: f64,
        color: Rgba8,
    },
}

/// Where the text ended up, for callers and tests that need to reason about layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TextReport {
    pub fit: FitResult,
    pub title_baseline: f64,
    pub body_top: f64,
    pub max_body_height: f64,
    /// Bottom of the last body line.
    pub text_end_y: f64,
    pub credit_baseline: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub template: TemplateKind,
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
    pub text: TextReport,
}

impl RenderPlan {
    pub fn text_ops(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, baseline, .. } => Some((text.as_str(), *baseline)),
            _ => None,
        })
    }
}

/// Lay out one render: background, clipped photo, optional frame, optional card, then title,
/// fitted body lines and the credit.
///
/// Pure over its inputs: no pixels are touched and nothing is decoded here.
pub fn build_plan<M: TextMeasure + ?Sized>(
    geometry: &TemplateGeometry,
    image_size: (u32, u32),
    title: &str,
    body: &str,
    author: Option<&str>,
    opts: &ComposeOpts,
    measure: &mut M,
) -> RenderPlan {
    let credit = credit_line(author);
    let mut ops = vec![DrawOp::Fill {
        rect: geometry.canvas.rect(),
        color: geometry.background,
    }];

    ops.push(DrawOp::Image {
        dest: place_image(
            image_size.0,
            image_size.1,
            geometry.image_slot,
            geometry.image_fit,
        ),
        clip: geometry.image_slot,
    });

    if let Some(border) = geometry.slot_border {
        ops.push(DrawOp::Frame {
            rect: geometry.image_slot,
            width: border.width,
            color: border.color,
        });
    }

    // The card overlaps the bottom edge of the photo, so it is painted after it.
    if let Some(card) = geometry.card {
        ops.push(DrawOp::FillRounded {
            rect: card.rect,
            radius: card.radius,
            color: card.color,
        });
    }

    let title = title.trim();
    if !title.is_empty() {
        ops.push(DrawOp::Text {
            text: title.to_string(),
            font: geometry.title_font,
            center_x: geometry.center_x,
            baseline: geometry.title_baseline,
            color: geometry.text_color,
        });
    }

    let max_body_height = geometry.max_body_height(credit.is_some());
    let start = geometry.body_font.size_px;
    let mut params = FitParams::new(
        geometry.body_width as f32,
        max_body_height as f32,
        start,
        opts.min_body_font_px * geometry.scale as f32,
        geometry.body_font.role,
    );
    params.step_px = opts.font_step_px;
    params.line_height_factor = opts.line_height_factor;

    let fitted = fit(body, &params, measure);
    if fitted.overflow {
        tracing::debug!(
            template = %geometry.kind,
            font_size = fitted.font_size,
            total_height = fitted.total_height,
            max_body_height,
            "body overflows at minimum font size; rendering anyway"
        );
    }

    let line_height = f64::from(fitted.line_height);
    let body_font = fitted.font(geometry.body_font.role);
    for (i, line) in fitted.lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        ops.push(DrawOp::Text {
            text: line.clone(),
            font: body_font,
            center_x: geometry.center_x,
            baseline: geometry.body_top + (i as f64 + 1.0) * line_height,
            color: geometry.text_color,
        });
    }
    let text_end_y = geometry.body_top + fitted.lines.len() as f64 * line_height;

    let credit_baseline = credit.map(|text| {
        let baseline = text_end_y + geometry.credit_offset;
        ops.push(DrawOp::Text {
            text,
            font: geometry.credit_font,
            center_x: geometry.center_x,
            baseline,
            color: geometry.text_color,
        });
        baseline
    });

    RenderPlan {
        template: geometry.kind,
        canvas: geometry.canvas,
        ops,
        text: TextReport {
            fit: fitted,
            title_baseline: geometry.title_baseline,
            body_top: geometry.body_top,
            max_body_height,
            text_end_y,
            credit_baseline,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
