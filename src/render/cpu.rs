use std::collections::HashMap;
use std::sync::Arc;

use vello_cpu::kurbo::Shape;

use crate::assets::PreparedImage;
use crate::compose::plan::{DrawOp, RenderPlan};
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::render::RenderBackend;
use crate::render::surface::Surface;
use crate::text::engine::TextEngine;
use crate::text::fonts::FontBook;
use crate::text::measure::FontRole;

/// CPU raster back end powered by `vello_cpu`.
#[derive(Default)]
pub struct CpuBackend {
    font_cache: HashMap<FontRole, vello_cpu::peniko::FontData>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn font_for(&mut self, role: FontRole, book: &FontBook) -> Option<vello_cpu::peniko::FontData> {
        if let Some(font) = self.font_cache.get(&role) {
            return Some(font.clone());
        }
        let face = book.get(role)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            face.index,
        );
        self.font_cache.insert(role, font.clone());
        Some(font)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        image: &ImagePaint,
        text: &mut TextEngine,
    ) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Fill { rect, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::FillRounded {
                rect,
                radius,
                color,
            } => {
                let rr = vello_cpu::kurbo::RoundedRect::from_rect(rect_to_cpu(*rect), *radius);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&rr.to_path(0.1));
            }
            DrawOp::Image { dest, clip } => {
                let visible = dest.intersect(*clip);
                if visible.width() <= 0.0 || visible.height() <= 0.0 {
                    return;
                }
                let sx = dest.width() / image.width;
                let sy = dest.height() / image.height;
                if sx <= 0.0 || sy <= 0.0 {
                    return;
                }
                // Paint in image space so the fill rect doubles as the clip.
                let local = vello_cpu::kurbo::Rect::new(
                    (visible.x0 - dest.x0) / sx,
                    (visible.y0 - dest.y0) / sy,
                    (visible.x1 - dest.x0) / sx,
                    (visible.y1 - dest.y0) / sy,
                );
                ctx.set_transform(
                    vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                        * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy),
                );
                ctx.set_paint(image.paint.clone());
                ctx.fill_rect(&local);
            }
            DrawOp::Frame { rect, width, color } => {
                let half = width / 2.0;
                let outer = rect.inflate(half, half);
                let inner = rect.inflate(-half, -half);
                ctx.set_paint(color_to_cpu(*color));
                for strip in [
                    Rect::new(outer.x0, outer.y0, outer.x1, inner.y0),
                    Rect::new(outer.x0, inner.y1, outer.x1, outer.y1),
                    Rect::new(outer.x0, inner.y0, inner.x0, inner.y1),
                    Rect::new(inner.x1, inner.y0, outer.x1, inner.y1),
                ] {
                    ctx.fill_rect(&rect_to_cpu(strip));
                }
            }
            DrawOp::Text {
                text: line,
                font,
                center_x,
                baseline,
                color,
            } => {
                let Some(shaped) = text.shape_line(line, font) else {
                    return;
                };
                let Some(font_data) = self.font_for(font.role, text.book()) else {
                    return;
                };
                let x0 = *center_x as f32 - shaped.width / 2.0;
                let y0 = *baseline as f32;
                ctx.set_paint(color_to_cpu(*color));
                ctx.glyph_run(&font_data)
                    .font_size(shaped.size_px)
                    .fill_glyphs(shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: x0 + g.x,
                        y: y0 + g.y,
                    }));
            }
        }
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "debug", skip_all, fields(w = plan.canvas.width, h = plan.canvas.height))]
    fn render(
        &mut self,
        plan: &RenderPlan,
        image: &PreparedImage,
        text: &mut TextEngine,
    ) -> PhotoverseResult<Surface> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| PhotoverseError::validation("surface width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| PhotoverseError::validation("surface height exceeds u16"))?;

        let paint = ImagePaint::from_prepared(image)?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &plan.ops {
            self.draw_op(&mut ctx, op, &paint, text);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(Surface {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

struct ImagePaint {
    paint: vello_cpu::Image,
    width: f64,
    height: f64,
}

impl ImagePaint {
    fn from_prepared(image: &PreparedImage) -> PhotoverseResult<Self> {
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: f64::from(image.width),
            height: f64::from(image.height),
        })
    }
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PhotoverseResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PhotoverseError::image_decode("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PhotoverseError::image_decode("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PhotoverseError::image_decode(
            "prepared image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
