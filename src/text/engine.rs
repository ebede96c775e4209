use std::collections::{BTreeMap, BTreeSet};

use crate::text::fonts::FontBook;
use crate::text::measure::{FixedAdvance, FontRole, FontSpec, TextMeasure};

/// Brush carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrush {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A glyph positioned relative to the line's origin, with y = 0 on the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// One shaped line ready to be painted.
#[derive(Clone, Debug)]
pub struct ShapedLine {
    pub role: FontRole,
    pub size_px: f32,
    pub width: f32,
    pub glyphs: Vec<PlacedGlyph>,
}

/// Parley-backed shaping and measurement over the faces of a [`FontBook`].
///
/// Roles without a face measure with [`FixedAdvance`] and cannot be shaped.
pub struct TextEngine {
    book: FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: BTreeMap<FontRole, String>,
    fallback: FixedAdvance,
    warned: BTreeSet<FontRole>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(FontBook::empty())
    }
}

impl TextEngine {
    pub fn new(book: FontBook) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let mut families = BTreeMap::new();
        for role in FontRole::ALL {
            let Some(face) = book.get(role) else {
                continue;
            };
            let registered = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(face.bytes.as_ref().clone()),
                None,
            );
            // A collection registers every face it holds; keep the family of the one the
            // raster back end will paint with.
            let name = registered
                .iter()
                .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
                .or_else(|| registered.first())
                .and_then(|(id, _)| font_ctx.collection.family_name(*id))
                .map(str::to_string);
            match name {
                Some(name) => {
                    families.insert(role, name);
                }
                None => tracing::warn!(?role, "font bytes registered no usable family"),
            }
        }

        Self {
            book,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            families,
            fallback: FixedAdvance::default(),
            warned: BTreeSet::new(),
        }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    /// Whether glyphs for `role` can be shaped and painted.
    pub fn has_face(&self, role: FontRole) -> bool {
        self.families.contains_key(&role)
    }

    fn build_layout(&mut self, text: &str, font: &FontSpec) -> Option<parley::Layout<TextBrush>> {
        let family = self.families.get(&font.role)?.clone();
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return None;
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        if font.role.is_bold() {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        if font.role.is_italic() {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::default()));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }

    fn note_fallback(&mut self, role: FontRole) {
        if self.warned.insert(role) {
            tracing::warn!(?role, "no font face for role; using approximate metrics");
        }
    }

    /// Shape a single line of text. Returns `None` when the role has no face.
    pub fn shape_line(&mut self, text: &str, font: &FontSpec) -> Option<ShapedLine> {
        let Some(layout) = self.build_layout(text, font) else {
            self.note_fallback(font.role);
            return None;
        };

        let baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(0.0);
        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }

        Some(ShapedLine {
            role: font.role,
            size_px: font.size_px,
            width: layout.width(),
            glyphs,
        })
    }
}

impl TextMeasure for TextEngine {
    fn measure(&mut self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match self.build_layout(text, font) {
            Some(layout) => layout.width(),
            None => {
                self.note_fallback(font.role);
                self.fallback.measure(text, font)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
