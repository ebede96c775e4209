//! Fonts, measurement and shaping.
//!
//! Layout code depends only on [`measure::TextMeasure`]; the raster back end additionally
//! shapes glyphs through [`engine::TextEngine`].

pub mod engine;
pub mod fonts;
pub mod measure;
