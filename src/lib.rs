//! Photoverse composes a poem over a photo and exports the result.
//!
//! The engine turns `(photo, title, body, author, template)` into either a raster share
//! image or a paginated document.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: the photo is loaded and premultiplied, bounded by a timeout.
//! 2. **Plan**: a [`TemplateGeometry`] is resolved for the chosen [`TemplateKind`] and output
//!    scale; the body is wrapped and shrunk to fit ([`fit`]); the result is a [`RenderPlan`].
//! 3. **Render**: the CPU back end paints the plan into a premultiplied RGBA8 [`Surface`].
//! 4. **Export**: PNG via [`export_png`] or an A4 document via [`export_pdf`], delivered to an
//!    [`ExportSink`].
//!
//! [`ResultView`] ties these together behind a single-flight [`ExportGate`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical requests produce identical pixels.
//! - **Text overflow is not an error**: when a poem does not fit at the minimum size it is
//!   drawn anyway and [`FitResult::overflow`] is set.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod config;
pub mod export;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod service;
pub mod session;
pub mod template;
pub mod text;

pub use crate::assets::decode::{decode_image, load_image};
pub use crate::assets::{ImageSource, PreparedImage};
pub use crate::compose::ComposeOpts;
pub use crate::compose::compositor::Compositor;
pub use crate::compose::placement::place_image;
pub use crate::compose::plan::{DrawOp, RenderPlan, TextReport, build_plan};
pub use crate::compose::request::{DEFAULT_OUTPUT_SCALE, Poem, RenderRequest};
pub use crate::config::job::{ExportFormat, ExportJob, PoemSource};
pub use crate::export::gate::{ExportGate, ExportGuard};
pub use crate::export::pdf::{PdfContent, export_pdf, layout_pdf, render_pdf};
pub use crate::export::png::{encode_png, export_png};
pub use crate::export::sink::{DirectorySink, ExportSink, ExportedArtifact, InMemorySink};
pub use crate::export::slug::{pdf_file_name, png_file_name, slugify};
pub use crate::foundation::core::{Canvas, Rect, Rgba8};
pub use crate::foundation::error::{PhotoverseError, PhotoverseResult};
pub use crate::layout::fit::{FitParams, FitResult, fit};
pub use crate::layout::wrap::wrap;
pub use crate::render::cpu::CpuBackend;
pub use crate::render::{RenderBackend, Surface};
pub use crate::service::generator::{
    FallbackChain, PoemGenerator, PoemRequest, ServiceError, generate_poem,
};
pub use crate::service::options::{Language, PoemMood, PoemStyle};
pub use crate::service::prompt::build_prompt;
pub use crate::service::response::parse_poem_response;
pub use crate::session::result_view::{ExportOutcome, ResultView, ResultViewOpts};
pub use crate::template::geometry::{ImageFit, TemplateGeometry};
pub use crate::template::kind::TemplateKind;
pub use crate::text::engine::TextEngine;
pub use crate::text::fonts::{FontBook, FontFiles};
pub use crate::text::measure::{FixedAdvance, FontRole, FontSpec, TextMeasure};
