//! Paginated A4 document export.
//!
//! Layout works in millimetres from the top-left corner of the page and is computed
//! separately from serialization, so it can be inspected. Text uses the standard base-14
//! Type1 fonts with WinAnsi encoding; the photo is embedded as a JPEG.

use image::ImageEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::assets::PreparedImage;
use crate::compose::request::credit_line;
use crate::export::sink::{ExportSink, ExportedArtifact, PDF_MEDIA_TYPE};
use crate::export::slug::pdf_file_name;
use crate::foundation::core::Rect;
use crate::foundation::error::{PhotoverseError, PhotoverseResult};
use crate::layout::wrap::wrap;
use crate::text::measure::{FontRole, FontSpec, TextMeasure};

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_MM: f64 = 20.0;
pub const HEADING: &str = "Photo Verse";

const PT_PER_MM: f64 = 72.0 / 25.4;
const HEADING_PT: f32 = 22.0;
const HEADING_Y_MM: f64 = 25.0;
const IMAGE_Y_MM: f64 = 35.0;
const IMAGE_MAX_HEIGHT: f64 = 0.45;
const TITLE_PT: f32 = 18.0;
const TITLE_GAP_MM: f64 = 15.0;
const BODY_GAP_MM: f64 = 10.0;
const BODY_PT: f32 = 12.0;
const BODY_LINE_FACTOR: f64 = 1.5;
const CREDIT_GAP_MM: f64 = 10.0;
const JPEG_QUALITY: u8 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdfFont {
    HelveticaBold,
    TimesBold,
    TimesRoman,
    TimesItalic,
}

impl PdfFont {
    const ALL: [PdfFont; 4] = [
        Self::HelveticaBold,
        Self::TimesBold,
        Self::TimesRoman,
        Self::TimesItalic,
    ];

    fn base_font(self) -> &'static str {
        match self {
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesBold => "Times-Bold",
            Self::TimesRoman => "Times-Roman",
            Self::TimesItalic => "Times-Italic",
        }
    }

    fn resource_name(self) -> &'static str {
        match self {
            Self::HelveticaBold => "F1",
            Self::TimesBold => "F2",
            Self::TimesRoman => "F3",
            Self::TimesItalic => "F4",
        }
    }

    /// Role whose metrics stand in for this face when measuring.
    fn measure_role(self) -> FontRole {
        match self {
            Self::HelveticaBold | Self::TimesBold => FontRole::Title,
            Self::TimesRoman => FontRole::Body,
            Self::TimesItalic => FontRole::Credit,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PdfItem {
    Text {
        font: PdfFont,
        size_pt: f32,
        x_mm: f64,
        baseline_mm: f64,
        text: String,
    },
    Image {
        rect_mm: Rect,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PdfPage {
    pub items: Vec<PdfItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PdfLayout {
    pub pages: Vec<PdfPage>,
    pub body_lines: Vec<String>,
}

/// What goes into the document.
#[derive(Clone, Copy, Debug)]
pub struct PdfContent<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub author: Option<&'a str>,
    pub image: &'a PreparedImage,
}

struct Pager {
    pages: Vec<PdfPage>,
}

impl Pager {
    fn current(&mut self) -> &mut PdfPage {
        if self.pages.is_empty() {
            self.pages.push(PdfPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Move `y` to the next page if it crosses the bottom margin.
    fn ensure_room(&mut self, y: &mut f64) {
        if *y > PAGE_HEIGHT_MM - MARGIN_MM {
            self.pages.push(PdfPage::default());
            *y = MARGIN_MM;
        }
    }

    fn text(&mut self, font: PdfFont, size_pt: f32, x_mm: f64, baseline_mm: f64, text: String) {
        self.current().items.push(PdfItem::Text {
            font,
            size_pt,
            x_mm,
            baseline_mm,
            text,
        });
    }
}

fn width_mm<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    font: PdfFont,
    size_pt: f32,
) -> f64 {
    f64::from(measure.measure(text, &FontSpec::new(font.measure_role(), size_pt))) / PT_PER_MM
}

/// Lay out heading, photo, title, wrapped body and credit over as many pages as needed.
pub fn layout_pdf<M: TextMeasure + ?Sized>(content: &PdfContent<'_>, measure: &mut M) -> PdfLayout {
    let mut pager = Pager { pages: Vec::new() };
    let available = PAGE_WIDTH_MM - MARGIN_MM * 2.0;
    let centered = |w: f64| (PAGE_WIDTH_MM - w) / 2.0;

    let w = width_mm(measure, HEADING, PdfFont::HelveticaBold, HEADING_PT);
    pager.text(
        PdfFont::HelveticaBold,
        HEADING_PT,
        centered(w),
        HEADING_Y_MM,
        HEADING.to_string(),
    );

    let aspect = content.image.aspect();
    let mut img_w = available;
    let mut img_h = img_w / aspect;
    if img_h > PAGE_HEIGHT_MM * IMAGE_MAX_HEIGHT {
        img_h = PAGE_HEIGHT_MM * IMAGE_MAX_HEIGHT;
        img_w = img_h * aspect;
    }
    let img_x = centered(img_w);
    pager.current().items.push(PdfItem::Image {
        rect_mm: Rect::new(img_x, IMAGE_Y_MM, img_x + img_w, IMAGE_Y_MM + img_h),
    });

    let text_start = IMAGE_Y_MM + img_h + TITLE_GAP_MM;
    let title = content.title.trim();
    if !title.is_empty() {
        let w = width_mm(measure, title, PdfFont::TimesBold, TITLE_PT);
        pager.text(
            PdfFont::TimesBold,
            TITLE_PT,
            centered(w),
            text_start,
            title.to_string(),
        );
    }

    let body_font = FontSpec::new(PdfFont::TimesRoman.measure_role(), BODY_PT);
    let body_lines = wrap(
        content.body,
        (available * PT_PER_MM) as f32,
        &body_font,
        measure,
    );
    let step = f64::from(BODY_PT) * BODY_LINE_FACTOR / PT_PER_MM;
    let mut y = text_start + BODY_GAP_MM;
    for line in &body_lines {
        pager.ensure_room(&mut y);
        if !line.trim().is_empty() {
            let w = width_mm(measure, line, PdfFont::TimesRoman, BODY_PT);
            pager.text(PdfFont::TimesRoman, BODY_PT, centered(w), y, line.clone());
        }
        y += step;
    }

    if let Some(credit) = credit_line(content.author) {
        let mut y = y + CREDIT_GAP_MM;
        pager.ensure_room(&mut y);
        let w = width_mm(measure, &credit, PdfFont::TimesItalic, BODY_PT);
        pager.text(
            PdfFont::TimesItalic,
            BODY_PT,
            PAGE_WIDTH_MM - MARGIN_MM - w,
            y,
            credit,
        );
    }

    PdfLayout {
        pages: pager.pages,
        body_lines,
    }
}

/// Map text to WinAnsi bytes. Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                '\t' => b' ',
                _ => b'?',
            },
        })
        .collect()
}

fn pdf_err(err: lopdf::Error) -> PhotoverseError {
    PhotoverseError::export(format!("pdf: {err}"))
}

fn pt(mm: f64) -> Object {
    ((mm * PT_PER_MM) as f32).into()
}

fn encode_jpeg(image: &PreparedImage) -> PhotoverseResult<Vec<u8>> {
    let rgb = image.to_rgb8_over([255, 255, 255]);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .write_image(&rgb, image.width, image.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| PhotoverseError::export(format!("jpeg encode: {e}")))?;
    Ok(out)
}

fn page_operations(page: &PdfPage) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in &page.items {
        match item {
            PdfItem::Text {
                font,
                size_pt,
                x_mm,
                baseline_mm,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size_pt).into()],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![pt(*x_mm), pt(PAGE_HEIGHT_MM - baseline_mm)],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            PdfItem::Image { rect_mm } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(rect_mm.width()),
                        0.into(),
                        0.into(),
                        pt(rect_mm.height()),
                        pt(rect_mm.x0),
                        pt(PAGE_HEIGHT_MM - rect_mm.y1),
                    ],
                ));
                ops.push(Operation::new("Do", vec!["Im0".into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

/// Serialize a layout into PDF bytes.
pub fn write_pdf(layout: &PdfLayout, image: &PreparedImage) -> PhotoverseResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in PdfFont::ALL {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), id);
    }

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width),
            "Height" => i64::from(image.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        encode_jpeg(image)?,
    ));
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => dictionary! { "Im0" => image_id },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(pdf_err)?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), pt(PAGE_WIDTH_MM), pt(PAGE_HEIGHT_MM)],
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| PhotoverseError::export(format!("pdf write: {e}")))?;
    Ok(out)
}

pub fn render_pdf<M: TextMeasure + ?Sized>(
    content: &PdfContent<'_>,
    measure: &mut M,
) -> PhotoverseResult<Vec<u8>> {
    let layout = layout_pdf(content, measure);
    write_pdf(&layout, content.image)
}

/// Build the document and hand it to `sink` as `{title}-photo-verse.pdf`.
#[tracing::instrument(skip(content, measure, sink), fields(title = content.title))]
pub fn export_pdf<M: TextMeasure + ?Sized>(
    content: &PdfContent<'_>,
    measure: &mut M,
    sink: &mut dyn ExportSink,
) -> PhotoverseResult<ExportedArtifact> {
    let bytes = render_pdf(content, measure)?;
    let artifact = sink.deliver(&pdf_file_name(content.title), PDF_MEDIA_TYPE, &bytes)?;
    tracing::info!(file = %artifact.file_name, bytes = artifact.byte_len, "pdf exported");
    Ok(artifact)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
