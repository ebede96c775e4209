use std::sync::Arc;

use super::*;
use crate::export::sink::InMemorySink;
use crate::text::measure::FixedAdvance;

fn photo(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![128; (w * h * 4) as usize]),
    }
}

fn texts(layout: &PdfLayout, page: usize) -> Vec<(PdfFont, f64, f64, String)> {
    layout.pages[page]
        .items
        .iter()
        .filter_map(|i| match i {
            PdfItem::Text {
                font,
                x_mm,
                baseline_mm,
                text,
                ..
            } => Some((*font, *x_mm, *baseline_mm, text.clone())),
            PdfItem::Image { .. } => None,
        })
        .collect()
}

#[test]
fn landscape_photo_spans_content_width() {
    let image = photo(400, 300);
    let content = PdfContent {
        title: "Tide",
        body: "low water\nhigh sky",
        author: None,
        image: &image,
    };
    let layout = layout_pdf(&content, &mut FixedAdvance::default());
    assert_eq!(layout.pages.len(), 1);
    let rect = layout.pages[0]
        .items
        .iter()
        .find_map(|i| match i {
            PdfItem::Image { rect_mm } => Some(*rect_mm),
            PdfItem::Text { .. } => None,
        })
        .unwrap();
    assert!((rect.width() - 170.0).abs() < 1e-9);
    assert!((rect.height() - 127.5).abs() < 1e-9);
    assert!((rect.x0 - 20.0).abs() < 1e-9);
    assert_eq!(rect.y0, 35.0);

    let t = texts(&layout, 0);
    assert_eq!(t[0].3, HEADING);
    assert_eq!(t[1].0, PdfFont::TimesBold);
    assert!((t[1].2 - (35.0 + 127.5 + 15.0)).abs() < 1e-9);
    assert!((t[2].2 - (t[1].2 + 10.0)).abs() < 1e-9);
}

#[test]
fn portrait_photo_is_capped_at_page_fraction() {
    let image = photo(300, 900);
    let content = PdfContent {
        title: "",
        body: "",
        author: None,
        image: &image,
    };
    let layout = layout_pdf(&content, &mut FixedAdvance::default());
    let PdfItem::Image { rect_mm } = &layout.pages[0].items[1] else {
        panic!("expected image second");
    };
    assert!((rect_mm.height() - 297.0 * 0.45).abs() < 1e-9);
    assert!((rect_mm.center().x - 105.0).abs() < 1e-9);
}

#[test]
fn headings_and_lines_are_centred_and_credit_right_aligned() {
    let image = photo(10, 10);
    let content = PdfContent {
        title: "Tide",
        body: "low water",
        author: Some("Ada"),
        image: &image,
    };
    let mut m = FixedAdvance::default();
    let layout = layout_pdf(&content, &mut m);
    let t = texts(&layout, 0);

    let body = t.iter().find(|x| x.3 == "low water").unwrap();
    let w = width_mm(&mut m, "low water", PdfFont::TimesRoman, 12.0);
    assert!((body.1 + w / 2.0 - 105.0).abs() < 1e-6);

    let credit = t.last().unwrap();
    assert_eq!(credit.3, "- Ada");
    assert_eq!(credit.0, PdfFont::TimesItalic);
    let w = width_mm(&mut m, "- Ada", PdfFont::TimesItalic, 12.0);
    assert!((credit.1 + w - 190.0).abs() < 1e-6);
    let step = 12.0 * 1.5 * 25.4 / 72.0;
    assert!((credit.2 - (body.2 + step + 10.0)).abs() < 1e-6);
}

#[test]
fn long_poems_continue_on_new_pages() {
    let image = photo(400, 300);
    let body: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
    let body = body.join("\n");
    let content = PdfContent {
        title: "Many",
        body: &body,
        author: Some("Ada"),
        image: &image,
    };
    let layout = layout_pdf(&content, &mut FixedAdvance::default());
    assert_eq!(layout.pages.len(), 2);
    assert_eq!(layout.body_lines.len(), 40);

    let first = texts(&layout, 0);
    assert!(first.iter().all(|t| t.2 <= PAGE_HEIGHT_MM - MARGIN_MM));
    let second = texts(&layout, 1);
    assert_eq!(second[0].2, MARGIN_MM);
    assert_eq!(second.last().unwrap().3, "- Ada");
    let body_count = first.len() - 2 + second.len() - 1;
    assert_eq!(body_count, 40);
}

#[test]
fn stanza_breaks_leave_a_gap() {
    let image = photo(10, 10);
    let content = PdfContent {
        title: "",
        body: "a\n\nb",
        author: None,
        image: &image,
    };
    let layout = layout_pdf(&content, &mut FixedAdvance::default());
    let t = texts(&layout, 0);
    let a = t.iter().find(|x| x.3 == "a").unwrap().2;
    let b = t.iter().find(|x| x.3 == "b").unwrap().2;
    let step = 12.0 * 1.5 * 25.4 / 72.0;
    assert!((b - a - 2.0 * step).abs() < 1e-6);
}

#[test]
fn win_ansi_maps_latin1_and_smart_quotes() {
    assert_eq!(encode_win_ansi("Año “sí”"), vec![b'A', 0xF1, b'o', b' ', 0x93, b's', 0xED, 0x94]);
    assert_eq!(encode_win_ansi("月"), b"?");
    assert_eq!(encode_win_ansi("a—b"), vec![b'a', 0x97, b'b']);
}

#[test]
fn written_document_parses_with_expected_pages_and_image() {
    let image = photo(40, 30);
    let body: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
    let body = body.join("\n");
    let content = PdfContent {
        title: "Parse (me)",
        body: &body,
        author: Some("Ada"),
        image: &image,
    };
    let bytes = render_pdf(&content, &mut FixedAdvance::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    let raw = String::from_utf8_lossy(&bytes);
    assert!(raw.contains("DCTDecode"));
    assert!(raw.contains("Times-Italic"));
}

#[test]
fn export_uses_document_file_name() {
    let image = photo(4, 4);
    let content = PdfContent {
        title: "Quiet Harbour",
        body: "x",
        author: None,
        image: &image,
    };
    let mut sink = InMemorySink::new();
    let a = export_pdf(&content, &mut FixedAdvance::default(), &mut sink).unwrap();
    assert_eq!(a.file_name, "Quiet_Harbour-photo-verse.pdf");
    assert_eq!(a.media_type, "application/pdf");
}
