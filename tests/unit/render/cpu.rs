use super::*;
use crate::compose::ComposeOpts;
use crate::compose::plan::build_plan;
use crate::template::geometry::{POLAROID_BORDER, STORY_BACKGROUND, SURFACE, TemplateGeometry};
use crate::template::kind::TemplateKind;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> PreparedImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

fn render(kind: TemplateKind, scale: f64, image: &PreparedImage) -> Surface {
    let geometry = TemplateGeometry::for_kind(kind, scale).unwrap();
    let mut text = TextEngine::default();
    let plan = build_plan(
        &geometry,
        (image.width, image.height),
        "Title",
        "a line of verse",
        Some("Ada"),
        &ComposeOpts::default(),
        &mut text,
    );
    CpuBackend::new().render(&plan, image, &mut text).unwrap()
}

fn assert_near(px: [u8; 4], want: Rgba8) {
    let want = [want.r, want.g, want.b, want.a];
    for (a, b) in px.iter().zip(want) {
        assert!(a.abs_diff(b) <= 2, "pixel {px:?} != {want:?}");
    }
}

#[test]
fn square_fills_background_and_contains_photo() {
    let red = Rgba8::opaque(220, 20, 20);
    let s = render(TemplateKind::Square, 0.1, &solid(4, 4, [220, 20, 20]));
    assert_eq!((s.width, s.height), (108, 108));
    assert!(s.premultiplied);
    assert_near(s.pixel(1, 1).unwrap(), SURFACE);
    assert_near(s.pixel(54, 29).unwrap(), red);
    assert_near(s.pixel(10, 29).unwrap(), SURFACE);
}

#[test]
fn story_covers_band_and_draws_card() {
    let blue = Rgba8::opaque(10, 40, 200);
    let s = render(TemplateKind::Story, 0.25, &solid(8, 2, [10, 40, 200]));
    assert_eq!((s.width, s.height), (270, 480));
    assert_near(s.pixel(2, 100).unwrap(), blue);
    assert_near(s.pixel(135, 100).unwrap(), blue);
    assert_near(s.pixel(135, 400).unwrap(), SURFACE);
    assert_near(s.pixel(2, 478).unwrap(), STORY_BACKGROUND);
}

#[test]
fn polaroid_frames_the_slot() {
    let s = render(TemplateKind::Polaroid, 1.0, &solid(3, 3, [0, 0, 0]));
    assert_near(s.pixel(236, 300).unwrap(), POLAROID_BORDER);
    assert_near(s.pixel(540, 300).unwrap(), Rgba8::opaque(0, 0, 0));
}

#[test]
fn rendering_is_deterministic() {
    let image = solid(5, 7, [30, 160, 90]);
    let a = render(TemplateKind::Story, 0.2, &image);
    let b = render(TemplateKind::Story, 0.2, &image);
    assert_eq!(a, b);
}

#[test]
fn mismatched_image_bytes_are_rejected() {
    let bad = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0; 10]),
    };
    let geometry = TemplateGeometry::for_kind(TemplateKind::Square, 0.1).unwrap();
    let mut text = TextEngine::default();
    let plan = build_plan(&geometry, (4, 4), "", "", None, &ComposeOpts::default(), &mut text);
    let err = CpuBackend::new().render(&plan, &bad, &mut text).unwrap_err();
    assert!(matches!(err, PhotoverseError::ImageDecode(_)));
}

#[test]
fn story_card_overlaps_photo_bottom() {
    let geometry = TemplateGeometry::for_kind(TemplateKind::Story, 1.0).unwrap();
    let card = geometry.card.unwrap().rect;
    let band_bottom = geometry.image_slot.y1;
    assert!(card.y0 < band_bottom);

    let s = render(TemplateKind::Story, 1.0, &solid(8, 2, [10, 40, 200]));
    let y = ((card.y0 + band_bottom) / 2.0) as u32;
    assert_near(s.pixel(540, y).unwrap(), SURFACE);
    assert_near(s.pixel(10, y).unwrap(), Rgba8::opaque(10, 40, 200));
}

fn dark_pixels_in_rows(s: &Surface, y0: u32, y1: u32) -> usize {
    (y0..y1.min(s.height))
        .flat_map(|y| (0..s.width).map(move |x| (x, y)))
        .filter_map(|(x, y)| s.pixel(x, y))
        .filter(|px| px[0] < 100 && px[1] < 100 && px[2] < 100)
        .count()
}

#[test]
fn installed_face_paints_title_glyphs() {
    let book = FontBook::from_system();
    if book.get(FontRole::Title).is_none() {
        eprintln!("skipping: no installed font face");
        return;
    }
    let geometry = TemplateGeometry::for_kind(TemplateKind::Square, 0.5).unwrap();
    let image = solid(4, 4, [200, 200, 200]);
    let baseline = geometry.title_baseline;
    let rows = (
        (baseline - f64::from(geometry.title_font.size_px)) as u32,
        baseline as u32 + 4,
    );

    let paint = |text: &mut TextEngine| {
        let plan = build_plan(
            &geometry,
            (4, 4),
            "Harbour",
            "",
            None,
            &ComposeOpts::default(),
            text,
        );
        CpuBackend::new().render(&plan, &image, text).unwrap()
    };

    let with_face = paint(&mut TextEngine::new(book));
    assert!(dark_pixels_in_rows(&with_face, rows.0, rows.1) > 20);

    let without = paint(&mut TextEngine::default());
    assert_eq!(dark_pixels_in_rows(&without, rows.0, rows.1), 0);
}
