use super::*;
use crate::assets::ImageSource;
use crate::compose::request::Poem;
use crate::foundation::error::PhotoverseError;
use crate::template::kind::TemplateKind;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([40, 90, 160, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn request(bytes: Vec<u8>, kind: TemplateKind) -> RenderRequest {
    RenderRequest::new(
        ImageSource::from_bytes(bytes),
        &Poem::new("Harbour", "salt wind\nropes creak\n\nlight returns"),
        kind,
    )
    .with_scale(0.2)
}

#[test]
fn compose_uses_template_canvas_at_scale() {
    let mut c = Compositor::default();
    for (kind, (w, h)) in [
        (TemplateKind::Story, (216, 384)),
        (TemplateKind::Square, (216, 216)),
        (TemplateKind::Polaroid, (216, 270)),
    ] {
        let s = c.compose(&request(png_bytes(6, 4), kind)).unwrap();
        assert_eq!((s.width, s.height), (w, h), "{kind}");
        assert_eq!(s.data.len(), (w * h * 4) as usize);
    }
}

#[test]
fn prepare_reports_layout_without_painting() {
    let mut c = Compositor::default();
    let (image, plan) = c.prepare(&request(png_bytes(6, 4), TemplateKind::Square)).unwrap();
    assert_eq!((image.width, image.height), (6, 4));
    assert_eq!(plan.text.fit.lines, vec!["salt wind", "ropes creak", "", "light returns"]);
}

#[test]
fn undecodable_image_fails_before_layout() {
    let mut c = Compositor::default();
    let err = c
        .compose(&request(b"not an image".to_vec(), TemplateKind::Story))
        .unwrap_err();
    assert!(matches!(err, PhotoverseError::ImageDecode(_)));
}

#[test]
fn invalid_scale_is_a_validation_error() {
    let mut c = Compositor::default();
    let err = c
        .compose(&request(png_bytes(2, 2), TemplateKind::Story).with_scale(0.0))
        .unwrap_err();
    assert!(matches!(err, PhotoverseError::Validation(_)));
}
