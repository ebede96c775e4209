use super::*;
use crate::export::sink::InMemorySink;

fn surface() -> Surface {
    Surface {
        width: 2,
        height: 2,
        data: vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 64, 32, 0, 128,
        ],
        premultiplied: true,
    }
}

#[test]
fn encoded_png_decodes_to_straight_pixels() {
    let bytes = encode_png(&surface()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 1).0, [128, 64, 0, 128]);
}

#[test]
fn truncated_surface_is_an_export_error() {
    let mut s = surface();
    s.data.truncate(7);
    assert!(matches!(encode_png(&s), Err(PhotoverseError::Export(_))));
}

#[test]
fn export_names_file_from_title() {
    let mut sink = InMemorySink::new();
    let a = export_png(&surface(), "Quiet Harbour", &mut sink).unwrap();
    assert_eq!(a.file_name, "photoverse-quiet-harbour.png");
    assert_eq!(a.media_type, "image/png");
    assert_eq!(sink.last().unwrap().1.len(), a.byte_len);
    assert!(sink.last().unwrap().1.starts_with(b"\x89PNG"));
}
