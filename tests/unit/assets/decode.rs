use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn decode_premultiplies_rgba() {
    let bytes = png_bytes(2, 3, [200, 100, 50, 128]);
    let img = decode_image(&bytes).unwrap();
    assert_eq!((img.width, img.height), (2, 3));
    assert_eq!(&img.rgba8_premul[0..4], &[100, 50, 25, 128]);
}

#[test]
fn invalid_bytes_are_decode_errors() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, PhotoverseError::ImageDecode(_)));
}

#[test]
fn missing_file_is_decode_error() {
    let src = ImageSource::Path("target/no/such/photo.jpg".into());
    let err = load_image(&src, Duration::from_secs(5)).unwrap_err();
    assert!(matches!(err, PhotoverseError::ImageDecode(_)));
}

#[test]
fn load_image_from_bytes() {
    let src = ImageSource::from_bytes(png_bytes(4, 4, [0, 255, 0, 255]));
    let img = load_image(&src, Duration::from_secs(5)).unwrap();
    assert_eq!(img.aspect(), 1.0);
    assert_eq!(&img.rgba8_premul[0..4], &[0, 255, 0, 255]);
}

#[test]
fn rgb_flattening_composites_over_background() {
    let img = PreparedImage {
        width: 1,
        height: 2,
        rgba8_premul: Arc::new(vec![0, 0, 0, 0, 10, 20, 30, 255]),
    };
    assert_eq!(img.to_rgb8_over([255, 255, 255]), vec![255, 255, 255, 10, 20, 30]);
}
