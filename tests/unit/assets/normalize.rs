use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn non_image_mime_is_rejected_before_decode() {
    // Valid PNG bytes, but a non-image declaration: rejected without any
    // decode attempt.
    let bytes = encode_png(image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255])));
    let err = normalize_image(&bytes, "application/pdf", &NormalizeOpts::default()).unwrap_err();
    assert!(matches!(err, TeeformError::UnsupportedFileType(_)));
}

#[test]
fn corrupt_image_fails_with_image_decode() {
    let err = normalize_image(b"garbage", "image/png", &NormalizeOpts::default()).unwrap_err();
    assert!(matches!(err, TeeformError::ImageDecode(_)));
}

#[test]
fn within_bounds_passes_through_byte_identical() {
    let bytes = encode_png(image::RgbaImage::from_pixel(500, 300, image::Rgba([50, 60, 70, 255])));
    let out = normalize_image(&bytes, "image/png", &NormalizeOpts::default()).unwrap();
    assert_eq!((out.width, out.height), (500, 300));
    assert_eq!(out.bytes.as_slice(), bytes.as_slice());
    assert_eq!(out.mime, "image/png");
}

#[test]
fn oversized_image_is_bounded_with_aspect_preserved() {
    let bytes = encode_png(image::RgbaImage::from_pixel(
        4000,
        2000,
        image::Rgba([200, 100, 50, 255]),
    ));
    let out = normalize_image(&bytes, "image/png", &NormalizeOpts::default()).unwrap();
    assert_eq!((out.width, out.height), (1024, 512));
}

#[test]
fn portrait_orientation_bounds_the_height() {
    let bytes = encode_png(image::RgbaImage::from_pixel(600, 2400, image::Rgba([1, 2, 3, 255])));
    let opts = NormalizeOpts {
        max_dimension: 1200,
        ..NormalizeOpts::default()
    };
    let out = normalize_image(&bytes, "image/png", &opts).unwrap();
    assert_eq!((out.width, out.height), (300, 1200));
}

#[test]
fn opaque_sources_reencode_as_jpeg() {
    let bytes = encode_png(image::RgbaImage::from_pixel(
        2048,
        1024,
        image::Rgba([10, 20, 30, 255]),
    ));
    let out = normalize_image(&bytes, "image/png", &NormalizeOpts::default()).unwrap();
    assert_eq!(out.mime, "image/jpeg");
    assert_eq!((out.width, out.height), (1024, 512));
}

#[test]
fn translucent_sources_keep_alpha_via_png() {
    let bytes = encode_png(image::RgbaImage::from_pixel(
        2048,
        1024,
        image::Rgba([10, 20, 30, 128]),
    ));
    let out = normalize_image(&bytes, "image/png", &NormalizeOpts::default()).unwrap();
    assert_eq!(out.mime, "image/png");

    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert!(decoded.pixels().any(|p| p.0[3] < 255));
}

#[test]
fn output_stays_decodable_and_within_bound() {
    let bytes = encode_png(image::RgbaImage::from_pixel(1500, 900, image::Rgba([5, 5, 5, 255])));
    let opts = NormalizeOpts {
        max_dimension: 256,
        ..NormalizeOpts::default()
    };
    let out = normalize_image(&bytes, "image/png", &opts).unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (out.width, out.height));
    assert!(out.max_dimension() <= 256);
    // Aspect preserved to within a pixel of rounding.
    let src_aspect = 1500.0 / 900.0;
    let out_aspect = f64::from(out.width) / f64::from(out.height);
    assert!((src_aspect - out_aspect).abs() < 0.02);
}
