use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn from_bytes_probes_dimensions_without_full_decode() {
    let img = EncodedImage::from_bytes(png_bytes(7, 3), "image/png").unwrap();
    assert_eq!((img.width, img.height), (7, 3));
    assert_eq!(img.max_dimension(), 7);
    assert_eq!(img.mime, "image/png");
}

#[test]
fn from_bytes_rejects_non_image_payloads() {
    let err = EncodedImage::from_bytes(b"not an image".to_vec(), "image/png").unwrap_err();
    assert!(matches!(err, TeeformError::ImageDecode(_)));
}

#[test]
fn data_url_round_trip_preserves_payload() {
    let img = EncodedImage::from_bytes(png_bytes(4, 2), "image/png").unwrap();
    let url = img.to_data_url();
    assert!(url.starts_with("data:image/png;base64,"));

    let back = EncodedImage::from_data_url(&url).unwrap();
    assert_eq!(back.bytes, img.bytes);
    assert_eq!(back.mime, "image/png");
    assert_eq!((back.width, back.height), (4, 2));
}

#[test]
fn percent_encoded_data_urls_decode() {
    let bytes = png_bytes(1, 1);
    let encoded: String = bytes.iter().map(|b| format!("%{b:02x}")).collect();
    let url = format!("data:image/png,{encoded}");
    let back = EncodedImage::from_data_url(&url).unwrap();
    assert_eq!(back.bytes.as_slice(), bytes.as_slice());
}

#[test]
fn malformed_data_urls_are_rejected() {
    for bad in [
        "image/png;base64,AAAA",
        "data:image/png;base64",
        "data:image/png;base64,@@@@",
        "data:image/png,%zz",
        "data:image/png,%a",
    ] {
        assert!(EncodedImage::from_data_url(bad).is_err(), "{bad}");
    }
}

#[test]
fn serde_form_is_the_data_url() {
    let img = EncodedImage::from_bytes(png_bytes(2, 2), "image/png").unwrap();
    let json = serde_json::to_string(&img).unwrap();
    assert!(json.starts_with("\"data:image/png;base64,"));

    let back: EncodedImage = serde_json::from_str(&json).unwrap();
    assert_eq!(back, img);
}
