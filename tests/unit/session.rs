use std::io::Cursor;

use super::*;
use crate::{
    assets::encoded::EncodedImage, design::transform::BlendMode, foundation::color::Rgb,
    foundation::error::TeeformError,
};

fn encoded(w: u32, h: u32, rgba: [u8; 4]) -> EncodedImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    EncodedImage::from_bytes(buf, "image/png").unwrap()
}

#[test]
fn appearance_tracks_commands() {
    let mut s = Session::new();
    assert!(!s.appearance().compositing.enabled);

    s.apply(DesignCommand::SetBaseColor(Rgb::new(1, 2, 3))).unwrap();
    assert_eq!(s.appearance().base_color, Rgb::new(1, 2, 3));

    s.apply(DesignCommand::SetTexture(encoded(2, 2, [9, 9, 9, 255]))).unwrap();
    assert!(s.appearance().compositing.enabled);
    assert!(s.texture().is_some());

    s.apply(DesignCommand::ClearTexture).unwrap();
    assert!(!s.appearance().compositing.enabled);
    assert!(s.texture().is_none());
}

#[test]
fn failed_texture_bind_keeps_last_good_state() {
    let mut s = Session::new();
    s.apply(DesignCommand::SetTexture(encoded(2, 2, [1, 2, 3, 255]))).unwrap();
    let before = *s.appearance();
    let before_tex = s.texture().unwrap().rgba8_premul.clone();

    let corrupt = EncodedImage {
        bytes: std::sync::Arc::new(b"corrupt".to_vec()),
        mime: "image/png".into(),
        width: 2,
        height: 2,
    };
    let err = s.apply(DesignCommand::SetTexture(corrupt)).unwrap_err();
    assert!(matches!(err, TeeformError::TextureDecode(_)));

    assert_eq!(*s.appearance(), before);
    assert_eq!(s.texture().unwrap().rgba8_premul, before_tex);
    // The session stays usable after the failure.
    s.apply(DesignCommand::SetBlendMode(BlendMode::Screen)).unwrap();
}

#[test]
fn stale_completion_is_dropped_when_it_arrives_first() {
    let mut s = Session::new();
    let a = s.begin_upload(vec![0; 4], "image/png".into());
    let b = s.begin_upload(vec![0; 4], "image/png".into());
    assert_eq!(s.pending_upload(), Some(b));

    // A finishes first; its result must be discarded.
    let dropped = s.finish_upload(UploadOutcome {
        id: a,
        result: Ok(encoded(2, 2, [1, 0, 0, 255])),
    });
    assert!(dropped.is_none());
    assert!(s.design().texture.source_image.is_none());

    let applied = s.finish_upload(UploadOutcome {
        id: b,
        result: Ok(encoded(4, 4, [0, 1, 0, 255])),
    });
    applied.unwrap().unwrap();
    let src = s.design().texture.source_image.as_ref().unwrap();
    assert_eq!((src.width, src.height), (4, 4));
}

#[test]
fn stale_completion_is_dropped_when_it_arrives_last() {
    let mut s = Session::new();
    let a = s.begin_upload(vec![0; 4], "image/png".into());
    let b = s.begin_upload(vec![0; 4], "image/png".into());

    let applied = s.finish_upload(UploadOutcome {
        id: b,
        result: Ok(encoded(4, 4, [0, 1, 0, 255])),
    });
    applied.unwrap().unwrap();
    assert_eq!(s.pending_upload(), None);

    let dropped = s.finish_upload(UploadOutcome {
        id: a,
        result: Ok(encoded(2, 2, [1, 0, 0, 255])),
    });
    assert!(dropped.is_none());

    let src = s.design().texture.source_image.as_ref().unwrap();
    assert_eq!((src.width, src.height), (4, 4));
}

#[test]
fn failed_upload_leaves_texture_state_untouched() {
    let mut s = Session::new();
    s.apply(DesignCommand::SetTexture(encoded(2, 2, [5, 5, 5, 255]))).unwrap();

    let id = s.begin_upload(vec![0; 4], "image/png".into());
    let res = s.finish_upload(UploadOutcome {
        id,
        result: Err(TeeformError::image_decode("boom")),
    });
    assert!(matches!(res, Some(Err(TeeformError::ImageDecode(_)))));

    let src = s.design().texture.source_image.as_ref().unwrap();
    assert_eq!((src.width, src.height), (2, 2));
    assert!(s.texture().is_some());
}

#[test]
fn frame_inputs_respect_auto_rotate() {
    let mut s = Session::new();
    let swaying = s.frame_inputs(5.2);
    assert_eq!(swaying.yaw_rad, s.sway().yaw_at(5.2));
    assert_ne!(swaying.yaw_rad, 0.0);

    s.apply(DesignCommand::SetAutoRotate(false)).unwrap();
    assert_eq!(s.frame_inputs(5.2).yaw_rad, 0.0);
}

#[test]
fn reset_clears_texture_and_appearance() {
    let mut s = Session::new();
    s.apply(DesignCommand::SetTexture(encoded(2, 2, [7, 7, 7, 255]))).unwrap();
    s.apply(DesignCommand::SetOpacity(0.4)).unwrap();

    s.apply(DesignCommand::Reset).unwrap();
    assert!(s.texture().is_none());
    assert!(!s.appearance().compositing.enabled);
    assert_eq!(s.design().texture.opacity, 1.0);
}
