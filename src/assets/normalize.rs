use std::io::Cursor;

use image::{DynamicImage, ImageFormat, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::{
    assets::encoded::EncodedImage,
    foundation::error::{TeeformError, TeeformResult},
};

/// Normalization bounds applied to every upload.
#[derive(Clone, Copy, Debug)]
pub struct NormalizeOpts {
    /// Longest-edge bound in pixels for the output image.
    pub max_dimension: u32,
    /// JPEG quality used when re-encoding opaque sources.
    pub jpeg_quality: u8,
}

impl Default for NormalizeOpts {
    fn default() -> Self {
        Self {
            max_dimension: 1024,
            jpeg_quality: 85,
        }
    }
}

/// Normalize a user-selected file into a bounded-size texture source.
///
/// This is the single place responsible for bounding the memory/GPU cost of
/// user-supplied images; every upload path (file picker and drag-and-drop
/// alike) must funnel through it.
///
/// - `declared_mime` must be an `image/*` type, checked before any decode
///   work ([`TeeformError::UnsupportedFileType`] otherwise).
/// - Corrupt data fails with [`TeeformError::ImageDecode`]; no existing
///   texture state is touched (the function is pure).
/// - Images already within the bound pass through byte-identical.
/// - Larger images are resampled uniformly (bilinear, aspect preserved to
///   within a pixel of rounding) so the longest edge equals the bound, then
///   re-encoded: PNG when the source carries non-opaque alpha, JPEG at the
///   fixed quality otherwise.
pub fn normalize_image(
    bytes: &[u8],
    declared_mime: &str,
    opts: &NormalizeOpts,
) -> TeeformResult<EncodedImage> {
    let mime = declared_mime.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(TeeformError::unsupported_file_type(format!(
            "'{declared_mime}' is not an image type"
        )));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| TeeformError::image_decode(format!("decode upload: {e}")))?;
    let (width, height) = (img.width(), img.height());

    let limit = opts.max_dimension.max(1);
    if width.max(height) <= limit {
        return EncodedImage::from_bytes(bytes.to_vec(), mime);
    }

    let scale = f64::from(limit) / f64::from(width.max(height));
    let out_w = ((f64::from(width) * scale).floor() as u32).max(1);
    let out_h = ((f64::from(height) * scale).floor() as u32).max(1);
    tracing::debug!(width, height, out_w, out_h, "downscaling oversized upload");

    let resized = img.resize_exact(out_w, out_h, FilterType::Triangle);

    let mut out = Vec::new();
    if has_translucency(&resized) {
        resized
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| TeeformError::image_decode(format!("re-encode upload as png: {e}")))?;
        EncodedImage::from_bytes(out, "image/png")
    } else {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, opts.jpeg_quality);
        encoder
            .encode_image(&resized.to_rgb8())
            .map_err(|e| TeeformError::image_decode(format!("re-encode upload as jpeg: {e}")))?;
        EncodedImage::from_bytes(out, "image/jpeg")
    }
}

fn has_translucency(img: &DynamicImage) -> bool {
    img.color().has_alpha() && img.to_rgba8().pixels().any(|p| p.0[3] < 255)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/normalize.rs"]
mod tests;
