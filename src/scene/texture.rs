use std::sync::Arc;

use crate::{
    assets::encoded::EncodedImage,
    foundation::error::{TeeformError, TeeformResult},
};

/// Texture addressing mode outside the `[0, 1]` UV range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WrapMode {
    /// Tile the image. Required so repeat factors above 1 tile the artwork
    /// instead of clamping to its edges.
    #[default]
    Repeat,
    /// Clamp to the edge texel.
    ClampToEdge,
}

/// A decoded texture ready for the renderer boundary.
#[derive(Clone, Debug)]
pub struct BoundTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
    /// Addressing mode, on both axes.
    pub wrap: WrapMode,
    /// Whether the renderer should flip the vertical axis at sample time.
    /// Always `false`: the texture origin already matches the mesh's baked
    /// UV origin, and a mismatch here shows up as upside-down or mirrored
    /// artwork.
    pub flip_y: bool,
}

/// Decode an encoded payload into a renderer-ready texture.
///
/// Undecodable bytes fail with [`TeeformError::TextureDecode`]; the caller
/// keeps its previous texture and appearance in effect rather than
/// disturbing the render loop.
pub fn bind_texture(img: &EncodedImage) -> TeeformResult<BoundTexture> {
    let dyn_img = image::load_from_memory(&img.bytes)
        .map_err(|e| TeeformError::texture_decode(format!("decode texture source: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(BoundTexture {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
        wrap: WrapMode::Repeat,
        flip_y: false,
    })
}

// Rounding division; alpha 0 zeroes the color channels on its own.
fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/texture.rs"]
mod tests;
