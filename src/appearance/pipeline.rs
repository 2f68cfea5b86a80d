use kurbo::{Point, Vec2};

use crate::{design::transform::{BlendMode, TextureTransform}, foundation::color::Rgb};

/// Blend factor constants understood by the renderer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlendFactor {
    /// Factor 0.
    Zero,
    /// Factor 1.
    One,
    /// Source alpha.
    SourceAlpha,
    /// 1 - source alpha.
    OneMinusSourceAlpha,
    /// 1 - destination color.
    OneMinusDestinationColor,
    /// Destination color.
    DestinationColor,
}

/// Blend equation combining the factored source and destination terms.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum BlendEquation {
    /// `src * srcFactor + dst * dstFactor`.
    #[default]
    Add,
}

/// Texture sampling configuration consumed by the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextureSampling {
    /// Repeat factor per UV axis. Values > 1 tile the artwork.
    pub repeat: Vec2,
    /// UV-space translation.
    pub offset: Vec2,
    /// Rotation in radians.
    pub rotation_rad: f64,
    /// Rotation pivot. Always the texture's own center `(0.5, 0.5)` so
    /// rotation does not also translate the artwork.
    pub center: Point,
}

/// Material compositing settings consumed by the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Compositing {
    /// Whether custom blending is active. Invariant: equal to
    /// `source_image.is_some()` on the transform that produced this value.
    pub enabled: bool,
    /// Texture opacity in `[0, 1]`.
    pub opacity: f64,
    /// Source blend factor.
    pub src: BlendFactor,
    /// Destination blend factor.
    pub dst: BlendFactor,
    /// Blend equation.
    pub equation: BlendEquation,
}

impl Compositing {
    /// Neutral compositing for a garment with no texture: opaque, no
    /// blending.
    pub fn opaque() -> Self {
        Self {
            enabled: false,
            opacity: 1.0,
            src: BlendFactor::One,
            dst: BlendFactor::Zero,
            equation: BlendEquation::Add,
        }
    }
}

/// The derived per-frame appearance of the garment surface.
///
/// Recomputed from the current [`TextureTransform`] and base color whenever
/// either changes; the renderer consumes it read-only.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GarmentAppearance {
    /// Garment base color.
    pub base_color: Rgb,
    /// Texture sampling state.
    pub sampling: TextureSampling,
    /// Material compositing state.
    pub compositing: Compositing,
}

/// Destination blend factor for a mode, paired with `src = SourceAlpha`
/// and `equation = Add`. All five mappings are distinct.
pub fn destination_factor(mode: BlendMode) -> BlendFactor {
    match mode {
        BlendMode::Normal => BlendFactor::OneMinusSourceAlpha,
        BlendMode::Multiply => BlendFactor::SourceAlpha,
        BlendMode::Screen => BlendFactor::OneMinusDestinationColor,
        BlendMode::Overlay => BlendFactor::One,
        BlendMode::SoftLight => BlendFactor::DestinationColor,
    }
}

/// Compute the appearance for the current frame.
///
/// Pure function of its inputs: no hidden state, no IO, no GPU work. Any
/// resource upload/teardown triggered by appearance changes belongs to the
/// renderer.
///
/// Out-of-contract inputs never panic or produce degenerate sampling:
/// non-positive or non-finite scale components are treated as `1` (they are
/// a caller bug; the reducer rejects them upstream), rotation is taken
/// modulo 360 before conversion to radians, and opacity is clamped to
/// `[0, 1]`.
pub fn compose(base_color: Rgb, tx: &TextureTransform) -> GarmentAppearance {
    let sampling = TextureSampling {
        repeat: Vec2::new(sane_scale(tx.scale.x), sane_scale(tx.scale.y)),
        offset: tx.offset,
        rotation_rad: tx.rotation_degrees.rem_euclid(360.0).to_radians(),
        center: Point::new(0.5, 0.5),
    };

    let compositing = if tx.source_image.is_some() {
        Compositing {
            enabled: true,
            opacity: sane_opacity(tx.opacity),
            src: BlendFactor::SourceAlpha,
            dst: destination_factor(tx.blend),
            equation: BlendEquation::Add,
        }
    } else {
        Compositing::opaque()
    };

    GarmentAppearance {
        base_color,
        sampling,
        compositing,
    }
}

fn sane_scale(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 1.0 }
}

fn sane_opacity(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/appearance/pipeline.rs"]
mod tests;
