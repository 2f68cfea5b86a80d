use std::str::FromStr;

use kurbo::Vec2;

use crate::{
    assets::encoded::EncodedImage,
    foundation::error::{TeeformError, TeeformResult},
};

/// The full set of user-adjustable texture parameters.
///
/// Exactly one instance is active at a time, owned by the [`crate::Design`].
/// It is mutated only through [`crate::DesignCommand`], recomputed into a
/// [`crate::GarmentAppearance`] by [`crate::compose`] whenever it changes,
/// and never persisted across sessions.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextureTransform {
    /// Repeat factor along each UV axis; both components strictly positive.
    pub scale: Vec2,
    /// UV-space translation, each axis in `[-1, 1]`.
    pub offset: Vec2,
    /// Rotation about the texture's UV center, stored in `[0, 360)`.
    pub rotation_degrees: f64,
    /// Texture opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blend mode applied when compositing the texture over the base color.
    pub blend: BlendMode,
    /// Uploaded artwork; `None` means the garment shows its base color only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<EncodedImage>,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            offset: Vec2::ZERO,
            rotation_degrees: 0.0,
            opacity: 1.0,
            blend: BlendMode::Normal,
            source_image: None,
        }
    }
}

impl TextureTransform {
    /// Validate transform invariants.
    pub fn validate(&self) -> TeeformResult<()> {
        for (name, v) in [("scale.x", self.scale.x), ("scale.y", self.scale.y)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(TeeformError::invalid_parameter(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [("offset.x", self.offset.x), ("offset.y", self.offset.y)] {
            if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
                return Err(TeeformError::invalid_parameter(format!(
                    "{name} must be finite and within [-1, 1]"
                )));
            }
        }
        if !self.rotation_degrees.is_finite() || !(0.0..360.0).contains(&self.rotation_degrees) {
            return Err(TeeformError::invalid_parameter(
                "rotation_degrees must be finite and within [0, 360)",
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(TeeformError::invalid_parameter(
                "opacity must be finite and within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Blend mode combining the texture's color with the underlying surface.
///
/// The arithmetic meaning of each mode (source/destination blend factors) is
/// defined by the appearance pipeline; see [`crate::destination_factor`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum BlendMode {
    /// Standard source-over-destination.
    #[default]
    Normal,
    /// Darkening multiply.
    Multiply,
    /// Lightening screen.
    Screen,
    /// High-contrast overlay.
    Overlay,
    /// Subtle soft-light.
    SoftLight,
}

impl BlendMode {
    /// All supported modes, in UI presentation order.
    pub const ALL: [BlendMode; 5] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::SoftLight,
    ];

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "Normal",
            BlendMode::Multiply => "Multiply",
            BlendMode::Screen => "Screen",
            BlendMode::Overlay => "Overlay",
            BlendMode::SoftLight => "Soft Light",
        }
    }
}

impl FromStr for BlendMode {
    type Err = TeeformError;

    /// Parse a mode name case-insensitively. Unrecognized names fail with
    /// [`TeeformError::InvalidParameter`]; callers fall back to
    /// [`BlendMode::Normal`].
    fn from_str(s: &str) -> TeeformResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(BlendMode::Normal),
            "multiply" => Ok(BlendMode::Multiply),
            "screen" => Ok(BlendMode::Screen),
            "overlay" => Ok(BlendMode::Overlay),
            "soft light" | "soft-light" | "softlight" => Ok(BlendMode::SoftLight),
            other => Err(TeeformError::invalid_parameter(format!(
                "unknown blend mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/transform.rs"]
mod tests;
