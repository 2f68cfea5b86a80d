use kurbo::Vec2;

use crate::{
    assets::encoded::EncodedImage,
    design::text::{TextOverlay, TextSide},
    design::transform::{BlendMode, TextureTransform},
    foundation::color::Rgb,
    foundation::error::{TeeformError, TeeformResult},
};

/// Scale clamp range applied by the reducer. The appearance pipeline
/// additionally defends against non-positive values reaching it.
pub const SCALE_RANGE: std::ops::RangeInclusive<f64> = 0.05..=8.0;

/// Offset clamp range along each UV axis.
pub const OFFSET_RANGE: std::ops::RangeInclusive<f64> = -1.0..=1.0;

/// Text size clamp range.
pub const TEXT_SIZE_RANGE: std::ops::RangeInclusive<f64> = 0.02..=0.1;

/// The complete in-memory design state for one configurator session.
///
/// Serializable as JSON for export/debugging; the crate itself never
/// persists it — a new session starts from [`Design::default`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Design {
    /// Garment base color.
    pub base_color: Rgb,
    /// Active texture transform.
    pub texture: TextureTransform,
    /// Optional text overlay.
    pub text: TextOverlay,
    /// Whether the viewport idly sways the garment.
    pub auto_rotate: bool,
}

/// The single mutation entry point for [`Design`].
///
/// Every control interaction becomes one command; there is no other way to
/// mutate design state, which makes clamping and last-writer-wins rules
/// explicit and testable instead of implicit in UI re-render timing.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum DesignCommand {
    /// Set the garment base color.
    SetBaseColor(Rgb),
    /// Set the texture repeat factor (clamped into [`SCALE_RANGE`]).
    SetScale(Vec2),
    /// Set the UV offset (clamped into [`OFFSET_RANGE`] per axis).
    SetOffset(Vec2),
    /// Set the texture rotation in degrees (normalized into `[0, 360)`).
    SetRotation(f64),
    /// Set the texture opacity (clamped into `[0, 1]`).
    SetOpacity(f64),
    /// Set the blend mode.
    SetBlendMode(BlendMode),
    /// Replace the uploaded artwork.
    SetTexture(EncodedImage),
    /// Remove the uploaded artwork, reverting to base color only.
    ClearTexture,
    /// Set the front-side overlay text.
    SetFrontText(String),
    /// Set the back-side overlay text.
    SetBackText(String),
    /// Set the overlay text color.
    SetTextColor(Rgb),
    /// Set the overlay text size (clamped into [`TEXT_SIZE_RANGE`]).
    SetTextSize(f64),
    /// Select which side(s) carry the overlay text.
    SetTextSide(TextSide),
    /// Toggle idle viewport sway.
    SetAutoRotate(bool),
    /// Restore every field to its documented default, including removing
    /// the uploaded artwork.
    Reset,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            base_color: Rgb::white(),
            texture: TextureTransform::default(),
            text: TextOverlay::default(),
            auto_rotate: true,
        }
    }
}

impl Design {
    /// Create a fresh design with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command.
    ///
    /// Finite but out-of-range numeric input is clamped to the documented
    /// range. Non-finite input (and non-positive scale) is rejected with
    /// [`TeeformError::InvalidParameter`] without mutating any field.
    pub fn apply(&mut self, cmd: DesignCommand) -> TeeformResult<()> {
        match cmd {
            DesignCommand::SetBaseColor(c) => self.base_color = c,
            DesignCommand::SetScale(s) => {
                if !s.x.is_finite() || !s.y.is_finite() || s.x <= 0.0 || s.y <= 0.0 {
                    return Err(TeeformError::invalid_parameter(format!(
                        "scale ({}, {}) must be finite and > 0",
                        s.x, s.y
                    )));
                }
                self.texture.scale = Vec2::new(clamp_into(s.x, SCALE_RANGE), clamp_into(s.y, SCALE_RANGE));
            }
            DesignCommand::SetOffset(o) => {
                if !o.x.is_finite() || !o.y.is_finite() {
                    return Err(TeeformError::invalid_parameter("offset must be finite"));
                }
                self.texture.offset =
                    Vec2::new(clamp_into(o.x, OFFSET_RANGE), clamp_into(o.y, OFFSET_RANGE));
            }
            DesignCommand::SetRotation(deg) => {
                if !deg.is_finite() {
                    return Err(TeeformError::invalid_parameter("rotation must be finite"));
                }
                self.texture.rotation_degrees = deg.rem_euclid(360.0);
            }
            DesignCommand::SetOpacity(op) => {
                if !op.is_finite() {
                    return Err(TeeformError::invalid_parameter("opacity must be finite"));
                }
                self.texture.opacity = op.clamp(0.0, 1.0);
            }
            DesignCommand::SetBlendMode(mode) => self.texture.blend = mode,
            DesignCommand::SetTexture(img) => self.texture.source_image = Some(img),
            DesignCommand::ClearTexture => self.texture.source_image = None,
            DesignCommand::SetFrontText(t) => self.text.front = t,
            DesignCommand::SetBackText(t) => self.text.back = t,
            DesignCommand::SetTextColor(c) => self.text.color = c,
            DesignCommand::SetTextSize(size) => {
                if !size.is_finite() {
                    return Err(TeeformError::invalid_parameter("text size must be finite"));
                }
                self.text.size = clamp_into(size, TEXT_SIZE_RANGE);
            }
            DesignCommand::SetTextSide(side) => self.text.side = side,
            DesignCommand::SetAutoRotate(on) => self.auto_rotate = on,
            DesignCommand::Reset => *self = Self::new(),
        }
        Ok(())
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> TeeformResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TeeformError::invalid_parameter(format!("serialize design: {e}")))
    }

    /// Deserialize from a JSON string produced by [`Design::to_json`].
    pub fn from_json(s: &str) -> TeeformResult<Self> {
        let mut design: Self = serde_json::from_str(s)
            .map_err(|e| TeeformError::invalid_parameter(format!("parse design: {e}")))?;
        design.texture.validate()?;
        // Hand-edited JSON bypasses the reducer, so re-apply its clamps.
        if !design.text.size.is_finite() {
            return Err(TeeformError::invalid_parameter("text size must be finite"));
        }
        design.text.size = clamp_into(design.text.size, TEXT_SIZE_RANGE);
        Ok(design)
    }
}

fn clamp_into(v: f64, range: std::ops::RangeInclusive<f64>) -> f64 {
    let clamped = v.clamp(*range.start(), *range.end());
    if clamped != v {
        tracing::warn!(input = v, output = clamped, "clamped out-of-range parameter");
    }
    clamped
}

#[cfg(test)]
#[path = "../../tests/unit/design/state.rs"]
mod tests;
