use crate::foundation::color::Rgb;

/// Which side(s) of the garment carry the text overlay.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub enum TextSide {
    /// Front only.
    #[default]
    Front,
    /// Back only.
    Back,
    /// Both sides.
    Both,
}

/// Optional text overlay printed on the garment.
///
/// Pure data handed to the external renderer; this crate performs no text
/// layout or rasterization. An empty string on a side means no text there.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextOverlay {
    /// Front-side text.
    pub front: String,
    /// Back-side text.
    pub back: String,
    /// Text color.
    pub color: Rgb,
    /// Glyph height as a fraction of garment height, in `[0.02, 0.1]`.
    pub size: f64,
    /// Side selection.
    pub side: TextSide,
}

impl Default for TextOverlay {
    fn default() -> Self {
        Self {
            front: String::new(),
            back: String::new(),
            color: Rgb::new(0, 0, 0),
            size: 0.05,
            side: TextSide::Front,
        }
    }
}

impl TextOverlay {
    /// True when neither side has any text.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}
