use crate::foundation::error::{TeeformError, TeeformResult};

/// Straight (non-premultiplied) 8-bit RGB surface color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from individual channels.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque white, the default garment base color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Parse a `#rrggbb` hex string (the color-picker wire format).
    ///
    /// The leading `#` is required; shorthand `#rgb` is not accepted.
    pub fn from_hex(s: &str) -> TeeformResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| TeeformError::invalid_parameter(format!("color '{s}' must start with '#'")))?;
        // Byte length alone is not enough: multi-byte characters would put a
        // slice boundary inside a char. ASCII-only makes byte == char here.
        if !hex.is_ascii() || hex.len() != 6 {
            return Err(TeeformError::invalid_parameter(format!(
                "color '{s}' must be 6 hex digits"
            )));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| {
                TeeformError::invalid_parameter(format!("color '{s}' contains non-hex digits"))
            })
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    /// Format as a lowercase `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels normalized to `[0, 1]`, in RGB order.
    pub fn as_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::white()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
