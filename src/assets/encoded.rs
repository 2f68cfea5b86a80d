use std::{io::Cursor, sync::Arc};

use base64::{Engine as _, engine::general_purpose};

use crate::foundation::error::{TeeformError, TeeformResult};

/// A self-contained encoded image payload: bytes plus MIME type, with known
/// pixel dimensions, embeddable directly as a texture source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded image bytes (PNG/JPEG/...).
    pub bytes: Arc<Vec<u8>>,
    /// MIME type of `bytes`.
    pub mime: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

impl EncodedImage {
    /// Wrap encoded bytes, probing pixel dimensions from the header.
    ///
    /// Only the header is inspected; no full decode happens here. Bytes
    /// that are not a decodable image format fail with
    /// [`TeeformError::ImageDecode`].
    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> TeeformResult<Self> {
        let reader = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| TeeformError::image_decode(format!("probe image format: {e}")))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| TeeformError::image_decode(format!("probe image dimensions: {e}")))?;
        Ok(Self {
            bytes: Arc::new(bytes),
            mime: mime.into(),
            width,
            height,
        })
    }

    /// Encode as a `data:<mime>;base64,<payload>` URL.
    pub fn to_data_url(&self) -> String {
        let b64 = general_purpose::STANDARD.encode(self.bytes.as_slice());
        format!("data:{};base64,{}", self.mime, b64)
    }

    /// Parse a data URL. Both base64 and percent-encoded payloads are
    /// accepted; some producers use URL-safe base64, so both alphabets are
    /// tried.
    pub fn from_data_url(data_url: &str) -> TeeformResult<Self> {
        let s = data_url.trim();
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| TeeformError::image_decode("not a data URL"))?;
        let (meta, data) = rest
            .split_once(',')
            .ok_or_else(|| TeeformError::image_decode("invalid data URL: missing comma"))?;

        let mime = meta
            .split(';')
            .next()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("application/octet-stream")
            .trim()
            .to_string();

        let is_base64 = meta
            .split(';')
            .any(|t| t.trim().eq_ignore_ascii_case("base64"));

        let bytes = if is_base64 {
            general_purpose::STANDARD
                .decode(data.trim())
                .or_else(|_| general_purpose::URL_SAFE.decode(data.trim()))
                .map_err(|e| TeeformError::image_decode(format!("invalid base64 in data URL: {e}")))?
        } else {
            percent_decode_to_bytes(data)?
        };

        Self::from_bytes(bytes, mime)
    }

    /// Longest edge in pixels.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}

// Serialized form is the data URL itself: self-contained and directly
// embeddable by consumers.
impl serde::Serialize for EncodedImage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> serde::Deserialize<'de> for EncodedImage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_data_url(&s).map_err(serde::de::Error::custom)
    }
}

// Strict percent-decoder for data URLs with non-base64 payloads; invalid
// percent sequences error.
fn percent_decode_to_bytes(s: &str) -> TeeformResult<Vec<u8>> {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(TeeformError::image_decode(
                        "invalid percent-encoding: truncated",
                    ));
                }
                let hex = |b: u8| -> Option<u8> {
                    match b {
                        b'0'..=b'9' => Some(b - b'0'),
                        b'a'..=b'f' => Some(b - b'a' + 10),
                        b'A'..=b'F' => Some(b - b'A' + 10),
                        _ => None,
                    }
                };
                let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) else {
                    return Err(TeeformError::image_decode("invalid percent-encoding"));
                };
                out.push((hi << 4) | lo);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encoded.rs"]
mod tests;
