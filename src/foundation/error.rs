/// Convenience result type used across Teeform.
pub type TeeformResult<T> = Result<T, TeeformError>;

/// Top-level error taxonomy used by configurator APIs.
///
/// No variant is fatal to a session: callers recover by clamping/defaulting
/// (`InvalidParameter`), rejecting the offending upload
/// (`UnsupportedFileType`, `ImageDecode`), or keeping the last-good
/// appearance in effect (`TextureDecode`).
#[derive(thiserror::Error, Debug)]
pub enum TeeformError {
    /// Out-of-range or unsupported parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Upload whose declared MIME type is not an image; rejected before any
    /// decode work.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Malformed image data encountered while normalizing an upload.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// Malformed image data encountered while binding a texture.
    #[error("texture decode error: {0}")]
    TextureDecode(String),

    /// Snapshot export or share delivery failure.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TeeformError {
    /// Build a [`TeeformError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`TeeformError::UnsupportedFileType`] value.
    pub fn unsupported_file_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedFileType(msg.into())
    }

    /// Build a [`TeeformError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`TeeformError::TextureDecode`] value.
    pub fn texture_decode(msg: impl Into<String>) -> Self {
        Self::TextureDecode(msg.into())
    }

    /// Build a [`TeeformError::Snapshot`] value.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
