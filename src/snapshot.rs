use std::io::Cursor;

use crate::foundation::error::{TeeformError, TeeformResult};

/// Default file name attached to exported/shared snapshots.
pub const SNAPSHOT_FILE_NAME: &str = "custom-garment.png";

/// A rendered frame read back from the renderer: straight-alpha RGBA8,
/// row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba8 {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes; length must equal `width * height * 4`.
    pub rgba8: Vec<u8>,
}

impl FrameRgba8 {
    /// Validate the buffer length against the declared dimensions.
    pub fn validate(&self) -> TeeformResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba8.len() != expected {
            return Err(TeeformError::snapshot(format!(
                "frame buffer is {} bytes, expected {expected} for {}x{}",
                self.rgba8.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Encode a frame readback as a downloadable PNG artifact.
///
/// A pure read of renderer output; failures are non-fatal to the session
/// and surfaced as a dismissible notice by callers.
pub fn encode_snapshot_png(frame: &FrameRgba8) -> TeeformResult<Vec<u8>> {
    frame.validate()?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba8.clone())
        .ok_or_else(|| TeeformError::snapshot("frame buffer does not match dimensions"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| TeeformError::snapshot(format!("encode snapshot png: {e}")))?;
    Ok(out)
}

/// Snapshot artifact handed to a platform share mechanism.
#[derive(Clone, Copy, Debug)]
pub struct SharePayload<'a> {
    /// Share sheet title.
    pub title: &'a str,
    /// Share sheet body text.
    pub text: &'a str,
    /// Suggested file name.
    pub file_name: &'a str,
    /// Encoded PNG bytes.
    pub png: &'a [u8],
}

/// Platform share mechanism behind the share boundary.
///
/// Absence of the mechanism is a capability, not an error: callers probe
/// [`ShareSink::is_available`] and silently skip when it returns false.
pub trait ShareSink {
    /// Whether the platform can share files at all.
    fn is_available(&self) -> bool;

    /// Deliver the payload to the platform share surface.
    fn share(&self, payload: &SharePayload<'_>) -> TeeformResult<()>;
}

/// Encode `frame` and hand it to `sink` when the capability exists.
///
/// Returns `Ok(false)` when the sink is unavailable (silently skipped),
/// `Ok(true)` on delivery. Sink failures are logged and surfaced as
/// [`TeeformError::Snapshot`]; they never poison session state.
pub fn share_snapshot(
    sink: &dyn ShareSink,
    frame: &FrameRgba8,
    title: &str,
    text: &str,
) -> TeeformResult<bool> {
    if !sink.is_available() {
        tracing::info!("share capability unavailable, skipping");
        return Ok(false);
    }
    let png = encode_snapshot_png(frame)?;
    let payload = SharePayload {
        title,
        text,
        file_name: SNAPSHOT_FILE_NAME,
        png: &png,
    };
    sink.share(&payload).map_err(|e| {
        tracing::warn!(error = %e, "share delivery failed");
        TeeformError::snapshot(format!("share delivery failed: {e}"))
    })?;
    Ok(true)
}

#[cfg(test)]
#[path = "../tests/unit/snapshot.rs"]
mod tests;
