use std::sync::mpsc;

use crate::{
    assets::encoded::EncodedImage,
    assets::normalize::{NormalizeOpts, normalize_image},
    foundation::error::TeeformResult,
};

/// Monotonically increasing identifier for one upload submission.
///
/// Later submissions have strictly larger ids; consumers keep only the id of
/// their most recent submission and drop any completion that does not match,
/// which is the entire supersession discipline — no cancellation token is
/// needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadId(pub u64);

/// Completion event for one upload submission.
#[derive(Debug)]
pub struct UploadOutcome {
    /// Id returned by the [`Uploader::submit`] call this completes.
    pub id: UploadId,
    /// Normalized image, or the normalization failure.
    pub result: TeeformResult<EncodedImage>,
}

/// Runs the upload image normalizer off the interaction thread.
///
/// Each submission spawns a worker that decodes/resamples/encodes and then
/// delivers an [`UploadOutcome`] over an internal channel; completions are
/// collected with [`Uploader::try_recv`]. Large uploads therefore never
/// stall the caller, and two in-flight normalizations can never race into
/// inconsistent final state as long as the consumer honors the id
/// discipline.
#[derive(Debug)]
pub struct Uploader {
    opts: NormalizeOpts,
    next_id: u64,
    tx: mpsc::Sender<UploadOutcome>,
    rx: mpsc::Receiver<UploadOutcome>,
}

impl Uploader {
    /// Create an uploader with the given normalization bounds.
    pub fn new(opts: NormalizeOpts) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            opts,
            next_id: 0,
            tx,
            rx,
        }
    }

    /// Submit raw file bytes with their declared MIME type.
    ///
    /// Returns immediately with the id that will tag the completion.
    pub fn submit(&mut self, bytes: Vec<u8>, declared_mime: String) -> UploadId {
        self.next_id += 1;
        let id = UploadId(self.next_id);
        let tx = self.tx.clone();
        let opts = self.opts;
        tracing::debug!(id = id.0, len = bytes.len(), mime = %declared_mime, "upload submitted");
        std::thread::spawn(move || {
            let result = normalize_image(&bytes, &declared_mime, &opts);
            // Receiver may be gone if the session was dropped.
            let _ = tx.send(UploadOutcome { id, result });
        });
        id
    }

    /// Pop one completed outcome, if any, without blocking.
    pub fn try_recv(&self) -> Option<UploadOutcome> {
        self.rx.try_recv().ok()
    }

    /// Id that the next call to [`Uploader::submit`] will return.
    pub fn peek_next_id(&self) -> UploadId {
        UploadId(self.next_id + 1)
    }
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new(NormalizeOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/upload.rs"]
mod tests;
