use crate::{
    appearance::pipeline::{GarmentAppearance, compose},
    assets::normalize::NormalizeOpts,
    assets::upload::{UploadId, UploadOutcome, Uploader},
    design::state::{Design, DesignCommand},
    design::text::TextOverlay,
    foundation::error::TeeformResult,
    scene::motion::IdleSway,
    scene::texture::{BoundTexture, bind_texture},
    snapshot::{self, FrameRgba8, ShareSink},
};

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameInputs {
    /// Derived surface appearance.
    pub appearance: GarmentAppearance,
    /// Garment yaw for this instant (idle sway, or `0` when disabled).
    pub yaw_rad: f64,
    /// Bound texture matching `appearance.compositing.enabled`.
    pub texture: Option<BoundTexture>,
    /// Text overlay to draw on the garment.
    pub text: TextOverlay,
}

/// The parent controller for one configurator session.
///
/// Owns the single mutable [`Design`], the async [`Uploader`] with its one
/// pending-upload slot, and the last-good appearance/texture pair. All
/// mutation funnels through [`Session::apply`] on one logical thread; the
/// only suspension point is upload normalization, whose completions arrive
/// as discrete events through [`Session::poll_uploads`].
#[derive(Debug)]
pub struct Session {
    design: Design,
    uploader: Uploader,
    pending_upload: Option<UploadId>,
    sway: IdleSway,
    appearance: GarmentAppearance,
    texture: Option<BoundTexture>,
}

impl Session {
    /// Start a session with default normalization bounds.
    pub fn new() -> Self {
        Self::with_opts(NormalizeOpts::default())
    }

    /// Start a session with explicit normalization bounds.
    pub fn with_opts(opts: NormalizeOpts) -> Self {
        let design = Design::new();
        let appearance = compose(design.base_color, &design.texture);
        Self {
            design,
            uploader: Uploader::new(opts),
            pending_upload: None,
            sway: IdleSway::default(),
            appearance,
            texture: None,
        }
    }

    /// Current design state.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Appearance for the current frame (last-good on texture failures).
    pub fn appearance(&self) -> &GarmentAppearance {
        &self.appearance
    }

    /// Currently bound texture, if any.
    pub fn texture(&self) -> Option<&BoundTexture> {
        self.texture.as_ref()
    }

    /// Id of the upload whose completion will be accepted, if one is in
    /// flight.
    pub fn pending_upload(&self) -> Option<UploadId> {
        self.pending_upload
    }

    /// Idle-sway parameters.
    pub fn sway(&self) -> IdleSway {
        self.sway
    }

    /// Replace the idle-sway parameters.
    pub fn set_sway(&mut self, sway: IdleSway) {
        self.sway = sway;
    }

    /// Apply one design command and recompute the appearance.
    ///
    /// A `SetTexture` whose payload cannot be decoded is rejected with
    /// [`crate::TeeformError::TextureDecode`] and the previous appearance
    /// and texture stay in effect; no command failure disturbs the render
    /// loop.
    #[tracing::instrument(skip(self, cmd))]
    pub fn apply(&mut self, cmd: DesignCommand) -> TeeformResult<()> {
        match cmd {
            DesignCommand::SetTexture(img) => {
                // Bind before mutating so a decode failure leaves the
                // previous valid state untouched.
                let bound = bind_texture(&img)?;
                self.design.apply(DesignCommand::SetTexture(img))?;
                self.texture = Some(bound);
            }
            DesignCommand::ClearTexture => {
                self.design.apply(DesignCommand::ClearTexture)?;
                self.texture = None;
            }
            DesignCommand::Reset => {
                self.design.apply(DesignCommand::Reset)?;
                self.texture = None;
            }
            other => self.design.apply(other)?,
        }
        self.appearance = compose(self.design.base_color, &self.design.texture);
        Ok(())
    }

    /// Route a selected file (picker or drag-and-drop alike) into the
    /// normalizer, superseding any upload still in flight.
    #[tracing::instrument(skip(self, bytes))]
    pub fn begin_upload(&mut self, bytes: Vec<u8>, declared_mime: String) -> UploadId {
        let id = self.uploader.submit(bytes, declared_mime);
        self.pending_upload = Some(id);
        id
    }

    /// Drain upload completions, applying the current one if it arrived.
    ///
    /// Stale completions (superseded by a later [`Session::begin_upload`])
    /// are dropped. Returns `None` when nothing relevant completed yet,
    /// `Some(Ok(()))` when the pending upload became the active texture,
    /// and `Some(Err(_))` when it failed — in which case all texture state
    /// is left untouched.
    pub fn poll_uploads(&mut self) -> Option<TeeformResult<()>> {
        while let Some(outcome) = self.uploader.try_recv() {
            if let Some(res) = self.finish_upload(outcome) {
                return Some(res);
            }
        }
        None
    }

    pub(crate) fn finish_upload(&mut self, outcome: UploadOutcome) -> Option<TeeformResult<()>> {
        if self.pending_upload != Some(outcome.id) {
            tracing::debug!(id = outcome.id.0, "dropping stale upload completion");
            return None;
        }
        self.pending_upload = None;
        match outcome.result {
            Ok(img) => Some(self.apply(DesignCommand::SetTexture(img))),
            Err(e) => Some(Err(e)),
        }
    }

    /// Per-tick inputs for the renderer.
    pub fn frame_inputs(&self, t_secs: f64) -> FrameInputs {
        let yaw_rad = if self.design.auto_rotate {
            self.sway.yaw_at(t_secs)
        } else {
            0.0
        };
        FrameInputs {
            appearance: self.appearance,
            yaw_rad,
            texture: self.texture.clone(),
            text: self.design.text.clone(),
        }
    }

    /// Encode a renderer readback as a downloadable PNG.
    pub fn snapshot(&self, frame: &FrameRgba8) -> TeeformResult<Vec<u8>> {
        snapshot::encode_snapshot_png(frame)
    }

    /// Share a renderer readback through the platform share surface.
    ///
    /// Returns `Ok(false)` when the capability is absent (silently
    /// skipped).
    pub fn share(
        &self,
        frame: &FrameRgba8,
        sink: &dyn ShareSink,
        title: &str,
        text: &str,
    ) -> TeeformResult<bool> {
        snapshot::share_snapshot(sink, frame, title, text)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
