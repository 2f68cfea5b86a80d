//! Teeform is the core of an interactive garment configurator.
//!
//! A user adjusts color, uploaded image texture (placement, scale, rotation,
//! opacity, blend mode) and optional text overlays on a 3D garment model;
//! Teeform owns the state and the algorithmic pieces, while scene graph,
//! camera controls and rasterization stay with an external renderer.
//!
//! # Pipeline overview
//!
//! 1. **Mutate**: control interactions become [`DesignCommand`] values
//!    applied to the single [`Design`] through [`Session::apply`]
//! 2. **Normalize**: file selections run through the upload image
//!    normalizer off-thread ([`Session::begin_upload`] /
//!    [`Session::poll_uploads`]), bounded in size and superseded
//!    last-writer-wins
//! 3. **Compose**: `Design -> GarmentAppearance` via the pure [`compose`]
//!    pipeline, recomputed whenever inputs change
//! 4. **Render**: the external renderer consumes [`FrameInputs`] each tick;
//!    snapshots read its output back as PNG ([`encode_snapshot_png`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure appearance pipeline**: composing an appearance has no hidden
//!   state and no IO; decode work is front-loaded at upload/bind time.
//! - **One mutation entry point**: all state changes flow through the
//!   command reducer, making clamping and stale-upload rules testable.
//! - **Nothing persisted**: a session's state is in-memory only.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod appearance;
mod assets;
mod design;
mod foundation;
mod scene;
mod session;
mod snapshot;

pub use appearance::pipeline::{
    BlendEquation, BlendFactor, Compositing, GarmentAppearance, TextureSampling, compose,
    destination_factor,
};
pub use assets::encoded::EncodedImage;
pub use assets::normalize::{NormalizeOpts, normalize_image};
pub use assets::upload::{UploadId, UploadOutcome, Uploader};
pub use design::state::{
    Design, DesignCommand, OFFSET_RANGE, SCALE_RANGE, TEXT_SIZE_RANGE,
};
pub use design::text::{TextOverlay, TextSide};
pub use design::transform::{BlendMode, TextureTransform};
pub use foundation::color::Rgb;
pub use foundation::error::{TeeformError, TeeformResult};
pub use scene::motion::IdleSway;
pub use scene::texture::{BoundTexture, WrapMode, bind_texture};
pub use session::{FrameInputs, Session};
pub use snapshot::{
    FrameRgba8, SNAPSHOT_FILE_NAME, SharePayload, ShareSink, encode_snapshot_png, share_snapshot,
};
