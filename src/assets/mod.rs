//! Upload handling: encoded image payloads, the normalizer, and the async
//! upload worker.

/// Self-contained encoded image payloads and the data-URL codec.
pub mod encoded;
/// The upload image normalizer.
pub mod normalize;
/// Async normalization worker with supersession ids.
pub mod upload;
