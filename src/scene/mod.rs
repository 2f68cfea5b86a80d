//! Renderer-facing scene pieces: texture binding and idle motion.

/// Pure idle-sway yaw function.
pub mod motion;
/// Decoding encoded payloads into renderer-ready textures.
pub mod texture;
