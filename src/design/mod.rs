//! The mutable design model and its single mutation entry point.

/// Design state and the command reducer.
pub mod state;
/// Text overlay data.
pub mod text;
/// Texture transform parameters and blend modes.
pub mod transform;
