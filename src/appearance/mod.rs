//! The texture-transform and material-compositing pipeline.
//!
//! Turns the current transform parameters into the sampling/compositing
//! state applied to the garment surface each frame.

/// Pure appearance computation and its output types.
pub mod pipeline;
