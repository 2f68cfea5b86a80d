//! Foundation types shared across the crate.

/// Straight RGB color with hex parse/format.
pub mod color;
/// Crate-wide error taxonomy.
pub mod error;
