//! Sewing patterns from UV-unwrapped meshes.
//!
//! Each UV island becomes a pattern piece. Its outline is rebuilt from the island boundary,
//! loose wire edges attached to the outline become numbered, coloured alignment guides,
//! and the result is drawn as an SVG document sized in millimetres.

pub mod config;
pub mod context;
pub mod error;
pub mod pattern;
pub mod util_3d;
pub mod vector_export;

#[cfg(test)]
mod svg_tests;

pub use config::{AlignmentMarkers, ExportOptions};
pub use error::{PatternError, PatternResult};
pub use vector_export::{export_svg_file, generate_svg};
