//! Error types for pattern export.

use std::path::PathBuf;
use thiserror::Error;

pub type PatternResult<T> = Result<T, PatternError>;

/// Precondition failures. Any of these aborts the export before output is written.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("mesh has no faces")]
    EmptyMesh,

    #[error("face {face} has {uvs} UV coordinates for {vertices} vertices")]
    MissingUv {
        face: usize,
        vertices: usize,
        uvs: usize,
    },

    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidFaceVertex { face: usize, vertex: u32 },

    #[error("edge {edge} references invalid vertex index {vertex}")]
    InvalidEdgeVertex { edge: usize, vertex: u32 },

    #[error("face {face} is degenerate: {details}")]
    DegenerateFace { face: usize, details: String },

    #[error("invalid UV to world scale {scale}")]
    InvalidScale { scale: f32 },

    #[error("failed to read mesh from {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mesh from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
