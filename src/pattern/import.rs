use std::path::Path;

use super::model::{MeshDocument, Model};
use crate::error::{PatternError, PatternResult};

/// Loads a JSON mesh document and builds its topology.
pub fn import_model_file(path: &Path) -> PatternResult<Model> {
    let text = std::fs::read_to_string(path).map_err(|source| PatternError::IoRead {
        path: path.to_owned(),
        source,
    })?;
    let mut doc: MeshDocument = serde_json::from_str(&text).map_err(|source| PatternError::Parse {
        path: path.to_owned(),
        source,
    })?;
    if doc.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            doc.name = stem.to_string_lossy().into_owned();
        }
    }
    log::debug!(
        "read {}: {} vertices, {} faces, {} flagged edges",
        path.display(),
        doc.vertices.len(),
        doc.faces.len(),
        doc.edges.len()
    );
    Model::from_document(doc)
}
