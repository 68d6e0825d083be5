use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pattern::DEFAULT_PASS_LIMIT;

/// Which wire edges become alignment markers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMarkers {
    /// No alignment markers.
    Off,
    /// Wire edges flagged as seam.
    Seam,
    /// Flagged wire edges plus those found at outline corners.
    #[default]
    Auto,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub alignment_markers: AlignmentMarkers,
    pub alignment_numbers: bool,
    pub alignment_number_font_size: f32,
    pub show_piece_ids: bool,
    pub piece_id_font_size: f32,
    pub layout_pass_limit: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            alignment_markers: AlignmentMarkers::Auto,
            alignment_numbers: true,
            alignment_number_font_size: 12.0,
            show_piece_ids: true,
            piece_id_font_size: 24.0,
            layout_pass_limit: DEFAULT_PASS_LIMIT,
        }
    }
}

impl ExportOptions {
    pub fn load(path: &Path) -> Result<ExportOptions> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading options from {}", path.display()))?;
        let options = serde_json::from_str(&text)
            .with_context(|| format!("parsing options from {}", path.display()))?;
        Ok(options)
    }
}
