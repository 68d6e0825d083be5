mod boundary;
mod import;
mod islands;
mod layout;
mod model;
mod projector;
mod seams;
mod types;

pub use boundary::*;
pub use import::*;
pub use islands::*;
pub use layout::*;
pub use model::*;
pub use projector::*;
pub use seams::*;
pub use types::*;

use crate::config::ExportOptions;
use crate::context::ExportSession;
use crate::util_3d::{Vector2, centroid};

/// One outline of a piece, in document space.
#[derive(Clone, Debug)]
pub struct Outline {
    pub points: Vec<Vector2>,
    pub closed: bool,
}

/// The drawable part of one island.
#[derive(Clone, Debug)]
pub struct PatternPiece {
    pub island: IslandKey,
    pub name: String,
    pub outlines: Vec<Outline>,
    /// Mean of the outline vertices, where the piece name goes.
    pub centroid: Vector2,
    pub guides: Vec<SewingGuide>,
}

/// Everything needed to draw the pattern, with the label layout already settled.
#[derive(Clone, Debug)]
pub struct SewingPattern {
    pub document_size: f32,
    pub pieces: Vec<PatternPiece>,
    /// Final alignment number labels, indexed by [`SewingGuide::label`].
    pub labels: Vec<Label>,
    pub layout_report: LayoutReport,
}

/// Runs the whole pipeline: islands, outlines, markers and label layout.
pub fn build_pattern(model: &Model, options: &ExportOptions) -> SewingPattern {
    let projector = Projector::new(model.uv_to_world_scale());
    let mut session = ExportSession::new(options.layout_pass_limit);

    let islands = partition_islands(model);
    log::info!("loop groups for sewing pattern export: {}", islands.len());

    let boundaries: Vec<(IslandKey, Vec<HalfEdge>)> = islands
        .iter()
        .map(|(key, island)| (key, island_boundary(model, island)))
        .collect();
    let all_boundary: Vec<HalfEdge> = boundaries
        .iter()
        .flat_map(|(_, b)| b.iter().copied())
        .collect();
    let wires = marker_wires(model, options.alignment_markers, &all_boundary);
    let number_font_size = options
        .alignment_numbers
        .then_some(options.alignment_number_font_size);

    let mut pieces = Vec::with_capacity(boundaries.len());
    for (n, (key, boundary)) in boundaries.iter().enumerate() {
        let loops = stitch_loops(model, boundary);
        let outlines: Vec<Outline> = loops
            .iter()
            .map(|l| Outline {
                points: l.uv_path(model).into_iter().map(|uv| projector.project(uv)).collect(),
                closed: l.is_closed(),
            })
            .collect();
        let center = centroid(
            loops
                .iter()
                .flat_map(|l| l.corners(model))
                .map(|(_, uv)| projector.project(uv)),
        )
        .unwrap_or(Vector2::new(0.0, 0.0));
        let guides = extract_guides(
            model,
            &loops,
            &wires,
            &projector,
            number_font_size,
            &mut session,
        );
        log::debug!(
            "piece {}: {} outlines, {} guides",
            piece_name(n + 1),
            outlines.len(),
            guides.len()
        );
        pieces.push(PatternPiece {
            island: *key,
            name: piece_name(n + 1),
            outlines,
            centroid: center,
            guides,
        });
    }

    let layout = session.into_layout();
    let layout_report = layout.report();
    if layout_report.shrinks > 0 {
        log::info!(
            "{} alignment labels, {} font reductions in {} passes",
            layout.len(),
            layout_report.shrinks,
            layout_report.passes
        );
    }
    SewingPattern {
        document_size: projector.document_size(),
        pieces,
        labels: layout.into_labels(),
        layout_report,
    }
}
