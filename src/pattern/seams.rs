//! Alignment markers at the wire edges hanging off the outlines.

use fxhash::{FxHashMap, FxHashSet};

use super::boundary::BoundaryLoop;
use super::layout::Label;
use super::model::Model;
use super::projector::Projector;
use super::types::{EdgeIndex, HalfEdge, VertexIndex};
use crate::config::AlignmentMarkers;
use crate::context::{ExportSession, PositionKey};
use crate::util_3d::{Vector2, perpendicular, try_normalize};

/// Half length of a guide line, in UV units.
pub const MARKER_OFFSET: f32 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Fully saturated colour picked from a wire hash, so both sides of a cut match.
    pub fn from_hash(hash: u32) -> Rgb {
        let hue = (f64::from(hash) / 100_000_000.0 * 1_345_235.235_23) % 1.0;
        hsv_to_rgb(hue as f32, 1.0, 1.0)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// `h`, `s` and `v` in `[0, 1]`. Channels are truncated, not rounded.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let c = |x: f32| (x.clamp(0.0, 1.0) * 255.0) as u8;
    Rgb(c(r), c(g), c(b))
}

/// A short line across the outline where a wire edge is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct SewingGuide {
    pub wire: EdgeIndex,
    pub number: u32,
    pub color: Rgb,
    /// Endpoints in document space.
    pub start: Vector2,
    pub end: Vector2,
    /// Index of the number label in the session layout, if numbers are drawn.
    pub label: Option<usize>,
}

/// Wire edges that get a marker with the given mode.
///
/// `boundary` is the outline of every island. In `Auto` mode a wire also counts when it is
/// attached to an outline vertex with exactly two face edges, a corner of the outline.
pub fn marker_wires(
    model: &Model,
    mode: AlignmentMarkers,
    boundary: &[HalfEdge],
) -> FxHashSet<EdgeIndex> {
    let mut wires: FxHashSet<EdgeIndex> = FxHashSet::default();
    if mode == AlignmentMarkers::Off {
        return wires;
    }
    wires.extend(
        model
            .edges()
            .filter(|(_, e)| e.is_wire() && e.is_seam())
            .map(|(i, _)| i),
    );
    if mode == AlignmentMarkers::Auto {
        let mut outline_vertices: Vec<VertexIndex> = boundary
            .iter()
            .flat_map(|&h| [model.origin(h), model.target(h)])
            .collect();
        outline_vertices.sort_unstable();
        outline_vertices.dedup();
        let mut detected = 0;
        for v in outline_vertices {
            let face_edges = model
                .vertex_edges(v)
                .filter(|&e| !model[e].is_wire())
                .count();
            if face_edges != 2 {
                continue;
            }
            for i_edge in model.vertex_edges(v).filter(|&e| model[e].is_wire()) {
                if wires.insert(i_edge) {
                    detected += 1;
                }
            }
        }
        log::debug!("auto-detected {} alignment wires", detected);
    }
    wires
}

/// Computes the guides of one island.
///
/// The guide is perpendicular to the outline at the vertex, the outline direction being the
/// sum of the loop steps that touch it, taken in walking order. Where those cancel out there is no
/// direction to draw across, and the marker is skipped.
pub fn extract_guides(
    model: &Model,
    loops: &[BoundaryLoop],
    wires: &FxHashSet<EdgeIndex>,
    projector: &Projector,
    number_font_size: Option<f32>,
    session: &mut ExportSession,
) -> Vec<SewingGuide> {
    let mut guides = Vec::new();
    if wires.is_empty() {
        return guides;
    }

    let mut tangents: FxHashMap<VertexIndex, Vector2> = FxHashMap::default();
    for step in loops.iter().flat_map(|l| l.steps()) {
        // along the walk, so reversed faces still chain head to tail
        let d = step.exit_uv(model) - step.entry_uv(model);
        for v in [step.entry(model), step.exit(model)] {
            *tangents.entry(v).or_insert(Vector2::new(0.0, 0.0)) += d;
        }
    }

    for lp in loops {
        for (v, uv) in lp.corners(model) {
            for i_wire in model.vertex_edges(v).filter(|e| wires.contains(e)) {
                let tangent = tangents.get(&v).copied().unwrap_or(Vector2::new(0.0, 0.0));
                let Some(dir) = try_normalize(tangent) else {
                    log::debug!("no outline direction at vertex {v}, skipping wire {i_wire}");
                    continue;
                };
                let offset = perpendicular(dir) * MARKER_OFFSET;
                let start = projector.project(uv + offset);
                let end = projector.project(uv - offset);

                let hash = model[i_wire].stable_hash();
                let number = session.identity(hash);
                if !session.claim_position(PositionKey::new(start, end)) {
                    continue;
                }
                let label = number_font_size
                    .map(|size| session.place_label(Label::new(number.to_string(), end, size)));
                guides.push(SewingGuide {
                    wire: i_wire,
                    number,
                    color: Rgb::from_hash(hash),
                    start,
                    end,
                    label,
                });
            }
        }
    }
    guides
}
