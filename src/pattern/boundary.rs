//! Reassembly of an island's unordered boundary half-edges into outline loops.

use super::model::Model;
use super::types::{HalfEdge, VertexIndex};
use crate::util_3d::Vector2;

/// A half-edge as walked along a loop.
///
/// Loops follow whichever direction connects to the previous step, so a half-edge of an
/// inconsistently wound face may be walked from its target to its origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopStep {
    pub half_edge: HalfEdge,
    pub reversed: bool,
}

impl LoopStep {
    pub fn entry(&self, model: &Model) -> VertexIndex {
        if self.reversed {
            model.target(self.half_edge)
        } else {
            model.origin(self.half_edge)
        }
    }
    pub fn exit(&self, model: &Model) -> VertexIndex {
        if self.reversed {
            model.origin(self.half_edge)
        } else {
            model.target(self.half_edge)
        }
    }
    pub fn entry_uv(&self, model: &Model) -> Vector2 {
        if self.reversed {
            model.target_uv(self.half_edge)
        } else {
            model.origin_uv(self.half_edge)
        }
    }
    pub fn exit_uv(&self, model: &Model) -> Vector2 {
        if self.reversed {
            model.origin_uv(self.half_edge)
        } else {
            model.target_uv(self.half_edge)
        }
    }
}

/// One connected outline of an island.
#[derive(Clone, Debug)]
pub struct BoundaryLoop {
    steps: Vec<LoopStep>,
    closed: bool,
}

impl BoundaryLoop {
    pub fn steps(&self) -> &[LoopStep] {
        &self.steps
    }
    /// False when the walk ran out of half-edges before getting back to its start.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The vertices along the loop with their UVs, each visited vertex once.
    ///
    /// An open loop also yields the far end of its last step.
    pub fn corners(&self, model: &Model) -> Vec<(VertexIndex, Vector2)> {
        let mut corners: Vec<_> = self
            .steps
            .iter()
            .map(|s| (s.entry(model), s.entry_uv(model)))
            .collect();
        if !self.closed {
            if let Some(last) = self.steps.last() {
                corners.push((last.exit(model), last.exit_uv(model)));
            }
        }
        corners
    }

    /// UV polyline of the loop. A closed loop repeats its first point at the end.
    pub fn uv_path(&self, model: &Model) -> Vec<Vector2> {
        let mut path: Vec<Vector2> = self.corners(model).into_iter().map(|(_, uv)| uv).collect();
        if self.closed {
            if let Some(&first) = path.first() {
                path.push(first);
            }
        }
        path
    }
}

/// Stitches `half_edges` into loops. Every half-edge ends up in exactly one loop.
///
/// The pool keeps its input order and the first matching half-edge wins, so the result is
/// reproducible for a given input order even on non-manifold outlines.
pub fn stitch_loops(model: &Model, half_edges: &[HalfEdge]) -> Vec<BoundaryLoop> {
    let mut pool: Vec<HalfEdge> = half_edges.to_vec();
    let mut loops = Vec::new();

    while !pool.is_empty() {
        let seed = pool.remove(0);
        let start = model.origin(seed);
        let mut to_match = model.target(seed);
        let mut steps = vec![LoopStep {
            half_edge: seed,
            reversed: false,
        }];

        loop {
            let found = pool.iter().enumerate().find_map(|(i, &h)| {
                if model.target(h) == to_match {
                    Some((i, true))
                } else if model.origin(h) == to_match {
                    Some((i, false))
                } else {
                    None
                }
            });
            let Some((i, reversed)) = found else {
                break;
            };
            let half_edge = pool.remove(i);
            let step = LoopStep { half_edge, reversed };
            to_match = step.exit(model);
            steps.push(step);
        }

        let closed = to_match == start;
        if !closed {
            log::warn!(
                "open boundary with {} edges from vertex {} to vertex {}",
                steps.len(),
                start,
                to_match
            );
        }
        loops.push(BoundaryLoop { steps, closed });
    }
    loops
}
