//! Partition of the faces into UV islands.

use std::collections::VecDeque;

use slotmap::SlotMap;

use super::model::Model;
use super::types::{FaceIndex, HalfEdge, IslandKey};

/// One connected set of faces: a single piece of the pattern.
#[derive(Clone, Debug)]
pub struct Island {
    faces: Vec<FaceIndex>,
}

impl Island {
    /// Faces of the island, in ascending order.
    pub fn faces(&self) -> &[FaceIndex] {
        &self.faces
    }
    pub fn contains(&self, face: FaceIndex) -> bool {
        self.faces.binary_search(&face).is_ok()
    }
}

/// Groups the faces into islands by flood fill over shared edges.
///
/// Edges flagged as seam do not connect faces. The islands are created in the order of
/// their lowest face index, which is also their iteration order in the returned map.
pub fn partition_islands(model: &Model) -> SlotMap<IslandKey, Island> {
    let mut islands = SlotMap::with_key();
    let mut visited = vec![false; model.num_faces()];
    let mut queue = VecDeque::new();

    for (i_face, _) in model.faces() {
        if visited[usize::from(i_face)] {
            continue;
        }
        visited[usize::from(i_face)] = true;
        queue.push_back(i_face);
        let mut faces = Vec::new();

        while let Some(i_current) = queue.pop_front() {
            faces.push(i_current);
            for i_edge in model[i_current].index_edges() {
                let edge = &model[i_edge];
                if edge.is_seam() {
                    continue;
                }
                for &i_next in edge.faces() {
                    if !visited[usize::from(i_next)] {
                        visited[usize::from(i_next)] = true;
                        queue.push_back(i_next);
                    }
                }
            }
        }
        faces.sort_unstable();
        log::debug!("island with {} faces starting at face {}", faces.len(), i_face);
        islands.insert(Island { faces });
    }
    islands
}

/// Half-edges of `island` whose edge has exactly one face inside the island.
///
/// Returned in face then corner order.
pub fn island_boundary(model: &Model, island: &Island) -> Vec<HalfEdge> {
    let mut boundary = Vec::new();
    for &i_face in island.faces() {
        let face = &model[i_face];
        for (corner, i_edge) in face.index_edges().enumerate() {
            let inside = model[i_edge]
                .faces()
                .iter()
                .filter(|&&f| island.contains(f))
                .count();
            if inside == 1 {
                boundary.push(HalfEdge::new(i_face, corner));
            }
        }
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::model::tests::document;

    const QUAD_UV: &[[f32; 2]] = &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    /// A 3x1 strip of quads: faces 0-1-2 left to right, sharing edges (1,5)/(2,6).
    fn strip(seam_between: &[([u32; 2], bool)]) -> Model {
        let doc = document(
            &[
                (&[0, 1, 5, 4], QUAD_UV),
                (&[1, 2, 6, 5], QUAD_UV),
                (&[2, 3, 7, 6], QUAD_UV),
            ],
            seam_between,
        );
        Model::from_document(doc).unwrap()
    }

    #[test]
    fn connected_strip_is_one_island() {
        let model = strip(&[]);
        let islands = partition_islands(&model);
        assert_eq!(islands.len(), 1);
        let (_, island) = islands.iter().next().unwrap();
        assert_eq!(island.faces(), &[FaceIndex(0), FaceIndex(1), FaceIndex(2)]);
    }

    #[test]
    fn seams_split_islands() {
        let model = strip(&[([2, 6], true)]);
        let islands: Vec<_> = partition_islands(&model).into_iter().map(|(_, i)| i).collect();
        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0].faces(), &[FaceIndex(0), FaceIndex(1)]);
        assert_eq!(islands[1].faces(), &[FaceIndex(2)]);
    }

    #[test]
    fn islands_partition_all_faces() {
        let doc = document(
            &[
                (&[0, 1, 2], &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
                (&[3, 4, 5], &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
                (&[1, 6, 2], &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
                (&[7, 8, 9], &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
                (&[4, 10, 5], &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            ],
            &[],
        );
        let model = Model::from_document(doc).unwrap();
        let islands = partition_islands(&model);
        assert_eq!(islands.len(), 3);
        let mut all: Vec<_> = islands.values().flat_map(|i| i.faces().iter().copied()).collect();
        all.sort();
        let expected: Vec<_> = (0..5).map(FaceIndex).collect();
        assert_eq!(all, expected);
        assert!(islands.values().all(|i| !i.faces().is_empty()));
    }

    #[test]
    fn boundary_of_strip() {
        let model = strip(&[]);
        let islands = partition_islands(&model);
        let island = islands.values().next().unwrap();
        let boundary = island_boundary(&model, island);
        // 3 quads, 12 half-edges, 2 shared edges consumed twice
        assert_eq!(boundary.len(), 8);
        assert!(!boundary.contains(&HalfEdge::new(FaceIndex(0), 1)));
        assert!(!boundary.contains(&HalfEdge::new(FaceIndex(1), 3)));
    }

    #[test]
    fn seam_edges_bound_both_islands() {
        let model = strip(&[([2, 6], true)]);
        let islands = partition_islands(&model);
        let total: usize = islands.values().map(|i| island_boundary(&model, i).len()).sum();
        // the seam edge is on the outline of each side
        assert_eq!(total, 10);
    }
}
