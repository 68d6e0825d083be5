use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::types::{EdgeIndex, FaceIndex, HalfEdge, VertexIndex};
use crate::error::{PatternError, PatternResult};
use crate::util_3d::{Vector2, Vector3};

/// Serialized form of a mesh, as written by the host editor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MeshDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_uv_to_world_scale")]
    pub uv_to_world_scale: f32,
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<FaceDocument>,
    /// Flagged edges and loose wire edges. Face edges not listed are plain edges.
    #[serde(default)]
    pub edges: Vec<EdgeDocument>,
}

fn default_uv_to_world_scale() -> f32 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceDocument {
    pub vertices: Vec<u32>,
    pub uvs: Vec<[f32; 2]>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeDocument {
    pub vertices: [u32; 2],
    #[serde(default)]
    pub seam: bool,
}

#[derive(Clone, Debug)]
pub struct Face {
    vertices: Vec<VertexIndex>,
    uvs: Vec<Vector2>,
    /// `edges[i]` joins `vertices[i]` and `vertices[i + 1]`.
    edges: Vec<EdgeIndex>,
}

impl Face {
    pub fn index_edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.iter().copied()
    }
    pub fn num_corners(&self) -> usize {
        self.vertices.len()
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    v0: VertexIndex,
    v1: VertexIndex,
    faces: Vec<FaceIndex>,
    seam: bool,
}

impl Edge {
    pub fn vertices(&self) -> (VertexIndex, VertexIndex) {
        (self.v0, self.v1)
    }
    pub fn faces(&self) -> &[FaceIndex] {
        &self.faces
    }
    pub fn is_seam(&self) -> bool {
        self.seam
    }
    /// A wire edge belongs to no face.
    pub fn is_wire(&self) -> bool {
        self.faces.is_empty()
    }
    /// Stable identity of this edge, independent of its orientation.
    pub fn stable_hash(&self) -> u32 {
        let key = (self.v0.min(self.v1).0, self.v0.max(self.v1).0);
        fxhash::hash32(&key)
    }
}

/// Immutable mesh topology plus per-corner UVs.
#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    uv_to_world_scale: f32,
    vertices: Vec<Vector3>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    vertex_edges: Vec<Vec<EdgeIndex>>,
}

fn edge_key(a: VertexIndex, b: VertexIndex) -> (VertexIndex, VertexIndex) {
    if a < b { (a, b) } else { (b, a) }
}

impl Model {
    /// Builds the topology, checking every precondition of the export.
    pub fn from_document(doc: MeshDocument) -> PatternResult<Model> {
        if doc.faces.is_empty() {
            return Err(PatternError::EmptyMesh);
        }
        if !(doc.uv_to_world_scale.is_finite() && doc.uv_to_world_scale > 0.0) {
            return Err(PatternError::InvalidScale {
                scale: doc.uv_to_world_scale,
            });
        }
        let num_vertices = doc.vertices.len();
        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_map: FxHashMap<(VertexIndex, VertexIndex), EdgeIndex> = FxHashMap::default();
        let mut faces = Vec::with_capacity(doc.faces.len());

        for (i_face, fdoc) in doc.faces.into_iter().enumerate() {
            if fdoc.vertices.len() < 3 {
                return Err(PatternError::DegenerateFace {
                    face: i_face,
                    details: format!("{} vertices", fdoc.vertices.len()),
                });
            }
            if fdoc.uvs.len() != fdoc.vertices.len() {
                return Err(PatternError::MissingUv {
                    face: i_face,
                    vertices: fdoc.vertices.len(),
                    uvs: fdoc.uvs.len(),
                });
            }
            if let Some(&vertex) = fdoc.vertices.iter().find(|&&v| v as usize >= num_vertices) {
                return Err(PatternError::InvalidFaceVertex { face: i_face, vertex });
            }
            let vertices: Vec<VertexIndex> =
                fdoc.vertices.iter().map(|&v| VertexIndex(v)).collect();
            let n = vertices.len();
            let mut face_edges = Vec::with_capacity(n);
            for c in 0..n {
                let (a, b) = (vertices[c], vertices[(c + 1) % n]);
                if a == b {
                    return Err(PatternError::DegenerateFace {
                        face: i_face,
                        details: format!("repeated vertex {a}"),
                    });
                }
                let i_edge = *edge_map.entry(edge_key(a, b)).or_insert_with(|| {
                    edges.push(Edge {
                        v0: a,
                        v1: b,
                        faces: Vec::new(),
                        seam: false,
                    });
                    EdgeIndex::from(edges.len() - 1)
                });
                let edge = &mut edges[usize::from(i_edge)];
                if !edge.faces.contains(&FaceIndex::from(i_face)) {
                    edge.faces.push(FaceIndex::from(i_face));
                }
                face_edges.push(i_edge);
            }
            faces.push(Face {
                vertices,
                uvs: fdoc.uvs.iter().map(|&[u, v]| Vector2::new(u, v)).collect(),
                edges: face_edges,
            });
        }

        for (i_doc, edoc) in doc.edges.iter().enumerate() {
            let [a, b] = edoc.vertices;
            for v in [a, b] {
                if v as usize >= num_vertices {
                    return Err(PatternError::InvalidEdgeVertex { edge: i_doc, vertex: v });
                }
            }
            let (a, b) = (VertexIndex(a), VertexIndex(b));
            if a == b {
                log::warn!("ignoring zero-length edge {i_doc} at vertex {a}");
                continue;
            }
            let i_edge = *edge_map.entry(edge_key(a, b)).or_insert_with(|| {
                edges.push(Edge {
                    v0: a,
                    v1: b,
                    faces: Vec::new(),
                    seam: false,
                });
                EdgeIndex::from(edges.len() - 1)
            });
            edges[usize::from(i_edge)].seam |= edoc.seam;
        }

        let mut vertex_edges = vec![Vec::new(); num_vertices];
        for (i_edge, edge) in edges.iter().enumerate() {
            vertex_edges[usize::from(edge.v0)].push(EdgeIndex::from(i_edge));
            vertex_edges[usize::from(edge.v1)].push(EdgeIndex::from(i_edge));
        }

        Ok(Model {
            name: doc.name,
            uv_to_world_scale: doc.uv_to_world_scale,
            vertices: doc.vertices.into_iter().map(Vector3::from).collect(),
            faces,
            edges,
            vertex_edges,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn uv_to_world_scale(&self) -> f32 {
        self.uv_to_world_scale
    }
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
    pub fn faces(&self) -> impl Iterator<Item = (FaceIndex, &Face)> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceIndex::from(i), f))
    }
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| (EdgeIndex::from(i), e))
    }
    pub fn vertex_edges(&self, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.vertex_edges[usize::from(v)].iter().copied()
    }

    pub fn origin(&self, h: HalfEdge) -> VertexIndex {
        self[h.face].vertices[h.corner]
    }
    pub fn target(&self, h: HalfEdge) -> VertexIndex {
        let face = &self[h.face];
        face.vertices[(h.corner + 1) % face.num_corners()]
    }
    pub fn origin_uv(&self, h: HalfEdge) -> Vector2 {
        self[h.face].uvs[h.corner]
    }
    pub fn target_uv(&self, h: HalfEdge) -> Vector2 {
        let face = &self[h.face];
        face.uvs[(h.corner + 1) % face.num_corners()]
    }
}

impl std::ops::Index<FaceIndex> for Model {
    type Output = Face;
    fn index(&self, idx: FaceIndex) -> &Face {
        &self.faces[usize::from(idx)]
    }
}

impl std::ops::Index<EdgeIndex> for Model {
    type Output = Edge;
    fn index(&self, idx: EdgeIndex) -> &Edge {
        &self.edges[usize::from(idx)]
    }
}
