mod pack;
mod thicken;
mod vertex;

pub use pack::ProjectToFrame;
pub use thicken::ThickenPolygon;
pub use vertex::{StandardVertex, VertexElement, VertexFormat, VertexSemantic};

use std::rc::Rc;

use crate::math::{Point2, Point3, Vector3, Vector4};
use crate::scene::Material;

/// One face of a derived polyhedron, as an ordered loop of vertex indices.
///
/// Kept alongside the triangle list for downstream editing (per-face
/// material or UV assignment). Triangles are fanned from the first index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Ordered vertex indices of the face loop.
    pub indices: Vec<u32>,
}

/// Face-grouping structure of a derived mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshStructure {
    /// The faces of the solid, in generation order.
    pub faces: Vec<Face>,
}

/// Output of [`ThickenPolygon`], still in the ambient frame.
///
/// Vertices are duplicated per face (flat shading); all arrays are
/// per-vertex and equal in length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyhedronData {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Unit vertex normals.
    pub normals: Vec<Vector3>,
    /// Vertex tangents; `w` carries the bitangent handedness sign.
    pub tangents: Vec<Vector4>,
    /// Texture coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle index list (each consecutive triple is one triangle).
    pub indices: Vec<u32>,
    /// Face grouping over the same vertex indices.
    pub structure: MeshStructure,
}

impl PolyhedronData {
    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Mesh data handed to the rendering collaborator: a vertex format tag,
/// the packed vertex bytes in the owner's local frame, the index list, an
/// optional shared material and the face grouping.
#[derive(Debug, Clone)]
pub struct GeneratedMeshData {
    /// Layout of the packed vertex records.
    pub format: VertexFormat,
    /// Packed vertex bytes (`format.vertex_size()` bytes per vertex).
    pub vertices: Vec<u8>,
    /// Triangle index list.
    pub indices: Vec<u32>,
    /// Shared material, if one is assigned.
    pub material: Option<Rc<Material>>,
    /// Face grouping of the solid.
    pub structure: MeshStructure,
}
