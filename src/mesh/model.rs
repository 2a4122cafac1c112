use crate::foundation::core::Vec3;

/// Indexed triangle mesh: `f32` positions and 0-based triangle indices.
///
/// Every index in `faces` is `< vertices.len()`; [`crate::load_obj`] guarantees this for loaded
/// meshes and [`Mesh::new`] checks it for hand-built ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Build a mesh, returning `None` if any face references a missing vertex.
    pub fn new(vertices: Vec<[f32; 3]>, faces: Vec<[u32; 3]>) -> Option<Self> {
        let n = vertices.len();
        if faces.iter().flatten().any(|&i| i as usize >= n) {
            return None;
        }
        Some(Self { vertices, faces })
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Triangles as 0-based vertex indices.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: u32) -> Vec3 {
        Vec3::from(self.vertices[i as usize])
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(*self.vertices.first()?);
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let v = Vec3::from(*v);
            (lo.inf(&v), hi.sup(&v))
        }))
    }
}
