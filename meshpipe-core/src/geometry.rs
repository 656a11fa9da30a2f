/// Mesh data model: raw attribute arrays and the submesh/face tree
use nalgebra::{Vector2, Vector3};

/// Attribute arrays in file order. Face references index into these.
#[derive(Debug, Clone, Default)]
pub struct RawAttributes {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<Vector2<f32>>,
}

impl RawAttributes {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One face corner. Indices are 0-based; the parser converts from the
/// 1-based values in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRef {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

impl FaceRef {
    pub fn new(position: usize, texcoord: usize, normal: usize) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// A polygon face as written in the source, tagged by arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Triangle([FaceRef; 3]),
    Quad([FaceRef; 4]),
}

impl Face {
    /// Number of triangles this face expands to.
    pub fn triangle_count(&self) -> usize {
        match self {
            Face::Triangle(_) => 1,
            Face::Quad(_) => 2,
        }
    }
}

/// A triangle as three face corners, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub corners: [FaceRef; 3],
}

impl Triangle {
    pub fn new(c0: FaceRef, c1: FaceRef, c2: FaceRef) -> Self {
        Self {
            corners: [c0, c1, c2],
        }
    }
}

/// Faces between two group markers.
#[derive(Debug, Clone, Default)]
pub struct Submesh {
    pub faces: Vec<Face>,
}

impl Submesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }
}

/// Parsed source before dereferencing: attributes plus grouped faces.
#[derive(Debug, Clone)]
pub struct ObjDocument {
    pub attributes: RawAttributes,
    pub submeshes: Vec<Submesh>,
}

impl ObjDocument {
    /// An empty document always holds one (empty) submesh to append into.
    pub fn new() -> Self {
        Self {
            attributes: RawAttributes::new(),
            submeshes: vec![Submesh::new()],
        }
    }

    /// Start a new submesh, unless the current one has no faces yet.
    pub fn begin_group(&mut self) {
        if self.current().is_some_and(|s| !s.is_empty()) {
            self.submeshes.push(Submesh::new());
        }
    }

    pub fn add_face(&mut self, face: Face) {
        if self.submeshes.is_empty() {
            self.submeshes.push(Submesh::new());
        }
        let last = self.submeshes.len() - 1;
        self.submeshes[last].add_face(face);
    }

    fn current(&self) -> Option<&Submesh> {
        self.submeshes.last()
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(Submesh::triangle_count).sum()
    }

    /// All faces across submeshes, in file order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.submeshes.iter().flat_map(|s| s.faces.iter())
    }
}

impl Default for ObjDocument {
    fn default() -> Self {
        Self::new()
    }
}
