/// Mesh loading: parse, triangulate and flatten in one step
use std::path::Path;

use tracing::{debug, info};

use crate::error::MeshError;
use crate::geometry::{ObjDocument, RawAttributes, Submesh};
use crate::obj::{parse_obj, LoadOptions};
use crate::stream::{build_stream, GeometrySink, VertexStream};

/// A loaded mesh: the parsed tree plus its flat vertex stream.
#[derive(Debug, Clone)]
pub struct Mesh {
    document: ObjDocument,
    stream: VertexStream,
}

impl Mesh {
    /// Read and load an OBJ file. A missing or unreadable file is an error,
    /// never an empty mesh.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MeshError::Io(path.to_path_buf(), e))?;
        let mesh = Self::from_obj_str(&text, options)?;
        info!(
            path = %path.display(),
            triangles = mesh.triangle_count(),
            submeshes = mesh.submeshes().len(),
            "loaded mesh"
        );
        Ok(mesh)
    }

    /// Load from OBJ text already in memory. Either the whole mesh loads or
    /// an error is returned.
    pub fn from_obj_str(text: &str, options: &LoadOptions) -> Result<Self, MeshError> {
        let document = parse_obj(text, options.policy)?;
        let stream = build_stream(&document)?;
        debug!(triangles = stream.triangle_count, "built vertex stream");
        Ok(Self { document, stream })
    }

    pub fn triangle_count(&self) -> usize {
        self.stream.triangle_count
    }

    pub fn submeshes(&self) -> &[Submesh] {
        &self.document.submeshes
    }

    pub fn attributes(&self) -> &RawAttributes {
        &self.document.attributes
    }

    pub fn stream(&self) -> &VertexStream {
        &self.stream
    }

    /// Drop the parsed tree and keep only the flat stream.
    pub fn into_stream(self) -> VertexStream {
        self.stream
    }

    pub fn upload<S: GeometrySink>(&self, sink: &mut S) {
        self.stream.upload(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_AND_TRIANGLE: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
g second
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_from_obj_str() {
        let mesh = Mesh::from_obj_str(QUAD_AND_TRIANGLE, &LoadOptions::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.submeshes().len(), 2);
        assert_eq!(mesh.attributes().positions.len(), 4);

        let stream = mesh.into_stream();
        assert_eq!(stream.positions.len(), 27);
        assert_eq!(stream.texcoords.len(), 18);
        assert_eq!(stream.normals.len(), 27);
        // Corner 3 of the first triangle has vt (1, 1), flipped to (1, 0).
        assert_eq!(&stream.texcoords[4..6], &[1.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_index_fails_whole_load() {
        let text = "v 0 0 0\nvt 0 0\nvn 0 1 0\nf 1/1/1 1/1/1 2/1/1\n";
        let err = Mesh::from_obj_str(text, &LoadOptions::lenient()).unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 2, .. }));
    }

    #[test]
    fn test_empty_input_is_empty_mesh() {
        let mesh = Mesh::from_obj_str("# nothing here\n", &LoadOptions::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.stream().positions.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("meshpipe-does-not-exist.obj");
        let err = Mesh::load(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, MeshError::Io(p, _) if p == path));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("meshpipe-{}.obj", std::process::id()));
        std::fs::write(&path, QUAD_AND_TRIANGLE).unwrap();
        let mesh = Mesh::load(&path, &LoadOptions::default());
        std::fs::remove_file(&path).unwrap();
        assert_eq!(mesh.unwrap().triangle_count(), 3);
    }
}
