/// Flat per-vertex stream built by dereferencing triangle corners
use nalgebra::{Vector2, Vector3};

use crate::error::{Attribute, MeshError};
use crate::geometry::{FaceRef, ObjDocument, RawAttributes, Triangle};
use crate::triangulate::triangulate;

/// Receiver of the finished geometry, e.g. a GPU buffer uploader.
pub trait GeometrySink {
    fn upload_geometry(
        &mut self,
        positions: &[f32],
        texcoords: &[f32],
        normals: &[f32],
        triangle_count: usize,
    );
}

/// Three parallel flat arrays, one entry per triangle corner.
///
/// For `n` triangles: `positions` and `normals` hold `9n` floats, `texcoords`
/// holds `6n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexStream {
    pub positions: Vec<f32>,
    pub texcoords: Vec<f32>,
    pub normals: Vec<f32>,
    pub triangle_count: usize,
}

impl VertexStream {
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 9),
            texcoords: Vec::with_capacity(triangles * 6),
            normals: Vec::with_capacity(triangles * 9),
            triangle_count: 0,
        }
    }

    /// Number of vertices to draw (`3n`).
    pub fn vertex_count(&self) -> usize {
        self.triangle_count * 3
    }

    pub fn upload<S: GeometrySink>(&self, sink: &mut S) {
        sink.upload_geometry(
            &self.positions,
            &self.texcoords,
            &self.normals,
            self.triangle_count,
        );
    }
}

/// Appends dereferenced triangles to a [`VertexStream`].
pub struct VertexStreamBuilder<'a> {
    attributes: &'a RawAttributes,
    stream: VertexStream,
}

impl<'a> VertexStreamBuilder<'a> {
    pub fn new(attributes: &'a RawAttributes) -> Self {
        Self {
            attributes,
            stream: VertexStream::default(),
        }
    }

    pub fn with_capacity(attributes: &'a RawAttributes, triangles: usize) -> Self {
        Self {
            attributes,
            stream: VertexStream::with_capacity(triangles),
        }
    }

    /// Resolve all three corners first, so a bad index leaves the stream
    /// untouched.
    pub fn push_triangle(&mut self, triangle: &Triangle) -> Result<(), MeshError> {
        let mut resolved = [(Vector3::zeros(), Vector2::zeros(), Vector3::zeros()); 3];
        for (slot, corner) in resolved.iter_mut().zip(&triangle.corners) {
            *slot = self.resolve(corner)?;
        }

        for (position, texcoord, normal) in resolved {
            self.stream.positions.extend_from_slice(position.as_slice());
            self.stream.texcoords.push(texcoord.x);
            self.stream.texcoords.push(1.0 - texcoord.y);
            self.stream.normals.extend_from_slice(normal.as_slice());
        }
        self.stream.triangle_count += 1;
        Ok(())
    }

    fn resolve(
        &self,
        corner: &FaceRef,
    ) -> Result<(Vector3<f32>, Vector2<f32>, Vector3<f32>), MeshError> {
        let attrs = self.attributes;
        Ok((
            lookup(&attrs.positions, corner.position, Attribute::Position)?,
            lookup(&attrs.texcoords, corner.texcoord, Attribute::TexCoord)?,
            lookup(&attrs.normals, corner.normal, Attribute::Normal)?,
        ))
    }

    pub fn finish(self) -> VertexStream {
        self.stream
    }
}

fn lookup<T: Copy>(values: &[T], index: usize, attribute: Attribute) -> Result<T, MeshError> {
    values
        .get(index)
        .copied()
        .ok_or(MeshError::IndexOutOfRange {
            attribute,
            index: index + 1,
            len: values.len(),
        })
}

/// Triangulate every face in file order and build the flat stream.
pub fn build_stream(doc: &ObjDocument) -> Result<VertexStream, MeshError> {
    let mut builder = VertexStreamBuilder::with_capacity(&doc.attributes, doc.triangle_count());
    for face in doc.faces() {
        for triangle in triangulate(*face) {
            builder.push_triangle(&triangle)?;
        }
    }
    Ok(builder.finish())
}
