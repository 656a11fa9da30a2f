/// meshpipe core library - mesh ingestion and transform composition
///
/// Parses a subset of the OBJ text format, triangulates faces, flattens the
/// per-attribute index spaces into one vertex stream, and composes the
/// model/view/projection matrices used to draw each object.

pub mod controller;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod projection;
pub mod stream;
pub mod transform;
pub mod triangulate;

// Re-export commonly used types
pub use controller::{CameraController, CameraMode, ControllerConfig, InputEvent, InputState};
pub use error::{Attribute, MeshError, TransformError};
pub use frame::Frame;
pub use geometry::{Face, FaceRef, ObjDocument, RawAttributes, Submesh, Triangle};
pub use mesh::Mesh;
pub use obj::{parse_obj, LoadOptions, ParsePolicy};
pub use projection::Camera;
pub use stream::{build_stream, GeometrySink, VertexStream, VertexStreamBuilder};
pub use transform::{MatrixSet, Pose, Transform, UniformSink};
pub use triangulate::{triangulate, Triangles};
