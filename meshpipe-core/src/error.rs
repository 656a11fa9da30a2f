use std::path::PathBuf;

/// Which of the three attribute arrays a face reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texcoord",
            Attribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while loading a mesh.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// `index` is the 1-based value as written in the source.
    #[error("{attribute} index {index} out of range ({len} defined)")]
    IndexOutOfRange {
        attribute: Attribute,
        index: usize,
        len: usize,
    },

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Errors raised before a transform set is composed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("degenerate scale {scale:?}: component {axis} is zero")]
    DegenerateScale { scale: [f32; 3], axis: usize },

    #[error("camera eye and look-at coincide or up is parallel to the view direction")]
    DegenerateView,

    #[error(
        "invalid projection: fov {fov}, aspect {aspect}, near {near}, far {far} \
         (need 0 < fov < pi, aspect > 0, 0 < near < far)"
    )]
    InvalidProjection {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}
