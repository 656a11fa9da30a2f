/// Face triangulation
///
/// Quads split as `(c0, c1, c2)` then `(c1, c2, c3)`. This is not the usual
/// `(c0, c2, c3)` fan and the two splits differ for non-planar quads, so the
/// corner order here must not change.
use crate::geometry::{Face, Triangle};

/// Triangles of a single face, consumed once.
#[derive(Debug)]
pub struct Triangles {
    face: Face,
    next: usize,
}

impl Iterator for Triangles {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        let triangle = match (&self.face, self.next) {
            (Face::Triangle([c0, c1, c2]), 0) => Triangle::new(*c0, *c1, *c2),
            (Face::Quad([c0, c1, c2, _]), 0) => Triangle::new(*c0, *c1, *c2),
            (Face::Quad([_, c1, c2, c3]), 1) => Triangle::new(*c1, *c2, *c3),
            _ => return None,
        };
        self.next += 1;
        Some(triangle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.face.triangle_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Triangles {}

/// Split a face into one or two triangles.
pub fn triangulate(face: Face) -> Triangles {
    Triangles { face, next: 0 }
}
