use serde::Serialize;

use crate::dcel::Point;

/// A raw polygonal mesh: vertex positions plus one vertex loop per face.
///
/// Loop entries are 0-based vertex positions.  They are signed and unchecked
/// on purpose: an index that does not name a vertex only disables the edges
/// touching it when the DCEL is built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces:    Vec<Vec<i64>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point>, faces: Vec<Vec<i64>>) -> Self {
        Self { vertices, faces }
    }

    /// Resolve a loop entry to a vertex position, if it is in range.
    #[inline]
    pub(crate) fn resolve(&self, index: i64) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.vertices.len())
    }
}
