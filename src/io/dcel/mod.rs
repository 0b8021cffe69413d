//! The indexed DCEL layout.
//!
//! ```text
//! V E F
//! x y incident_half_edge                    (V rows)
//! outer_component                           (F rows)
//! origin twin face next prev                (2E rows)
//! ```
//!
//! Every index in the text is 1-based.  `E` is half the number of
//! half-edges.  A reference the DCEL does not have is written as `1`, so a
//! `1` does not always mean "the first record".

mod read;
mod write;

pub use read::{parse, read};
pub use write::{to_string, write};

use dcel::{Dcel, Point};
use serde::Serialize;

/// One vertex row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VertexRow {
    pub position:  Point,
    pub half_edge: usize,
}

/// One half-edge row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HalfEdgeRow {
    pub origin: usize,
    pub twin:   usize,
    pub face:   usize,
    pub next:   usize,
    pub prev:   usize,
}

/// A DCEL as rows of 0-based indices, exactly what the text layout carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DcelTable {
    pub vertices:   Vec<VertexRow>,
    pub faces:      Vec<usize>,
    pub half_edges: Vec<HalfEdgeRow>,
}

impl DcelTable {
    pub fn num_edges(&self) -> usize { self.half_edges.len() / 2 }
}

impl From<&Dcel> for DcelTable {
    /// Missing references become index 0, which the layout writes as `1`.
    fn from(dcel: &Dcel) -> Self {
        let index = |id: Option<dcel::HalfEdgeId>| id.map_or(0, |id| id.0);
        Self {
            vertices: dcel.vertices().iter()
                .map(|v| VertexRow { position: v.position, half_edge: index(v.half_edge) })
                .collect(),
            faces: dcel.faces().iter()
                .map(|f| index(f.half_edge))
                .collect(),
            half_edges: dcel.half_edges().iter()
                .map(|he| HalfEdgeRow {
                    origin: he.origin.0,
                    twin:   index(he.twin),
                    face:   he.face.0,
                    next:   index(he.next),
                    prev:   index(he.prev),
                })
                .collect(),
        }
    }
}
