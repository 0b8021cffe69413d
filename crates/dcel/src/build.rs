//! DCEL construction from face loops.
//!
//! Construction runs in two passes over a [`Mesh`]:
//!
//! 1. **Half-edge creation.**  Every consecutive vertex pair of every face
//!    loop (wrapping last → first) becomes one half-edge.  Half-edges on the
//!    same undirected edge are paired as twins through a map keyed by the
//!    sorted vertex pair.
//! 2. **Chain linking.**  Each face is walked from its outer component,
//!    following the half-edge of the same face that leaves the current
//!    destination, until the walk returns to the start.
//!
//! The builder never rejects input.  Anything it has to skip or leave
//! unlinked is recorded as an [`Anomaly`] and left for the validator to judge.

use std::collections::hash_map::Entry;
use std::fmt;

use ahash::AHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dcel::{Dcel, FaceId, HalfEdgeId, VertexId};
use crate::mesh::Mesh;

/// An undirected edge: vertex pair with the smaller index first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey(pub VertexId, pub VertexId);

impl EdgeKey {
    pub fn new(u: VertexId, v: VertexId) -> Self {
        if u <= v { Self(u, v) } else { Self(v, u) }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0 .0, self.1 .0)
    }
}

/// Something the builder tolerated instead of rejecting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A face loop with fewer than three vertices.  The face exists but has
    /// no half-edges.
    DegenerateFace { face: FaceId, len: usize },
    /// A loop edge naming a vertex that does not exist; the edge was skipped.
    /// Indices are 0-based as given in the mesh.
    IndexOutOfRange { face: FaceId, from: i64, to: i64 },
    /// Two half-edges on the same edge with the same direction, i.e. two
    /// faces wound the same way.  They are still paired as twins.
    SameDirectionTwins { first: HalfEdgeId, second: HalfEdgeId },
    /// A third (or later) half-edge on an already paired edge.  It is left
    /// without a twin.
    NonManifoldEdge { half_edge: HalfEdgeId, edge: EdgeKey },
}

/// Twin bookkeeping for one undirected edge.
#[derive(Clone, Copy, Debug)]
enum TwinSlot {
    Pending(HalfEdgeId),
    Paired(HalfEdgeId, HalfEdgeId),
}

impl Dcel {
    /// Build a DCEL from a mesh.  Vertices and faces keep their input order;
    /// half-edges are numbered in creation order.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut dcel = Dcel::default();

        for &position in &mesh.vertices {
            dcel.add_vertex(position);
        }
        for _ in &mesh.faces {
            dcel.add_face();
        }

        dcel.create_half_edges(mesh);
        dcel.link_chains();

        debug!(
            vertices = dcel.num_vertices(),
            faces = dcel.num_faces(),
            half_edges = dcel.num_half_edges(),
            anomalies = dcel.anomalies.len(),
            "built dcel"
        );
        dcel
    }

    fn record(&mut self, anomaly: Anomaly) {
        warn!(?anomaly, "tolerated mesh anomaly");
        self.anomalies.push(anomaly);
    }

    fn create_half_edges(&mut self, mesh: &Mesh) {
        let mut slots: AHashMap<EdgeKey, TwinSlot> = AHashMap::new();

        for (f, face_loop) in mesh.faces.iter().enumerate() {
            let face = FaceId(f);
            let len = face_loop.len();
            if len < 3 {
                self.record(Anomaly::DegenerateFace { face, len });
                continue;
            }

            for i in 0..len {
                let (from_raw, to_raw) = (face_loop[i], face_loop[(i + 1) % len]);
                let (Some(from), Some(to)) = (mesh.resolve(from_raw), mesh.resolve(to_raw)) else {
                    self.record(Anomaly::IndexOutOfRange { face, from: from_raw, to: to_raw });
                    continue;
                };
                let (from, to) = (VertexId(from), VertexId(to));

                let he = self.add_half_edge(from, face);
                let edge = EdgeKey::new(from, to);

                match slots.entry(edge) {
                    Entry::Vacant(slot) => {
                        slot.insert(TwinSlot::Pending(he));
                    }
                    Entry::Occupied(mut slot) => {
                        let current = *slot.get();
                        match current {
                            TwinSlot::Pending(first) => {
                                slot.insert(TwinSlot::Paired(first, he));
                                if self.half_edges[first.0].origin == from {
                                    self.record(Anomaly::SameDirectionTwins { first, second: he });
                                }
                            }
                            TwinSlot::Paired(..) => {
                                self.record(Anomaly::NonManifoldEdge { half_edge: he, edge });
                            }
                        }
                    }
                }
            }
        }

        for (_, slot) in slots {
            if let TwinSlot::Paired(a, b) = slot {
                self.set_twins(a, b);
            }
        }
    }

    fn link_chains(&mut self) {
        // First half-edge (in creation order) leaving each vertex on each face.
        let mut successors: AHashMap<(FaceId, VertexId), HalfEdgeId> =
            AHashMap::with_capacity(self.half_edges.len());
        for (i, he) in self.half_edges.iter().enumerate() {
            successors.entry((he.face, he.origin)).or_insert(HalfEdgeId(i));
        }

        let limit = self.half_edges.len();
        for f in 0..self.faces.len() {
            let face = FaceId(f);
            let Some(start) = self.faces[f].half_edge else { continue };

            let mut current = start;
            let mut walked = 0;
            loop {
                walked += 1;
                let Some(next) = self.dest(current)
                    .and_then(|v| successors.get(&(face, v)).copied())
                else {
                    break;
                };
                self.set_next(current, next);
                current = next;
                if current == start || walked >= limit {
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
