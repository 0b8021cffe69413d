//! Doubly Connected Edge List (DCEL): a half-edge data structure for
//! representing a planar subdivision with full topological and geometric
//! information.
//!
//! # Structure
//!
//! Every undirected edge shared by two faces is represented as a pair of
//! directed **half-edges** (twins).  Each half-edge carries:
//!
//! * `origin`: the vertex it leaves from
//! * `twin`: the opposite half-edge (same edge, opposite direction), if one
//!   was found
//! * `next`: the next half-edge around the same face
//! * `prev`: the previous half-edge around the same face
//! * `face`: the face this half-edge bounds
//!
//! Unlike a DCEL assembled edge-by-edge, one built from face loops can be
//! malformed (missing twins, unclosed cycles), so every link that the builder
//! has to discover is an `Option`.  The validator decides whether the result
//! is a well-formed subdivision.
//!
//! # Indexing
//!
//! All elements are stored in flat `Vec`s and addressed by strongly-typed
//! index wrappers (`VertexId`, `HalfEdgeId`, `FaceId`).  Vertex and face ids
//! follow input order; half-edge ids follow creation order.

use std::fmt;

use geo::{Coord, Line};
use serde::Serialize;

use crate::build::Anomaly;

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(VertexId);
idx!(HalfEdgeId);
idx!(FaceId);

/// Exact integer coordinate.  All geometry in this crate is integer
/// arithmetic; there is no tolerance.
pub type Point = Coord<i32>;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A vertex and the first half-edge created with it as origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub position:  Point,
    /// First half-edge leaving this vertex.  `None` if no face uses it.
    pub half_edge: Option<HalfEdgeId>,
}

/// A directed half-edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HalfEdge {
    /// Vertex this half-edge leaves from.
    pub origin: VertexId,
    /// The other half-edge of the same undirected edge.
    pub twin:   Option<HalfEdgeId>,
    /// Face bounded by this half-edge.
    pub face:   FaceId,
    /// Next half-edge around `face`.
    pub next:   Option<HalfEdgeId>,
    /// Previous half-edge around `face`.
    pub prev:   Option<HalfEdgeId>,
}

/// A face with the first half-edge created on its boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Face {
    /// Outer component.  `None` for degenerate faces (fewer than three
    /// vertices, or every edge skipped).
    pub half_edge: Option<HalfEdgeId>,
}

// ---------------------------------------------------------------------------
// DCEL
// ---------------------------------------------------------------------------

/// A Doubly Connected Edge List over integer points.
///
/// Built once from a [`Mesh`](crate::Mesh) by [`Dcel::from_mesh`]; topology is
/// read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Dcel {
    pub(crate) vertices:   Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) faces:      Vec<Face>,
    pub(crate) anomalies:  Vec<Anomaly>,
}

impl Dcel {
    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn num_vertices(&self)   -> usize { self.vertices.len() }
    pub fn num_half_edges(&self) -> usize { self.half_edges.len() }
    pub fn num_faces(&self)      -> usize { self.faces.len() }
    /// Number of undirected edges, `half_edges / 2`.
    pub fn num_edges(&self)      -> usize { self.half_edges.len() / 2 }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn vertex(&self, id: VertexId)       -> &Vertex   { &self.vertices[id.0] }
    pub fn half_edge(&self, id: HalfEdgeId)  -> &HalfEdge { &self.half_edges[id.0] }
    pub fn face(&self, id: FaceId)           -> &Face     { &self.faces[id.0] }

    pub fn vertices(&self)   -> &[Vertex]   { &self.vertices }
    pub fn half_edges(&self) -> &[HalfEdge] { &self.half_edges }
    pub fn faces(&self)      -> &[Face]     { &self.faces }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    /// Structural problems tolerated while building.
    pub fn anomalies(&self) -> &[Anomaly] { &self.anomalies }

    // -----------------------------------------------------------------------
    // Builders (crate-internal; topology is fixed once built)
    // -----------------------------------------------------------------------

    pub(crate) fn add_vertex(&mut self, position: Point) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex { position, half_edge: None });
        id
    }

    pub(crate) fn add_face(&mut self) -> FaceId {
        let id = FaceId(self.faces.len());
        self.faces.push(Face { half_edge: None });
        id
    }

    /// Push an unlinked half-edge leaving `origin` on `face`.  The vertex's
    /// and face's first half-edge are set if they have none yet.
    pub(crate) fn add_half_edge(&mut self, origin: VertexId, face: FaceId) -> HalfEdgeId {
        let id = HalfEdgeId(self.half_edges.len());
        self.half_edges.push(HalfEdge { origin, twin: None, face, next: None, prev: None });

        self.vertices[origin.0].half_edge.get_or_insert(id);
        self.faces[face.0].half_edge.get_or_insert(id);

        id
    }

    /// Set `a.twin = b` and `b.twin = a`.
    pub(crate) fn set_twins(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self.half_edges[a.0].twin = Some(b);
        self.half_edges[b.0].twin = Some(a);
    }

    /// Set `he.next = next` and `next.prev = he`.
    pub(crate) fn set_next(&mut self, he: HalfEdgeId, next: HalfEdgeId) {
        self.half_edges[he.0].next   = Some(next);
        self.half_edges[next.0].prev = Some(he);
    }

    // -----------------------------------------------------------------------
    // Traversal iterators
    // -----------------------------------------------------------------------

    /// Iterate over the half-edges around the face of `start` by following
    /// `next`, stopping before `start` comes round again or at a missing
    /// link.  Never yields more than `num_half_edges()` items.
    pub fn face_cycle(&self, start: HalfEdgeId) -> FaceCycle<'_> {
        FaceCycle { dcel: self, start, current: Some(start), steps: 0 }
    }

    /// Iterate over outgoing half-edges around the origin of `start` using
    /// `twin.next` links.  Stops at a missing twin or `next`.
    pub fn vertex_star(&self, start: HalfEdgeId) -> VertexStar<'_> {
        VertexStar { dcel: self, start, current: Some(start), steps: 0 }
    }

    // -----------------------------------------------------------------------
    // Geometry helpers
    // -----------------------------------------------------------------------

    /// The vertex at the head of a half-edge: the origin of its twin.
    /// `None` when the half-edge has no twin.
    pub fn dest(&self, he: HalfEdgeId) -> Option<VertexId> {
        self.half_edges[he.0].twin.map(|twin| self.half_edges[twin.0].origin)
    }

    /// The segment spanned by a half-edge, origin to destination.
    pub fn segment(&self, he: HalfEdgeId) -> Option<Line<i32>> {
        let start = self.vertices[self.half_edges[he.0].origin.0].position;
        let end = self.vertices[self.dest(he)?.0].position;
        Some(Line::new(start, end))
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over half-edges in a face cycle.
pub struct FaceCycle<'a> {
    dcel:    &'a Dcel,
    start:   HalfEdgeId,
    current: Option<HalfEdgeId>,
    steps:   usize,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.steps >= self.dcel.half_edges.len() { return None; }
        let he = self.current?;
        self.steps += 1;
        self.current = self.dcel.half_edges[he.0].next.filter(|&n| n != self.start);
        Some(he)
    }
}

/// Iterator over half-edges in a vertex star, using `twin.next`.
pub struct VertexStar<'a> {
    dcel:    &'a Dcel,
    start:   HalfEdgeId,
    current: Option<HalfEdgeId>,
    steps:   usize,
}

impl Iterator for VertexStar<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<HalfEdgeId> {
        if self.steps >= self.dcel.half_edges.len() { return None; }
        let he = self.current?;
        self.steps += 1;
        self.current = self.dcel.half_edges[he.0].twin
            .and_then(|twin| self.dcel.half_edges[twin.0].next)
            .filter(|&n| n != self.start);
        Some(he)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
