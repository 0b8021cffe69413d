//! Planar-subdivision validation.
//!
//! A built [`Dcel`] is accepted only if it passes, in order:
//!
//! 1. **closure**: every half-edge has a twin, twins point back at each
//!    other, and twins bound different faces;
//! 2. **planarity**: every undirected edge is bounded by exactly two
//!    half-edges;
//! 3. **overlap**: no two half-edges that share no vertex (and are not
//!    twins) intersect.
//!
//! The first failing check decides the verdict.

use std::fmt;

use ahash::AHashMap;
use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::build::EdgeKey;
use crate::dcel::{Dcel, FaceId, HalfEdgeId};
use crate::kernel::segments_intersect;

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// The three validation checks, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Closure,
    Planarity,
    Overlap,
}

impl Check {
    /// Fixed one-line diagnostic written when this check fails.
    pub fn token(self) -> &'static str {
        match self {
            Check::Closure   => "aberta",
            Check::Planarity => "não subdivisão planar",
            Check::Overlap   => "superposta",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Check::Closure   => "open mesh",
            Check::Planarity => "non-planar subdivision",
            Check::Overlap   => "overlapping faces",
        })
    }
}

/// Why a DCEL is not a well-formed planar subdivision.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Defect {
    #[error("open mesh: {half_edge} has no twin")]
    MissingTwin { half_edge: HalfEdgeId },

    #[error("open mesh: twin of {half_edge} is {twin}, which does not point back")]
    AsymmetricTwin { half_edge: HalfEdgeId, twin: HalfEdgeId },

    #[error("open mesh: {half_edge} and its twin {twin} both bound {face}")]
    TwinSharesFace { half_edge: HalfEdgeId, twin: HalfEdgeId, face: FaceId },

    #[error("non-planar subdivision: edge {edge} is bounded by {count} half-edges")]
    NonPlanar { edge: EdgeKey, count: usize },

    #[error("overlapping faces: {first} intersects {second}")]
    Overlapping { first: HalfEdgeId, second: HalfEdgeId },
}

impl Defect {
    /// The check that produced this defect.
    pub fn check(&self) -> Check {
        match self {
            Defect::MissingTwin { .. }
            | Defect::AsymmetricTwin { .. }
            | Defect::TwinSharesFace { .. } => Check::Closure,
            Defect::NonPlanar { .. }        => Check::Planarity,
            Defect::Overlapping { .. }      => Check::Overlap,
        }
    }

    pub fn token(&self) -> &'static str { self.check().token() }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How the overlap check finds candidate pairs.  Both strategies report the
/// same defect for the same DCEL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapScan {
    /// R-tree over segment bounding boxes; only box-intersecting pairs are
    /// tested exactly.
    #[default]
    Indexed,
    /// Every pair of half-edges.
    BruteForce,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidateOptions {
    pub overlap: OverlapScan,
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

impl Dcel {
    /// Run closure, planarity and overlap checks in order; the first defect
    /// found is returned.
    pub fn validate(&self, options: &ValidateOptions) -> Result<(), Defect> {
        check_closure(self)?;
        debug!("closure check passed");
        check_planarity(self)?;
        debug!("planarity check passed");
        check_overlap(self, options.overlap)?;
        debug!(scan = ?options.overlap, "overlap check passed");
        Ok(())
    }
}

/// Every half-edge has a twin that points back and bounds another face.
pub fn check_closure(dcel: &Dcel) -> Result<(), Defect> {
    for id in dcel.half_edge_ids() {
        let he = dcel.half_edge(id);
        let Some(twin) = he.twin else {
            return Err(Defect::MissingTwin { half_edge: id });
        };
        let back = dcel.half_edge(twin);
        if back.twin != Some(id) {
            return Err(Defect::AsymmetricTwin { half_edge: id, twin });
        }
        if back.face == he.face {
            return Err(Defect::TwinSharesFace { half_edge: id, twin, face: he.face });
        }
    }
    Ok(())
}

/// Every undirected `(origin, destination)` edge is bounded by exactly two
/// half-edges.  Half-edges without a destination are not counted.
pub fn check_planarity(dcel: &Dcel) -> Result<(), Defect> {
    let keys: Vec<Option<EdgeKey>> = dcel.half_edge_ids()
        .map(|id| dcel.dest(id).map(|dest| EdgeKey::new(dcel.half_edge(id).origin, dest)))
        .collect();

    let mut counts: AHashMap<EdgeKey, usize> = AHashMap::with_capacity(keys.len());
    for &edge in keys.iter().flatten() {
        *counts.entry(edge).or_insert(0) += 1;
    }

    // Report in half-edge order so the verdict does not depend on hashing.
    for &edge in keys.iter().flatten() {
        let count = counts[&edge];
        if count != 2 {
            return Err(Defect::NonPlanar { edge, count });
        }
    }
    Ok(())
}

/// No two half-edges that are not twins and share no vertex intersect.
///
/// Pairs are examined in `(first, second)` index order and the first
/// intersecting pair is reported.  Half-edges without a destination span no
/// segment and are skipped.
pub fn check_overlap(dcel: &Dcel, scan: OverlapScan) -> Result<(), Defect> {
    match scan {
        OverlapScan::BruteForce => {
            let n = dcel.num_half_edges();
            for i in 0..n {
                for j in (i + 1)..n {
                    test_pair(dcel, HalfEdgeId(i), HalfEdgeId(j))?;
                }
            }
            Ok(())
        }
        OverlapScan::Indexed => {
            let rtree = RTree::bulk_load(
                dcel.half_edge_ids()
                    .filter_map(|id| SegmentBox::new(dcel, id))
                    .collect::<Vec<_>>()
            );

            let mut candidates = Vec::new();
            for i in dcel.half_edge_ids() {
                let Some(query) = SegmentBox::new(dcel, i) else { continue };

                candidates.clear();
                candidates.extend(
                    rtree.locate_in_envelope_intersecting(&query.envelope())
                        .map(|cand| cand.id)
                        .filter(|&j| j > i)
                );
                candidates.sort_unstable();

                for &j in &candidates {
                    test_pair(dcel, i, j)?;
                }
            }
            Ok(())
        }
    }
}

/// Exact test of one pair, honouring the twin and shared-vertex exemptions.
fn test_pair(dcel: &Dcel, a: HalfEdgeId, b: HalfEdgeId) -> Result<(), Defect> {
    if adjacent(dcel, a, b) {
        return Ok(());
    }
    let (Some(s), Some(t)) = (dcel.segment(a), dcel.segment(b)) else {
        return Ok(());
    };
    if segments_intersect(s, t) {
        return Err(Defect::Overlapping { first: a, second: b });
    }
    Ok(())
}

/// Mutual twins, or half-edges sharing an endpoint vertex in any of the four
/// origin/destination combinations.
fn adjacent(dcel: &Dcel, a: HalfEdgeId, b: HalfEdgeId) -> bool {
    let (ha, hb) = (dcel.half_edge(a), dcel.half_edge(b));
    if ha.twin == Some(b) || hb.twin == Some(a) {
        return true;
    }

    let (da, db) = (dcel.dest(a), dcel.dest(b));
    ha.origin == hb.origin
        || Some(ha.origin) == db
        || da == Some(hb.origin)
        || da == db
}

/// Bounding box of one half-edge's segment, for the R-tree.
#[derive(Clone, Debug)]
struct SegmentBox {
    id:  HalfEdgeId,
    min: [f64; 2],
    max: [f64; 2],
}

impl SegmentBox {
    fn new(dcel: &Dcel, id: HalfEdgeId) -> Option<Self> {
        let line = dcel.segment(id)?;
        let (s, e) = (line.start, line.end);
        Some(Self {
            id,
            min: [f64::from(s.x.min(e.x)), f64::from(s.y.min(e.y))],
            max: [f64::from(s.x.max(e.x)), f64::from(s.y.max(e.y))],
        })
    }
}

impl RTreeObject for SegmentBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;
    use crate::dcel::VertexId;
    use crate::mesh::Mesh;

    fn build(points: &[(i32, i32)], faces: &[&[i64]]) -> Dcel {
        Dcel::from_mesh(&Mesh::new(
            points.iter().map(|&(x, y)| Coord { x, y }).collect(),
            faces.iter().map(|f| f.to_vec()).collect(),
        ))
    }

    fn both_scans(dcel: &Dcel) -> Result<(), Defect> {
        let indexed = dcel.validate(&ValidateOptions { overlap: OverlapScan::Indexed });
        let brute = dcel.validate(&ValidateOptions { overlap: OverlapScan::BruteForce });
        assert_eq!(indexed, brute);
        indexed
    }

    #[test]
    fn enclosed_pair_of_triangles_is_valid() {
        let dcel = build(
            &[(0, 0), (2, 0), (1, 2), (3, 2)],
            &[&[0, 1, 2], &[1, 3, 2], &[0, 2, 3, 1]],
        );
        assert_eq!(both_scans(&dcel), Ok(()));
    }

    #[test]
    fn lone_triangle_is_open() {
        let dcel = build(&[(0, 0), (2, 0), (1, 2)], &[&[0, 1, 2]]);
        let defect = both_scans(&dcel).unwrap_err();
        assert_eq!(defect, Defect::MissingTwin { half_edge: HalfEdgeId(0) });
        assert_eq!(defect.check(), Check::Closure);
        assert_eq!(defect.token(), "aberta");
    }

    #[test]
    fn asymmetric_twin_is_open() {
        let mut dcel = build(
            &[(0, 0), (2, 0), (1, 2)],
            &[&[0, 1, 2], &[2, 1, 0]],
        );
        // he0 (0→1) is twinned with he4 (1→0); redirect he4 elsewhere.
        dcel.half_edges[4].twin = Some(HalfEdgeId(3));
        assert_eq!(
            check_closure(&dcel),
            Err(Defect::AsymmetricTwin { half_edge: HalfEdgeId(0), twin: HalfEdgeId(4) })
        );
    }

    #[test]
    fn edge_walked_twice_by_one_face_is_open() {
        let dcel = build(&[(0, 0), (2, 0), (1, 2)], &[&[0, 1, 2, 1]]);
        assert_eq!(
            check_closure(&dcel),
            Err(Defect::TwinSharesFace {
                half_edge: HalfEdgeId(0),
                twin: HalfEdgeId(3),
                face: FaceId(0),
            })
        );
    }

    #[test]
    fn planarity_counts_half_edges_per_edge() {
        // Two same-direction pairs leaving vertex 0 both collapse onto the
        // key (0, 0), which then has four half-edges.
        let dcel = build(
            &[(0, 0), (2, 0), (1, 2), (1, -2), (-2, 1), (-2, 3), (-2, -1)],
            &[&[0, 1, 2], &[0, 1, 3], &[0, 4, 5], &[0, 4, 6]],
        );
        let defect = check_planarity(&dcel).unwrap_err();
        assert_eq!(
            defect,
            Defect::NonPlanar { edge: EdgeKey(VertexId(0), VertexId(0)), count: 4 }
        );
        assert_eq!(defect.token(), "não subdivisão planar");
    }

    #[test]
    fn planarity_ignores_half_edges_without_destination() {
        let dcel = build(&[(0, 0), (2, 0), (1, 2)], &[&[0, 1, 2]]);
        assert_eq!(check_planarity(&dcel), Ok(()));
    }

    #[test]
    fn crossing_squares_overlap() {
        let dcel = build(
            &[(0, 0), (2, 0), (2, 2), (0, 2), (1, 1), (3, 1), (3, 3), (1, 3)],
            &[&[0, 1, 2, 3], &[3, 2, 1, 0], &[4, 5, 6, 7], &[7, 6, 5, 4]],
        );
        let defect = both_scans(&dcel).unwrap_err();
        assert_eq!(defect, Defect::Overlapping { first: HalfEdgeId(1), second: HalfEdgeId(8) });
        assert_eq!(defect.token(), "superposta");
    }

    #[test]
    fn triangles_touching_at_a_vertex_do_not_overlap() {
        let dcel = build(
            &[(0, 0), (2, 0), (1, 2), (2, 4), (0, 4)],
            &[&[0, 1, 2], &[2, 1, 0], &[2, 3, 4], &[4, 3, 2]],
        );
        assert_eq!(both_scans(&dcel), Ok(()));
    }

    #[test]
    fn coincident_but_distinct_vertices_do_not_overlap() {
        // Vertex 3 duplicates the position of vertex 2 without being merged.
        let dcel = build(
            &[(0, 0), (2, 0), (1, 2), (1, 2), (2, 4), (0, 4)],
            &[&[0, 1, 2], &[2, 1, 0], &[3, 4, 5], &[5, 4, 3]],
        );
        assert_eq!(both_scans(&dcel), Ok(()));
    }

    #[test]
    fn closure_is_checked_before_overlap() {
        // Crossing segments, but nothing is twinned.
        let dcel = build(
            &[(0, 0), (2, 2), (0, 2), (2, 0), (4, 4), (4, 0)],
            &[&[0, 1, 2], &[3, 4, 5]],
        );
        assert_eq!(both_scans(&dcel).unwrap_err().check(), Check::Closure);
    }

    #[test]
    fn display_is_human_readable() {
        let defect = Defect::NonPlanar { edge: EdgeKey(VertexId(1), VertexId(4)), count: 3 };
        assert_eq!(
            defect.to_string(),
            "non-planar subdivision: edge (1, 4) is bounded by 3 half-edges"
        );
        assert_eq!(Check::Overlap.to_string(), "overlapping faces");
    }
}
