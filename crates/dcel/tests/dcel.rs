use dcel::{Anomaly, Check, Dcel, FaceId, HalfEdgeId, Mesh, ValidateOptions, VertexId};
use geo::Coord;

/// Two triangles sharing the edge b–c, plus the face that encloses them.
///
/// ```text
///   c---d
///  / \ /
/// a---b
/// ```
/// Faces: (a, b, c), (b, d, c) and the enclosing loop (a, c, d, b).
fn diamond() -> Mesh {
    Mesh::new(
        vec![
            Coord { x: 0, y: 0 },
            Coord { x: 2, y: 0 },
            Coord { x: 1, y: 2 },
            Coord { x: 3, y: 2 },
        ],
        vec![vec![0, 1, 2], vec![1, 3, 2], vec![0, 2, 3, 1]],
    )
}

#[test]
fn counts_are_correct() {
    let dcel = Dcel::from_mesh(&diamond());
    assert_eq!(dcel.num_vertices(), 4);
    assert_eq!(dcel.num_half_edges(), 10);
    assert_eq!(dcel.num_edges(), 5);
    assert_eq!(dcel.num_faces(), 3);
}

#[test]
fn diamond_is_a_valid_subdivision() {
    let dcel = Dcel::from_mesh(&diamond());
    assert_eq!(dcel.validate(&ValidateOptions::default()), Ok(()));
}

#[test]
fn face_cycle_lengths() {
    let dcel = Dcel::from_mesh(&diamond());
    let lengths: Vec<_> = dcel.face_ids()
        .map(|f| dcel.face_cycle(dcel.face(f).half_edge.unwrap()).count())
        .collect();
    assert_eq!(lengths, vec![3, 3, 4]);
}

#[test]
fn dest_is_twin_origin() {
    let dcel = Dcel::from_mesh(&diamond());
    let he = dcel.vertex(VertexId(0)).half_edge.unwrap();
    let twin = dcel.half_edge(he).twin.unwrap();
    assert_eq!(dcel.dest(he), Some(dcel.half_edge(twin).origin));
    assert_eq!(dcel.dest(he), Some(VertexId(1)));
}

#[test]
fn vertex_star_degree() {
    let dcel = Dcel::from_mesh(&diamond());
    let degree = |v: usize| dcel.vertex_star(dcel.vertex(VertexId(v)).half_edge.unwrap()).count();
    // b and c touch the shared edge: degree 3.  a and d: degree 2.
    assert_eq!(degree(0), 2);
    assert_eq!(degree(1), 3);
    assert_eq!(degree(2), 3);
    assert_eq!(degree(3), 2);
}

#[test]
fn vertex_star_leaves_the_vertex() {
    let dcel = Dcel::from_mesh(&diamond());
    let start = dcel.vertex(VertexId(1)).half_edge.unwrap();
    for he in dcel.vertex_star(start) {
        assert_eq!(dcel.half_edge(he).origin, VertexId(1));
    }
}

#[test]
fn shared_pair_without_enclosing_face_is_open() {
    let mut mesh = diamond();
    mesh.faces.pop();
    let dcel = Dcel::from_mesh(&mesh);
    assert_eq!(dcel.num_half_edges(), 6);
    // Only the shared edge b–c is twinned.
    assert_eq!(dcel.half_edge(HalfEdgeId(1)).twin, Some(HalfEdgeId(5)));
    let defect = dcel.validate(&ValidateOptions::default()).unwrap_err();
    assert_eq!(defect.check(), Check::Closure);
}

#[test]
fn degenerate_faces_keep_their_slot() {
    let mut mesh = diamond();
    mesh.faces.insert(1, vec![0, 1]);
    let dcel = Dcel::from_mesh(&mesh);
    assert_eq!(dcel.num_faces(), 4);
    assert_eq!(dcel.face(FaceId(1)).half_edge, None);
    assert_eq!(dcel.anomalies(), &[Anomaly::DegenerateFace { face: FaceId(1), len: 2 }]);
    // The degenerate face contributes nothing, so the rest still validates.
    assert_eq!(dcel.validate(&ValidateOptions::default()), Ok(()));
}
