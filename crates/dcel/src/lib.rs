//! Doubly Connected Edge List construction from polygon loops, and validation
//! of the result as a planar subdivision.
//!
//! ```
//! use dcel::{Dcel, Mesh, ValidateOptions};
//! use geo::Coord;
//!
//! let mesh = Mesh::new(
//!     vec![Coord { x: 0, y: 0 }, Coord { x: 2, y: 0 }, Coord { x: 1, y: 2 }],
//!     vec![vec![0, 1, 2], vec![2, 1, 0]],
//! );
//! let dcel = Dcel::from_mesh(&mesh);
//! assert_eq!(dcel.num_edges(), 3);
//! assert!(dcel.validate(&ValidateOptions::default()).is_ok());
//! ```

pub mod build;
pub mod dcel;
pub mod kernel;
pub mod mesh;
pub mod validate;

pub use build::{Anomaly, EdgeKey};
pub use dcel::{Dcel, Face, FaceId, HalfEdge, HalfEdgeId, Point, Vertex, VertexId};
pub use mesh::Mesh;
pub use validate::{check_closure, check_overlap, check_planarity, Check, Defect, OverlapScan, ValidateOptions};
