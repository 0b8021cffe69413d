//! Exact integer predicates: point orientation and segment intersection.

use std::cmp::Ordering;

use geo::algorithm::kernels::Orientation;
use geo::Line;

use crate::dcel::Point;

/// Turn direction of `a → b → c`, from the sign of `(b − a) × (c − b)`.
///
/// Computed in `i128`, so any pair of `i32` points is exact.
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let (ax, ay) = (i128::from(a.x), i128::from(a.y));
    let (bx, by) = (i128::from(b.x), i128::from(b.y));
    let (cx, cy) = (i128::from(c.x), i128::from(c.y));

    let cross = (bx - ax) * (cy - by) - (by - ay) * (cx - bx);
    match cross.cmp(&0) {
        Ordering::Greater => Orientation::CounterClockwise,
        Ordering::Less    => Orientation::Clockwise,
        Ordering::Equal   => Orientation::Collinear,
    }
}

/// `q` lies inside the axis-aligned box spanned by `p` and `r`.  Only
/// meaningful when the three points are collinear.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) &&
    q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether two closed segments intersect.
///
/// Segments with a coincident endpoint are reported as *not* intersecting,
/// whatever else they do; callers use this to ignore contact at shared
/// vertices.  Otherwise a proper crossing, an endpoint touching the other
/// segment, and collinear overlap all count.
pub fn segments_intersect(s: Line<i32>, t: Line<i32>) -> bool {
    let (p1, q1) = (s.start, s.end);
    let (p2, q2) = (t.start, t.end);

    if p1 == p2 || p1 == q2 || q1 == p2 || q1 == q2 {
        return false;
    }

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1)) ||
    (o2 == Orientation::Collinear && on_segment(p1, q2, q1)) ||
    (o3 == Orientation::Collinear && on_segment(p2, p1, q2)) ||
    (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}
