use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;

/// Logical description of the location of a point projected on a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TrianglePointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on an edge.
    ///
    /// The 0-th edge is the segment AB.
    /// The 1-st edge is the segment BC.
    /// The 2-nd edge is the segment AC.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior, with the given barycentric coordinates.
    OnFace([Real; 3]),
}

impl TrianglePointLocation {
    /// The barycentric coordinates corresponding to this location.
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        match self {
            TrianglePointLocation::OnVertex(0) => [1.0, 0.0, 0.0],
            TrianglePointLocation::OnVertex(1) => [0.0, 1.0, 0.0],
            TrianglePointLocation::OnVertex(_) => [0.0, 0.0, 1.0],
            TrianglePointLocation::OnEdge(0, uv) => [uv[0], uv[1], 0.0],
            TrianglePointLocation::OnEdge(1, uv) => [0.0, uv[0], uv[1]],
            TrianglePointLocation::OnEdge(_, uv) => [uv[0], 0.0, uv[1]],
            TrianglePointLocation::OnFace(bcoords) => *bcoords,
        }
    }
}

impl Triangle {
    /// Projects a point on the boundary of this triangle.
    #[inline]
    pub fn project_local_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.project_local_point_and_get_location(pt).0
    }

    /// The unsigned distance between `pt` and this triangle.
    #[inline]
    pub fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        na::distance(pt, &self.project_local_point(pt))
    }

    /// Projects a point on this triangle and returns the feature it was projected on.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, TrianglePointLocation) {
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let ab_ap = ab.dot(&ap);
        let ac_ap = ac.dot(&ap);

        if ab_ap <= 0.0 && ac_ap <= 0.0 {
            // Voronoï region of `a`.
            return (a, TrianglePointLocation::OnVertex(0));
        }

        let bp = pt - b;
        let ab_bp = ab.dot(&bp);
        let ac_bp = ac.dot(&bp);

        if ab_bp >= 0.0 && ac_bp <= ab_bp {
            // Voronoï region of `b`.
            return (b, TrianglePointLocation::OnVertex(1));
        }

        let cp = pt - c;
        let ab_cp = ab.dot(&cp);
        let ac_cp = ac.dot(&cp);

        if ac_cp >= 0.0 && ab_cp <= ac_cp {
            // Voronoï region of `c`.
            return (c, TrianglePointLocation::OnVertex(2));
        }

        let bc = c - b;
        let n = ab.cross(&ac);

        let vc = n.dot(&ab.cross(&ap));
        if vc < 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
            // Voronoï region of `ab`.
            let v = ab_ap / ab.norm_squared();
            return (a + ab * v, TrianglePointLocation::OnEdge(0, [1.0 - v, v]));
        }

        let vb = -n.dot(&ac.cross(&cp));
        if vb < 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
            // Voronoï region of `ac`.
            let w = ac_ap / ac.norm_squared();
            return (a + ac * w, TrianglePointLocation::OnEdge(2, [1.0 - w, w]));
        }

        let va = n.dot(&bc.cross(&bp));
        if va < 0.0 && ac_bp - ab_bp >= 0.0 && ab_cp - ac_cp >= 0.0 {
            // Voronoï region of `bc`.
            let w = bc.dot(&bp) / bc.norm_squared();
            return (b + bc * w, TrianglePointLocation::OnEdge(1, [1.0 - w, w]));
        }

        let sum = va + vb + vc;

        if sum != 0.0 {
            // Voronoï region of the face.
            let v = vb / sum;
            let w = vc / sum;
            return (
                a + ab * v + ac * w,
                TrianglePointLocation::OnFace([1.0 - v - w, v, w]),
            );
        }

        // The triangle is degenerate: fall back to the closest edge.
        self.project_on_closest_edge(pt)
    }

    fn project_on_closest_edge(&self, pt: &Point<Real>) -> (Point<Real>, TrianglePointLocation) {
        let edges = [(0, self.a, self.b), (1, self.b, self.c), (2, self.a, self.c)];
        let mut best = (self.a, TrianglePointLocation::OnVertex(0));
        let mut best_dist = Real::MAX;

        for (id, start, end) in edges {
            let dir: Vector<Real> = end - start;
            let len2 = dir.norm_squared();
            let t = if len2 > 0.0 {
                ((pt - start).dot(&dir) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let proj = start + dir * t;
            let dist = na::distance_squared(pt, &proj);

            if dist < best_dist {
                best_dist = dist;
                best = (proj, TrianglePointLocation::OnEdge(id, [1.0 - t, t]));
            }
        }

        best
    }

    /// The signed solid angle subtended by this triangle when seen from `pt`.
    ///
    /// The angle is positive if `pt` lies behind the triangle, i.e., on the
    /// opposite side of its counterclockwise normal. It is computed with the
    /// formula from Van Oosterom and Strackee.
    pub fn solid_angle(&self, pt: &Point<Real>) -> Real {
        let a = self.a - pt;
        let b = self.b - pt;
        let c = self.c - pt;
        let (la, lb, lc) = (a.norm(), b.norm(), c.norm());

        let numer = a.dot(&b.cross(&c));
        let denom = la * lb * lc + a.dot(&b) * lc + a.dot(&c) * lb + b.dot(&c) * la;

        2.0 * numer.atan2(denom)
    }
}
