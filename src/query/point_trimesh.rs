use crate::math::{Point, Real};
use crate::shape::TriMesh;
use na::RealField;

impl TriMesh {
    /// The generalized winding number of this mesh around `pt`.
    ///
    /// This is the sum of the solid angles of all the triangles seen from `pt`,
    /// divided by `4π`. It is close to 1 for points inside a closed mesh with
    /// outward-facing triangles, and close to 0 for points outside. Unlike ray
    /// parity tests, it degrades gracefully on meshes with small holes.
    pub fn winding_number(&self, pt: &Point<Real>) -> Real {
        let total: Real = self.triangles().map(|tri| tri.solid_angle(pt)).sum();
        total / (Real::two_pi() * 2.0)
    }

    /// Tests if `pt` is inside this mesh, based on its winding number.
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.winding_number(pt) > 0.5
    }

    /// The unsigned distance between `pt` and the closest triangle of this mesh.
    pub fn distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        self.triangles()
            .map(|tri| na::distance_squared(pt, &tri.project_local_point(pt)))
            .fold(Real::MAX, Real::min)
            .sqrt()
    }

    /// The signed distance between `pt` and the surface of this mesh.
    ///
    /// The distance is negative inside of the mesh and positive outside.
    pub fn signed_distance_to_local_point(&self, pt: &Point<Real>) -> Real {
        let mut dist2 = Real::MAX;
        let mut solid_angle = 0.0;

        for tri in self.triangles() {
            dist2 = dist2.min(na::distance_squared(pt, &tri.project_local_point(pt)));
            solid_angle += tri.solid_angle(pt);
        }

        let dist = dist2.sqrt();

        if solid_angle / (Real::two_pi() * 2.0) > 0.5 {
            -dist
        } else {
            dist
        }
    }
}
