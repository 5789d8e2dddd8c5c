use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Cuboid;
use crate::transformation::utils;
use alloc::vec::Vec;

impl Aabb {
    /// Discretize the boundary of this AABB as a triangle-mesh.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let center = self.center();
        let mut cube_mesh = Cuboid::new(self.half_extents()).to_trimesh();
        cube_mesh.0.iter_mut().for_each(|p| *p += center.coords);
        cube_mesh
    }
}

impl Cuboid {
    /// Discretize the boundary of this cuboid as a triangle-mesh.
    ///
    /// The faces are counterclockwise when seen from the outside.
    pub fn to_trimesh(&self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let (vtx, idx) = unit_cuboid();
        (utils::scaled(vtx, self.half_extents * 2.0), idx)
    }
}

/// A cuboid centered at the origin with half-extents set to 0.5.
fn unit_cuboid() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let coords = Vec::from([
        Point::new(-0.5, -0.5, 0.5),
        Point::new(-0.5, -0.5, -0.5),
        Point::new(0.5, -0.5, -0.5),
        Point::new(0.5, -0.5, 0.5),
        Point::new(-0.5, 0.5, 0.5),
        Point::new(-0.5, 0.5, -0.5),
        Point::new(0.5, 0.5, -0.5),
        Point::new(0.5, 0.5, 0.5),
    ]);

    let faces = Vec::from([
        // -x
        [4, 5, 0],
        [5, 1, 0],
        // -z
        [5, 6, 1],
        [6, 2, 1],
        // +x
        [6, 7, 3],
        [2, 6, 3],
        // +z
        [7, 4, 0],
        [3, 7, 0],
        // -y
        [0, 1, 2],
        [3, 0, 2],
        // +y
        [7, 6, 5],
        [4, 7, 5],
    ]);

    (coords, faces)
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Vector};
    use crate::shape::Triangle;

    #[test]
    fn cuboid_faces_point_outward() {
        let aabb = Aabb::new(Point::new(1.0, 1.0, 1.0), Point::new(2.0, 3.0, 4.0));
        let (vtx, idx) = aabb.to_trimesh();
        let center = aabb.center();

        for tri in idx {
            let tri = Triangle::new(
                vtx[tri[0] as usize],
                vtx[tri[1] as usize],
                vtx[tri[2] as usize],
            );
            let outward: Vector<_> = tri.center() - center;
            assert!(tri.scaled_normal().dot(&outward) > 0.0);
        }
    }
}
