use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{Ball, Cuboid, Triangle};
use alloc::vec::Vec;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: u32,
    },
    /// A vertex has a NaN or infinite coordinate.
    #[error("the vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(u32),
}

/// A triangle mesh, described by a vertex buffer and an index buffer.
///
/// The mesh is expected to be closed and consistently oriented (counter-clockwise
/// when seen from the outside) whenever it is used as the input of a signed
/// distance field bake.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        if let Some(i) = vertices
            .iter()
            .position(|pt| pt.coords.iter().any(|e| !e.is_finite()))
        {
            return Err(TriMeshBuilderError::NonFiniteVertex(i as u32));
        }

        let num_vertices = vertices.len() as u32;

        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i >= num_vertices) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    index: *index,
                    num_vertices,
                });
            }
        }

        let aabb = Aabb::from_points(&vertices);

        Ok(Self {
            vertices,
            indices,
            aabb,
        })
    }

    /// The closed triangle mesh of the boundary of a cuboid.
    pub fn cuboid(half_extents: Vector<Real>) -> Result<Self, TriMeshBuilderError> {
        let (vtx, idx) = Cuboid::new(half_extents).to_trimesh();
        Self::new(vtx, idx)
    }

    /// The closed triangle mesh of the boundary of a ball.
    ///
    /// The sphere is discretized with `ntheta_subdiv` subdivisions around its
    /// equator and `nphi_subdiv` subdivisions from pole to pole.
    pub fn ball(
        radius: Real,
        ntheta_subdiv: u32,
        nphi_subdiv: u32,
    ) -> Result<Self, TriMeshBuilderError> {
        let (vtx, idx) = Ball::new(radius).to_trimesh(ntheta_subdiv, nphi_subdiv);
        Self::new(vtx, idx)
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The AABB of this mesh in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Gets the i-th mesh triangle.
    #[inline]
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }

    /// Applies a translation to every vertex of this mesh.
    pub fn translate(&mut self, shift: &Vector<Real>) {
        self.vertices.iter_mut().for_each(|pt| *pt += shift);
        self.aabb = Aabb::new(self.aabb.mins + shift, self.aabb.maxs + shift);
    }
}

#[cfg(test)]
mod test {
    use super::{TriMesh, TriMeshBuilderError};
    use crate::math::{Point, Real, Vector};

    #[test]
    fn trimesh_rejects_empty_indices() {
        assert_eq!(
            TriMesh::new(vec![Point::origin()], vec![]).unwrap_err(),
            TriMeshBuilderError::EmptyIndices
        );
    }

    #[test]
    fn trimesh_rejects_out_of_bounds_index() {
        let vtx = vec![Point::origin(), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)];
        assert_eq!(
            TriMesh::new(vtx, vec![[0, 1, 3]]).unwrap_err(),
            TriMeshBuilderError::IndexOutOfBounds {
                triangle: 0,
                index: 3,
                num_vertices: 3
            }
        );
    }

    #[test]
    fn trimesh_rejects_non_finite_vertex() {
        let vtx = vec![
            Point::origin(),
            Point::new(Real::NAN, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(
            TriMesh::new(vtx, vec![[0, 1, 2]]).unwrap_err(),
            TriMeshBuilderError::NonFiniteVertex(1)
        );
    }

    #[test]
    fn cuboid_trimesh_aabb() {
        let mut mesh = TriMesh::cuboid(Vector::new(0.5, 1.0, 2.0)).unwrap();
        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.local_aabb().extents(), Vector::new(1.0, 2.0, 4.0));

        mesh.translate(&Vector::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.local_aabb().center(), Point::new(1.0, 0.0, 0.0));
    }
}
