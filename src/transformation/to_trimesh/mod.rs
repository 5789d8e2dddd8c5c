//! Triangle mesh generation from geometric shapes.
//!
//! Every shape here returns a `(Vec<Point<Real>>, Vec<[u32; 3]>)` pair of
//! vertices and triangle indices, counterclockwise when seen from the outside.
//! These meshes are closed, which makes them valid inputs for
//! [`TriMesh::new`](crate::shape::TriMesh::new) and for signed distance field
//! baking.
//!
//! ```
//! # #[cfg(feature = "f32")] {
//! use granular3d::shape::{Ball, Cuboid};
//! use granular3d::math::Vector;
//!
//! let (vertices, indices) = Cuboid::new(Vector::new(1.0, 2.0, 3.0)).to_trimesh();
//! assert_eq!(vertices.len(), 8);
//! assert_eq!(indices.len(), 12);
//!
//! let (vertices, indices) = Ball::new(5.0).to_trimesh(16, 8);
//! assert_eq!(vertices.len(), 16 * 7 + 2);
//! assert_eq!(indices.len(), 2 * 16 * 7);
//! # }
//! ```

mod ball_to_trimesh;
mod cuboid_to_trimesh;
