//! Non-persistent geometric queries.
//!
//! * [`Triangle::project_local_point`](crate::shape::Triangle::project_local_point)
//!   and [`TriMesh::distance_to_local_point`](crate::shape::TriMesh::distance_to_local_point)
//!   for point projection.
//! * [`Triangle::solid_angle`](crate::shape::Triangle::solid_angle) and
//!   [`TriMesh::winding_number`](crate::shape::TriMesh::winding_number) for
//!   robust inside/outside classification.

pub use self::point_triangle::TrianglePointLocation;

mod point_triangle;
mod point_trimesh;
