//! Mesh generation, import and voxelization.

mod to_trimesh;
pub mod utils;
/// Voxelization of a bounding box into a grid of cubic voxels.
pub mod voxelization;

#[cfg(feature = "wavefront")]
pub mod wavefront;
