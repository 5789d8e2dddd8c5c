//! Sampling of mesh surfaces through signed distance fields.
//!
//! The pipeline implemented by [`SurfaceSampler`] has three stages:
//!
//! 1. the mesh bounding box is padded and snapped to a cubic-voxel grid (see
//!    [`VoxelBox::padded_around`](crate::transformation::voxelization::VoxelBox::padded_around));
//! 2. an [`SdfBaker`] computes the signed distance field of the mesh on that grid;
//! 3. an [`IsoSurfaceExtractor`] extracts the surface of the field as a triangle
//!    soup, whose vertices are mapped back to the local frame of the mesh.
//!
//! The baker and the extractor are traits so they can be backed by external
//! (e.g. GPU) services. [`TriMeshSdfBaker`] and [`SurfaceNetsExtractor`] are
//! the CPU implementations used by default.

pub use self::baker::{SdfBaker, TriMeshSdfBaker};
pub use self::error::{ExternalServiceError, SamplingError, ServiceKind};
pub use self::extractor::{IsoSurfaceExtractor, SurfaceNetsExtractor, TriangleSoup};
pub use self::sampling::{
    MeshSdf, SamplingParameters, SurfaceSampler, SurfaceSamples, DEFAULT_ISOLEVEL,
    DEFAULT_RESOLUTION,
};
pub use self::scalar_field::ScalarField;

mod baker;
mod error;
mod extractor;
mod sampling;
mod scalar_field;
