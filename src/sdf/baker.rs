use crate::math::{Point, Real, Vector};
use crate::sdf::{ExternalServiceError, ScalarField, ServiceKind};
use crate::shape::TriMesh;
use crate::transformation::voxelization::{VoxelBox, VoxelGrid};
use alloc::vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A service computing the signed distance field of a mesh over a voxel grid.
///
/// A baker may hold resources (e.g. GPU textures) between [`SdfBaker::bake`]
/// and [`SdfBaker::release`]. The sampling pipeline calls `release` exactly
/// once after every bake attempt, whether the bake succeeded or not.
pub trait SdfBaker {
    /// Computes the signed distance field of `mesh` over `voxel_box`.
    ///
    /// The returned field has one cell-centered sample per voxel of `grid`.
    /// Values are negative inside of the mesh and positive outside.
    fn bake(
        &mut self,
        mesh: &TriMesh,
        voxel_box: &VoxelBox,
        grid: &VoxelGrid,
    ) -> Result<ScalarField, ExternalServiceError>;

    /// Frees the resources acquired by the last bake.
    fn release(&mut self);
}

/// A CPU signed distance field baker.
///
/// The distance of each sample is computed by projecting it on every triangle
/// of the mesh, and its sign is deduced from the generalized winding number of
/// the mesh around it. This is exact for closed meshes, and robust to small
/// holes and non-manifold parts.
///
/// With the `parallel` feature, the Z slices of the grid are baked in parallel.
#[derive(Copy, Clone, Debug, Default)]
pub struct TriMeshSdfBaker {
    num_bakes: u32,
}

impl TriMeshSdfBaker {
    /// Creates a new CPU baker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bakes performed by this baker since its last release.
    pub fn num_bakes(&self) -> u32 {
        self.num_bakes
    }
}

impl SdfBaker for TriMeshSdfBaker {
    fn bake(
        &mut self,
        mesh: &TriMesh,
        voxel_box: &VoxelBox,
        grid: &VoxelGrid,
    ) -> Result<ScalarField, ExternalServiceError> {
        let [nx, ny, nz] = grid.dims;

        if grid.num_voxels() == 0 {
            return Err(ExternalServiceError::new(
                ServiceKind::SdfBaker,
                "cannot bake an SDF on a grid with zero voxels",
            ));
        }

        let mins = voxel_box.mins();
        let voxel_size = voxel_box.size.component_div(&grid.dims_vector());
        let slice_len = nx as usize * ny as usize;

        log::debug!(
            "Baking the SDF of a mesh with {} triangles on a {}x{}x{} grid.",
            mesh.num_triangles(),
            nx,
            ny,
            nz
        );

        let bake_slice = |k: usize, slice: &mut [Real]| {
            for (id, value) in slice.iter_mut().enumerate() {
                let (i, j) = (id % nx as usize, id / nx as usize);
                let ijk = Vector::new(i as Real, j as Real, k as Real);
                let center: Point<Real> =
                    mins + (ijk + Vector::repeat(0.5)).component_mul(&voxel_size);
                *value = mesh.signed_distance_to_local_point(&center);
            }
        };

        let mut values = vec![0.0; grid.num_voxels()];

        #[cfg(feature = "parallel")]
        values
            .par_chunks_mut(slice_len)
            .enumerate()
            .for_each(|(k, slice)| bake_slice(k, slice));

        #[cfg(not(feature = "parallel"))]
        values
            .chunks_mut(slice_len)
            .enumerate()
            .for_each(|(k, slice)| bake_slice(k, slice));

        self.num_bakes += 1;

        Ok(ScalarField::new(grid.dims, values))
    }

    fn release(&mut self) {
        log::trace!("Releasing the CPU SDF baker after {} bake(s).", self.num_bakes);
        self.num_bakes = 0;
    }
}
