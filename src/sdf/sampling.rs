use crate::math::{Point, Real};
use crate::sdf::{
    IsoSurfaceExtractor, SamplingError, ScalarField, SdfBaker, SurfaceNetsExtractor,
    TriMeshSdfBaker,
};
use crate::shape::TriMesh;
use crate::transformation::voxelization::VoxelBox;
use alloc::vec::{self, Vec};

/// The default iso-level at which the surface is extracted from a baked field.
pub const DEFAULT_ISOLEVEL: Real = 0.005;

/// The default number of voxels along the largest axis of a mesh.
pub const DEFAULT_RESOLUTION: u32 = 64;

/// Parameters of the surface sampling pipeline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SamplingParameters {
    /// The number of voxels along the largest axis of the padded mesh box.
    ///
    /// Default: 64
    pub resolution: u32,
    /// The value of the signed distance field at which the surface is extracted.
    ///
    /// Default: 0.005
    pub isolevel: Real,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            isolevel: DEFAULT_ISOLEVEL,
        }
    }
}

/// The point samples of a mesh surface, expressed in the local frame of the mesh.
///
/// The samples are not welded: there is one point per vertex of every
/// extracted triangle, so points shared by adjacent triangles appear several
/// times.
#[derive(Clone, Debug)]
pub struct SurfaceSamples {
    points: vec::IntoIter<Point<Real>>,
}

impl SurfaceSamples {
    /// The remaining samples, as a slice.
    pub fn as_slice(&self) -> &[Point<Real>] {
        self.points.as_slice()
    }
}

impl Iterator for SurfaceSamples {
    type Item = Point<Real>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.points.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for SurfaceSamples {}

/// A baked signed distance field, together with the box it covers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshSdf {
    field: ScalarField,
    voxel_box: VoxelBox,
}

impl MeshSdf {
    /// Wraps a field baked over `voxel_box`.
    pub fn new(field: ScalarField, voxel_box: VoxelBox) -> Self {
        Self { field, voxel_box }
    }

    /// The underlying scalar field.
    #[inline]
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// The box covered by the field, in the local frame of the mesh.
    #[inline]
    pub fn voxel_box(&self) -> &VoxelBox {
        &self.voxel_box
    }

    /// Approximates the signed distance between `pt` and the mesh surface.
    ///
    /// Inside of the box, this is the trilinear interpolation of the field. Outside
    /// of it, the distance to the box is added to the interpolated value at the
    /// closest point of the box, which overestimates the true distance.
    pub fn distance(&self, pt: &Point<Real>) -> Real {
        let aabb = self.voxel_box.aabb();
        let clamped = aabb.clamp_local_point(pt);
        let scale = self.field.dims_vector().component_div(&self.voxel_box.size);
        let voxel_pt = Point::from((clamped - aabb.mins).component_mul(&scale));

        self.field.interpolate(&voxel_pt) + na::distance(pt, &clamped)
    }
}

/// Calls `SdfBaker::release` when dropped.
struct ReleaseOnDrop<'a, B: SdfBaker>(&'a mut B);

impl<B: SdfBaker> Drop for ReleaseOnDrop<'_, B> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// Samples points on the surface of triangle meshes.
///
/// The mesh is baked into a signed distance field covering a padded,
/// voxel-aligned box. An iso-surface is then extracted from that field, and
/// its vertices are mapped back to the local frame of the mesh.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use granular3d::math::Vector;
/// use granular3d::sdf::{SamplingParameters, SurfaceSampler};
/// use granular3d::shape::TriMesh;
///
/// let mesh = TriMesh::cuboid(Vector::repeat(0.5)).unwrap();
/// let params = SamplingParameters { resolution: 16, ..Default::default() };
/// let mut sampler = SurfaceSampler::from_parameters(params);
/// let samples = sampler.sample_surface(&mesh).unwrap();
///
/// assert!(samples.len() > 0);
/// assert_eq!(samples.len() % 3, 0);
/// # }
/// ```
pub struct SurfaceSampler<B = TriMeshSdfBaker, E = SurfaceNetsExtractor> {
    baker: B,
    extractor: E,
    params: SamplingParameters,
}

impl SurfaceSampler<TriMeshSdfBaker, SurfaceNetsExtractor> {
    /// A sampler using the CPU baker and the Surface Nets extractor.
    pub fn from_parameters(params: SamplingParameters) -> Self {
        Self::new(TriMeshSdfBaker::new(), SurfaceNetsExtractor::new(), params)
    }
}

impl Default for SurfaceSampler<TriMeshSdfBaker, SurfaceNetsExtractor> {
    fn default() -> Self {
        Self::from_parameters(SamplingParameters::default())
    }
}

impl<B: SdfBaker, E: IsoSurfaceExtractor> SurfaceSampler<B, E> {
    /// Creates a sampler from its baker, its extractor and its parameters.
    pub fn new(baker: B, extractor: E, params: SamplingParameters) -> Self {
        Self {
            baker,
            extractor,
            params,
        }
    }

    /// The parameters of this sampler.
    pub fn parameters(&self) -> &SamplingParameters {
        &self.params
    }

    /// A mutable reference to the parameters of this sampler.
    pub fn parameters_mut(&mut self) -> &mut SamplingParameters {
        &mut self.params
    }

    /// The signed distance field baker.
    pub fn baker(&self) -> &B {
        &self.baker
    }

    /// The iso-surface extractor.
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Consumes this sampler and returns its baker and its extractor.
    pub fn into_services(self) -> (B, E) {
        (self.baker, self.extractor)
    }

    /// Samples points on the surface of `mesh`.
    ///
    /// The baked field is dropped before this returns, and the baker is
    /// released whether the bake and the extraction succeed or not.
    pub fn sample_surface(&mut self, mesh: &TriMesh) -> Result<SurfaceSamples, SamplingError> {
        let (samples, field, _) = self.bake_and_extract(mesh)?;
        drop(field);
        Ok(samples)
    }

    /// Samples points on the surface of `mesh`, and keeps the baked field.
    ///
    /// The returned [`MeshSdf`] can answer distance queries against the mesh.
    pub fn sample_surface_with_sdf(
        &mut self,
        mesh: &TriMesh,
    ) -> Result<(SurfaceSamples, MeshSdf), SamplingError> {
        let (samples, field, voxel_box) = self.bake_and_extract(mesh)?;
        Ok((samples, MeshSdf::new(field, voxel_box)))
    }

    fn bake_and_extract(
        &mut self,
        mesh: &TriMesh,
    ) -> Result<(SurfaceSamples, ScalarField, VoxelBox), SamplingError> {
        let (voxel_box, grid) = VoxelBox::padded_around(mesh.local_aabb(), self.params.resolution)?;

        let baker = ReleaseOnDrop(&mut self.baker);
        let field = baker
            .0
            .bake(mesh, &voxel_box, &grid)
            .map_err(SamplingError::Bake)?;
        let soup = self
            .extractor
            .extract(&field, self.params.isolevel)
            .map_err(SamplingError::Extract)?;
        drop(baker);

        let dims = field.dims_vector();
        let points: Vec<_> = soup
            .vertices
            .iter()
            .map(|pt| voxel_box.voxel_to_local(pt, &dims))
            .collect();

        if points.is_empty() {
            log::warn!(
                "No surface was found in the SDF of a mesh with {} triangles.",
                mesh.num_triangles()
            );
        } else {
            log::debug!(
                "Sampled {} surface points ({} triangles).",
                points.len(),
                soup.num_triangles()
            );
        }

        let samples = SurfaceSamples {
            points: points.into_iter(),
        };

        Ok((samples, field, voxel_box))
    }
}
