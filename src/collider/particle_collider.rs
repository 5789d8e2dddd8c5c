use crate::bounding_volume::Aabb;
use crate::collider::ColliderParameters;
use crate::math::{Point, Real};
use crate::partitioning::{SpatialGrid, SpatialGridError};
use crate::particle::{GranularParticle, ParticleState};
use crate::sdf::{
    IsoSurfaceExtractor, MeshSdf, SamplingError, SamplingParameters, SdfBaker, SurfaceNetsExtractor,
    SurfaceSampler, TriMeshSdfBaker,
};
use crate::shape::{TriMesh, TriMeshBuilderError};
use crate::substance::{InvalidSubstanceError, ParticleSubstance};
use crate::transformation::voxelization::compute_padding;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Error raised by [`ParticleCollider::initialize`].
#[derive(thiserror::Error, Debug)]
pub enum ColliderError {
    /// The collider must be disposed before being initialized again.
    #[error("the particle collider is already initialized")]
    AlreadyInitialized,
    /// The mesh buffers do not describe a valid mesh.
    #[error(transparent)]
    TriMesh(#[from] TriMeshBuilderError),
    /// The mesh surface could not be sampled.
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    /// The particle radius or material parameters are invalid.
    #[error(transparent)]
    Substance(#[from] InvalidSubstanceError),
    /// The neighbor grid could not be built.
    #[error(transparent)]
    Grid(#[from] SpatialGridError),
}

struct ColliderState {
    bounding_box: Aabb,
    mesh_sdf: MeshSdf,
    particles: GranularParticle,
    grid: SpatialGrid,
}

/// A mesh collider represented by particles sampled on its surface.
///
/// The collider has an explicit lifecycle: [`ParticleCollider::initialize`]
/// samples a mesh, seeds one particle per sample and indexes them in a
/// neighbor grid; [`ParticleCollider::dispose`] releases the particles and
/// the grid. The baked signed distance field of the mesh is kept in between
/// to answer distance queries.
pub struct ParticleCollider<B = TriMeshSdfBaker, E = SurfaceNetsExtractor> {
    params: ColliderParameters,
    sampler: SurfaceSampler<B, E>,
    state: Option<ColliderState>,
}

impl ParticleCollider<TriMeshSdfBaker, SurfaceNetsExtractor> {
    /// A collider using the CPU sampling services.
    pub fn new(params: ColliderParameters) -> Self {
        Self::with_services(TriMeshSdfBaker::new(), SurfaceNetsExtractor::new(), params)
    }
}

impl Default for ParticleCollider<TriMeshSdfBaker, SurfaceNetsExtractor> {
    fn default() -> Self {
        Self::new(ColliderParameters::default())
    }
}

impl<B: SdfBaker, E: IsoSurfaceExtractor> ParticleCollider<B, E> {
    /// A collider using the given SDF baker and iso-surface extractor.
    pub fn with_services(baker: B, extractor: E, params: ColliderParameters) -> Self {
        let sampling = SamplingParameters {
            resolution: params.max_resolution,
            isolevel: params.isolevel,
        };

        Self {
            params,
            sampler: SurfaceSampler::new(baker, extractor, sampling),
            state: None,
        }
    }

    /// The parameters of this collider.
    ///
    /// The particle radius and resolution reflect the last call to [`Self::initialize`].
    #[inline]
    pub fn parameters(&self) -> &ColliderParameters {
        &self.params
    }

    /// The surface sampler of this collider.
    #[inline]
    pub fn sampler(&self) -> &SurfaceSampler<B, E> {
        &self.sampler
    }

    /// Is this collider initialized and not yet disposed?
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Samples `mesh` into particles of the given `radius`.
    ///
    /// The mesh is voxelized with `resolution` voxels along the largest axis
    /// of its padded bounding box. On failure, the collider stays uninitialized.
    pub fn initialize(
        &mut self,
        mesh: &TriMesh,
        radius: Real,
        resolution: u32,
    ) -> Result<(), ColliderError> {
        if self.state.is_some() {
            return Err(ColliderError::AlreadyInitialized);
        }

        // Validate the material before the expensive sampling.
        let substance = ParticleSubstance::sphere(radius, self.params.density, self.params.mu)?;

        let previous = *self.sampler.parameters();
        *self.sampler.parameters_mut() = SamplingParameters {
            resolution,
            isolevel: self.params.isolevel,
        };

        let state = match self.build_state(mesh, substance, radius, resolution) {
            Ok(state) => state,
            Err(err) => {
                *self.sampler.parameters_mut() = previous;
                return Err(err);
            }
        };

        log::debug!(
            "Initialized a particle collider with {} particles of radius {}.",
            state.particles.len(),
            radius
        );

        self.params.particle_radius = radius;
        self.params.max_resolution = resolution;
        self.state = Some(state);

        Ok(())
    }

    fn build_state(
        &mut self,
        mesh: &TriMesh,
        substance: ParticleSubstance,
        radius: Real,
        resolution: u32,
    ) -> Result<ColliderState, ColliderError> {
        let (samples, mesh_sdf) = self.sampler.sample_surface_with_sdf(mesh)?;

        let aabb = mesh.local_aabb();
        let padding = compute_padding(&aabb.extents(), resolution);
        let bounding_box = aabb.add_half_extents(&(padding * 0.5));

        let states = ParticleState::from_vertices(samples);
        let positions: Vec<Point<Real>> = states.iter().map(|s| s.position).collect();
        let particles = GranularParticle::new(states, Arc::new(substance));

        let mut grid = SpatialGrid::new(bounding_box, radius * self.params.cell_size_multiplier)?;
        grid.rebuild(&positions)?;

        Ok(ColliderState {
            bounding_box,
            mesh_sdf,
            particles,
            grid,
        })
    }

    /// Builds a mesh from raw buffers, then calls [`Self::initialize`].
    pub fn initialize_from_buffers(
        &mut self,
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        radius: Real,
        resolution: u32,
    ) -> Result<(), ColliderError> {
        if self.state.is_some() {
            return Err(ColliderError::AlreadyInitialized);
        }

        let mesh = TriMesh::new(vertices, indices)?;
        self.initialize(&mesh, radius, resolution)
    }

    /// Releases the particles and the neighbor grid of this collider.
    ///
    /// Does nothing if the collider is not initialized.
    pub fn dispose(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.particles.release();
            state.grid.release();
            log::trace!("Disposed a particle collider.");
        }
    }

    /// The padded bounding box of the sampled mesh.
    pub fn bounding_box(&self) -> Option<&Aabb> {
        self.state.as_ref().map(|s| &s.bounding_box)
    }

    /// The signed distance field baked from the sampled mesh.
    pub fn mesh_sdf(&self) -> Option<&MeshSdf> {
        self.state.as_ref().map(|s| &s.mesh_sdf)
    }

    /// The particles sampled on the mesh surface.
    pub fn particles(&self) -> Option<&GranularParticle> {
        self.state.as_ref().map(|s| &s.particles)
    }

    /// The neighbor grid indexing the particles.
    pub fn grid(&self) -> Option<&SpatialGrid> {
        self.state.as_ref().map(|s| &s.grid)
    }

    /// The approximate signed distance from `pt` to the sampled mesh.
    pub fn distance_to_mesh(&self, pt: &Point<Real>) -> Option<Real> {
        self.mesh_sdf().map(|sdf| sdf.distance(pt))
    }

    /// The indices of the particles at a distance smaller or equal to `radius` from `pt`.
    pub fn particles_near(&self, pt: &Point<Real>, radius: Real) -> Vec<u32> {
        self.grid()
            .map(|grid| grid.query_neighbors(pt, radius))
            .unwrap_or_default()
    }
}
