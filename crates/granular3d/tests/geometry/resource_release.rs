use granular3d::bounding_volume::Aabb;
use granular3d::buffer::ExternalBuffer;
use granular3d::collider::{ColliderParameters, ParticleCollider};
use granular3d::math::{Point, Vector};
use granular3d::particle::{GranularParticle, ParticleState};
use granular3d::partitioning::SpatialGrid;
use granular3d::sdf::{ExternalServiceError, ScalarField, SdfBaker, SurfaceNetsExtractor, TriMeshSdfBaker};
use granular3d::shape::TriMesh;
use granular3d::substance::ParticleSubstance;
use granular3d::transformation::voxelization::{VoxelBox, VoxelGrid};
use std::sync::Arc;

#[derive(Default)]
struct TrackingBuffer {
    uploads: u32,
    releases: u32,
}

impl<T> ExternalBuffer<T> for TrackingBuffer {
    fn upload(&mut self, _: &[T]) {
        self.uploads += 1;
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

#[test]
fn particle_buffers_are_released_once() {
    let substance = Arc::new(ParticleSubstance::tetrahedron(0.04, 2000.0, 0.05).unwrap());
    let states = ParticleState::from_vertices([Point::origin(), Point::new(1.0, 0.0, 0.0)]);
    let mut particles = GranularParticle::with_buffer(states, substance, TrackingBuffer::default());

    particles.release();
    particles.release();
    assert_eq!(particles.buffer().uploads, 1);
    assert_eq!(particles.buffer().releases, 1);
}

#[test]
fn grid_buffers_are_released_once() {
    let bounds = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let mut grid = SpatialGrid::with_buffers(
        bounds,
        0.3,
        TrackingBuffer::default(),
        TrackingBuffer::default(),
    )
    .unwrap();

    grid.rebuild(&[Point::new(0.5, 0.5, 0.5)]).unwrap();
    grid.rebuild(&[]).unwrap();
    grid.release();
    grid.release();

    assert_eq!(grid.cell_buffer().uploads, 2);
    assert_eq!(grid.cell_buffer().releases, 1);
    assert_eq!(grid.index_buffer().uploads, 2);
    assert_eq!(grid.index_buffer().releases, 1);
}

#[derive(Default)]
struct CountingBaker {
    inner: TriMeshSdfBaker,
    bakes: u32,
    releases: u32,
}

impl SdfBaker for CountingBaker {
    fn bake(
        &mut self,
        mesh: &TriMesh,
        voxel_box: &VoxelBox,
        grid: &VoxelGrid,
    ) -> Result<ScalarField, ExternalServiceError> {
        self.bakes += 1;
        self.inner.bake(mesh, voxel_box, grid)
    }

    fn release(&mut self) {
        self.releases += 1;
        self.inner.release();
    }
}

#[test]
fn collider_releases_the_baker_after_each_bake() {
    let mesh = TriMesh::cuboid(Vector::repeat(0.5)).unwrap();
    let mut collider = ParticleCollider::with_services(
        CountingBaker::default(),
        SurfaceNetsExtractor::new(),
        ColliderParameters::default(),
    );

    collider.initialize(&mesh, 0.1, 8).unwrap();
    collider.dispose();
    collider.initialize(&mesh, 0.1, 8).unwrap();
    collider.dispose();

    let baker = collider.sampler().baker();
    assert_eq!(baker.bakes, 2);
    assert_eq!(baker.releases, 2);
}
