use granular3d::collider::{ColliderParameters, ParticleCollider};
use granular3d::math::{Real, Vector};
use granular3d::shape::TriMesh;

#[test]
fn collider_samples_a_unit_cube() {
    let cube = TriMesh::cuboid(Vector::repeat(0.5)).unwrap();
    let mut collider = ParticleCollider::new(ColliderParameters::default());
    collider.initialize(&cube, 0.1, 64).unwrap();

    let particles = collider.particles().unwrap();
    let grid = collider.grid().unwrap();
    let substance = particles.substance();

    assert!(!particles.is_empty());
    assert_eq!(grid.len(), particles.len());
    assert_eq!(substance.elements().len(), 1);
    assert_relative_eq!(substance.elements()[0].radius(), 0.1);
    assert_relative_eq!(grid.cell_size(), 0.3, epsilon = 1.0e-6);

    // Every particle finds itself and lies near the cube surface.
    let voxel = collider.mesh_sdf().unwrap().voxel_box().size.max() / 64.0;
    for (i, pt) in particles.positions().enumerate().step_by(97) {
        assert!(collider.particles_near(&pt, 0.0).contains(&(i as u32)));
        let dist = collider.distance_to_mesh(&pt).unwrap();
        assert!(dist.abs() <= (3.0 as Real).sqrt() * voxel, "{}", dist);
    }

    collider.dispose();
    assert!(!collider.is_initialized());
}
