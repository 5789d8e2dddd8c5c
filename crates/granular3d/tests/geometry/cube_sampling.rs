use granular3d::math::{Point, Real, Vector};
use granular3d::sdf::SurfaceSampler;
use granular3d::shape::TriMesh;
use granular3d::transformation::voxelization::VoxelBox;

#[test]
fn unit_cube_samples_lie_near_the_surface() {
    let cube = TriMesh::cuboid(Vector::repeat(0.5)).unwrap();
    let (_, grid) = VoxelBox::padded_around(cube.local_aabb(), 64).unwrap();
    let tolerance = (3.0 as Real).sqrt() * grid.voxel_size;

    let mut sampler = SurfaceSampler::default();
    let samples = sampler.sample_surface(&cube).unwrap();
    assert!(samples.len() > 0);
    assert_eq!(samples.len() % 3, 0);

    for pt in samples {
        let dist = cube.distance_to_local_point(&pt);
        assert!(dist <= tolerance, "{:?} is {} away from the cube", pt, dist);
    }
}

#[test]
fn samples_follow_the_mesh_position() {
    let mut cube = TriMesh::cuboid(Vector::new(1.0, 0.5, 0.25)).unwrap();
    let shift = Vector::new(10.0, -3.0, 2.0);
    cube.translate(&shift);

    let mut sampler = SurfaceSampler::default();
    sampler.parameters_mut().resolution = 24;
    let (samples, sdf) = sampler.sample_surface_with_sdf(&cube).unwrap();

    let center = samples.as_slice().iter().fold(Vector::zeros(), |acc, pt| acc + pt.coords)
        / samples.len() as Real;
    assert_relative_eq!(center, shift, epsilon = 0.05);

    assert_relative_eq!(sdf.distance(&Point::from(shift)), -0.25, epsilon = 0.1);
    assert_relative_eq!(
        sdf.distance(&Point::from(shift + Vector::new(3.0, 0.0, 0.0))),
        2.0,
        epsilon = 0.1
    );
}

#[test]
fn ball_samples_lie_near_the_sphere() {
    let ball = TriMesh::ball(1.0, 32, 16).unwrap();
    let mut sampler = SurfaceSampler::default();
    sampler.parameters_mut().resolution = 32;
    let samples = sampler.sample_surface(&ball).unwrap();

    assert!(samples.len() > 0);

    for pt in samples {
        // The ball mesh is a polyhedral approximation of the unit sphere.
        assert_relative_eq!(pt.coords.norm(), 1.0, epsilon = 0.1);
    }
}
