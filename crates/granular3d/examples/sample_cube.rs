extern crate nalgebra as na;

use granular3d::collider::{ColliderParameters, ParticleCollider};
use granular3d::shape::TriMesh;
use na::{Point3, Vector3};

fn main() {
    let cube = TriMesh::cuboid(Vector3::repeat(0.5)).expect("the cube mesh is valid");
    let params = ColliderParameters::default();
    let mut collider = ParticleCollider::new(params);

    /*
     * Sample the cube into particles and index them in a grid.
     */
    collider
        .initialize(&cube, params.particle_radius, params.max_resolution)
        .expect("the cube can be sampled");

    let particles = collider.particles().expect("the collider is initialized");
    let grid = collider.grid().expect("the collider is initialized");
    println!(
        "Sampled {} particles, indexed in a {:?} grid.",
        particles.len(),
        grid.dims()
    );

    /*
     * Query the particles around a corner, and the distance to the cube.
     */
    let corner = Point3::new(0.5, 0.5, 0.5);
    let near = collider.particles_near(&corner, params.particle_radius);
    println!("{} particles around the corner {}.", near.len(), corner);

    for pt in [Point3::origin(), Point3::new(0.0, 0.0, 1.0)] {
        let dist = collider.distance_to_mesh(&pt).expect("the collider is initialized");
        println!("Signed distance from {} to the cube: {}", pt, dist);
    }

    collider.dispose();
}
