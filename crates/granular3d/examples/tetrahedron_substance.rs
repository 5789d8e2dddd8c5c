extern crate nalgebra as na;

use granular3d::substance::{
    ParticleSubstance, DEFAULT_DENSITY, DEFAULT_FRICTION, DEFAULT_PARTICLE_RADIUS,
};
use na::{UnitQuaternion, Vector3};

fn main() {
    let substance =
        ParticleSubstance::tetrahedron(DEFAULT_PARTICLE_RADIUS, DEFAULT_DENSITY, DEFAULT_FRICTION)
            .expect("the default tetrahedron is a valid substance");

    for (i, elt) in substance.elements().iter().enumerate() {
        println!(
            "Element {}: radius {}, mass {}, offset {}",
            i,
            elt.radius(),
            elt.mass(),
            elt.offset()
        );
    }

    println!("Total mass: {}", substance.total_mass());
    println!("Center of mass: {}", substance.center_of_mass());
    println!("Inverse inertia: {}", substance.inverse_inertia());

    let rot = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);
    println!(
        "World inverse inertia after a rotation: {}",
        substance.world_inverse_inertia(&rot)
    );
}
