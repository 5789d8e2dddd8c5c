use crate::math::{Point, Real, Vector};
use crate::shape::Ball;
use crate::transformation::utils;
use alloc::vec::Vec;
use na::{ComplexField, RealField};

impl Ball {
    /// Discretize the boundary of this ball as a closed triangle-mesh.
    ///
    /// The sphere is cut into `nphi_subdiv` slices from pole to pole, each ring
    /// being discretized with `ntheta_subdiv` points. Both poles are single
    /// vertices so the resulting mesh is closed without duplicated vertices.
    /// Subdivisions are clamped to at least 3 around the equator and 2 from
    /// pole to pole.
    pub fn to_trimesh(
        &self,
        ntheta_subdiv: u32,
        nphi_subdiv: u32,
    ) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let diameter = self.radius * 2.0;
        let (vtx, idx) = unit_sphere(ntheta_subdiv.max(3), nphi_subdiv.max(2));
        (utils::scaled(vtx, Vector::repeat(diameter)), idx)
    }
}

/// A closed sphere with a diameter of 1.
fn unit_sphere(ntheta_subdiv: u32, nphi_subdiv: u32) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let dtheta = Real::two_pi() / (ntheta_subdiv as Real);
    let dphi = Real::pi() / (nphi_subdiv as Real);
    let nrings = nphi_subdiv - 1;

    let mut coords = Vec::with_capacity((nrings * ntheta_subdiv + 2) as usize);
    let mut curr_phi = -Real::frac_pi_2() + dphi;

    for _ in 0..nrings {
        utils::push_circle(
            ComplexField::cos(curr_phi),
            ntheta_subdiv,
            dtheta,
            ComplexField::sin(curr_phi),
            &mut coords,
        );
        curr_phi += dphi;
    }

    let south = coords.len() as u32;
    coords.push(Point::new(0.0, -1.0, 0.0));
    let north = coords.len() as u32;
    coords.push(Point::new(0.0, 1.0, 0.0));

    let mut idx = Vec::new();

    for i in 0..nrings - 1 {
        let bottom = i * ntheta_subdiv;
        let up = bottom + ntheta_subdiv;
        utils::push_ring_indices(bottom, up, ntheta_subdiv, &mut idx);
    }

    utils::push_apex_ring_indices(0, south, ntheta_subdiv, false, &mut idx);
    utils::push_apex_ring_indices(
        (nrings - 1) * ntheta_subdiv,
        north,
        ntheta_subdiv,
        true,
        &mut idx,
    );

    (utils::scaled(coords, Vector::repeat(0.5)), idx)
}
