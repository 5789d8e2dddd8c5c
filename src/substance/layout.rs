use crate::math::{Real, Vector};
use crate::shape::Ball;
use alloc::vec::Vec;

/// The default radius of a particle.
pub const DEFAULT_PARTICLE_RADIUS: Real = 0.04;
/// The default density of a particle.
pub const DEFAULT_DENSITY: Real = 2000.0;
/// The default friction coefficient of a particle.
pub const DEFAULT_FRICTION: Real = 0.05;

/// The arrangement of the spherical elements of a composite particle.
pub trait SubstanceLayout {
    /// The ball of each element, with its offset from the particle origin.
    fn element_balls(&self) -> Vec<(Ball, Vector<Real>)>;
}

/// Four elements at the vertices of a tetrahedron.
///
/// Each element has half the particle radius, and the tetrahedron vertices
/// `(±1, 0, -1/√2)` and `(0, ±1, 1/√2)` are scaled by that same half radius,
/// so the elements touch each other and their centroid is the particle origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TetrahedronLayout {
    /// The radius of the particle.
    pub radius: Real,
}

impl TetrahedronLayout {
    /// The ratio between the element radius and the particle radius.
    pub const ELEMENT_RATIO: Real = 0.5;

    /// Creates a tetrahedral layout for a particle of the given radius.
    pub fn new(radius: Real) -> Self {
        Self { radius }
    }
}

impl Default for TetrahedronLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICLE_RADIUS)
    }
}

impl SubstanceLayout for TetrahedronLayout {
    fn element_balls(&self) -> Vec<(Ball, Vector<Real>)> {
        let r = self.radius * Self::ELEMENT_RATIO;
        let h = 1.0 / Real::sqrt(2.0);

        [
            Vector::new(1.0, 0.0, -h),
            Vector::new(-1.0, 0.0, -h),
            Vector::new(0.0, 1.0, h),
            Vector::new(0.0, -1.0, h),
        ]
        .into_iter()
        .map(|v| (Ball::new(r), v * r))
        .collect()
    }
}

/// A single element covering the whole particle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SphereLayout {
    /// The radius of the particle.
    pub radius: Real,
}

impl SphereLayout {
    /// Creates a single-sphere layout for a particle of the given radius.
    pub fn new(radius: Real) -> Self {
        Self { radius }
    }
}

impl Default for SphereLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICLE_RADIUS)
    }
}

impl SubstanceLayout for SphereLayout {
    fn element_balls(&self) -> Vec<(Ball, Vector<Real>)> {
        Vec::from([(Ball::new(self.radius), Vector::zeros())])
    }
}
