use crate::math::{AngVector, Point, Real, Rotation, Vector};
use alloc::vec::Vec;

/// The dynamic state of a single particle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct ParticleState {
    /// The position of the particle origin.
    pub position: Point<Real>,
    /// The linear velocity of the particle.
    pub velocity: Vector<Real>,
    /// The orientation of the particle.
    pub orientation: Rotation<Real>,
    /// The angular velocity of the particle.
    pub angular_velocity: AngVector<Real>,
}

impl ParticleState {
    /// A particle at rest at the given position, with the identity orientation.
    #[inline]
    pub fn at_rest(position: Point<Real>) -> Self {
        Self {
            position,
            velocity: Vector::zeros(),
            orientation: Rotation::identity(),
            angular_velocity: AngVector::zeros(),
        }
    }

    /// One particle at rest per vertex.
    pub fn from_vertices(vertices: impl IntoIterator<Item = Point<Real>>) -> Vec<Self> {
        vertices.into_iter().map(Self::at_rest).collect()
    }
}

impl Default for ParticleState {
    fn default() -> Self {
        Self::at_rest(Point::origin())
    }
}
