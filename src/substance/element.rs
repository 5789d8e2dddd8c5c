use crate::math::{Real, Vector};
use na::RealField;

/// A spherical sub-element of a composite particle.
///
/// The layout of this structure is `#[repr(C)]` and contains no padding so
/// that arrays of elements can be uploaded as-is to GPU buffers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "bytemuck-serialize",
    derive(bytemuck::Pod, bytemuck::Zeroable)
)]
#[repr(C)]
pub struct Element {
    radius: Real,
    mass: Real,
    offset: Vector<Real>,
}

static_assertions::const_assert_eq!(
    core::mem::size_of::<Element>(),
    5 * core::mem::size_of::<Real>()
);

impl Element {
    /// Creates an element from its radius, its mass, and its offset from the particle origin.
    #[inline]
    pub fn new(radius: Real, mass: Real, offset: Vector<Real>) -> Self {
        Self {
            radius,
            mass,
            offset,
        }
    }

    /// Creates a solid ball element of uniform density.
    #[inline]
    pub fn with_density(radius: Real, density: Real, offset: Vector<Real>) -> Self {
        Self::new(radius, Self::ball_mass(radius, density), offset)
    }

    /// The mass of a solid ball of uniform density.
    #[inline]
    pub fn ball_mass(radius: Real, density: Real) -> Real {
        density * Real::pi() * radius * radius * radius * 4.0 / 3.0
    }

    /// The radius of this element.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// The mass of this element.
    #[inline]
    pub fn mass(&self) -> Real {
        self.mass
    }

    /// The position of the center of this element relative to the particle origin.
    #[inline]
    pub fn offset(&self) -> Vector<Real> {
        self.offset
    }
}
