use crate::math::{AngularInertia, Point, Real, Rotation, Vector};
use crate::substance::{Element, SphereLayout, SubstanceLayout, TetrahedronLayout};
use crate::utils;
use alloc::vec::Vec;

/// Error raised when the elements of a substance do not describe a valid rigid body.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum InvalidSubstanceError {
    /// A substance needs at least one element.
    #[error("a substance must contain at least one element")]
    NoElements,
    /// An element has a negative or non-finite radius.
    #[error("the element {index} has an invalid radius: {radius}")]
    InvalidRadius {
        /// The index of the faulty element.
        index: usize,
        /// The faulty radius.
        radius: Real,
    },
    /// An element has a negative or non-finite mass.
    #[error("the element {index} has an invalid mass: {mass}")]
    InvalidMass {
        /// The index of the faulty element.
        index: usize,
        /// The faulty mass.
        mass: Real,
    },
    /// An element has a non-finite offset.
    #[error("the element {0} has a non-finite offset")]
    InvalidOffset(usize),
    /// The elements have a total mass of zero.
    #[error("the total mass of a substance must be positive")]
    ZeroMass,
    /// The inertia tensor of the elements cannot be inverted.
    #[error("the inertia tensor of the substance is singular")]
    SingularInertia,
    /// The friction coefficient is negative or non-finite.
    #[error("invalid friction coefficient: {0}")]
    InvalidFriction(Real),
}

/// The physical description shared by a set of composite particles.
///
/// A substance is a rigid cluster of spherical [`Element`]s. Its mass, center of
/// mass and inverse inertia tensor are computed once at construction, and it
/// holds no per-particle state: many particles can share a single substance
/// through an `Arc<ParticleSubstance>`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleSubstance {
    elements: Vec<Element>,
    total_mass: Real,
    center_of_mass: Point<Real>,
    inertia: AngularInertia<Real>,
    inverse_inertia: AngularInertia<Real>,
    mu: Real,
}

impl ParticleSubstance {
    /// Creates a substance from explicit elements and a friction coefficient `mu`.
    ///
    /// The inertia tensor is computed relative to the center of mass: each
    /// element contributes the inertia of a solid ball, shifted with the
    /// parallel axis theorem.
    pub fn from_elements(elements: Vec<Element>, mu: Real) -> Result<Self, InvalidSubstanceError> {
        if elements.is_empty() {
            return Err(InvalidSubstanceError::NoElements);
        }

        if !mu.is_finite() || mu < 0.0 {
            return Err(InvalidSubstanceError::InvalidFriction(mu));
        }

        for (index, elt) in elements.iter().enumerate() {
            if !elt.radius().is_finite() || elt.radius() < 0.0 {
                return Err(InvalidSubstanceError::InvalidRadius {
                    index,
                    radius: elt.radius(),
                });
            }

            if !elt.mass().is_finite() || elt.mass() < 0.0 {
                return Err(InvalidSubstanceError::InvalidMass {
                    index,
                    mass: elt.mass(),
                });
            }

            if elt.offset().iter().any(|e| !e.is_finite()) {
                return Err(InvalidSubstanceError::InvalidOffset(index));
            }
        }

        let total_mass: Real = elements.iter().map(|e| e.mass()).sum();

        if total_mass <= 0.0 || !total_mass.is_finite() {
            return Err(InvalidSubstanceError::ZeroMass);
        }

        let center_of_mass = Point::from(
            elements
                .iter()
                .map(|e| e.offset() * e.mass())
                .sum::<Vector<Real>>()
                / total_mass,
        );

        let mut inertia = AngularInertia::zeros();

        for elt in &elements {
            let d = elt.offset() - center_of_mass.coords;
            let ball_i = elt.mass() * elt.radius() * elt.radius() * 2.0 / 5.0;
            let shift = AngularInertia::from_diagonal_element(d.norm_squared()) - d * d.transpose();
            inertia += AngularInertia::from_diagonal_element(ball_i) + shift * elt.mass();
        }

        let inverse_inertia = inertia
            .try_inverse()
            .filter(|inv| inv.iter().all(|e| e.is_finite()))
            .ok_or(InvalidSubstanceError::SingularInertia)?;

        log::debug!(
            "Created a substance with {} element(s) and a total mass of {}.",
            elements.len(),
            total_mass
        );

        Ok(Self {
            elements,
            total_mass,
            center_of_mass,
            inertia,
            inverse_inertia,
            mu,
        })
    }

    /// Creates a substance from an element layout and a uniform density.
    pub fn from_layout(
        layout: &impl SubstanceLayout,
        density: Real,
        mu: Real,
    ) -> Result<Self, InvalidSubstanceError> {
        let elements = layout
            .element_balls()
            .into_iter()
            .map(|(ball, offset)| Element::with_density(ball.radius, density, offset))
            .collect();
        Self::from_elements(elements, mu)
    }

    /// A substance made of four elements arranged as a tetrahedron.
    ///
    /// See [`TetrahedronLayout`].
    pub fn tetrahedron(radius: Real, density: Real, mu: Real) -> Result<Self, InvalidSubstanceError> {
        Self::from_layout(&TetrahedronLayout::new(radius), density, mu)
    }

    /// A substance made of a single ball.
    pub fn sphere(radius: Real, density: Real, mu: Real) -> Result<Self, InvalidSubstanceError> {
        Self::from_layout(&SphereLayout::new(radius), density, mu)
    }

    /// The elements of this substance.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The total mass of this substance.
    #[inline]
    pub fn total_mass(&self) -> Real {
        self.total_mass
    }

    /// The inverse of the total mass of this substance.
    #[inline]
    pub fn inv_mass(&self) -> Real {
        utils::inv(self.total_mass)
    }

    /// The center of mass, relative to the particle origin.
    #[inline]
    pub fn center_of_mass(&self) -> Point<Real> {
        self.center_of_mass
    }

    /// The inertia tensor, relative to the center of mass.
    #[inline]
    pub fn inertia(&self) -> &AngularInertia<Real> {
        &self.inertia
    }

    /// The inverse of the inertia tensor, relative to the center of mass.
    #[inline]
    pub fn inverse_inertia(&self) -> &AngularInertia<Real> {
        &self.inverse_inertia
    }

    /// The friction coefficient.
    #[inline]
    pub fn mu(&self) -> Real {
        self.mu
    }

    /// The inverse inertia tensor of a particle with the given orientation, in world space.
    #[inline]
    pub fn world_inverse_inertia(&self, rotation: &Rotation<Real>) -> AngularInertia<Real> {
        let rot = rotation.to_rotation_matrix();
        rot.matrix() * self.inverse_inertia * rot.matrix().transpose()
    }
}

#[cfg(test)]
mod test {
    use super::{InvalidSubstanceError, ParticleSubstance};
    use crate::math::{AngularInertia, Point, Real, Rotation, Vector};
    use crate::substance::Element;
    use na::RealField;

    #[test]
    fn tetrahedron_mass_properties() {
        let (r, rho) = (0.04, 2000.0);
        let substance = ParticleSubstance::tetrahedron(r, rho, 0.05).unwrap();
        let expected_mass = 4.0 * rho * Real::pi() * (r / 2.0) * (r / 2.0) * (r / 2.0) * 4.0 / 3.0;

        assert_eq!(substance.elements().len(), 4);
        assert_relative_eq!(substance.total_mass(), expected_mass, max_relative = 1.0e-5);
        assert_relative_eq!(substance.center_of_mass(), Point::origin(), epsilon = 1.0e-7);
        assert_eq!(substance.mu(), 0.05);

        // The regular tetrahedron has an isotropic inertia tensor.
        let i = substance.inertia();
        assert_relative_eq!(i[(0, 0)], i[(1, 1)], max_relative = 1.0e-4);
        assert_relative_eq!(i[(1, 1)], i[(2, 2)], max_relative = 1.0e-4);
        assert_relative_eq!(
            i * substance.inverse_inertia(),
            AngularInertia::identity(),
            epsilon = 1.0e-3
        );
    }

    #[test]
    fn single_element_is_its_own_center_of_mass() {
        let offset = Vector::new(1.0, -2.0, 0.5);
        let substance =
            ParticleSubstance::from_elements(vec![Element::new(0.5, 3.0, offset)], 0.1).unwrap();

        assert_eq!(substance.center_of_mass(), Point::from(offset));
        let expected = 2.0 / 5.0 * 3.0 * 0.25;
        assert_relative_eq!(
            *substance.inertia(),
            AngularInertia::from_diagonal_element(expected),
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn invalid_elements_are_rejected() {
        assert_eq!(
            ParticleSubstance::from_elements(vec![], 0.1),
            Err(InvalidSubstanceError::NoElements)
        );
        assert_eq!(
            ParticleSubstance::from_elements(vec![Element::new(0.5, 0.0, Vector::zeros())], 0.1),
            Err(InvalidSubstanceError::ZeroMass)
        );
        assert_eq!(
            ParticleSubstance::from_elements(vec![Element::new(-1.0, 1.0, Vector::zeros())], 0.1),
            Err(InvalidSubstanceError::InvalidRadius {
                index: 0,
                radius: -1.0
            })
        );
        assert!(matches!(
            ParticleSubstance::from_elements(
                vec![Element::new(1.0, Real::NAN, Vector::zeros())],
                0.1
            ),
            Err(InvalidSubstanceError::InvalidMass { index: 0, .. })
        ));
        assert_eq!(
            ParticleSubstance::from_elements(vec![Element::new(0.0, 1.0, Vector::zeros())], 0.1),
            Err(InvalidSubstanceError::SingularInertia)
        );
        assert_eq!(
            ParticleSubstance::sphere(1.0, 1.0, -0.5),
            Err(InvalidSubstanceError::InvalidFriction(-0.5))
        );
    }

    #[test]
    fn world_inverse_inertia_follows_rotation() {
        let elements = vec![
            Element::new(0.1, 1.0, Vector::new(-1.0, 0.0, 0.0)),
            Element::new(0.1, 1.0, Vector::new(1.0, 0.0, 0.0)),
        ];
        let substance = ParticleSubstance::from_elements(elements, 0.0).unwrap();
        let local = substance.inverse_inertia();

        // A quarter turn around Z swaps the X and Y axes.
        let rot = Rotation::from_axis_angle(&Vector::z_axis(), Real::frac_pi_2());
        let world = substance.world_inverse_inertia(&rot);

        assert_relative_eq!(world[(0, 0)], local[(1, 1)], max_relative = 1.0e-5);
        assert_relative_eq!(world[(1, 1)], local[(0, 0)], max_relative = 1.0e-5);
        assert_relative_eq!(world[(2, 2)], local[(2, 2)], max_relative = 1.0e-5);
        assert_relative_eq!(
            substance.world_inverse_inertia(&Rotation::identity()),
            *local
        );
    }
}
