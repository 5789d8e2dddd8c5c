//! Composite-body descriptions of granular particles.
//!
//! A [`ParticleSubstance`] is a rigid cluster of spherical [`Element`]s. The
//! arrangement of the elements is described by a [`SubstanceLayout`], and the
//! aggregate mass properties are derived once when the substance is built.
//!
//! ```
//! # #[cfg(feature = "f32")] {
//! use granular3d::substance::{ParticleSubstance, TetrahedronLayout};
//!
//! let substance = ParticleSubstance::from_layout(&TetrahedronLayout::default(), 2000.0, 0.05)
//!     .unwrap();
//!
//! assert_eq!(substance.elements().len(), 4);
//! assert!(substance.total_mass() > 0.0);
//! # }
//! ```

pub use self::element::Element;
pub use self::layout::{
    SphereLayout, SubstanceLayout, TetrahedronLayout, DEFAULT_DENSITY, DEFAULT_FRICTION,
    DEFAULT_PARTICLE_RADIUS,
};
pub use self::substance::{InvalidSubstanceError, ParticleSubstance};

mod element;
mod layout;
mod substance;
