use crate::math::Real;
use crate::sdf::{DEFAULT_ISOLEVEL, DEFAULT_RESOLUTION};
use crate::substance::{DEFAULT_DENSITY, DEFAULT_FRICTION};

/// The default radius of the particles generated by a [`ParticleCollider`](crate::collider::ParticleCollider).
pub const DEFAULT_COLLIDER_PARTICLE_RADIUS: Real = 0.1;

/// The default ratio between the cell size of the neighbor grid and the particle radius.
pub const DEFAULT_CELL_SIZE_MULTIPLIER: Real = 3.0;

/// Parameters of a [`ParticleCollider`](crate::collider::ParticleCollider).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ColliderParameters {
    /// The radius of each generated particle.
    ///
    /// Default: 0.1
    pub particle_radius: Real,
    /// The number of voxels along the largest axis of the padded mesh box.
    ///
    /// Default: 64
    pub max_resolution: u32,
    /// The cell size of the neighbor grid, in multiples of the particle radius.
    ///
    /// Default: 3.0
    pub cell_size_multiplier: Real,
    /// The value of the signed distance field at which particles are sampled.
    ///
    /// Default: 0.005
    pub isolevel: Real,
    /// The density of the particles.
    ///
    /// Default: 2000.0
    pub density: Real,
    /// The friction coefficient of the particles.
    ///
    /// Default: 0.05
    pub mu: Real,
}

impl ColliderParameters {
    /// The cell size of the neighbor grid.
    #[inline]
    pub fn cell_size(&self) -> Real {
        self.particle_radius * self.cell_size_multiplier
    }
}

impl Default for ColliderParameters {
    fn default() -> Self {
        Self {
            particle_radius: DEFAULT_COLLIDER_PARTICLE_RADIUS,
            max_resolution: DEFAULT_RESOLUTION,
            cell_size_multiplier: DEFAULT_CELL_SIZE_MULTIPLIER,
            isolevel: DEFAULT_ISOLEVEL,
            density: DEFAULT_DENSITY,
            mu: DEFAULT_FRICTION,
        }
    }
}
