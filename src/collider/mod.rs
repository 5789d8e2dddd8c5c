//! Mesh colliders made of particles sampled on their surface.

pub use self::parameters::{
    ColliderParameters, DEFAULT_CELL_SIZE_MULTIPLIER, DEFAULT_COLLIDER_PARTICLE_RADIUS,
};
pub use self::particle_collider::{ColliderError, ParticleCollider};

mod parameters;
mod particle_collider;
