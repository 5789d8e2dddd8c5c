//! Particle states and sets of particles sharing a substance.

pub use self::granular_particle::GranularParticle;
pub use self::particle_state::ParticleState;

mod granular_particle;
mod particle_state;
