use crate::buffer::{ExternalBuffer, HostOnly};
use crate::math::{AngularInertia, Point, Real};
use crate::particle::ParticleState;
use crate::substance::{
    InvalidSubstanceError, ParticleSubstance, DEFAULT_DENSITY, DEFAULT_FRICTION,
};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A set of particles sharing the same substance.
///
/// The particle states live on the host and are mirrored in an
/// [`ExternalBuffer`] (for example a GPU buffer). The mirror is updated at
/// construction and on every call to [`GranularParticle::sync_buffer`], and
/// must be freed explicitly with [`GranularParticle::release`].
pub struct GranularParticle<B: ExternalBuffer<ParticleState> = HostOnly> {
    states: Vec<ParticleState>,
    substance: Arc<ParticleSubstance>,
    buffer: B,
    released: bool,
}

impl GranularParticle<HostOnly> {
    /// Creates a set of particles living only on the host.
    pub fn new(states: Vec<ParticleState>, substance: Arc<ParticleSubstance>) -> Self {
        Self::with_buffer(states, substance, HostOnly)
    }

    /// Single-ball particles of the given radius, at rest on each vertex.
    ///
    /// The particles have the default density and friction coefficient.
    pub fn simple(
        vertices: impl IntoIterator<Item = Point<Real>>,
        radius: Real,
    ) -> Result<Self, InvalidSubstanceError> {
        let substance = ParticleSubstance::sphere(radius, DEFAULT_DENSITY, DEFAULT_FRICTION)?;
        Ok(Self::new(
            ParticleState::from_vertices(vertices),
            Arc::new(substance),
        ))
    }
}

impl<B: ExternalBuffer<ParticleState>> GranularParticle<B> {
    /// Creates a set of particles mirrored in `buffer`.
    ///
    /// The states are uploaded to `buffer` immediately.
    pub fn with_buffer(
        states: Vec<ParticleState>,
        substance: Arc<ParticleSubstance>,
        mut buffer: B,
    ) -> Self {
        buffer.upload(&states);
        Self {
            states,
            substance,
            buffer,
            released: false,
        }
    }

    /// The number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Is this set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state of every particle.
    #[inline]
    pub fn states(&self) -> &[ParticleState] {
        &self.states
    }

    /// A mutable reference to the state of every particle.
    ///
    /// Call [`Self::sync_buffer`] to mirror the modifications in the external buffer.
    #[inline]
    pub fn states_mut(&mut self) -> &mut [ParticleState] {
        &mut self.states
    }

    /// The position of every particle.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point<Real>> + '_ {
        self.states.iter().map(|s| s.position)
    }

    /// The substance shared by every particle.
    #[inline]
    pub fn substance(&self) -> &Arc<ParticleSubstance> {
        &self.substance
    }

    /// The inverse mass of each particle.
    #[inline]
    pub fn inv_mass(&self) -> Real {
        self.substance.inv_mass()
    }

    /// The world-space inverse inertia tensor of the `i`-th particle.
    pub fn world_inverse_inertia(&self, i: usize) -> AngularInertia<Real> {
        self.substance
            .world_inverse_inertia(&self.states[i].orientation)
    }

    /// The external mirror of the particle states.
    #[inline]
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Uploads the current particle states to the external buffer.
    ///
    /// Does nothing once the particles are released.
    pub fn sync_buffer(&mut self) {
        if self.released {
            log::warn!("Ignoring the upload of released particles.");
            return;
        }

        self.buffer.upload(&self.states);
    }

    /// Has [`Self::release`] been called?
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Drops the particle states and releases the external buffer.
    ///
    /// Only the first call has an effect.
    pub fn release(&mut self) {
        if self.released {
            return;
        }

        self.released = true;
        self.states = Vec::new();
        self.buffer.release();
    }
}

#[cfg(test)]
mod test {
    use super::GranularParticle;
    use crate::buffer::ExternalBuffer;
    use crate::math::{Point, Real, Rotation, Vector};
    use crate::particle::ParticleState;
    use crate::substance::ParticleSubstance;
    use alloc::sync::Arc;
    use na::RealField;

    #[derive(Default)]
    struct TrackingBuffer {
        uploads: Vec<usize>,
        releases: u32,
    }

    impl ExternalBuffer<ParticleState> for TrackingBuffer {
        fn upload(&mut self, data: &[ParticleState]) {
            self.uploads.push(data.len());
        }

        fn release(&mut self) {
            self.releases += 1;
        }
    }

    fn vertices() -> Vec<Point<Real>> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn simple_particles_start_at_rest() {
        let particles = GranularParticle::simple(vertices(), 0.1).unwrap();

        assert_eq!(particles.len(), 3);
        assert_eq!(particles.substance().elements().len(), 1);
        assert_eq!(particles.positions().collect::<Vec<_>>(), vertices());

        for state in particles.states() {
            assert_eq!(state.velocity, Vector::zeros());
            assert_eq!(state.angular_velocity, Vector::zeros());
            assert_eq!(state.orientation, Rotation::identity());
        }

        assert_relative_eq!(
            particles.inv_mass() * particles.substance().total_mass(),
            1.0,
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn substance_is_shared() {
        let substance = Arc::new(ParticleSubstance::tetrahedron(0.04, 2000.0, 0.05).unwrap());
        let a = GranularParticle::new(ParticleState::from_vertices(vertices()), substance.clone());
        let b = GranularParticle::new(ParticleState::from_vertices(vertices()), substance.clone());

        assert!(Arc::ptr_eq(a.substance(), b.substance()));
        assert_eq!(Arc::strong_count(&substance), 3);
    }

    #[test]
    fn world_inertia_uses_particle_orientation() {
        let substance = Arc::new(ParticleSubstance::tetrahedron(0.04, 2000.0, 0.05).unwrap());
        let mut particles =
            GranularParticle::new(ParticleState::from_vertices(vertices()), substance.clone());
        let rot = Rotation::from_axis_angle(&Vector::x_axis(), Real::frac_pi_4());
        particles.states_mut()[1].orientation = rot;

        assert_relative_eq!(
            particles.world_inverse_inertia(0),
            *substance.inverse_inertia()
        );
        assert_relative_eq!(
            particles.world_inverse_inertia(1),
            substance.world_inverse_inertia(&rot)
        );
    }

    #[test]
    fn release_happens_once() {
        let substance = Arc::new(ParticleSubstance::sphere(0.1, 1.0, 0.0).unwrap());
        let mut particles = GranularParticle::with_buffer(
            ParticleState::from_vertices(vertices()),
            substance,
            TrackingBuffer::default(),
        );
        assert_eq!(particles.buffer().uploads, vec![3]);

        particles.sync_buffer();
        assert_eq!(particles.buffer().uploads, vec![3, 3]);

        particles.release();
        particles.release();
        assert!(particles.is_released());
        assert!(particles.is_empty());
        assert_eq!(particles.buffer().releases, 1);

        // Uploads are ignored once released.
        particles.sync_buffer();
        assert_eq!(particles.buffer().uploads, vec![3, 3]);
    }
}
